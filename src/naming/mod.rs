//! Release naming heuristics
//!
//! - **version**: version slots, parsing and bumping
//! - **release_name**: prefix/suffix extraction from identifiers
//! - **guess**: next release name from explicit parts or the map

pub mod guess;
pub mod release_name;
pub mod version;

pub use guess::NameRequest;
pub use release_name::ReleaseInfo;
pub use version::Version;
