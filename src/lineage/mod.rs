//! Release lineage: dependency chains, latest release and output order

pub mod order;
pub mod resolver;

pub use order::{natural_cmp, natural_key};
pub use resolver::dependencies;
