//! Version script model, parser and serializer

pub mod model;
pub mod parser;
pub mod render;

pub use model::{GLOBAL, LOCAL, Map, Release, WILDCARD};
pub use parser::ParserError;
pub use render::render;
