//! Symbol changes and the map mutations they lead to

pub mod symbols;
pub mod update;

pub use symbols::{Strategy, SymbolDelta, clean_symbols};
pub use update::{UpdateOptions, UpdateOutcome, new_map};
