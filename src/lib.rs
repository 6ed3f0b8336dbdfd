//! abimap: linker version script maintenance
//!
//! Parses version scripts into a typed [`script::Map`], validates release
//! lineage, computes which exported symbols a new symbol list adds or removes,
//! and renders the updated map. Everything below `commands` is free of I/O
//! beyond `Map::read` and reports through a [`core::diagnostics::DiagnosticSink`].
//!
//! ```rust,ignore
//! use abimap::core::diagnostics::Diagnostics;
//! use abimap::delta::{Strategy, SymbolDelta, UpdateOptions};
//! use abimap::script::{Map, render};
//!
//! let mut diags = Diagnostics::new();
//! let mut map = Map::parse(text, Some("libfoo.map"), &mut diags)?;
//! map.check(&mut diags)?;
//!
//! let existing = map.all_global_symbols()?;
//! let delta = SymbolDelta::compute(&existing, &new_symbols, Strategy::Compare, &mut diags);
//! map.apply_update(&delta, &UpdateOptions { guess: true, ..Default::default() }, &mut diags)?;
//! println!("{}", render(&map));
//! ```

pub mod checks;
pub mod commands;
pub mod core;
pub mod delta;
pub mod lineage;
pub mod naming;
pub mod script;
