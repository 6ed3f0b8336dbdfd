//! Structural validation of a parsed map
//!
//! All checks implement the `Check` trait and run in order through a
//! `CheckRunner`. Most only report warnings; the lineage check fails on
//! cycles and on dangling or ambiguous predecessors.
//!
//! # Built-in Checks
//!
//! - **duplicate-symbols**: symbols listed twice in one scope
//! - **wildcard-placement**: `*` in global scope, repeated or missing
//! - **base-version**: local wildcard on the base release only
//! - **unknown-scopes**: scopes other than `global` and `local`
//! - **lineage**: predecessor chains resolve

mod base_version;
mod duplicates;
mod lineage;
mod runner;
mod scopes;
mod trait_def;
mod wildcard;

pub use runner::{CheckRunner, create_default_runner};
pub use trait_def::{Check, CheckContext};

use crate::core::diagnostics::DiagnosticSink;
use crate::core::error::{MapResult, StructureError};
use crate::script::model::Map;

impl Map {
  /// Validate the map and mark it checked
  pub fn check(&mut self, sink: &mut dyn DiagnosticSink) -> MapResult<()> {
    if self.is_empty() {
      return Err(StructureError::EmptyMap.into());
    }

    let ctx = CheckContext {
      releases: self.releases(),
    };
    create_default_runner().run_all(&ctx, sink)?;

    self.set_checked();
    Ok(())
  }
}
