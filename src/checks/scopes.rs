//! Scopes other than `global` and `local`

use super::trait_def::{Check, CheckContext};
use crate::core::diagnostics::DiagnosticSink;
use crate::core::error::MapResult;
use crate::script::model::{GLOBAL, LOCAL};

pub struct UnknownScopeCheck;

impl Check for UnknownScopeCheck {
  fn name(&self) -> &'static str {
    "unknown-scopes"
  }

  fn description(&self) -> &'static str {
    "Warn about visibility scopes the linker does not know"
  }

  fn run(&self, ctx: &CheckContext<'_>, sink: &mut dyn DiagnosticSink) -> MapResult<()> {
    for release in ctx.releases {
      for scope in release.symbols.keys().filter(|s| *s != GLOBAL && *s != LOCAL) {
        sink.warning(format!(
          "{} contains unknown scope named {} (different from 'global' and 'local')",
          release.name, scope
        ));
      }
    }
    Ok(())
  }
}
