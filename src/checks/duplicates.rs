//! Symbols repeated inside one scope of a release

use super::trait_def::{Check, CheckContext};
use crate::core::diagnostics::DiagnosticSink;
use crate::core::error::MapResult;

pub struct DuplicateSymbolsCheck;

impl Check for DuplicateSymbolsCheck {
  fn name(&self) -> &'static str {
    "duplicate-symbols"
  }

  fn description(&self) -> &'static str {
    "Report symbols listed twice in the same scope"
  }

  fn run(&self, ctx: &CheckContext<'_>, sink: &mut dyn DiagnosticSink) -> MapResult<()> {
    for release in ctx.releases {
      let duplicates = release.duplicates();
      if duplicates.is_empty() {
        continue;
      }

      let mut message = format!("Duplicates found in release '{}':", release.name);
      for (scope, symbols) in duplicates {
        message.push_str(&format!("\n    {}:", scope));
        for symbol in symbols {
          message.push_str(&format!("\n        {}", symbol));
        }
      }
      sink.warning(message);
    }
    Ok(())
  }
}
