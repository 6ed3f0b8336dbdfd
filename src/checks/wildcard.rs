//! Placement of the `*` wildcard

use super::trait_def::{Check, CheckContext};
use crate::core::diagnostics::DiagnosticSink;
use crate::core::error::MapResult;
use crate::script::model::{GLOBAL, LOCAL, WILDCARD};

pub struct WildcardCheck;

impl Check for WildcardCheck {
  fn name(&self) -> &'static str {
    "wildcard-placement"
  }

  fn description(&self) -> &'static str {
    "Warn about wildcards in global scope, repeated or missing wildcards"
  }

  fn run(&self, ctx: &CheckContext<'_>, sink: &mut dyn DiagnosticSink) -> MapResult<()> {
    let mut found: Vec<(&str, &str)> = Vec::new();

    for release in ctx.releases {
      for scope in [LOCAL, GLOBAL] {
        if !release.scope_contains(scope, WILDCARD) {
          continue;
        }
        if scope == GLOBAL {
          sink.warning(format!(
            "{} contains the '*' wildcard in global scope. It is probably exporting symbols it should not.",
            release.name
          ));
        }
        found.push((release.name.as_str(), scope));
      }
    }

    match found.len() {
      0 => sink.warning("The '*' wildcard was not found"),
      1 => {}
      _ => {
        let places: Vec<String> = found
          .iter()
          .map(|(name, scope)| format!("\n    {}: in '{}'", name, scope))
          .collect();
        sink.warning(format!("The '*' wildcard was found in more than one place:{}", places.concat()));
      }
    }
    Ok(())
  }
}
