//! Base release detection through the local wildcard
//!
//! A release without predecessor that hides everything else with `local: *;`
//! is the base version. Exactly one is expected.

use super::trait_def::{Check, CheckContext};
use crate::core::diagnostics::DiagnosticSink;
use crate::core::error::MapResult;
use crate::script::model::{LOCAL, WILDCARD};

pub struct BaseVersionCheck;

impl Check for BaseVersionCheck {
  fn name(&self) -> &'static str {
    "base-version"
  }

  fn description(&self) -> &'static str {
    "Find the base release and flag local wildcards outside of it"
  }

  fn run(&self, ctx: &CheckContext<'_>, sink: &mut dyn DiagnosticSink) -> MapResult<()> {
    let mut bases: Vec<&str> = Vec::new();

    for release in ctx.releases.iter().filter(|r| r.scope_contains(LOCAL, WILDCARD)) {
      sink.info(format!("{} contains the local '*' wildcard", release.name));
      match &release.previous {
        Some(previous) => sink.warning(format!(
          "{} should not contain the local wildcard because it is not the base version (it refers to version {} as \
           its predecessor)",
          release.name, previous
        )),
        None => {
          sink.info(format!("{} seems to be the base version", release.name));
          bases.push(release.name.as_str());
        }
      }
    }

    match bases.len() {
      0 => sink.warning("No base version release found"),
      1 => {}
      _ => {
        let names: Vec<String> = bases.iter().map(|name| format!("\n    {}", name)).collect();
        sink.warning(format!(
          "More than one release seem to be the base version (contain the local wildcard and do not have a \
           predecessor version):{}",
          names.concat()
        ));
      }
    }
    Ok(())
  }
}
