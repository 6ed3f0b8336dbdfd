//! Release lineage must resolve: no cycles, no dangling or ambiguous names

use super::trait_def::{Check, CheckContext};
use crate::core::diagnostics::DiagnosticSink;
use crate::core::error::MapResult;
use crate::lineage::dependencies;

pub struct LineageCheck;

impl Check for LineageCheck {
  fn name(&self) -> &'static str {
    "lineage"
  }

  fn description(&self) -> &'static str {
    "Resolve predecessor chains and reject cycles or unknown releases"
  }

  fn run(&self, ctx: &CheckContext<'_>, sink: &mut dyn DiagnosticSink) -> MapResult<()> {
    let chains = dependencies(ctx.releases)?;
    sink.info("Found dependencies:");
    for chain in chains {
      sink.info(format!("    {}", chain.join("->")));
    }
    Ok(())
  }
}
