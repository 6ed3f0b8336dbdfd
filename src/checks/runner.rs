//! Check runner for executing structural checks

use super::trait_def::{Check, CheckContext};
use crate::core::diagnostics::DiagnosticSink;
use crate::core::error::MapResult;

/// Executes checks in registration order
pub struct CheckRunner {
  checks: Vec<Box<dyn Check>>,
}

impl CheckRunner {
  pub fn new() -> Self {
    Self { checks: Vec::new() }
  }

  pub fn add_check(&mut self, check: Box<dyn Check>) {
    self.checks.push(check);
  }

  /// Run every check, stopping at the first fatal one
  pub fn run_all(&self, ctx: &CheckContext<'_>, sink: &mut dyn DiagnosticSink) -> MapResult<()> {
    for check in &self.checks {
      sink.debug(format!("Running check '{}': {}", check.name(), check.description()));
      check.run(ctx, sink)?;
    }
    Ok(())
  }

  pub fn checks(&self) -> &[Box<dyn Check>] {
    &self.checks
  }
}

impl Default for CheckRunner {
  fn default() -> Self {
    Self::new()
  }
}

/// Create a runner with all built-in checks
pub fn create_default_runner() -> CheckRunner {
  let mut runner = CheckRunner::new();

  runner.add_check(Box::new(super::duplicates::DuplicateSymbolsCheck));
  runner.add_check(Box::new(super::wildcard::WildcardCheck));
  runner.add_check(Box::new(super::base_version::BaseVersionCheck));
  runner.add_check(Box::new(super::scopes::UnknownScopeCheck));
  runner.add_check(Box::new(super::lineage::LineageCheck));

  runner
}
