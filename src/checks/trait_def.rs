//! Check trait for structural validation of a version script
//!
//! Every rule the checker applies implements `Check`. A check reports what it
//! finds to the diagnostic sink and only returns an error for problems that
//! make the map unusable.

use crate::core::diagnostics::DiagnosticSink;
use crate::core::error::MapResult;
use crate::script::model::Release;

/// Input shared by all checks
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
  pub releases: &'a [Release],
}

/// Structural check
///
/// # Example
///
/// ```rust,ignore
/// struct NoEmptyGlobal;
///
/// impl Check for NoEmptyGlobal {
///   fn name(&self) -> &'static str {
///     "empty-global"
///   }
///
///   fn description(&self) -> &'static str {
///     "Warn about releases that export nothing"
///   }
///
///   fn run(&self, ctx: &CheckContext<'_>, sink: &mut dyn DiagnosticSink) -> MapResult<()> {
///     for release in ctx.releases.iter().filter(|r| r.scope(GLOBAL).is_none_or(<[_]>::is_empty)) {
///       sink.warning(format!("{} exports no symbols", release.name));
///     }
///     Ok(())
///   }
/// }
/// ```
pub trait Check: Send + Sync {
  /// Unique name for this check (kebab-case)
  fn name(&self) -> &'static str;

  /// Human-readable description of what this check validates
  fn description(&self) -> &'static str;

  /// Run the check; `Err` aborts the whole validation
  fn run(&self, ctx: &CheckContext<'_>, sink: &mut dyn DiagnosticSink) -> MapResult<()>;
}
