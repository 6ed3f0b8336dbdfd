//! Applying a symbol delta to a map, and building a map from scratch
//!
//! A compatible change (symbols only added) either extends a named, still open
//! release or appends a new release on top of the latest one. A breaking
//! change merges every exported symbol into one new base release that
//! replaces the whole map.

use crate::core::diagnostics::DiagnosticSink;
use crate::core::error::{MapError, MapResult, PolicyError};
use crate::delta::symbols::SymbolDelta;
use crate::naming::guess::NameRequest;
use crate::script::model::{GLOBAL, LOCAL, Map, Release, WILDCARD};
use std::collections::BTreeSet;

/// Caller choices for an update
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
  pub request: Option<NameRequest>,
  pub allow_abi_break: bool,
  /// Mark the touched release as released
  pub finalize: bool,
  /// Guess missing name parts from the map
  pub guess: bool,
}

/// What an update did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
  /// Nothing added or removed
  Unchanged,
  /// Symbols added to a release (new or existing)
  Extended { release: String, created: bool },
  /// Every release merged into a new base release
  Merged { release: String },
}

impl Map {
  /// Apply `delta` and leave the map checked and ordered for output
  ///
  /// Nothing is modified when the change is rejected.
  pub fn apply_update(
    &mut self,
    delta: &SymbolDelta,
    options: &UpdateOptions,
    sink: &mut dyn DiagnosticSink,
  ) -> MapResult<UpdateOutcome> {
    self.ensure_checked()?;

    if delta.is_empty() {
      return Ok(UpdateOutcome::Unchanged);
    }

    // Work on a copy so a late failure leaves `self` untouched
    let mut staged = self.clone();
    let outcome = if delta.breaks_abi() {
      staged.merge_release(delta, options, sink)?
    } else {
      staged.extend_release(delta, options, sink)?
    };

    let top = match &outcome {
      UpdateOutcome::Extended { release, .. } | UpdateOutcome::Merged { release } => release.clone(),
      UpdateOutcome::Unchanged => return Ok(outcome),
    };
    staged.check(sink)?;
    staged.sort_releases_nice(&top)?;

    *self = staged;
    Ok(outcome)
  }

  fn extend_release(
    &mut self,
    delta: &SymbolDelta,
    options: &UpdateOptions,
    sink: &mut dyn DiagnosticSink,
  ) -> MapResult<UpdateOutcome> {
    if let Some(target) = options.request.as_ref().and_then(|r| r.release.as_deref())
      && let Some(release) = self.find_mut(target)
    {
      release.add_symbols(GLOBAL, delta.added.iter().cloned())?;
      if options.finalize {
        release.released = true;
      }
      return Ok(UpdateOutcome::Extended {
        release: release.name.clone(),
        created: false,
      });
    }

    let latest = self.latest_release(sink)?;
    let name = self.guess_name(options.request.as_ref(), false, options.guess, sink)?;
    let previous = latest.map(|info| info.release);
    if previous.is_none() {
      sink.warning(format!("No previous release found; '{}' starts a new lineage", name));
    }

    let mut release = Release::new(name.clone())
      .with_previous(previous)
      .with_scope(GLOBAL, delta.added.iter().cloned());
    release.released = options.finalize;
    self.push(release);

    Ok(UpdateOutcome::Extended { release: name, created: true })
  }

  fn merge_release(
    &mut self,
    delta: &SymbolDelta,
    options: &UpdateOptions,
    sink: &mut dyn DiagnosticSink,
  ) -> MapResult<UpdateOutcome> {
    if !options.allow_abi_break {
      return Err(PolicyError::AbiBreakDetected {
        removed: delta.removed.iter().cloned().collect(),
      }
      .into());
    }
    sink.warning("ABI break detected: symbols were removed.");

    let name = self.guess_name(options.request.as_ref(), true, options.guess, sink)?;

    let mut symbols: BTreeSet<String> = self.all_global_symbols()?;
    symbols.extend(delta.added.iter().cloned());
    if symbols.remove(WILDCARD) {
      sink.warning("Wildcard '*' found in global. Removed to avoid exporting unexpected symbols.");
    }
    symbols.retain(|s| !delta.removed.contains(s));

    let mut release = Release::new(name.clone())
      .with_scope(GLOBAL, symbols)
      .with_scope(LOCAL, [WILDCARD]);
    release.released = options.finalize;
    self.replace_releases(vec![release]);

    Ok(UpdateOutcome::Merged { release: name })
  }
}

/// Build a map holding a single base release with `symbols`
///
/// Returns `None` (after a warning) when there is nothing to export.
pub fn new_map(
  request: Option<&NameRequest>,
  symbols: &[String],
  finalize: bool,
  sink: &mut dyn DiagnosticSink,
) -> MapResult<Option<Map>> {
  let Some(request) = request else {
    return Err(MapError::with_help(
      "Please provide the release name.",
      "Use --release LIBX_1_0_0, or --name libx together with --version 1.0.0.",
    ));
  };

  if symbols.is_empty() {
    sink.warning("No valid symbols provided. Nothing done.");
    return Ok(None);
  }

  let mut map = Map::new();
  let name = map.guess_name(Some(request), false, false, sink)?;
  sink.debug(format!("Generated name: '{}'", name));

  let unique: BTreeSet<&String> = symbols.iter().collect();
  let mut release = Release::new(name.clone())
    .with_scope(GLOBAL, unique.into_iter().cloned())
    .with_scope(LOCAL, [WILDCARD]);
  release.released = finalize;
  map.push(release);

  map.check(sink)?;
  map.sort_releases_nice(&name)?;
  Ok(Some(map))
}
