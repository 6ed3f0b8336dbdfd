//! `abimap check` - validate a version script
//!
//! Parses the file and runs every structural check. With `--json` the
//! diagnostics are collected and printed as a JSON report instead of logged.

use crate::core::diagnostics::{Diagnostic, Diagnostics, Level, TracingSink};
use crate::core::error::MapResult;
use crate::script::model::Map;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
  file: String,
  releases: usize,
  warnings: usize,
  diagnostics: &'a [Diagnostic],
}

/// Run the check command
pub fn run_check(file: &Path, json: bool) -> MapResult<()> {
  if !json {
    Map::read(file, &mut TracingSink)?;
    return Ok(());
  }

  let mut diags = Diagnostics::new();
  let map = Map::read(file, &mut diags)?;
  let events: Vec<Diagnostic> = diags.into_vec().into_iter().filter(|d| d.level > Level::Debug).collect();
  let report = CheckReport {
    file: file.display().to_string(),
    releases: map.releases().len(),
    warnings: events.iter().filter(|d| d.level >= Level::Warning).count(),
    diagnostics: &events,
  };
  println!("{}", serde_json::to_string_pretty(&report)?);
  Ok(())
}
