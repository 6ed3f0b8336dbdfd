//! Typed representation of a version script
//!
//! A `Map` owns a list of `Release` blocks. Each release exclusively owns its
//! scope-to-members table; nothing is shared between releases or maps.

use crate::core::diagnostics::DiagnosticSink;
use crate::core::error::{MapResult, PolicyError, ResultExt, StructureError};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Scope holding exported symbols
pub const GLOBAL: &str = "global";
/// Scope holding hidden symbols
pub const LOCAL: &str = "local";
/// Catch-all member token
pub const WILDCARD: &str = "*";

/// One versioned block of a version script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Release {
  pub name: String,
  /// Release this one extends; `None` marks a base release
  pub previous: Option<String>,
  /// Scope name to members, in declaration order (duplicates kept)
  pub symbols: BTreeMap<String, Vec<String>>,
  pub released: bool,
}

impl Release {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Self::default()
    }
  }

  pub fn with_previous(mut self, previous: Option<String>) -> Self {
    self.previous = previous.filter(|p| !p.is_empty());
    self
  }

  /// Builder helper: append members to `scope`
  pub fn with_scope<I, S>(mut self, scope: &str, members: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.scope_mut(scope).extend(members.into_iter().map(Into::into));
    self
  }

  pub fn is_base(&self) -> bool {
    self.previous.is_none()
  }

  pub fn scope(&self, scope: &str) -> Option<&[String]> {
    self.symbols.get(scope).map(Vec::as_slice)
  }

  /// Members of `scope`, creating the scope when absent
  pub fn scope_mut(&mut self, scope: &str) -> &mut Vec<String> {
    self.symbols.entry(scope.to_string()).or_default()
  }

  pub fn scope_contains(&self, scope: &str, member: &str) -> bool {
    self.scope(scope).is_some_and(|members| members.iter().any(|m| m == member))
  }

  /// Fail if the release was already published
  pub fn ensure_mutable(&self) -> MapResult<()> {
    if self.released {
      return Err(PolicyError::ReleasedReleaseModification { name: self.name.clone() }.into());
    }
    Ok(())
  }

  /// Append symbols to `scope`; rejected on released releases
  pub fn add_symbols<I>(&mut self, scope: &str, symbols: I) -> MapResult<()>
  where
    I: IntoIterator<Item = String>,
  {
    self.ensure_mutable()?;
    self.scope_mut(scope).extend(symbols);
    Ok(())
  }

  /// Members repeated inside one scope, per scope
  pub fn duplicates(&self) -> Vec<(String, Vec<String>)> {
    let mut found = Vec::new();
    for (scope, members) in &self.symbols {
      let mut seen = BTreeSet::new();
      let mut dups = BTreeSet::new();
      for member in members {
        if !seen.insert(member.as_str()) {
          dups.insert(member.clone());
        }
      }
      if !dups.is_empty() {
        found.push((scope.clone(), dups.into_iter().collect()));
      }
    }
    found
  }
}

/// A parsed or synthesized version script
#[derive(Debug, Clone, Default)]
pub struct Map {
  releases: Vec<Release>,
  checked: bool,
  /// Source lines, kept for diagnostic context
  lines: Vec<String>,
  filename: Option<String>,
}

impl Map {
  pub fn new() -> Self {
    Self::default()
  }

  pub(crate) fn from_parts(releases: Vec<Release>, lines: Vec<String>, filename: Option<String>) -> Self {
    Self {
      releases,
      checked: false,
      lines,
      filename,
    }
  }

  /// Read, parse and check a version script file
  pub fn read(path: &Path, sink: &mut dyn DiagnosticSink) -> MapResult<Self> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read map file {}", path.display()))?;
    let filename = path.display().to_string();
    let mut map = Self::parse(&text, Some(&filename), sink)?;
    map.check(sink)?;
    Ok(map)
  }

  pub fn releases(&self) -> &[Release] {
    &self.releases
  }

  /// Reordering keeps the map checked
  pub(crate) fn releases_mut(&mut self) -> &mut Vec<Release> {
    &mut self.releases
  }

  pub fn is_empty(&self) -> bool {
    self.releases.is_empty()
  }

  pub fn is_checked(&self) -> bool {
    self.checked
  }

  pub(crate) fn set_checked(&mut self) {
    self.checked = true;
  }

  pub fn filename(&self) -> Option<&str> {
    self.filename.as_deref()
  }

  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  /// Append a release; the map must be checked again
  pub fn push(&mut self, release: Release) {
    self.releases.push(release);
    self.checked = false;
  }

  /// Swap the whole release list; the map must be checked again
  pub fn replace_releases(&mut self, releases: Vec<Release>) {
    self.releases = releases;
    self.checked = false;
  }

  pub fn find(&self, name: &str) -> Option<&Release> {
    self.releases.iter().find(|r| r.name == name)
  }

  pub fn find_mut(&mut self, name: &str) -> Option<&mut Release> {
    self.releases.iter_mut().find(|r| r.name == name)
  }

  pub(crate) fn ensure_checked(&self) -> MapResult<()> {
    if !self.checked {
      return Err(StructureError::NotChecked.into());
    }
    Ok(())
  }

  /// Union of every release's `global` scope
  pub fn all_global_symbols(&self) -> MapResult<BTreeSet<String>> {
    self.ensure_checked()?;
    Ok(
      self
        .releases
        .iter()
        .filter_map(|r| r.scope(GLOBAL))
        .flatten()
        .cloned()
        .collect(),
    )
  }
}
