//! Dependency chains between releases
//!
//! Each release points at its predecessor. Following those pointers from every
//! chain head (a release nobody names as predecessor) gives one ancestry path
//! per head: `[head, parent, grandparent, ...]`.

use crate::core::diagnostics::DiagnosticSink;
use crate::core::error::{LineageError, MapResult};
use crate::naming::release_name::ReleaseInfo;
use crate::script::model::{Map, Release};
use std::collections::HashSet;

/// Suffix every candidate must beat to become the latest release
const LATEST_FLOOR: &str = "_0_0_0";

/// Predecessor of the release called `name`
fn predecessor<'a>(releases: &'a [Release], name: &str) -> Result<Option<&'a str>, LineageError> {
  let mut found = releases.iter().filter(|r| r.name == name);
  let Some(release) = found.next() else {
    return Err(LineageError::DanglingReference { name: name.to_string() });
  };
  if found.next().is_some() {
    return Err(LineageError::AmbiguousRelease { name: name.to_string() });
  }
  Ok(release.previous.as_deref())
}

/// Ancestry chains rooted at the chain heads
///
/// A chain that reaches a release already resolved by an earlier chain
/// replaces that earlier chain when it was rooted there.
pub fn dependencies(releases: &[Release]) -> Result<Vec<Vec<String>>, LineageError> {
  let mut solved: HashSet<&str> = HashSet::new();
  let mut chains: Vec<Vec<String>> = Vec::new();

  for release in releases {
    if solved.contains(release.name.as_str()) {
      continue;
    }

    let mut current = vec![release.name.clone()];
    let mut next = release.previous.as_deref();
    while let Some(dep) = next {
      if current.iter().any(|n| n == dep) {
        current.push(dep.to_string());
        return Err(LineageError::CircularDependency { chain: current });
      }
      current.push(dep.to_string());

      if !solved.insert(dep) {
        chains.retain(|chain| chain.first().is_none_or(|head| head != dep));
      }
      next = predecessor(releases, dep)?;
    }

    solved.insert(release.name.as_str());
    chains.push(current);
  }

  Ok(chains)
}

impl Map {
  /// Ancestry chains of this map, one per chain head
  pub fn dependencies(&self) -> MapResult<Vec<Vec<String>>> {
    Ok(dependencies(self.releases())?)
  }

  /// Chain head with the greatest version suffix
  ///
  /// Suffixes are compared as plain strings, so `_9_0` is newer than `_10_0`.
  /// Heads without version information never qualify.
  pub fn latest_release(&self, sink: &mut dyn DiagnosticSink) -> MapResult<Option<ReleaseInfo>> {
    self.ensure_checked()?;

    let mut latest: Option<ReleaseInfo> = None;
    for chain in self.dependencies()? {
      let Some(head) = chain.first() else {
        continue;
      };
      let Some(info) = ReleaseInfo::parse(head, sink)? else {
        continue;
      };
      let best = latest.as_ref().and_then(|l| l.suffix.as_deref()).unwrap_or(LATEST_FLOOR);
      if info.suffix.as_deref().is_some_and(|suffix| suffix > best) {
        latest = Some(info);
      }
    }
    Ok(latest)
  }
}
