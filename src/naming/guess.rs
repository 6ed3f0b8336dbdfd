//! Choosing the name of a new release
//!
//! Explicit parts always win. Missing parts are guessed from the map when
//! guessing is enabled: the library name from the common prefix of the
//! existing release names (or the latest release), the version by bumping the
//! latest release.

use crate::core::diagnostics::DiagnosticSink;
use crate::core::error::{MapResult, NamingError};
use crate::naming::release_name::{ReleaseInfo, version_start};
use crate::naming::version::Version;
use crate::script::model::Map;

/// Name parts requested by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameRequest {
  /// Full identifier used to look up an existing release
  pub release: Option<String>,
  pub prefix: Option<String>,
  pub suffix: Option<String>,
}

impl From<ReleaseInfo> for NameRequest {
  fn from(info: ReleaseInfo) -> Self {
    let mut request = Self {
      release: Some(info.release.to_uppercase()),
      prefix: Some(info.prefix).filter(|p| !p.is_empty()),
      suffix: info.suffix,
    };
    request.sync_release();
    request
  }
}

impl NameRequest {
  /// Build a request from `--release`, `--name` and `--version` values
  ///
  /// `--name` and `--version` override the matching part of `--release`.
  /// `--name` alone asks for a guessed version. With nothing given, guessing
  /// must be allowed or the call fails.
  pub fn from_args(
    release: Option<&str>,
    name: Option<&str>,
    version: Option<&str>,
    guess: bool,
    sink: &mut dyn DiagnosticSink,
  ) -> MapResult<Option<Self>> {
    if let Some(release) = release
      && let Some(info) = ReleaseInfo::parse(release, sink)?
    {
      let mut request = NameRequest::from(info);
      if let Some(word) = name.and_then(first_word) {
        request.prefix = Some(word.to_string());
      }
      if let Some(version) = version {
        request.suffix = Some(Version::parse(version, sink)?.suffix());
      }
      request.sync_release();
      return Ok(Some(request));
    }

    match (name, version) {
      (Some(name), Some(version)) => {
        let version = Version::parse(version, sink)?;
        let combined = format!("{}{}", name, version.suffix());
        Ok(ReleaseInfo::parse(&combined, sink)?.map(NameRequest::from))
      }
      (Some(name), None) => Ok(ReleaseInfo::parse(name, sink)?.map(|info| NameRequest {
        release: None,
        prefix: Some(info.prefix).filter(|p| !p.is_empty()),
        suffix: None,
      })),
      _ if release.is_none() && !guess => Err(NamingError::MissingReleaseName.into()),
      _ => Ok(None),
    }
  }

  /// Prefix and suffix joined, when both are known
  pub fn full_name(&self) -> Option<String> {
    match (&self.prefix, &self.suffix) {
      (Some(prefix), Some(suffix)) => Some(format!("{}{}", prefix.to_uppercase(), suffix)),
      _ => None,
    }
  }

  fn sync_release(&mut self) {
    if let Some(full) = self.full_name() {
      self.release = Some(full);
    }
  }
}

fn first_word(s: &str) -> Option<&str> {
  let start = s.find(|c: char| c.is_alphanumeric() || c == '_')?;
  let rest = &s[start..];
  let end = rest.find(|c: char| !(c.is_alphanumeric() || c == '_')).unwrap_or(rest.len());
  Some(&rest[..end])
}

/// Longest common leading part of the smallest and largest name
fn common_prefix<'a>(names: impl Iterator<Item = &'a str> + Clone) -> Option<String> {
  let low = names.clone().min()?;
  let high = names.max()?;
  Some(
    low
      .chars()
      .zip(high.chars())
      .take_while(|(a, b)| a == b)
      .map(|(a, _)| a)
      .collect(),
  )
}

/// Drop a trailing version-like segment (`_1...` or trailing underscores)
fn strip_version(prefix: &str) -> &str {
  let cut = version_start(prefix).into_iter().chain(trailing_underscores(prefix)).min();
  match cut {
    Some(at) => &prefix[..at],
    None => prefix,
  }
}

fn trailing_underscores(s: &str) -> Option<usize> {
  let trimmed = s.trim_end_matches('_');
  (trimmed.len() < s.len()).then_some(trimmed.len())
}

impl Map {
  /// Name for a new release
  ///
  /// Requires a checked map when any part has to be guessed from the latest
  /// release.
  pub fn guess_name(
    &self,
    request: Option<&NameRequest>,
    abi_break: bool,
    guess: bool,
    sink: &mut dyn DiagnosticSink,
  ) -> MapResult<String> {
    let mut prefix = request.and_then(|r| r.prefix.clone()).filter(|p| !p.is_empty());
    let mut suffix = request.and_then(|r| r.suffix.clone()).filter(|s| !s.is_empty());

    if let (Some(prefix), Some(suffix)) = (&prefix, &suffix) {
      sink.debug("[guess]: Two parts found, using them");
      return Ok(format!("{}{}", prefix.to_uppercase(), suffix));
    }

    if guess {
      if prefix.is_none() {
        sink.debug("[guess]: Trying to find common prefix");
        let common = common_prefix(self.releases().iter().map(|r| r.name.as_str()))
          .map(|p| strip_version(&p).to_string())
          .filter(|p| !p.is_empty());
        prefix = match common {
          Some(common) => {
            sink.debug("[guess]: Common prefix found");
            Some(common)
          }
          None => {
            sink.debug("[guess]: Using prefix from latest");
            self.latest_release(sink)?.map(|info| info.prefix).filter(|p| !p.is_empty())
          }
        };
      }

      if suffix.is_none() {
        sink.debug("[guess]: Guessing new suffix");
        if let Some(latest) = self.latest_release(sink)? {
          sink.debug("[guess]: Bumping release");
          suffix = Some(latest.version.bump(abi_break)?.suffix()).filter(|s| !s.is_empty());
        }
      }
    }

    match (prefix, suffix) {
      (Some(prefix), Some(suffix)) => Ok(format!("{}{}", prefix.to_uppercase(), suffix)),
      _ => Err(NamingError::InsufficientInformation.into()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::diagnostics::Diagnostics;
  use crate::core::error::MapError;

  fn checked(text: &str) -> Map {
    let mut diags = Diagnostics::new();
    let mut map = Map::parse(text, None, &mut diags).unwrap();
    map.check(&mut diags).unwrap();
    map
  }

  const TWO: &str = "LIBFOO_1_0 {\n global:\n  foo;\n local:\n  *;\n};\n\
                     LIBFOO_1_1 {\n global:\n  bar;\n} LIBFOO_1_0;\n";

  #[test]
  fn test_explicit_parts_win() {
    let map = checked(TWO);
    let mut diags = Diagnostics::new();
    let request = NameRequest {
      release: None,
      prefix: Some("libbar".to_string()),
      suffix: Some("_3_0".to_string()),
    };
    assert_eq!(map.guess_name(Some(&request), false, true, &mut diags).unwrap(), "LIBBAR_3_0");
  }

  #[test]
  fn test_guess_compatible_and_breaking() {
    let map = checked(TWO);
    let mut diags = Diagnostics::new();
    assert_eq!(map.guess_name(None, false, true, &mut diags).unwrap(), "LIBFOO_1_2");
    assert_eq!(map.guess_name(None, true, true, &mut diags).unwrap(), "LIBFOO_2_0");
  }

  #[test]
  fn test_prefix_only_request_guesses_version() {
    let map = checked(TWO);
    let mut diags = Diagnostics::new();
    let request = NameRequest {
      release: None,
      prefix: Some("other".to_string()),
      suffix: None,
    };
    assert_eq!(map.guess_name(Some(&request), false, true, &mut diags).unwrap(), "OTHER_1_2");
  }

  #[test]
  fn test_no_common_prefix_uses_latest() {
    let map = checked("ALPHA_1_0 {\n global:\n  a;\n local:\n  *;\n};\nZULU_1_1 {\n global:\n  z;\n} ALPHA_1_0;\n");
    let mut diags = Diagnostics::new();
    assert_eq!(map.guess_name(None, false, true, &mut diags).unwrap(), "ZULU_1_2");
  }

  #[test]
  fn test_guessing_disabled_needs_both_parts() {
    let map = checked(TWO);
    let mut diags = Diagnostics::new();
    let err = map.guess_name(None, false, false, &mut diags).unwrap_err();
    assert!(matches!(err, MapError::Naming(NamingError::InsufficientInformation)));
  }

  #[test]
  fn test_no_version_anywhere_is_insufficient() {
    let map = checked("LIBFOO {\n global:\n  foo;\n local:\n  *;\n};\n");
    let mut diags = Diagnostics::new();
    let err = map.guess_name(None, false, true, &mut diags).unwrap_err();
    assert!(matches!(err, MapError::Naming(NamingError::InsufficientInformation)));
  }

  #[test]
  fn test_strip_version() {
    assert_eq!(strip_version("LIBFOO_1_"), "LIBFOO");
    assert_eq!(strip_version("LIBFOO__"), "LIBFOO");
    assert_eq!(strip_version("LIB_FOO_1"), "LIB_FOO");
    assert_eq!(strip_version("LIBFOO"), "LIBFOO");
  }

  #[test]
  fn test_from_args_release_with_overrides() {
    let mut diags = Diagnostics::new();
    let request = NameRequest::from_args(Some("LIBFOO_1_0"), Some("libbar extra"), Some("2.1"), true, &mut diags)
      .unwrap()
      .unwrap();
    assert_eq!(request.prefix.as_deref(), Some("libbar"));
    assert_eq!(request.suffix.as_deref(), Some("_2_1"));
    assert_eq!(request.release.as_deref(), Some("LIBBAR_2_1"));
  }

  #[test]
  fn test_from_args_name_and_version() {
    let mut diags = Diagnostics::new();
    let request = NameRequest::from_args(None, Some("lib-foo"), Some("1.2.3"), false, &mut diags)
      .unwrap()
      .unwrap();
    assert_eq!(request.full_name().as_deref(), Some("LIB_FOO_1_2_3"));
  }

  #[test]
  fn test_from_args_name_only_is_prefix_request() {
    let mut diags = Diagnostics::new();
    let request = NameRequest::from_args(None, Some("libfoo"), None, true, &mut diags)
      .unwrap()
      .unwrap();
    assert_eq!(request.prefix.as_deref(), Some("LIBFOO"));
    assert!(request.suffix.is_none());
  }

  #[test]
  fn test_from_args_nothing_given() {
    let mut diags = Diagnostics::new();
    assert!(NameRequest::from_args(None, None, None, true, &mut diags).unwrap().is_none());
    let err = NameRequest::from_args(None, None, None, false, &mut diags).unwrap_err();
    assert!(matches!(err, MapError::Naming(NamingError::MissingReleaseName)));
  }
}
