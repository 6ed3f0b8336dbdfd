//! Splitting release identifiers into library prefix and version suffix

use crate::core::diagnostics::DiagnosticSink;
use crate::core::error::MapResult;
use crate::naming::version::Version;

/// Parts of a release identifier such as `LIBFOO_1_2_0`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
  /// The identifier as given (leading blanks removed)
  pub release: String,
  /// Library name, uppercased, `-` turned into `_` (e.g. `LIBFOO`)
  pub prefix: String,
  /// Version part re-rendered as `_N_N_N`, when present
  pub suffix: Option<String>,
  /// Parsed version; three unset slots when the identifier has none
  pub version: Version,
}

impl ReleaseInfo {
  /// Split `input` at the first underscore run followed by a digit
  ///
  /// Returns `None` (after a warning) for empty input or input that has
  /// neither a version nor a single letter.
  pub fn parse(input: &str, sink: &mut dyn DiagnosticSink) -> MapResult<Option<Self>> {
    let release = input.trim_start();
    if release.is_empty() {
      sink.warning("No release provided");
      return Ok(None);
    }

    let (prefix, version) = match version_start(release) {
      Some(at) => (&release[..at], Version::parse(&release[at..], sink)?),
      None if release.chars().any(|c| c.is_ascii_alphabetic()) => (release, Version::unset()),
      None => {
        sink.warning(
          "Release provided is not well formed (a well formed release contain the library identifier and the \
           version information). Suggested: something like LIBNAME_1_2_3",
        );
        return Ok(None);
      }
    };

    let suffix = (!version.is_unset()).then(|| version.suffix());
    Ok(Some(Self {
      release: release.to_string(),
      prefix: normalize_prefix(prefix),
      suffix,
      version,
    }))
  }

  /// Whether both the library name and the version are known
  pub fn is_complete(&self) -> bool {
    !self.prefix.is_empty() && self.suffix.is_some()
  }
}

/// Byte offset of the first `_+[0-9]` sequence
pub(crate) fn version_start(s: &str) -> Option<usize> {
  let bytes = s.as_bytes();
  (0..bytes.len()).find(|&i| {
    if bytes[i] != b'_' {
      return false;
    }
    let run = bytes[i..].iter().take_while(|b| **b == b'_').count();
    bytes.get(i + run).is_some_and(u8::is_ascii_digit)
  })
}

fn normalize_prefix(prefix: &str) -> String {
  prefix.trim_end_matches('_').replace('-', "_").to_uppercase()
}
