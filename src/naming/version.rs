//! Release version numbers (CUR, AGE, REV)
//!
//! A version is a short list of slots. Parsed versions have one slot per digit
//! run found; versions taken from a release without version information have
//! three empty slots. Bumping keeps the slot count, so `LIBX_1_0` becomes
//! `LIBX_1_1` and never grows a revision.

use crate::core::diagnostics::DiagnosticSink;
use crate::core::error::{MapResult, NamingError};

/// Most slots a version keeps
pub const MAX_PARTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
  slots: Vec<Option<u64>>,
}

impl Version {
  pub fn new(slots: Vec<Option<u64>>) -> Self {
    Self { slots }
  }

  pub fn from_numbers(numbers: &[u64]) -> Self {
    Self {
      slots: numbers.iter().copied().map(Some).collect(),
    }
  }

  /// Three unset slots
  pub fn unset() -> Self {
    Self {
      slots: vec![None; MAX_PARTS],
    }
  }

  /// Collect the digit runs of `input`
  ///
  /// Anything that is not a digit separates parts (`1.2.3`, `1_2`, `v1-2`).
  pub fn parse(input: &str, sink: &mut dyn DiagnosticSink) -> MapResult<Self> {
    let mut numbers = Vec::new();
    let mut run = String::new();
    for c in input.chars().chain(std::iter::once(' ')) {
      if c.is_ascii_digit() {
        run.push(c);
      } else if !run.is_empty() {
        // Only digits here, so the parse can only fail on overflow
        let value = run.parse::<u64>().map_err(|_| NamingError::VersionOverflow {
          version: input.to_string(),
        })?;
        numbers.push(value);
        run.clear();
      }
    }

    if numbers.is_empty() {
      return Err(
        NamingError::MalformedVersion {
          input: input.to_string(),
        }
        .into(),
      );
    }
    if numbers.len() < 2 {
      sink.warning("Provide at least a major and a minor version digit (eg. '1.2.3' or '1_2')");
    }
    if numbers.len() > MAX_PARTS {
      sink.warning("Version has too many parts; provide 3 or less ( e.g. '0.1.2')");
      numbers.truncate(MAX_PARTS);
    }

    Ok(Self::from_numbers(&numbers))
  }

  pub fn slots(&self) -> &[Option<u64>] {
    &self.slots
  }

  fn slot(&self, index: usize) -> Option<u64> {
    self.slots.get(index).copied().flatten()
  }

  pub fn cur(&self) -> Option<u64> {
    self.slot(0)
  }

  pub fn age(&self) -> Option<u64> {
    self.slot(1)
  }

  pub fn rev(&self) -> Option<u64> {
    self.slot(2)
  }

  /// Whether no slot carries a number
  pub fn is_unset(&self) -> bool {
    self.slots.iter().all(Option::is_none)
  }

  /// Next version after a compatible or an incompatible change
  ///
  /// ABI break: CUR + 1, every later slot zero.
  /// Otherwise: CUR kept, AGE + 1, every later slot zero.
  pub fn bump(&self, abi_break: bool) -> MapResult<Self> {
    let mut next = Vec::with_capacity(self.slots.len());
    let keep = if abi_break {
      if let Some(cur) = self.cur() {
        next.push(Some(self.increment(cur)?));
      }
      1
    } else {
      if let Some(cur) = self.cur() {
        next.push(Some(cur));
      }
      if let Some(age) = self.age() {
        next.push(Some(self.increment(age)?));
      }
      2
    };
    let zeros = self.slots.len().saturating_sub(keep);
    next.extend(std::iter::repeat_n(Some(0), zeros));
    Ok(Self { slots: next })
  }

  fn increment(&self, part: u64) -> MapResult<u64> {
    part.checked_add(1).ok_or_else(|| {
      NamingError::VersionOverflow {
        version: self.suffix(),
      }
      .into()
    })
  }

  /// Release name suffix, e.g. `_1_2_0`
  pub fn suffix(&self) -> String {
    self.slots.iter().flatten().map(|n| format!("_{}", n)).collect()
  }
}
