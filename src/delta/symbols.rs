//! Symbol input cleaning and the added/removed computation

use crate::core::diagnostics::DiagnosticSink;
use std::collections::BTreeSet;

/// How the supplied symbols relate to the existing ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
  /// The supplied list is the complete new set of exported symbols
  #[default]
  Compare,
  /// The supplied symbols are new exports
  Add,
  /// The supplied symbols must stop being exported
  Remove,
}

impl Strategy {
  pub fn from_flags(add: bool, remove: bool) -> Self {
    match (add, remove) {
      (true, _) => Strategy::Add,
      (false, true) => Strategy::Remove,
      (false, false) => Strategy::Compare,
    }
  }
}

/// Split raw lines into symbol names
///
/// Anything that is not a letter, digit or underscore separates names. Names
/// given more than once are reported but kept.
pub fn clean_symbols<I, S>(lines: I, sink: &mut dyn DiagnosticSink) -> Vec<String>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  let mut clean = Vec::new();
  for line in lines {
    clean.extend(
      line
        .as_ref()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .map(str::to_string),
    );
  }

  let mut seen = BTreeSet::new();
  let duplicates: BTreeSet<&str> = clean.iter().map(String::as_str).filter(|s| !seen.insert(*s)).collect();
  if !duplicates.is_empty() {
    let list: Vec<&str> = duplicates.into_iter().collect();
    sink.warning(format!("Duplicated symbols provided: {}", list.join(", ")));
  }

  clean
}

/// Symbols a change adds and removes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolDelta {
  pub added: BTreeSet<String>,
  pub removed: BTreeSet<String>,
}

impl SymbolDelta {
  /// Compare the supplied symbols with the existing global symbols
  pub fn compute(
    existing: &BTreeSet<String>,
    supplied: &[String],
    strategy: Strategy,
    sink: &mut dyn DiagnosticSink,
  ) -> Self {
    let supplied: BTreeSet<String> = supplied.iter().cloned().collect();
    let mut delta = SymbolDelta::default();

    match strategy {
      Strategy::Add => {
        for symbol in supplied.intersection(existing) {
          sink.warning(format!(
            "The symbol '{}' is already present in a previous version. Keep the previous implementation to not \
             break ABI.",
            symbol
          ));
        }
        delta.added = supplied;
      }
      Strategy::Remove => {
        for symbol in supplied {
          if existing.contains(&symbol) {
            delta.removed.insert(symbol);
          } else {
            sink.warning(format!("Requested to remove '{}', but not found.", symbol));
          }
        }
      }
      Strategy::Compare => {
        delta.added = supplied.difference(existing).cloned().collect();
        delta.removed = existing.difference(&supplied).cloned().collect();
      }
    }

    delta
  }

  pub fn is_empty(&self) -> bool {
    self.added.is_empty() && self.removed.is_empty()
  }

  /// Removing an exported symbol breaks the ABI
  pub fn breaks_abi(&self) -> bool {
    !self.removed.is_empty()
  }
}
