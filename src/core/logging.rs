//! Log output for the command-line front end
//!
//! Diagnostics reach the user through `tracing`. The console only ever shows
//! warnings and errors; a log file, when requested, receives everything up to
//! the selected verbosity.

use crate::core::error::{MapResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

/// How much the program reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
  Quiet,
  Error,
  #[default]
  Warning,
  Info,
  Debug,
}

impl Verbosity {
  pub fn level_filter(self) -> LevelFilter {
    match self {
      Verbosity::Quiet => LevelFilter::OFF,
      Verbosity::Error => LevelFilter::ERROR,
      Verbosity::Warning => LevelFilter::WARN,
      Verbosity::Info => LevelFilter::INFO,
      Verbosity::Debug => LevelFilter::DEBUG,
    }
  }

  /// Console filter: never chattier than warnings
  pub fn console_filter(self) -> LevelFilter {
    self.level_filter().min(LevelFilter::WARN)
  }
}

/// Install the global subscriber
///
/// Calling this twice is harmless: the second install fails silently and the
/// first configuration stays in effect.
pub fn init(verbosity: Verbosity, logfile: Option<&Path>) -> MapResult<()> {
  let console = fmt::layer()
    .with_writer(std::io::stderr)
    .without_time()
    .with_target(false)
    .with_filter(verbosity.console_filter());

  let file = match logfile {
    Some(path) => {
      let handle = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
      Some(
        fmt::layer()
          .with_writer(Mutex::new(handle))
          .with_ansi(false)
          .with_target(false)
          .with_filter(verbosity.level_filter()),
      )
    }
    None => None,
  };

  let _ = tracing_subscriber::registry().with(console).with(file).try_init();
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_console_never_exceeds_warnings() {
    assert_eq!(Verbosity::Debug.console_filter(), LevelFilter::WARN);
    assert_eq!(Verbosity::Info.console_filter(), LevelFilter::WARN);
    assert_eq!(Verbosity::Error.console_filter(), LevelFilter::ERROR);
    assert_eq!(Verbosity::Quiet.console_filter(), LevelFilter::OFF);
  }

  #[test]
  fn test_default_is_warning() {
    assert_eq!(Verbosity::default(), Verbosity::Warning);
    assert_eq!(Verbosity::default().level_filter(), LevelFilter::WARN);
  }
}
