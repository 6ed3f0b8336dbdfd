//! Leveled diagnostic events
//!
//! The core never prints. Every operation that can report something takes a
//! `&mut dyn DiagnosticSink` and pushes `Diagnostic` values into it; what
//! happens to them (collected, logged, written as JSON) is up to the caller.

use serde::Serialize;
use std::fmt;

/// Severity of a diagnostic event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  Debug,
  Info,
  Warning,
  Error,
}

impl fmt::Display for Level {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Level::Debug => write!(f, "DEBUG"),
      Level::Info => write!(f, "INFO"),
      Level::Warning => write!(f, "WARNING"),
      Level::Error => write!(f, "ERROR"),
    }
  }
}

/// Zero-based location inside the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
  pub line: usize,
  pub column: usize,
}

impl Position {
  pub fn new(line: usize, column: usize) -> Self {
    Self { line, column }
  }
}

/// A single diagnostic event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
  pub level: Level,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub position: Option<Position>,
  /// Snapshot of the source line the position points into
  #[serde(skip_serializing_if = "Option::is_none")]
  pub context: Option<String>,
}

impl Diagnostic {
  pub fn new(level: Level, message: impl Into<String>) -> Self {
    Self {
      level,
      message: message.into(),
      position: None,
      context: None,
    }
  }

  /// Attach a source position and the line it points into
  pub fn at(mut self, position: Position, context: impl Into<String>) -> Self {
    self.position = Some(position);
    self.context = Some(context.into());
    self
  }
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match (&self.position, &self.context) {
      (Some(pos), Some(context)) => {
        write!(f, "line {}, column {}: {}", pos.line + 1, pos.column, self.message)?;
        write_caret(f, context, pos.column)
      }
      _ => write!(f, "{}", self.message),
    }
  }
}

/// Write the source line followed by a caret under `column`
pub(crate) fn write_caret(f: &mut fmt::Formatter<'_>, context: &str, column: usize) -> fmt::Result {
  let line = context.trim_end_matches(['\n', '\r']);
  write!(f, "\n{}\n{:>width$}", line, "^", width = column.max(1))
}

/// Consumer of diagnostic events
pub trait DiagnosticSink {
  fn emit(&mut self, diagnostic: Diagnostic);
}

impl dyn DiagnosticSink + '_ {
  pub fn debug(&mut self, message: impl Into<String>) {
    self.emit(Diagnostic::new(Level::Debug, message));
  }

  pub fn info(&mut self, message: impl Into<String>) {
    self.emit(Diagnostic::new(Level::Info, message));
  }

  pub fn warning(&mut self, message: impl Into<String>) {
    self.emit(Diagnostic::new(Level::Warning, message));
  }

  pub fn error(&mut self, message: impl Into<String>) {
    self.emit(Diagnostic::new(Level::Error, message));
  }
}

/// Sink that keeps every event in memory
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
  events: Vec<Diagnostic>,
}

impl Diagnostics {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
    self.events.iter()
  }

  pub fn len(&self) -> usize {
    self.events.len()
  }

  pub fn is_empty(&self) -> bool {
    self.events.is_empty()
  }

  /// Messages emitted at exactly `level`, in emission order
  pub fn messages(&self, level: Level) -> Vec<&str> {
    self
      .events
      .iter()
      .filter(|d| d.level == level)
      .map(|d| d.message.as_str())
      .collect()
  }

  /// Whether any event at `level` contains `needle`
  pub fn contains(&self, level: Level, needle: &str) -> bool {
    self.events.iter().any(|d| d.level == level && d.message.contains(needle))
  }

  /// Number of events at `level` or above
  pub fn count_at_least(&self, level: Level) -> usize {
    self.events.iter().filter(|d| d.level >= level).count()
  }

  pub fn into_vec(self) -> Vec<Diagnostic> {
    self.events
  }
}

impl DiagnosticSink for Diagnostics {
  fn emit(&mut self, diagnostic: Diagnostic) {
    self.events.push(diagnostic);
  }
}

/// Sink that forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
  fn emit(&mut self, diagnostic: Diagnostic) {
    match diagnostic.level {
      Level::Debug => tracing::debug!("{}", diagnostic),
      Level::Info => tracing::info!("{}", diagnostic),
      Level::Warning => tracing::warn!("{}", diagnostic),
      Level::Error => tracing::error!("{}", diagnostic),
    }
  }
}
