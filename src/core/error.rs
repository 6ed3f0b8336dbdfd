//! Error types for abimap with contextual messages and exit codes
//!
//! Every fatal condition of the pipeline is a `MapError`. Errors are grouped by
//! the stage that raises them (syntax, structure, lineage, naming, policy) so
//! the front end can pick an exit code and print a hint without inspecting
//! message text.

use std::fmt;
use std::io;

use crate::script::parser::ParserError;

/// Exit codes for abimap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (bad arguments, missing release name, config)
  User = 1,
  /// System error (I/O)
  System = 2,
  /// Validation failure (syntax, lineage, ABI policy)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for abimap
#[derive(Debug)]
pub enum MapError {
  /// Version script syntax errors
  Syntax(ParserError),

  /// Map structure errors (empty map, unchecked map)
  Structure(StructureError),

  /// Release lineage errors (cycles, dangling or ambiguous references)
  Lineage(LineageError),

  /// Release naming errors
  Naming(NamingError),

  /// ABI policy violations
  Policy(PolicyError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl MapError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    MapError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    MapError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  ///
  /// Only free-form and I/O errors carry context; typed errors already name
  /// what failed and pass through unchanged so callers can match on them.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      MapError::Message { message, context, help } => MapError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      MapError::Io(err) => MapError::Message {
        message: format!("I/O error: {}", err),
        context: Some(ctx_str),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      MapError::Syntax(_) => ExitCode::Validation,
      MapError::Structure(_) => ExitCode::Validation,
      MapError::Lineage(_) => ExitCode::Validation,
      MapError::Policy(_) => ExitCode::Validation,
      MapError::Naming(_) => ExitCode::User,
      MapError::Io(_) => ExitCode::System,
      MapError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      MapError::Structure(e) => e.help_message(),
      MapError::Lineage(e) => e.help_message(),
      MapError::Naming(e) => e.help_message(),
      MapError::Policy(e) => e.help_message(),
      MapError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for MapError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      MapError::Syntax(e) => write!(f, "{}", e),
      MapError::Structure(e) => write!(f, "{}", e),
      MapError::Lineage(e) => write!(f, "{}", e),
      MapError::Naming(e) => write!(f, "{}", e),
      MapError::Policy(e) => write!(f, "{}", e),
      MapError::Io(e) => write!(f, "I/O error: {}", e),
      MapError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for MapError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      MapError::Io(e) => Some(e),
      MapError::Syntax(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for MapError {
  fn from(err: io::Error) -> Self {
    MapError::Io(err)
  }
}

impl From<String> for MapError {
  fn from(msg: String) -> Self {
    MapError::message(msg)
  }
}

impl From<&str> for MapError {
  fn from(msg: &str) -> Self {
    MapError::message(msg)
  }
}

impl From<ParserError> for MapError {
  fn from(err: ParserError) -> Self {
    MapError::Syntax(err)
  }
}

impl From<StructureError> for MapError {
  fn from(err: StructureError) -> Self {
    MapError::Structure(err)
  }
}

impl From<LineageError> for MapError {
  fn from(err: LineageError) -> Self {
    MapError::Lineage(err)
  }
}

impl From<NamingError> for MapError {
  fn from(err: NamingError) -> Self {
    MapError::Naming(err)
  }
}

impl From<PolicyError> for MapError {
  fn from(err: PolicyError) -> Self {
    MapError::Policy(err)
  }
}

impl From<toml_edit::de::Error> for MapError {
  fn from(err: toml_edit::de::Error) -> Self {
    MapError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for MapError {
  fn from(err: serde_json::Error) -> Self {
    MapError::message(format!("JSON error: {}", err))
  }
}

/// Map structure errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
  /// The map has no releases
  EmptyMap,

  /// A lineage query ran before `Map::check()`
  NotChecked,
}

impl StructureError {
  fn help_message(&self) -> Option<String> {
    match self {
      StructureError::EmptyMap => Some("A version script needs at least one release block.".to_string()),
      StructureError::NotChecked => Some("Call Map::check() before querying the release lineage.".to_string()),
    }
  }
}

impl fmt::Display for StructureError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StructureError::EmptyMap => write!(f, "Empty map"),
      StructureError::NotChecked => write!(f, "Map not checked, run check()"),
    }
  }
}

/// Release lineage errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineageError {
  /// A release is its own ancestor
  CircularDependency { chain: Vec<String> },

  /// A release names a predecessor that does not exist
  DanglingReference { name: String },

  /// More than one release carries the referenced name
  AmbiguousRelease { name: String },

  /// The requested release is not part of any chain
  UnknownRelease { name: String },
}

impl LineageError {
  fn help_message(&self) -> Option<String> {
    match self {
      LineageError::CircularDependency { .. } => {
        Some("Each release must extend an older release; break the loop by fixing one predecessor.".to_string())
      }
      LineageError::DanglingReference { name } => Some(format!(
        "Add a release named '{}' or fix the predecessor name after the closing brace.",
        name
      )),
      LineageError::AmbiguousRelease { name } => Some(format!("Rename or remove the duplicated release '{}'.", name)),
      LineageError::UnknownRelease { .. } => None,
    }
  }
}

impl fmt::Display for LineageError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LineageError::CircularDependency { chain } => {
        write!(f, "Circular dependency detected!\n    {}", chain.join("->"))
      }
      LineageError::DanglingReference { name } => write!(f, "Release '{}' not found", name),
      LineageError::AmbiguousRelease { name } => write!(f, "defined more than 1 release '{}'", name),
      LineageError::UnknownRelease { name } => write!(f, "Release '{}' is not part of any dependency chain", name),
    }
  }
}

/// Release naming errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
  /// Not enough information to build the new release name
  InsufficientInformation,

  /// A version string without any digits
  MalformedVersion { input: String },

  /// Neither a release name nor a library name and version were given
  MissingReleaseName,

  /// A version part does not fit in 64 bits, or bumping it would overflow
  VersionOverflow { version: String },
}

impl NamingError {
  fn help_message(&self) -> Option<String> {
    match self {
      NamingError::InsufficientInformation => Some("Pass the full name with --release (e.g. LIBX_1_0_0).".to_string()),
      NamingError::MalformedVersion { .. } => Some("Use digits separated by '.' or '_' (e.g. 1.2.3).".to_string()),
      NamingError::MissingReleaseName => {
        Some("Use --release LIBX_1_0_0, or --name libx together with --version 1.0.0.".to_string())
      }
      NamingError::VersionOverflow { .. } => Some("Pass the new release name explicitly with --release.".to_string()),
    }
  }
}

impl fmt::Display for NamingError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NamingError::InsufficientInformation => write!(
        f,
        "Insufficient information to guess the new release name. Releases found do not have version \
         information or a valid library name. Please provide the complete name of the release."
      ),
      NamingError::MalformedVersion { input } => write!(
        f,
        "Could not get version parts from '{}'. Provide digits separated by non-alphanumeric characters. \
         (e.g. 0_1_2 or 0.1.2)",
        input
      ),
      NamingError::MissingReleaseName => {
        write!(f, "It is necessary to provide either release name or name and version")
      }
      NamingError::VersionOverflow { version } => write!(f, "Version number out of range in '{}'", version),
    }
  }
}

/// ABI policy violations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
  /// Symbols would be removed without permission to break the ABI
  AbiBreakDetected { removed: Vec<String> },

  /// A release marked as released was about to change
  ReleasedReleaseModification { name: String },
}

impl PolicyError {
  fn help_message(&self) -> Option<String> {
    match self {
      PolicyError::AbiBreakDetected { .. } => {
        Some("Pass --allow-abi-break to merge every release into a new base release.".to_string())
      }
      PolicyError::ReleasedReleaseModification { .. } => {
        Some("Add the symbols to a new release instead (omit --release or pick a new name).".to_string())
      }
    }
  }
}

impl fmt::Display for PolicyError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PolicyError::AbiBreakDetected { removed } => {
        write!(f, "ABI break detected: symbols would be removed")?;
        if !removed.is_empty() {
          write!(f, " ({})", removed.join(", "))?;
        }
        Ok(())
      }
      PolicyError::ReleasedReleaseModification { name } => {
        write!(f, "Released releases cannot be modified ('{}'). Abort.", name)
      }
    }
  }
}

/// Result type alias for abimap
pub type MapResult<T> = Result<T, MapError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> MapResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> MapResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<MapError>,
{
  fn context(self, ctx: impl Into<String>) -> MapResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> MapResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &MapError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_exit_codes_by_category() {
    assert_eq!(MapError::from(StructureError::EmptyMap).exit_code(), ExitCode::Validation);
    assert_eq!(MapError::from(NamingError::MissingReleaseName).exit_code(), ExitCode::User);
    let io = io::Error::new(io::ErrorKind::NotFound, "gone");
    assert_eq!(MapError::from(io).exit_code(), ExitCode::System);
    assert_eq!(ExitCode::Validation.as_i32(), 3);
  }

  #[test]
  fn test_circular_dependency_message_lists_chain() {
    let err = LineageError::CircularDependency {
      chain: vec!["A".to_string(), "B".to_string(), "A".to_string()],
    };
    assert!(err.to_string().contains("A->B->A"));
  }

  #[test]
  fn test_context_follows_message() {
    let err: MapResult<()> = Err(MapError::message("boom"));
    let err = err.context("while reading x.map").unwrap_err();
    assert_eq!(err.to_string(), "boom\nwhile reading x.map");
  }

  #[test]
  fn test_context_keeps_typed_errors() {
    let err: MapResult<()> = Err(LineageError::DanglingReference { name: "A_1".to_string() }.into());
    let err = err.with_context(|| "while checking x.map".to_string()).unwrap_err();
    assert!(matches!(err, MapError::Lineage(LineageError::DanglingReference { .. })));
    assert_eq!(err.exit_code(), ExitCode::Validation);
  }

  #[test]
  fn test_help_for_abi_break() {
    let err = MapError::from(PolicyError::AbiBreakDetected {
      removed: vec!["foo".to_string()],
    });
    assert!(err.help_message().unwrap().contains("--allow-abi-break"));
    assert!(err.to_string().starts_with("ABI break detected"));
  }
}
