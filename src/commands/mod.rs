//! Command bodies for the abimap front end
//!
//! - **update**: apply a new symbol list to an existing map
//! - **new**: create a map from a symbol list
//! - **check**: validate a map
//! - **version**: print the program name and version
//!
//! Commands report through `TracingSink`; `main` decides where that ends up.

pub mod check;
pub mod files;
pub mod new;
pub mod update;
pub mod version;

pub use check::run_check;
pub use new::run_new;
pub use update::run_update;
pub use version::run_version;

use crate::core::config::AbimapConfig;
use crate::core::diagnostics::DiagnosticSink;
use crate::core::error::MapResult;
use crate::naming::guess::NameRequest;
use clap::Args;
use std::path::PathBuf;

/// Version of this build
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Settings every command shares, command-line flags merged over abimap.toml
#[derive(Debug, Clone)]
pub struct CommandContext {
  pub program: String,
  /// Library name used when `--name` is not given
  pub default_name: Option<String>,
  pub guess: bool,
}

impl CommandContext {
  pub fn from_config(config: &AbimapConfig) -> Self {
    Self {
      program: config.program().to_string(),
      default_name: config.release.name.clone(),
      guess: config.release.guess,
    }
  }

  /// `PROGRAM-VERSION`, as written in headers
  pub fn name_version(&self) -> String {
    format!("{}-{}", self.program, VERSION)
  }
}

/// Output and input file options
#[derive(Debug, Clone, Default, Args)]
pub struct FileArgs {
  /// Output file (defaults to stdout)
  #[arg(short, long)]
  pub out: Option<PathBuf>,

  /// Read symbols from this file instead of stdin
  #[arg(short = 'i', long = "in", value_name = "FILE")]
  pub input: Option<PathBuf>,

  /// Do everything, but do not modify the files
  #[arg(short, long)]
  pub dry: bool,
}

/// Options naming the release to create or modify
#[derive(Debug, Clone, Default, Args)]
pub struct NameArgs {
  /// The name of the library (e.g. libx)
  #[arg(short, long)]
  pub name: Option<String>,

  /// The release version (e.g. 1_0_0 or 1.0.0)
  #[arg(short, long)]
  pub version: Option<String>,

  /// The full name of the release to be used (e.g. LIBX_1_0_0)
  #[arg(short, long)]
  pub release: Option<String>,

  /// Disable next release name guessing
  #[arg(long, alias = "no_guess")]
  pub no_guess: bool,
}

impl NameArgs {
  /// Name request from the flags; the configured library name fills in `--name`
  pub fn request(
    &self,
    ctx: &CommandContext,
    guess: bool,
    sink: &mut dyn DiagnosticSink,
  ) -> MapResult<Option<NameRequest>> {
    let name = self.name.as_deref().or(ctx.default_name.as_deref());
    NameRequest::from_args(self.release.as_deref(), name, self.version.as_deref(), guess, sink)
  }

  /// Guessing is on unless disabled by flag or configuration
  pub fn guess(&self, ctx: &CommandContext) -> bool {
    ctx.guess && !self.no_guess
  }
}
