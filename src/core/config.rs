use crate::core::error::{MapError, MapResult, ResultExt};
use crate::core::logging::Verbosity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for abimap
/// Searched in order: abimap.toml, .abimap.toml, .config/abimap.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbimapConfig {
  #[serde(default)]
  pub release: ReleaseDefaults,
  #[serde(default)]
  pub output: OutputConfig,
  #[serde(default)]
  pub log: LogConfig,
}

/// Defaults used when naming new releases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseDefaults {
  /// Library name used as release prefix (e.g. "libfoo")
  #[serde(default)]
  pub name: Option<String>,

  /// Guess missing name parts from the existing releases (default: true)
  #[serde(default = "default_guess")]
  pub guess: bool,
}

fn default_guess() -> bool {
  true
}

impl Default for ReleaseDefaults {
  fn default() -> Self {
    Self {
      name: None,
      guess: default_guess(),
    }
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
  /// Program name written in generated file headers (default: "abimap")
  #[serde(default)]
  pub program: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
  #[serde(default)]
  pub verbosity: Option<Verbosity>,
  #[serde(default)]
  pub logfile: Option<PathBuf>,
}

impl ReleaseDefaults {
  pub fn validate(&self) -> MapResult<()> {
    if let Some(ref name) = self.name
      && !name.chars().any(|c| c.is_alphanumeric() || c == '_')
    {
      return Err(MapError::with_help(
        format!("Invalid library name '{}'", name),
        "release.name must contain at least one letter, digit or underscore",
      ));
    }
    Ok(())
  }
}

impl AbimapConfig {
  /// Find config file in search order: abimap.toml, .abimap.toml, .config/abimap.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("abimap.toml"),
      path.join(".abimap.toml"),
      path.join(".config").join("abimap.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config if one exists; defaults otherwise
  pub fn load(path: &Path) -> MapResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    Self::from_toml(&content).with_context(|| format!("Invalid configuration in {}", config_path.display()))
  }

  pub fn from_toml(content: &str) -> MapResult<Self> {
    let config: AbimapConfig = toml_edit::de::from_str(content)?;
    config.release.validate()?;
    Ok(config)
  }

  /// Program name for headers and the version command
  pub fn program(&self) -> &str {
    self.output.program.as_deref().unwrap_or("abimap")
  }
}
