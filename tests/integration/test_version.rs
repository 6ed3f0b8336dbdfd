//! Integration tests for `abimap version`

use crate::helpers::{TestDir, run_abimap, stdout};
use anyhow::Result;

#[test]
fn test_version_prints_name_and_version() -> Result<()> {
  let dir = TestDir::new()?;

  let output = run_abimap(&dir.path, &["version"], "")?;
  assert_eq!(stdout(&output), format!("abimap-{}\n", env!("CARGO_PKG_VERSION")));
  Ok(())
}

#[test]
fn test_version_honors_configured_program_name() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("abimap.toml", "[output]\nprogram = \"mapper\"\n")?;

  let output = run_abimap(&dir.path, &["version"], "")?;
  assert!(stdout(&output).starts_with("mapper-"));
  Ok(())
}
