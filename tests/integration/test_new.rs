//! Integration tests for `abimap new`

use crate::helpers::{TestDir, run_abimap, run_abimap_with_input, stderr, stdout};
use anyhow::Result;

#[test]
fn test_new_with_release_name() -> Result<()> {
  let dir = TestDir::new()?;

  run_abimap(&dir.path, &["new", "-r", "LIBBAR_1_0", "-o", "new.map"], "b\na\n\n")?;

  let map = dir.read_file("new.map")?;
  assert!(map.starts_with("# This map file was created with abimap-"));
  assert!(map.ends_with("LIBBAR_1_0\n{\n    global:\n        a;\n        b;\n    local:\n        *;\n} ;\n\n"));
  Ok(())
}

#[test]
fn test_new_final_release_to_stdout() -> Result<()> {
  let dir = TestDir::new()?;

  let output = run_abimap(&dir.path, &["new", "-n", "libbar", "-v", "2.1", "--final"], "x\n")?;
  assert!(stdout(&output).contains("LIBBAR_2_1    # Released\n{\n    global:\n        x;\n"));
  Ok(())
}

#[test]
fn test_new_needs_a_release_name() -> Result<()> {
  let dir = TestDir::new()?;

  let output = run_abimap_with_input(&dir.path, &["new", "-o", "new.map"], "x\n")?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("It is necessary to provide either release name or name and version"));
  assert!(!dir.file_exists("new.map"));
  Ok(())
}

#[test]
fn test_new_uses_configured_library_name() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("abimap.toml", "[release]\nname = \"libbaz\"\n")?;

  run_abimap(&dir.path, &["new", "-v", "3.0", "-o", "new.map"], "x\n")?;

  assert!(dir.read_file("new.map")?.contains("LIBBAZ_3_0\n{"));
  Ok(())
}

#[test]
fn test_new_rejects_invalid_config() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("abimap.toml", "[release\n")?;

  let output = run_abimap_with_input(&dir.path, &["new", "-r", "A_1"], "x\n")?;
  assert!(!output.status.success());
  Ok(())
}
