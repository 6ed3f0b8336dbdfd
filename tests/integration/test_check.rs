//! Integration tests for `abimap check`

use crate::helpers::{LIBFOO_1_0, TestDir, run_abimap, run_abimap_with_input, stderr, stdout};
use anyhow::Result;

#[test]
fn test_check_valid_map() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("lib.map", LIBFOO_1_0)?;

  run_abimap(&dir.path, &["check", "lib.map"], "")?;
  Ok(())
}

#[test]
fn test_check_json_report() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file(
    "lib.map",
    "LIBFOO_1_0 {\n    global:\n        foo;\n    local:\n        *;\n};\n\nLIBFOO_1_1 {\n    global:\n        bar;\n} LIBFOO_1_0;\n",
  )?;

  let output = run_abimap(&dir.path, &["check", "lib.map", "--json"], "")?;
  let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("Should be valid JSON");

  assert_eq!(json["releases"], 2);
  assert_eq!(json["warnings"], 0);
  assert!(json["file"].as_str().unwrap().ends_with("lib.map"));
  Ok(())
}

#[test]
fn test_check_detects_cycle() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file(
    "lib.map",
    "A_1 {\n    global:\n        a;\n} A_2;\n\nA_2 {\n    global:\n        b;\n} A_1;\n",
  )?;

  let output = run_abimap_with_input(&dir.path, &["check", "lib.map"], "")?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).to_lowercase().contains("circular"));
  Ok(())
}

#[test]
fn test_check_reports_syntax_error() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("lib.map", "LIBFOO_1_0 {\n    global:\n        foo;\n")?;

  let output = run_abimap_with_input(&dir.path, &["check", "lib.map"], "")?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("Unexpected end of input while parsing release 'LIBFOO_1_0'"));
  Ok(())
}

#[test]
fn test_check_empty_map() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("lib.map", "# nothing here\n")?;

  let output = run_abimap_with_input(&dir.path, &["check", "lib.map"], "")?;
  assert_eq!(output.status.code(), Some(3));
  Ok(())
}
