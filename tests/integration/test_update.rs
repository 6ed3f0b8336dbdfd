//! Integration tests for `abimap update`

use crate::helpers::{LIBFOO_1_0, TestDir, run_abimap, run_abimap_with_input, stderr, stdout};
use anyhow::Result;

#[test]
fn test_update_adds_new_release() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("lib.map", LIBFOO_1_0)?;

  let output = run_abimap(&dir.path, &["update", "lib.map", "-o", "out.map"], "foo\nbar\n")?;
  assert!(stdout(&output).contains("Added:\n    bar\n"));

  let map = dir.read_file("out.map")?;
  assert!(map.starts_with(&format!(
    "# This map file was updated with abimap-{}\n\n",
    env!("CARGO_PKG_VERSION")
  )));
  assert!(map.contains("LIBFOO_1_1\n{\n    global:\n        bar;\n} LIBFOO_1_0;\n"));

  // The old release comes first
  let base = map.find("LIBFOO_1_0\n").unwrap();
  let added = map.find("LIBFOO_1_1\n").unwrap();
  assert!(base < added);

  Ok(())
}

#[test]
fn test_update_reads_symbols_from_file() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("lib.map", LIBFOO_1_0)?;
  dir.write_file("symbols.txt", "foo\nbaz\n")?;

  run_abimap(
    &dir.path,
    &["update", "lib.map", "-i", "symbols.txt", "-o", "out.map"],
    "",
  )?;

  let map = dir.read_file("out.map")?;
  assert!(map.contains("        baz;\n} LIBFOO_1_0;"));
  Ok(())
}

#[test]
fn test_update_without_changes_does_nothing() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("lib.map", LIBFOO_1_0)?;

  let output = run_abimap(&dir.path, &["update", "lib.map", "-o", "out.map"], "foo\n")?;
  assert!(stdout(&output).contains("No symbols added or removed. Nothing done."));
  assert!(!dir.file_exists("out.map"));
  Ok(())
}

#[test]
fn test_update_refuses_abi_break() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("lib.map", LIBFOO_1_0)?;

  let output = run_abimap_with_input(&dir.path, &["update", "lib.map", "-o", "out.map"], "bar\n")?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stdout(&output).contains("Removed:\n    foo\n"));
  assert!(stderr(&output).contains("ABI break detected"));
  assert!(!dir.file_exists("out.map"));
  Ok(())
}

#[test]
fn test_update_allowed_abi_break_merges_releases() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("lib.map", LIBFOO_1_0)?;

  let output = run_abimap(
    &dir.path,
    &["update", "lib.map", "--allow-abi-break", "-o", "out.map"],
    "bar\n",
  )?;
  assert!(stdout(&output).contains("Merging all symbols in a single new release"));

  let map = dir.read_file("out.map")?;
  assert!(map.contains("LIBFOO_2_0\n{\n    global:\n        bar;\n    local:\n        *;\n} ;\n"));
  assert!(!map.contains("LIBFOO_1_0"));
  assert!(!map.contains("foo;"));
  Ok(())
}

#[test]
fn test_update_add_strategy_keeps_missing_symbols() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("lib.map", LIBFOO_1_0)?;

  run_abimap(&dir.path, &["update", "lib.map", "--add", "-o", "out.map"], "bar\n")?;

  let map = dir.read_file("out.map")?;
  assert!(map.contains("        foo;\n"));
  assert!(map.contains("LIBFOO_1_1\n{\n    global:\n        bar;\n} LIBFOO_1_0;\n"));
  Ok(())
}

#[test]
fn test_update_add_and_remove_conflict() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("lib.map", LIBFOO_1_0)?;

  let output = run_abimap_with_input(&dir.path, &["update", "lib.map", "--add", "--remove"], "bar\n")?;
  assert!(!output.status.success());
  Ok(())
}

#[test]
fn test_update_dry_run_writes_nothing() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("lib.map", LIBFOO_1_0)?;

  let output = run_abimap(
    &dir.path,
    &["update", "lib.map", "--dry", "-o", "lib.map"],
    "foo\nbar\n",
  )?;
  assert!(stdout(&output).contains("This is a dry run, the files were not modified."));
  assert_eq!(dir.read_file("lib.map")?, LIBFOO_1_0);
  assert!(!dir.file_exists("lib.map.old"));
  Ok(())
}

#[test]
fn test_update_in_place_keeps_backup() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("lib.map", LIBFOO_1_0)?;

  run_abimap(&dir.path, &["update", "lib.map", "-o", "lib.map"], "foo\nbar\n")?;

  assert_eq!(dir.read_file("lib.map.old")?, LIBFOO_1_0);
  assert!(dir.read_file("lib.map")?.contains("LIBFOO_1_1"));
  Ok(())
}

#[test]
fn test_update_explicit_release_name() -> Result<()> {
  let dir = TestDir::new()?;
  dir.write_file("lib.map", LIBFOO_1_0)?;

  run_abimap(
    &dir.path,
    &["update", "lib.map", "-n", "libfoo", "-v", "1.5", "-o", "out.map"],
    "foo\nbar\n",
  )?;

  let map = dir.read_file("out.map")?;
  assert!(map.contains("LIBFOO_1_5\n{\n    global:\n        bar;\n} LIBFOO_1_0;\n"));
  Ok(())
}

#[test]
fn test_update_missing_map_file() -> Result<()> {
  let dir = TestDir::new()?;

  let output = run_abimap_with_input(&dir.path, &["update", "missing.map"], "foo\n")?;
  assert!(!output.status.success());
  assert!(stderr(&output).contains("missing.map"));
  Ok(())
}
