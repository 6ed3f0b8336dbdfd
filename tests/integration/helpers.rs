//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Version script shipped by a fictional libfoo 1.0
pub const LIBFOO_1_0: &str = "LIBFOO_1_0 {\n    global:\n        foo;\n    local:\n        *;\n};\n";

/// A scratch directory holding map and symbol files
pub struct TestDir {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestDir {
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Write a file relative to the directory
  pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
    let path = self.path.join(name);
    std::fs::write(&path, content).with_context(|| format!("Failed to write {}", name))?;
    Ok(path)
  }

  pub fn read_file(&self, name: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(name))?)
  }

  pub fn file_exists(&self, name: &str) -> bool {
    self.path.join(name).exists()
  }
}

/// Run abimap and feed `stdin` to it, whatever the exit status
pub fn run_abimap_with_input(cwd: &Path, args: &[&str], stdin: &str) -> Result<Output> {
  let abimap_bin = env!("CARGO_BIN_EXE_abimap");

  let mut child = Command::new(abimap_bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("RUST_LOG")
    .stdin(Stdio::piped())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .spawn()
    .context("Failed to run abimap")?;

  // abimap may exit before reading its input
  if let Some(mut pipe) = child.stdin.take()
    && let Err(e) = pipe.write_all(stdin.as_bytes())
    && e.kind() != std::io::ErrorKind::BrokenPipe
  {
    return Err(e.into());
  }

  child.wait_with_output().context("Failed to wait for abimap")
}

/// Run abimap and fail unless it exits successfully
pub fn run_abimap(cwd: &Path, args: &[&str], stdin: &str) -> Result<Output> {
  let output = run_abimap_with_input(cwd, args, stdin)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "abimap command failed: abimap {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}
