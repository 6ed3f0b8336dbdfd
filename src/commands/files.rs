//! File handling shared by the commands: safety checks, symbol input, output

use crate::core::diagnostics::DiagnosticSink;
use crate::core::error::{MapResult, ResultExt};
use crate::script::model::Map;
use crate::script::render::render;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Warn before replacing an existing output file
pub fn warn_overwrite(out: Option<&Path>, sink: &mut dyn DiagnosticSink) {
  if let Some(out) = out
    && out.is_file()
  {
    sink.warning(format!("Overwriting existing file '{}'", out.display()));
  }
}

/// Back up `input` when it is the same file as `out`
///
/// The copy goes to `INPUT.old` and is skipped on dry runs.
pub fn check_files(
  out_arg: &str,
  out: &Path,
  in_arg: &str,
  input: &Path,
  dry: bool,
  sink: &mut dyn DiagnosticSink,
) -> MapResult<()> {
  if !out.is_file() || !input.is_file() || !same_file(out, input)? {
    return Ok(());
  }

  sink.warning(format!("Given paths in '{}' and '{}' are the same.", out_arg, in_arg));
  if dry {
    return Ok(());
  }

  let backup = backup_path(input);
  sink.warning(format!("Moving '{}' to '{}'.", input.display(), backup.display()));
  fs::copy(input, &backup)
    .with_context(|| format!("Could not copy '{}' to '{}'. Aborting.", input.display(), backup.display()))?;
  Ok(())
}

fn same_file(a: &Path, b: &Path) -> MapResult<bool> {
  let a = fs::canonicalize(a).with_context(|| format!("Failed to resolve {}", a.display()))?;
  let b = fs::canonicalize(b).with_context(|| format!("Failed to resolve {}", b.display()))?;
  Ok(a == b)
}

fn backup_path(path: &Path) -> PathBuf {
  let mut name = path.as_os_str().to_os_string();
  name.push(".old");
  PathBuf::from(name)
}

/// Lines of the symbol list, from `input` or stdin
pub fn read_symbol_lines(input: Option<&Path>) -> MapResult<Vec<String>> {
  match input {
    Some(path) => {
      let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read symbols from {}", path.display()))?;
      Ok(text.lines().map(str::to_string).collect())
    }
    None => {
      let stdin = io::stdin();
      let lines = stdin
        .lock()
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to read symbols from stdin")?;
      Ok(lines)
    }
  }
}

/// Write `map` behind a generated-by header, to `out` or stdout
pub fn write_map(out: Option<&Path>, header: &str, map: &Map) -> MapResult<()> {
  let content = format!("{}\n\n{}", header, render(map));
  match out {
    Some(path) => {
      fs::write(path, content).with_context(|| format!("Failed to write map to {}", path.display()))?;
    }
    None => {
      let mut stdout = io::stdout().lock();
      stdout.write_all(content.as_bytes())?;
      stdout.flush()?;
    }
  }
  Ok(())
}
