//! `abimap update` - apply a new symbol list to an existing map
//!
//! The symbols read from `--in` (or stdin) are compared with the global
//! symbols of the map. Added symbols go into a new release on top of the
//! latest one; removed symbols need `--allow-abi-break` and merge everything
//! into a new base release.

use super::files::{check_files, read_symbol_lines, warn_overwrite, write_map};
use super::{CommandContext, FileArgs, NameArgs};
use crate::core::diagnostics::{DiagnosticSink, TracingSink};
use crate::core::error::MapResult;
use crate::delta::{Strategy, SymbolDelta, UpdateOptions, UpdateOutcome, clean_symbols};
use crate::script::model::Map;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Everything `update` needs from the command line
#[derive(Debug, Clone)]
pub struct UpdateCommand {
  pub file: PathBuf,
  pub files: FileArgs,
  pub naming: NameArgs,
  pub allow_abi_break: bool,
  pub finalize: bool,
  pub strategy: Strategy,
}

/// Run the update command
pub fn run_update(ctx: &CommandContext, cmd: &UpdateCommand) -> MapResult<()> {
  let sink: &mut dyn DiagnosticSink = &mut TracingSink;
  sink.info("Command: update");

  let out = cmd.files.out.as_deref();
  warn_overwrite(out, sink);
  if let Some(out) = out {
    if let Some(input) = cmd.files.input.as_deref() {
      check_files("--out", out, "--in", input, cmd.files.dry, sink)?;
    }
    check_files("--out", out, "file", &cmd.file, cmd.files.dry, sink)?;
  }

  let guess = cmd.naming.guess(ctx);
  let request = cmd.naming.request(ctx, guess, sink)?;

  let mut map = Map::read(&cmd.file, sink)?;
  let existing = map.all_global_symbols()?;

  let lines = read_symbol_lines(cmd.files.input.as_deref())?;
  let symbols = clean_symbols(&lines, sink);
  let delta = SymbolDelta::compute(&existing, &symbols, cmd.strategy, sink);

  print_changes("Added:", &delta.added);
  print_changes("Removed:", &delta.removed);

  if delta.is_empty() {
    println!("No symbols added or removed. Nothing done.");
    return Ok(());
  }
  if delta.breaks_abi() && cmd.allow_abi_break {
    println!("Merging all symbols in a single new release");
  }

  let options = UpdateOptions {
    request,
    allow_abi_break: cmd.allow_abi_break,
    finalize: cmd.finalize,
    guess,
  };
  match map.apply_update(&delta, &options, sink)? {
    UpdateOutcome::Unchanged => return Ok(()),
    UpdateOutcome::Extended { release, created } => {
      let action = if created { "Created" } else { "Extended" };
      sink.info(format!("{} release '{}'", action, release));
    }
    UpdateOutcome::Merged { release } => sink.info(format!("Merged all releases into '{}'", release)),
  }

  if cmd.files.dry {
    println!("This is a dry run, the files were not modified.");
    return Ok(());
  }

  let header = format!("# This map file was updated with {}", ctx.name_version());
  write_map(out, &header, &map)
}

fn print_changes(title: &str, symbols: &BTreeSet<String>) {
  if symbols.is_empty() {
    return;
  }
  println!("{}", title);
  for symbol in symbols {
    println!("    {}", symbol);
  }
  println!();
}
