//! `abimap new` - create a version script from a symbol list

use super::files::{check_files, read_symbol_lines, warn_overwrite, write_map};
use super::{CommandContext, FileArgs, NameArgs};
use crate::core::diagnostics::{DiagnosticSink, TracingSink};
use crate::core::error::MapResult;
use crate::delta::{clean_symbols, new_map};

/// Everything `new` needs from the command line
#[derive(Debug, Clone)]
pub struct NewCommand {
  pub files: FileArgs,
  pub naming: NameArgs,
  pub finalize: bool,
}

/// Run the new command
pub fn run_new(ctx: &CommandContext, cmd: &NewCommand) -> MapResult<()> {
  let sink: &mut dyn DiagnosticSink = &mut TracingSink;
  sink.info("Command: new");

  let out = cmd.files.out.as_deref();
  warn_overwrite(out, sink);
  if let (Some(out), Some(input)) = (out, cmd.files.input.as_deref()) {
    check_files("--out", out, "--in", input, cmd.files.dry, sink)?;
  }

  // Nothing to guess from: the name must be complete before reading symbols
  let request = cmd.naming.request(ctx, false, sink)?;

  let lines = read_symbol_lines(cmd.files.input.as_deref())?;
  let symbols = clean_symbols(&lines, sink);
  let Some(map) = new_map(request.as_ref(), &symbols, cmd.finalize, sink)? else {
    return Ok(());
  };

  if cmd.files.dry {
    println!("This is a dry run, the files were not modified.");
    return Ok(());
  }

  let header = format!("# This map file was created with {}", ctx.name_version());
  write_map(out, &header, &map)
}
