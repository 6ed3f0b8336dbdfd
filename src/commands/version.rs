//! `abimap version` - print program name and version

use super::CommandContext;
use crate::core::error::MapResult;

pub fn run_version(ctx: &CommandContext) -> MapResult<String> {
  let name_version = ctx.name_version();
  println!("{}", name_version);
  Ok(name_version)
}
