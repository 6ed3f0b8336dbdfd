use abimap::commands::new::NewCommand;
use abimap::commands::update::UpdateCommand;
use abimap::commands::{self, CommandContext, FileArgs, NameArgs};
use abimap::core::config::AbimapConfig;
use abimap::core::error::{MapError, print_error};
use abimap::core::logging::{self, Verbosity};
use abimap::delta::Strategy;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Helper tools for linker version script maintenance
#[derive(Parser)]
#[command(name = "abimap")]
#[command(version, about, long_about = None)]
#[command(after_help = "Call a subcommand passing '-h' to see its specific options")]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Update the map file
  #[command(after_help = "A list of symbols is expected as the input. If a file is provided with '-i', \
                          the symbols are read from the given file. Otherwise the symbols are read from stdin.")]
  Update {
    /// The map file being updated
    file: PathBuf,
    #[command(flatten)]
    files: FileArgs,
    #[command(flatten)]
    verbosity: VerbosityArgs,
    #[command(flatten)]
    naming: NameArgs,
    /// Allow removing symbols, and to break ABI
    #[arg(long)]
    allow_abi_break: bool,
    /// Mark the modified release as final, preventing later changes
    #[arg(short = 'f', long = "final")]
    finalize: bool,
    /// Adds the symbols to the map file
    #[arg(short, long, conflicts_with = "remove")]
    add: bool,
    /// Remove the symbols from the map file. This breaks the ABI
    #[arg(long)]
    remove: bool,
  },

  /// Create a new map file
  #[command(after_help = "A list of symbols is expected as the input. If a file is provided with '-i', \
                          the symbols are read from the given file. Otherwise the symbols are read from stdin.")]
  New {
    #[command(flatten)]
    files: FileArgs,
    #[command(flatten)]
    verbosity: VerbosityArgs,
    #[command(flatten)]
    naming: NameArgs,
    /// Mark the new release as final, preventing later changes
    #[arg(short = 'f', long = "final")]
    finalize: bool,
  },

  /// Check the map file
  Check {
    /// The map file to be checked
    file: PathBuf,
    #[command(flatten)]
    verbosity: VerbosityArgs,
    /// Print the diagnostics as a JSON report
    #[arg(long)]
    json: bool,
  },

  /// Print version
  Version,
}

#[derive(Args, Clone, Default)]
struct VerbosityArgs {
  /// Set the program verbosity
  #[arg(long, value_enum, group = "verbosity_level")]
  verbosity: Option<Verbosity>,
  /// Makes the program quiet
  #[arg(long, group = "verbosity_level")]
  quiet: bool,
  /// Makes the program print debug info
  #[arg(long, group = "verbosity_level")]
  debug: bool,
  /// Log to this file
  #[arg(short, long)]
  logfile: Option<PathBuf>,
}

impl VerbosityArgs {
  fn resolve(&self, config: &AbimapConfig) -> Verbosity {
    if self.quiet {
      Verbosity::Quiet
    } else if self.debug {
      Verbosity::Debug
    } else {
      self.verbosity.or(config.log.verbosity).unwrap_or_default()
    }
  }
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let cwd = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  let config = match AbimapConfig::load(&cwd) {
    Ok(config) => config,
    Err(e) => handle_error(e),
  };
  let ctx = CommandContext::from_config(&config);

  if let Some(verbosity) = cli.command.verbosity()
    && let Err(e) = init_logging(verbosity, &config)
  {
    handle_error(e);
  }

  let result = match cli.command {
    Commands::Update {
      file,
      files,
      naming,
      allow_abi_break,
      finalize,
      add,
      remove,
      ..
    } => commands::run_update(
      &ctx,
      &UpdateCommand {
        file,
        files,
        naming,
        allow_abi_break,
        finalize,
        strategy: Strategy::from_flags(add, remove),
      },
    ),
    Commands::New {
      files,
      naming,
      finalize,
      ..
    } => commands::run_new(
      &ctx,
      &NewCommand {
        files,
        naming,
        finalize,
      },
    ),
    Commands::Check { file, json, .. } => commands::run_check(&file, json),
    Commands::Version => commands::run_version(&ctx).map(|_| ()),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

impl Commands {
  fn verbosity(&self) -> Option<&VerbosityArgs> {
    match self {
      Commands::Update { verbosity, .. } | Commands::New { verbosity, .. } | Commands::Check { verbosity, .. } => {
        Some(verbosity)
      }
      Commands::Version => None,
    }
  }
}

fn init_logging(args: &VerbosityArgs, config: &AbimapConfig) -> Result<(), MapError> {
  let logfile = args.logfile.as_deref().or(config.log.logfile.as_deref());
  logging::init(args.resolve(config), logfile)
}

fn handle_error(err: MapError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
