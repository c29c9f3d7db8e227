//! diamond-practice - console exercise
//!
//! Prints a student banner, then repeatedly shows a value assembled from two
//! same-named trait constants and asks whether to continue.

mod cli;
mod config;
mod derived;
mod error;
mod logging;
mod screen;
mod session;
mod version;

use std::io;

use clap::Parser;
use tracing::{debug, error, info};

use crate::cli::{Cli, Commands, ConfigSubcommand, RunArgs};
use crate::config::{ClearMode, PracticeConfig};
use crate::error::Result;
use crate::session::{Session, Termination};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(&cli) {
        error!(error = %e.format_for_log(), "Command failed");
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

fn dispatch(cli: &Cli) -> Result<()> {
    match cli.resolved_command() {
        Commands::Run(args) => run_session(args, cli.verbose, cli.quiet),
        Commands::Version => {
            version::print_version();
            Ok(())
        }
        Commands::Config { subcommand } => {
            logging::init_simple(tracing::Level::WARN)?;
            handle_config_command(subcommand)
        }
    }
}

/// Run the interactive session on the real console
fn run_session(args: RunArgs, verbose: u8, quiet: bool) -> Result<()> {
    let mut config = PracticeConfig::load(args.config.as_deref())?;
    if args.no_clear {
        config.display.clear_screen = ClearMode::Never;
    }

    // Held until the session returns so file logs are flushed
    let _log_guards = logging::init_logging(&config.logging, verbose, quiet)?;

    let build = version::build_info();
    info!(
        version = %build.full_version(),
        clear_screen = %config.display.clear_screen,
        "Starting diamond-practice"
    );

    let mut clearer = screen::clearer_for_stdout(config.display.clear_screen);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), clearer.as_mut());

    let termination = session.run()?;
    let values_shown = session.values_shown();
    match termination {
        Termination::Declined => debug!(values_shown, "User declined to continue"),
        Termination::EndOfInput => debug!(values_shown, "Input closed"),
    }

    Ok(())
}

fn handle_config_command(subcommand: ConfigSubcommand) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show { config, json } => {
            let cfg = PracticeConfig::load(config.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            } else {
                println!("{}", toml::to_string_pretty(&cfg)?);
            }
        }
        ConfigSubcommand::Init { path, force } => {
            let written = config::init_config(path.as_deref(), force)?;
            println!("Configuration file created: {}", written.display());
        }
        ConfigSubcommand::Validate { config } => {
            PracticeConfig::load(config.as_deref())?;
            println!("Configuration is valid.");
        }
    }

    Ok(())
}
