//! CLI argument parsing using clap v4

use clap::{Parser, Subcommand};

/// diamond-practice - student banner and trait disambiguation exercise
///
/// Prints a banner, shows a value built from two same-named trait constants
/// and keeps asking whether to continue until you answer no.
#[derive(Parser, Debug)]
#[command(name = "diamond-practice")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Command to run (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the interactive session
    Run(RunArgs),

    /// Display version and build information
    Version,

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Path to configuration file
    #[arg(short, long, env = "PRACTICE_CONFIG")]
    pub config: Option<String>,

    /// Never clear the screen, regardless of configuration
    #[arg(long)]
    pub no_clear: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the effective configuration
    Show {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<String>,

        /// Print as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        config: Option<String>,
    },
}

impl Cli {
    /// The command to execute, with `run` as the default
    pub fn resolved_command(&self) -> Commands {
        self.command.clone().unwrap_or_else(|| {
            Commands::Run(RunArgs {
                config: std::env::var("PRACTICE_CONFIG").ok(),
                no_clear: false,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_run() {
        let cli = Cli::parse_from(["diamond-practice"]);
        assert!(cli.command.is_none());
        match cli.resolved_command() {
            Commands::Run(args) => {
                assert!(!args.no_clear);
            }
            other => panic!("Expected Run command, got {:?}", other),
        }
    }

    #[test]
    fn test_run_with_options() {
        let cli = Cli::parse_from([
            "diamond-practice",
            "run",
            "--config",
            "/path/to/config.toml",
            "--no-clear",
        ]);
        match cli.resolved_command() {
            Commands::Run(args) => {
                assert_eq!(args.config, Some("/path/to/config.toml".to_string()));
                assert!(args.no_clear);
            }
            other => panic!("Expected Run command, got {:?}", other),
        }
    }

    #[test]
    fn test_verbose_flags() {
        let cli = Cli::parse_from(["diamond-practice", "-vv", "version"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_quiet_flag() {
        let cli = Cli::parse_from(["diamond-practice", "--quiet"]);
        assert!(cli.quiet);
    }

    #[test]
    fn test_config_show_json() {
        let cli = Cli::parse_from(["diamond-practice", "config", "show", "--json"]);
        match cli.resolved_command() {
            Commands::Config { subcommand: ConfigSubcommand::Show { config, json } } => {
                assert!(config.is_none());
                assert!(json);
            }
            other => panic!("Expected Config Show command, got {:?}", other),
        }
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["diamond-practice", "config", "init", "--force"]);
        match cli.resolved_command() {
            Commands::Config { subcommand: ConfigSubcommand::Init { path, force } } => {
                assert!(path.is_none());
                assert!(force);
            }
            other => panic!("Expected Config Init command, got {:?}", other),
        }
    }
}
