//! repokit CLI - manage hosted repositories from the terminal

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use repokit_core::{ConfigManager, RepoKitError, ValidationError};

mod commands;
mod output;

use commands::*;

/// Exit codes for the CLI
#[derive(Debug, Clone, Copy)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    UsageError = 2,
    AuthError = 4,
    RepositoryNotFound = 10,
    ConfigError = 30,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Pick the exit code for an error that reached `main`
    fn for_error(err: &anyhow::Error) -> Self {
        if err.downcast_ref::<ValidationError>().is_some() {
            return ExitCode::UsageError;
        }
        if err.downcast_ref::<repokit_core::ConfigError>().is_some() {
            return ExitCode::ConfigError;
        }

        match err.downcast_ref::<RepoKitError>() {
            Some(RepoKitError::Validation(_)) => ExitCode::UsageError,
            Some(RepoKitError::Config(_)) => ExitCode::ConfigError,
            Some(e) if e.is_auth_failure() => ExitCode::AuthError,
            Some(e) if e.is_not_found() => ExitCode::RepositoryNotFound,
            _ => ExitCode::GeneralError,
        }
    }
}

/// repokit - Manage hosted repositories from the terminal
#[derive(Parser)]
#[command(name = "repokit", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with repositories
    Repo {
        #[command(subcommand)]
        action: RepoAction,
    },

    /// Show or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum RepoAction {
    /// Rename a repository
    #[command(override_usage = "repokit repo rename <OWNER/REPO> <NEW_NAME>")]
    Rename {
        /// Repository to rename ([HOST/]OWNER/REPO) followed by its new name
        #[arg(value_name = "ARGS", num_args = 0..)]
        args: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (timeout_secs, token, api_url)
        key: String,

        /// Configuration value
        value: String,

        /// Host that token and api_url apply to
        #[arg(long)]
        host: Option<String>,
    },
}

fn setup_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so stdout stays scriptable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Set up output formatting
    let ctx = output::OutputContext::new(cli.no_color, cli.quiet);

    let result = run_command(cli.command, &ctx);

    match result {
        Ok(code) => std::process::exit(code.into()),
        Err(e) => {
            ctx.error(&format!("{:#}", e));
            std::process::exit(ExitCode::for_error(&e).into());
        }
    }
}

fn run_command(command: Commands, ctx: &output::OutputContext) -> Result<ExitCode> {
    match command {
        Commands::Repo { action } => {
            let config = ConfigManager::with_defaults()?;
            match action {
                RepoAction::Rename { args } => repo_rename::run(&config, &args, ctx),
            }
        }

        Commands::Config { action } => {
            let config = ConfigManager::with_defaults()?;
            match action {
                ConfigAction::Show => config_cmd::show(&config, ctx),
                ConfigAction::Set { key, value, host } => {
                    config_cmd::set(&config, &key, &value, host.as_deref(), ctx)
                }
            }
        }

        Commands::Completions { shell } => {
            completions::run(shell, &mut std::io::stdout());
            Ok(ExitCode::Success)
        }
    }
}
