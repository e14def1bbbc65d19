//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use doorman_core::{Config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "doorman")]
#[command(version)]
#[command(about = "Terminal client for a hosted auth provider")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login {
        /// Email address (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// Register a new account
    Signup {
        /// Email address (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// Revoke the current session
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Request a password-reset email
    Reset {
        /// Email address (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    // Config subcommands must work before any config exists.
    if let Some(Commands::Config { command }) = &cli.command {
        return match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        };
    }

    let config = Config::load().context("load config")?;
    let _log_guard = logging::init(&config.log_filter);

    // default to the interactive TUI
    let Some(command) = cli.command else {
        #[cfg(feature = "tui")]
        return doorman_tui::run(config).await;
        #[cfg(not(feature = "tui"))]
        anyhow::bail!("Built without the TUI; use a subcommand (see --help).");
    };

    match command {
        Commands::Login { email } => commands::auth::login(&config, email).await,
        Commands::Signup { email } => commands::auth::signup(&config, email).await,
        Commands::Logout => commands::auth::logout(&config).await,
        Commands::Whoami => commands::auth::whoami(&config).await,
        Commands::Reset { email } => commands::auth::reset(&config, email).await,
        Commands::Config { .. } => unreachable!("handled above"),
    }
}
