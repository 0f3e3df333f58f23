//! CLI entry and dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use plate_core::account::{AppwriteAccount, AppwriteConfig, SessionStore};
use plate_core::config::{self, Config};
use plate_core::logging;
use plate_core::session::{AuthState, SessionContext};

mod commands;

#[derive(Parser)]
#[command(name = "plate")]
#[command(version)]
#[command(about = "Profile screen and account session client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show the signed-in user's profile
    Profile {
        /// Print the profile as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign in with email and password
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long, env = "PLATE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// End the current session (always signs out locally)
    Logout,

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
    // Config commands must work even when the config file is broken.
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
    let _log_guard = match logging::init(&config) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: logging disabled: {err:#}");
            None
        }
    };

    let (account, session) = connect(&config)?;

    match cli.command {
        None => commands::tui::run(account, session).await,
        Some(Commands::Profile { json }) => commands::profile::run(account, session, json).await,
        Some(Commands::Login { email, password }) => {
            commands::auth::login(&account, &session, &email, &password).await
        }
        Some(Commands::Logout) => commands::auth::logout(account, session).await,
        Some(Commands::Config { .. }) => Ok(()),
    }
}

/// Builds the account client and the shared session context.
///
/// A stored credential means the user starts out authenticated; the record
/// itself is only known once it has been fetched. An unreadable credential
/// starts signed out; the account client discards it on first use.
fn connect(config: &Config) -> Result<(Arc<AppwriteAccount>, SessionContext)> {
    let store = SessionStore::at(config::paths::session_path());
    let signed_in = match store.load() {
        Ok(session) => session.is_some(),
        Err(err) => {
            tracing::warn!("ignoring unreadable stored session: {err:#}");
            false
        }
    };

    let appwrite = AppwriteConfig::from_config(config)?;
    tracing::debug!(endpoint = %appwrite.endpoint, project = %appwrite.project, signed_in, "connecting");
    let account = AppwriteAccount::new(appwrite, store)?;

    let initial = if signed_in {
        AuthState::authenticated(None)
    } else {
        AuthState::signed_out()
    };
    Ok((Arc::new(account), SessionContext::new(initial)))
}
