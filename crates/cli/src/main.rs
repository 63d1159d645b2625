//! Marketplace CLI - Drive the storefront session core from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in as a seller with generated dev tokens
//! mkt-cli login -e ops@acme.example -n "Acme Traders" -r SELLER
//!
//! # Show who is signed in
//! mkt-cli whoami
//!
//! # Open a page through the role guard
//! mkt-cli visit /seller/enquiries
//!
//! # Sign out
//! mkt-cli logout
//! ```
//!
//! # Commands
//!
//! - `login` - Dev sign-in (no network; tokens are random)
//! - `logout` - Clear the persisted session
//! - `whoami` - Print the persisted profile
//! - `visit` - Resolve a path through the dashboard role guards

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use marketplace_storefront::StorefrontConfig;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "mkt-cli")]
#[command(author, version, about = "Marketplace session tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with generated dev tokens
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Role tag (`BUYER`, `SELLER`, `ADMIN`, ...)
        #[arg(short, long, default_value = "BUYER")]
        role: String,

        /// Username (defaults to the email mailbox)
        #[arg(short, long)]
        username: Option<String>,

        /// Phone number
        #[arg(short, long)]
        phone: Option<String>,
    },
    /// Sign out and clear the persisted session
    Logout,
    /// Show the signed-in profile
    Whoami,
    /// Open a path through the role guard
    Visit {
        /// In-app path, e.g. `/seller/enquiries`
        path: String,
    },
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "marketplace_storefront=info,mkt_cli=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = StorefrontConfig::from_env()?;

    match cli.command {
        Commands::Login {
            email,
            name,
            role,
            username,
            phone,
        } => {
            let request = commands::session::LoginRequest {
                email,
                name,
                role,
                username,
                phone,
            };
            let home = commands::session::login(&config, request)?;
            match home {
                Some(path) => tracing::info!("Signed in, dashboard at {path}"),
                None => tracing::info!("Signed in, no dashboard for this role"),
            }
        }
        Commands::Logout => {
            commands::session::logout(&config);
            tracing::info!("Signed out");
        }
        Commands::Whoami => match commands::session::whoami(&config) {
            Some(profile) => tracing::info!("{}", serde_json::to_string_pretty(&profile)?),
            None => tracing::info!("Not signed in"),
        },
        Commands::Visit { path } => {
            let outcome = commands::visit::visit(&config, &path)?;
            tracing::info!("{outcome}");
        }
    }
    Ok(())
}
