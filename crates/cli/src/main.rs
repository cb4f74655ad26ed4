//! ShopEase CLI - a terminal storefront.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog, cheapest first
//! shopease products --q shoe --sort price_asc
//!
//! # Add a product and check out
//! shopease add p1
//! shopease checkout
//!
//! # Keep view state between commands
//! shopease shell
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPEASE_BACKEND_URL` - Backend base URL (default `http://localhost:8000`)
//! - `SHOPEASE_STORAGE_PATH` - Local storage file holding the session token
//! - `SHOPEASE_LOG_FORMAT` - `pretty` or `json`
//! - `RUST_LOG` - Log filter (default `shopease=warn`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shopease_storefront::Storefront;
use shopease_storefront::api::BackendClient;
use shopease_storefront::config::{LogFormat, StorefrontConfig};
use shopease_storefront::session::SessionManager;
use shopease_storefront::storage::JsonFileStorage;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{CliError, Command};

#[derive(Parser)]
#[command(name = "shopease")]
#[command(author, version, about = "ShopEase terminal storefront")]
struct Cli {
    #[command(subcommand)]
    command: TopLevel,
}

#[derive(Subcommand)]
enum TopLevel {
    #[command(flatten)]
    Store(Command),
    /// Interactive shell that keeps the cart and open product between commands
    Shell,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(config.log_format);

    if let Err(e) = run(cli, &config).await {
        tracing::error!("Command failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), CliError> {
    let mut storage = JsonFileStorage::new(&config.storage_path);
    let session_id = SessionManager::resolve(&mut storage)?;
    let mut storefront = Storefront::new(BackendClient::new(config), session_id);
    let mut out = io::stdout().lock();

    match cli.command {
        TopLevel::Store(command) => {
            if command.needs_start() {
                storefront.start().await;
            }
            commands::run(&mut storefront, command, &mut out).await?;
        }
        TopLevel::Shell => {
            storefront.start().await;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            commands::shell::run(&mut storefront, stdin, &mut out).await?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Install the global subscriber. Logs go to stderr so views on stdout stay
/// clean.
fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopease_storefront=warn,shopease_cli=warn".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(io::stderr),
            )
            .init(),
    }
}
