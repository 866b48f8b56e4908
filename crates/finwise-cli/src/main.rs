//! FinWise CLI - a terminal frontend for the FinWise personal finance API.
//!
//! Lists and edits transactions, budgets and goals, and prints the
//! dashboard summary and AI predictions.

mod commands;
mod output;

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use finwise_core::auth::{ClearingTerminator, CredentialStore, KeyringCredentialStore};
use finwise_core::{ApiClient, ApiError, Config};

use commands::Command;

/// Set to write a daily-rotated log file under the cache directory
const LOG_FILE_ENV: &str = "FINWISE_LOG_FILE";

/// Initialize the tracing subscriber for logging.
/// Returns the file writer guard, which must live until exit.
fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_dir = std::env::var_os(LOG_FILE_ENV)
        .and_then(|_| config.cache_dir().ok());

    match file_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "finwise.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .with(filter)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(filter)
                .init();
            None
        }
    }
}

/// The CLI's "back to login screen": the store is already cleared by the
/// terminator, so all that is left is telling the user.
fn session_expired_notice() {
    eprintln!("Your session has expired. Run `finwise login` to sign in again.");
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // The terminator has already told the user what happened
            if !matches!(e.downcast_ref::<ApiError>(), Some(ApiError::SessionTerminated { .. })) {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;
    let _log_guard = init_tracing(&config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;
    debug!(?command, api = %config.api_base_url, "Starting");

    let store: Arc<dyn CredentialStore> = Arc::new(KeyringCredentialStore::new(config.keyring_service.clone()));
    let terminator = Arc::new(ClearingTerminator::new(store.clone(), session_expired_notice));
    let client = ApiClient::from_config(&config, store, terminator)?;

    let result = commands::run(&client, &mut config, command).await;
    info!(ok = result.is_ok(), "Done");
    result
}
