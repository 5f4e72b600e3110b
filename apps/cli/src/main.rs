//! # ShopLedger Command-Line Entry Point
//!
//! Thin front end over [`StoreService`]: parses arguments, opens the store,
//! runs one command and always closes the store again.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Command Execution                                 │
//! │                                                                         │
//! │  1. Initialize Logging ──► tracing-subscriber, stderr, RUST_LOG         │
//! │                                                                         │
//! │  2. Parse Arguments ─────► clap; usage errors exit with code 2          │
//! │                                                                         │
//! │  3. Load Configuration ──► --db > SHOPLEDGER_DB_PATH > data directory   │
//! │                                                                         │
//! │  4. service.start() ─────► open SQLite, run migrations                  │
//! │                                                                         │
//! │  5. commands::run ───────► one StoreService call, render to stdout      │
//! │                                                                         │
//! │  6. service.stop() ──────► on every path, success or failure            │
//! │                                                                         │
//! │  7. Exit ────────────────► 0, or the error's category exit code         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cli;
mod commands;
mod config;
mod error;

use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::error::{CliError, ErrorCode};
use shopledger_db::StoreService;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here, on stdout
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(ErrorCode::Usage.exit_code())
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    let json = cli.json;

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = ?err.code, "Command failed: {}", err.message);
            report_error(&err, json);
            ExitCode::from(err.code.exit_code())
        }
    }
}

async fn execute(cli: Cli) -> Result<(), CliError> {
    let config = AppConfig::load(cli.db)?;
    info!(path = %config.database_path.display(), "Configuration loaded");

    let mut service = StoreService::new(config.db_config());

    let result = match service.start().await {
        Ok(()) => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            commands::run(&service, cli.command, cli.json, &mut out).await
        }
        Err(e) => Err(e.into()),
    };

    service.stop().await;
    result
}

fn report_error(err: &CliError, json: bool) {
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();

    if json {
        if let Ok(payload) = serde_json::to_string(err) {
            let _ = writeln!(handle, "{}", payload);
            return;
        }
    }
    let _ = writeln!(handle, "error: {}", err);
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopledger=trace` - Show trace for shopledger crates only
/// - Default: `info,shopledger=debug,sqlx=warn`
///
/// Logs go to stderr so stdout carries only command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopledger=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
