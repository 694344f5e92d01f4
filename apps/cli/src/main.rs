//! # Dindin CLI
//!
//! Command-line front end over the view-state stores.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CLI Startup Sequence                                 │
//! │                                                                         │
//! │  1. Parse arguments (clap)                                             │
//! │  2. Load config: defaults → config.toml → DINDIN_* env → flags         │
//! │  3. Initialize tracing (stderr)                                        │
//! │  4. Ensure the data directory exists                                   │
//! │  5. Database::initialize() (migrations + first-run seeding)            │
//! │  6. Run the command through the stores                                 │
//! │  7. Close the database, print output or the error                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod commands;
mod config;
mod error;
mod render;

use std::process::ExitCode;

use clap::Parser;
use dindin_db::Database;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::commands::{Cli, Context};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log.filter);

    match run(cli, config).await {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Config file and environment, then the `--db` flag on top.
fn load_config(cli: &Cli) -> CliResult<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(path) = &cli.db {
        config.database.path = Some(path.clone());
    }
    Ok(config)
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` wins over the configured filter. Logs go to stderr so
/// stdout stays clean for `--json`.
fn init_tracing(configured: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli, config: AppConfig) -> CliResult<String> {
    let db_config = config.db_config()?;

    if let Some(parent) = db_config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| CliError::DataDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let db = Database::new(db_config);
    if let Err(e) = db.initialize().await {
        error!(error = %e, "Failed to initialize database");
        return Err(e.into());
    }
    info!(path = %db.config().database_path.display(), "Database opened");

    let ctx = Context::new(db.clone(), cli.json);
    let result = commands::execute(&cli.command, &ctx).await;

    db.close().await;
    result
}
