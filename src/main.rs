//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `safe_guard` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Mapping the verdict to an exit code
//!
//! Exit codes: 0 when the bundle is unchanged, 2 when it changed or could not
//! be verified, 1 on errors.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::ErrorKind;
use std::process;

use safe_guard::initialization::{init_client, init_logger_with};
use safe_guard::{check_base_url, Config};

const EXIT_UNSAFE: i32 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    // Settings such as ADVANCED_ANTI_DETECTION usually live in .env
    load_dotenv().context("Failed to load .env file")?;

    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    config.validate().context("Invalid configuration")?;

    let client = init_client(&config).context("Failed to initialize HTTP client")?;

    match check_base_url(&config, client).await {
        Ok(true) => {
            println!("✅ {} is unchanged, safe to run", config.base_url);
            Ok(())
        }
        Ok(false) => {
            println!("⛔ {} changed or could not be verified", config.base_url);
            process::exit(EXIT_UNSAFE);
        }
        Err(e) => {
            eprintln!("safe_guard error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Loads `.env` from the working directory or its parents, if one exists.
fn load_dotenv() -> Result<(), dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(dotenvy::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
