// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use netbox_zonegen::{
    config::{resolve_config_path, Config},
    constants::{DEFAULT_LOG_LEVEL, ENV_LOG_FORMAT, ENV_LOG_LEVEL, SERIAL_FILE_NAME, ZONE_OUTPUT_PATH},
    devices::FilterOptions,
    generator::{generate, RunPaths},
    netbox::NetboxClient,
};
use tracing::{debug, info};

/// Generate a DNS zone file from NetBox device inventory.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file; skips the ~/, ./ and /etc search
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Zone file to write
    #[arg(short, long, default_value = ZONE_OUTPUT_PATH)]
    output: PathBuf,

    /// Serial counter file
    #[arg(long, default_value = SERIAL_FILE_NAME)]
    serial_file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    // One HTTP fetch; no need for worker threads
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli))
}

/// Initialize logging.
///
/// `RUST_LOG` takes a full filter directive; otherwise `LOG_LEVEL` (default
/// `info`) sets the level. `RUST_LOG_FORMAT=json` switches to JSON lines.
fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = std::env::var(ENV_LOG_LEVEL)
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();
        tracing_subscriber::EnvFilter::try_new(&level)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_LEVEL))
    });

    let log_format = std::env::var(ENV_LOG_FORMAT).unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }
}

async fn async_main(cli: Cli) -> Result<()> {
    debug!("reading configuration");
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let config_path =
        resolve_config_path(cli.config.as_deref(), dirs::home_dir().as_deref(), &cwd)?;
    let config = Config::load(&config_path)?;

    let server_url = config.netbox.server_url()?;
    info!(server = %server_url, "Connecting to NetBox");
    let client = NetboxClient::new(server_url, config.netbox.token.clone())?;

    let paths = RunPaths {
        serial_file: cli.serial_file,
        output: cli.output,
    };
    let summary = generate(&config, &client, &paths, FilterOptions::from_env()).await?;

    info!(
        serial = summary.serial,
        published = summary.published,
        missing_address = summary.missing_address,
        missing_asset_tag = summary.missing_asset_tag,
        invalid_hostname = summary.invalid_hostname,
        excluded_by_state = summary.excluded_by_state,
        output = %summary.output.display(),
        "Zone generation complete"
    );
    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod main_tests;
