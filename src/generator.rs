// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The zone generation pipeline.
//!
//! One run is strictly linear:
//!
//! ```text
//! compute serial -> fetch devices -> filter/map -> build zone -> write zone
//! ```
//!
//! Every stage receives its inputs as arguments; nothing is shared through
//! globals. Any error aborts the run. The serial counter is persisted before
//! the inventory is fetched, so a failed run still consumes a serial.
//!
//! Two runs in the same working directory must not overlap: neither the
//! serial file nor the output file is locked.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::Config;
use crate::constants::{SERIAL_FILE_NAME, ZONE_OUTPUT_PATH};
use crate::devices::{filter_devices, FilterOptions};
use crate::netbox::Inventory;
use crate::serial::next_serial;
use crate::zone::{build_zone, write_zone};

/// File locations used by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    /// Serial counter file
    pub serial_file: PathBuf,
    /// Zone file to (over)write
    pub output: PathBuf,
}

impl Default for RunPaths {
    fn default() -> Self {
        Self {
            serial_file: PathBuf::from(SERIAL_FILE_NAME),
            output: PathBuf::from(ZONE_OUTPUT_PATH),
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub serial: u32,
    /// Devices that received an A record
    pub published: usize,
    pub missing_address: usize,
    pub missing_asset_tag: usize,
    pub invalid_hostname: usize,
    pub excluded_by_state: usize,
    pub output: PathBuf,
}

/// Run the pipeline once.
///
/// # Errors
///
/// Returns an error if the serial counter cannot be updated, the inventory
/// cannot be listed, a permitted device has a malformed address, a name is
/// invalid, or the zone file cannot be written.
pub async fn generate(
    config: &Config,
    inventory: &dyn Inventory,
    paths: &RunPaths,
    options: FilterOptions,
) -> Result<RunSummary> {
    let serial = next_serial(&paths.serial_file, &config.serial)
        .context("Failed to compute zone serial")?;
    debug!(serial, "Using serial");

    let states = config.zone.effective_states();
    debug!(states = ?states, "Permitted device states");

    let devices = inventory
        .list_devices()
        .await
        .context("Failed to list devices from inventory")?;

    let report = filter_devices(&devices, &states, options)?;
    info!("found {} devices to add to zone.", report.devices.len());

    let zone = build_zone(&config.zone, serial, &report.devices)
        .context("Failed to build zone")?;
    write_zone(&zone, &paths.output)?;

    Ok(RunSummary {
        serial,
        published: report.devices.len(),
        missing_address: report.missing_address.len(),
        missing_asset_tag: report.missing_asset_tag.len(),
        invalid_hostname: report.invalid_hostname.len(),
        excluded_by_state: report.excluded_by_state,
        output: paths.output.clone(),
    })
}
