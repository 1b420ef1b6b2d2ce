// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the zone generator.
//!
//! This module contains the fixed file names, environment variable names and
//! NetBox API parameters used throughout the codebase.

// ============================================================================
// Configuration Constants
// ============================================================================

/// File name of the configuration document, searched for in several places
pub const CONFIG_FILE_NAME: &str = ".nocconfig.yaml";

/// System-wide configuration location, checked last
pub const GLOBAL_CONFIG_PATH: &str = "/etc/.nocconfig.yaml";

/// Device status admitted when `zone.include_states` is missing or empty
pub const DEFAULT_INCLUDE_STATE: &str = "ACTIVE";

// ============================================================================
// File Locations
// ============================================================================

/// Serial counter file, relative to the working directory
pub const SERIAL_FILE_NAME: &str = ".serial";

/// Zone output path, relative to the working directory
pub const ZONE_OUTPUT_PATH: &str = "out/zone.db";

// ============================================================================
// Environment Variables
// ============================================================================

/// Log verbosity (`error`, `warn`, `info`, `debug`, `trace`)
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// Default log verbosity when neither `RUST_LOG` nor `LOG_LEVEL` is set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log output format (`text` or `json`)
pub const ENV_LOG_FORMAT: &str = "RUST_LOG_FORMAT";

/// Set to `YES` to silence the per-device "no primary address" warning
pub const ENV_SUPPRESS_NO_IP_WARNING: &str = "SUPPRESS_NO_IP_WARNING";

// ============================================================================
// NetBox API Constants
// ============================================================================

/// Device listing endpoint, relative to the NetBox server URL
pub const NETBOX_DEVICES_PATH: &str = "api/dcim/devices/";

/// Page size requested from the device listing
pub const NETBOX_PAGE_LIMIT: u32 = 1000;

/// Timeout for a single NetBox HTTP request
pub const NETBOX_REQUEST_TIMEOUT_SECS: u64 = 30;
