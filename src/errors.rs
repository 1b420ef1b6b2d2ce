// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for the zone generator.
//!
//! Each stage of the pipeline has its own error enum:
//! - [`ConfigError`] - locating and parsing `.nocconfig.yaml`
//! - [`SerialError`] - reading and persisting the serial counter
//! - [`InventoryError`] - talking to the NetBox API
//! - [`DeviceError`] - turning inventory devices into zone devices
//! - [`ZoneError`] - building and writing the zone file
//!
//! Every variant here is fatal for the run. Per-device conditions that only
//! skip a device (no address, unpermitted state) are not errors.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while locating or parsing the configuration document.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// None of the candidate locations held a configuration file
    #[error("no {file_name} found, checked {}", display_paths(.checked))]
    NotFound {
        /// File name that was searched for
        file_name: String,
        /// Every path that was checked, in search order
        checked: Vec<PathBuf>,
    },

    /// The configuration file exists but could not be read
    #[error("failed to read configuration {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML or misses required keys
    #[error("failed to parse configuration {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A value parsed but is not usable
    #[error("invalid configuration value for '{key}': {reason}")]
    InvalidValue {
        /// Dotted key path, e.g. `netbox.server`
        key: String,
        reason: String,
    },
}

/// Errors raised by the serial counter.
#[derive(Error, Debug)]
pub enum SerialError {
    #[error("failed to read serial file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored value is not a decimal 32-bit unsigned integer
    #[error("serial file {} does not contain a valid serial: '{content}'", .path.display())]
    Malformed { path: PathBuf, content: String },

    #[error("failed to write serial file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while listing devices from NetBox.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// The server URL could not be combined with the API path
    #[error("invalid NetBox URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Building the HTTP client failed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or the body could not be read
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// NetBox answered with a non-success status
    #[error("NetBox returned HTTP {status} for {url}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    /// The response body is not a device listing
    #[error("failed to decode device listing from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while mapping inventory devices to zone devices.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// `primary_ip4` is present but is not an IPv4 host address
    #[error("device {site}/{asset} has malformed primary address '{address}'")]
    MalformedAddress {
        site: String,
        asset: String,
        address: String,
    },
}

/// Errors raised while building or writing the zone.
#[derive(Error, Debug)]
pub enum ZoneError {
    /// A configured or derived name is not a valid domain name
    #[error("invalid domain name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("failed to write zone file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;
