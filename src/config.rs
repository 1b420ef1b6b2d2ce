// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Configuration document (`.nocconfig.yaml`) lookup and parsing.
//!
//! The configuration is searched for in a fixed, ordered set of locations:
//!
//! 1. `~/.nocconfig.yaml`
//! 2. `./.nocconfig.yaml`
//! 3. `/etc/.nocconfig.yaml`
//!
//! The candidate list is built once at startup with [`candidate_paths`] and
//! handed to [`find_config`], so lookup never checks hidden locations.
//!
//! # Example
//!
//! ```yaml
//! netbox:
//!   server: https://netbox.example.com
//!   token: 0123456789abcdef
//! zone:
//!   soa: ns1.example.com
//!   soa_admin: hostmaster.example.com
//!   ttl: 3600
//!   zone_refresh_time: 3600
//!   zone_retry_interval: 600
//!   expiry_period: 604800
//!   ns_cache_time: 3600
//!   nameservers:
//!     - name: ns1.example.com
//!       address: 203.0.113.1
//!   include_states:
//!     - ACTIVE
//! serial:
//!   start_at: 1
//!   auto_increment: true
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, error, warn};
use url::Url;

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_INCLUDE_STATE, GLOBAL_CONFIG_PATH};
use crate::errors::ConfigError;

/// Top-level configuration document.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub netbox: NetboxConfig,
    pub zone: ZoneSettings,
    pub serial: SerialConfig,
}

/// NetBox connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct NetboxConfig {
    /// Base URL of the NetBox instance, e.g. `https://netbox.example.com`
    pub server: String,
    /// API token, sent as a bearer token
    pub token: String,
}

/// Zone contents and SOA timers.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneSettings {
    /// Zone origin and SOA MNAME
    pub soa: String,
    /// Responsible mailbox (SOA RNAME); `user@domain` is accepted
    pub soa_admin: String,
    /// TTL applied to every record, in seconds
    pub ttl: u32,
    /// SOA REFRESH, in seconds
    pub zone_refresh_time: i32,
    /// SOA RETRY, in seconds
    pub zone_retry_interval: i32,
    /// SOA EXPIRE, in seconds
    pub expiry_period: i32,
    /// SOA MINIMUM (negative caching TTL), in seconds
    pub ns_cache_time: u32,
    /// Authoritative nameservers, in output order
    pub nameservers: Vec<Nameserver>,
    /// Device statuses to include; falls back to `ACTIVE` when absent
    #[serde(default)]
    pub include_states: Option<Vec<String>>,
}

/// A nameserver listed in the apex NS set, with its glue address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Nameserver {
    pub name: String,
    pub address: Ipv4Addr,
}

/// Serial counter behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SerialConfig {
    /// Serial used when no counter file exists yet
    pub start_at: u32,
    /// Persist the computed serial after each run
    pub auto_increment: bool,
}

impl Config {
    /// Parse a configuration document from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not valid YAML or a
    /// required key is missing, and [`ConfigError::InvalidValue`] when the
    /// NetBox server is not an absolute HTTP(S) URL.
    pub fn from_yaml(path: &Path, text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.netbox.server_url()?;
        Ok(config)
    }

    /// Read and parse the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Reading configuration");
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml(path, &text).inspect_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to read configuration");
        })
    }
}

impl NetboxConfig {
    /// Parse `server` as an absolute HTTP(S) URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unparseable URLs or
    /// non-HTTP schemes.
    pub fn server_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.server).map_err(|e| ConfigError::InvalidValue {
            key: "netbox.server".to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidValue {
                key: "netbox.server".to_string(),
                reason: format!("unsupported scheme '{other}'"),
            }),
        }
    }
}

impl ZoneSettings {
    /// Device statuses admitted into the zone, uppercased.
    ///
    /// Falls back to `{"ACTIVE"}` when `include_states` is missing or empty,
    /// logging a single warning.
    #[must_use]
    pub fn effective_states(&self) -> BTreeSet<String> {
        let states: BTreeSet<String> = self
            .include_states
            .iter()
            .flatten()
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();

        if states.is_empty() {
            warn!("no include_states found in .nocconfig/zone, adding only actives");
            return BTreeSet::from([DEFAULT_INCLUDE_STATE.to_string()]);
        }

        states
    }
}

/// Build the ordered list of configuration locations to search.
///
/// `home` is the user's home directory, if one could be determined, and `cwd`
/// is the working directory.
#[must_use]
pub fn candidate_paths(home: Option<&Path>, cwd: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(3);
    if let Some(home) = home {
        paths.push(home.join(CONFIG_FILE_NAME));
    }
    paths.push(cwd.join(CONFIG_FILE_NAME));
    paths.push(PathBuf::from(GLOBAL_CONFIG_PATH));
    paths
}

/// Return the first candidate that exists.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] listing every candidate when none exist.
pub fn find_config(candidates: &[PathBuf]) -> Result<PathBuf, ConfigError> {
    first_existing(CONFIG_FILE_NAME, candidates)
}

/// Pick the configuration file for this run.
///
/// An `explicit` path (from `--config`) is the only candidate when given;
/// otherwise the fixed locations from [`candidate_paths`] are searched.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] when the chosen candidates do not exist.
pub fn resolve_config_path(
    explicit: Option<&Path>,
    home: Option<&Path>,
    cwd: &Path,
) -> Result<PathBuf, ConfigError> {
    match explicit {
        Some(path) => {
            let file_name = path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
            first_existing(&file_name, &[path.to_path_buf()])
        }
        None => find_config(&candidate_paths(home, cwd)),
    }
}

fn first_existing(file_name: &str, candidates: &[PathBuf]) -> Result<PathBuf, ConfigError> {
    for path in candidates {
        if path.is_file() {
            debug!(path = %path.display(), "Using configuration");
            return Ok(path.clone());
        }
    }

    let err = ConfigError::NotFound {
        file_name: file_name.to_string(),
        checked: candidates.to_vec(),
    };
    error!("{err}");
    Err(err)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
