// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Device filtering and hostname mapping.
//!
//! Turns the inventory listing into zone devices, in listing order:
//!
//! 1. Devices without a primary IPv4 address are skipped with a warning
//!    (unless suppressed).
//! 2. Devices whose uppercased status is not in the include set are skipped
//!    at debug level.
//! 3. Devices without an asset tag, or whose `asset.site` hostname is not a
//!    valid domain name (spaces, `/`, parentheses...), are skipped with a
//!    warning.
//! 4. Survivors have the CIDR prefix length stripped from their address and
//!    their asset tag and site slug lowercased.
//!
//! Duplicate hostnames are kept; the zone builder decides what to do with them.

use std::collections::BTreeSet;
use std::fmt;
use std::net::Ipv4Addr;

use hickory_proto::rr::Name;
use tracing::{debug, warn};

use crate::constants::ENV_SUPPRESS_NO_IP_WARNING;
use crate::errors::DeviceError;
use crate::netbox::Device;

/// A device that will receive an A record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneDevice {
    /// Lowercased asset tag
    pub asset: String,
    /// Lowercased site slug
    pub site: String,
    pub address: Ipv4Addr,
}

impl ZoneDevice {
    /// Owner name of the device's A record, relative to the zone origin.
    #[must_use]
    pub fn hostname(&self) -> String {
        format!("{}.{}", self.asset, self.site)
    }
}

impl fmt::Display for ZoneDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.hostname(), self.address)
    }
}

/// Knobs for [`filter_devices`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterOptions {
    /// Do not warn about devices without a primary address
    pub suppress_no_ip_warning: bool,
}

impl FilterOptions {
    /// Read options from the environment (`SUPPRESS_NO_IP_WARNING=YES`).
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_suppress_value(std::env::var(ENV_SUPPRESS_NO_IP_WARNING).ok().as_deref())
    }

    /// Options for a given `SUPPRESS_NO_IP_WARNING` value; only `YES`
    /// (any case) suppresses.
    #[must_use]
    pub fn from_suppress_value(value: Option<&str>) -> Self {
        Self {
            suppress_no_ip_warning: value.is_some_and(|v| v.trim().eq_ignore_ascii_case("YES")),
        }
    }
}

/// Outcome of filtering an inventory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterReport {
    /// Devices to publish, in listing order
    pub devices: Vec<ZoneDevice>,
    /// `site/asset` of each device skipped for lacking a primary address
    pub missing_address: Vec<String>,
    /// `site/#id` of each device skipped for lacking an asset tag
    pub missing_asset_tag: Vec<String>,
    /// `site/asset` of each device skipped because its hostname is not a
    /// valid domain name
    pub invalid_hostname: Vec<String>,
    /// Number of devices skipped for an unpermitted status
    pub excluded_by_state: usize,
}

/// Strip an optional `/prefix` and parse the host address.
///
/// # Errors
///
/// Returns [`DeviceError::MalformedAddress`] if what remains is not an IPv4
/// address.
pub fn parse_host_address(device: &Device, cidr: &str) -> Result<Ipv4Addr, DeviceError> {
    let host = cidr.split_once('/').map_or(cidr, |(host, _)| host);
    host.trim()
        .parse::<Ipv4Addr>()
        .map_err(|_| DeviceError::MalformedAddress {
            site: device.site.slug.clone(),
            asset: device.asset_tag.clone().unwrap_or_default(),
            address: cidr.to_string(),
        })
}

/// Filter and map inventory devices to zone devices.
///
/// `states` must already be uppercased (see
/// [`ZoneSettings::effective_states`](crate::config::ZoneSettings::effective_states)).
///
/// # Errors
///
/// Returns an error on the first permitted device whose primary address does
/// not parse; the whole run is aborted rather than publishing a partial zone.
pub fn filter_devices(
    devices: &[Device],
    states: &BTreeSet<String>,
    options: FilterOptions,
) -> Result<FilterReport, DeviceError> {
    let mut report = FilterReport::default();

    for device in devices {
        let Some(cidr) = device.primary_address() else {
            if !options.suppress_no_ip_warning {
                warn!("{} has no primary address", device.display_id());
            }
            report.missing_address.push(device.display_id());
            continue;
        };

        debug!(
            "{} - {} ({})",
            cidr,
            device.display_id(),
            device.status()
        );

        if !states.contains(&device.status().to_uppercase()) {
            debug!(
                "skipping {} - not in a permitted state ({})",
                device.display_id(),
                device.status()
            );
            report.excluded_by_state += 1;
            continue;
        }

        let Some(asset_tag) = device.asset_tag.as_deref().filter(|t| !t.trim().is_empty()) else {
            warn!("{} has no asset tag, skipping", device.display_id());
            report.missing_asset_tag.push(device.display_id());
            continue;
        };

        let address = parse_host_address(device, cidr)?;
        let zone_device = ZoneDevice {
            asset: asset_tag.to_lowercase(),
            site: device.site.slug.to_lowercase(),
            address,
        };

        let hostname = zone_device.hostname();
        if let Err(e) = Name::from_ascii(&hostname) {
            warn!(
                "{} has invalid hostname '{}', skipping: {}",
                device.display_id(),
                hostname,
                e
            );
            report.invalid_hostname.push(device.display_id());
            continue;
        }

        report.devices.push(zone_device);
    }

    Ok(report)
}

#[cfg(test)]
#[path = "devices_tests.rs"]
mod devices_tests;
