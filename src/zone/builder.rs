// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone assembly from configuration and zone devices.
//!
//! The zone is rooted at `zone.soa` and contains:
//!
//! - one SOA at the apex, carrying this run's serial
//! - one NS set at the apex listing every configured nameserver
//! - one A record per nameserver, at the nameserver's own name
//! - one A record per zone device, at `asset.site` under the origin
//!
//! Configured names are absolute whether or not they end in a dot. Device
//! hostnames are relative to the origin.

use std::collections::HashSet;

use hickory_proto::rr::rdata::{A, NS, SOA};
use hickory_proto::rr::{Name, RData};
use tracing::{debug, info, warn};

use crate::config::ZoneSettings;
use crate::devices::ZoneDevice;
use crate::errors::ZoneError;
use crate::zone::Zone;

/// Parse a configured domain name as an absolute, lowercased name.
///
/// # Errors
///
/// Returns [`ZoneError::InvalidName`] for empty or unparseable names.
pub fn absolute_name(value: &str) -> Result<Name, ZoneError> {
    let trimmed = value.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return Err(ZoneError::InvalidName {
            name: value.to_string(),
            reason: "name is empty".to_string(),
        });
    }

    Name::from_ascii(format!("{trimmed}."))
        .map(|name| name.to_lowercase())
        .map_err(|e| ZoneError::InvalidName {
            name: value.to_string(),
            reason: e.to_string(),
        })
}

/// Parse the SOA responsible mailbox. `hostmaster@example.com` becomes
/// `hostmaster.example.com.`.
///
/// # Errors
///
/// Returns [`ZoneError::InvalidName`] if the result is not a domain name.
pub fn mailbox_name(value: &str) -> Result<Name, ZoneError> {
    absolute_name(&value.replacen('@', ".", 1))
}

/// Absolute owner name for `hostname`, relative to `origin`.
///
/// # Errors
///
/// Returns [`ZoneError::InvalidName`] if the combined name is not valid.
pub fn relative_to_origin(hostname: &str, origin: &Name) -> Result<Name, ZoneError> {
    let fqdn = format!("{hostname}.{origin}");
    Name::from_ascii(&fqdn)
        .map(|name| name.to_lowercase())
        .map_err(|e| ZoneError::InvalidName {
            name: fqdn,
            reason: e.to_string(),
        })
}

/// Build the zone for this run.
///
/// # Errors
///
/// Returns an error if the origin, SOA names, a nameserver name or a device
/// hostname is not a valid domain name.
pub fn build_zone(
    settings: &ZoneSettings,
    serial: u32,
    devices: &[ZoneDevice],
) -> Result<Zone, ZoneError> {
    let origin = absolute_name(&settings.soa)?;
    let ttl = settings.ttl;
    let mut zone = Zone::new(origin.clone());

    let soa = SOA::new(
        origin.clone(),
        mailbox_name(&settings.soa_admin)?,
        serial,
        settings.zone_refresh_time,
        settings.zone_retry_interval,
        settings.expiry_period,
        settings.ns_cache_time,
    );
    zone.add(origin.clone(), ttl, RData::SOA(soa));
    debug!(origin = %origin, serial, "Added SOA record");

    for nameserver in &settings.nameservers {
        let ns_name = absolute_name(&nameserver.name)?;
        zone.add(origin.clone(), ttl, RData::NS(NS(ns_name.clone())));
        zone.add(ns_name, ttl, RData::A(A(nameserver.address)));
    }

    let mut seen = HashSet::with_capacity(devices.len());
    for device in devices {
        let hostname = device.hostname();
        if !seen.insert(hostname.clone()) {
            warn!(
                hostname = %hostname,
                address = %device.address,
                "Duplicate hostname, adding address to existing A record set"
            );
        }

        let owner = relative_to_origin(&hostname, &origin)?;
        zone.add(owner, ttl, RData::A(A(device.address)));
    }

    info!(
        origin = %origin,
        serial,
        records = zone.record_count(),
        "Built zone"
    );
    Ok(zone)
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod builder_tests;
