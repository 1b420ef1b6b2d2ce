// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Master-file (RFC 1035) rendering of a [`Zone`].
//!
//! Output format:
//!
//! ```text
//! $ORIGIN example.com.
//! $TTL 3600
//! @ 3600 IN SOA ns1.example.com. hostmaster.example.com. 42 3600 600 604800 300
//! @ 3600 IN NS ns1.example.com.
//! sw1.lon1 3600 IN A 10.0.0.5
//! ns1 3600 IN A 203.0.113.1
//! ```
//!
//! Owner names inside the origin are written relative to it (`@` for the
//! apex); everything else is written fully qualified.

use std::fs;
use std::path::Path;

use hickory_proto::rr::{Name, RecordType};
use tracing::{debug, info};

use crate::errors::ZoneError;
use crate::zone::Zone;

/// Render `name` as written in a zone rooted at `origin`.
#[must_use]
pub fn owner_text(name: &Name, origin: &Name) -> String {
    if name == origin {
        return "@".to_string();
    }

    if origin.zone_of(name) {
        let keep = usize::from(name.num_labels() - origin.num_labels());
        return name
            .iter()
            .take(keep)
            .map(String::from_utf8_lossy)
            .collect::<Vec<_>>()
            .join(".");
    }

    name.to_string()
}

/// Render the whole zone as master-file text.
///
/// RDATA uses hickory's presentation format (`RData`'s `Display`).
#[must_use]
pub fn to_master_file(zone: &Zone) -> String {
    let origin = zone.origin();
    let mut lines = vec![format!("$ORIGIN {origin}")];

    if let Some(soa_set) = zone.get(origin, RecordType::SOA) {
        lines.push(format!("$TTL {}", soa_set.ttl()));
    }

    for set in zone.record_sets() {
        let owner = owner_text(set.name(), origin);
        lines.extend(set.rdatas().iter().map(|rdata| {
            format!("{owner} {} IN {} {rdata}", set.ttl(), set.record_type())
        }));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Write the zone to `path`, replacing any existing file.
///
/// The parent directory is created if it does not exist.
///
/// # Errors
///
/// Returns [`ZoneError::Write`] if the directory or file cannot be written.
pub fn write_zone(zone: &Zone, path: &Path) -> Result<(), ZoneError> {
    let text = to_master_file(zone);
    debug!("created zone: \n{text}");

    let write_err = |source: std::io::Error| ZoneError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, text).map_err(write_err)?;

    info!(path = %path.display(), "written new zone file");
    Ok(())
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod writer_tests;
