// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Persisted SOA serial counter.
//!
//! The counter file holds the last serial used, as a bare decimal integer.
//! Each run uses `stored + 1`, or `serial.start_at` when no file exists yet.
//! With `auto_increment` enabled the new value is written back immediately,
//! before the zone that carries it has been written.
//!
//! There is no locking: two runs sharing a working directory race on the
//! counter file.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use crate::config::SerialConfig;
use crate::errors::SerialError;

/// Read the stored serial, if the counter file exists.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or does not hold a
/// decimal `u32`.
pub fn read_stored(path: &Path) -> Result<Option<u32>, SerialError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SerialError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let trimmed = content.trim();
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| SerialError::Malformed {
            path: path.to_path_buf(),
            content: trimmed.to_string(),
        })
}

/// Compute the serial for this run and persist it if configured.
///
/// # Errors
///
/// Returns an error if the counter file cannot be read, parsed or written.
pub fn next_serial(path: &Path, settings: &SerialConfig) -> Result<u32, SerialError> {
    let serial = match read_stored(path)? {
        Some(stored) => {
            // RFC 1982 serial arithmetic
            let next = stored.wrapping_add(1);
            if next < stored {
                warn!(stored, next, "Serial number wrapped around");
            }
            next
        }
        None => {
            debug!(
                path = %path.display(),
                start_at = settings.start_at,
                "No serial file found, using start_at"
            );
            settings.start_at
        }
    };

    if settings.auto_increment {
        fs::write(path, serial.to_string()).map_err(|source| SerialError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(serial, path = %path.display(), "Incremented serial");
    } else {
        debug!(serial, "auto_increment disabled, serial file left untouched");
    }

    Ok(serial)
}

#[cfg(test)]
#[path = "serial_tests.rs"]
mod serial_tests;
