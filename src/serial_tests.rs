// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for the serial counter.

#[cfg(test)]
mod tests {
    use crate::config::SerialConfig;
    use crate::errors::SerialError;
    use crate::serial::{next_serial, read_stored};
    use std::fs;
    use tempfile::TempDir;

    fn settings(start_at: u32, auto_increment: bool) -> SerialConfig {
        SerialConfig {
            start_at,
            auto_increment,
        }
    }

    #[test]
    fn test_first_run_uses_start_at() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".serial");

        let serial = next_serial(&path, &settings(100, true)).unwrap();

        assert_eq!(serial, 100);
        assert_eq!(fs::read_to_string(&path).unwrap(), "100");
    }

    #[test]
    fn test_first_run_without_auto_increment_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".serial");

        let serial = next_serial(&path, &settings(100, false)).unwrap();

        assert_eq!(serial, 100);
        assert!(!path.exists());
    }

    #[test]
    fn test_existing_serial_is_incremented_and_stored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".serial");
        fs::write(&path, "41").unwrap();

        let serial = next_serial(&path, &settings(1, true)).unwrap();

        assert_eq!(serial, 42);
        assert_eq!(fs::read_to_string(&path).unwrap(), "42");
    }

    #[test]
    fn test_auto_increment_is_strictly_increasing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".serial");

        let first = next_serial(&path, &settings(7, true)).unwrap();
        let second = next_serial(&path, &settings(7, true)).unwrap();
        let third = next_serial(&path, &settings(7, true)).unwrap();

        assert_eq!((first, second, third), (7, 8, 9));
    }

    #[test]
    fn test_disabled_auto_increment_repeats_same_serial() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".serial");
        fs::write(&path, "41").unwrap();

        let first = next_serial(&path, &settings(1, false)).unwrap();
        let second = next_serial(&path, &settings(1, false)).unwrap();

        assert_eq!(first, 42);
        assert_eq!(second, 42);
        assert_eq!(fs::read_to_string(&path).unwrap(), "41");
    }

    #[test]
    fn test_stored_value_tolerates_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".serial");
        fs::write(&path, "2024010101\n").unwrap();

        assert_eq!(read_stored(&path).unwrap(), Some(2_024_010_101));
    }

    #[test]
    fn test_read_stored_absent_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(read_stored(&dir.path().join(".serial")).unwrap(), None);
    }

    #[test]
    fn test_malformed_serial_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".serial");
        fs::write(&path, "not-a-number").unwrap();

        let err = next_serial(&path, &settings(1, true)).unwrap_err();

        match err {
            SerialError::Malformed { content, .. } => assert_eq!(content, "not-a-number"),
            other => panic!("expected Malformed, got {other:?}"),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "not-a-number");
    }

    #[test]
    fn test_negative_serial_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".serial");
        fs::write(&path, "-1").unwrap();

        assert!(matches!(
            read_stored(&path).unwrap_err(),
            SerialError::Malformed { .. }
        ));
    }

    #[test]
    fn test_serial_wraps_at_u32_max() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".serial");
        fs::write(&path, u32::MAX.to_string()).unwrap();

        assert_eq!(next_serial(&path, &settings(1, true)).unwrap(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "0");
    }

    #[test]
    fn test_unwritable_serial_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join(".serial");

        assert!(matches!(
            next_serial(&path, &settings(1, true)).unwrap_err(),
            SerialError::Write { .. }
        ));
    }
}
