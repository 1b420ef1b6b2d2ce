// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `main.rs` - command-line parsing

#[cfg(test)]
mod tests {
    use super::super::Cli;
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_match_fixed_locations() {
        let cli = Cli::try_parse_from(["netbox-zonegen"]).unwrap();

        assert!(cli.config.is_none());
        assert_eq!(cli.output, PathBuf::from("out/zone.db"));
        assert_eq!(cli.serial_file, PathBuf::from(".serial"));
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "netbox-zonegen",
            "--config",
            "/srv/dns/noc.yaml",
            "-o",
            "/var/named/db.example",
            "--serial-file",
            "/var/lib/zonegen/serial",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/srv/dns/noc.yaml")));
        assert_eq!(cli.output, PathBuf::from("/var/named/db.example"));
        assert_eq!(cli.serial_file, PathBuf::from("/var/lib/zonegen/serial"));
    }

    #[test]
    fn test_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["netbox-zonegen", "--dry-run"]).is_err());
    }
}
