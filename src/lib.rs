// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # netbox-zonegen - DNS zone files from NetBox inventory
//!
//! Lists devices from NetBox, keeps the ones with a primary IPv4 address and
//! a permitted status, and writes a master-format zone file with SOA, NS and
//! A records. Each run gets the next serial from a local counter file.
//!
//! ## Modules
//!
//! - [`config`] - `.nocconfig.yaml` lookup and parsing
//! - [`serial`] - persisted SOA serial counter
//! - [`netbox`] - NetBox device listing client
//! - [`devices`] - device filtering and hostname mapping
//! - [`zone`] - zone assembly and master-file output
//! - [`generator`] - the end-to-end pipeline
//!
//! ## Example
//!
//! ```rust,no_run
//! use netbox_zonegen::config::{candidate_paths, find_config, Config};
//! use netbox_zonegen::devices::FilterOptions;
//! use netbox_zonegen::generator::{generate, RunPaths};
//! use netbox_zonegen::netbox::NetboxClient;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let cwd = std::env::current_dir()?;
//! let path = find_config(&candidate_paths(dirs::home_dir().as_deref(), &cwd))?;
//! let config = Config::load(&path)?;
//!
//! let client = NetboxClient::new(config.netbox.server_url()?, config.netbox.token.clone())?;
//! let summary = generate(&config, &client, &RunPaths::default(), FilterOptions::from_env()).await?;
//! println!("serial {} with {} hosts", summary.serial, summary.published);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod devices;
pub mod errors;
pub mod generator;
pub mod netbox;
pub mod serial;
pub mod zone;
