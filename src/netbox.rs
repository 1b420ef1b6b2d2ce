// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! NetBox inventory client.
//!
//! Only the read-only device listing (`GET /api/dcim/devices/`) is consumed.
//! The listing is paginated: the client requests pages of
//! [`NETBOX_PAGE_LIMIT`] devices and follows each page's `next` link until
//! NetBox returns `null`, preserving listing order.
//!
//! Failures are not retried; every error aborts the run.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::{debug, error, info};
use url::Url;

use crate::constants::{NETBOX_DEVICES_PATH, NETBOX_PAGE_LIMIT, NETBOX_REQUEST_TIMEOUT_SECS};
use crate::errors::InventoryError;

/// A source of inventory devices.
///
/// [`NetboxClient`] is the production implementation; anything else that can
/// list devices (a fixture, a file export) can drive the generator.
#[async_trait]
pub trait Inventory: Send + Sync {
    /// List every device, in inventory order.
    async fn list_devices(&self) -> Result<Vec<Device>, InventoryError>;
}

/// A device as returned by the NetBox device listing.
///
/// Only the fields the zone needs are decoded; everything else is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub asset_tag: Option<String>,
    pub site: SiteRef,
    #[serde(default)]
    pub primary_ip4: Option<IpAddressRef>,
    #[serde(default)]
    pub status: DeviceStatus,
}

/// Nested site reference on a device.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SiteRef {
    pub slug: String,
}

/// Nested IP address reference; `address` is in CIDR form (`10.0.0.5/24`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IpAddressRef {
    pub address: String,
}

/// NetBox choice field for device status (`{"value": "active", "label": "Active"}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeviceStatus {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

impl Device {
    /// Build a device from plain values.
    #[must_use]
    pub fn new(
        asset_tag: impl Into<String>,
        site_slug: impl Into<String>,
        primary_ip4: Option<&str>,
        status: impl Into<String>,
    ) -> Self {
        let status = status.into();
        Self {
            id: None,
            asset_tag: Some(asset_tag.into()),
            site: SiteRef {
                slug: site_slug.into(),
            },
            primary_ip4: primary_ip4.map(|address| IpAddressRef {
                address: address.to_string(),
            }),
            status: DeviceStatus {
                value: Some(status.to_lowercase()),
                label: Some(status),
            },
        }
    }

    /// Display status: the choice label, falling back to the raw value.
    #[must_use]
    pub fn status(&self) -> &str {
        self.status
            .label
            .as_deref()
            .or(self.status.value.as_deref())
            .unwrap_or_default()
    }

    /// Primary IPv4 address in CIDR form, if one is assigned.
    #[must_use]
    pub fn primary_address(&self) -> Option<&str> {
        self.primary_ip4.as_ref().map(|ip| ip.address.as_str())
    }

    /// `site/asset` label used in log messages.
    #[must_use]
    pub fn display_id(&self) -> String {
        match (&self.asset_tag, self.id) {
            (Some(tag), _) => format!("{}/{}", self.site.slug, tag),
            (None, Some(id)) => format!("{}/#{}", self.site.slug, id),
            (None, None) => format!("{}/?", self.site.slug),
        }
    }
}

/// One page of the device listing.
#[derive(Debug, Deserialize)]
struct DeviceList {
    #[serde(default)]
    count: Option<u64>,
    #[serde(default)]
    next: Option<String>,
    results: Vec<Device>,
}

/// HTTP client for the NetBox REST API.
#[derive(Debug, Clone)]
pub struct NetboxClient {
    http: HttpClient,
    base_url: Url,
    token: String,
}

impl NetboxClient {
    /// Create a client for the NetBox instance at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: Url, token: impl Into<String>) -> Result<Self, InventoryError> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(NETBOX_REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(InventoryError::Client)?;

        Ok(Self {
            http,
            base_url,
            token: token.into(),
        })
    }

    /// URL of the first page of the device listing.
    ///
    /// A base URL with a path prefix (`https://host/netbox`) keeps its prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing path cannot be joined to the base URL.
    pub fn devices_url(&self) -> Result<Url, InventoryError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut url = base
            .join(NETBOX_DEVICES_PATH)
            .map_err(|source| InventoryError::InvalidUrl {
                url: self.base_url.to_string(),
                source,
            })?;
        url.query_pairs_mut()
            .append_pair("limit", &NETBOX_PAGE_LIMIT.to_string());
        Ok(url)
    }

    async fn fetch_page(&self, url: &Url) -> Result<DeviceList, InventoryError> {
        debug!(url = %url, "HTTP API request to NetBox");

        let response = self
            .http
            .get(url.clone())
            .header("Authorization", format!("Bearer {}", self.token))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| InventoryError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(
                url = %url,
                status = %status,
                error = %body,
                "NetBox API request failed"
            );
            return Err(InventoryError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|source| InventoryError::Request {
                url: url.to_string(),
                source,
            })?;

        serde_json::from_str(&text).map_err(|source| InventoryError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl Inventory for NetboxClient {
    async fn list_devices(&self) -> Result<Vec<Device>, InventoryError> {
        let mut devices = Vec::new();
        let mut next = Some(self.devices_url()?);

        while let Some(url) = next.take() {
            let page = self.fetch_page(&url).await?;
            debug!(
                url = %url,
                page_len = page.results.len(),
                total = ?page.count,
                "Fetched device page"
            );
            devices.extend(page.results);

            next = page
                .next
                .map(|link| {
                    Url::parse(&link).map_err(|source| InventoryError::InvalidUrl { url: link, source })
                })
                .transpose()?;
        }

        info!(count = devices.len(), "Fetched devices from NetBox");
        Ok(devices)
    }
}

#[cfg(test)]
#[path = "netbox_tests.rs"]
mod netbox_tests;
