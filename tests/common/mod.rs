// Common test utilities for integration tests

use async_trait::async_trait;
use netbox_zonegen::errors::InventoryError;
use netbox_zonegen::netbox::{Device, Inventory};
use serde_json::json;
use std::io;
use std::sync::{Arc, Mutex};
use tracing::subscriber::DefaultGuard;

/// Inventory that always returns the same devices
pub struct FixedInventory(pub Vec<Device>);

#[async_trait]
impl Inventory for FixedInventory {
    async fn list_devices(&self) -> Result<Vec<Device>, InventoryError> {
        Ok(self.0.clone())
    }
}

/// Configuration document for zone `example.com` with one nameserver
pub fn config_yaml(server: &str, auto_increment: bool) -> String {
    format!(
        r"netbox:
  server: {server}
  token: test-token
zone:
  soa: example.com
  soa_admin: hostmaster@example.com
  ttl: 3600
  zone_refresh_time: 3600
  zone_retry_interval: 600
  expiry_period: 604800
  ns_cache_time: 300
  nameservers:
    - name: ns1.example.com
      address: 203.0.113.1
  include_states:
    - ACTIVE
serial:
  start_at: 1
  auto_increment: {auto_increment}
"
    )
}

/// Device object shaped like NetBox's `/api/dcim/devices/` results
pub fn netbox_device(
    id: u64,
    asset: &str,
    site: &str,
    ip: Option<&str>,
    status: &str,
) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("device-{id}"),
        "asset_tag": asset,
        "site": { "id": 1, "slug": site, "name": site },
        "primary_ip4": ip.map(|address| json!({ "id": id, "family": 4, "address": address })),
        "status": { "value": status.to_lowercase(), "label": status },
    })
}

/// Log sink shared between a subscriber and the test
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Install a debug-level subscriber writing here for the current thread.
    pub fn install(&self) -> DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
