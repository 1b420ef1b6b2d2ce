// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Tests for the NetBox device listing client.

#[cfg(test)]
mod tests {
    use crate::errors::InventoryError;
    use crate::netbox::{Device, Inventory, NetboxClient};
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base: &str) -> NetboxClient {
        NetboxClient::new(Url::parse(base).unwrap(), "s3cret").unwrap()
    }

    fn device_json(id: u64, asset: &str, site: &str, ip: Option<&str>, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": format!("device-{id}"),
            "asset_tag": asset,
            "site": { "id": 1, "slug": site, "name": site.to_uppercase() },
            "primary_ip4": ip.map(|address| json!({ "id": id, "family": 4, "address": address })),
            "status": { "value": status.to_lowercase(), "label": status },
        })
    }

    // =====================================================
    // URL Building Tests
    // =====================================================

    #[test]
    fn test_devices_url_from_bare_host() {
        let url = client_for("https://netbox.example.com").devices_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://netbox.example.com/api/dcim/devices/?limit=1000"
        );
    }

    #[test]
    fn test_devices_url_trailing_slash() {
        let url = client_for("https://netbox.example.com/").devices_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://netbox.example.com/api/dcim/devices/?limit=1000"
        );
    }

    #[test]
    fn test_devices_url_keeps_path_prefix() {
        let url = client_for("http://10.0.0.1:8080/netbox").devices_url().unwrap();
        assert_eq!(
            url.as_str(),
            "http://10.0.0.1:8080/netbox/api/dcim/devices/?limit=1000"
        );
    }

    // =====================================================
    // Device Model Tests
    // =====================================================

    #[test]
    fn test_device_decodes_netbox_json() {
        let device: Device =
            serde_json::from_value(device_json(7, "SW1", "lon1", Some("10.0.0.5/24"), "Active"))
                .unwrap();

        assert_eq!(device.id, Some(7));
        assert_eq!(device.asset_tag.as_deref(), Some("SW1"));
        assert_eq!(device.site.slug, "lon1");
        assert_eq!(device.primary_address(), Some("10.0.0.5/24"));
        assert_eq!(device.status(), "Active");
    }

    #[test]
    fn test_device_decodes_null_address_and_asset() {
        let device: Device = serde_json::from_value(json!({
            "id": 9,
            "asset_tag": null,
            "site": { "slug": "ams2" },
            "primary_ip4": null,
            "status": { "value": "offline", "label": "Offline" },
        }))
        .unwrap();

        assert!(device.asset_tag.is_none());
        assert!(device.primary_address().is_none());
        assert_eq!(device.display_id(), "ams2/#9");
    }

    #[test]
    fn test_status_falls_back_to_value() {
        let device: Device = serde_json::from_value(json!({
            "site": { "slug": "lon1" },
            "status": { "value": "planned" },
        }))
        .unwrap();

        assert_eq!(device.status(), "planned");
    }

    #[test]
    fn test_device_new() {
        let device = Device::new("SW1", "LON1", Some("10.0.0.5/24"), "Active");

        assert_eq!(device.display_id(), "LON1/SW1");
        assert_eq!(device.status(), "Active");
        assert_eq!(device.status.value.as_deref(), Some("active"));
    }

    // =====================================================
    // HTTP Tests
    // =====================================================

    #[tokio::test]
    async fn test_list_devices_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dcim/devices/"))
            .and(query_param("limit", "1000"))
            .and(header("Authorization", "Bearer s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2,
                "next": null,
                "previous": null,
                "results": [
                    device_json(1, "SW1", "lon1", Some("10.0.0.5/24"), "Active"),
                    device_json(2, "SW2", "lon1", None, "Active"),
                ],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let devices = client_for(&server.uri()).list_devices().await.unwrap();

        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].asset_tag.as_deref(), Some("SW1"));
        assert!(devices[1].primary_ip4.is_none());
    }

    #[tokio::test]
    async fn test_list_devices_follows_pagination() {
        let server = MockServer::start().await;
        let next = format!("{}/api/dcim/devices/?limit=1000&offset=1000", server.uri());

        Mock::given(method("GET"))
            .and(path("/api/dcim/devices/"))
            .and(query_param_is_missing("offset"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 3,
                "next": next,
                "previous": null,
                "results": [
                    device_json(1, "A1", "lon1", Some("10.0.0.1/24"), "Active"),
                    device_json(2, "A2", "lon1", Some("10.0.0.2/24"), "Active"),
                ],
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/dcim/devices/"))
            .and(query_param("offset", "1000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 3,
                "next": null,
                "previous": null,
                "results": [device_json(3, "A3", "lon1", Some("10.0.0.3/24"), "Active")],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let devices = client_for(&server.uri()).list_devices().await.unwrap();
        let tags: Vec<_> = devices
            .iter()
            .filter_map(|d| d.asset_tag.as_deref())
            .collect();

        assert_eq!(tags, vec!["A1", "A2", "A3"]);
    }

    #[tokio::test]
    async fn test_list_devices_auth_failure_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dcim/devices/"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Invalid token"))
            .mount(&server)
            .await;

        let err = client_for(&server.uri()).list_devices().await.unwrap_err();

        match err {
            InventoryError::Status { status, body, .. } => {
                assert_eq!(status.as_u16(), 403);
                assert_eq!(body, "Invalid token");
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_devices_rejects_non_listing_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dcim/devices/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server.uri()).list_devices().await.unwrap_err();
        assert!(matches!(err, InventoryError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_list_devices_unreachable_server_is_error() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let err = client_for(&uri).list_devices().await.unwrap_err();
        assert!(matches!(err, InventoryError::Request { .. }));
    }
}
