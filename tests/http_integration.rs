// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the HTTP transport using wiremock.

use std::sync::Arc;
use std::time::Duration;

use lightdeck::protocol::{DeviceApi, HttpClient, HttpConfig};
use lightdeck::{
    Brightness, ColorTone, CommandOutcome, ControllerConfig, DeviceId, DeviceListController,
    DeviceStatus, Error, EventBus, NullSurface, RenderEvent, RgbColor, RosterView,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn status_json(is_on: bool, brightness: u8) -> serde_json::Value {
    json!({
        "is_online": true,
        "is_on": is_on,
        "brightness": brightness,
        "use_rgb": false,
        "rgb": [255, 255, 255],
        "color_tone": 50
    })
}

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::new(server.uri()).unwrap()
}

// ============================================================================
// HttpClient Tests
// ============================================================================

mod http_client {
    use super::*;

    #[tokio::test]
    async fn list_devices_parses_roster() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"id": "d1", "name": "Hall", "status": status_json(true, 70)},
                    {"id": "d2", "name": "Porch", "status": null},
                    {"id": "d3", "name": "Attic"}
                ]
            })))
            .mount(&mock_server)
            .await;

        let roster = client_for(&mock_server).list_devices().await.unwrap();

        assert_eq!(roster.len(), 3);
        assert_eq!(roster[0].id, DeviceId::new("d1"));
        assert_eq!(roster[0].name, "Hall");
        assert_eq!(
            roster[0].status.unwrap().brightness,
            Brightness::new(70).unwrap()
        );
        assert!(roster[1].status.is_none());
        assert!(roster[2].status.is_none());
    }

    #[tokio::test]
    async fn get_status_sends_device_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/device/status"))
            .and(query_param("id", "lamp 1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": status_json(true, 40)})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let status = client_for(&mock_server)
            .get_status(&DeviceId::new("lamp 1"))
            .await
            .unwrap();

        assert!(status.is_online);
        assert!(status.is_on);
        assert_eq!(status.color_tone, ColorTone::new(50).unwrap());
    }

    #[tokio::test]
    async fn set_on_off_sends_flag() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/device/set_on"))
            .and(query_param("id", "d1"))
            .and(query_param("on", "false"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": status_json(false, 40)})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let status = client_for(&mock_server)
            .set_on_off(&DeviceId::new("d1"), false)
            .await
            .unwrap();
        assert!(!status.is_on);
    }

    #[tokio::test]
    async fn set_brightness_sends_percentage() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/device/set_brightness"))
            .and(query_param("brightness", "25"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": status_json(true, 25)})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let status = client_for(&mock_server)
            .set_brightness(&DeviceId::new("d1"), Brightness::new(25).unwrap())
            .await
            .unwrap();
        assert_eq!(status.brightness, Brightness::new(25).unwrap());
    }

    #[tokio::test]
    async fn set_rgb_sends_channels() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/device/set_rgb"))
            .and(query_param("r", "255"))
            .and(query_param("g", "136"))
            .and(query_param("b", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "is_online": true,
                    "is_on": true,
                    "brightness": 100,
                    "use_rgb": true,
                    "rgb": [255, 136, 0],
                    "color_tone": 0
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let status = client_for(&mock_server)
            .set_rgb(&DeviceId::new("d1"), RgbColor::new(255, 136, 0))
            .await
            .unwrap();
        assert!(status.use_rgb);
        assert_eq!(status.rgb, RgbColor::new(255, 136, 0));
    }

    #[tokio::test]
    async fn set_tone_sends_tone() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/device/set_tone"))
            .and(query_param("tone", "80"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": status_json(true, 50)})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        client_for(&mock_server)
            .set_tone(&DeviceId::new("d1"), ColorTone::new(80).unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn server_error_message_is_passed_through() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"error": "device not found"})),
            )
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server)
            .get_status(&DeviceId::new("missing"))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "device not found");
    }

    #[tokio::test]
    async fn http_error_status_is_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).list_devices().await.unwrap_err();
        assert_eq!(
            err.message(),
            "connection failed: HTTP 500 - Internal Server Error"
        );
    }

    #[tokio::test]
    async fn malformed_body_is_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).list_devices().await.unwrap_err();
        assert!(err.message().starts_with("JSON parse error"));
    }

    #[tokio::test]
    async fn client_from_config() {
        let mock_server = MockServer::start().await;
        let address = mock_server.address();

        Mock::given(method("GET"))
            .and(path("/api/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = HttpConfig::new(address.ip().to_string())
            .with_port(address.port())
            .into_client()
            .unwrap();

        assert!(client.list_devices().await.unwrap().is_empty());
    }
}

// ============================================================================
// Full stack Tests
// ============================================================================

mod full_stack {
    use super::*;

    fn fast_config() -> ControllerConfig {
        ControllerConfig::default().with_verify_delay(Duration::from_millis(50))
    }

    #[tokio::test]
    async fn load_then_verified_command_with_recheck() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": "d1", "name": "Hall", "status": status_json(true, 80)}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        // the server answers with the state it saw before applying the change
        Mock::given(method("GET"))
            .and(path("/api/device/set_brightness"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": status_json(true, 80)})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/device/status"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": status_json(true, 20)})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = Arc::new(client_for(&mock_server));
        let bus = EventBus::new();
        let mut events = bus.subscribe();
        let mut list = DeviceListController::new(api, Arc::new(bus)).with_config(fast_config());

        assert_eq!(list.load().await.unwrap(), 1);
        let hall = &list.devices()[0];

        let outcome = hall
            .set_brightness(Brightness::new(20).unwrap())
            .await
            .unwrap();
        assert!(matches!(outcome, CommandOutcome::Unconfirmed { .. }));
        assert_eq!(hall.status().unwrap().brightness, Brightness::new(80).unwrap());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(hall.status().unwrap().brightness, Brightness::new(20).unwrap());
        assert!(!hall.is_loading());

        assert_eq!(
            events.try_recv().unwrap(),
            RenderEvent::Roster(RosterView::Loading)
        );
        let mut last_view = None;
        while let Ok(event) = events.try_recv() {
            if let RenderEvent::Device(view) = event {
                last_view = Some(view);
            }
        }
        let last_view = last_view.unwrap();
        assert_eq!(last_view.brightness_label().as_deref(), Some("20%"));
        assert!(!last_view.loading);
    }

    #[tokio::test]
    async fn failed_roster_load_leaves_list_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "login required"})))
            .mount(&mock_server)
            .await;

        let api = Arc::new(client_for(&mock_server));
        let mut list = DeviceListController::new(api, Arc::new(NullSurface));

        let err = list.load().await.unwrap_err();
        assert!(matches!(err, Error::FetchFailed(_)));
        assert!(list.is_empty());
        assert_eq!(list.error(), Some("login required"));
    }

    #[tokio::test]
    async fn offline_entry_fetches_status_once() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": "d9", "name": "Garage", "status": {"is_online": false}}]
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/device/status"))
            .and(query_param("id", "d9"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": status_json(false, 10)})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = Arc::new(client_for(&mock_server));
        let mut list = DeviceListController::new(api, Arc::new(NullSurface));
        list.load().await.unwrap();

        tokio::time::sleep(Duration::from_millis(200)).await;
        let garage = list.device(&DeviceId::new("d9")).unwrap();
        let expected = DeviceStatus::online(false)
            .with_brightness(Brightness::new(10).unwrap())
            .with_tone(ColorTone::new(50).unwrap());
        assert_eq!(garage.status(), Some(expected));
    }

    #[tokio::test]
    async fn slow_server_hits_request_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": "d1", "name": "Hall", "status": status_json(true, 80)}]
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/device/set_on"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": status_json(false, 80)}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let api = Arc::new(client_for(&mock_server));
        let config = ControllerConfig::default().with_request_timeout(Duration::from_millis(100));
        let mut list = DeviceListController::new(api, Arc::new(NullSurface)).with_config(config);
        list.load().await.unwrap();

        let hall = &list.devices()[0];
        let err = hall.set_power(false).await.unwrap_err();
        assert_eq!(err.display_message(), "request timed out after 100 ms");
        assert!(hall.status().unwrap().is_on);
        assert_eq!(
            hall.last_error().as_deref(),
            Some("request timed out after 100 ms")
        );
    }
}
