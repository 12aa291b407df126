//! Component E: drone status cache, precondition gating, dangerous-command
//! confirmation, and command dispatch (spec §4.5).

pub mod cache;
pub mod precondition;
pub mod service;

pub use service::DroneService;

#[cfg(test)]
mod tests {
    use super::*;
    use dronecmd_domain::CommandRequest;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn service_against(server: &MockServer) -> DroneService {
        let client =
            dronecmd_backend_client::BackendClient::new(&server.uri(), Duration::from_secs(5))
                .unwrap();
        DroneService::new(client, Duration::from_millis(30_000))
    }

    fn status_body(drone_id: &str, battery: f64, flight: &str) -> serde_json::Value {
        serde_json::json!({
            "success": true,
            "drone_id": drone_id,
            "connection_status": "connected",
            "flight_status": flight,
            "battery_level": battery,
            "height": 0.0,
            "temperature": 25.0,
            "wifi_signal": 90.0,
            "last_updated": "2026-01-01T00:00:00Z",
        })
    }

    #[tokio::test]
    async fn low_battery_rejects_takeoff_without_dispatch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/drones/AA/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(status_body("AA", 10.0, "landed")))
            .mount(&server)
            .await;
        // No takeoff mock registered: if dispatched, wiremock would 404 and
        // the test would see a different error code than LOW_BATTERY.

        let service = service_against(&server).await;
        let result = service
            .dispatch("AA", CommandRequest::Takeoff { height: None }, false)
            .await;

        assert!(!result.success);
        assert_eq!(result.error_code, Some(dronecmd_domain::ErrorCode::LowBattery));
    }

    #[tokio::test]
    async fn dangerous_command_without_confirmation_is_rejected() {
        let server = MockServer::start().await;
        let service = service_against(&server).await;
        let result = service
            .dispatch("AA", CommandRequest::EmergencyStop, false)
            .await;
        assert!(!result.success);
        assert_eq!(
            result.error_code,
            Some(dronecmd_domain::ErrorCode::DangerousCommandConfirmationRequired)
        );
    }

    #[tokio::test]
    async fn successful_dispatch_invalidates_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/drones/AA/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(status_body("AA", 80.0, "flying")))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/drones/AA/land"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"success": true, "message": "landed"})),
            )
            .mount(&server)
            .await;

        let service = service_against(&server).await;
        // Warm the cache.
        service.get_status("AA").await.unwrap();

        let result = service.dispatch("AA", CommandRequest::Land, false).await;
        assert!(result.success);
        assert!(service.status_cache_age().await.is_none());
    }
}
