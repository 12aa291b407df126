//! Typed HTTP client for the drone backend REST API (spec §6, component D).

use std::str::FromStr;
use std::time::Duration;

use dronecmd_domain::{AltitudeMode, CommandResult, DroneStatus, ErrorCode};
use reqwest::{StatusCode, Url};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::error::BackendError;
use crate::wire::{
    AltitudeBody, DetectionBody, Envelope, HealthWire, MoveBody, PhotoBody, RotateBody,
    ScanResultWire, StreamingBody, SystemStatusWire, TakeoffBody, TrackingBody,
};

const USER_AGENT: &str = concat!("dronecmd-mcp/", env!("CARGO_PKG_VERSION"));

/// A thin, stateless wrapper over `reqwest`. Holds no drone state — the
/// Drone Service layer owns caching and precondition gating.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let base_url =
            Url::from_str(base_url).map_err(|_| BackendError::InvalidUrl(base_url.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(BackendError::InvalidUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(BackendError::Transport)?;
        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> Url {
        self.base_url
            .join(path)
            .unwrap_or_else(|_| self.base_url.clone())
    }

    async fn send_json<B: Serialize>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<serde_json::Value, BackendError> {
        let mut request = self.http.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Timeout
            } else {
                BackendError::Transport(e)
            }
        })?;

        let status = response.status();
        let body: Envelope = response.json().await.map_err(BackendError::Transport)?;

        match body {
            Envelope::Error {
                error_code,
                message,
                details,
                ..
            } => {
                if status == StatusCode::REQUEST_TIMEOUT {
                    return Err(BackendError::Timeout);
                }
                let error_code = parse_error_code(&error_code);
                Err(BackendError::Http {
                    status: status.as_u16(),
                    error_code,
                    message,
                    details,
                })
            }
            Envelope::Success { rest, .. } => Ok(rest),
        }
    }

    #[instrument(skip(self), fields(drone_id))]
    pub async fn status_all(&self) -> Result<Vec<DroneStatus>, BackendError> {
        let value = self
            .send_json::<()>(reqwest::Method::GET, "/api/drones/status", None)
            .await?;
        Ok(serde_json::from_value::<ScanResultWire>(value)?.drones)
    }

    #[instrument(skip(self))]
    pub async fn status_one(&self, drone_id: &str) -> Result<DroneStatus, BackendError> {
        let value = self
            .send_json::<()>(
                reqwest::Method::GET,
                &format!("/api/drones/{drone_id}/status"),
                None,
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    #[instrument(skip(self))]
    pub async fn scan(&self) -> Result<Vec<DroneStatus>, BackendError> {
        let value = self
            .send_json::<()>(reqwest::Method::POST, "/api/drones/scan", None)
            .await?;
        Ok(serde_json::from_value::<ScanResultWire>(value)?.drones)
    }

    #[instrument(skip(self))]
    pub async fn connect(&self, drone_id: &str) -> Result<(), BackendError> {
        self.send_json::<()>(
            reqwest::Method::POST,
            &format!("/api/drones/{drone_id}/connect"),
            None,
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn disconnect(&self, drone_id: &str) -> Result<(), BackendError> {
        self.send_json::<()>(
            reqwest::Method::POST,
            &format!("/api/drones/{drone_id}/disconnect"),
            None,
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn takeoff(
        &self,
        drone_id: &str,
        target_height: Option<f64>,
    ) -> Result<(), BackendError> {
        self.send_json(
            reqwest::Method::POST,
            &format!("/api/drones/{drone_id}/takeoff"),
            Some(&TakeoffBody { target_height }),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn land(&self, drone_id: &str) -> Result<(), BackendError> {
        self.send_json::<()>(
            reqwest::Method::POST,
            &format!("/api/drones/{drone_id}/land"),
            None,
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn move_drone(
        &self,
        drone_id: &str,
        direction: &str,
        distance: f64,
    ) -> Result<(), BackendError> {
        self.send_json(
            reqwest::Method::POST,
            &format!("/api/drones/{drone_id}/move"),
            Some(&MoveBody {
                direction: direction.to_string(),
                distance,
            }),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn rotate(
        &self,
        drone_id: &str,
        direction: &str,
        angle: f64,
    ) -> Result<(), BackendError> {
        self.send_json(
            reqwest::Method::POST,
            &format!("/api/drones/{drone_id}/rotate"),
            Some(&RotateBody {
                direction: direction.to_string(),
                angle,
            }),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn set_altitude(
        &self,
        drone_id: &str,
        target_height: f64,
        mode: AltitudeMode,
    ) -> Result<(), BackendError> {
        self.send_json(
            reqwest::Method::POST,
            &format!("/api/drones/{drone_id}/altitude"),
            Some(&AltitudeBody {
                target_height,
                mode,
            }),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn emergency_stop(&self, drone_id: &str) -> Result<(), BackendError> {
        self.send_json::<()>(
            reqwest::Method::POST,
            &format!("/api/drones/{drone_id}/emergency"),
            None,
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn take_photo(
        &self,
        drone_id: &str,
        quality: Option<String>,
        filename: Option<String>,
    ) -> Result<(), BackendError> {
        self.send_json(
            reqwest::Method::POST,
            &format!("/api/drones/{drone_id}/camera/photo"),
            Some(&PhotoBody { quality, filename }),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn streaming(
        &self,
        drone_id: &str,
        action: &str,
        quality: Option<String>,
        resolution: Option<String>,
    ) -> Result<(), BackendError> {
        self.send_json(
            reqwest::Method::POST,
            &format!("/api/drones/{drone_id}/camera/streaming"),
            Some(&StreamingBody {
                action: action.to_string(),
                quality,
                resolution,
            }),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn detect(
        &self,
        drone_id: &str,
        model_id: &str,
        confidence_threshold: Option<f64>,
    ) -> Result<(), BackendError> {
        self.send_json(
            reqwest::Method::POST,
            "/api/vision/detection",
            Some(&DetectionBody {
                drone_id: drone_id.to_string(),
                model_id: model_id.to_string(),
                confidence_threshold,
            }),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn track(
        &self,
        drone_id: &str,
        action: &str,
        model_id: &str,
        follow_distance: Option<f64>,
    ) -> Result<(), BackendError> {
        self.send_json(
            reqwest::Method::POST,
            "/api/vision/tracking",
            Some(&TrackingBody {
                action: action.to_string(),
                drone_id: drone_id.to_string(),
                model_id: model_id.to_string(),
                follow_distance,
            }),
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn system_status(&self) -> Result<SystemStatusWire, BackendError> {
        let value = self
            .send_json::<()>(reqwest::Method::GET, "/api/system/status", None)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthWire, BackendError> {
        let value = self
            .send_json::<()>(reqwest::Method::GET, "/api/system/health", None)
            .await?;
        Ok(serde_json::from_value(value)?)
    }
}

fn parse_error_code(raw: &str) -> Option<ErrorCode> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|e| warn!(raw, error = %e, "unrecognized backend error_code"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn connect_success_parses_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/drones/AA/connect"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"success": true, "message": "connected"})),
            )
            .mount(&server)
            .await;

        let client = BackendClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
        client.connect("AA").await.unwrap();
    }

    #[tokio::test]
    async fn drone_not_found_maps_to_error_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/drones/ZZ/status"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": true,
                "error_code": "DRONE_NOT_FOUND",
                "message": "no such drone"
            })))
            .mount(&server)
            .await;

        let client = BackendClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let err = client.status_one("ZZ").await.unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::DroneNotFound);
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn server_error_is_retryable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/drones/AA/land"))
            .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
                "error": true,
                "error_code": "BACKEND_UNAVAILABLE",
                "message": "overloaded"
            })))
            .mount(&server)
            .await;

        let client = BackendClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let err = client.land("AA").await.unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn rejects_non_http_scheme() {
        assert!(BackendClient::new("ftp://example.com", Duration::from_secs(1)).is_err());
    }
}

/// Helper used by callers that want a `CommandResult` rather than a raw
/// `BackendError` — normalizes the error into the domain taxonomy.
pub fn into_command_result(
    outcome: Result<(), BackendError>,
    message_on_success: &str,
    execution_ms: u64,
) -> CommandResult {
    match outcome {
        Ok(()) => CommandResult::success(message_on_success, execution_ms),
        Err(err) => {
            debug!(error = %err, "backend call failed");
            let domain_err = dronecmd_domain::DomainError::new(err.error_code(), err.to_string());
            CommandResult::failure(&domain_err, execution_ms)
        }
    }
}
