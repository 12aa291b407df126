//! Business logic behind every tool and resource (spec §4.6). `server.rs`
//! only does argument decoding and `CallToolResult` wrapping; everything
//! that touches the Drone Service, NLP Engine, Confidence Evaluator, or
//! Batch Executor lives here so it can be unit-tested without going
//! through `rmcp`.

use std::collections::BTreeMap;
use std::sync::Arc;

use dronecmd_batch_executor::{execute, BatchInput, StopOnError};
use dronecmd_domain::{
    is_dangerous_action_name, BatchResult, CommandResult, DomainError, DroneStatus, ErrorCode,
    IntentContext, ParameterValue, ParsedIntent,
};
use dronecmd_drone_service::DroneService;
use dronecmd_nlp::tokenizer::{KeywordTokenizer, Tokenizer};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use crate::batch_dispatcher::DroneServiceDispatcher;
use crate::config::ServerConfig;
use crate::conversion;
use crate::tools::*;

pub struct DroneCommandServer {
    pub(crate) service: Arc<DroneService>,
    pub(crate) config: ServerConfig,
    pub(crate) dispatcher: Arc<DroneServiceDispatcher>,
    pub(crate) tokenizer: Box<dyn Tokenizer>,
    /// Cancels in-flight batch executions on server shutdown (SPEC_FULL.md
    /// §5's cooperative-cancellation requirement). Typed ops are single
    /// backend round trips already bounded by `reqwest`'s client timeout,
    /// so only the potentially long-running batch path needs a token.
    pub(crate) shutdown: CancellationToken,
}

impl DroneCommandServer {
    pub fn new(service: Arc<DroneService>, config: ServerConfig) -> Self {
        let dispatcher = Arc::new(DroneServiceDispatcher::new(service.clone()));
        Self {
            service,
            config,
            dispatcher,
            tokenizer: Box::new(KeywordTokenizer),
            shutdown: CancellationToken::new(),
        }
    }

    /// Signals any in-flight `execute_batch` call to stop dispatching
    /// further DAG layers. Called from `run_mcp_server` on process shutdown.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    fn confidence_threshold(&self, action: &str) -> f64 {
        if is_dangerous_action_name(action) {
            self.config.dangerous_confidence_threshold
        } else {
            self.config.nlp_confidence_threshold
        }
    }

    pub async fn execute_natural_language_command(
        &self,
        args: NaturalLanguageCommandArgs,
    ) -> Result<Value, DomainError> {
        let tokens = self.tokenizer.tokenize(&args.command);
        let intent = dronecmd_nlp::parse(&args.command, args.context.as_ref(), &tokens);
        let evaluation = dronecmd_confidence::evaluate(&intent, &tokens);
        let threshold = self.confidence_threshold(&intent.action);

        if !evaluation.is_executable(threshold) {
            return Ok(json!({
                "executed": false,
                "intent": intent,
                "evaluation": evaluation,
            }));
        }

        if args.dry_run {
            return Ok(json!({
                "executed": false,
                "dry_run": true,
                "intent": intent,
                "evaluation": evaluation,
            }));
        }

        let command = conversion::intent_to_command(&intent)?;
        let drone_id = required_drone_id(&intent)?;
        let result = self
            .service
            .dispatch(&drone_id, command, args.confirm_before_execution)
            .await;
        Ok(json!({
            "executed": true,
            "intent": intent,
            "evaluation": evaluation,
            "result": result,
        }))
    }

    pub async fn connect_drone(&self, args: DroneIdArgs) -> CommandResult {
        self.service
            .dispatch(&args.drone_id, dronecmd_domain::CommandRequest::Connect, false)
            .await
    }

    pub async fn disconnect_drone(&self, args: DroneIdArgs) -> CommandResult {
        self.service
            .dispatch(&args.drone_id, dronecmd_domain::CommandRequest::Disconnect, false)
            .await
    }

    pub async fn takeoff(&self, args: TakeoffArgs) -> CommandResult {
        self.service
            .dispatch(
                &args.drone_id,
                dronecmd_domain::CommandRequest::Takeoff { height: args.height },
                false,
            )
            .await
    }

    pub async fn land(&self, args: DroneIdArgs) -> CommandResult {
        self.service
            .dispatch(&args.drone_id, dronecmd_domain::CommandRequest::Land, false)
            .await
    }

    pub async fn move_drone(&self, args: MoveArgs) -> CommandResult {
        self.service
            .dispatch(
                &args.drone_id,
                dronecmd_domain::CommandRequest::Move {
                    direction: args.direction,
                    distance: args.distance,
                },
                false,
            )
            .await
    }

    pub async fn rotate_drone(&self, args: RotateArgs) -> CommandResult {
        self.service
            .dispatch(
                &args.drone_id,
                dronecmd_domain::CommandRequest::Rotate {
                    direction: args.direction,
                    angle: args.angle,
                },
                false,
            )
            .await
    }

    pub async fn set_altitude(&self, args: SetAltitudeArgs) -> CommandResult {
        self.service
            .dispatch(
                &args.drone_id,
                dronecmd_domain::CommandRequest::SetAltitude {
                    target: args.target,
                    mode: args.mode,
                },
                false,
            )
            .await
    }

    pub async fn emergency_stop(&self, args: EmergencyStopArgs) -> CommandResult {
        self.service
            .dispatch(
                &args.drone_id,
                dronecmd_domain::CommandRequest::EmergencyStop,
                args.confirm,
            )
            .await
    }

    pub async fn take_photo(&self, args: TakePhotoArgs) -> CommandResult {
        self.service
            .dispatch(
                &args.drone_id,
                dronecmd_domain::CommandRequest::TakePhoto {
                    quality: args.quality,
                    filename: args.filename,
                },
                false,
            )
            .await
    }

    pub async fn start_streaming(&self, args: StreamingArgs) -> CommandResult {
        self.service
            .dispatch(
                &args.drone_id,
                dronecmd_domain::CommandRequest::Streaming {
                    action: dronecmd_domain::StreamAction::Start,
                    quality: args.quality,
                    resolution: args.resolution,
                },
                false,
            )
            .await
    }

    pub async fn stop_streaming(&self, args: DroneIdArgs) -> CommandResult {
        self.service
            .dispatch(
                &args.drone_id,
                dronecmd_domain::CommandRequest::Streaming {
                    action: dronecmd_domain::StreamAction::Stop,
                    quality: None,
                    resolution: None,
                },
                false,
            )
            .await
    }

    pub async fn detect(&self, args: DetectArgs) -> CommandResult {
        self.service
            .dispatch(
                &args.drone_id,
                dronecmd_domain::CommandRequest::Detect {
                    model_id: args.model_id,
                    threshold: args.threshold,
                },
                false,
            )
            .await
    }

    pub async fn start_tracking(&self, args: StartTrackingArgs) -> CommandResult {
        self.service
            .dispatch(
                &args.drone_id,
                dronecmd_domain::CommandRequest::Track {
                    action: dronecmd_domain::TrackAction::Start,
                    model_id: args.model_id,
                    follow_distance: args.follow_distance,
                },
                false,
            )
            .await
    }

    pub async fn stop_tracking(&self, args: DroneIdArgs) -> CommandResult {
        self.service
            .dispatch(
                &args.drone_id,
                dronecmd_domain::CommandRequest::Track {
                    action: dronecmd_domain::TrackAction::Stop,
                    model_id: String::new(),
                    follow_distance: None,
                },
                false,
            )
            .await
    }

    pub async fn get_drones(&self) -> Result<Vec<DroneStatus>, DomainError> {
        self.service.get_status_all().await.map_err(backend_err)
    }

    pub async fn get_drone_status(
        &self,
        args: OptionalDroneIdArgs,
    ) -> Result<Value, DomainError> {
        match args.drone_id {
            Some(id) => {
                let status = self.service.get_status(&id).await.map_err(backend_err)?;
                Ok(json!(status))
            }
            None => {
                let statuses = self.service.get_status_all().await.map_err(backend_err)?;
                Ok(json!(statuses))
            }
        }
    }

    pub async fn get_system_status(&self) -> Result<Value, DomainError> {
        let status = self.service.system_status().await.map_err(backend_err)?;
        Ok(json!({"status": status.status, "details": status.details}))
    }

    /// Backend health plus a cache-freshness "degraded" classification
    /// (SPEC_FULL.md §E: degraded when the "all" cache entry is older than
    /// 3x the configured TTL, meaning the backend has gone quiet even
    /// though the last health probe succeeded).
    pub async fn health_check(&self) -> Result<Value, DomainError> {
        let health = self.service.health().await.map_err(backend_err)?;
        let cache_age = self.service.status_cache_age().await;
        let stale = cache_age
            .map(|age| age > self.service.cache_ttl() * 3)
            .unwrap_or(false);
        let status = if stale {
            "degraded".to_string()
        } else {
            health.status.clone()
        };
        Ok(json!({
            "status": status,
            "backend_status": health.status,
            "backend_timestamp": health.timestamp,
            "status_cache_age_ms": cache_age.map(|d| d.as_millis() as u64),
        }))
    }

    pub async fn scan_drones(&self) -> Result<Vec<DroneStatus>, DomainError> {
        self.service.scan_for_drones().await.map_err(backend_err)
    }

    pub async fn execute_batch(&self, args: ExecuteBatchArgs) -> Result<BatchResult, DomainError> {
        let inputs = args
            .commands
            .iter()
            .map(entry_to_input)
            .collect::<Result<Vec<_>, _>>()?;
        let plan = dronecmd_batch_executor::build(&inputs, None)?;
        let mode = args.execution_mode.unwrap_or(self.config.batch_default_mode);
        let stop_on_error = if args.stop_on_error {
            StopOnError::Yes
        } else {
            StopOnError::No
        };

        tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => Err(DomainError::new(
                ErrorCode::Cancelled,
                "server is shutting down; batch execution aborted",
            )),
            result = execute(&plan, mode, stop_on_error, self.dispatcher.clone()) => Ok(result),
        }
    }
}

fn required_drone_id(intent: &ParsedIntent) -> Result<String, DomainError> {
    intent.drone_id().map(str::to_string).ok_or_else(|| {
        DomainError::new(
            ErrorCode::ParameterMissing,
            "command did not name a drone_id and none could be inferred",
        )
    })
}

fn backend_err(err: dronecmd_backend_client::BackendError) -> DomainError {
    DomainError::new(err.error_code(), err.to_string())
        .with_details(json!({"retryable": err.is_retryable()}))
}

fn json_value_to_parameter(value: &Value) -> Option<ParameterValue> {
    match value {
        Value::Number(n) => n.as_f64().map(ParameterValue::Number),
        Value::String(s) => Some(ParameterValue::Text(s.clone())),
        Value::Bool(b) => Some(ParameterValue::Flag(*b)),
        _ => None,
    }
}

fn entry_to_input(entry: &BatchCommandEntry) -> Result<BatchInput, DomainError> {
    if let Some(text) = &entry.text {
        return Ok(BatchInput::Text(text.clone()));
    }

    let action = entry.op.clone().ok_or_else(|| {
        DomainError::new(
            ErrorCode::InvalidRequest,
            "batch entry needs either 'text' or 'op'",
        )
    })?;

    let mut parameters = BTreeMap::new();
    if let Some(object) = entry.params.as_object() {
        for (key, value) in object {
            if let Some(param) = json_value_to_parameter(value) {
                parameters.insert(key.clone(), param);
            }
        }
    }
    if let Some(drone_id) = &entry.drone_id {
        parameters.insert("drone_id".to_string(), ParameterValue::Text(drone_id.clone()));
    }

    Ok(BatchInput::Intent(ParsedIntent {
        action: action.clone(),
        parameters,
        confidence: 1.0,
        original_command: action,
        context: None::<IntentContext>,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dronecmd_backend_client::BackendClient;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn drone_status_json(drone_id: &str, battery: f64, flying: bool) -> serde_json::Value {
        json!({
            "drone_id": drone_id,
            "connection_status": "connected",
            "flight_status": if flying { "flying" } else { "landed" },
            "battery_level": battery,
            "height": 0.0,
            "temperature": 25.0,
            "wifi_signal": 90.0,
            "last_updated": "2026-01-01T00:00:00Z",
        })
    }

    async fn server_with(service: Arc<DroneService>) -> DroneCommandServer {
        DroneCommandServer::new(service, ServerConfig::default())
    }

    #[tokio::test]
    async fn low_confidence_nl_command_is_not_executed() {
        let mock = MockServer::start().await;
        let client = BackendClient::new(&mock.uri(), Duration::from_secs(5)).unwrap();
        let service = Arc::new(DroneService::new(client, Duration::from_secs(30)));
        let server = server_with(service).await;

        let result = server
            .execute_natural_language_command(NaturalLanguageCommandArgs {
                command: "asdf qwerty zxcv".to_string(),
                context: None,
                dry_run: false,
                confirm_before_execution: false,
            })
            .await
            .unwrap();

        assert_eq!(result["executed"], json!(false));
    }

    #[tokio::test]
    async fn emergency_stop_without_confirm_is_rejected_before_reaching_backend() {
        let mock = MockServer::start().await;
        // No mock mounted: if the service reached the backend this test
        // would fail with a connection/404 error instead of the expected
        // confirmation-required failure.
        let client = BackendClient::new(&mock.uri(), Duration::from_secs(5)).unwrap();
        let service = Arc::new(DroneService::new(client, Duration::from_secs(30)));
        let server = server_with(service).await;

        let result = server
            .emergency_stop(EmergencyStopArgs {
                drone_id: "AA".to_string(),
                confirm: false,
            })
            .await;

        assert!(!result.success);
        assert_eq!(
            result.error_code.unwrap(),
            ErrorCode::DangerousCommandConfirmationRequired
        );
    }

    #[tokio::test]
    async fn takeoff_dispatches_through_backend_when_battery_is_sufficient() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/drones/AA/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(drone_status_json("AA", 80.0, false)))
            .mount(&mock)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/drones/AA/takeoff"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "message": "airborne"})),
            )
            .mount(&mock)
            .await;

        let client = BackendClient::new(&mock.uri(), Duration::from_secs(5)).unwrap();
        let service = Arc::new(DroneService::new(client, Duration::from_secs(30)));
        let server = server_with(service).await;

        let result = server
            .takeoff(TakeoffArgs {
                drone_id: "AA".to_string(),
                height: Some(150.0),
            })
            .await;

        assert!(result.success);
    }

    #[tokio::test]
    async fn takeoff_is_rejected_at_low_battery_without_calling_backend() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/drones/AA/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(drone_status_json("AA", 10.0, false)))
            .mount(&mock)
            .await;

        let client = BackendClient::new(&mock.uri(), Duration::from_secs(5)).unwrap();
        let service = Arc::new(DroneService::new(client, Duration::from_secs(30)));
        let server = server_with(service).await;

        let result = server
            .takeoff(TakeoffArgs {
                drone_id: "AA".to_string(),
                height: None,
            })
            .await;

        assert!(!result.success);
        assert_eq!(result.error_code.unwrap(), ErrorCode::LowBattery);
    }

    #[tokio::test]
    async fn execute_batch_runs_independent_commands() {
        let mock = MockServer::start().await;
        for drone_id in ["AA", "BB"] {
            Mock::given(method("GET"))
                .and(path(format!("/api/drones/{drone_id}/status")))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(drone_status_json(drone_id, 80.0, false)),
                )
                .mount(&mock)
                .await;
            Mock::given(method("POST"))
                .and(path(format!("/api/drones/{drone_id}/takeoff")))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({"success": true, "message": "airborne"})),
                )
                .mount(&mock)
                .await;
        }

        let client = BackendClient::new(&mock.uri(), Duration::from_secs(5)).unwrap();
        let service = Arc::new(DroneService::new(client, Duration::from_secs(30)));
        let server = server_with(service).await;

        let result = server
            .execute_batch(ExecuteBatchArgs {
                commands: vec![
                    BatchCommandEntry {
                        text: None,
                        op: Some("takeoff".to_string()),
                        drone_id: Some("AA".to_string()),
                        params: json!({}),
                    },
                    BatchCommandEntry {
                        text: None,
                        op: Some("takeoff".to_string()),
                        drone_id: Some("BB".to_string()),
                        params: json!({}),
                    },
                ],
                execution_mode: Some(dronecmd_domain::ExecutionMode::Parallel),
                stop_on_error: false,
            })
            .await
            .unwrap();

        assert_eq!(result.summary.total, 2);
        assert_eq!(result.summary.succeeded, 2);
    }
}
