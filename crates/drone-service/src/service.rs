//! Component E: sits between the Tool Surface and the Backend Client
//! (spec §4.5).

use std::time::{Duration, Instant};

use dronecmd_backend_client::{BackendClient, BackendError};
use dronecmd_domain::{CommandRequest, CommandResult, DomainError, DroneStatus, ErrorCode};
use tokio::sync::RwLock;
use tracing::{instrument, warn};

use crate::cache::StatusCache;
use crate::precondition;

pub struct DroneService {
    client: BackendClient,
    cache: RwLock<StatusCache>,
    ttl: Duration,
}

impl DroneService {
    pub fn new(client: BackendClient, ttl: Duration) -> Self {
        Self {
            client,
            cache: RwLock::new(StatusCache::default()),
            ttl,
        }
    }

    /// Cached-if-fresh status of one drone, refetching from the backend
    /// on a miss (spec §4.5.1).
    #[instrument(skip(self))]
    pub async fn get_status(&self, drone_id: &str) -> Result<DroneStatus, BackendError> {
        if let Some(cached) = self.cache.read().await.get_one(drone_id, self.ttl) {
            return Ok(cached);
        }
        let status = self.client.status_one(drone_id).await?;
        self.cache.write().await.put_one(status.clone());
        Ok(status)
    }

    #[instrument(skip(self))]
    pub async fn get_status_all(&self) -> Result<Vec<DroneStatus>, BackendError> {
        if let Some(cached) = self.cache.read().await.get_all(self.ttl) {
            return Ok(cached);
        }
        let statuses = self.client.status_all().await?;
        self.cache.write().await.put_all(statuses.clone());
        Ok(statuses)
    }

    /// `scan_for_drones` invalidates the entire cache and always issues a
    /// fresh backend fetch (spec §4.5.1, §8's round-trip law).
    #[instrument(skip(self))]
    pub async fn scan_for_drones(&self) -> Result<Vec<DroneStatus>, BackendError> {
        self.cache.write().await.invalidate_all();
        let statuses = self.client.scan().await?;
        self.cache.write().await.put_all(statuses.clone());
        Ok(statuses)
    }

    /// Age of the "all" cache entry, used by the Tool Surface's readiness
    /// check to decide "degraded" (SPEC_FULL.md ambient-stack addition).
    pub async fn status_cache_age(&self) -> Option<Duration> {
        self.cache.read().await.all_entry_age()
    }

    /// The configured TTL, so the readiness check can classify "degraded"
    /// relative to a multiple of it without duplicating the constant.
    pub fn cache_ttl(&self) -> Duration {
        self.ttl
    }

    /// Pass-throughs for the two system-wide (non-drone-scoped) backend
    /// endpoints. Not cached — there is nothing per-drone to key on.
    #[instrument(skip(self))]
    pub async fn system_status(
        &self,
    ) -> Result<dronecmd_backend_client::wire::SystemStatusWire, BackendError> {
        self.client.system_status().await
    }

    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<dronecmd_backend_client::wire::HealthWire, BackendError> {
        self.client.health().await
    }

    /// Gate, then dispatch, a typed command against one drone (spec
    /// §4.5.2–§4.5.4). Never calls the backend if preconditions reject.
    #[instrument(skip(self, command), fields(action = command.action_name()))]
    pub async fn dispatch(
        &self,
        drone_id: &str,
        command: CommandRequest,
        confirmed: bool,
    ) -> CommandResult {
        let started = Instant::now();
        let action_name = command.action_name();

        if let Err(err) = precondition::check_confirmation(action_name, confirmed) {
            return CommandResult::failure(&err, elapsed_ms(started));
        }

        match self.get_status(drone_id).await {
            Ok(status) => {
                if let Err(err) = precondition::check(Some(&status), action_name) {
                    return CommandResult::failure(&err, elapsed_ms(started));
                }
            }
            Err(err) => {
                warn!(drone_id, error = %err, "status fetch failed before dispatch; proceeding and letting the backend be the authority");
            }
        }

        let outcome = self.send(drone_id, &command).await;
        self.cache.write().await.invalidate_drone(drone_id);

        match outcome {
            Ok(()) => CommandResult::success(
                format!("{action_name} dispatched to {drone_id}"),
                elapsed_ms(started),
            ),
            Err(err) => {
                let domain_err = DomainError::new(err.error_code(), err.to_string())
                    .with_details(serde_json::json!({"retryable": err.is_retryable()}));
                CommandResult::failure(&domain_err, elapsed_ms(started))
            }
        }
    }

    async fn send(&self, drone_id: &str, command: &CommandRequest) -> Result<(), BackendError> {
        use dronecmd_domain::{StreamAction, TrackAction};

        match command {
            CommandRequest::Connect => self.client.connect(drone_id).await,
            CommandRequest::Disconnect => self.client.disconnect(drone_id).await,
            CommandRequest::Takeoff { height } => self.client.takeoff(drone_id, *height).await,
            CommandRequest::Land => self.client.land(drone_id).await,
            CommandRequest::Move { direction, distance } => {
                self.client
                    .move_drone(drone_id, direction.as_str(), *distance)
                    .await
            }
            CommandRequest::Rotate { direction, angle } => {
                self.client.rotate(drone_id, direction.as_str(), *angle).await
            }
            CommandRequest::SetAltitude { target, mode } => {
                self.client.set_altitude(drone_id, *target, *mode).await
            }
            CommandRequest::EmergencyStop => self.client.emergency_stop(drone_id).await,
            CommandRequest::TakePhoto { quality, filename } => {
                self.client
                    .take_photo(drone_id, quality.clone(), filename.clone())
                    .await
            }
            CommandRequest::Streaming {
                action,
                quality,
                resolution,
            } => {
                let action_str = match action {
                    StreamAction::Start => "start",
                    StreamAction::Stop => "stop",
                };
                self.client
                    .streaming(drone_id, action_str, quality.clone(), resolution.clone())
                    .await
            }
            CommandRequest::Detect {
                model_id,
                threshold,
            } => self.client.detect(drone_id, model_id, *threshold).await,
            CommandRequest::Track {
                action,
                model_id,
                follow_distance,
            } => {
                let action_str = match action {
                    TrackAction::Start => "start",
                    TrackAction::Stop => "stop",
                };
                self.client
                    .track(drone_id, action_str, model_id, *follow_distance)
                    .await
            }
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
