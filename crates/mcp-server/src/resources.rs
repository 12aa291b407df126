//! Read-only resource surface (spec §4.6): each URI resolves by calling
//! the corresponding query op and serializing as JSON with a top-level
//! `timestamp` (spec §6).

use rmcp::model::{AnnotateAble, RawResource, Resource};
use rmcp::ErrorData as McpError;
use serde_json::{json, Value};

use crate::handlers::DroneCommandServer;

pub const AVAILABLE_DRONES_URI: &str = "drone://available";
pub const SYSTEM_STATUS_URI: &str = "system://status";
pub const SYSTEM_LOGS_URI: &str = "system://logs";
const DRONE_STATUS_PREFIX: &str = "drone://status/";

pub fn list() -> Vec<Resource> {
    vec![
        RawResource::new(AVAILABLE_DRONES_URI, "Available drones")
            .no_annotation(),
        RawResource::new(format!("{DRONE_STATUS_PREFIX}{{id}}"), "Drone status")
            .no_annotation(),
        RawResource::new(SYSTEM_STATUS_URI, "System status").no_annotation(),
        RawResource::new(SYSTEM_LOGS_URI, "System logs").no_annotation(),
    ]
}

fn with_timestamp(payload: Value) -> Value {
    json!({
        "timestamp": chrono::Utc::now(),
        "payload": payload,
    })
}

pub async fn read(server: &DroneCommandServer, uri: &str) -> Result<Value, McpError> {
    if uri == AVAILABLE_DRONES_URI {
        let drones = server
            .get_drones()
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        return Ok(with_timestamp(json!(drones)));
    }

    if let Some(id) = uri.strip_prefix(DRONE_STATUS_PREFIX) {
        let status = server
            .get_drone_status(crate::tools::OptionalDroneIdArgs {
                drone_id: Some(id.to_string()),
            })
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        return Ok(with_timestamp(status));
    }

    if uri == SYSTEM_STATUS_URI {
        let status = server
            .get_system_status()
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        return Ok(with_timestamp(status));
    }

    if uri == SYSTEM_LOGS_URI {
        // No log-shipping backend endpoint exists (no `/api/system/logs`
        // route); this resource reports health instead of 404ing, which
        // is the only system-level signal this server can offer at this URI.
        let health = server
            .health_check()
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        return Ok(with_timestamp(json!({"note": "no backend log endpoint; reporting health", "health": health})));
    }

    Err(McpError::invalid_params(format!("unknown resource: {uri}"), None))
}
