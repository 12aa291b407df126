//! Typed argument schemas for every MCP tool (spec §4.6). One struct per
//! operation; `schemars` turns each into the `input_schema` advertised by
//! `list_tools`.

use std::sync::Arc;

use dronecmd_domain::{Direction, ExecutionMode};
use rmcp::model::{JsonObject, Tool};
use schemars::{schema_for, JsonSchema};
use serde::Deserialize;

fn schema_object<T: JsonSchema>() -> JsonObject {
    let root = schema_for!(T);
    let mut value = serde_json::to_value(&root.schema).unwrap_or_else(|_| serde_json::json!({}));
    if let Some(obj) = value.as_object_mut() {
        if !root.definitions.is_empty() {
            obj.insert(
                "definitions".to_string(),
                serde_json::to_value(&root.definitions).unwrap_or_default(),
            );
        }
    }
    value.as_object().cloned().unwrap_or_default()
}

pub fn tool<T: JsonSchema>(name: &'static str, description: &'static str) -> Tool {
    Tool::new(
        std::borrow::Cow::Borrowed(name),
        std::borrow::Cow::Borrowed(description),
        Arc::new(schema_object::<T>()),
    )
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NaturalLanguageCommandArgs {
    /// The command as spoken or typed by the operator, e.g. "前に2m移動して".
    pub command: String,
    /// Optional context, currently the single default drone to resolve an
    /// omitted `drone_id` against.
    #[serde(default)]
    pub context: Option<dronecmd_domain::IntentContext>,
    /// When true, evaluate and return the plan without dispatching it.
    #[serde(default)]
    pub dry_run: bool,
    /// Must be true for the command to execute if it parses to a dangerous
    /// action (`emergency_stop`/`land_immediate`/`reset`).
    #[serde(default)]
    pub confirm_before_execution: bool,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DroneIdArgs {
    pub drone_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TakeoffArgs {
    pub drone_id: String,
    #[serde(default)]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MoveArgs {
    pub drone_id: String,
    pub direction: Direction,
    pub distance: f64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RotateArgs {
    pub drone_id: String,
    pub direction: Direction,
    pub angle: f64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SetAltitudeArgs {
    pub drone_id: String,
    pub target: f64,
    pub mode: dronecmd_domain::AltitudeMode,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EmergencyStopArgs {
    pub drone_id: String,
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TakePhotoArgs {
    pub drone_id: String,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StreamingArgs {
    pub drone_id: String,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DetectArgs {
    pub drone_id: String,
    pub model_id: String,
    #[serde(default)]
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StartTrackingArgs {
    pub drone_id: String,
    pub model_id: String,
    #[serde(default)]
    pub follow_distance: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct OptionalDroneIdArgs {
    #[serde(default)]
    pub drone_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoArgs {}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BatchCommandEntry {
    /// Either a natural-language string or a typed op name; mutually
    /// exclusive with `op`.
    #[serde(default)]
    pub text: Option<String>,
    /// A typed control-op name (e.g. "takeoff") plus its arguments as a
    /// flat JSON object, mirroring the corresponding typed tool's schema.
    #[serde(default)]
    pub op: Option<String>,
    #[serde(default)]
    pub drone_id: Option<String>,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExecuteBatchArgs {
    pub commands: Vec<BatchCommandEntry>,
    #[serde(default)]
    pub execution_mode: Option<ExecutionMode>,
    #[serde(default)]
    pub stop_on_error: bool,
}

/// Every tool this server advertises (spec §4.6's full operation set).
pub fn all_tools() -> Vec<Tool> {
    vec![
        tool::<NaturalLanguageCommandArgs>(
            "execute_natural_language_command",
            "Parse a natural-language drone command, score its confidence, and \
             dispatch it if executable. Set dry_run to preview without dispatching.",
        ),
        tool::<DroneIdArgs>("connect_drone", "Connect to a drone by id."),
        tool::<DroneIdArgs>("disconnect_drone", "Disconnect from a drone by id."),
        tool::<TakeoffArgs>("takeoff", "Take off, optionally to a target height (cm)."),
        tool::<DroneIdArgs>("land", "Land the drone."),
        tool::<MoveArgs>("move_drone", "Move the drone a distance in a direction."),
        tool::<RotateArgs>("rotate_drone", "Rotate the drone by an angle."),
        tool::<SetAltitudeArgs>("set_altitude", "Set the drone's target altitude."),
        tool::<EmergencyStopArgs>(
            "emergency_stop",
            "Immediately stop the drone. Requires confirm=true.",
        ),
        tool::<TakePhotoArgs>("take_photo", "Capture a photo."),
        tool::<StreamingArgs>("start_streaming", "Start the camera video stream."),
        tool::<DroneIdArgs>("stop_streaming", "Stop the camera video stream."),
        tool::<DetectArgs>("detect", "Run object detection against the live feed."),
        tool::<StartTrackingArgs>("start_tracking", "Start visually tracking a target class."),
        tool::<DroneIdArgs>("stop_tracking", "Stop visual tracking."),
        tool::<NoArgs>("get_drones", "List all known drones and their status."),
        tool::<OptionalDroneIdArgs>(
            "get_drone_status",
            "Get the status of one drone, or all drones if drone_id is omitted.",
        ),
        tool::<NoArgs>("get_system_status", "Get overall backend system status."),
        tool::<NoArgs>("health_check", "Check backend reachability and cache freshness."),
        tool::<NoArgs>("scan_drones", "Discover drones on the local network."),
        tool::<ExecuteBatchArgs>(
            "execute_batch",
            "Plan and execute a batch of commands as a dependency-ordered DAG.",
        ),
    ]
}
