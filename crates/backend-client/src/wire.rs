//! Wire-format request/response bodies (spec §6).

use dronecmd_domain::AltitudeMode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct TakeoffBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_height: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct MoveBody {
    pub direction: String,
    pub distance: f64,
}

#[derive(Debug, Serialize)]
pub struct RotateBody {
    pub direction: String,
    pub angle: f64,
}

#[derive(Debug, Serialize)]
pub struct AltitudeBody {
    pub target_height: f64,
    pub mode: AltitudeMode,
}

#[derive(Debug, Serialize)]
pub struct PhotoBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StreamingBody {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DetectionBody {
    pub drone_id: String,
    pub model_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_threshold: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct TrackingBody {
    pub action: String,
    pub drone_id: String,
    pub model_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_distance: Option<f64>,
}

/// Either a success or an error envelope (spec §6: `{success:true,...}` vs
/// `{error:true, error_code, message, details?, timestamp}`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    Error {
        error: bool,
        error_code: String,
        message: String,
        #[serde(default)]
        details: Option<Value>,
        #[serde(default)]
        timestamp: Option<String>,
    },
    Success {
        success: bool,
        #[serde(default)]
        message: Option<String>,
        #[serde(flatten)]
        rest: Value,
    },
}

#[derive(Debug, Deserialize)]
pub struct SystemStatusWire {
    pub status: String,
    #[serde(default)]
    pub details: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct HealthWire {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ScanResultWire {
    pub drones: Vec<dronecmd_domain::DroneStatus>,
}
