//! Drone status and command-request types (spec §3).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Disconnected,
    Connected,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightStatus {
    Landed,
    TakingOff,
    Flying,
    Hovering,
    Landing,
}

impl FlightStatus {
    /// Whether the drone is airborne in a sense that in-flight-only
    /// commands (move/rotate/altitude/photo-in-air/land) require.
    pub fn is_in_flight(self) -> bool {
        !matches!(self, FlightStatus::Landed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Forward,
    Back,
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Forward => "forward",
            Direction::Back => "back",
            Direction::Clockwise => "clockwise",
            Direction::CounterClockwise => "counterclockwise",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AltitudeMode {
    Absolute,
    Relative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneStatus {
    pub drone_id: String,
    pub connection_status: ConnectionStatus,
    pub flight_status: FlightStatus,
    pub battery_level: f64,
    pub height: f64,
    pub temperature: f64,
    pub wifi_signal: f64,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

/// Minimum battery percentage required to accept a takeoff command (spec §4.5).
pub const MIN_TAKEOFF_BATTERY: f64 = 15.0;

/// One of the typed control operations from spec §3/§4.6, already
/// validated against its argument schema by the Tool Surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CommandRequest {
    Connect,
    Disconnect,
    Takeoff {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<f64>,
    },
    Land,
    Move {
        direction: Direction,
        distance: f64,
    },
    Rotate {
        direction: Direction,
        angle: f64,
    },
    SetAltitude {
        target: f64,
        mode: AltitudeMode,
    },
    EmergencyStop,
    TakePhoto {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quality: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filename: Option<String>,
    },
    Streaming {
        action: StreamAction,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quality: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resolution: Option<String>,
    },
    Detect {
        model_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        threshold: Option<f64>,
    },
    Track {
        action: TrackAction,
        model_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        follow_distance: Option<f64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StreamAction {
    Start,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrackAction {
    Start,
    Stop,
}

impl CommandRequest {
    /// The action name as it appears in the Pattern Library / taxonomy,
    /// used to look up preconditions and batch DAG effect sets.
    pub fn action_name(&self) -> &'static str {
        match self {
            CommandRequest::Connect => "connect",
            CommandRequest::Disconnect => "disconnect",
            CommandRequest::Takeoff { .. } => "takeoff",
            CommandRequest::Land => "land",
            CommandRequest::Move { .. } => "move",
            CommandRequest::Rotate { .. } => "rotate",
            CommandRequest::SetAltitude { .. } => "altitude",
            CommandRequest::EmergencyStop => "emergency_stop",
            CommandRequest::TakePhoto { .. } => "take_photo",
            CommandRequest::Streaming {
                action: StreamAction::Start,
                ..
            } => "start_streaming",
            CommandRequest::Streaming {
                action: StreamAction::Stop,
                ..
            } => "stop_streaming",
            CommandRequest::Detect { .. } => "detect_objects",
            CommandRequest::Track {
                action: TrackAction::Start,
                ..
            } => "start_tracking",
            CommandRequest::Track {
                action: TrackAction::Stop,
                ..
            } => "stop_tracking",
        }
    }

    /// Whether this command assumes the drone is already in flight
    /// (spec §4.5 precondition: `DRONE_NOT_READY` when landed).
    pub fn requires_in_flight(&self) -> bool {
        matches!(
            self,
            CommandRequest::Move { .. }
                | CommandRequest::Rotate { .. }
                | CommandRequest::SetAltitude { .. }
                | CommandRequest::Land
                | CommandRequest::TakePhoto { .. }
        )
    }

    /// Dangerous commands per spec §4.5/§9 — allowed, but require an
    /// explicit confirmation flag.
    pub fn is_dangerous(&self) -> bool {
        is_dangerous_action_name(self.action_name())
    }
}

/// Action names in spec §4.5/§9's dangerous-command set. `land_immediate`
/// and `reset` are not part of the typed `CommandRequest` union but can
/// still surface as an NLP-parsed action name, so this is checked by name
/// rather than only by `CommandRequest` variant.
pub fn is_dangerous_action_name(action: &str) -> bool {
    matches!(action, "emergency_stop" | "land_immediate" | "reset")
}

/// Result of dispatching a single command (spec §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<crate::error::ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub execution_ms: u64,
}

impl CommandResult {
    pub fn success(message: impl Into<String>, execution_ms: u64) -> Self {
        Self {
            success: true,
            message: message.into(),
            error_code: None,
            details: None,
            timestamp: chrono::Utc::now(),
            execution_ms,
        }
    }

    pub fn failure(
        error: &crate::error::DomainError,
        execution_ms: u64,
    ) -> Self {
        Self {
            success: false,
            message: error.message.clone(),
            error_code: Some(error.code),
            details: error.details.clone(),
            timestamp: chrono::Utc::now(),
            execution_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flight_status_in_flight() {
        assert!(!FlightStatus::Landed.is_in_flight());
        assert!(FlightStatus::Flying.is_in_flight());
        assert!(FlightStatus::Hovering.is_in_flight());
    }

    #[test]
    fn action_name_matches_taxonomy() {
        assert_eq!(CommandRequest::Connect.action_name(), "connect");
        assert_eq!(
            CommandRequest::Move {
                direction: Direction::Forward,
                distance: 200.0
            }
            .action_name(),
            "move"
        );
        assert_eq!(
            CommandRequest::Streaming {
                action: StreamAction::Start,
                quality: None,
                resolution: None
            }
            .action_name(),
            "start_streaming"
        );
    }

    #[test]
    fn requires_in_flight_covers_expected_actions() {
        assert!(CommandRequest::Land.requires_in_flight());
        assert!(!CommandRequest::Connect.requires_in_flight());
        assert!(!CommandRequest::Takeoff { height: None }.requires_in_flight());
    }

    #[test]
    fn only_emergency_stop_is_dangerous() {
        assert!(CommandRequest::EmergencyStop.is_dangerous());
        assert!(!CommandRequest::Land.is_dangerous());
    }
}
