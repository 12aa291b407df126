//! Translates a [`ParsedIntent`] (from a natural-language command, or built
//! directly by the Tool Surface for a typed batch entry) into the
//! [`CommandRequest`] the Drone Service dispatches (spec §4.6/§4.7).
//!
//! Parameter names here match the Pattern Library's table
//! (`direction`, `distance`, `height`, `angle`, `quality`, `filename`,
//! `target_class`, `confidence_threshold`, `follow_distance`), since that is
//! what [`dronecmd_nlp::parse`] populates `ParsedIntent::parameters` with.

use dronecmd_domain::{
    AltitudeMode, CommandRequest, Direction, DomainError, ErrorCode, ParameterValue, ParsedIntent,
    StreamAction, TrackAction,
};

fn text(intent: &ParsedIntent, name: &str) -> Option<String> {
    intent
        .parameters
        .get(name)
        .and_then(|v| v.as_text())
        .map(str::to_string)
}

fn number(intent: &ParsedIntent, name: &str) -> Option<f64> {
    intent.parameters.get(name).and_then(ParameterValue::as_number)
}

fn required_number(intent: &ParsedIntent, name: &str) -> Result<f64, DomainError> {
    number(intent, name).ok_or_else(|| missing(name))
}

fn required_text(intent: &ParsedIntent, name: &str) -> Result<String, DomainError> {
    text(intent, name).ok_or_else(|| missing(name))
}

fn missing(name: &str) -> DomainError {
    DomainError::new(
        ErrorCode::ParameterMissing,
        format!("required parameter '{name}' was not supplied"),
    )
}

fn parse_direction(intent: &ParsedIntent) -> Result<Direction, DomainError> {
    let raw = required_text(intent, "direction")?;
    match raw.as_str() {
        "up" => Ok(Direction::Up),
        "down" => Ok(Direction::Down),
        "left" => Ok(Direction::Left),
        "right" => Ok(Direction::Right),
        "forward" => Ok(Direction::Forward),
        "back" => Ok(Direction::Back),
        "clockwise" => Ok(Direction::Clockwise),
        "counterclockwise" => Ok(Direction::CounterClockwise),
        other => Err(DomainError::new(
            ErrorCode::ParameterOutOfRange,
            format!("unrecognized direction '{other}'"),
        )),
    }
}

/// Build the typed command the Drone Service dispatches for `intent.action`.
/// Returns `Err` for the three query-only actions (`get_status`,
/// `health_check`, and the NLP-unknown action) — those never reach the
/// Drone Service's `dispatch`, they are answered directly by the Tool
/// Surface's query ops.
pub fn intent_to_command(intent: &ParsedIntent) -> Result<CommandRequest, DomainError> {
    match intent.action.as_str() {
        "connect" => Ok(CommandRequest::Connect),
        "disconnect" => Ok(CommandRequest::Disconnect),
        "takeoff" => Ok(CommandRequest::Takeoff {
            height: number(intent, "height"),
        }),
        "land" => Ok(CommandRequest::Land),
        "move" => Ok(CommandRequest::Move {
            direction: parse_direction(intent)?,
            distance: required_number(intent, "distance")?,
        }),
        "rotate" => Ok(CommandRequest::Rotate {
            direction: parse_direction(intent)?,
            angle: required_number(intent, "angle")?,
        }),
        // The NL pattern for "altitude" only extracts `height`; a mode is
        // not spoken naturally, so absolute is the reasonable default (the
        // typed `set_altitude` tool accepts an explicit mode instead).
        "altitude" => Ok(CommandRequest::SetAltitude {
            target: required_number(intent, "height")?,
            mode: AltitudeMode::Absolute,
        }),
        "emergency_stop" => Ok(CommandRequest::EmergencyStop),
        "take_photo" => Ok(CommandRequest::TakePhoto {
            quality: text(intent, "quality"),
            filename: text(intent, "filename"),
        }),
        "start_streaming" => Ok(CommandRequest::Streaming {
            action: StreamAction::Start,
            quality: text(intent, "quality"),
            resolution: None,
        }),
        "stop_streaming" => Ok(CommandRequest::Streaming {
            action: StreamAction::Stop,
            quality: None,
            resolution: None,
        }),
        "detect_objects" => Ok(CommandRequest::Detect {
            model_id: required_text(intent, "target_class")?,
            threshold: number(intent, "confidence_threshold"),
        }),
        "start_tracking" => Ok(CommandRequest::Track {
            action: TrackAction::Start,
            model_id: required_text(intent, "target_class")?,
            follow_distance: number(intent, "follow_distance"),
        }),
        // `target_class` is optional for the spoken "stop tracking" phrase
        // (there is nothing left to name); the backend is expected to
        // ignore `model_id` for a stop action.
        "stop_tracking" => Ok(CommandRequest::Track {
            action: TrackAction::Stop,
            model_id: text(intent, "target_class").unwrap_or_default(),
            follow_distance: None,
        }),
        other => Err(DomainError::new(
            ErrorCode::UnknownAction,
            format!("'{other}' has no corresponding drone command"),
        )),
    }
}
