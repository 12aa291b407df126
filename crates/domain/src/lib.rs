//! Shared data model and error taxonomy for the drone command-translation
//! and dispatch engine.
//!
//! Every other crate in this workspace depends on this one; it carries no
//! I/O and no async runtime, only plain data and the error taxonomy (spec
//! §3, §7).

pub mod batch;
pub mod drone;
pub mod error;
pub mod intent;

pub use batch::{BatchNodeResult, BatchResult, BatchSummary, ExecutionMode, NodeOutcome};
pub use drone::{
    is_dangerous_action_name, AltitudeMode, CommandRequest, CommandResult, ConnectionStatus,
    Direction, DroneStatus, FlightStatus, StreamAction, TrackAction, MIN_TAKEOFF_BATTERY,
};
pub use error::{DomainError, ErrorCode};
pub use intent::{
    ConfidenceEvaluation, IntentContext, ParameterType, ParameterValue, ParsedIntent,
    QualityFlags, Suggestion, Token, UNKNOWN_ACTION,
};
