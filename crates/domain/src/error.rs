//! Stable error taxonomy shared across every layer.
//!
//! `ErrorCode` is the contract the MCP caller sees: whatever Rust error type
//! produced a failure internally, it is normalized to one of these codes
//! before crossing the tool-surface boundary (spec §7).

use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry per error kind the system can produce (spec §7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Parsing
    ParsingError,
    UnknownAction,
    AmbiguousCommand,

    // Validation
    InvalidRequest,
    ParameterMissing,
    ParameterOutOfRange,
    ConflictingParameters,

    // Preconditions
    DroneNotFound,
    DroneDisconnected,
    DroneErrorState,
    DroneNotReady,
    DroneAlreadyConnected,
    LowBattery,
    DangerousCommandConfirmationRequired,

    // Execution
    CommandFailed,
    CommandTimeout,
    BackendUnavailable,

    // Batch
    BatchPlanCycle,
    Cancelled,
    SkippedDependency,

    // System
    InternalError,
}

impl ErrorCode {
    /// Whether a caller may safely retry a command that failed with this code.
    ///
    /// Transient backend failures (timeout, 5xx, connection refused) are
    /// retryable; validation, precondition, and 4xx-class failures are not.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            ErrorCode::CommandTimeout | ErrorCode::BackendUnavailable
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| "INTERNAL_ERROR".to_string());
        write!(f, "{s}")
    }
}

/// A user-visible failure: stable code, human message, and (for parsing
/// failures) ranked rephrasing suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_display_matches_taxonomy_string() {
        assert_eq!(ErrorCode::DroneNotFound.to_string(), "DRONE_NOT_FOUND");
        assert_eq!(ErrorCode::LowBattery.to_string(), "LOW_BATTERY");
        assert_eq!(
            ErrorCode::DangerousCommandConfirmationRequired.to_string(),
            "DANGEROUS_COMMAND_CONFIRMATION_REQUIRED"
        );
    }

    #[test]
    fn transient_backend_failures_are_retryable() {
        assert!(ErrorCode::CommandTimeout.is_retryable());
        assert!(ErrorCode::BackendUnavailable.is_retryable());
        assert!(!ErrorCode::InvalidRequest.is_retryable());
        assert!(!ErrorCode::DroneNotFound.is_retryable());
    }

    #[test]
    fn domain_error_display_includes_code_and_message() {
        let err = DomainError::new(ErrorCode::LowBattery, "battery at 10%");
        assert_eq!(err.to_string(), "LOW_BATTERY: battery at 10%");
    }
}
