//! Errors raised by the Backend Client (spec §7's Execution class).

use dronecmd_domain::ErrorCode;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("request to backend timed out")]
    Timeout,

    #[error("could not reach backend: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {message}")]
    Http {
        status: u16,
        error_code: Option<ErrorCode>,
        message: String,
        details: Option<Value>,
    },

    #[error("malformed response body: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("invalid backend_url: {0}")]
    InvalidUrl(String),
}

impl BackendError {
    /// Transient failures (timeout, 5xx, connection refused) are retryable;
    /// 4xx responses are not (spec §7).
    pub fn is_retryable(&self) -> bool {
        match self {
            BackendError::Timeout => true,
            BackendError::Transport(e) => e.is_timeout() || e.is_connect(),
            BackendError::Http { status, .. } => *status >= 500,
            BackendError::Deserialize(_) | BackendError::InvalidUrl(_) => false,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            BackendError::Timeout => ErrorCode::CommandTimeout,
            BackendError::Transport(_) => ErrorCode::BackendUnavailable,
            BackendError::Http {
                error_code: Some(code),
                ..
            } => *code,
            BackendError::Http { status, .. } if *status >= 500 => ErrorCode::BackendUnavailable,
            BackendError::Http { .. } => ErrorCode::CommandFailed,
            BackendError::Deserialize(_) | BackendError::InvalidUrl(_) => ErrorCode::InternalError,
        }
    }
}
