//! Runtime parameters the Tool Surface needs from configuration (spec §6's
//! table) that are not already owned by the Drone Service (which takes its
//! own `backend_url`/`timeout_ms`/`status_cache_ttl_ms` at construction).

use dronecmd_domain::ExecutionMode;

/// Confidence thresholds and batch default, threaded in from `dronecmd-cli`.
#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    /// Minimum overall confidence to execute a parsed command (spec §6
    /// `nlp_confidence_threshold`, default 0.7).
    pub nlp_confidence_threshold: f64,
    /// Minimum overall confidence for a dangerous action (takeoff/land/
    /// emergency_stop) regardless of `nlp_confidence_threshold` (spec §6
    /// `dangerous_confidence_threshold`, default 0.85). Enforced here rather
    /// than inside `dronecmd-confidence`, whose own threshold constant is a
    /// compile-time default by the same static-table philosophy as the
    /// Pattern Library (spec §3/§9) — this field lets an operator tighten it
    /// without touching that crate.
    pub dangerous_confidence_threshold: f64,
    /// Execution mode used by `execute_batch` when the caller omits one.
    pub batch_default_mode: ExecutionMode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            nlp_confidence_threshold: dronecmd_confidence::DEFAULT_CONFIDENCE_THRESHOLD,
            dangerous_confidence_threshold: 0.85,
            batch_default_mode: ExecutionMode::Optimized,
        }
    }
}
