//! Entry point for the drone fleet command-translation and dispatch engine:
//! wires the Backend Client, Drone Service, and MCP Tool Surface together
//! from resolved configuration and runs the stdio server until shutdown.

mod config;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
pub use config::{Config, ConfigError};
use dronecmd_backend_client::BackendClient;
use dronecmd_domain::ExecutionMode;
use dronecmd_drone_service::DroneService;
use dronecmd_mcp_server::ServerConfig;

/// Drone fleet command-translation and dispatch MCP server.
#[derive(Parser, Debug, Clone)]
#[command(name = "dronecmd", author, version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.dronecmd/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend base URL; must be http or https
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Per-request HTTP timeout, in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Drone-status cache entry lifetime, in milliseconds
    #[arg(long)]
    pub status_cache_ttl_ms: Option<u64>,

    /// Minimum overall confidence to execute a parsed command
    #[arg(long)]
    pub nlp_confidence_threshold: Option<f64>,

    /// Minimum confidence for takeoff/land/emergency_stop regardless of
    /// nlp_confidence_threshold
    #[arg(long)]
    pub dangerous_confidence_threshold: Option<f64>,

    /// Default execution mode for execute_batch when the caller omits one
    #[arg(long, value_enum)]
    pub batch_default_mode: Option<CliExecutionMode>,

    /// Log level: debug, info, warn, or error
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum CliExecutionMode {
    Sequential,
    Parallel,
    Optimized,
}

impl From<CliExecutionMode> for ExecutionMode {
    fn from(mode: CliExecutionMode) -> Self {
        match mode {
            CliExecutionMode::Sequential => ExecutionMode::Sequential,
            CliExecutionMode::Parallel => ExecutionMode::Parallel,
            CliExecutionMode::Optimized => ExecutionMode::Optimized,
        }
    }
}

/// Loads the file layer, overlays `DRONECMD_*` env vars, then applies CLI
/// flags (CLI wins), and validates the merged result.
pub fn resolve_config(args: &Args) -> Result<Config, ConfigError> {
    let mut resolved = Config::load(args.config.as_deref())?.apply_env();

    if let Some(v) = &args.backend_url {
        resolved.backend_url = v.clone();
    }
    if let Some(v) = args.timeout_ms {
        resolved.timeout_ms = v;
    }
    if let Some(v) = args.status_cache_ttl_ms {
        resolved.status_cache_ttl_ms = v;
    }
    if let Some(v) = args.nlp_confidence_threshold {
        resolved.nlp_confidence_threshold = v;
    }
    if let Some(v) = args.dangerous_confidence_threshold {
        resolved.dangerous_confidence_threshold = v;
    }
    if let Some(v) = args.batch_default_mode {
        resolved.batch_default_mode = v.into();
    }
    if let Some(v) = &args.log_level {
        resolved.log_level = v.clone();
    }

    resolved.validate()?;
    Ok(resolved)
}

pub fn init_tracing(log_level: &str) {
    let directive = match log_level {
        "debug" => tracing::Level::DEBUG,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };
    // stdio carries the MCP transport; all logging goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the Backend Client, Drone Service, and Tool Surface from
/// resolved configuration and serves MCP over stdio until the client
/// disconnects or the process receives ctrl-c.
pub async fn run(args: Args) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    init_tracing(&config.log_level);

    tracing::info!(
        backend_url = %config.backend_url,
        timeout_ms = config.timeout_ms,
        status_cache_ttl_ms = config.status_cache_ttl_ms,
        batch_default_mode = ?config.batch_default_mode,
        "resolved configuration"
    );

    let client = BackendClient::new(&config.backend_url, Duration::from_millis(config.timeout_ms))?;
    let service = Arc::new(DroneService::new(
        client,
        Duration::from_millis(config.status_cache_ttl_ms),
    ));
    let server_config = ServerConfig {
        nlp_confidence_threshold: config.nlp_confidence_threshold,
        dangerous_confidence_threshold: config.dangerous_confidence_threshold,
        batch_default_mode: config.batch_default_mode,
    };

    dronecmd_mcp_server::run_mcp_server(service, server_config)
        .await
        .map_err(|err| anyhow::anyhow!("MCP server error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            config: Some(PathBuf::from("/nonexistent/dronecmd.toml")),
            backend_url: None,
            timeout_ms: None,
            status_cache_ttl_ms: None,
            nlp_confidence_threshold: None,
            dangerous_confidence_threshold: None,
            batch_default_mode: None,
            log_level: None,
        }
    }

    #[test]
    fn cli_flags_override_defaults() {
        let mut args = base_args();
        args.backend_url = Some("https://fleet.example.com".to_string());
        args.batch_default_mode = Some(CliExecutionMode::Parallel);

        let resolved = resolve_config(&args).unwrap();
        assert_eq!(resolved.backend_url, "https://fleet.example.com");
        assert_eq!(resolved.batch_default_mode, ExecutionMode::Parallel);
    }

    #[test]
    fn invalid_threshold_fails_loudly() {
        let mut args = base_args();
        args.nlp_confidence_threshold = Some(2.0);
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn invalid_backend_url_fails_loudly() {
        let mut args = base_args();
        args.backend_url = Some("not-a-url".to_string());
        assert!(resolve_config(&args).is_err());
    }
}
