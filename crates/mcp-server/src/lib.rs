//! MCP tool surface for the drone fleet command-translation and dispatch
//! engine (component F, spec §4.6). Exposes every typed control/query op,
//! the natural-language entry point, batch execution, and the read-only
//! resource set as an `rmcp` stdio server.

mod batch_dispatcher;
mod config;
mod conversion;
mod handlers;
mod resources;
mod server;
mod tools;

pub use config::ServerConfig;
pub use handlers::DroneCommandServer;
pub use server::DroneMcpServer;

use std::sync::Arc;

use rmcp::ServiceExt;
use tracing::info;

/// Run the MCP server over stdio until the client disconnects or the
/// process receives a shutdown signal.
pub async fn run_mcp_server(
    service: Arc<dronecmd_drone_service::DroneService>,
    config: ServerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let command_server = Arc::new(DroneCommandServer::new(service, config));
    let shutdown = command_server.shutdown_token();
    let handler = DroneMcpServer::new(command_server);

    info!("starting drone command MCP server");
    let running = handler.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
    info!("MCP server running, waiting for client requests");

    tokio::select! {
        result = running.waiting() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("ctrl-c received, cancelling in-flight batch executions");
            shutdown.cancel();
        }
    }
    info!("MCP server shutting down");
    Ok(())
}
