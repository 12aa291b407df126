//! The `rmcp::ServerHandler` implementation: argument decoding and
//! `CallToolResult`/`ReadResourceResult` wrapping around [`DroneCommandServer`]
//! (spec §4.6), with one `Tool` per operation.

use std::sync::Arc;

use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ListResourcesResult, ListToolsResult,
    PaginatedRequestParam, ReadResourceRequestParam, ReadResourceResult, ResourceContents,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::ErrorData as McpError;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::handlers::DroneCommandServer;
use crate::resources;
use crate::tools::{self, *};

#[derive(Clone)]
pub struct DroneMcpServer {
    inner: Arc<DroneCommandServer>,
}

impl DroneMcpServer {
    pub fn new(inner: Arc<DroneCommandServer>) -> Self {
        Self { inner }
    }
}

fn decode<T: DeserializeOwned>(request: &CallToolRequestParam) -> Result<T, McpError> {
    let arguments = request
        .arguments
        .clone()
        .map(|args| Value::Object(args.into_iter().collect()))
        .unwrap_or(Value::Object(Default::default()));
    serde_json::from_value(arguments).map_err(|err| McpError::invalid_params(err.to_string(), None))
}

fn success(value: Value) -> CallToolResult {
    let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
    CallToolResult {
        content: vec![Content::text(text)],
        structured_content: Some(value),
        is_error: Some(false),
        meta: None,
    }
}

fn failure(err: impl std::fmt::Display) -> CallToolResult {
    CallToolResult {
        content: vec![Content::text(err.to_string())],
        structured_content: None,
        is_error: Some(true),
        meta: None,
    }
}

impl ServerHandler for DroneMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_tool_list_changed()
                .enable_resources()
                .build(),
            ..ServerInfo::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        async move {
            Ok(ListToolsResult {
                tools: tools::all_tools(),
                next_cursor: None,
            })
        }
    }

    fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListResourcesResult, McpError>> + Send + '_ {
        async move {
            Ok(ListResourcesResult {
                resources: resources::list(),
                next_cursor: None,
            })
        }
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let payload = resources::read(&self.inner, &request.uri).await?;
        let text = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string());
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: request.uri,
                mime_type: Some("application/json".to_string()),
                text,
            }],
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let request_id = Uuid::new_v4();
        let name = request.name.clone();
        let span = info_span!("mcp_tool_call", tool = %name, request_id = %request_id);
        async move {
            info!("dispatching tool call");
            self.dispatch(&request).await
        }
        .instrument(span)
        .await
    }
}

impl DroneMcpServer {
    async fn dispatch(&self, request: &CallToolRequestParam) -> Result<CallToolResult, McpError> {
        let server = &self.inner;
        let result = match request.name.as_ref() {
            "execute_natural_language_command" => {
                let args: NaturalLanguageCommandArgs = decode(request)?;
                match server.execute_natural_language_command(args).await {
                    Ok(v) => success(v),
                    Err(e) => failure(e),
                }
            }
            "connect_drone" => run(server.connect_drone(decode(request)?).await),
            "disconnect_drone" => run(server.disconnect_drone(decode(request)?).await),
            "takeoff" => run(server.takeoff(decode(request)?).await),
            "land" => run(server.land(decode(request)?).await),
            "move_drone" => run(server.move_drone(decode(request)?).await),
            "rotate_drone" => run(server.rotate_drone(decode(request)?).await),
            "set_altitude" => run(server.set_altitude(decode(request)?).await),
            "emergency_stop" => run(server.emergency_stop(decode(request)?).await),
            "take_photo" => run(server.take_photo(decode(request)?).await),
            "start_streaming" => run(server.start_streaming(decode(request)?).await),
            "stop_streaming" => run(server.stop_streaming(decode(request)?).await),
            "detect" => run(server.detect(decode(request)?).await),
            "start_tracking" => run(server.start_tracking(decode(request)?).await),
            "stop_tracking" => run(server.stop_tracking(decode(request)?).await),
            "get_drones" => match server.get_drones().await {
                Ok(drones) => success(json!(drones)),
                Err(e) => failure(e),
            },
            "get_drone_status" => {
                let args: OptionalDroneIdArgs = decode(request)?;
                match server.get_drone_status(args).await {
                    Ok(v) => success(v),
                    Err(e) => failure(e),
                }
            }
            "get_system_status" => match server.get_system_status().await {
                Ok(v) => success(v),
                Err(e) => failure(e),
            },
            "health_check" => match server.health_check().await {
                Ok(v) => success(v),
                Err(e) => failure(e),
            },
            "scan_drones" => match server.scan_drones().await {
                Ok(drones) => success(json!(drones)),
                Err(e) => failure(e),
            },
            "execute_batch" => {
                let args: ExecuteBatchArgs = decode(request)?;
                match server.execute_batch(args).await {
                    Ok(result) => success(json!(result)),
                    Err(e) => failure(e),
                }
            }
            other => {
                return Err(McpError::invalid_params(format!("unknown tool: {other}"), None));
            }
        };
        Ok(result)
    }
}

/// Typed ops always succeed at the transport layer — failure is reported
/// as a `CommandResult{success: false, ...}`, never an `McpError`.
fn run(result: dronecmd_domain::CommandResult) -> CallToolResult {
    let is_error = !result.success;
    let value = json!(result);
    let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
    CallToolResult {
        content: vec![Content::text(text)],
        structured_content: Some(value),
        is_error: Some(is_error),
        meta: None,
    }
}
