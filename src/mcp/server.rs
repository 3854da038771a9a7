//! MCP server for the STMS staging API.
//!
//! Reads one request per line, dispatches it and writes at most one response.
//! Requests are handled sequentially.

use std::io::{BufRead, BufReader, BufWriter, Stdin, Stdout, Write};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::types::config::{Config, StagingConfig};
use crate::{StmsError, StmsResult};

use super::prompts;
use super::protocol::{
    CallToolParams, GetPromptParams, InitializeResult, JsonRpcError, JsonRpcId, JsonRpcRequest,
    JsonRpcResponse, ListPromptsResult, ListResourcesResult, ListToolsResult, ReadResourceParams,
    ReadResourceResult,
};
use super::resources;
use super::tools::ToolHandler;
use super::transport::{LineTransport, StdioTransport};

/// MCP server over a line transport. Defaults to stdin/stdout.
pub struct McpServer<R = BufReader<Stdin>, W = BufWriter<Stdout>> {
    transport: LineTransport<R, W>,
    tools: ToolHandler,
    staging: Arc<StagingConfig>,
}

impl McpServer {
    /// Creates a server bound to stdin/stdout.
    pub fn new(config: Config) -> StmsResult<Self> {
        Self::with_transport(config, StdioTransport::stdio())
    }
}

impl<R: BufRead, W: Write> McpServer<R, W> {
    /// Creates a server over an arbitrary transport.
    pub fn with_transport(config: Config, transport: LineTransport<R, W>) -> StmsResult<Self> {
        let staging = Arc::new(config.staging);
        let tools = ToolHandler::new(Arc::clone(&staging))?;

        Ok(Self {
            transport,
            tools,
            staging,
        })
    }

    /// Runs the server until the input is exhausted.
    pub async fn run(&mut self) -> StmsResult<()> {
        tracing::info!(staging_url = %self.staging.base_url, "STMS MCP server starting");

        loop {
            let request = match self.transport.read_message() {
                Ok(Some(request)) => request,
                Ok(None) => {
                    tracing::info!("Client disconnected");
                    break;
                }
                Err(StmsError::Json(e)) => {
                    tracing::warn!(error = %e, "Discarding malformed message");
                    let error = match e.classify() {
                        serde_json::error::Category::Data => JsonRpcError::invalid_request(),
                        _ => JsonRpcError::parse_error(),
                    };
                    self.transport
                        .write_response(&JsonRpcResponse::error(None, error))?;
                    continue;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read message");
                    break;
                }
            };

            let is_notification = request.is_notification();
            let response = self.handle_request(request).await;

            if !is_notification {
                self.transport.write_response(&response)?;
            }
        }

        tracing::info!("STMS MCP server stopped");
        Ok(())
    }

    /// Dispatches a single request.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        tracing::debug!(method = %request.method, "Handling request");

        let JsonRpcRequest {
            id, method, params, ..
        } = request;

        match method.as_str() {
            // Lifecycle
            "initialize" => self.handle_initialize(id),
            "initialized" | "notifications/initialized" => {
                tracing::info!("Client initialization complete");
                JsonRpcResponse::success(id, json!({}))
            }
            "ping" => JsonRpcResponse::success(id, json!({})),
            "shutdown" => {
                tracing::info!("Client requested shutdown");
                JsonRpcResponse::success(id, Value::Null)
            }

            // Tools
            "tools/list" => JsonRpcResponse::from_serializable(
                id,
                &ListToolsResult {
                    tools: ToolHandler::list_tools(),
                },
            ),
            "tools/call" => self.handle_tools_call(id, params).await,

            // Resources
            "resources/list" => JsonRpcResponse::from_serializable(
                id,
                &ListResourcesResult {
                    resources: resources::list_resources(),
                },
            ),
            "resources/read" => self.handle_resources_read(id, params),

            // Prompts
            "prompts/list" => JsonRpcResponse::from_serializable(
                id,
                &ListPromptsResult {
                    prompts: prompts::list_prompts(),
                },
            ),
            "prompts/get" => self.handle_prompts_get(id, params),

            _ => JsonRpcResponse::error(id, JsonRpcError::method_not_found(&method)),
        }
    }

    /// Consumes the server, returning its transport.
    pub fn into_transport(self) -> LineTransport<R, W> {
        self.transport
    }

    fn handle_initialize(&self, id: Option<JsonRpcId>) -> JsonRpcResponse {
        tracing::info!("Client initializing connection");
        JsonRpcResponse::from_serializable(id, &InitializeResult::default())
    }

    async fn handle_tools_call(&self, id: Option<JsonRpcId>, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match parse_params(params) {
            Ok(params) => params,
            Err(error) => return JsonRpcResponse::error(id, error),
        };

        let result = self
            .tools
            .handle_tool_call(&params.name, params.arguments)
            .await;

        JsonRpcResponse::from_serializable(id, &result)
    }

    fn handle_resources_read(&self, id: Option<JsonRpcId>, params: Option<Value>) -> JsonRpcResponse {
        let params: ReadResourceParams = match parse_params(params) {
            Ok(params) => params,
            Err(error) => return JsonRpcResponse::error(id, error),
        };

        match resources::read_resource(&params.uri, &self.staging) {
            Some(contents) => JsonRpcResponse::from_serializable(
                id,
                &ReadResourceResult {
                    contents: vec![contents],
                },
            ),
            None => JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_params(format!("Unknown resource: {}", params.uri)),
            ),
        }
    }

    fn handle_prompts_get(&self, id: Option<JsonRpcId>, params: Option<Value>) -> JsonRpcResponse {
        let params: GetPromptParams = match parse_params(params) {
            Ok(params) => params,
            Err(error) => return JsonRpcResponse::error(id, error),
        };

        match prompts::get_prompt(&params.name, &params.arguments) {
            Ok(result) => JsonRpcResponse::from_serializable(id, &result),
            Err(e) => JsonRpcResponse::error(id, JsonRpcError::invalid_params(e.to_string())),
        }
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, JsonRpcError> {
    let params = params.ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;
    serde_json::from_value(params)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))
}
