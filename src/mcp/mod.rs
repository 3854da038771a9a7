//! MCP server exposing the STMS staging API.
//!
//! ## Surface
//!
//! - 22 tools, one per staging endpoint plus `api_request` for anything else
//! - `stms://config` resource with the active staging URL
//! - `debug_user_access` and `debug_sync_issue` prompts
//!
//! ## Example
//!
//! ```ignore
//! use stms_mcp::mcp::McpServer;
//! use stms_mcp::types::config::Config;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load_or_default("stms-mcp.toml").unwrap();
//!     let mut server = McpServer::new(config).unwrap();
//!     server.run().await.unwrap();
//! }
//! ```

pub mod prompts;
mod protocol;
pub mod resources;
mod server;
mod tools;
mod transport;

pub use protocol::{
    CallToolParams, GetPromptParams, GetPromptResult, InitializeResult, JsonRpcError, JsonRpcId,
    JsonRpcRequest, JsonRpcResponse, ListPromptsResult, ListResourcesResult, ListToolsResult,
    PromptArgument, PromptDescription, PromptMessage, ReadResourceParams, ReadResourceResult,
    ResourceContents, ResourceDescription, ServerCapabilities, ServerInfo, ToolContent,
    ToolDescription, ToolResult, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND,
    PARSE_ERROR, PROTOCOL_VERSION,
};

pub use server::McpServer;
pub use tools::ToolHandler;
pub use transport::{LineTransport, StdioTransport};
