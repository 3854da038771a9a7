//! MCP tool handler.
//!
//! Lists the fixed catalog and runs tool calls against the staging API. A
//! successful call (including a non-JSON body or an unsupported verb) is
//! returned as the envelope; transport failures and missing arguments fail
//! the call with `isError: true`.

use std::sync::Arc;

use serde_json::Value;

use crate::catalog::Tool;
use crate::client::StagingApi;
use crate::types::config::StagingConfig;
use crate::{StmsError, StmsResult};

use super::protocol::{ToolDescription, ToolResult};

/// Handler for the MCP tools.
pub struct ToolHandler {
    api: StagingApi,
}

impl ToolHandler {
    /// Creates a handler bound to the given staging configuration.
    pub fn new(config: Arc<StagingConfig>) -> StmsResult<Self> {
        Ok(Self {
            api: StagingApi::new(config)?,
        })
    }

    /// Lists every tool in the catalog.
    pub fn list_tools() -> Vec<ToolDescription> {
        Tool::ALL
            .into_iter()
            .map(|tool| ToolDescription::new(tool.name(), tool.description(), tool.input_schema()))
            .collect()
    }

    /// Runs one tool call.
    pub async fn handle_tool_call(&self, name: &str, arguments: Value) -> ToolResult {
        let Some(tool) = Tool::from_name(name) else {
            tracing::warn!(tool = name, "Unknown tool requested");
            return ToolResult::error(StmsError::UnknownTool(name.to_string()).to_string());
        };

        tracing::info!(tool = name, "Processing tool call");

        match tool.call(&self.api, arguments).await {
            Ok(envelope) => ToolResult::success_json(&envelope.to_value()),
            Err(e @ StmsError::InvalidArguments(_)) => ToolResult::error(e.to_string()),
            Err(e) => {
                if e.is_transport() {
                    tracing::warn!(tool = name, error = %e, "Staging API unreachable");
                } else {
                    tracing::error!(tool = name, error = %e, "Tool call failed");
                }
                ToolResult::error(format!("{} failed: {}", name, e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn handler(base_url: &str) -> ToolHandler {
        ToolHandler::new(Arc::new(StagingConfig::new(base_url, "session=test"))).unwrap()
    }

    fn result_json(result: &ToolResult) -> Value {
        serde_json::from_str(result.content[0].as_text()).unwrap()
    }

    #[test]
    fn test_list_tools() {
        let tools = ToolHandler::list_tools();
        assert_eq!(tools.len(), 22);

        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert!(names.contains(&"whoami"));
        assert!(names.contains(&"give_access_to_user"));
        assert!(names.contains(&"get_report"));
        assert!(names.contains(&"api_request"));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let result = handler("http://127.0.0.1:9").handle_tool_call("nope", json!({})).await;
        assert!(result.is_error);
        assert_eq!(result.content[0].as_text(), "Unknown tool: nope");
    }

    #[tokio::test]
    async fn test_missing_argument_makes_no_call() {
        let server = MockServer::start().await;

        let result = handler(&server.uri())
            .handle_tool_call("get_user_access", json!({}))
            .await;

        assert!(result.is_error);
        assert!(result.content[0].as_text().starts_with("Invalid parameters"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_envelope_returned_as_json_text() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/dropdowns"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
            .mount(&server)
            .await;

        let result = handler(&server.uri())
            .handle_tool_call("get_dropdowns", Value::Null)
            .await;

        assert!(!result.is_error);
        assert_eq!(
            result_json(&result),
            json!({"status_code": 500, "data": {"detail": "boom"}})
        );
    }

    #[tokio::test]
    async fn test_unsupported_method_is_not_an_error_result() {
        let server = MockServer::start().await;

        let result = handler(&server.uri())
            .handle_tool_call("api_request", json!({"method": "PATCH", "path": "/x"}))
            .await;

        assert!(!result.is_error);
        assert_eq!(result_json(&result), json!({"error": "Unsupported method: PATCH"}));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_fails_the_call() {
        let result = handler("http://127.0.0.1:9")
            .handle_tool_call("health_check", json!({}))
            .await;

        assert!(result.is_error);
        assert!(result.content[0].as_text().starts_with("health_check failed"));
    }
}
