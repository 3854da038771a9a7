//! Integration tests for the MCP protocol surface.

use serde_json::{json, Value};

/// Builds one JSON-RPC request line.
fn jsonrpc_request(id: u64, method: &str, params: Option<Value>) -> String {
    let mut req = json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
    });
    if let Some(p) = params {
        req["params"] = p;
    }
    serde_json::to_string(&req).unwrap()
}

mod protocol_tests {
    use serde_json::json;
    use stms_mcp::mcp::{
        JsonRpcError, JsonRpcId, JsonRpcRequest, JsonRpcResponse, ToolDescription, ToolResult,
        INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR,
    };

    #[test]
    fn test_json_rpc_id_roundtrip() {
        let id = JsonRpcId::Number(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let id: JsonRpcId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id, JsonRpcId::String("abc".to_string()));
    }

    #[test]
    fn test_request_with_params() {
        let request = JsonRpcRequest::new("tools/call", Some(7.into()))
            .with_params(json!({"name": "whoami"}));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["id"], 7);
        assert_eq!(value["params"]["name"], "whoami");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(PARSE_ERROR, -32700);
        assert_eq!(INVALID_REQUEST, -32600);
        assert_eq!(METHOD_NOT_FOUND, -32601);
        assert_eq!(INVALID_PARAMS, -32602);
        assert_eq!(INTERNAL_ERROR, -32603);
    }

    #[test]
    fn test_error_response_with_data() {
        let error = JsonRpcError::invalid_params("bad").with_data(json!({"field": "uri"}));
        let response = JsonRpcResponse::error(Some(1.into()), error);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["error"]["code"], INVALID_PARAMS);
        assert_eq!(value["error"]["data"]["field"], "uri");
    }

    #[test]
    fn test_tool_description_camel_case() {
        let tool = ToolDescription::new("whoami", "Who am I", json!({"type": "object"}));
        let value = serde_json::to_value(&tool).unwrap();
        assert_eq!(value["inputSchema"]["type"], "object");
    }

    #[test]
    fn test_tool_result_is_error_flag() {
        let ok = serde_json::to_value(ToolResult::success("fine")).unwrap();
        assert!(ok.get("isError").is_none());

        let err = serde_json::to_value(ToolResult::error("nope")).unwrap();
        assert_eq!(err["isError"], true);
    }
}

mod server_tests {
    use super::jsonrpc_request;
    use assert_cmd::Command;
    use serde_json::{json, Value};
    use stms_mcp::mcp::{INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR};
    use tempfile::TempDir;

    /// Feeds `lines` to `stms-mcp serve` and returns the parsed responses.
    fn run_session(lines: &[String]) -> Vec<Value> {
        let dir = TempDir::new().unwrap();
        let mut input = lines.join("\n");
        input.push('\n');

        let output = Command::cargo_bin("stms-mcp")
            .expect("binary is built")
            .current_dir(dir.path())
            .env_remove("STMS_STAGING_COOKIE")
            .env("STMS_STAGING_URL", "http://127.0.0.1:9")
            .arg("serve")
            .write_stdin(input)
            .output()
            .expect("serve runs");

        assert!(output.status.success());
        String::from_utf8(output.stdout)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).expect("stdout carries only JSON-RPC"))
            .collect()
    }

    #[test]
    fn test_full_session() {
        let responses = run_session(&[
            jsonrpc_request(1, "initialize", Some(json!({"protocolVersion": "2024-11-05"}))),
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#.to_string(),
            jsonrpc_request(2, "tools/list", None),
            jsonrpc_request(3, "resources/list", None),
            jsonrpc_request(4, "prompts/list", None),
            jsonrpc_request(5, "ping", None),
            jsonrpc_request(6, "shutdown", None),
        ]);

        assert_eq!(responses.len(), 6);

        assert_eq!(responses[0]["result"]["serverInfo"]["name"], "stms-mcp");
        assert_eq!(responses[1]["result"]["tools"].as_array().unwrap().len(), 22);
        assert_eq!(responses[2]["result"]["resources"][0]["uri"], "stms://config");
        assert_eq!(responses[3]["result"]["prompts"].as_array().unwrap().len(), 2);
        assert_eq!(responses[4]["id"], 5);
        assert_eq!(responses[5]["id"], 6);
    }

    #[test]
    fn test_errors_are_reported_in_band() {
        let responses = run_session(&[
            "{broken".to_string(),
            jsonrpc_request(1, "no/such/method", None),
            jsonrpc_request(2, "resources/read", None),
        ]);

        assert_eq!(responses.len(), 3);
        assert!(responses[0]["id"].is_null());
        assert_eq!(responses[0]["error"]["code"], PARSE_ERROR);
        assert_eq!(responses[1]["error"]["code"], METHOD_NOT_FOUND);
        assert_eq!(responses[2]["error"]["code"], INVALID_PARAMS);
    }

    #[test]
    fn test_tool_call_transport_failure() {
        let responses = run_session(&[jsonrpc_request(
            1,
            "tools/call",
            Some(json!({"name": "health_check", "arguments": {}})),
        )]);

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["result"]["isError"], true);
    }

    #[test]
    fn test_config_resource_reports_env_override() {
        let responses = run_session(&[jsonrpc_request(
            1,
            "resources/read",
            Some(json!({"uri": "stms://config"})),
        )]);

        let text = responses[0]["result"]["contents"][0]["text"].as_str().unwrap();
        let snapshot: Value = serde_json::from_str(text).unwrap();
        assert_eq!(snapshot["staging_url"], "http://127.0.0.1:9");
        assert_eq!(snapshot["cookie_configured"], false);
    }
}
