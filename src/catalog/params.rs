//! Tool arguments and the payload each one produces.
//!
//! Optional filters that are absent, `null` or empty are left out of the
//! payload entirely; the API treats a missing key differently from an empty
//! value.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::client::ApiRequest;
use crate::{StmsError, StmsResult};

/// Scope `give_access_to_user` always sends.
pub const DEFAULT_SCOPE_TYPE: &str = "default";

/// Reason attached to access requests created through this server.
pub const ACCESS_REQUEST_REASON: &str = "Access granted by MCP server";

/// Deserializes tool arguments. Missing arguments count as `{}`.
pub fn parse_args<T: DeserializeOwned>(arguments: Value) -> StmsResult<T> {
    let arguments = if arguments.is_null() {
        Value::Object(Map::new())
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| StmsError::invalid_arguments(e.to_string()))
}

fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

fn default_shift_page_size() -> i64 {
    50
}

fn default_scope_type() -> String {
    DEFAULT_SCOPE_TYPE.to_string()
}

fn default_report_format() -> String {
    "json".to_string()
}

fn to_payload<T: Serialize>(args: &T) -> Value {
    serde_json::to_value(args).unwrap_or_else(|_| Value::Object(Map::new()))
}

/// Arguments carrying only a user code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCodeArgs {
    pub idp_user_code: String,
}

/// Arguments for `give_access_to_user`.
#[derive(Debug, Clone, Deserialize)]
pub struct GiveAccessArgs {
    pub idp_user_code: String,
    pub entity_type: String,
    pub entity_code: String,
    #[serde(default = "default_scope_type")]
    pub scope_type: String,
    #[serde(default)]
    pub scope_code: Option<String>,
}

impl GiveAccessArgs {
    /// Whether the caller asked for a scope other than the one sent.
    pub fn requests_custom_scope(&self) -> bool {
        self.scope_type != DEFAULT_SCOPE_TYPE || !is_unset(&self.scope_code)
    }

    pub fn into_request(self) -> ApiRequest {
        // The upstream contract currently expects the default scope; caller
        // scope values are accepted but not forwarded.
        if self.requests_custom_scope() {
            tracing::warn!(
                scope_type = %self.scope_type,
                scope_code = ?self.scope_code,
                "give_access_to_user ignores caller scope and sends the default scope"
            );
        }

        ApiRequest::post(
            "/access-control/access-requests",
            json!({
                "action": "create",
                "idp_user_code": self.idp_user_code,
                "entity": {
                    "entity_type": self.entity_type,
                    "entity_code": self.entity_code,
                },
                "scope": {
                    "scope_type": DEFAULT_SCOPE_TYPE,
                    "scope_code": null,
                },
                "reason": ACCESS_REQUEST_REASON,
            }),
        )
    }
}

/// Arguments for `list_users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersArgs {
    #[serde(default, skip_serializing_if = "is_unset")]
    pub facility_code: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub designation_code: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub search: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

/// Arguments for `check_has_access`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckHasAccessArgs {
    pub entity_type: String,
    pub entity_code: String,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub scope_type: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub scope_code: Option<String>,
}

/// Arguments for `get_access_request_history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRequestHistoryArgs {
    #[serde(default, skip_serializing_if = "is_unset")]
    pub idp_user_code: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub status: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

/// Arguments for `push_event`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushEventArgs {
    pub event_type: String,
    pub payload: Map<String, Value>,
}

/// Arguments for `list_shifts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListShiftsArgs {
    #[serde(default, skip_serializing_if = "is_unset")]
    pub facility_code: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub shift_type: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_shift_page_size")]
    pub page_size: i64,
}

/// Arguments for `get_roster`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterArgs {
    pub facility_code: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub designation_code: Option<String>,
}

/// Arguments shared by the onboarding and offboarding dashboards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskListArgs {
    #[serde(default, skip_serializing_if = "is_unset")]
    pub facility_code: Option<String>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub status: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

/// Output format accepted by `get_report`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
    Tsv,
}

impl ReportFormat {
    /// Unknown formats fall back to JSON.
    pub fn from_arg(format: &str) -> Self {
        match format {
            "csv" => ReportFormat::Csv,
            "tsv" => ReportFormat::Tsv,
            _ => ReportFormat::Json,
        }
    }

    /// `Accept` header for textual formats.
    pub fn accept(&self) -> Option<&'static str> {
        match self {
            ReportFormat::Json => None,
            ReportFormat::Csv => Some("text/csv"),
            ReportFormat::Tsv => Some("text/tab-separated-values"),
        }
    }
}

/// Arguments for `get_report`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportArgs {
    pub report_name: String,
    #[serde(default = "default_report_format")]
    pub format: String,
}

impl ReportArgs {
    pub fn into_request(self) -> ApiRequest {
        let request = ApiRequest::get(format!("/reports/{}", self.report_name));
        match ReportFormat::from_arg(&self.format).accept() {
            Some(accept) => request.with_accept(accept).as_text(),
            None => request,
        }
    }
}

/// Arguments for the generic `api_request` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRequestArgs {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub body: Option<Map<String, Value>>,
}

impl RawRequestArgs {
    pub fn into_request(self) -> StmsResult<ApiRequest> {
        ApiRequest::from_parts(&self.method, self.path, self.body)
    }
}

/// Builds a POST whose payload is the serialized argument struct.
pub fn post_args<T: Serialize>(path: &str, args: &T) -> ApiRequest {
    ApiRequest::post(path, to_payload(args))
}
