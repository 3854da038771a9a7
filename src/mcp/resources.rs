//! Read-only MCP resources.

use serde_json::json;

use crate::types::config::StagingConfig;

use super::protocol::{ResourceContents, ResourceDescription};

/// URI of the configuration resource.
pub const CONFIG_URI: &str = "stms://config";

const JSON_MIME: &str = "application/json";

/// Lists available resources.
pub fn list_resources() -> Vec<ResourceDescription> {
    vec![ResourceDescription {
        uri: CONFIG_URI.to_string(),
        name: "config".to_string(),
        description: "Current MCP server configuration (without sensitive data)".to_string(),
        mime_type: JSON_MIME.to_string(),
    }]
}

/// Reads a resource by URI, `None` when the URI is unknown.
///
/// The configuration resource reports whether a cookie is set, never its
/// value.
pub fn read_resource(uri: &str, config: &StagingConfig) -> Option<ResourceContents> {
    match uri {
        CONFIG_URI => {
            let snapshot = json!({
                "staging_url": config.base_url,
                "cookie_configured": config.cookie_configured(),
            });
            Some(ResourceContents {
                uri: CONFIG_URI.to_string(),
                mime_type: JSON_MIME.to_string(),
                text: serde_json::to_string_pretty(&snapshot).unwrap_or_default(),
            })
        }
        _ => None,
    }
}
