//! Error types for stms-mcp.

use thiserror::Error;

/// Default result type for stms-mcp.
pub type StmsResult<T> = Result<T, StmsError>;

/// Errors that can occur while serving or forwarding a tool call.
#[derive(Error, Debug)]
pub enum StmsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid header value for '{0}'")]
    InvalidHeader(String),

    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),

    #[error("Invalid parameters: {0}")]
    InvalidArguments(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl StmsError {
    /// Creates a configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an invalid-arguments error.
    pub fn invalid_arguments<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Whether the error came from the network layer (DNS, connect, TLS, timeout).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_method_message() {
        let err = StmsError::UnsupportedMethod("PATCH".to_string());
        assert_eq!(err.to_string(), "Unsupported method: PATCH");
    }

    #[test]
    fn test_invalid_arguments_message() {
        let err = StmsError::invalid_arguments("missing field `idp_user_code`");
        assert_eq!(
            err.to_string(),
            "Invalid parameters: missing field `idp_user_code`"
        );
        assert!(!err.is_transport());
    }
}
