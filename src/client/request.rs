//! Request descriptors for the staging API.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::StmsError;

use super::envelope::REPORT_TEXT_LIMIT;

/// HTTP verbs the adapter forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Uppercase verb as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether requests with this verb carry a JSON body.
    pub fn sends_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = StmsError;

    /// Case-insensitive. The error carries the uppercased input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        match upper.as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(StmsError::UnsupportedMethod(upper)),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// How the response body is turned into an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Run the body through the JSON normalizer.
    Json,
    /// Return the body as a string, truncated to `limit` characters.
    Text { limit: usize },
}

/// One outbound call: verb, path and optional JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub payload: Option<Value>,
    /// Replaces the default `Accept: application/json` header.
    pub accept: Option<&'static str>,
    pub shape: ResponseShape,
}

impl ApiRequest {
    fn new(method: HttpMethod, path: impl Into<String>, payload: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            payload,
            accept: None,
            shape: ResponseShape::Json,
        }
    }

    /// GET without a body.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path, None)
    }

    /// DELETE without a body.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path, None)
    }

    /// POST with a JSON body.
    pub fn post(path: impl Into<String>, payload: Value) -> Self {
        Self::new(HttpMethod::Post, path, Some(payload))
    }

    /// PUT with a JSON body.
    pub fn put(path: impl Into<String>, payload: Value) -> Self {
        Self::new(HttpMethod::Put, path, Some(payload))
    }

    /// POST with an empty JSON object.
    pub fn post_empty(path: impl Into<String>) -> Self {
        Self::post(path, Value::Object(Map::new()))
    }

    /// Builds a request from a caller-supplied verb, path and body.
    ///
    /// GET and DELETE drop the body; POST and PUT fall back to `{}` when the
    /// body is absent.
    pub fn from_parts(
        method: &str,
        path: impl Into<String>,
        body: Option<Map<String, Value>>,
    ) -> Result<Self, StmsError> {
        let body = Value::Object(body.unwrap_or_default());
        Ok(match method.parse()? {
            HttpMethod::Get => Self::get(path),
            HttpMethod::Delete => Self::delete(path),
            HttpMethod::Post => Self::post(path, body),
            HttpMethod::Put => Self::put(path, body),
        })
    }

    /// Overrides the `Accept` header.
    pub fn with_accept(mut self, accept: &'static str) -> Self {
        self.accept = Some(accept);
        self
    }

    /// Returns the body as truncated text instead of parsing it as JSON.
    pub fn as_text(mut self) -> Self {
        self.shape = ResponseShape::Text {
            limit: REPORT_TEXT_LIMIT,
        };
        self
    }
}
