//! HTTP access to the staging API.
//!
//! A fresh [`reqwest::Client`] is built for every call and dropped when the
//! call returns, so no connection outlives a single tool invocation.

use std::sync::Arc;

use reqwest::header::{self, HeaderMap, HeaderValue};
use serde_json::{Map, Value};
use url::Url;

use crate::types::config::StagingConfig;
use crate::{StmsError, StmsResult};

use super::envelope::Envelope;
use super::request::{ApiRequest, ResponseShape};

/// Adapter bound to one staging configuration.
#[derive(Debug, Clone)]
pub struct StagingApi {
    config: Arc<StagingConfig>,
    base_url: Url,
}

impl StagingApi {
    /// Creates an adapter, validating the base URL up front.
    pub fn new(config: Arc<StagingConfig>) -> StmsResult<Self> {
        let base_url = config.parsed_base_url()?;
        Ok(Self { config, base_url })
    }

    /// The configuration this adapter was built with.
    pub fn config(&self) -> &StagingConfig {
        &self.config
    }

    /// Headers attached to every request.
    fn default_headers(&self) -> StmsResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        let mut cookie = HeaderValue::from_str(&self.config.cookie)
            .map_err(|_| StmsError::InvalidHeader(header::COOKIE.to_string()))?;
        cookie.set_sensitive(true);
        headers.insert(header::COOKIE, cookie);

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        Ok(headers)
    }

    /// Builds a client scoped to a single call.
    ///
    /// TLS certificate verification stays at the reqwest default (enabled).
    pub fn client(&self) -> StmsResult<reqwest::Client> {
        let client = reqwest::Client::builder()
            .default_headers(self.default_headers()?)
            .timeout(self.config.timeout())
            .build()?;
        Ok(client)
    }

    /// Appends `path` to the base URL, keeping any base path segment.
    pub fn endpoint(&self, path: &str) -> StmsResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let joined = if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        };
        Ok(Url::parse(&joined)?)
    }

    /// Issues exactly one HTTP call and normalizes the response.
    ///
    /// Transport failures (DNS, connect, TLS, timeout) are returned as
    /// [`StmsError::Http`]; HTTP error statuses are not.
    pub async fn execute(&self, request: &ApiRequest) -> StmsResult<Envelope> {
        let client = self.client()?;
        let url = self.endpoint(&request.path)?;

        let mut builder = client.request(request.method.into(), url);
        if let Some(accept) = request.accept {
            builder = builder.header(header::ACCEPT, accept);
        }
        if request.method.sends_body() {
            if let Some(ref payload) = request.payload {
                builder = builder.json(payload);
            }
        }

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            "Forwarding request to staging"
        );

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::info!(
            method = %request.method,
            path = %request.path,
            status,
            bytes = body.len(),
            "Staging responded"
        );

        Ok(match request.shape {
            ResponseShape::Json => Envelope::normalize(status, &body),
            ResponseShape::Text { limit } => Envelope::text(status, &body, limit),
        })
    }

    /// Generic dispatcher for endpoints without a dedicated tool.
    ///
    /// Unsupported verbs short-circuit into an envelope without any network
    /// call.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Map<String, Value>>,
    ) -> StmsResult<Envelope> {
        let request = match ApiRequest::from_parts(method, path, body) {
            Ok(request) => request,
            Err(StmsError::UnsupportedMethod(method)) => {
                tracing::warn!(method = %method, path, "Rejected unsupported method");
                return Ok(Envelope::unsupported_method(&method));
            }
            Err(e) => return Err(e),
        };

        self.execute(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_api(base_url: &str, cookie: &str) -> StagingApi {
        StagingApi::new(Arc::new(StagingConfig::new(base_url, cookie))).unwrap()
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let api = create_api("http://localhost:8080", "");
        assert_eq!(
            api.endpoint("/user/whoami").unwrap().as_str(),
            "http://localhost:8080/user/whoami"
        );
        assert_eq!(
            api.endpoint("dropdowns").unwrap().as_str(),
            "http://localhost:8080/dropdowns"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let api = create_api("http://localhost:8080/api/", "");
        assert_eq!(
            api.endpoint("/user/list").unwrap().as_str(),
            "http://localhost:8080/api/user/list"
        );
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let result = StagingApi::new(Arc::new(StagingConfig::new("::nope::", "")));
        assert!(result.is_err());
    }

    #[test]
    fn test_client_rejects_cookie_with_newline() {
        let api = create_api("http://localhost:8080", "session=a\nInjected: b");
        assert!(matches!(api.client(), Err(StmsError::InvalidHeader(_))));
    }

    #[tokio::test]
    async fn test_default_headers_sent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/whoami"))
            .and(header("cookie", "session=abc"))
            .and(header("accept", "application/json"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let api = create_api(&server.uri(), "session=abc");
        let envelope = api.execute(&ApiRequest::get("/user/whoami")).await.unwrap();

        assert_eq!(envelope.status_code(), Some(200));
        assert_eq!(envelope.data(), Some(&json!({"ok": true})));
    }

    #[tokio::test]
    async fn test_accept_override() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reports/daily"))
            .and(header("accept", "text/tab-separated-values"))
            .respond_with(ResponseTemplate::new(200).set_body_string("a\tb\n1\t2\n"))
            .expect(1)
            .mount(&server)
            .await;

        let api = create_api(&server.uri(), "");
        let request = ApiRequest::get("/reports/daily")
            .with_accept("text/tab-separated-values")
            .as_text();
        let envelope = api.execute(&request).await.unwrap();

        assert_eq!(envelope.data(), Some(&json!("a\tb\n1\t2\n")));
    }

    #[tokio::test]
    async fn test_post_sends_json_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/user/list"))
            .and(body_json(json!({"page": 1, "page_size": 20})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .expect(1)
            .mount(&server)
            .await;

        let api = create_api(&server.uri(), "");
        let envelope = api
            .execute(&ApiRequest::post("/user/list", json!({"page": 1, "page_size": 20})))
            .await
            .unwrap();

        assert_eq!(envelope.data(), Some(&json!({"items": []})));
    }

    #[tokio::test]
    async fn test_request_get_and_delete_send_no_body() {
        let server = MockServer::start().await;

        Mock::given(path("/thing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(2)
            .mount(&server)
            .await;

        let api = create_api(&server.uri(), "");
        api.request("get", "/thing", json!({"ignored": true}).as_object().cloned())
            .await
            .unwrap();
        api.request("delete", "/thing", json!({"ignored": true}).as_object().cloned())
            .await
            .unwrap();

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].method.as_str(), "GET");
        assert_eq!(received[1].method.as_str(), "DELETE");
        assert!(received.iter().all(|r| r.body.is_empty()));
    }

    #[tokio::test]
    async fn test_request_put_defaults_to_empty_object() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/thing"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"updated": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let api = create_api(&server.uri(), "");
        let envelope = api.request("PUT", "/thing", None).await.unwrap();
        assert_eq!(envelope.data(), Some(&json!({"updated": 1})));
    }

    #[tokio::test]
    async fn test_request_unsupported_method_makes_no_call() {
        let server = MockServer::start().await;

        let api = create_api(&server.uri(), "");
        let envelope = api.request("patch", "/x", json!({"a": 1}).as_object().cloned()).await.unwrap();

        assert_eq!(envelope, Envelope::unsupported_method("PATCH"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_json_body_normalized() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/public/hc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("healthy"))
            .mount(&server)
            .await;

        let api = create_api(&server.uri(), "");
        let envelope = api.execute(&ApiRequest::get("/public/hc")).await.unwrap();

        match envelope {
            Envelope::ParseFailure {
                status_code,
                raw_text,
                ..
            } => {
                assert_eq!(status_code, 200);
                assert_eq!(raw_text.as_deref(), Some("healthy"));
            }
            other => panic!("expected parse failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let mut config = StagingConfig::new(server.uri(), "");
        config.timeout_secs = 1;
        let api = StagingApi::new(Arc::new(config)).unwrap();

        let err = api.execute(&ApiRequest::get("/slow")).await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Port 9 (discard) is almost never listening locally.
        let api = create_api("http://127.0.0.1:9", "");
        let err = api.execute(&ApiRequest::get("/user/whoami")).await.unwrap_err();
        assert!(err.is_transport());
    }
}
