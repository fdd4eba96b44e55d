//! Outbound HTTP for the DocDocDoc API.
//!
//! The gateway talks to a [`Transport`]; production code uses [`HttpTransport`] (reqwest), tests
//! plug in their own implementation to observe or fake traffic.

use crate::config::ApiSettings;
use crate::error::{ApiError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

/// Header carrying the static API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Upper bound on upstream body text copied into an error message.
pub const MAX_ERROR_BODY_CHARS: usize = 512;

/// A single upstream call, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Unencoded path segments, e.g. `["api", "request", "r1"]`.
    pub path: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn new<I, S>(method: Method, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            path: path.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// `/api/request/r1` style rendering for logs.
    #[must_use]
    pub fn display_path(&self) -> String {
        format!("/{}", self.path.join("/"))
    }
}

/// Sends an [`ApiRequest`] and returns the parsed JSON body of a 2xx response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// # Errors
    ///
    /// [`ApiError::Transport`] for connection failures, timeouts, non-2xx statuses and bodies
    /// that are not JSON; [`ApiError::Unexpected`] for anything else.
    async fn send(&self, request: ApiRequest) -> Result<Value>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the base URL does not parse.
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        Self::with_client(settings, Client::new())
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the base URL does not parse.
    pub fn with_client(settings: &ApiSettings, client: Client) -> Result<Self> {
        let base_url = Url::parse(settings.base_url()).map_err(|e| {
            ApiError::Config(format!("Invalid BASE_URL '{}': {e}", settings.base_url()))
        })?;
        Ok(Self {
            client,
            base_url,
            api_key: settings.api_key().map(str::to_string),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        let url = build_url(&self.base_url, &request.path, &request.query)?;

        let mut builder = self
            .client
            .request(request.method, url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes);
            let reason = status.canonical_reason().unwrap_or("Unknown");
            return Err(ApiError::Transport(format!(
                "API returned {} {reason}: {}",
                status.as_u16(),
                truncate_body(body.trim(), MAX_ERROR_BODY_CHARS)
            )));
        }

        parse_body(&bytes)
    }
}

/// Join `path` onto `base`, percent-encoding each segment.
///
/// # Errors
///
/// Returns [`ApiError::Unexpected`] if `base` cannot carry a path (e.g. `mailto:`).
pub fn build_url(base: &Url, path: &[String], query: &[(String, String)]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ApiError::Unexpected(format!("base URL '{base}' cannot carry a path")))?
        .pop_if_empty()
        .extend(path);

    if query.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(query);
    }
    Ok(url)
}

fn truncate_body(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}... (truncated)", &body[..cut]),
        None => body.to_string(),
    }
}

fn parse_body(bytes: &[u8]) -> Result<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes)
        .map_err(|e| ApiError::Transport(format!("invalid JSON in response body: {e}")))
}

#[must_use]
pub fn redact_url(url: &Url) -> String {
    let mut u = url.clone();
    // Best-effort: drop credentials + query + fragment.
    let _ = u.set_username("");
    let _ = u.set_password(None);
    u.set_query(None);
    u.set_fragment(None);
    u.to_string()
}

#[must_use]
pub fn sanitize_reqwest_error(e: &reqwest::Error) -> String {
    let mut msg = e.to_string();
    if let Some(u) = e.url() {
        msg = msg.replace(u.as_str(), &redact_url(u));
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use docdocdoc_test_support::MockUpstream;
    use serde_json::json;

    fn segments(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn build_url_joins_and_encodes_segments() {
        let base = Url::parse("https://staging.docdocdoc.com").expect("url");
        let url = build_url(&base, &segments(&["api", "request", "a b/c"]), &[]).expect("url");
        assert_eq!(
            url.as_str(),
            "https://staging.docdocdoc.com/api/request/a%20b%2Fc"
        );
    }

    #[test]
    fn build_url_keeps_base_path_prefix() {
        let base = Url::parse("https://proxy.example/docdocdoc/").expect("url");
        let url = build_url(
            &base,
            &segments(&["api", "request"]),
            &[("with_events".to_string(), "true".to_string())],
        )
        .expect("url");
        assert_eq!(
            url.as_str(),
            "https://proxy.example/docdocdoc/api/request?with_events=true"
        );
    }

    #[test]
    fn build_url_rejects_cannot_be_a_base() {
        let base = Url::parse("mailto:ops@example.com").expect("url");
        let err = build_url(&base, &segments(&["api"]), &[]).unwrap_err();
        assert!(matches!(err, ApiError::Unexpected(_)));
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let settings = ApiSettings::new(Some("k".to_string()), "not a url");
        let err = HttpTransport::new(&settings).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn redact_url_drops_credentials_and_query() {
        let url = Url::parse("https://user:pw@host.example/api/request/r1?x=1#frag").expect("url");
        assert_eq!(redact_url(&url), "https://host.example/api/request/r1");
    }

    #[test]
    fn empty_body_parses_to_null() {
        assert_eq!(parse_body(b"").expect("ok"), Value::Null);
        assert_eq!(parse_body(b" \n").expect("ok"), Value::Null);
        assert!(matches!(
            parse_body(b"<html>"),
            Err(ApiError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn send_sets_headers_query_and_body() {
        let upstream = MockUpstream::start(200, json!({ "data": { "ok": true } }))
            .await
            .expect("start upstream");
        let settings = ApiSettings::new(Some("secret-key".to_string()), upstream.base_url());
        let transport = HttpTransport::new(&settings).expect("transport");

        let request = ApiRequest::new(Method::PUT, ["api", "request", "r1"])
            .with_query(vec![("with_documents".to_string(), "true".to_string())])
            .with_body(json!({ "message": "hi" }));
        let body = transport.send(request).await.expect("send");
        assert_eq!(body, json!({ "data": { "ok": true } }));

        let recorded = upstream.requests();
        assert_eq!(recorded.len(), 1);
        let seen = &recorded[0];
        assert_eq!(seen.method, "PUT");
        assert_eq!(seen.path, "/api/request/r1");
        assert_eq!(seen.query, "with_documents=true");
        assert_eq!(seen.header("x-api-key"), Some("secret-key"));
        assert_eq!(seen.header("content-type"), Some("application/json"));
        assert_eq!(seen.body, Some(json!({ "message": "hi" })));
    }

    #[tokio::test]
    async fn non_success_status_is_a_transport_error() {
        let upstream = MockUpstream::start(404, json!({ "error": "Request not found" }))
            .await
            .expect("start upstream");
        let settings = ApiSettings::new(Some("k".to_string()), upstream.base_url());
        let transport = HttpTransport::new(&settings).expect("transport");

        let err = transport
            .send(ApiRequest::new(Method::GET, ["api", "request", "missing"]))
            .await
            .unwrap_err();
        let ApiError::Transport(msg) = &err else {
            panic!("expected transport error, got {err:?}");
        };
        assert!(msg.starts_with("API returned 404 Not Found"), "{msg}");
        assert!(msg.contains("Request not found"), "{msg}");
    }

    #[test]
    fn truncate_body_caps_characters() {
        assert_eq!(truncate_body("short", 10), "short");
        assert_eq!(truncate_body("abcdef", 6), "abcdef");
        assert_eq!(truncate_body("ééééé", 2), "éé... (truncated)");
    }

    #[tokio::test]
    async fn oversized_error_body_is_truncated() {
        let upstream = MockUpstream::start_raw(502, "x".repeat(10_000))
            .await
            .expect("start upstream");
        let settings = ApiSettings::new(Some("k".to_string()), upstream.base_url());
        let transport = HttpTransport::new(&settings).expect("transport");

        let err = transport
            .send(ApiRequest::new(Method::DELETE, ["api", "request", "r1"]))
            .await
            .unwrap_err();
        let ApiError::Transport(msg) = &err else {
            panic!("expected transport error, got {err:?}");
        };
        assert!(msg.starts_with("API returned 502 Bad Gateway: xxx"), "{msg}");
        assert!(msg.ends_with("... (truncated)"), "{msg}");
        assert_eq!(msg.matches('x').count(), MAX_ERROR_BODY_CHARS);
    }

    #[tokio::test]
    async fn connection_refused_is_a_transport_error() {
        let port = docdocdoc_test_support::pick_unused_port().expect("port");
        let settings = ApiSettings::new(Some("k".to_string()), format!("http://127.0.0.1:{port}"));
        let transport = HttpTransport::new(&settings).expect("transport");

        let err = transport
            .send(ApiRequest::new(Method::GET, ["api", "request", "r1"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
        assert!(err.fallback_message().is_some());
    }
}
