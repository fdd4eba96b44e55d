//! Gateway from logical request operations to DocDocDoc HTTP calls.
//!
//! | Operation | Method | Path |
//! |---|---|---|
//! | get | GET | `/api/request/{id}` |
//! | create | POST | `/api/request` |
//! | update | PUT | `/api/request/{id}` |
//! | cancel | GET | `/api/request/{id}/cancel` |
//! | delete | DELETE | `/api/request/{id}` |
//!
//! Every operation checks configuration first and never touches the network without an API key.
//! Payloads are expected to be validated already (see [`crate::payload`]).

use crate::config::ApiSettings;
use crate::error::{ApiError, Result};
use crate::payload::RequestPayload;
use crate::result::{ApiResult, normalize_success};
use crate::transport::{ApiRequest, HttpTransport, Transport};
use reqwest::Method;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::sync::Arc;

const API_SEGMENT: &str = "api";
const REQUEST_SEGMENT: &str = "request";
const CANCEL_SEGMENT: &str = "cancel";

/// Optional sections to embed when fetching a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GetRequestOptions {
    /// Include documents associated with the request in the response
    #[serde(deserialize_with = "null_as_false")]
    pub with_documents: bool,
    /// Include granted accesses in the response
    #[serde(deserialize_with = "null_as_false")]
    pub with_accesses: bool,
    /// Include event history in the response
    #[serde(deserialize_with = "null_as_false")]
    pub with_events: bool,
    /// Include exchanged messages in the response
    #[serde(deserialize_with = "null_as_false")]
    pub with_messages: bool,
}

// An explicit `null` flag means "not requested".
fn null_as_false<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl GetRequestOptions {
    /// Query flags; only requested sections are sent, always as `"true"`.
    #[must_use]
    pub fn query(&self) -> Vec<(String, String)> {
        [
            ("with_documents", self.with_documents),
            ("with_accesses", self.with_accesses),
            ("with_events", self.with_events),
            ("with_messages", self.with_messages),
        ]
        .into_iter()
        .filter(|(_, on)| *on)
        .map(|(name, _)| (name.to_string(), "true".to_string()))
        .collect()
    }
}

/// Client for the DocDocDoc request endpoints.
///
/// Cheap to clone; safe to share across tasks.
#[derive(Clone)]
pub struct DocDocDocApi {
    settings: Arc<ApiSettings>,
    transport: Arc<dyn Transport>,
}

impl DocDocDocApi {
    #[must_use]
    pub fn new(settings: ApiSettings, transport: Arc<dyn Transport>) -> Self {
        Self {
            settings: Arc::new(settings),
            transport,
        }
    }

    /// Build a client backed by [`HttpTransport`].
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn from_settings(settings: ApiSettings) -> Result<Self> {
        let transport = HttpTransport::new(&settings)?;
        Ok(Self::new(settings, Arc::new(transport)))
    }

    #[must_use]
    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    pub async fn get_request(&self, request_id: &str, options: GetRequestOptions) -> ApiResult {
        let request = ApiRequest::new(Method::GET, [API_SEGMENT, REQUEST_SEGMENT, request_id])
            .with_query(options.query());
        self.dispatch(request).await
    }

    pub async fn create_request(&self, payload: &RequestPayload) -> ApiResult {
        let request = match with_payload(
            ApiRequest::new(Method::POST, [API_SEGMENT, REQUEST_SEGMENT]),
            payload,
        ) {
            Ok(r) => r,
            Err(e) => return e.into(),
        };
        self.dispatch(request).await
    }

    pub async fn update_request(&self, request_id: &str, payload: &RequestPayload) -> ApiResult {
        let request = match with_payload(
            ApiRequest::new(Method::PUT, [API_SEGMENT, REQUEST_SEGMENT, request_id]),
            payload,
        ) {
            Ok(r) => r,
            Err(e) => return e.into(),
        };
        self.dispatch(request).await
    }

    /// Cancellation is a GET on the `cancel` sub-resource.
    pub async fn cancel_request(&self, request_id: &str) -> ApiResult {
        let request = ApiRequest::new(
            Method::GET,
            [API_SEGMENT, REQUEST_SEGMENT, request_id, CANCEL_SEGMENT],
        );
        self.dispatch(request).await
    }

    pub async fn delete_request(&self, request_id: &str) -> ApiResult {
        let request = ApiRequest::new(Method::DELETE, [API_SEGMENT, REQUEST_SEGMENT, request_id]);
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: ApiRequest) -> ApiResult {
        if !self.settings.is_configured() {
            tracing::warn!(
                method = %request.method,
                path = %request.display_path(),
                "API_KEY not configured; skipping DocDocDoc call"
            );
            return ApiError::NotConfigured.into();
        }

        let method = request.method.clone();
        let path = request.display_path();
        tracing::debug!(method = %method, path = %path, "calling DocDocDoc API");

        match self.transport.send(request).await {
            Ok(body) => normalize_success(body),
            Err(e) => {
                tracing::warn!(method = %method, path = %path, error = %e, "DocDocDoc API call failed");
                e.into()
            }
        }
    }
}

impl fmt::Debug for DocDocDocApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocDocDocApi")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

fn with_payload(request: ApiRequest, payload: &RequestPayload) -> Result<ApiRequest> {
    let body = payload
        .to_json()
        .map_err(|e| ApiError::Unexpected(format!("failed to encode payload: {e}")))?;
    Ok(request.with_body(body))
}
