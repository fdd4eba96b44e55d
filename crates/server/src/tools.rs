//! Tool-level operations: argument records, validation, gateway call, tool messages.
//!
//! Everything here returns an [`ApiResult`]; the MCP wrapper in [`crate::server`] only
//! serializes it.

use crate::resources::RequestCache;
use docdocdoc_api::gateway::GetRequestOptions;
use docdocdoc_api::payload::{build_create_payload, build_update_payload};
use docdocdoc_api::validation::validate_request_id;
use docdocdoc_api::{ApiResult, CreateRequestFields, DocDocDocApi, UpdateRequestFields};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

pub const GET_SUCCESS_MESSAGE: &str = "Request retrieved successfully from API";
pub const CREATE_SUCCESS_MESSAGE: &str = "Request created successfully via API";
pub const UPDATE_SUCCESS_MESSAGE: &str = "Request updated successfully via API";
pub const CANCEL_SUCCESS_MESSAGE: &str = "Request cancelled successfully via API";
pub const DELETE_SUCCESS_MESSAGE: &str = "Request deleted successfully via API";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct GetRequestArgs {
    /// ID of the document request to retrieve
    pub request_id: String,
    #[serde(flatten)]
    pub options: GetRequestOptions,
}

pub type CreateRequestArgs = CreateRequestFields;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct UpdateRequestArgs {
    /// ID of the document request to update
    pub request_id: String,
    #[serde(flatten)]
    pub fields: UpdateRequestFields,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct RequestIdArgs {
    /// ID of the document request
    pub request_id: String,
}

/// The five request tools over a shared API client and optional resource cache.
#[derive(Debug, Clone)]
pub struct RequestTools {
    api: DocDocDocApi,
    cache: Option<Arc<RequestCache>>,
}

impl RequestTools {
    #[must_use]
    pub fn new(api: DocDocDocApi, cache: Option<Arc<RequestCache>>) -> Self {
        Self { api, cache }
    }

    #[must_use]
    pub fn api(&self) -> &DocDocDocApi {
        &self.api
    }

    #[must_use]
    pub fn cache(&self) -> Option<&Arc<RequestCache>> {
        self.cache.as_ref()
    }

    /// Fetch a request; a successful object response is remembered for `request://` reads.
    pub async fn get_request(&self, args: GetRequestArgs) -> ApiResult {
        let request_id = match validate_request_id(&args.request_id) {
            Ok(id) => id,
            Err(e) => return e.into(),
        };

        let result = self
            .api
            .get_request(request_id, args.options)
            .await
            .with_message(GET_SUCCESS_MESSAGE);

        if let (Some(cache), Some(data)) = (&self.cache, result.data()) {
            if cache.remember(request_id, data) {
                tracing::debug!(request_id, "cached request record");
            }
        }
        result
    }

    pub async fn create_request(&self, args: CreateRequestArgs) -> ApiResult {
        let payload = match build_create_payload(&args) {
            Ok(p) => p,
            Err(e) => return e.into(),
        };
        self.api
            .create_request(&payload)
            .await
            .with_message(CREATE_SUCCESS_MESSAGE)
            .with_request_id_from_data()
    }

    pub async fn update_request(&self, args: UpdateRequestArgs) -> ApiResult {
        let request_id = match validate_request_id(&args.request_id) {
            Ok(id) => id,
            Err(e) => return e.into(),
        };
        let payload = match build_update_payload(&args.fields) {
            Ok(p) => p,
            Err(e) => return e.into(),
        };
        self.api
            .update_request(request_id, &payload)
            .await
            .with_message(UPDATE_SUCCESS_MESSAGE)
    }

    pub async fn cancel_request(&self, args: RequestIdArgs) -> ApiResult {
        let request_id = match validate_request_id(&args.request_id) {
            Ok(id) => id,
            Err(e) => return e.into(),
        };
        self.api
            .cancel_request(request_id)
            .await
            .with_message(CANCEL_SUCCESS_MESSAGE)
    }

    pub async fn delete_request(&self, args: RequestIdArgs) -> ApiResult {
        let request_id = match validate_request_id(&args.request_id) {
            Ok(id) => id,
            Err(e) => return e.into(),
        };
        self.api
            .delete_request(request_id)
            .await
            .with_message(DELETE_SUCCESS_MESSAGE)
    }
}
