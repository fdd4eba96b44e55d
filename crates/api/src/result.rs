//! The uniform outcome of every DocDocDoc operation.

use crate::error::ApiError;
use crate::validation::ValidationError;
use serde::Serialize;
use serde_json::{Map, Value, json};

/// Message used when the gateway reports success and the caller did not override it.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Request successful";

/// Either `{message, data, meta}` or `{error, fallback_message?}`, never both.
///
/// Serializes as a flat JSON object so callers never need HTTP status codes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiResult {
    Success {
        message: String,
        data: Value,
        meta: Value,
        /// Convenience copy of `data.id`, set by create.
        #[serde(skip_serializing_if = "Option::is_none")]
        request_id: Option<String>,
    },
    Failure {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        fallback_message: Option<String>,
    },
}

impl ApiResult {
    #[must_use]
    pub fn success(data: Value, meta: Value) -> Self {
        Self::Success {
            message: DEFAULT_SUCCESS_MESSAGE.to_string(),
            data,
            meta,
            request_id: None,
        }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
            fallback_message: None,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Replace the success message. Failures pass through untouched.
    #[must_use]
    pub fn with_message(self, message: impl Into<String>) -> Self {
        match self {
            Self::Success {
                data,
                meta,
                request_id,
                ..
            } => Self::Success {
                message: message.into(),
                data,
                meta,
                request_id,
            },
            failure @ Self::Failure { .. } => failure,
        }
    }

    /// Copy `data.id` into `request_id` when the upstream returned one.
    #[must_use]
    pub fn with_request_id_from_data(self) -> Self {
        match self {
            Self::Success {
                message,
                data,
                meta,
                request_id,
            } => {
                let promoted = match data.get("id") {
                    Some(Value::String(s)) => Some(s.clone()),
                    Some(Value::Number(n)) => Some(n.to_string()),
                    _ => request_id,
                };
                Self::Success {
                    message,
                    data,
                    meta,
                    request_id: promoted,
                }
            }
            failure @ Self::Failure { .. } => failure,
        }
    }

    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self)
            .unwrap_or_else(|e| json!({ "error": format!("Unexpected error: {e}") }))
    }
}

impl From<ApiError> for ApiResult {
    fn from(value: ApiError) -> Self {
        Self::Failure {
            error: value.to_string(),
            fallback_message: value.fallback_message().map(str::to_string),
        }
    }
}

impl From<ValidationError> for ApiResult {
    fn from(value: ValidationError) -> Self {
        ApiError::from(value).into()
    }
}

/// Shape a successful upstream body.
///
/// An object with a `data` key is unwrapped (`meta` alongside it, defaulting to `{}`); any other
/// body becomes `data` as-is.
#[must_use]
pub fn normalize_success(body: Value) -> ApiResult {
    match body {
        Value::Object(mut obj) if obj.contains_key("data") => {
            let data = obj.remove("data").unwrap_or(Value::Null);
            let meta = obj.remove("meta").unwrap_or_else(empty_meta);
            ApiResult::success(data, meta)
        }
        Value::Object(obj) => {
            let meta = obj.get("meta").cloned().unwrap_or_else(empty_meta);
            ApiResult::success(Value::Object(obj), meta)
        }
        other => ApiResult::success(other, empty_meta()),
    }
}

fn empty_meta() -> Value {
    Value::Object(Map::new())
}
