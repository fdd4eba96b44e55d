//! DocDocDoc request API: validation, payload normalization and the HTTP gateway.
//!
//! This crate is used by:
//! - `docdocdoc-mcp` (the MCP tool server)
//!
//! It intentionally contains **no** MCP protocol code. Every operation returns an
//! [`ApiResult`](result::ApiResult) value; nothing here panics or raises on bad input.

pub mod config;
pub mod document_type;
pub mod error;
pub mod gateway;
pub mod payload;
pub mod result;
pub mod transport;
pub mod validation;

pub use config::ApiSettings;
pub use document_type::DocumentType;
pub use error::{ApiError, Result};
pub use gateway::{DocDocDocApi, GetRequestOptions};
pub use payload::{CreateRequestFields, RequestPayload, UpdateRequestFields};
pub use result::ApiResult;
pub use transport::{ApiRequest, HttpTransport, Transport};
pub use validation::ValidationError;
