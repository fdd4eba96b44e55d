//! `request://{request_id}` resources backed by a local, non-authoritative cache.
//!
//! The cache only ever holds what `get_request` fetched. Writes (create/update/cancel/delete)
//! never touch it, so a read after a write may be stale or missing; readers are pointed at the
//! `get_request` tool on a miss.

use parking_lot::RwLock;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde_json::{Map, Value};
use std::collections::HashMap;

pub const REQUEST_URI_PREFIX: &str = "request://";
pub const REQUEST_URI_TEMPLATE: &str = "request://{request_id}";

// Unreserved characters stay literal; everything else in an id is percent-encoded.
const REQUEST_ID: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Last-known request records, keyed by request id. No eviction.
#[derive(Debug, Default)]
pub struct RequestCache {
    entries: RwLock<HashMap<String, Map<String, Value>>>,
}

impl RequestCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `record` under `request_id`. Non-object records are ignored.
    ///
    /// Returns whether anything was stored.
    pub fn remember(&self, request_id: &str, record: &Value) -> bool {
        let Some(obj) = record.as_object() else {
            return false;
        };
        self.entries
            .write()
            .insert(request_id.to_string(), obj.clone());
        true
    }

    #[must_use]
    pub fn get(&self, request_id: &str) -> Option<Map<String, Value>> {
        self.entries.read().get(request_id).cloned()
    }

    /// Cached ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[must_use]
pub fn request_uri(request_id: &str) -> String {
    format!(
        "{REQUEST_URI_PREFIX}{}",
        utf8_percent_encode(request_id, REQUEST_ID)
    )
}

/// Extract the percent-decoded request id from a `request://{id}` URI.
///
/// Ids that do not decode to UTF-8 are returned as written.
#[must_use]
pub fn request_id_from_uri(uri: &str) -> Option<String> {
    let raw = uri
        .strip_prefix(REQUEST_URI_PREFIX)
        .map(|id| id.trim_end_matches('/'))
        .filter(|id| !id.is_empty())?;
    let id = percent_decode_str(raw)
        .decode_utf8()
        .map_or_else(|_| raw.to_string(), |id| id.into_owned());
    Some(id)
}

/// Text shown for `request://{request_id}`; never hits the network.
#[must_use]
pub fn render_request(cache: Option<&RequestCache>, request_id: &str) -> String {
    match cache.and_then(|c| c.get(request_id)) {
        Some(record) => render_summary(request_id, &record),
        None => format!(
            "Request {request_id} not found in local cache. Use get_request tool instead."
        ),
    }
}

fn render_summary(request_id: &str, record: &Map<String, Value>) -> String {
    let text = |key: &str, fallback: &str| {
        field_text(record, key).unwrap_or_else(|| fallback.to_string())
    };

    format!(
        "DocDocDoc Request: {id}\n\
         Status: {status}\n\
         Requested Person: {requested_name} ({requested_email})\n\
         Requestor: {requestor_name} ({requestor_email})\n\
         Document Type: {document_type}\n\
         Message: {message}\n\
         Created: {created}\n\
         Updated: {updated}\n\
         Companies: {requested_company} → {requestor_company}\n",
        id = text("id", request_id),
        status = text("status", "unknown"),
        requested_name = text("requested_name", "unknown"),
        requested_email = text("requested_email", "unknown"),
        requestor_name = text("requestor_name", "unknown"),
        requestor_email = text("requestor_email", "unknown"),
        document_type = text("document_type", "Any"),
        message = text("message", "None"),
        created = text("created_at", "unknown"),
        updated = text("updated_at", "unknown"),
        requested_company = text("requested_company", "N/A"),
        requestor_company = text("requestor_company", "N/A"),
    )
}

// Strings, numbers and booleans render as-is; null, empty and structured values count as absent.
fn field_text(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
