//! Field-level checks applied before anything is sent upstream.
//!
//! All checks are pure. Payload builders in [`crate::payload`] call them in a fixed order and stop
//! at the first failure.

use crate::document_type::DocumentType;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Upper bound (in characters) for free-text fields.
pub const MAX_FIELD_LENGTH: usize = 255;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

// `+` / `(area)` / 3 digits / sep / 3 digits / sep / 4-6 digits.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+]?[(]?[0-9]{3}[)]?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$")
        .expect("valid phone pattern")
});

// Digit pairs, e.g. `01.23.45.67.89` or `01 23 45 67 89`.
static PHONE_PAIRS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+]?[0-9]{2}(?:[-\s.][0-9]{2}){4}$").expect("valid phone pattern")
});

/// A rejected input field. The `Display` text is what callers see.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required and cannot be empty")]
    MissingField { field: &'static str },

    #[error("{field} '{value}' is not a valid email address")]
    InvalidEmail { field: &'static str, value: String },

    #[error(
        "{field} '{value}' is not a valid phone number. Use format like '+33123456789' or '01.23.45.67.89'"
    )]
    InvalidPhone { field: &'static str, value: String },

    #[error("{field} must be {max} characters or less")]
    TooLong { field: &'static str, max: usize },

    #[error("Invalid {field} '{value}'. Must be one of: {allowed}")]
    InvalidEnum {
        field: &'static str,
        value: String,
        allowed: String,
    },
}

impl ValidationError {
    /// Name of the offending field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field }
            | Self::InvalidEmail { field, .. }
            | Self::InvalidPhone { field, .. }
            | Self::TooLong { field, .. }
            | Self::InvalidEnum { field, .. } => field,
        }
    }
}

#[must_use]
pub fn validate_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

#[must_use]
pub fn validate_phone(s: &str) -> bool {
    PHONE_RE.is_match(s) || PHONE_PAIRS_RE.is_match(s)
}

/// True iff `s` has at most `max` characters (not bytes).
#[must_use]
pub fn validate_length(s: &str, max: usize) -> bool {
    s.chars().count() <= max
}

/// Trim `value`, failing with `MissingField` when nothing is left.
pub(crate) fn require<'a>(
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField { field })
    } else {
        Ok(trimmed)
    }
}

/// Trimmed value of an optional field, or `None` when absent or blank.
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub(crate) fn check_email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if validate_email(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail {
            field,
            value: value.to_string(),
        })
    }
}

pub(crate) fn check_phone(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if validate_phone(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone {
            field,
            value: value.to_string(),
        })
    }
}

pub(crate) fn check_length(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if validate_length(value, MAX_FIELD_LENGTH) {
        Ok(())
    } else {
        Err(ValidationError::TooLong {
            field,
            max: MAX_FIELD_LENGTH,
        })
    }
}

pub(crate) fn check_document_type(value: &str) -> Result<DocumentType, ValidationError> {
    DocumentType::from_name(value).ok_or_else(|| ValidationError::InvalidEnum {
        field: "document_type",
        value: value.to_string(),
        allowed: DocumentType::allowed_list(),
    })
}

/// Validate a request identifier used as a path segment.
///
/// # Errors
///
/// Returns `MissingField` naming `request_id` when the identifier is blank.
pub fn validate_request_id(request_id: &str) -> Result<&str, ValidationError> {
    require("request_id", request_id)
}
