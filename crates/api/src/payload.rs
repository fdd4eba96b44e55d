//! Create/update payload construction.
//!
//! Input records keep every optional field as an explicit `Option`, so "not passed" and
//! "passed" never get confused. The outgoing [`RequestPayload`] only ever carries trimmed,
//! non-empty strings; absent fields are skipped during serialization.

use crate::document_type::DocumentType;
use crate::validation::{
    ValidationError, check_document_type, check_email, check_length, check_phone, present,
    require,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

type Result<T> = std::result::Result<T, ValidationError>;

/// Arguments accepted when creating a document request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct CreateRequestFields {
    /// Email address of the person to request the document from (required)
    pub requested_email: String,
    /// Full name of the person to request the document from (required)
    pub requested_name: String,
    /// Email address of the person making the request (required)
    pub requestor_email: String,
    /// Full name of the person making the request (required)
    pub requestor_name: String,
    /// Phone number of the requested person (format: +33123456789, 01.23.45.67.89 or 0123456789)
    #[serde(default)]
    pub requested_phone: Option<String>,
    /// Company name of the requested person
    #[serde(default)]
    pub requested_company: Option<String>,
    /// Phone number of the requester (format: +33123456789, 01.23.45.67.89 or 0123456789)
    #[serde(default)]
    pub requestor_phone: Option<String>,
    /// Company name of the requester
    #[serde(default)]
    pub requestor_company: Option<String>,
    /// Type of document requested (id_card, passport, driver_license, residence_permit, statutes, company_registration, beneficials_owner_register)
    #[serde(default)]
    pub document_type: Option<String>,
    /// Custom message to send with the request (max 255 characters)
    #[serde(default)]
    pub message: Option<String>,
    /// If true, do not automatically send the notification email
    #[serde(default)]
    pub dont_send_message: Option<bool>,
}

/// Arguments accepted when updating a document request. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct UpdateRequestFields {
    /// New email address of the requested person
    #[serde(default)]
    pub requested_email: Option<String>,
    /// New phone number of the requested person
    #[serde(default)]
    pub requested_phone: Option<String>,
    /// New name of the requested person
    #[serde(default)]
    pub requested_name: Option<String>,
    /// New company name of the requested person
    #[serde(default)]
    pub requested_company: Option<String>,
    /// New email address of the requester
    #[serde(default)]
    pub requestor_email: Option<String>,
    /// New phone number of the requester
    #[serde(default)]
    pub requestor_phone: Option<String>,
    /// New name of the requester
    #[serde(default)]
    pub requestor_name: Option<String>,
    /// New company name of the requester
    #[serde(default)]
    pub requestor_company: Option<String>,
    /// New document type (id_card, passport, driver_license, residence_permit, statutes, company_registration, beneficials_owner_register)
    #[serde(default)]
    pub document_type: Option<String>,
    /// New custom message (max 255 characters)
    #[serde(default)]
    pub message: Option<String>,
    /// If true, resend the notification email
    #[serde(default)]
    pub send_again: Option<bool>,
}

/// JSON body of a create/update call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requestor_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requestor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requestor_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requestor_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<DocumentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dont_send_message: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_again: Option<bool>,
}

impl RequestPayload {
    /// Serialize into the JSON object sent upstream.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (not expected for this type).
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// Validate and normalize the arguments of a create call.
///
/// Required fields are checked first (`requested_email`, `requested_name`, `requestor_email`,
/// `requestor_name`), then optional fields in declaration order. The first failure wins.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn build_create_payload(fields: &CreateRequestFields) -> Result<RequestPayload> {
    let requested_email = required_email("requested_email", &fields.requested_email)?;
    let requested_name = required_text("requested_name", &fields.requested_name)?;
    let requestor_email = required_email("requestor_email", &fields.requestor_email)?;
    let requestor_name = required_text("requestor_name", &fields.requestor_name)?;

    Ok(RequestPayload {
        requested_email: Some(requested_email),
        requested_name: Some(requested_name),
        requestor_email: Some(requestor_email),
        requestor_name: Some(requestor_name),
        requested_phone: optional_phone("requested_phone", fields.requested_phone.as_deref())?,
        requested_company: optional_text(
            "requested_company",
            fields.requested_company.as_deref(),
        )?,
        requestor_phone: optional_phone("requestor_phone", fields.requestor_phone.as_deref())?,
        requestor_company: optional_text(
            "requestor_company",
            fields.requestor_company.as_deref(),
        )?,
        document_type: optional_document_type(fields.document_type.as_deref())?,
        message: optional_text("message", fields.message.as_deref())?,
        dont_send_message: fields.dont_send_message,
        send_again: None,
    })
}

/// Validate and normalize the arguments of an update call.
///
/// Nothing is required. Every field that is present gets the same shape checks as on create
/// (email, phone, length, enum) and is trimmed; blank strings are dropped.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn build_update_payload(fields: &UpdateRequestFields) -> Result<RequestPayload> {
    Ok(RequestPayload {
        requested_email: optional_email("requested_email", fields.requested_email.as_deref())?,
        requested_phone: optional_phone("requested_phone", fields.requested_phone.as_deref())?,
        requested_name: optional_text("requested_name", fields.requested_name.as_deref())?,
        requested_company: optional_text(
            "requested_company",
            fields.requested_company.as_deref(),
        )?,
        requestor_email: optional_email("requestor_email", fields.requestor_email.as_deref())?,
        requestor_phone: optional_phone("requestor_phone", fields.requestor_phone.as_deref())?,
        requestor_name: optional_text("requestor_name", fields.requestor_name.as_deref())?,
        requestor_company: optional_text(
            "requestor_company",
            fields.requestor_company.as_deref(),
        )?,
        document_type: optional_document_type(fields.document_type.as_deref())?,
        message: optional_text("message", fields.message.as_deref())?,
        dont_send_message: None,
        send_again: fields.send_again,
    })
}

fn required_email(field: &'static str, value: &str) -> Result<String> {
    let value = require(field, value)?;
    check_email(field, value)?;
    check_length(field, value)?;
    Ok(value.to_string())
}

fn required_text(field: &'static str, value: &str) -> Result<String> {
    let value = require(field, value)?;
    check_length(field, value)?;
    Ok(value.to_string())
}

fn optional_email(field: &'static str, value: Option<&str>) -> Result<Option<String>> {
    present(value)
        .map(|v| -> Result<String> {
            check_email(field, v)?;
            check_length(field, v)?;
            Ok(v.to_string())
        })
        .transpose()
}

fn optional_phone(field: &'static str, value: Option<&str>) -> Result<Option<String>> {
    present(value)
        .map(|v| -> Result<String> {
            check_phone(field, v)?;
            Ok(v.to_string())
        })
        .transpose()
}

fn optional_text(field: &'static str, value: Option<&str>) -> Result<Option<String>> {
    present(value)
        .map(|v| -> Result<String> {
            check_length(field, v)?;
            Ok(v.to_string())
        })
        .transpose()
}

fn optional_document_type(value: Option<&str>) -> Result<Option<DocumentType>> {
    present(value).map(check_document_type).transpose()
}
