//! Classification of backend-native failure payloads.
//!
//! Backends report failures in their own shapes: a Postgres SQLSTATE in
//! `code`, a PostgREST `PGRST…` code, an HTTP `status`, or just free text in
//! `message` / `error_description`. [`classify`] folds all of them into a
//! [`DataError`]. Rules are checked in a fixed order; code rules always win
//! over status rules.

use serde_json::Value;
use tracing::debug;

use crate::code::ErrorCode;
use crate::error::DataError;

const UNIQUE_VIOLATION_CODES: [&str; 2] = ["23505", "PGRST116"];
const FOREIGN_KEY_VIOLATION_CODE: &str = "23503";
const FORBIDDEN_CODES: [&str; 2] = ["42501", "PGRST301"];
const NOT_FOUND_CODE: &str = "PGRST204";
// Case-sensitive on purpose; see DESIGN.md.
const NOT_FOUND_NEEDLE: &str = "not found";
const NOT_FOUND_RESOURCE: &str = "Resource";
// Compared as numbers so `401` and `401.0` match alike.
const UNAUTHORIZED_STATUS: f64 = 401.0;
const FORBIDDEN_STATUS: f64 = 403.0;

const UNKNOWN_INPUT_MESSAGE: &str = "Unknown error occurred";
const UNKNOWN_MESSAGE: &str = "Unknown error";

/// Map a backend failure payload to a domain error.
///
/// Total over every JSON value: `null`, `false`, `0` and `""` produce an
/// [`ErrorCode::Unknown`] error, and shapes without any recognizable field
/// end up as [`ErrorCode::ProviderError`].
///
/// # Examples
/// ```
/// use data_errors::{ErrorCode, ErrorKind, classify};
/// use serde_json::json;
///
/// let err = classify(&json!({ "status": 401, "message": "Not authenticated" }));
/// assert_eq!(err.kind(), ErrorKind::Unauthorized);
/// assert_eq!(err.code(), ErrorCode::Unauthorized);
/// assert_eq!(err.message(), "Not authenticated");
/// ```
#[must_use]
pub fn classify(raw: &Value) -> DataError {
    if is_falsy(raw) {
        debug!("classifying empty backend failure");
        return DataError::unknown(UNKNOWN_INPUT_MESSAGE);
    }

    let message = text_field(raw, "message")
        .or_else(|| text_field(raw, "error_description"))
        .unwrap_or(UNKNOWN_MESSAGE);
    let code = text_field(raw, "code").unwrap_or_default();
    let status = raw.get("status").and_then(Value::as_f64);

    let error = if UNIQUE_VIOLATION_CODES.contains(&code) {
        attach_raw(DataError::new(message, ErrorCode::UniqueViolation), raw)
    } else if code == FOREIGN_KEY_VIOLATION_CODE {
        attach_raw(DataError::new(message, ErrorCode::ForeignKeyViolation), raw)
    } else if FORBIDDEN_CODES.contains(&code) {
        DataError::forbidden(message)
    } else if code == NOT_FOUND_CODE || message.contains(NOT_FOUND_NEEDLE) {
        DataError::not_found(NOT_FOUND_RESOURCE, None)
    } else if status == Some(UNAUTHORIZED_STATUS) {
        DataError::unauthorized(message)
    } else if status == Some(FORBIDDEN_STATUS) {
        DataError::forbidden(message)
    } else {
        attach_raw(DataError::new(message, ErrorCode::ProviderError), raw)
    };

    debug!(
        backend_code = code,
        status,
        classified = %error.code(),
        "classified backend failure"
    );
    error
}

fn attach_raw(error: DataError, raw: &Value) -> DataError {
    error
        .with_details(raw.clone())
        .with_original_error(raw.clone())
}

fn text_field<'a>(raw: &'a Value, key: &str) -> Option<&'a str> {
    raw.get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

fn is_falsy(raw: &Value) -> bool {
    match raw {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n == 0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
