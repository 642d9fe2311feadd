//! The domain error value returned by every repository method.
//!
//! A [`DataError`] is an immutable value: a code from the closed
//! [`ErrorCode`] set, a human-readable message, optional structured details,
//! and optionally the backend payload it was classified from. The backend
//! payload is kept for diagnostics only and never appears in the serialized
//! form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::code::ErrorCode;

/// Field name to ordered violation messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

const DEFAULT_UNAUTHORIZED_MESSAGE: &str = "Authentication required";
const DEFAULT_FORBIDDEN_MESSAGE: &str = "Access denied";

/// Discriminant naming which constructor produced an error.
///
/// The kind travels with the serialized form as `name`, so a deserialized
/// error keeps its identity without any runtime type inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Plain domain error with any code.
    Data,
    /// Produced by [`DataError::not_found`].
    NotFound,
    /// Produced by [`DataError::validation`].
    Validation,
    /// Produced by [`DataError::unauthorized`].
    Unauthorized,
    /// Produced by [`DataError::forbidden`].
    Forbidden,
}

impl ErrorKind {
    /// Serialized `name` of errors of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Data => "DataError",
            Self::NotFound => "NotFoundError",
            Self::Validation => "ValidationError",
            Self::Unauthorized => "UnauthorizedError",
            Self::Forbidden => "ForbiddenError",
        }
    }

    /// Code a specialized kind always carries; `None` for [`ErrorKind::Data`].
    #[must_use]
    pub const fn fixed_code(self) -> Option<ErrorCode> {
        match self {
            Self::Data => None,
            Self::NotFound => Some(ErrorCode::NotFound),
            Self::Validation => Some(ErrorCode::ValidationFailed),
            Self::Unauthorized => Some(ErrorCode::Unauthorized),
            Self::Forbidden => Some(ErrorCode::Forbidden),
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        [
            Self::Data,
            Self::NotFound,
            Self::Validation,
            Self::Unauthorized,
            Self::Forbidden,
        ]
        .into_iter()
        .find(|kind| kind.name() == name)
    }
}

/// Normalized data-layer failure.
///
/// # Examples
/// ```
/// use data_errors::{DataError, ErrorCode};
///
/// let err = DataError::not_found("User", Some("123"));
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "User with id '123' not found");
/// ```
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
#[serde(try_from = "DataErrorDto", into = "DataErrorDto")]
pub struct DataError {
    kind: ErrorKind,
    code: ErrorCode,
    message: String,
    details: Option<Value>,
    original_error: Option<Value>,
}

/// Reasons a serialized payload is not a valid [`DataError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataErrorDecodeError {
    /// `name` is not one of the known error names.
    #[error("unknown error name '{name}'")]
    UnknownName {
        /// The unrecognized name.
        name: String,
    },
    /// A specialized name was paired with a different code.
    #[error("error name '{name}' cannot carry code {code}")]
    CodeMismatch {
        /// Serialized name.
        name: String,
        /// Serialized code.
        code: ErrorCode,
    },
}

impl DataError {
    /// Build a plain domain error.
    #[must_use]
    pub fn new(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            kind: ErrorKind::Data,
            code,
            message: message.into(),
            details: None,
            original_error: None,
        }
    }

    /// Build a plain domain error with [`ErrorCode::Unknown`].
    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(message, ErrorCode::Unknown)
    }

    /// Attach structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach the backend payload this error was derived from.
    #[must_use]
    pub fn with_original_error(mut self, original: Value) -> Self {
        self.original_error = Some(original);
        self
    }

    /// A missing record.
    ///
    /// # Examples
    /// ```
    /// use data_errors::DataError;
    ///
    /// assert_eq!(DataError::not_found("Profile", None).message(), "Profile not found");
    /// ```
    #[must_use]
    pub fn not_found(resource: &str, id: Option<&str>) -> Self {
        let (message, details) = match id {
            Some(id) => (
                format!("{resource} with id '{id}' not found"),
                json!({ "resource": resource, "id": id }),
            ),
            None => (
                format!("{resource} not found"),
                json!({ "resource": resource }),
            ),
        };
        Self {
            kind: ErrorKind::NotFound,
            ..Self::new(message, ErrorCode::NotFound)
        }
        .with_details(details)
    }

    /// Input rejected by validation, optionally with per-field messages.
    #[must_use]
    pub fn validation(message: impl Into<String>, fields: Option<FieldErrors>) -> Self {
        let mut details = Map::new();
        if let Some(fields) = fields {
            details.insert("fields".to_owned(), json!(fields));
        }
        Self {
            kind: ErrorKind::Validation,
            ..Self::new(message, ErrorCode::ValidationFailed)
        }
        .with_details(Value::Object(details))
    }

    /// Missing or invalid authentication.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Unauthorized,
            ..Self::new(message, ErrorCode::Unauthorized)
        }
    }

    /// [`DataError::unauthorized`] with the stock message.
    #[must_use]
    pub fn authentication_required() -> Self {
        Self::unauthorized(DEFAULT_UNAUTHORIZED_MESSAGE)
    }

    /// Authenticated but not permitted.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Forbidden,
            ..Self::new(message, ErrorCode::Forbidden)
        }
    }

    /// [`DataError::forbidden`] with the stock message.
    #[must_use]
    pub fn access_denied() -> Self {
        Self::forbidden(DEFAULT_FORBIDDEN_MESSAGE)
    }

    /// Constructor that produced this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Serialized name, e.g. `NotFoundError`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Stable failure category.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Structured details, if any.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Backend payload kept for diagnostics. Never serialized.
    #[must_use]
    pub fn original_error(&self) -> Option<&Value> {
        self.original_error.as_ref()
    }

    /// Resource named by a not-found error.
    #[must_use]
    pub fn resource(&self) -> Option<&str> {
        self.details
            .as_ref()
            .and_then(|details| details.get("resource"))
            .and_then(Value::as_str)
    }

    /// Per-field messages carried by a validation error.
    #[must_use]
    pub fn field_errors(&self) -> Option<FieldErrors> {
        let fields = self.details.as_ref()?.get("fields")?;
        serde_json::from_value(fields.clone()).ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct DataErrorDto {
    name: String,
    message: String,
    code: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<DataError> for DataErrorDto {
    fn from(value: DataError) -> Self {
        Self {
            name: value.kind.name().to_owned(),
            message: value.message,
            code: value.code,
            details: value.details,
        }
    }
}

impl TryFrom<DataErrorDto> for DataError {
    type Error = DataErrorDecodeError;

    fn try_from(value: DataErrorDto) -> Result<Self, Self::Error> {
        let DataErrorDto {
            name,
            message,
            code,
            details,
        } = value;

        let Some(kind) = ErrorKind::from_name(&name) else {
            return Err(DataErrorDecodeError::UnknownName { name });
        };
        if kind.fixed_code().is_some_and(|fixed| fixed != code) {
            return Err(DataErrorDecodeError::CodeMismatch { name, code });
        }

        Ok(Self {
            kind,
            code,
            message,
            details,
            original_error: None,
        })
    }
}
