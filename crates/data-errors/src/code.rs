//! Stable error codes shared by every data-layer failure.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Machine-readable failure category.
///
/// The set is closed: callers branch on these values (or on the error kind)
/// and never on message text. Serialized in `SCREAMING_SNAKE_CASE`, which is
/// also what [`ErrorCode::as_str`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The backend could not be reached.
    ConnectionFailed,
    /// The backend did not answer in time.
    Timeout,
    /// The requested record does not exist.
    NotFound,
    /// The record being created already exists.
    AlreadyExists,
    /// Input failed validation.
    ValidationFailed,
    /// Authentication is missing or invalid.
    Unauthorized,
    /// Authenticated, but not permitted.
    Forbidden,
    /// A referenced record does not exist.
    ForeignKeyViolation,
    /// A uniqueness constraint was violated.
    UniqueViolation,
    /// Nothing more specific is known.
    Unknown,
    /// The backend reported a failure no other code describes.
    ProviderError,
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::ConnectionFailed,
        Self::Timeout,
        Self::NotFound,
        Self::AlreadyExists,
        Self::ValidationFailed,
        Self::Unauthorized,
        Self::Forbidden,
        Self::ForeignKeyViolation,
        Self::UniqueViolation,
        Self::Unknown,
        Self::ProviderError,
    ];

    /// Wire representation of the code.
    ///
    /// # Examples
    /// ```
    /// use data_errors::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::UniqueViolation.as_str(), "UNIQUE_VIOLATION");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConnectionFailed => "CONNECTION_FAILED",
            Self::Timeout => "TIMEOUT",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::ForeignKeyViolation => "FOREIGN_KEY_VIOLATION",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::Unknown => "UNKNOWN",
            Self::ProviderError => "PROVIDER_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_representation_matches_as_str() {
        for code in ErrorCode::ALL {
            let json = serde_json::to_value(code).unwrap_or_default();
            assert_eq!(json, serde_json::Value::from(code.as_str()));
        }
    }
}
