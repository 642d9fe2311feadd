//! Combinator that keeps backend failures from leaking out of repositories.

use std::future::Future;

use serde_json::Value;
use tracing::debug;

use crate::classify::classify;
use crate::error::DataError;

/// Failure raised by a backend call before normalization.
///
/// Adapters either already hold a [`DataError`] (for example a transport
/// timeout they recognized themselves) or the backend-native payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// Already normalized.
    Domain(DataError),
    /// Backend-native payload awaiting classification.
    Backend(Value),
}

impl From<DataError> for Failure {
    fn from(value: DataError) -> Self {
        Self::Domain(value)
    }
}

impl From<Value> for Failure {
    fn from(value: Value) -> Self {
        Self::Backend(value)
    }
}

impl Failure {
    /// Normalize into a domain error.
    ///
    /// Domain errors pass through untouched, serialized domain errors are
    /// rehydrated, and everything else goes through [`classify`].
    #[must_use]
    pub fn into_data_error(self) -> DataError {
        match self {
            Self::Domain(error) => error,
            Self::Backend(value) => match serde_json::from_value::<DataError>(value.clone()) {
                Ok(error) => error,
                Err(_) => classify(&value),
            },
        }
    }
}

/// Whether a JSON payload is a serialized [`DataError`].
///
/// The check is by value: the payload must carry a known `name` and a `code`
/// consistent with it, so it survives any serialization boundary.
///
/// # Examples
/// ```
/// use data_errors::{DataError, is_data_error};
/// use serde_json::json;
///
/// let wire = serde_json::to_value(DataError::access_denied()).expect("serializes");
/// assert!(is_data_error(&wire));
/// assert!(!is_data_error(&json!({ "code": "42501", "message": "denied" })));
/// ```
#[must_use]
pub fn is_data_error(value: &Value) -> bool {
    serde_json::from_value::<DataError>(value.clone()).is_ok()
}

/// Await a backend operation once and normalize its failure.
///
/// Successful results, including `None` or empty collections, are returned
/// unchanged. A failure that is already a [`DataError`] is returned as is;
/// anything else is classified. `resource` only labels the log event.
///
/// # Errors
///
/// Returns the normalized [`DataError`] when `operation` fails.
///
/// # Examples
/// ```
/// use data_errors::{ErrorCode, Failure, with_error_handling};
/// use serde_json::json;
///
/// let rt = tokio::runtime::Builder::new_current_thread().build().expect("runtime");
/// let result: Result<(), _> = rt.block_on(with_error_handling(
///     async { Err(Failure::Backend(json!({ "code": "23503", "message": "fk" }))) },
///     Some("Payment"),
/// ));
/// assert_eq!(result.map_err(|e| e.code()), Err(ErrorCode::ForeignKeyViolation));
/// ```
pub async fn with_error_handling<T, E, Fut>(
    operation: Fut,
    resource: Option<&str>,
) -> Result<T, DataError>
where
    Fut: Future<Output = Result<T, E>>,
    E: Into<Failure>,
{
    operation.await.map_err(|failure| {
        let error = failure.into().into_data_error();
        debug!(
            resource = resource.unwrap_or("unspecified"),
            code = %error.code(),
            "data operation failed"
        );
        error
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::ErrorCode;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[tokio::test]
    async fn success_passes_through_unchanged() {
        let result = with_error_handling(async { Ok::<_, Failure>(None::<u32>) }, None).await;
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn domain_errors_are_not_rewrapped() {
        let original = DataError::not_found("User", Some("7"))
            .with_original_error(json!({ "trace": "kept" }));
        let expected = original.clone();

        let result: Result<(), _> =
            with_error_handling(async move { Err(original) }, Some("User")).await;

        let err = result.err();
        assert_eq!(err.as_ref(), Some(&expected));
        assert_eq!(
            err.as_ref().and_then(DataError::original_error),
            Some(&json!({ "trace": "kept" }))
        );
    }

    #[tokio::test]
    async fn backend_payloads_are_classified() {
        let result: Result<(), _> = with_error_handling(
            async { Err(json!({ "status": 403, "message": "nope" })) },
            None,
        )
        .await;
        assert_eq!(result.map_err(|e| e.kind()), Err(ErrorKind::Forbidden));
    }

    #[test]
    fn serialized_domain_errors_are_rehydrated() {
        let wire = serde_json::to_value(DataError::validation("bad", None)).unwrap_or_default();
        let err = Failure::Backend(wire).into_data_error();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert!(err.original_error().is_none());
    }

    #[test]
    fn backend_shapes_are_not_data_errors() {
        assert!(!is_data_error(&Value::Null));
        assert!(!is_data_error(&json!({ "name": "DataError", "code": "23505" })));
    }
}
