//! Closed-set error vocabulary for the data layer.
//!
//! Every repository method reports failures as a [`DataError`] carrying one of
//! the eleven [`ErrorCode`] values, whatever backend sits underneath. The
//! crate provides:
//!
//! - [`DataError`] and its specialized constructors (not found, validation,
//!   unauthorized, forbidden)
//! - [`classify`], which maps a backend-native failure payload to a
//!   [`DataError`]
//! - [`with_error_handling`], the combinator repository methods delegate
//!   through so raw backend failures never escape
//!
//! # Example
//!
//! ```
//! use data_errors::{ErrorCode, classify};
//! use serde_json::json;
//!
//! let err = classify(&json!({ "code": "23505", "message": "Resource not found" }));
//! assert_eq!(err.code(), ErrorCode::UniqueViolation);
//! ```

mod classify;
mod code;
mod error;
mod handling;

pub use classify::classify;
pub use code::ErrorCode;
pub use error::{DataError, DataErrorDecodeError, ErrorKind, FieldErrors};
pub use handling::{Failure, is_data_error, with_error_handling};
