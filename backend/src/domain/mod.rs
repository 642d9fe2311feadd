//! Domain vocabulary and repository ports.
//!
//! Purpose: name the functional areas of the application and the repository
//! contract each one exposes. Nothing here knows which backend serves a
//! domain; that choice is made by [`crate::provider`].
//!
//! Public surface:
//! - [`Domain`]: closed set of functional areas.
//! - [`ports`]: one async repository trait per domain.

mod data_domain;
pub mod ports;

pub use self::data_domain::{Domain, DomainParseError};
