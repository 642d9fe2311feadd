//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between port calls and a backend's wire
//! protocol. They contain no business logic and report every failure as a
//! [`data_errors::DataError`].
//!
//! - **supabase**: PostgREST, Auth and Storage over HTTP

pub mod supabase;
