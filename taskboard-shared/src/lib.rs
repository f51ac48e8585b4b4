//! # Taskboard Shared Library
//!
//! This crate contains the in-memory data store and the authorization-aware
//! access layer used by the Taskboard API server.
//!
//! ## Module Organization
//!
//! - `models`: Users, todos and todo items
//! - `store`: Lock-guarded repositories with monotonic id allocation
//! - `auth`: Password hashing, JWT tokens, caller context and authorization
//! - `services`: Repository operations gated by ownership-or-admin checks
//! - `error`: Store error taxonomy

pub mod auth;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
