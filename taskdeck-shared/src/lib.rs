//! # Taskdeck Shared Library
//!
//! This crate contains the core of the Taskdeck task-tracking backend: the
//! actor-scoped authorization layer, the credential/session subsystem, and the
//! domain services and repositories built on top of them. The `taskdeck-api`
//! crate is a thin HTTP shell over this crate.
//!
//! ## Module Organization
//!
//! - `auth`: Password hashing, session tokens, the actor model and the
//!   owner-or-admin authorization predicate, request middleware
//! - `models`: Domain entities (users, tasks) and their input shapes
//! - `repos`: Repository traits and Postgres implementations
//! - `services`: Domain services (validation + orchestration)
//! - `db`: Connection pool and schema bootstrap
//! - `error`: The domain error taxonomy

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod repos;
pub mod services;

pub use error::Error;

/// Current version of the Taskdeck shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
