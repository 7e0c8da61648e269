/// Authentication and authorization
///
/// This module contains the credential/session subsystem and the actor model:
///
/// - `password`: Argon2id password hashing and verification
/// - `token`: Signed, time-bounded session tokens (issue + verify)
/// - `actor`: The request-scoped actor identity and the owner-or-admin
///   authorization predicate
/// - `middleware`: Axum middleware resolving bearer tokens into actors, plus
///   the admin-only gate

pub mod actor;
pub mod middleware;
pub mod password;
pub mod token;

pub use actor::{Actor, Role};
