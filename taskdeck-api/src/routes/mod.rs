/// API route handlers
///
/// - `health`: Liveness and database connectivity
/// - `auth`: Sign-up and login (public)
/// - `users`: Account routes, self-scoped and admin-scoped
/// - `tasks`: Task routes, self-scoped and admin-scoped

pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;
