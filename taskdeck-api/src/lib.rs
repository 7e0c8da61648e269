//! # TaskDeck API Server
//!
//! HTTP transport shell over `taskdeck-shared`: configuration, the Axum
//! router and application state, error-to-status mapping, and the route
//! handlers. All domain rules (validation, the owner-or-admin rule,
//! credential handling) live in the shared crate; handlers only translate
//! between HTTP and the services.

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
