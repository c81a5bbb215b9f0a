//! Attachment backend service

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Handler routes
pub mod routes;

/// Server bootstrap
pub mod server;

/// Environment and error types
pub mod types;
