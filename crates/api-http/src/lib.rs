//! HTTP API Layer
//!
//! Serves the job postings resource over axum. Bodies use wire naming
//! (camelCase); the service below speaks storage naming.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use server::{router, HttpServer, HttpServerConfig};
pub use types::AppState;
