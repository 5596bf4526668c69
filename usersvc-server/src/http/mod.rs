//! HTTP layer
//!
//! Axum server with:
//! - CORS (frontend origins by default)
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses with a `detail` field

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, ServerConfig, ServerError};
