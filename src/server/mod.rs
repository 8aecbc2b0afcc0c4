//! Axum-based HTTP server implementation for roomedit.
//!
//! This module exposes the photo edit flow over HTTP: a client uploads a
//! room photo with an instruction and gets the normalized result back.
//!
//! # Components
//!
//! - `handlers`: Implementation of individual API endpoints (edits, health, metrics).
//! - `middleware`: Request ID tracking and CORS.
//! - `routes`: The main router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use handlers::{HealthCheck, HealthResponse, HealthStatus};
pub use routes::{create_router, AppState};
