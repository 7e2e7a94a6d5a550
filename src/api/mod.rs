//! REST API layer for HTTP request/response handling.
//!
//! - [`dto`] - Request/response serialization
//! - [`extractors`] - Validating request extractors
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing and panic recovery
//! - [`routes`] - Versioned API routes

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
