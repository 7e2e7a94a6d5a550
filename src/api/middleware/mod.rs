//! HTTP middleware for request processing.
//!
//! Provides observability and panic recovery.

pub mod panic;
pub mod tracing;
