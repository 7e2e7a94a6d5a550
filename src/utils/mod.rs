//! Utility functions for code generation, validation, and request handling.
//!
//! - [`code_generator`] - Random short code generation and lexical checks
//! - [`validation`] - Framework-independent request validation
//! - [`request_origin`] - Public origin derived from request headers
//! - [`db_error`] - Database error classification

pub mod code_generator;
pub mod db_error;
pub mod request_origin;
pub mod validation;
