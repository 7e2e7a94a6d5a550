//! Core domain entities.
//!
//! - [`ShortenUrl`] - A persisted code to URL mapping with its usage counter
//! - [`NewShortenUrl`] - Input for creating a record
//!
//! Entities are plain data structures without business logic.

pub mod shorten_url;

pub use shorten_url::{NewShortenUrl, ShortenUrl};
