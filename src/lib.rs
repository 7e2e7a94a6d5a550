//! # URL Shortener
//!
//! A simple web service for creating shortened links, built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The shorten URL entity and the repository trait
//! - **Application Layer** ([`application`]) - Shortening, redirect and statistics services
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite pool, migrations and repository
//! - **API Layer** ([`api`]) - REST handlers, DTOs, extractors and middleware
//!
//! ## Features
//!
//! - Random 6-character alphanumeric codes from a CSPRNG
//! - Collision retry with the primary key as the final arbiter
//! - Atomic per-redirect usage counters
//! - Structured validation errors, no internal details in 500 responses
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://shorten_url.db"
//! export BASE_URL="http://localhost:5001"  # Optional
//!
//! cargo run
//!
//! curl -X POST localhost:5001/api/v1/shorten -H 'content-type: application/json' \
//!     -d '{"url": "https://www.json.org"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{RedirectService, ShortenService, StatsService};
    pub use crate::domain::entities::{NewShortenUrl, ShortenUrl};
    pub use crate::domain::repositories::ShortenUrlRepository;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
