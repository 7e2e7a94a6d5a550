//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers and the admin
//! CLI a small API.
//!
//! - [`services::ShortenService`] - Unique code allocation and persistence
//! - [`services::RedirectService`] - Code resolution with usage counting
//! - [`services::StatsService`] - Read-only record lookup

pub mod services;
