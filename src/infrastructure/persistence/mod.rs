//! SQLite persistence.
//!
//! - [`database`] - Connection pool setup and embedded migrations
//! - [`SqliteShortenUrlRepository`] - The mapping store

pub mod database;
pub mod sqlite_shorten_url_repository;

pub use database::{PoolSettings, connect, run_migrations};
pub use sqlite_shorten_url_repository::SqliteShortenUrlRepository;
