//! Repository trait definitions for the domain layer.
//!
//! - [`ShortenUrlRepository`] - The mapping store
//!
//! Implementations live in `crate::infrastructure::persistence`; mocks are
//! generated by `mockall` for unit tests.

pub mod shorten_url_repository;

pub use shorten_url_repository::{ShortenUrlRepository, StoreSummary};

#[cfg(test)]
pub use shorten_url_repository::MockShortenUrlRepository;
