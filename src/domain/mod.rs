//! Domain layer: entities and the repository contracts they are stored through.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependency on infrastructure or HTTP.

pub mod entities;
pub mod repositories;
