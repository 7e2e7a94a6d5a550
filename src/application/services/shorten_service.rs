//! Short code allocation.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::{NewShortenUrl, ShortenUrl};
use crate::domain::repositories::ShortenUrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CODE_LENGTH, generate_code};

/// Service allocating unique short codes for original URLs.
///
/// The existence pre-check avoids most wasted inserts; the store's primary key
/// is what guarantees uniqueness when two requests race for the same code.
pub struct ShortenService<R: ShortenUrlRepository> {
    repository: Arc<R>,
    max_attempts: Option<u32>,
}

impl<R: ShortenUrlRepository> ShortenService<R> {
    /// Creates a new shortening service.
    ///
    /// `max_attempts` caps the number of candidate codes tried per call.
    /// `None` retries until a free code is found.
    pub fn new(repository: Arc<R>, max_attempts: Option<u32>) -> Self {
        Self {
            repository,
            max_attempts,
        }
    }

    /// Allocates a fresh code for `original_url` and persists the mapping.
    ///
    /// # Algorithm
    ///
    /// 1. Generate a random 6-character candidate
    /// 2. Skip it if the store already has it
    /// 3. Insert; on a lost race ([`AppError::DuplicateKey`]) start over
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CapacityExhausted`] if the attempt cap is reached.
    /// Returns [`AppError::Database`] on database errors.
    pub async fn shorten(&self, original_url: &str) -> Result<ShortenUrl, AppError> {
        let mut attempts: u32 = 0;

        loop {
            if let Some(max) = self.max_attempts
                && attempts >= max
            {
                return Err(AppError::CapacityExhausted { attempts });
            }
            attempts += 1;

            let code = generate_code(CODE_LENGTH);

            if self.repository.exists(&code).await? {
                debug!(code = %code, attempts, "Short code collision");
                metrics::counter!("shorten_url_collisions_total").increment(1);
                continue;
            }

            let new_record = NewShortenUrl::now(code, original_url.to_string());
            match self.repository.insert(new_record).await {
                Ok(record) => {
                    metrics::counter!("shorten_url_created_total").increment(1);
                    return Ok(record);
                }
                Err(AppError::DuplicateKey(detail)) => {
                    warn!(detail = %detail, attempts, "Lost insert race on short code, retrying");
                    metrics::counter!("shorten_url_collisions_total").increment(1);
                }
                Err(e) => return Err(e),
            }
        }
    }
}
