//! Shared application state injected into every handler.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::application::services::{RedirectService, ShortenService, StatsService};
use crate::infrastructure::persistence::SqliteShortenUrlRepository;

pub type AppShortenService = ShortenService<SqliteShortenUrlRepository>;
pub type AppRedirectService = RedirectService<SqliteShortenUrlRepository>;
pub type AppStatsService = StatsService<SqliteShortenUrlRepository>;

#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<AppShortenService>,
    pub redirect_service: Arc<AppRedirectService>,
    pub stats_service: Arc<AppStatsService>,
    /// Public origin for short links; `None` uses the request origin.
    pub base_url: Option<Arc<str>>,
}

impl AppState {
    /// Wires all services on top of one SQLite pool.
    pub fn new(pool: Arc<SqlitePool>, code_max_attempts: Option<u32>, base_url: Option<String>) -> Self {
        let repository = Arc::new(SqliteShortenUrlRepository::new(pool));

        Self {
            shorten_service: Arc::new(ShortenService::new(
                repository.clone(),
                code_max_attempts,
            )),
            redirect_service: Arc::new(RedirectService::new(repository.clone())),
            stats_service: Arc::new(StatsService::new(repository)),
            base_url: base_url.map(Arc::from),
        }
    }
}
