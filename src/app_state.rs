// =============================================================================
// Shared Application State — MarketLens backend
// =============================================================================
//
// Evaluations are stateless per request: every chart request re-fetches and
// recomputes from scratch. The only state shared between requests is the
// config, the outbound Yahoo client, and the short-lived search cache.

use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::market_data::{SearchCache, YahooClient};

/// State shared across request handlers via `Arc<AppState>`.
pub struct AppState {
    pub config: AppConfig,
    pub yahoo: YahooClient,
    pub search_cache: SearchCache,
    /// Instant the backend started. Used for uptime reporting.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let yahoo = YahooClient::new(Duration::from_secs(config.http_timeout_secs));
        let search_cache = SearchCache::new(Duration::from_secs(config.search_cache_ttl_secs));

        Self {
            config,
            yahoo,
            search_cache,
            start_time: Instant::now(),
        }
    }
}
