// =============================================================================
// Search Cache — TTL cache for ticker-search responses
// =============================================================================
//
// Autocomplete fires on every keystroke, so identical queries repeat within
// seconds. Responses are cached per normalised query and expire after the
// configured TTL. This is the only state shared between requests.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::debug;

use crate::types::TickerMatch;

struct CacheEntry {
    at: Instant,
    matches: Vec<TickerMatch>,
}

/// TTL cache of ticker-search responses keyed by normalised query.
pub struct SearchCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl SearchCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn normalise(query: &str) -> String {
        query.trim().to_lowercase()
    }

    /// Cached matches for `query`, if present and fresh. Expired entries are
    /// evicted on access.
    pub fn get(&self, query: &str) -> Option<Vec<TickerMatch>> {
        let key = Self::normalise(query);

        {
            let entries = self.entries.read();
            if let Some(entry) = entries.get(&key) {
                if entry.at.elapsed() < self.ttl {
                    debug!(query = %key, "search cache hit");
                    return Some(entry.matches.clone());
                }
            } else {
                return None;
            }
        }

        // Entry exists but is stale.
        self.entries.write().remove(&key);
        debug!(query = %key, "search cache entry expired");
        None
    }

    pub fn insert(&self, query: &str, matches: Vec<TickerMatch>) {
        let key = Self::normalise(query);
        self.entries.write().insert(
            key,
            CacheEntry {
                at: Instant::now(),
                matches,
            },
        );
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn matches_of(symbols: &[&str]) -> Vec<TickerMatch> {
        symbols
            .iter()
            .map(|s| TickerMatch {
                symbol: s.to_string(),
                shortname: None,
            })
            .collect()
    }

    #[test]
    fn fresh_entry_is_returned() {
        let cache = SearchCache::new(Duration::from_secs(300));
        cache.insert("apple", matches_of(&["AAPL"]));
        let hit = cache.get("apple").unwrap();
        assert_eq!(hit[0].symbol, "AAPL");
    }

    #[test]
    fn queries_are_normalised() {
        let cache = SearchCache::new(Duration::from_secs(300));
        cache.insert("  Apple ", matches_of(&["AAPL"]));
        assert!(cache.get("apple").is_some());
        assert!(cache.get("APPLE").is_some());
    }

    #[test]
    fn missing_entry_is_none() {
        let cache = SearchCache::new(Duration::from_secs(300));
        assert!(cache.get("tesla").is_none());
    }

    #[test]
    fn stale_entry_is_evicted() {
        let cache = SearchCache::new(Duration::from_millis(10));
        cache.insert("apple", matches_of(&["AAPL"]));
        std::thread::sleep(Duration::from_millis(20));
        assert!(cache.get("apple").is_none());
        // Evicted, not just filtered.
        assert!(cache.entries.read().is_empty());
    }
}
