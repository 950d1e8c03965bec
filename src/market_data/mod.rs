// =============================================================================
// Market Data Module
// =============================================================================
//
// Outbound side of the backend: the Yahoo Finance REST client and the
// short-lived TTL cache for ticker-search lookups. Everything downstream of
// here works on validated `PriceSeries` values.

pub mod cache;
pub mod yahoo;

pub use cache::SearchCache;
pub use yahoo::{FetchError, YahooClient};
