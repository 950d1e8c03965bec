// =============================================================================
// Application Configuration — serde-defaulted settings with atomic save
// =============================================================================
//
// Every tunable parameter of the backend lives here. All fields carry
// `#[serde(default)]` so that adding new fields never breaks loading an older
// config file, and persistence uses the tmp + rename pattern to prevent
// corruption on crash.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bind_addr() -> String {
    "0.0.0.0:3400".to_string()
}

fn default_ticker() -> String {
    "AAPL".to_string()
}

fn default_bollinger_window() -> usize {
    20
}

fn default_bollinger_num_std() -> f64 {
    2.0
}

fn default_rsi_window() -> usize {
    14
}

fn default_rsi_overbought() -> f64 {
    70.0
}

fn default_rsi_oversold() -> f64 {
    30.0
}

fn default_search_cache_ttl_secs() -> u64 {
    300
}

fn default_search_limit() -> usize {
    10
}

fn default_http_timeout_secs() -> u64 {
    5
}

// =============================================================================
// AppConfig
// =============================================================================

/// Top-level configuration for the MarketLens backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the REST API binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Ticker used when a chart request names none.
    #[serde(default = "default_ticker")]
    pub default_ticker: String,

    // --- Indicator parameters ------------------------------------------------

    /// Bollinger rolling window (closes per window).
    #[serde(default = "default_bollinger_window")]
    pub bollinger_window: usize,

    /// Band distance in sample standard deviations.
    #[serde(default = "default_bollinger_num_std")]
    pub bollinger_num_std: f64,

    /// RSI rolling window (deltas per window).
    #[serde(default = "default_rsi_window")]
    pub rsi_window: usize,

    /// RSI level above which the signal is Overbought (strict).
    #[serde(default = "default_rsi_overbought")]
    pub rsi_overbought: f64,

    /// RSI level below which the signal is Oversold (strict).
    #[serde(default = "default_rsi_oversold")]
    pub rsi_oversold: f64,

    // --- Remote lookups ------------------------------------------------------

    /// How long a ticker-search response stays cached.
    #[serde(default = "default_search_cache_ttl_secs")]
    pub search_cache_ttl_secs: u64,

    /// Maximum autocomplete suggestions per query.
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    /// Timeout for outbound HTTP calls to the market-data provider.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            default_ticker: default_ticker(),
            bollinger_window: default_bollinger_window(),
            bollinger_num_std: default_bollinger_num_std(),
            rsi_window: default_rsi_window(),
            rsi_overbought: default_rsi_overbought(),
            rsi_oversold: default_rsi_oversold(),
            search_cache_ttl_secs: default_search_cache_ttl_secs(),
            search_limit: default_search_limit(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;

        info!(
            path = %path.display(),
            default_ticker = %config.default_ticker,
            "config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content =
            serde_json::to_string_pretty(self).context("failed to serialise config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "config saved (atomic)");
        Ok(())
    }
}
