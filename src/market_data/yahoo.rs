// =============================================================================
// Yahoo Finance REST API Client
// =============================================================================
//
// Public endpoints only, no authentication. Yahoo rejects requests without a
// browser-looking User-Agent, so one is installed as a default header.
//
// Two endpoints are used:
//   GET /v1/finance/search          — ticker autocomplete
//   GET /v8/finance/chart/{symbol}  — historical closes for a (range, interval)

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::types::{PriceSeries, Range, TickerMatch};

const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// Failures fetching from Yahoo.
///
/// `NoData` is separated from transport errors so the API layer can answer
/// 404 for an unknown or delisted ticker instead of a blanket 502.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no price data returned for ticker '{0}'")]
    NoData(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Yahoo Finance REST client.
#[derive(Debug, Clone)]
pub struct YahooClient {
    base_url: String,
    client: reqwest::Client,
}

impl YahooClient {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Create a client with the given outbound timeout, pointed at the
    /// production endpoint.
    pub fn new(timeout: std::time::Duration) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// Create a client pointed at a custom base URL, so tests can target a
    /// canned local server instead of Yahoo.
    pub fn with_base_url(base_url: impl Into<String>, timeout: std::time::Duration) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(timeout)
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    // -------------------------------------------------------------------------
    // Ticker search
    // -------------------------------------------------------------------------

    /// GET /v1/finance/search — autocomplete suggestions for `query`.
    ///
    /// Malformed entries in the response are skipped, never fatal. At most
    /// `limit` matches are returned.
    #[instrument(skip(self), name = "yahoo::search_tickers")]
    pub async fn search_tickers(&self, query: &str, limit: usize) -> Result<Vec<TickerMatch>> {
        let url = format!("{}/v1/finance/search", self.base_url);

        let resp = self
            .client
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await
            .context("GET /v1/finance/search request failed")?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse search response")?;

        if !status.is_success() {
            anyhow::bail!("Yahoo GET /v1/finance/search returned {status}: {body}");
        }

        let matches = parse_quotes(&body, limit);
        debug!(query, count = matches.len(), "ticker search completed");
        Ok(matches)
    }

    // -------------------------------------------------------------------------
    // Historical prices
    // -------------------------------------------------------------------------

    /// GET /v8/finance/chart/{ticker} — historical closes for `range`.
    ///
    /// JSON nulls in the close array become explicit missing values; the
    /// result is a validated [`PriceSeries`].
    #[instrument(skip(self), name = "yahoo::get_history")]
    pub async fn get_history(
        &self,
        ticker: &str,
        range: Range,
    ) -> std::result::Result<PriceSeries, FetchError> {
        let (range_param, interval) = range.yahoo_params();
        let url = format!("{}/v8/finance/chart/{}", self.base_url, ticker);

        let resp = self
            .client
            .get(&url)
            .query(&[("range", range_param), ("interval", interval)])
            .send()
            .await
            .context("GET /v8/finance/chart request failed")?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse chart response")?;

        // Yahoo answers 404 with a structured error body for unknown symbols.
        if !status.is_success() && status != reqwest::StatusCode::NOT_FOUND {
            return Err(
                anyhow::anyhow!("Yahoo GET /v8/finance/chart returned {status}: {body}").into(),
            );
        }

        let series = parse_chart(&body, ticker)?;
        debug!(ticker, %range, bars = series.len(), "history fetched");
        Ok(series)
    }
}

// =============================================================================
// Response parsing
// =============================================================================

/// Map the untyped `quotes` array into typed matches, skipping entries with
/// no symbol.
fn parse_quotes(body: &serde_json::Value, limit: usize) -> Vec<TickerMatch> {
    let Some(quotes) = body.get("quotes").and_then(|q| q.as_array()) else {
        return Vec::new();
    };

    quotes
        .iter()
        .filter_map(|q| {
            let symbol = q.get("symbol")?.as_str()?.to_string();
            let shortname = q
                .get("shortname")
                .and_then(|n| n.as_str())
                .map(str::to_string);
            Some(TickerMatch { symbol, shortname })
        })
        .take(limit)
        .collect()
}

/// Parse a /v8/finance/chart body into a [`PriceSeries`].
fn parse_chart(body: &serde_json::Value, ticker: &str) -> Result<PriceSeries, FetchError> {
    let chart = &body["chart"];

    if !chart["error"].is_null() {
        warn!(ticker, error = %chart["error"], "Yahoo chart error");
        return Err(FetchError::NoData(ticker.to_string()));
    }

    let Some(result) = chart["result"].as_array().and_then(|r| r.first()) else {
        return Err(FetchError::NoData(ticker.to_string()));
    };

    let timestamps: Vec<i64> = result["timestamp"]
        .as_array()
        .map(|arr| arr.iter().filter_map(|v| v.as_i64()).collect())
        .unwrap_or_default();

    if timestamps.is_empty() {
        return Err(FetchError::NoData(ticker.to_string()));
    }

    let quote = &result["indicators"]["quote"][0];

    let closes: Vec<Option<f64>> = quote["close"]
        .as_array()
        .map(|arr| arr.iter().map(|v| v.as_f64()).collect())
        .unwrap_or_default();

    if closes.len() != timestamps.len() {
        return Err(anyhow::anyhow!(
            "chart response misaligned: {} timestamps vs {} closes",
            timestamps.len(),
            closes.len()
        )
        .into());
    }

    // Opening price of the first bar, when present.
    let open = quote["open"]
        .as_array()
        .and_then(|arr| arr.first())
        .and_then(|v| v.as_f64());

    let series = PriceSeries::new(ticker.to_uppercase(), timestamps, closes, open)
        .map_err(|e| anyhow::anyhow!(e).context("chart response failed validation"))?;

    Ok(series)
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn base_url_defaults_to_yahoo_and_can_be_overridden() {
        let timeout = std::time::Duration::from_secs(1);
        let prod = YahooClient::new(timeout);
        assert_eq!(prod.base_url, DEFAULT_BASE_URL);

        let local = YahooClient::with_base_url("http://127.0.0.1:3999", timeout);
        assert_eq!(local.base_url, "http://127.0.0.1:3999");
    }

    #[test]
    fn parse_quotes_maps_typed_subset() {
        let body = json!({
            "quotes": [
                { "symbol": "AAPL", "shortname": "Apple Inc." },
                { "symbol": "AAPL.MX" },
                { "shortname": "no symbol, skipped" },
                { "symbol": "APLE", "shortname": "Apple Hospitality" }
            ]
        });
        let matches = parse_quotes(&body, 10);
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].symbol, "AAPL");
        assert_eq!(matches[0].shortname.as_deref(), Some("Apple Inc."));
        assert_eq!(matches[1].symbol, "AAPL.MX");
        assert_eq!(matches[1].shortname, None);
    }

    #[test]
    fn parse_quotes_respects_limit() {
        let body = json!({
            "quotes": [
                { "symbol": "A" }, { "symbol": "B" }, { "symbol": "C" }
            ]
        });
        assert_eq!(parse_quotes(&body, 2).len(), 2);
    }

    #[test]
    fn parse_quotes_tolerates_missing_array() {
        assert!(parse_quotes(&json!({}), 10).is_empty());
    }

    #[test]
    fn parse_chart_extracts_series_with_nulls_as_missing() {
        let body = json!({
            "chart": {
                "result": [{
                    "timestamp": [1000, 1060, 1120],
                    "indicators": {
                        "quote": [{
                            "open":  [99.5, 100.2, null],
                            "close": [100.0, null, 101.5]
                        }]
                    }
                }],
                "error": null
            }
        });
        let series = parse_chart(&body, "aapl").unwrap();
        assert_eq!(series.ticker, "AAPL");
        assert_eq!(series.timestamps, vec![1000, 1060, 1120]);
        assert_eq!(series.closes, vec![Some(100.0), None, Some(101.5)]);
        assert_eq!(series.open, Some(99.5));
    }

    #[test]
    fn parse_chart_reports_no_data_for_error_body() {
        let body = json!({
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found" }
            }
        });
        assert!(matches!(
            parse_chart(&body, "NOPE").unwrap_err(),
            FetchError::NoData(t) if t == "NOPE"
        ));
    }

    #[test]
    fn parse_chart_reports_no_data_for_empty_result() {
        let body = json!({ "chart": { "result": [], "error": null } });
        assert!(matches!(
            parse_chart(&body, "AAPL").unwrap_err(),
            FetchError::NoData(_)
        ));
    }

    #[test]
    fn parse_chart_rejects_misaligned_arrays() {
        let body = json!({
            "chart": {
                "result": [{
                    "timestamp": [1000, 1060],
                    "indicators": { "quote": [{ "close": [100.0] }] }
                }],
                "error": null
            }
        });
        assert!(matches!(
            parse_chart(&body, "AAPL").unwrap_err(),
            FetchError::Other(_)
        ));
    }
}
