// =============================================================================
// Shared types used across the MarketLens backend
// =============================================================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// PriceSeries
// =============================================================================

/// Contract violations raised when constructing a [`PriceSeries`].
///
/// These are distinct from the no-data condition produced by a legitimately
/// short series: a short series computes fine (it just yields no-data
/// positions), whereas these inputs are malformed and rejected upfront.
#[derive(Debug, Error)]
pub enum InvalidInput {
    #[error("timestamps and closes differ in length ({timestamps} vs {closes})")]
    LengthMismatch { timestamps: usize, closes: usize },

    #[error("timestamps must be strictly increasing (violation at index {index})")]
    UnorderedTimestamps { index: usize },

    #[error("close at index {index} is not a finite non-negative number: {value}")]
    BadClose { index: usize, value: f64 },
}

/// An ordered sequence of (timestamp, closing price) pairs for one ticker.
///
/// Closes are `Option<f64>`: `None` marks a bar the data provider reported
/// without a closing price. Rolling computations treat any window containing
/// a missing close as no-data rather than doing arithmetic on a sentinel.
#[derive(Debug, Clone, Serialize)]
pub struct PriceSeries {
    /// Display label only, never used in computation.
    pub ticker: String,
    /// UNIX timestamps in seconds, strictly increasing.
    pub timestamps: Vec<i64>,
    /// Closing prices aligned index-for-index with `timestamps`.
    pub closes: Vec<Option<f64>>,
    /// Opening price of the first bar, when the provider supplies one.
    pub open: Option<f64>,
}

impl PriceSeries {
    /// Build a validated series.
    ///
    /// Rejects mismatched lengths, non-increasing timestamps, and closes that
    /// are present but non-finite or negative. An empty series is valid; it
    /// simply produces all-no-data indicator output.
    pub fn new(
        ticker: impl Into<String>,
        timestamps: Vec<i64>,
        closes: Vec<Option<f64>>,
        open: Option<f64>,
    ) -> Result<Self, InvalidInput> {
        if timestamps.len() != closes.len() {
            return Err(InvalidInput::LengthMismatch {
                timestamps: timestamps.len(),
                closes: closes.len(),
            });
        }

        for (i, pair) in timestamps.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(InvalidInput::UnorderedTimestamps { index: i + 1 });
            }
        }

        for (i, close) in closes.iter().enumerate() {
            if let Some(v) = close {
                if !v.is_finite() || *v < 0.0 {
                    return Err(InvalidInput::BadClose { index: i, value: *v });
                }
            }
        }

        Ok(Self {
            ticker: ticker.into(),
            timestamps,
            closes,
            open,
        })
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Most recent bar with a present close.
    pub fn last_close(&self) -> Option<f64> {
        self.closes.iter().rev().find_map(|c| *c)
    }

    /// Oldest bar with a present close.
    pub fn first_close(&self) -> Option<f64> {
        self.closes.iter().find_map(|c| *c)
    }

    /// Percentage change from the first to the last present close.
    pub fn change_pct(&self) -> Option<f64> {
        let first = self.first_close()?;
        let last = self.last_close()?;
        if first == 0.0 {
            return None;
        }
        Some((last / first - 1.0) * 100.0)
    }
}

// =============================================================================
// Signal
// =============================================================================

/// Categorical interpretation of the most recent indicator value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Overbought,
    Oversold,
    Neutral,
    NoData,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overbought => write!(f, "Overbought"),
            Self::Oversold => write!(f, "Oversold"),
            Self::Neutral => write!(f, "Neutral"),
            Self::NoData => write!(f, "NoData"),
        }
    }
}

// =============================================================================
// Range
// =============================================================================

/// Chart time range selectable in the dashboard.
///
/// Each range maps to the Yahoo `(range, interval)` query pair the dashboard
/// offers as presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Range {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "max")]
    Max,
}

impl Range {
    /// Yahoo query parameters: `(range, interval)`.
    pub fn yahoo_params(self) -> (&'static str, &'static str) {
        match self {
            Self::OneDay => ("1d", "1m"),
            Self::FiveDays => ("5d", "5m"),
            Self::OneMonth => ("1mo", "30m"),
            Self::SixMonths => ("6mo", "1d"),
            Self::OneYear => ("1y", "1d"),
            Self::Max => ("max", "1d"),
        }
    }

    /// Intraday ranges format their time axis with hours and minutes.
    pub fn is_intraday(self) -> bool {
        matches!(self, Self::OneDay | Self::FiveDays | Self::OneMonth)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "1d" => Some(Self::OneDay),
            "5d" => Some(Self::FiveDays),
            "1mo" => Some(Self::OneMonth),
            "6mo" => Some(Self::SixMonths),
            "1y" => Some(Self::OneYear),
            "max" => Some(Self::Max),
            _ => None,
        }
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.yahoo_params().0)
    }
}

// =============================================================================
// TickerMatch
// =============================================================================

/// One autocomplete suggestion from the ticker search endpoint.
///
/// The provider returns loosely structured records; this is the typed subset
/// the dashboard actually uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerMatch {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortname: Option<String>,
}

impl std::fmt::Display for TickerMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.shortname {
            Some(name) => write!(f, "{} - {}", self.symbol, name),
            None => write!(f, "{}", self.symbol),
        }
    }
}
