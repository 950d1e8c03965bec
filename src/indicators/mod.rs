// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators the dashboard
// draws. Every series function returns index-aligned output where positions
// without enough preceding samples carry an explicit `None`, so callers are
// forced to handle the no-data case instead of reading a sentinel value.

pub mod bollinger;
pub mod rolling;
pub mod rsi;

pub use bollinger::{calculate_bollinger, BollingerSeries};
pub use rsi::calculate_rsi;

use thiserror::Error;

/// Contract violations in indicator calls.
///
/// Legitimately short input is never an error: it degrades to no-data
/// positions. These variants cover inputs that are wrong no matter how much
/// data arrives.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndicatorError {
    #[error("rolling window must be at least 1")]
    InvalidWindow,

    #[error("a non-empty price series is required here")]
    EmptySeries,
}
