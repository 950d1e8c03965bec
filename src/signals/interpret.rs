// =============================================================================
// Threshold interpretation
// =============================================================================
//
// Pure functions from the latest indicator values to a Signal. Same input,
// same output, nothing retained between calls.

use crate::types::Signal;

/// Default RSI thresholds.
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

/// Interpret the latest close against the latest Bollinger Bands.
///
/// Strict inequality on both sides: a close exactly on a band is Neutral.
/// Any missing input short-circuits to NoData.
pub fn interpret_bollinger(
    close: Option<f64>,
    upper: Option<f64>,
    lower: Option<f64>,
) -> Signal {
    let (Some(close), Some(upper), Some(lower)) = (close, upper, lower) else {
        return Signal::NoData;
    };

    if close > upper {
        Signal::Overbought
    } else if close < lower {
        Signal::Oversold
    } else {
        Signal::Neutral
    }
}

/// Interpret an RSI value against the standard 70/30 thresholds.
pub fn interpret_rsi(value: Option<f64>) -> Signal {
    interpret_rsi_with(value, RSI_OVERBOUGHT, RSI_OVERSOLD)
}

/// Interpret an RSI value against caller-supplied thresholds.
///
/// Strict inequality: a value exactly on a threshold is Neutral.
pub fn interpret_rsi_with(value: Option<f64>, overbought: f64, oversold: f64) -> Signal {
    let Some(value) = value else {
        return Signal::NoData;
    };

    if value > overbought {
        Signal::Overbought
    } else if value < oversold {
        Signal::Oversold
    } else {
        Signal::Neutral
    }
}
