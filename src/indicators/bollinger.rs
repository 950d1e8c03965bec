// =============================================================================
// Bollinger Bands
// =============================================================================
//
// A middle band (SMA over `window` closes) bracketed by an upper and lower
// band at `num_std` sample standard deviations. The full series is computed
// so the dashboard can draw the envelope along the whole price axis; the
// interpreter only looks at the latest bar.

use super::rolling::{rolling_mean, rolling_std};
use super::IndicatorError;

/// Full Bollinger Band series, index-aligned with the input closes.
///
/// Positions before the window is full, and any window touching a missing
/// close, are `None`, never zero or extrapolated.
#[derive(Debug, Clone)]
pub struct BollingerSeries {
    pub sma: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

impl BollingerSeries {
    /// Latest `(sma, upper, lower)` triple, each possibly no-data.
    pub fn last(&self) -> (Option<f64>, Option<f64>, Option<f64>) {
        (
            self.sma.last().copied().flatten(),
            self.upper.last().copied().flatten(),
            self.lower.last().copied().flatten(),
        )
    }
}

/// Calculate Bollinger Bands for the given closing prices.
///
/// - `Upper[i] = SMA[i] + num_std * StdDev[i]`
/// - `Lower[i] = SMA[i] - num_std * StdDev[i]`
///
/// StdDev uses the unbiased sample estimator (denominator `window - 1`), so
/// with `window == 1` the SMA equals the input but the bands stay no-data.
///
/// Input shorter than `window` is not an error: the result is entirely
/// no-data and the caller checks before use. `window == 0` is a contract
/// violation.
pub fn calculate_bollinger(
    closes: &[Option<f64>],
    window: usize,
    num_std: f64,
) -> Result<BollingerSeries, IndicatorError> {
    if window == 0 {
        return Err(IndicatorError::InvalidWindow);
    }

    let sma = rolling_mean(closes, window);
    let std = rolling_std(closes, window);

    let upper = sma
        .iter()
        .zip(&std)
        .map(|(m, s)| Some(m.as_ref()? + num_std * s.as_ref()?))
        .collect();
    let lower = sma
        .iter()
        .zip(&std)
        .map(|(m, s)| Some(m.as_ref()? - num_std * s.as_ref()?))
        .collect();

    Ok(BollingerSeries { sma, upper, lower })
}
