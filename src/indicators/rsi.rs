// =============================================================================
// Relative Strength Index (RSI) — simple rolling average
// =============================================================================
//
// Step 1 — delta[i] = close[i] - close[i-1]; the first bar has no delta.
// Step 2 — gains clip deltas at 0 from below, losses from above.
// Step 3 — avg_gain / avg_loss = simple rolling mean over `window` deltas
//          (plain windowed mean, not Wilder smoothing).
// Step 4 — RS = avg_gain / avg_loss, RSI = 100 - 100 / (1 + RS).
//
// Degenerate ratios are resolved deterministically instead of leaking a
// division artefact to the interpreter:
//   avg_loss == 0, avg_gain > 0   => RSI = 100 (only gains in the window)
//   avg_loss == 0, avg_gain == 0  => RSI = 50  (flat window, neutral)

use super::rolling::rolling_mean;
use super::IndicatorError;

/// Compute the full RSI series, index-aligned with `closes`.
///
/// Because every sample consumes one delta and the first bar has none, the
/// first defined output sits at index `window`; everything before is `None`.
/// A missing close poisons the two deltas it touches, and any window holding
/// a poisoned delta is no-data.
///
/// Values are always within `[0, 100]`. `window == 0` is a contract
/// violation; short input is not.
pub fn calculate_rsi(
    closes: &[Option<f64>],
    window: usize,
) -> Result<Vec<Option<f64>>, IndicatorError> {
    if window == 0 {
        return Err(IndicatorError::InvalidWindow);
    }

    let n = closes.len();
    let mut gains: Vec<Option<f64>> = vec![None; n];
    let mut losses: Vec<Option<f64>> = vec![None; n];

    for i in 1..n {
        if let (Some(prev), Some(cur)) = (closes[i - 1], closes[i]) {
            let delta = cur - prev;
            gains[i] = Some(delta.max(0.0));
            losses[i] = Some((-delta).max(0.0));
        }
    }

    let avg_gain = rolling_mean(&gains, window);
    let avg_loss = rolling_mean(&losses, window);

    let rsi = avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(g, l)| match (g, l) {
            (Some(g), Some(l)) => Some(rsi_from_averages(*g, *l)),
            _ => None,
        })
        .collect();

    Ok(rsi)
}

/// Convert average gain / average loss into an RSI value in [0, 100].
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // Flat window, neutral by convention.
    } else if avg_loss == 0.0 {
        100.0 // Only gains.
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn present(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn zero_window_is_rejected() {
        assert_eq!(
            calculate_rsi(&present(&[1.0, 2.0, 3.0]), 0).unwrap_err(),
            IndicatorError::InvalidWindow
        );
    }

    #[test]
    fn short_input_is_entirely_no_data() {
        // 14 closes give only 13 deltas, not enough for window 14.
        let closes = present(&(1..=14).map(|x| x as f64).collect::<Vec<_>>());
        let rsi = calculate_rsi(&closes, 14).unwrap();
        assert_eq!(rsi.len(), 14);
        assert!(rsi.iter().all(|v| v.is_none()));
    }

    #[test]
    fn first_defined_value_sits_at_index_window() {
        let closes = present(&(1..=30).map(|x| x as f64).collect::<Vec<_>>());
        let rsi = calculate_rsi(&closes, 14).unwrap();
        for i in 0..14 {
            assert!(rsi[i].is_none(), "rsi[{i}] should be no-data");
        }
        assert!(rsi[14].is_some());
    }

    #[test]
    fn all_gains_hit_one_hundred() {
        let closes = present(&(1..=30).map(|x| x as f64).collect::<Vec<_>>());
        let rsi = calculate_rsi(&closes, 14).unwrap();
        for v in rsi.into_iter().flatten() {
            assert!((v - 100.0).abs() < 1e-10, "expected 100.0, got {v}");
        }
    }

    #[test]
    fn all_losses_hit_zero() {
        let closes = present(&(1..=30).rev().map(|x| x as f64).collect::<Vec<_>>());
        let rsi = calculate_rsi(&closes, 14).unwrap();
        for v in rsi.into_iter().flatten() {
            assert!(v.abs() < 1e-10, "expected 0.0, got {v}");
        }
    }

    #[test]
    fn flat_market_is_neutral_fifty() {
        let closes = present(&[100.0; 30]);
        let rsi = calculate_rsi(&closes, 14).unwrap();
        for v in rsi.into_iter().flatten() {
            assert!((v - 50.0).abs() < 1e-10, "expected 50.0, got {v}");
        }
    }

    #[test]
    fn single_gain_among_flat_deltas_is_one_hundred() {
        // 14 flat closes then one up-tick: 14 deltas, one positive and the
        // rest zero, so avg_loss = 0 and avg_gain > 0.
        let mut values = vec![10.0; 14];
        values.push(11.0);
        let rsi = calculate_rsi(&present(&values), 14).unwrap();
        assert!((rsi[14].unwrap() - 100.0).abs() < 1e-10);
    }

    #[test]
    fn values_stay_in_range() {
        let closes = present(&[
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89,
            46.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ]);
        let rsi = calculate_rsi(&closes, 14).unwrap();
        for v in rsi.into_iter().flatten() {
            assert!((0.0..=100.0).contains(&v), "RSI {v} out of range");
        }
    }

    #[test]
    fn missing_close_poisons_both_adjacent_deltas() {
        let mut values: Vec<Option<f64>> =
            (1..=40).map(|x| Some(x as f64)).collect();
        values[20] = None;
        let rsi = calculate_rsi(&values, 14).unwrap();
        // Deltas 20 and 21 are poisoned; windows ending at 20..=34 touch one.
        for i in 20..35 {
            assert!(rsi[i].is_none(), "rsi[{i}] should be no-data");
        }
        assert!(rsi[35].is_some());
    }

    #[test]
    fn all_missing_input_yields_all_no_data() {
        let closes: Vec<Option<f64>> = vec![None; 30];
        let rsi = calculate_rsi(&closes, 14).unwrap();
        assert!(rsi.iter().all(|v| v.is_none()));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(calculate_rsi(&[], 14).unwrap().is_empty());
    }
}
