// =============================================================================
// Rolling-window aggregation
// =============================================================================
//
// Shared building blocks for the windowed indicators. Each window is
// recomputed from scratch rather than updated incrementally, so results match
// windowed-mean/std semantics exactly with no accumulated drift.
//
// Conventions:
//   - Output is index-aligned with the input; the first `window - 1` entries
//     are `None` because the window is not yet full.
//   - A window containing any missing value yields `None`.

/// Sum of a full window, or `None` if any entry is missing.
fn window_sum(window: &[Option<f64>]) -> Option<f64> {
    window.iter().try_fold(0.0, |acc, v| v.map(|x| acc + x))
}

/// Rolling arithmetic mean over `window` samples.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }

    for i in (window - 1)..values.len() {
        let slice = &values[i + 1 - window..=i];
        out[i] = window_sum(slice).map(|sum| sum / window as f64);
    }
    out
}

/// Rolling sample standard deviation (denominator `window - 1`).
///
/// With `window == 1` the unbiased estimator divides by zero, so every
/// position is `None`.
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window < 2 {
        return out;
    }

    for i in (window - 1)..values.len() {
        let slice = &values[i + 1 - window..=i];
        let Some(sum) = window_sum(slice) else {
            continue;
        };
        let mean = sum / window as f64;
        let sq_dev: f64 = slice
            .iter()
            .map(|v| {
                let x = v.unwrap_or(0.0) - mean;
                x * x
            })
            .sum();
        out[i] = Some((sq_dev / (window as f64 - 1.0)).sqrt());
    }
    out
}
