// =============================================================================
// Diagnostic summary
// =============================================================================
//
// The short text block shown under the charts: last price, percent change
// over the requested range, and one line per enabled indicator with its
// resolved Signal. Built once per request from the latest bar.

use serde::Serialize;

use crate::indicators::{BollingerSeries, IndicatorError};
use crate::signals::interpret::{interpret_bollinger, interpret_rsi_with};
use crate::types::{PriceSeries, Signal};

/// The latest reading of one indicator plus its interpretation.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorReading {
    /// Latest value, when one exists (the RSI level; absent for Bollinger,
    /// where the signal is positional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    pub signal: Signal,
    /// Human-readable caption for the dashboard.
    pub detail: String,
}

/// Per-request diagnostic block rendered under the charts.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub ticker: String,
    /// Opening price of the first bar, shown alongside the last price when
    /// the provider supplies one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bollinger: Option<IndicatorReading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<IndicatorReading>,
    pub summary: String,
}

impl Diagnostic {
    /// Build the diagnostic for the latest bar.
    ///
    /// `bands` and `rsi` are the indicator series for whichever indicators
    /// the request enabled; pass `None` for a disabled indicator and it is
    /// simply omitted from the block.
    ///
    /// An empty series is a contract violation here: a summary needs at
    /// least one bar to describe.
    pub fn build(
        series: &PriceSeries,
        bands: Option<&BollingerSeries>,
        rsi: Option<&[Option<f64>]>,
        rsi_overbought: f64,
        rsi_oversold: f64,
    ) -> Result<Self, IndicatorError> {
        if series.is_empty() {
            return Err(IndicatorError::EmptySeries);
        }

        // The latest bar, aligned with the latest indicator positions. This
        // may itself be missing, which interprets to NoData.
        let latest_close = series.closes.last().copied().flatten();

        let bollinger = bands.map(|b| {
            let (_, upper, lower) = b.last();
            let signal = interpret_bollinger(latest_close, upper, lower);
            IndicatorReading {
                value: None,
                signal,
                detail: bollinger_caption(signal).to_string(),
            }
        });

        let rsi = rsi.map(|r| {
            let value = r.last().copied().flatten();
            let signal = interpret_rsi_with(value, rsi_overbought, rsi_oversold);
            let detail = match value {
                Some(v) => format!("RSI {v:.2} -> {}", signal_caption(signal)),
                None => "RSI has no data yet".to_string(),
            };
            IndicatorReading {
                value,
                signal,
                detail,
            }
        });

        let summary = build_summary(series, bollinger.as_ref(), rsi.as_ref());

        Ok(Self {
            ticker: series.ticker.clone(),
            open: series.open,
            last_price: series.last_close(),
            change_pct: series.change_pct(),
            bollinger,
            rsi,
            summary,
        })
    }
}

fn bollinger_caption(signal: Signal) -> &'static str {
    match signal {
        Signal::Overbought => "price above the upper band -> possible overbought",
        Signal::Oversold => "price below the lower band -> possible oversold",
        Signal::Neutral => "price inside the bands -> neutral zone",
        Signal::NoData => "not enough data for the Bollinger window",
    }
}

fn signal_caption(signal: Signal) -> &'static str {
    match signal {
        Signal::Overbought => "overbought",
        Signal::Oversold => "oversold",
        Signal::Neutral => "neutral zone",
        Signal::NoData => "no data",
    }
}

fn build_summary(
    series: &PriceSeries,
    bollinger: Option<&IndicatorReading>,
    rsi: Option<&IndicatorReading>,
) -> String {
    let mut parts = Vec::new();

    match (series.last_close(), series.change_pct()) {
        (Some(price), Some(pct)) => {
            parts.push(format!("{} ${price:.2} ({pct:+.2}%)", series.ticker))
        }
        (Some(price), None) => parts.push(format!("{} ${price:.2}", series.ticker)),
        _ => parts.push(format!("{}: no price data", series.ticker)),
    }

    if let Some(b) = bollinger {
        parts.push(format!("Bollinger: {}", b.signal));
    }
    if let Some(r) = rsi {
        parts.push(format!("RSI: {}", r.signal));
    }

    parts.join(" | ")
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{calculate_bollinger, calculate_rsi};

    fn series_of(values: &[f64]) -> PriceSeries {
        PriceSeries::new(
            "TEST",
            (0..values.len() as i64).collect(),
            values.iter().copied().map(Some).collect(),
            None,
        )
        .unwrap()
    }

    #[test]
    fn empty_series_is_a_contract_violation() {
        let s = PriceSeries::new("TEST", vec![], vec![], None).unwrap();
        assert_eq!(
            Diagnostic::build(&s, None, None, 70.0, 30.0).unwrap_err(),
            IndicatorError::EmptySeries
        );
    }

    #[test]
    fn disabled_indicators_are_omitted() {
        let s = series_of(&[10.0, 11.0, 12.0]);
        let d = Diagnostic::build(&s, None, None, 70.0, 30.0).unwrap();
        assert!(d.bollinger.is_none());
        assert!(d.rsi.is_none());
        assert_eq!(d.last_price, Some(12.0));
        assert!((d.change_pct.unwrap() - 20.0).abs() < 1e-12);
        assert!(d.summary.starts_with("TEST $12.00"));
    }

    #[test]
    fn short_series_reads_no_data() {
        let s = series_of(&[10.0, 11.0, 12.0]);
        let bands = calculate_bollinger(&s.closes, 20, 2.0).unwrap();
        let rsi = calculate_rsi(&s.closes, 14).unwrap();
        let d = Diagnostic::build(&s, Some(&bands), Some(&rsi), 70.0, 30.0).unwrap();
        assert_eq!(d.bollinger.unwrap().signal, Signal::NoData);
        let r = d.rsi.unwrap();
        assert_eq!(r.signal, Signal::NoData);
        assert_eq!(r.value, None);
    }

    #[test]
    fn opening_price_is_carried_through() {
        let s = PriceSeries::new(
            "TEST",
            vec![1, 2],
            vec![Some(10.0), Some(11.0)],
            Some(9.5),
        )
        .unwrap();
        let d = Diagnostic::build(&s, None, None, 70.0, 30.0).unwrap();
        assert_eq!(d.open, Some(9.5));

        let without = PriceSeries::new("TEST", vec![1], vec![Some(10.0)], None).unwrap();
        let d = Diagnostic::build(&without, None, None, 70.0, 30.0).unwrap();
        assert_eq!(d.open, None);
    }

    #[test]
    fn single_net_gain_reads_overbought() {
        // 14 flat closes then one up-tick: RSI 100, Overbought.
        let mut values = vec![10.0; 14];
        values.push(11.0);
        let s = series_of(&values);
        let rsi = calculate_rsi(&s.closes, 14).unwrap();
        let d = Diagnostic::build(&s, None, Some(&rsi), 70.0, 30.0).unwrap();
        let r = d.rsi.unwrap();
        assert_eq!(r.signal, Signal::Overbought);
        assert!((r.value.unwrap() - 100.0).abs() < 1e-10);
        assert!(d.summary.contains("RSI: Overbought"));
    }

    #[test]
    fn trending_series_produces_deterministic_bollinger_signal() {
        let values: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let s = series_of(&values);
        let bands = calculate_bollinger(&s.closes, 20, 2.0).unwrap();
        let d1 = Diagnostic::build(&s, Some(&bands), None, 70.0, 30.0).unwrap();
        let d2 = Diagnostic::build(&s, Some(&bands), None, 70.0, 30.0).unwrap();
        let (s1, s2) = (d1.bollinger.unwrap().signal, d2.bollinger.unwrap().signal);
        assert_eq!(s1, s2);
        assert_ne!(s1, Signal::NoData);
    }

    #[test]
    fn all_missing_closes_read_no_data_everywhere() {
        let s = PriceSeries::new(
            "TEST",
            (0..30).collect(),
            vec![None; 30],
            None,
        )
        .unwrap();
        let bands = calculate_bollinger(&s.closes, 20, 2.0).unwrap();
        let rsi = calculate_rsi(&s.closes, 14).unwrap();
        let d = Diagnostic::build(&s, Some(&bands), Some(&rsi), 70.0, 30.0).unwrap();
        assert_eq!(d.bollinger.unwrap().signal, Signal::NoData);
        assert_eq!(d.rsi.unwrap().signal, Signal::NoData);
        assert_eq!(d.last_price, None);
        assert!(d.summary.contains("no price data"));
    }
}
