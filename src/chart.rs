// =============================================================================
// Chart payload construction — ECharts option objects
// =============================================================================
//
// The frontend renders whatever option object it receives, so the shape here
// mirrors the ECharts API: a category x-axis of formatted timestamps and one
// series per line. No-data positions are serialised as JSON nulls, which
// ECharts renders as gaps; values are rounded to cents.

use chrono::DateTime;
use serde_json::{json, Value};

use crate::indicators::BollingerSeries;
use crate::types::{PriceSeries, Range};

/// Format the time axis: intraday ranges keep hours and minutes, daily
/// ranges keep the date only.
fn axis_labels(timestamps: &[i64], range: Range) -> Vec<String> {
    let fmt = if range.is_intraday() {
        "%Y-%m-%d %H:%M"
    } else {
        "%Y-%m-%d"
    };
    timestamps
        .iter()
        .map(|ts| {
            DateTime::from_timestamp(*ts, 0)
                .map(|dt| dt.format(fmt).to_string())
                .unwrap_or_else(|| ts.to_string())
        })
        .collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Serialise an indicator series: rounded numbers, nulls for no-data.
fn chart_points(values: &[Option<f64>]) -> Vec<Value> {
    values
        .iter()
        .map(|v| match v {
            Some(x) => json!(round2(*x)),
            None => Value::Null,
        })
        .collect()
}

/// Main price chart: the close line with a dashed mark line at the last
/// price, plus the Bollinger envelope when enabled.
pub fn price_chart(series: &PriceSeries, range: Range, bands: Option<&BollingerSeries>) -> Value {
    let labels = axis_labels(&series.timestamps, range);
    let last_price = series.last_close().map(round2);

    let mut chart_series = vec![json!({
        "name": "Price",
        "type": "line",
        "data": chart_points(&series.closes),
        "smooth": true,
        "showSymbol": true,
        "symbolSize": 6,
        "lineStyle": { "width": 2, "color": "#007bff" },
        "itemStyle": { "color": "#007bff", "borderColor": "#fff", "borderWidth": 2 },
        "areaStyle": { "opacity": 0.08, "color": "#007bff" },
        "markLine": {
            "symbol": "none",
            "label": { "position": "end", "color": "#007bff" },
            "lineStyle": { "color": "#007bff", "type": "dashed", "width": 1 },
            "data": match last_price {
                Some(p) => json!([{ "yAxis": p }]),
                None => json!([]),
            }
        }
    })];

    if let Some(b) = bands {
        chart_series.push(json!({
            "name": "SMA",
            "type": "line",
            "data": chart_points(&b.sma),
            "lineStyle": { "type": "dashed", "color": "#00bcd4" },
            "showSymbol": false
        }));
        chart_series.push(json!({
            "name": "Upper Band",
            "type": "line",
            "data": chart_points(&b.upper),
            "lineStyle": { "width": 1, "color": "#aaa" },
            "showSymbol": false
        }));
        chart_series.push(json!({
            "name": "Lower Band",
            "type": "line",
            "data": chart_points(&b.lower),
            "lineStyle": { "width": 1, "color": "#aaa" },
            "showSymbol": false
        }));
    }

    json!({
        "tooltip": {
            "trigger": "axis",
            "axisPointer": { "type": "cross", "label": { "backgroundColor": "#007bff" } }
        },
        "xAxis": {
            "type": "category",
            "data": labels,
            "axisLabel": { "show": false },
            "axisLine": { "show": false },
            "axisTick": { "show": false }
        },
        "yAxis": {
            "type": "value",
            "scale": true,
            "axisLine": { "show": false },
            "axisTick": { "show": false },
            "splitLine": { "show": false }
        },
        "series": chart_series,
        "grid": { "top": 10, "bottom": 10, "left": 0, "right": 0 },
        "dataZoom": [{ "type": "inside" }]
    })
}

/// Secondary RSI pane: purple oscillator line with shaded overbought and
/// oversold zones and dashed threshold mark lines.
pub fn rsi_chart(
    series: &PriceSeries,
    range: Range,
    rsi: &[Option<f64>],
    window: usize,
    overbought: f64,
    oversold: f64,
) -> Value {
    let labels = axis_labels(&series.timestamps, range);

    json!({
        "title": { "text": format!("RSI ({window})"), "left": "center" },
        "xAxis": {
            "type": "category",
            "data": labels,
            "axisLabel": { "show": false }
        },
        "yAxis": {
            "min": 0,
            "max": 100,
            "splitLine": { "show": true, "lineStyle": { "color": "#eee" } }
        },
        "series": [{
            "name": "RSI",
            "type": "line",
            "data": chart_points(rsi),
            "lineStyle": { "color": "purple" },
            "showSymbol": false,
            "markArea": {
                "silent": true,
                "data": [
                    [{ "yAxis": overbought }, { "yAxis": 100 }],
                    [
                        { "yAxis": 0, "itemStyle": { "color": "rgba(0,255,0,0.1)" } },
                        { "yAxis": oversold }
                    ]
                ]
            },
            "markLine": {
                "silent": true,
                "lineStyle": { "type": "dashed", "color": "#bbb" },
                "data": [{ "yAxis": overbought }, { "yAxis": oversold }]
            }
        }],
        "grid": { "top": 30, "bottom": 20, "left": 10, "right": 10 }
    })
}
