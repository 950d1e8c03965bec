// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/` and are public: the backend serves a
// read-only dashboard, so there is nothing to authenticate.
//
// CORS is configured permissively for development; tighten `allowed_origins`
// in production.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::app_state::AppState;
use crate::chart::{price_chart, rsi_chart};
use crate::indicators::{calculate_bollinger, calculate_rsi};
use crate::market_data::FetchError;
use crate::signals::Diagnostic;
use crate::types::Range;

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/search", get(search))
        .route("/api/v1/chart", get(chart))
        .layer(cors)
        .with_state(state)
}

/// Uniform JSON error body.
fn api_error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (status, Json(serde_json::json!({ "error": message.into() })))
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_s: u64,
    server_time: i64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        uptime_s: state.start_time.elapsed().as_secs(),
        server_time: chrono::Utc::now().timestamp_millis(),
    })
}

// =============================================================================
// Ticker search (autocomplete)
// =============================================================================

#[derive(Deserialize)]
struct SearchQuery {
    q: Option<String>,
    limit: Option<usize>,
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    let q = query.q.as_deref().map(str::trim).unwrap_or_default();
    if q.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "query parameter 'q' is required",
        ));
    }
    let limit = query.limit.unwrap_or(state.config.search_limit);

    if let Some(cached) = state.search_cache.get(q) {
        return Ok(Json(cached));
    }

    let matches = state.yahoo.search_tickers(q, limit).await.map_err(|e| {
        warn!(query = q, error = %e, "ticker search failed");
        api_error(StatusCode::BAD_GATEWAY, format!("ticker search failed: {e}"))
    })?;

    state.search_cache.insert(q, matches.clone());
    Ok(Json(matches))
}

// =============================================================================
// Chart (fetch -> compute -> interpret -> payload)
// =============================================================================

#[derive(Deserialize)]
struct ChartQuery {
    ticker: Option<String>,
    range: Option<String>,
    #[serde(default)]
    bollinger: bool,
    #[serde(default)]
    rsi: bool,
}

#[derive(Serialize)]
struct ChartResponse {
    ticker: String,
    range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    change_pct: Option<f64>,
    price_chart: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    rsi_chart: Option<Value>,
    diagnostic: Diagnostic,
}

async fn chart(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChartQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    let config = &state.config;

    let ticker = query
        .ticker
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(&config.default_ticker)
        .to_uppercase();

    let range_param = query.range.as_deref().unwrap_or("6mo");
    let range = Range::parse(range_param).ok_or_else(|| {
        api_error(
            StatusCode::BAD_REQUEST,
            format!("unknown range '{range_param}' (use 1d, 5d, 1mo, 6mo, 1y, max)"),
        )
    })?;

    let series = state.yahoo.get_history(&ticker, range).await.map_err(|e| match e {
        FetchError::NoData(t) => {
            api_error(StatusCode::NOT_FOUND, format!("no data found for '{t}'"))
        }
        FetchError::Other(e) => {
            warn!(ticker = %ticker, error = %e, "history fetch failed");
            api_error(StatusCode::BAD_GATEWAY, format!("history fetch failed: {e}"))
        }
    })?;

    // Misconfigured windows are a server fault, not a client one.
    let internal =
        |e: crate::indicators::IndicatorError| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());

    let bands = if query.bollinger {
        Some(
            calculate_bollinger(&series.closes, config.bollinger_window, config.bollinger_num_std)
                .map_err(internal)?,
        )
    } else {
        None
    };

    let rsi_series = if query.rsi {
        Some(calculate_rsi(&series.closes, config.rsi_window).map_err(internal)?)
    } else {
        None
    };

    let diagnostic = Diagnostic::build(
        &series,
        bands.as_ref(),
        rsi_series.as_deref(),
        config.rsi_overbought,
        config.rsi_oversold,
    )
    .map_err(internal)?;

    let response = ChartResponse {
        ticker: ticker.clone(),
        range: range.to_string(),
        last_price: series.last_close(),
        change_pct: series.change_pct(),
        price_chart: price_chart(&series, range, bands.as_ref()),
        rsi_chart: rsi_series.as_ref().map(|r| {
            rsi_chart(
                &series,
                range,
                r,
                config.rsi_window,
                config.rsi_overbought,
                config.rsi_oversold,
            )
        }),
        diagnostic,
    };

    info!(
        ticker = %ticker,
        range = %range,
        bars = series.len(),
        bollinger = query.bollinger,
        rsi = query.rsi,
        "chart request served"
    );

    Ok(Json(response))
}
