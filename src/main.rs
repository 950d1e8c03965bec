// =============================================================================
// MarketLens — Main Entry Point
// =============================================================================
//
// A charting dashboard backend: fetches historical prices from Yahoo Finance,
// computes Bollinger Bands and RSI, and serves chart payloads plus a short
// diagnostic summary over a REST API.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod api;
mod app_state;
mod chart;
mod config;
mod indicators;
mod market_data;
mod signals;
mod types;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::config::AppConfig;

const CONFIG_PATH: &str = "marketlens.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = AppConfig::load(CONFIG_PATH).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        let defaults = AppConfig::default();
        // Seed the file so the next start loads cleanly and operators have
        // something to edit.
        if let Err(e) = defaults.save(CONFIG_PATH) {
            warn!(error = %e, "Failed to write default config");
        }
        defaults
    });

    // Env overrides for the common deployment knobs.
    if let Ok(addr) = std::env::var("MARKETLENS_BIND_ADDR") {
        config.bind_addr = addr;
    }
    if let Ok(ticker) = std::env::var("MARKETLENS_DEFAULT_TICKER") {
        config.default_ticker = ticker.trim().to_uppercase();
    }

    info!(
        bind_addr = %config.bind_addr,
        default_ticker = %config.default_ticker,
        bollinger_window = config.bollinger_window,
        rsi_window = config.rsi_window,
        "MarketLens starting"
    );

    // ── 2. Shared state & API server ─────────────────────────────────────
    let state = Arc::new(AppState::new(config));

    let app = api::rest::router(state.clone());
    let listener = tokio::net::TcpListener::bind(&state.config.bind_addr)
        .await
        .with_context(|| format!("failed to bind API server to {}", state.config.bind_addr))?;

    info!(addr = %state.config.bind_addr, "API server listening");

    // ── 3. Serve until ctrl-c ────────────────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            warn!("Shutdown signal received — stopping gracefully");
        })
        .await?;

    info!("MarketLens shut down complete.");
    Ok(())
}
