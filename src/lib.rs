//! Market Pulse - Crypto Decision Dashboard for Cloudflare Workers
//!
//! Aggregates public crypto market data from four independent providers and
//! renders a heuristic decision score per trading horizon.
//!
//! # Architecture
//! - Main entry point handles HTTP requests and scheduled triggers
//! - KV storage keeps the latest aggregate between invocations
//! - Provider clients for spot/sentiment, derivatives, DeFi, and macro data
//!
//! # Features
//! - Four-provider aggregation with per-provider failure isolation
//! - Stale retention and demo-data fallback with liveness indicators
//! - Day / swing / hodl decision scores from fixed band tables
//! - Web dashboard with 60-second auto-refresh

// Clippy configuration for market-data code patterns
#![allow(clippy::cast_precision_loss)] // Float casts OK for display
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)] // Router setup is one long chain
#![allow(clippy::doc_markdown)] // Doc style flexibility
#![allow(clippy::needless_pass_by_value)] // Worker framework patterns
#![allow(clippy::map_unwrap_or)] // Explicit error handling preference

mod aggregator;
mod config;
mod dashboard;
mod error;
mod providers;
mod scoring;
mod types;

use worker::{
    Context, Env, Request, Response, Router, ScheduleContext, ScheduledEvent, console_log, event,
};

pub use aggregator::Aggregator;
pub use config::Config;
pub use error::DashboardError;
pub use providers::{DefiClient, DerivativesClient, MacroSource, SpotClient};
pub use scoring::{Horizon, Score, ScoreSet, Signal, all_scores};
pub use types::*;

/// Result type alias for worker operations
type WResult<T> = std::result::Result<T, worker::Error>;

const STATE_KEY: &str = "dashboard_state";

/// Main Worker entry point
#[event(fetch)]
async fn fetch(req: Request, env: Env, _ctx: Context) -> WResult<Response> {
    console_error_panic_hook::set_once();

    let router = Router::new();

    router
        // Health check
        .get_async("/health", |_req, ctx| async move {
            let config = match Config::from_env(&ctx.env) {
                Ok(c) => c,
                Err(e) => return Response::error(format!("Config error: {e}"), 500),
            };

            Response::from_json(&serde_json::json!({
                "status": "healthy",
                "version": env!("CARGO_PKG_VERSION"),
                "environment": config.environment,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }))
        })
        // Dashboard UI
        .get("/", |_req, _ctx| {
            Response::from_html(dashboard::dashboard_html())
        })
        .get("/dashboard", |_req, _ctx| {
            Response::from_html(dashboard::dashboard_html())
        })
        // Latest aggregate (raw data, fallback before the first cycle)
        .get_async("/api/snapshot", |_req, ctx| async move {
            let state = get_dashboard_state(&ctx.env).await?;
            let aggregate = state
                .aggregate
                .unwrap_or_else(aggregator::fallback_state);
            Response::from_json(&serde_json::json!({
                "aggregate": aggregate,
                "last_refresh": state.last_refresh,
            }))
        })
        // Decision scores for all three horizons
        .get_async("/api/scores", |_req, ctx| async move {
            let state = get_dashboard_state(&ctx.env).await?;
            let aggregate = state
                .aggregate
                .unwrap_or_else(aggregator::fallback_state);
            let scores = all_scores(&aggregate);
            Response::from_json(&serde_json::json!({
                "scores": scores,
                "liveness": aggregate.liveness,
                "last_refresh": state.last_refresh,
                "generated_at": chrono::Utc::now().to_rfc3339(),
            }))
        })
        // Refresh pipeline status
        .get_async("/api/status", |_req, ctx| async move {
            let config = match Config::from_env(&ctx.env) {
                Ok(c) => c,
                Err(e) => return Response::error(format!("Config error: {e}"), 500),
            };
            let state = get_dashboard_state(&ctx.env).await?;
            Response::from_json(&serde_json::json!({
                "environment": config.environment,
                "refresh_interval_seconds": config.refresh_interval_seconds,
                "last_refresh": state.last_refresh,
                "total_refreshes": state.total_refreshes,
                "consecutive_failures": state.consecutive_failures,
                "liveness": state.aggregate.map(|a| a.liveness),
            }))
        })
        // Manual refresh trigger
        .post_async("/api/refresh", |_req, ctx| async move {
            match run_refresh_cycle(&ctx.env).await {
                Ok(summary) => Response::from_json(&summary),
                Err(e) => Response::from_json(&serde_json::json!({
                    "error": true,
                    "message": format!("{e}"),
                })),
            }
        })
        // Fallback
        .run(req, env)
        .await
}

/// Scheduled trigger (cron job)
#[event(scheduled)]
async fn scheduled(_event: ScheduledEvent, env: Env, _ctx: ScheduleContext) {
    console_error_panic_hook::set_once();
    if let Err(e) = run_refresh_cycle(&env).await {
        console_log!("Refresh cycle error: {}", e);
    }
}

/// Execute one refresh cycle and persist the result
async fn run_refresh_cycle(env: &Env) -> std::result::Result<RefreshSummary, DashboardError> {
    let config = Config::from_env(env)?;
    config.validate()?;

    // Prior aggregate enables stale retention across invocations
    let mut state = get_dashboard_state(env)
        .await
        .map_err(|e| DashboardError::Storage(e.to_string()))?;

    let aggregator = Aggregator::new(&config);
    let (aggregate, summary) = aggregator.refresh(state.aggregate.as_ref()).await;

    let scores = all_scores(&aggregate);
    console_log!(
        "[{}] cycle complete in {}ms: {}/{} live | day {} ({}) swing {} ({}) hodl {} ({})",
        summary.cycle_id,
        summary.elapsed_ms,
        summary.live_count(),
        summary.outcomes.len(),
        scores.day.value,
        scores.day.signal,
        scores.swing.value,
        scores.swing.signal,
        scores.hodl.value,
        scores.hodl.signal
    );

    state.aggregate = Some(aggregate);
    state.record_cycle(&summary);
    save_dashboard_state(env, &state)
        .await
        .map_err(|e| DashboardError::Storage(e.to_string()))?;

    Ok(summary)
}

/// Get dashboard state from KV storage
async fn get_dashboard_state(env: &Env) -> WResult<DashboardStateData> {
    let kv = env.kv("STATE")?;

    match kv.get(STATE_KEY).json::<DashboardStateData>().await? {
        Some(state) => Ok(state),
        None => Ok(DashboardStateData::default()),
    }
}

/// Save dashboard state to KV storage
async fn save_dashboard_state(env: &Env, state: &DashboardStateData) -> WResult<()> {
    let kv = env.kv("STATE")?;
    kv.put(STATE_KEY, state)?.execute().await?;
    Ok(())
}
