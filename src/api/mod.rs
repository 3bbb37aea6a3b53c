//! REST API over the rule engine and the last runner results.
//!
//! - `POST /evaluate`: run one evaluation on the request body
//! - `GET /state`: run configuration, KPI report, and latest step
//! - `GET /telemetry`: step results with optional range filtering

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::manager::EnergyManager;
use crate::sim::kpi::KpiReport;
use crate::sim::types::{SimConfig, StepResult};

pub use types::{DeviceState, ErrorResponse, EvaluateRequest, EvaluateResponse};

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the run completes and wrapped in `Arc`; no locks
/// are needed since everything is read-only and the manager is stateless.
pub struct AppState {
    /// Rule engine used by `POST /evaluate`.
    pub manager: EnergyManager,
    /// Timing configuration of the run.
    pub config: SimConfig,
    /// Aggregate KPI report.
    pub kpi: KpiReport,
    /// Per-step results.
    pub results: Vec<StepResult>,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/evaluate", post(handlers::post_evaluate))
        .route("/state", get(handlers::get_state))
        .route("/telemetry", get(handlers::get_telemetry))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
