//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::warn;

use super::AppState;
use super::types::{ErrorResponse, EvaluateRequest, EvaluateResponse, StateResponse, TelemetryQuery};

/// Runs one evaluation on the request body.
///
/// `POST /evaluate` → 200 + `EvaluateResponse`, or 422 + `ErrorResponse`
/// when the engine rejects the input.
pub async fn post_evaluate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, (StatusCode, Json<ErrorResponse>)> {
    let (ctx, registry, schedule) = req.into_parts();
    match state.manager.evaluate(&ctx, &registry, &schedule) {
        Ok(decision) => Ok(Json(EvaluateResponse::from(decision))),
        Err(e) => {
            warn!(error = %e, "rejected evaluation request");
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

/// Returns run config, KPI report, and latest step.
///
/// `GET /state` → 200 + `StateResponse` JSON
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    Json(StateResponse {
        config: state.config.clone(),
        kpi: state.kpi.clone(),
        latest_step: state.results.last().cloned(),
    })
}

/// Returns step results, optionally filtered by timestep range.
///
/// `GET /telemetry?from=N&to=M` → filtered range (inclusive);
/// `from > to` → 400 + `ErrorResponse`
pub async fn get_telemetry(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TelemetryQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let records: Vec<_> = state
        .results
        .iter()
        .filter(|r| r.timestep >= from && r.timestep <= to)
        .cloned()
        .collect();

    Ok(Json(records))
}
