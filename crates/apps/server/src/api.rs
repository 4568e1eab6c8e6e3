//! HTTP API. Every route answers the `{success, error, data, count}`
//! envelope; handler failures map to HTTP 500 with `success:false`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use tracing::error;

use crate::clock;
use crate::AppState;
use firedata::FireApiResponse;

type ApiFailure = (StatusCode, Json<Value>);

fn api_failure(message: impl std::fmt::Display) -> ApiFailure {
    error!(%message, "api request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false, "error": message.to_string() })),
    )
}

/// Fires acquired in the last 24 hours, newest first.
pub async fn active_fires(State(state): State<AppState>) -> Result<impl IntoResponse, ApiFailure> {
    let since = clock::date_days_ago(1);
    let fires = state
        .store
        .active_fires_since(&since)
        .await
        .map_err(api_failure)?;

    let records = fires.iter().map(|f| f.to_record()).collect();
    Ok(Json(FireApiResponse::ok(records)))
}

/// Risk assessments from the last 24 hours, newest first.
pub async fn fire_risk(State(state): State<AppState>) -> Result<impl IntoResponse, ApiFailure> {
    let cutoff = clock::datetime_hours_ago(24);
    let risks = state.store.risk_since(&cutoff).await.map_err(api_failure)?;

    let count = risks.len();
    Ok(Json(json!({
        "success": true,
        "data": risks,
        "count": count,
    })))
}

/// Stored weather within about 0.1 degrees of the requested coordinate.
pub async fn weather_for_location(
    State(state): State<AppState>,
    Path((lat, lon)): Path<(f64, f64)>,
) -> Result<impl IntoResponse, ApiFailure> {
    let cutoff = clock::datetime_hours_ago(24);
    let samples = state
        .store
        .weather_near(lat, lon, &cutoff)
        .await
        .map_err(api_failure)?;

    let count = samples.len();
    Ok(Json(json!({
        "success": true,
        "data": samples,
        "count": count,
    })))
}

/// Count and mean score per risk level over the last 24 hours.
pub async fn risk_summary(State(state): State<AppState>) -> Result<impl IntoResponse, ApiFailure> {
    let cutoff = clock::datetime_hours_ago(24);
    let summary = state
        .store
        .risk_summary(&cutoff)
        .await
        .map_err(api_failure)?;

    Ok(Json(json!({
        "success": true,
        "data": summary,
    })))
}
