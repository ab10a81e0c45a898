use crate::infra::{deserialize_date, AppState, PaceState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use booking_pace::error::AppError;
use booking_pace::pace::{compare, sweep_month, CurveSeries, DayCurve};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct CurveRequest {
    #[serde(deserialize_with = "deserialize_date")]
    pub(crate) target_night: NaiveDate,
    #[serde(default)]
    pub(crate) window_days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CurveResponse {
    pub(crate) target_night: NaiveDate,
    pub(crate) prior_year_night: NaiveDate,
    pub(crate) total_rooms: usize,
    pub(crate) window_days: i64,
    pub(crate) current: CurveSeries,
    pub(crate) prior_year: CurveSeries,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MonthRequest {
    pub(crate) year: i32,
    pub(crate) month: u32,
    #[serde(default)]
    pub(crate) window_days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MonthResponse {
    pub(crate) year: i32,
    pub(crate) month: u32,
    pub(crate) label: String,
    pub(crate) total_rooms: usize,
    pub(crate) window_days: i64,
    pub(crate) days: Vec<DayCurve>,
}

pub(crate) fn router() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/pace/curve", axum::routing::post(curve_endpoint))
        .route("/api/v1/pace/month", axum::routing::post(month_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// The interactive flow: a date picker (or any client) posts a target
/// night and gets back the two overlaid curves, recomputed synchronously
/// against the immutable in-memory log.
pub(crate) async fn curve_endpoint(
    Extension(pace): Extension<Arc<PaceState>>,
    Json(payload): Json<CurveRequest>,
) -> Result<Json<CurveResponse>, AppError> {
    if pace.total_rooms == 0 {
        return Err(AppError::EmptyRoomInventory);
    }

    let window_days = payload.window_days.unwrap_or(pace.window_days);
    let comparison = compare(&pace.log, payload.target_night, pace.total_rooms, window_days)?;

    Ok(Json(CurveResponse {
        target_night: comparison.target_night,
        prior_year_night: comparison.prior_year_night,
        total_rooms: pace.total_rooms,
        window_days,
        current: comparison.current,
        prior_year: comparison.prior_year,
    }))
}

pub(crate) async fn month_endpoint(
    Extension(pace): Extension<Arc<PaceState>>,
    Json(payload): Json<MonthRequest>,
) -> Result<Json<MonthResponse>, AppError> {
    if pace.total_rooms == 0 {
        return Err(AppError::EmptyRoomInventory);
    }

    let window_days = payload.window_days.unwrap_or(pace.window_days);
    let sweep = sweep_month(
        &pace.log,
        payload.year,
        payload.month,
        pace.total_rooms,
        window_days,
    )?;

    Ok(Json(MonthResponse {
        year: sweep.year,
        month: sweep.month,
        label: sweep.label,
        total_rooms: pace.total_rooms,
        window_days,
        days: sweep.days,
    }))
}
