//! HTTP request handlers.

use super::AppState;
use crate::metrics::{get_detail, get_summary, MetricsError};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{Days, NaiveDate, Utc};
use serde::Deserialize;

/// Default reporting window, matching the dashboard's initial view.
const DEFAULT_WINDOW_DAYS: u32 = 7;

#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    #[serde(default)]
    pub days: Option<u32>,
}

/// The most recent date upstream data is expected to exist for.
///
/// Search Console publishes data with a delay, so the reporting window
/// ends `data_lag_days` before today rather than at today.
fn as_of_date(data_lag_days: u32) -> NaiveDate {
    Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(data_lag_days as u64))
        .unwrap_or_else(|| Utc::now().date_naive())
}

fn error_status(err: &MetricsError) -> StatusCode {
    match err {
        MetricsError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        MetricsError::UnknownSite(_) => StatusCode::NOT_FOUND,
        MetricsError::Upstream(_) => StatusCode::BAD_GATEWAY,
    }
}

fn error_body(err: &MetricsError) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "error": err.to_string() }))
}

// ============================================================================
// API: Summary
// ============================================================================

/// `GET /api/summary?days=N` — KPIs for every monitored site.
///
/// Individual site failures show up as `error` entries inside the
/// payload; the response itself only fails on bad arguments.
pub async fn handle_summary(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> impl IntoResponse {
    let days = query.days.unwrap_or(DEFAULT_WINDOW_DAYS);
    let as_of = as_of_date(state.config.data_lag_days);

    match get_summary(state.provider.as_ref(), &state.registry, as_of, days).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => (error_status(&e), error_body(&e)).into_response(),
    }
}

// ============================================================================
// API: Site detail
// ============================================================================

/// `GET /api/sites/{id}?days=N` — KPIs plus daily trend for one site.
pub async fn handle_site_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> impl IntoResponse {
    let days = query.days.unwrap_or(DEFAULT_WINDOW_DAYS);
    let as_of = as_of_date(state.config.data_lag_days);

    match get_detail(state.provider.as_ref(), &state.registry, &id, as_of, days).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => {
            if let MetricsError::Upstream(upstream) = &e {
                tracing::error!("detail fetch failed for {}: {}", id, upstream);
            }
            (error_status(&e), error_body(&e)).into_response()
        }
    }
}
