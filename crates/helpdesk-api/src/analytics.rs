//! Handlers for `/analytics` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/analytics/dashboard` | Staff only |
//! | `GET`  | `/analytics/daily` | Staff only; `?limit` (default 30, max 365) |
//! | `POST` | `/analytics/rollup` | Admin only; `?date=YYYY-MM-DD` (default today) |

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::{NaiveDate, Utc};
use helpdesk_core::{
  metrics::{DailyMetrics, DashboardMetrics},
  store::HelpdeskStore,
};
use serde::Deserialize;

use crate::{
  AppState,
  auth::{CurrentUser, require_admin, require_staff},
  error::ApiError,
};

const RECENT_TICKETS: u32 = 10;
const DEFAULT_DAYS: u32 = 30;
const MAX_DAYS: u32 = 365;

/// `GET /analytics/dashboard`
pub async fn dashboard<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
) -> Result<Json<DashboardMetrics>, ApiError>
where
  S: HelpdeskStore + Clone + 'static,
{
  require_staff(&user)?;
  let metrics = state
    .store
    .dashboard(RECENT_TICKETS)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(metrics))
}

#[derive(Debug, Deserialize)]
pub struct DailyParams {
  pub limit: Option<u32>,
}

/// `GET /analytics/daily[?limit=<days>]`
pub async fn daily<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Query(params): Query<DailyParams>,
) -> Result<Json<Vec<DailyMetrics>>, ApiError>
where
  S: HelpdeskStore + Clone + 'static,
{
  require_staff(&user)?;
  let limit = params.limit.unwrap_or(DEFAULT_DAYS).clamp(1, MAX_DAYS);
  let rows = state
    .store
    .list_daily(limit)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct RollupParams {
  pub date: Option<NaiveDate>,
}

/// `POST /analytics/rollup[?date=YYYY-MM-DD]`
pub async fn rollup<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Query(params): Query<RollupParams>,
) -> Result<Json<DailyMetrics>, ApiError>
where
  S: HelpdeskStore + Clone + 'static,
{
  require_admin(&user)?;
  let date = params.date.unwrap_or_else(|| Utc::now().date_naive());
  let metrics = state
    .store
    .rollup_daily(date)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(%date, total = metrics.total_tickets, "daily metrics rolled up");
  Ok(Json(metrics))
}
