//! Handlers for `/knowledge` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/knowledge` | All entries |
//! | `POST` | `/knowledge` | Admin only; persisted, then indexed best-effort |
//! | `GET`  | `/knowledge/search` | `?q` required, `?top_k` 1..=10 (default 3) |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use helpdesk_core::{
  knowledge::{KnowledgeEntry, KnowledgeSeed},
  store::HelpdeskStore,
};
use helpdesk_rag::SearchHit;
use serde::{Deserialize, Serialize};

use crate::{
  AppState,
  auth::{CurrentUser, require_admin},
  error::ApiError,
};

const DEFAULT_TOP_K: usize = 3;
const MAX_TOP_K: usize = 10;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /knowledge`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<KnowledgeEntry>>, ApiError>
where
  S: HelpdeskStore + Clone + 'static,
{
  let entries = state
    .store
    .list_knowledge()
    .await
    .map_err(ApiError::store)?;
  Ok(Json(entries))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /knowledge`
///
/// Re-posting an existing `(category, title)` refreshes that entry in both
/// the store and the index. The store is the source of truth: if the entry
/// cannot be embedded it is still created, and it becomes searchable once
/// the index is rebuilt at the next start.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Json(seed): Json<KnowledgeSeed>,
) -> Result<impl IntoResponse, ApiError>
where
  S: HelpdeskStore + Clone + 'static,
{
  require_admin(&user)?;
  seed.validate()?;

  let entry = state
    .store
    .upsert_knowledge(seed)
    .await
    .map_err(ApiError::store)?;
  if let Err(e) = state.index().add(entry.clone()).await {
    tracing::warn!(
      entry_id = entry.id,
      error = %e,
      "knowledge entry stored but not indexed"
    );
  }
  Ok((StatusCode::CREATED, Json(entry)))
}

// ─── Search ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  pub q:     Option<String>,
  pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
  pub query:   String,
  pub count:   usize,
  pub results: Vec<SearchHit>,
}

/// `GET /knowledge/search?q=<text>[&top_k=<n>]`
pub async fn search<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError>
where
  S: HelpdeskStore + Clone + 'static,
{
  let query = params
    .q
    .map(|q| q.trim().to_owned())
    .filter(|q| !q.is_empty())
    .ok_or_else(|| ApiError::BadRequest("query parameter `q` is required".into()))?;
  let top_k = params.top_k.unwrap_or(DEFAULT_TOP_K).clamp(1, MAX_TOP_K);

  let results = state.index().search(&query, top_k).await?;
  Ok(Json(SearchResponse {
    count: results.len(),
    query,
    results,
  }))
}
