//! Liveness endpoint.

use axum::{Json, extract::State};
use chrono::Utc;
use helpdesk_core::store::HelpdeskStore;
use serde_json::{Value, json};

use crate::AppState;

/// `GET /health`
pub async fn handler<S>(State(state): State<AppState<S>>) -> Json<Value>
where
  S: HelpdeskStore + Clone + 'static,
{
  Json(json!({
    "status":    "healthy",
    "app":       state.info.app_name,
    "version":   state.info.version,
    "timestamp": Utc::now().to_rfc3339(),
  }))
}
