//! Handlers for `/tickets` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/tickets` | `?skip`, `?limit`, `?status`; non-staff see their own |
//! | `GET`   | `/tickets/:ticket_id` | Owner or staff; 404 if not found |
//! | `PATCH` | `/tickets/:ticket_id` | Staff only |
//! | `GET`   | `/tickets/:ticket_id/logs` | Owner or staff; oldest first |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use chrono::Utc;
use helpdesk_core::{
  audit::AgentLog,
  store::HelpdeskStore,
  ticket::{Ticket, TicketChanges, TicketQuery, TicketStatus},
  user::User,
};
use serde::Deserialize;

use crate::{
  AppState,
  auth::{CurrentUser, require_staff},
  error::ApiError,
};

async fn visible_ticket<S: HelpdeskStore>(
  state: &AppState<S>,
  user: &User,
  ticket_id: String,
) -> Result<Ticket, ApiError> {
  let ticket = state
    .store
    .get_ticket(ticket_id.clone())
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("ticket {ticket_id}")))?;
  if ticket.user_id != user.id && !user.role.is_staff() {
    return Err(ApiError::Forbidden("not your ticket".into()));
  }
  Ok(ticket)
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  #[serde(default)]
  pub skip:   u32,
  pub limit:  Option<u32>,
  pub status: Option<TicketStatus>,
}

/// `GET /tickets[?skip=&limit=&status=]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Ticket>>, ApiError>
where
  S: HelpdeskStore + Clone + 'static,
{
  let query = TicketQuery {
    user_id: (!user.role.is_staff()).then_some(user.id),
    status:  params.status,
    skip:    params.skip,
    limit:   params.limit,
  };
  let tickets = state
    .store
    .list_tickets(query)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(tickets))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /tickets/:ticket_id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(ticket_id): Path<String>,
) -> Result<Json<Ticket>, ApiError>
where
  S: HelpdeskStore + Clone + 'static,
{
  Ok(Json(visible_ticket(&state, &user, ticket_id).await?))
}

// ─── Update ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct UpdateBody {
  pub status:      Option<TicketStatus>,
  pub resolution:  Option<String>,
  pub assigned_to: Option<String>,
}

impl UpdateBody {
  /// Translate into store changes, stamping the matching timestamps.
  fn into_changes(self) -> TicketChanges {
    let now = Utc::now();
    TicketChanges {
      closed_at: (self.status == Some(TicketStatus::Closed)).then_some(now),
      resolved_at: self.resolution.as_ref().map(|_| now),
      assigned_at: self.assigned_to.as_ref().map(|_| now),
      status: self.status,
      resolution: self.resolution,
      assigned_to: self.assigned_to,
      ..Default::default()
    }
  }
}

/// `PATCH /tickets/:ticket_id`, body e.g. `{"status":"closed"}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(ticket_id): Path<String>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<Ticket>, ApiError>
where
  S: HelpdeskStore + Clone + 'static,
{
  require_staff(&user)?;
  let ticket = state
    .store
    .update_ticket(ticket_id.clone(), body.into_changes())
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("ticket {ticket_id}")))?;
  tracing::info!(
    ticket_id = %ticket.ticket_id,
    status = %ticket.status,
    by = user.id,
    "ticket updated"
  );
  Ok(Json(ticket))
}

// ─── Logs ─────────────────────────────────────────────────────────────────────

/// `GET /tickets/:ticket_id/logs`
pub async fn logs<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user): CurrentUser,
  Path(ticket_id): Path<String>,
) -> Result<Json<Vec<AgentLog>>, ApiError>
where
  S: HelpdeskStore + Clone + 'static,
{
  let ticket = visible_ticket(&state, &user, ticket_id).await?;
  let logs = state
    .store
    .list_logs(ticket.id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(logs))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn closing_stamps_closed_at_only() {
    let changes = UpdateBody {
      status: Some(TicketStatus::Closed),
      ..Default::default()
    }
    .into_changes();
    assert!(changes.closed_at.is_some());
    assert!(changes.resolved_at.is_none());
    assert!(changes.assigned_at.is_none());
  }

  #[test]
  fn resolution_and_assignment_are_stamped() {
    let changes = UpdateBody {
      status:      Some(TicketStatus::Resolved),
      resolution:  Some("Replaced the toner".into()),
      assigned_to: Some("jdoe".into()),
    }
    .into_changes();
    assert!(changes.closed_at.is_none());
    assert!(changes.resolved_at.is_some());
    assert!(changes.assigned_at.is_some());
    assert_eq!(changes.assigned_to.as_deref(), Some("jdoe"));
  }
}
