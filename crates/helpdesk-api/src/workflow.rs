//! Handler for `/workflow/process`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/workflow/process` | Optional bearer; anonymous submissions allowed |

use axum::{Json, extract::State};
use helpdesk_core::store::HelpdeskStore;
use helpdesk_workflow::WorkflowOutcome;
use serde::Deserialize;

use crate::{
  AppState,
  auth::{MaybeUser, require_staff},
  error::ApiError,
};

#[derive(Debug, Deserialize)]
pub struct ProcessBody {
  pub issue_description: String,
  /// Submit on behalf of another account. Staff only.
  pub user_id:           Option<i64>,
}

/// `POST /workflow/process`
///
/// The ticket is owned by the caller, by `user_id` when staff submit for
/// someone else, or by the reserved anonymous account.
pub async fn process<S>(
  State(state): State<AppState<S>>,
  MaybeUser(caller): MaybeUser,
  Json(body): Json<ProcessBody>,
) -> Result<Json<WorkflowOutcome>, ApiError>
where
  S: HelpdeskStore + Clone + 'static,
{
  let owner = match (caller, body.user_id) {
    (Some(caller), Some(id)) if id != caller.id => {
      require_staff(&caller)?;
      state
        .store
        .get_user(id)
        .await
        .map_err(ApiError::store)?
        .ok_or_else(|| ApiError::NotFound(format!("user {id}")))?
        .id
    }
    (Some(caller), _) => caller.id,
    (None, Some(_)) => {
      return Err(ApiError::Unauthorized(
        "authentication required to submit for another user".into(),
      ));
    }
    (None, None) => state.store.anonymous_user().await.map_err(ApiError::store)?.id,
  };

  let outcome = state.workflow.process(owner, &body.issue_description).await?;
  Ok(Json(outcome))
}
