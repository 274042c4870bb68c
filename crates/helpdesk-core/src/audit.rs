//! Audit trail: one row per pipeline stage executed for a ticket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// The pipeline stage that wrote a log row. The string form is the stored
/// `agent_name`.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
pub enum Stage {
  #[serde(rename = "Classification Agent")]
  #[strum(serialize = "Classification Agent")]
  Classification,
  #[serde(rename = "Decision Agent")]
  #[strum(serialize = "Decision Agent")]
  Decision,
  #[serde(rename = "Resolution Agent")]
  #[strum(serialize = "Resolution Agent")]
  Resolution,
  #[serde(rename = "Escalation Agent")]
  #[strum(serialize = "Escalation Agent")]
  Escalation,
}

impl Stage {
  /// Stages reported on the dashboard, in pipeline order.
  pub const ALL: [Stage; 4] = [
    Self::Classification,
    Self::Decision,
    Self::Resolution,
    Self::Escalation,
  ];
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LogStatus {
  Success,
  Failed,
  Warning,
  Escalated,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentLog {
  pub id:                 i64,
  /// Row id of the owning ticket.
  pub ticket_id:          i64,
  pub agent_name:         Stage,
  pub action:             String,
  pub input_data:         Option<serde_json::Value>,
  pub output_data:        Option<serde_json::Value>,
  pub status:             LogStatus,
  pub processing_time_ms: Option<f64>,
  pub confidence_score:   Option<f64>,
  pub meta_data:          Option<serde_json::Value>,
  pub error_message:      Option<String>,
  pub created_at:         DateTime<Utc>,
}

/// Input to [`crate::store::HelpdeskStore::append_log`].
#[derive(Debug, Clone)]
pub struct NewAgentLog {
  pub ticket_id:          i64,
  pub agent_name:         Stage,
  pub action:             String,
  pub input_data:         Option<serde_json::Value>,
  pub output_data:        Option<serde_json::Value>,
  pub status:             LogStatus,
  pub processing_time_ms: Option<f64>,
  pub confidence_score:   Option<f64>,
  pub meta_data:          Option<serde_json::Value>,
  pub error_message:      Option<String>,
}

impl NewAgentLog {
  pub fn new(
    ticket_id: i64,
    agent_name: Stage,
    action: impl Into<String>,
    status: LogStatus,
  ) -> Self {
    Self {
      ticket_id,
      agent_name,
      action: action.into(),
      input_data: None,
      output_data: None,
      status,
      processing_time_ms: None,
      confidence_score: None,
      meta_data: None,
      error_message: None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn stage_names_match_stored_form() {
    assert_eq!(Stage::Classification.as_ref(), "Classification Agent");
    assert_eq!(
      "Escalation Agent".parse::<Stage>().unwrap(),
      Stage::Escalation
    );
    assert_eq!(
      serde_json::to_value(Stage::Decision).unwrap(),
      serde_json::json!("Decision Agent")
    );
  }
}
