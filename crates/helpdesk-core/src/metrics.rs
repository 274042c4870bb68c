//! Dashboard read models and the daily metrics rollup.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{audit::Stage, ticket::Ticket};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketAnalytics {
  pub total_tickets:       i64,
  /// Tickets currently in `resolved` status.
  pub auto_resolved:       i64,
  pub escalated:           i64,
  /// Tickets in `new`, `classified` or `processing`.
  pub pending:             i64,
  /// `auto_resolved / total_tickets` as a percentage; 0 when there are none.
  pub resolution_rate:     f64,
  /// Mean seconds from creation to resolution, over resolved tickets.
  pub avg_resolution_time: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentPerformance {
  pub agent_name:          Stage,
  pub total_actions:       i64,
  /// Percentage of log rows whose status is not `failed`.
  pub success_rate:        f64,
  pub avg_processing_time: f64,
  pub avg_confidence:      f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardMetrics {
  pub tickets:               TicketAnalytics,
  pub agent_performance:     Vec<AgentPerformance>,
  pub category_distribution: BTreeMap<String, i64>,
  pub priority_distribution: BTreeMap<String, i64>,
  pub recent_tickets:        Vec<Ticket>,
}

/// One row of the `system_metrics` rollup, covering tickets created on `date`
/// (UTC).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
  pub date:                        NaiveDate,
  pub total_tickets:               i64,
  pub auto_resolved:               i64,
  pub escalated:                   i64,
  pub pending:                     i64,
  pub avg_resolution_time_seconds: Option<f64>,
  pub avg_confidence_score:        Option<f64>,
  /// `auto_resolved / total_tickets` as a percentage; `None` for empty days.
  pub resolution_success_rate:     Option<f64>,
  pub category_distribution:       BTreeMap<String, i64>,
  pub priority_distribution:       BTreeMap<String, i64>,
  pub computed_at:                 DateTime<Utc>,
}

/// `part / whole` as a percentage, or 0 when `whole` is 0.
pub fn percentage(part: i64, whole: i64) -> f64 {
  if whole > 0 {
    part as f64 / whole as f64 * 100.0
  } else {
    0.0
  }
}
