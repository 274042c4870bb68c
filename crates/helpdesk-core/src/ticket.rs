//! Tickets: one persisted record per submitted issue.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{Error, Result};

/// Minimum length of an issue description, after trimming.
pub const MIN_DESCRIPTION_LEN: usize = 10;
/// Maximum length of an issue description, after trimming.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Default and maximum page sizes for [`TicketQuery`].
pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 100;

// ─── Enums ───────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TicketStatus {
  #[default]
  New,
  Classified,
  Processing,
  Resolved,
  Escalated,
  Closed,
}

impl TicketStatus {
  /// Statuses counted as "pending" on the dashboard.
  pub const PENDING: [TicketStatus; 3] =
    [Self::New, Self::Classified, Self::Processing];

  pub fn is_pending(self) -> bool { Self::PENDING.contains(&self) }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Priority {
  Low,
  #[default]
  Medium,
  High,
  Critical,
}

impl Priority {
  /// Promised first-response time for escalated tickets.
  pub fn response_time(self) -> &'static str {
    match self {
      Self::Critical => "15 minutes",
      Self::High => "2-4 hours",
      Self::Medium => "24 hours",
      Self::Low => "48 hours",
    }
  }
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
pub enum ResolutionType {
  Automatic,
  Human,
  Escalated,
}

// ─── Ticket ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
  /// Row id; referenced by agent logs.
  pub id:                      i64,
  /// Public identifier, e.g. `IT-20240131-4821`.
  pub ticket_id:               String,
  pub user_id:                 i64,
  pub issue_description:       String,
  pub category:                Option<String>,
  pub priority:                Option<Priority>,
  pub status:                  TicketStatus,
  pub resolution_type:         Option<ResolutionType>,
  pub resolution:              Option<String>,
  pub resolution_instructions: Option<String>,
  pub confidence_score:        Option<f64>,
  pub auto_resolvable:         bool,
  pub requires_human:          bool,
  pub assigned_to:             Option<String>,
  pub assigned_at:             Option<DateTime<Utc>>,
  pub created_at:              DateTime<Utc>,
  pub updated_at:              DateTime<Utc>,
  pub resolved_at:             Option<DateTime<Utc>>,
  pub closed_at:               Option<DateTime<Utc>>,
}

/// Input to [`crate::store::HelpdeskStore::create_ticket`].
#[derive(Debug, Clone)]
pub struct NewTicket {
  pub user_id:           i64,
  pub issue_description: String,
}

/// A partial update. `None` leaves the column untouched; the store always
/// bumps `updated_at`.
#[derive(Debug, Clone, Default)]
pub struct TicketChanges {
  pub category:                Option<String>,
  pub priority:                Option<Priority>,
  pub status:                  Option<TicketStatus>,
  pub resolution_type:         Option<ResolutionType>,
  pub resolution:              Option<String>,
  pub resolution_instructions: Option<String>,
  pub confidence_score:        Option<f64>,
  pub auto_resolvable:         Option<bool>,
  pub requires_human:          Option<bool>,
  pub assigned_to:             Option<String>,
  pub assigned_at:             Option<DateTime<Utc>>,
  pub resolved_at:             Option<DateTime<Utc>>,
  pub closed_at:               Option<DateTime<Utc>>,
}

/// Parameters for [`crate::store::HelpdeskStore::list_tickets`]. Results are
/// ordered newest first.
#[derive(Debug, Clone, Default)]
pub struct TicketQuery {
  /// Restrict to tickets owned by this user.
  pub user_id: Option<i64>,
  pub status:  Option<TicketStatus>,
  pub skip:    u32,
  pub limit:   Option<u32>,
}

impl TicketQuery {
  /// The page size actually applied: defaults to 50, clamped to 1..=100.
  pub fn effective_limit(&self) -> u32 {
    self
      .limit
      .unwrap_or(DEFAULT_PAGE_SIZE)
      .clamp(1, MAX_PAGE_SIZE)
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Format a public ticket id from a date and a four-digit suffix.
///
/// `suffix` is folded into `1000..=9999`.
pub fn format_ticket_id(date: NaiveDate, suffix: u32) -> String {
  format!("IT-{}-{}", date.format("%Y%m%d"), 1000 + suffix % 9000)
}

/// Trim an issue description and check its length.
pub fn normalize_description(raw: &str) -> Result<String> {
  let trimmed = raw.trim();
  let len = trimmed.chars().count();
  if len < MIN_DESCRIPTION_LEN {
    return Err(Error::Validation {
      field:  "issue_description",
      reason: format!("must be at least {MIN_DESCRIPTION_LEN} characters"),
    });
  }
  if len > MAX_DESCRIPTION_LEN {
    return Err(Error::Validation {
      field:  "issue_description",
      reason: format!("must be at most {MAX_DESCRIPTION_LEN} characters"),
    });
  }
  Ok(trimmed.to_owned())
}
