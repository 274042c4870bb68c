//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings (microsecond
//! precision, `Z` suffix) so that lexical and chronological order agree.
//! Enums are stored as their snake_case names; structured fields as compact
//! JSON.

use std::{collections::BTreeMap, str::FromStr};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use helpdesk_core::{
  audit::AgentLog,
  knowledge::KnowledgeEntry,
  metrics::DailyMetrics,
  ticket::Ticket,
  user::User,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

fn decode_opt_dt(s: Option<String>) -> Result<Option<DateTime<Utc>>> {
  s.as_deref().map(decode_dt).transpose()
}

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enums ───────────────────────────────────────────────────────────────────

/// Parse a stored enum column via its `FromStr` (strum) implementation.
pub fn decode_enum<T: FromStr>(kind: &'static str, s: &str) -> Result<T> {
  s.parse().map_err(|_| Error::Decode {
    kind,
    value: s.to_owned(),
  })
}

fn decode_opt_enum<T: FromStr>(
  kind: &'static str,
  s: Option<String>,
) -> Result<Option<T>> {
  s.as_deref().map(|v| decode_enum(kind, v)).transpose()
}

// ─── JSON columns ────────────────────────────────────────────────────────────

pub fn encode_json(value: &serde_json::Value) -> String { value.to_string() }

fn decode_opt_json(s: Option<String>) -> Result<Option<serde_json::Value>> {
  Ok(s.as_deref().map(serde_json::from_str).transpose()?)
}

pub fn encode_keywords(keywords: &[String]) -> Result<String> {
  Ok(serde_json::to_string(keywords)?)
}

pub fn encode_distribution(dist: &BTreeMap<String, i64>) -> Result<String> {
  Ok(serde_json::to_string(dist)?)
}

// ─── Users ───────────────────────────────────────────────────────────────────

pub const USER_COLUMNS: &str =
  "id, username, email, full_name, role, is_active, created_at, password_hash";

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub id:            i64,
  pub username:      String,
  pub email:         String,
  pub full_name:     Option<String>,
  pub role:          String,
  pub is_active:     bool,
  pub created_at:    String,
  pub password_hash: String,
}

impl RawUser {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      username:      row.get(1)?,
      email:         row.get(2)?,
      full_name:     row.get(3)?,
      role:          row.get(4)?,
      is_active:     row.get(5)?,
      created_at:    row.get(6)?,
      password_hash: row.get(7)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      id:            self.id,
      username:      self.username,
      email:         self.email,
      full_name:     self.full_name,
      role:          decode_enum("role", &self.role)?,
      is_active:     self.is_active,
      created_at:    decode_dt(&self.created_at)?,
      password_hash: self.password_hash,
    })
  }
}

// ─── Tickets ─────────────────────────────────────────────────────────────────

pub const TICKET_COLUMNS: &str = "id, ticket_id, user_id, issue_description, \
  category, priority, status, resolution_type, resolution, \
  resolution_instructions, confidence_score, auto_resolvable, requires_human, \
  assigned_to, assigned_at, created_at, updated_at, resolved_at, closed_at";

/// Raw values read directly from a `tickets` row.
pub struct RawTicket {
  pub id:                      i64,
  pub ticket_id:               String,
  pub user_id:                 i64,
  pub issue_description:       String,
  pub category:                Option<String>,
  pub priority:                Option<String>,
  pub status:                  String,
  pub resolution_type:         Option<String>,
  pub resolution:              Option<String>,
  pub resolution_instructions: Option<String>,
  pub confidence_score:        Option<f64>,
  pub auto_resolvable:         bool,
  pub requires_human:          bool,
  pub assigned_to:             Option<String>,
  pub assigned_at:             Option<String>,
  pub created_at:              String,
  pub updated_at:              String,
  pub resolved_at:             Option<String>,
  pub closed_at:               Option<String>,
}

impl RawTicket {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                      row.get(0)?,
      ticket_id:               row.get(1)?,
      user_id:                 row.get(2)?,
      issue_description:       row.get(3)?,
      category:                row.get(4)?,
      priority:                row.get(5)?,
      status:                  row.get(6)?,
      resolution_type:         row.get(7)?,
      resolution:              row.get(8)?,
      resolution_instructions: row.get(9)?,
      confidence_score:        row.get(10)?,
      auto_resolvable:         row.get(11)?,
      requires_human:          row.get(12)?,
      assigned_to:             row.get(13)?,
      assigned_at:             row.get(14)?,
      created_at:              row.get(15)?,
      updated_at:              row.get(16)?,
      resolved_at:             row.get(17)?,
      closed_at:               row.get(18)?,
    })
  }

  pub fn into_ticket(self) -> Result<Ticket> {
    Ok(Ticket {
      id:                      self.id,
      ticket_id:               self.ticket_id,
      user_id:                 self.user_id,
      issue_description:       self.issue_description,
      category:                self.category,
      priority:                decode_opt_enum("priority", self.priority)?,
      status:                  decode_enum("status", &self.status)?,
      resolution_type:         decode_opt_enum(
        "resolution_type",
        self.resolution_type,
      )?,
      resolution:              self.resolution,
      resolution_instructions: self.resolution_instructions,
      confidence_score:        self.confidence_score,
      auto_resolvable:         self.auto_resolvable,
      requires_human:          self.requires_human,
      assigned_to:             self.assigned_to,
      assigned_at:             decode_opt_dt(self.assigned_at)?,
      created_at:              decode_dt(&self.created_at)?,
      updated_at:              decode_dt(&self.updated_at)?,
      resolved_at:             decode_opt_dt(self.resolved_at)?,
      closed_at:               decode_opt_dt(self.closed_at)?,
    })
  }
}

// ─── Agent logs ──────────────────────────────────────────────────────────────

pub const LOG_COLUMNS: &str = "id, ticket_id, agent_name, action, input_data, \
  output_data, status, processing_time_ms, confidence_score, meta_data, \
  error_message, created_at";

/// Raw values read directly from an `agent_logs` row.
pub struct RawLog {
  pub id:                 i64,
  pub ticket_id:          i64,
  pub agent_name:         String,
  pub action:             String,
  pub input_data:         Option<String>,
  pub output_data:        Option<String>,
  pub status:             String,
  pub processing_time_ms: Option<f64>,
  pub confidence_score:   Option<f64>,
  pub meta_data:          Option<String>,
  pub error_message:      Option<String>,
  pub created_at:         String,
}

impl RawLog {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                 row.get(0)?,
      ticket_id:          row.get(1)?,
      agent_name:         row.get(2)?,
      action:             row.get(3)?,
      input_data:         row.get(4)?,
      output_data:        row.get(5)?,
      status:             row.get(6)?,
      processing_time_ms: row.get(7)?,
      confidence_score:   row.get(8)?,
      meta_data:          row.get(9)?,
      error_message:      row.get(10)?,
      created_at:         row.get(11)?,
    })
  }

  pub fn into_log(self) -> Result<AgentLog> {
    Ok(AgentLog {
      id:                 self.id,
      ticket_id:          self.ticket_id,
      agent_name:         decode_enum("agent_name", &self.agent_name)?,
      action:             self.action,
      input_data:         decode_opt_json(self.input_data)?,
      output_data:        decode_opt_json(self.output_data)?,
      status:             decode_enum("log status", &self.status)?,
      processing_time_ms: self.processing_time_ms,
      confidence_score:   self.confidence_score,
      meta_data:          decode_opt_json(self.meta_data)?,
      error_message:      self.error_message,
      created_at:         decode_dt(&self.created_at)?,
    })
  }
}

// ─── Knowledge base ──────────────────────────────────────────────────────────

pub const KNOWLEDGE_COLUMNS: &str = "id, category, title, description, \
  solution, keywords, auto_resolvable, priority_level, success_rate, \
  usage_count, created_at, updated_at";

/// Raw values read directly from a `knowledge_base` row.
pub struct RawKnowledge {
  pub id:              i64,
  pub category:        String,
  pub title:           String,
  pub description:     Option<String>,
  pub solution:        String,
  pub keywords:        String,
  pub auto_resolvable: bool,
  pub priority_level:  Option<String>,
  pub success_rate:    f64,
  pub usage_count:     i64,
  pub created_at:      String,
  pub updated_at:      String,
}

impl RawKnowledge {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      category:        row.get(1)?,
      title:           row.get(2)?,
      description:     row.get(3)?,
      solution:        row.get(4)?,
      keywords:        row.get(5)?,
      auto_resolvable: row.get(6)?,
      priority_level:  row.get(7)?,
      success_rate:    row.get(8)?,
      usage_count:     row.get(9)?,
      created_at:      row.get(10)?,
      updated_at:      row.get(11)?,
    })
  }

  pub fn into_entry(self) -> Result<KnowledgeEntry> {
    Ok(KnowledgeEntry {
      id:              self.id,
      category:        self.category,
      title:           self.title,
      description:     self.description,
      solution:        self.solution,
      keywords:        serde_json::from_str(&self.keywords)?,
      auto_resolvable: self.auto_resolvable,
      priority_level:  decode_opt_enum("priority", self.priority_level)?,
      success_rate:    self.success_rate,
      usage_count:     self.usage_count,
      created_at:      decode_dt(&self.created_at)?,
      updated_at:      decode_dt(&self.updated_at)?,
    })
  }
}

// ─── Daily metrics ───────────────────────────────────────────────────────────

pub const DAILY_COLUMNS: &str = "date, total_tickets, auto_resolved, \
  escalated, pending, avg_resolution_time_seconds, avg_confidence_score, \
  resolution_success_rate, category_distribution, priority_distribution, \
  computed_at";

/// Raw values read directly from a `system_metrics` row.
pub struct RawDaily {
  pub date:                        String,
  pub total_tickets:               i64,
  pub auto_resolved:               i64,
  pub escalated:                   i64,
  pub pending:                     i64,
  pub avg_resolution_time_seconds: Option<f64>,
  pub avg_confidence_score:        Option<f64>,
  pub resolution_success_rate:     Option<f64>,
  pub category_distribution:       String,
  pub priority_distribution:       String,
  pub computed_at:                 String,
}

impl RawDaily {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      date:                        row.get(0)?,
      total_tickets:               row.get(1)?,
      auto_resolved:               row.get(2)?,
      escalated:                   row.get(3)?,
      pending:                     row.get(4)?,
      avg_resolution_time_seconds: row.get(5)?,
      avg_confidence_score:        row.get(6)?,
      resolution_success_rate:     row.get(7)?,
      category_distribution:       row.get(8)?,
      priority_distribution:       row.get(9)?,
      computed_at:                 row.get(10)?,
    })
  }

  pub fn into_daily(self) -> Result<DailyMetrics> {
    Ok(DailyMetrics {
      date:                        decode_date(&self.date)?,
      total_tickets:               self.total_tickets,
      auto_resolved:               self.auto_resolved,
      escalated:                   self.escalated,
      pending:                     self.pending,
      avg_resolution_time_seconds: self.avg_resolution_time_seconds,
      avg_confidence_score:        self.avg_confidence_score,
      resolution_success_rate:     self.resolution_success_rate,
      category_distribution:       serde_json::from_str(
        &self.category_distribution,
      )?,
      priority_distribution:       serde_json::from_str(
        &self.priority_distribution,
      )?,
      computed_at:                 decode_dt(&self.computed_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn timestamps_are_fixed_width_and_sortable() {
    let a = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    let b = a + chrono::Duration::microseconds(1500);
    let (ea, eb) = (encode_dt(a), encode_dt(b));
    assert_eq!(ea, "2024-01-01T09:00:00.000000Z");
    assert_eq!(ea.len(), eb.len());
    assert!(ea < eb);
    assert_eq!(decode_dt(&eb).unwrap(), b);
  }

  #[test]
  fn unknown_enum_value_is_a_decode_error() {
    let err = decode_enum::<helpdesk_core::ticket::Priority>("priority", "urgent")
      .unwrap_err();
    assert!(matches!(err, Error::Decode { kind: "priority", .. }));
  }
}
