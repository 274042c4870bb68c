//! The `HelpdeskStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `helpdesk-store-sqlite`). Higher layers (`helpdesk-workflow`,
//! `helpdesk-api`) depend on this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  audit::{AgentLog, NewAgentLog},
  knowledge::{KnowledgeEntry, KnowledgeSeed},
  metrics::{DailyMetrics, DashboardMetrics},
  ticket::{NewTicket, Ticket, TicketChanges, TicketQuery},
  user::{NewUser, User},
};

/// Failure classes callers need to tell apart.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// A uniqueness constraint rejected the write.
  fn is_conflict(&self) -> bool;
}

/// Abstraction over a helpdesk persistence backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait HelpdeskStore: Send + Sync {
  type Error: StoreError;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Persist a new account. Fails if the username or email is taken.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  fn get_user(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Look an account up by username.
  fn find_user(
    &self,
    username: String,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// The reserved account that owns unauthenticated submissions.
  fn anonymous_user(
    &self,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  // ── Tickets ───────────────────────────────────────────────────────────

  /// Create a ticket in `new` status with a freshly generated public id.
  fn create_ticket(
    &self,
    input: NewTicket,
  ) -> impl Future<Output = Result<Ticket, Self::Error>> + Send + '_;

  /// Retrieve a ticket by its public id. Returns `None` if not found.
  fn get_ticket(
    &self,
    ticket_id: String,
  ) -> impl Future<Output = Result<Option<Ticket>, Self::Error>> + Send + '_;

  /// Apply a partial update and return the updated ticket, or `None` if the
  /// ticket does not exist.
  fn update_ticket(
    &self,
    ticket_id: String,
    changes: TicketChanges,
  ) -> impl Future<Output = Result<Option<Ticket>, Self::Error>> + Send + '_;

  fn list_tickets(
    &self,
    query: TicketQuery,
  ) -> impl Future<Output = Result<Vec<Ticket>, Self::Error>> + Send + '_;

  // ── Audit log ─────────────────────────────────────────────────────────

  fn append_log(
    &self,
    input: NewAgentLog,
  ) -> impl Future<Output = Result<AgentLog, Self::Error>> + Send + '_;

  /// All log rows for a ticket (by row id), oldest first.
  fn list_logs(
    &self,
    ticket_row_id: i64,
  ) -> impl Future<Output = Result<Vec<AgentLog>, Self::Error>> + Send + '_;

  // ── Knowledge base ────────────────────────────────────────────────────

  /// Insert an entry, or refresh the content of the existing entry with the
  /// same `(category, title)`. Usage counters are preserved.
  fn upsert_knowledge(
    &self,
    seed: KnowledgeSeed,
  ) -> impl Future<Output = Result<KnowledgeEntry, Self::Error>> + Send + '_;

  /// Insert an entry only if no entry with the same `(category, title)`
  /// exists. Returns `None` when the existing entry was left untouched.
  fn seed_knowledge(
    &self,
    seed: KnowledgeSeed,
  ) -> impl Future<Output = Result<Option<KnowledgeEntry>, Self::Error>> + Send + '_;

  fn list_knowledge(
    &self,
  ) -> impl Future<Output = Result<Vec<KnowledgeEntry>, Self::Error>> + Send + '_;

  /// Bump the usage counter of an entry after an automatic resolution.
  fn record_knowledge_use(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Analytics ─────────────────────────────────────────────────────────

  /// Compute live dashboard aggregates.
  fn dashboard(
    &self,
    recent_limit: u32,
  ) -> impl Future<Output = Result<DashboardMetrics, Self::Error>> + Send + '_;

  /// Recompute and store the rollup for tickets created on `date`.
  fn rollup_daily(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<DailyMetrics, Self::Error>> + Send + '_;

  /// Stored rollups, newest date first.
  fn list_daily(
    &self,
    limit: u32,
  ) -> impl Future<Output = Result<Vec<DailyMetrics>, Self::Error>> + Send + '_;
}
