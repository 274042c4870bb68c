//! [`SqliteStore`]: the SQLite implementation of [`HelpdeskStore`].

use std::{collections::BTreeMap, path::Path};

use chrono::{NaiveDate, Utc};
use rand_core::{OsRng, RngCore as _};
use rusqlite::{OptionalExtension as _, types::Value};

use helpdesk_core::{
  audit::{AgentLog, NewAgentLog, Stage},
  knowledge::{KnowledgeEntry, KnowledgeSeed},
  metrics::{
    AgentPerformance, DailyMetrics, DashboardMetrics, TicketAnalytics,
    percentage,
  },
  store::HelpdeskStore,
  ticket::{
    NewTicket, Ticket, TicketChanges, TicketQuery, TicketStatus,
    format_ticket_id,
  },
  user::{ANONYMOUS_USERNAME, NewUser, User},
};

use crate::{
  Error, Result,
  encode::{
    DAILY_COLUMNS, KNOWLEDGE_COLUMNS, LOG_COLUMNS, RawDaily, RawKnowledge,
    RawLog, RawTicket, RawUser, TICKET_COLUMNS, USER_COLUMNS, decode_enum,
    encode_date, encode_distribution, encode_dt, encode_json, encode_keywords,
  },
  schema::SCHEMA,
};

/// How many random suffixes to try before giving up on a ticket id.
const TICKET_ID_ATTEMPTS: usize = 8;

/// Number of tickets listed under `recent_tickets` on the dashboard.
const RECENT_TICKETS: u32 = 10;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A helpdesk store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    let now = encode_dt(Utc::now());
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(SCHEMA)?;
        conn.execute(
          "INSERT OR IGNORE INTO users
             (username, email, password_hash, full_name, role, is_active, created_at)
           VALUES (?1, 'anonymous@localhost', '!', 'Anonymous User', 'user', 0, ?2)",
          rusqlite::params![ANONYMOUS_USERNAME, now],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn user_where(
    &self,
    clause: &'static str,
    param: Value,
  ) -> Result<Option<User>> {
    let raw = self
      .conn
      .call(move |conn| {
        let raw = conn
          .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE {clause}"),
            [param],
            RawUser::from_row,
          )
          .optional()?;
        Ok(raw)
      })
      .await?;
    raw.map(RawUser::into_user).transpose()
  }
}

fn is_unique_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
      if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

fn select_ticket(
  conn: &rusqlite::Connection,
  ticket_id: &str,
) -> rusqlite::Result<Option<RawTicket>> {
  conn
    .query_row(
      &format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE ticket_id = ?1"),
      [ticket_id],
      RawTicket::from_row,
    )
    .optional()
}

fn select_knowledge(
  conn: &rusqlite::Connection,
  category: &str,
  title: &str,
) -> rusqlite::Result<RawKnowledge> {
  conn.query_row(
    &format!(
      "SELECT {KNOWLEDGE_COLUMNS} FROM knowledge_base
       WHERE category = ?1 AND title = ?2"
    ),
    [category, title],
    RawKnowledge::from_row,
  )
}

// ─── Aggregates ──────────────────────────────────────────────────────────────

/// Ticket aggregates shared by the live dashboard and the daily rollup.
struct Aggregates {
  total:          i64,
  resolved:       i64,
  escalated:      i64,
  pending:        i64,
  avg_resolution: Option<f64>,
  avg_confidence: Option<f64>,
  categories:     BTreeMap<String, i64>,
  priorities:     BTreeMap<String, i64>,
}

/// Aggregate tickets, optionally restricted to those created on `day`
/// (`YYYY-MM-DD`).
fn aggregate_tickets(
  conn: &rusqlite::Connection,
  day: Option<String>,
) -> rusqlite::Result<Aggregates> {
  let pending = TicketStatus::PENDING
    .iter()
    .map(|s| format!("'{}'", s.as_ref()))
    .collect::<Vec<_>>()
    .join(", ");
  let filter = "(?1 IS NULL OR substr(created_at, 1, 10) = ?1)";

  let (total, resolved, escalated, pending, avg_resolution, avg_confidence) =
    conn.query_row(
      &format!(
        "SELECT COUNT(*),
                COALESCE(SUM(status = 'resolved'), 0),
                COALESCE(SUM(status = 'escalated'), 0),
                COALESCE(SUM(status IN ({pending})), 0),
                AVG(CASE WHEN resolved_at IS NOT NULL
                    THEN (julianday(resolved_at) - julianday(created_at)) * 86400.0
                    END),
                AVG(confidence_score)
         FROM tickets WHERE {filter}"
      ),
      [&day],
      |r| {
        Ok((
          r.get::<_, i64>(0)?,
          r.get::<_, i64>(1)?,
          r.get::<_, i64>(2)?,
          r.get::<_, i64>(3)?,
          r.get::<_, Option<f64>>(4)?,
          r.get::<_, Option<f64>>(5)?,
        ))
      },
    )?;

  let distribution = |column: &str| -> rusqlite::Result<BTreeMap<String, i64>> {
    let mut stmt = conn.prepare(&format!(
      "SELECT {column}, COUNT(*) FROM tickets
       WHERE {column} IS NOT NULL AND {filter}
       GROUP BY {column}"
    ))?;
    let rows = stmt
      .query_map([&day], |r| Ok((r.get::<_, String>(0)?, r.get::<_, i64>(1)?)))?
      .collect::<rusqlite::Result<BTreeMap<_, _>>>()?;
    Ok(rows)
  };
  let categories = distribution("category")?;
  let priorities = distribution("priority")?;

  Ok(Aggregates {
    total,
    resolved,
    escalated,
    pending,
    avg_resolution,
    avg_confidence,
    categories,
    priorities,
  })
}

type RawAgentRow = (String, i64, i64, Option<f64>, Option<f64>);

fn agent_rows(conn: &rusqlite::Connection) -> rusqlite::Result<Vec<RawAgentRow>> {
  let mut stmt = conn.prepare(
    "SELECT agent_name,
            COUNT(*),
            COALESCE(SUM(status != 'failed'), 0),
            AVG(processing_time_ms),
            AVG(confidence_score)
     FROM agent_logs GROUP BY agent_name",
  )?;
  let rows = stmt
    .query_map([], |r| {
      Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?))
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

fn agent_performance(rows: Vec<RawAgentRow>) -> Result<Vec<AgentPerformance>> {
  let mut out = rows
    .into_iter()
    .map(|(name, total, ok, avg_ms, avg_conf)| {
      Ok(AgentPerformance {
        agent_name:          decode_enum::<Stage>("agent_name", &name)?,
        total_actions:       total,
        success_rate:        percentage(ok, total),
        avg_processing_time: avg_ms.unwrap_or(0.0),
        avg_confidence:      avg_conf.unwrap_or(0.0),
      })
    })
    .collect::<Result<Vec<_>>>()?;
  out.sort_by_key(|p| Stage::ALL.iter().position(|s| *s == p.agent_name));
  Ok(out)
}

// ─── HelpdeskStore impl ──────────────────────────────────────────────────────

impl HelpdeskStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────

  async fn create_user(&self, input: NewUser) -> Result<User> {
    let now = encode_dt(Utc::now());
    let role = input.role.as_ref().to_owned();
    let username = input.username.clone();

    let raw = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users
             (username, email, password_hash, full_name, role, is_active, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6)",
          rusqlite::params![
            input.username,
            input.email,
            input.password_hash,
            input.full_name,
            role,
            now,
          ],
        )?;
        let id = conn.last_insert_rowid();
        let raw = conn.query_row(
          &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
          [id],
          RawUser::from_row,
        )?;
        Ok(raw)
      })
      .await
      .map_err(|e| {
        if is_unique_violation(&e) {
          Error::Conflict(format!("username or email already registered: {username}"))
        } else {
          Error::Database(e)
        }
      })?;

    tracing::debug!(user_id = raw.id, "created user");
    raw.into_user()
  }

  async fn get_user(&self, id: i64) -> Result<Option<User>> {
    self.user_where("id = ?1", Value::Integer(id)).await
  }

  async fn find_user(&self, username: String) -> Result<Option<User>> {
    self.user_where("username = ?1", Value::Text(username)).await
  }

  async fn anonymous_user(&self) -> Result<User> {
    self
      .find_user(ANONYMOUS_USERNAME.to_owned())
      .await?
      .ok_or(Error::MissingAnonymousUser)
  }

  // ── Tickets ───────────────────────────────────────────────────────────

  async fn create_ticket(&self, input: NewTicket) -> Result<Ticket> {
    for attempt in 1..=TICKET_ID_ATTEMPTS {
      let now = Utc::now();
      let ticket_id = format_ticket_id(now.date_naive(), OsRng.next_u32());
      let now_str = encode_dt(now);
      let description = input.issue_description.clone();
      let user_id = input.user_id;
      let status = TicketStatus::New.as_ref().to_owned();
      let id_for_insert = ticket_id.clone();

      let inserted = self
        .conn
        .call(move |conn| {
          conn.execute(
            "INSERT INTO tickets
               (ticket_id, user_id, issue_description, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            rusqlite::params![id_for_insert, user_id, description, status, now_str],
          )?;
          let raw = select_ticket(conn, &id_for_insert)?;
          Ok(raw)
        })
        .await;

      match inserted {
        Ok(Some(raw)) => {
          tracing::debug!(%ticket_id, "created ticket");
          return raw.into_ticket();
        }
        Ok(None) => return Err(Error::Conflict(ticket_id)),
        Err(e) if is_unique_violation(&e) => {
          tracing::debug!(%ticket_id, attempt, "ticket id collision, retrying");
        }
        Err(e) => return Err(e.into()),
      }
    }
    Err(Error::TicketIdExhausted(TICKET_ID_ATTEMPTS))
  }

  async fn get_ticket(&self, ticket_id: String) -> Result<Option<Ticket>> {
    let raw = self
      .conn
      .call(move |conn| Ok(select_ticket(conn, &ticket_id)?))
      .await?;
    raw.map(RawTicket::into_ticket).transpose()
  }

  async fn update_ticket(
    &self,
    ticket_id: String,
    changes: TicketChanges,
  ) -> Result<Option<Ticket>> {
    let mut sets: Vec<(&'static str, Value)> = Vec::new();
    if let Some(v) = changes.category {
      sets.push(("category", v.into()));
    }
    if let Some(v) = changes.priority {
      sets.push(("priority", v.as_ref().to_owned().into()));
    }
    if let Some(v) = changes.status {
      sets.push(("status", v.as_ref().to_owned().into()));
    }
    if let Some(v) = changes.resolution_type {
      sets.push(("resolution_type", v.as_ref().to_owned().into()));
    }
    if let Some(v) = changes.resolution {
      sets.push(("resolution", v.into()));
    }
    if let Some(v) = changes.resolution_instructions {
      sets.push(("resolution_instructions", v.into()));
    }
    if let Some(v) = changes.confidence_score {
      sets.push(("confidence_score", v.into()));
    }
    if let Some(v) = changes.auto_resolvable {
      sets.push(("auto_resolvable", v.into()));
    }
    if let Some(v) = changes.requires_human {
      sets.push(("requires_human", v.into()));
    }
    if let Some(v) = changes.assigned_to {
      sets.push(("assigned_to", v.into()));
    }
    if let Some(v) = changes.assigned_at {
      sets.push(("assigned_at", encode_dt(v).into()));
    }
    if let Some(v) = changes.resolved_at {
      sets.push(("resolved_at", encode_dt(v).into()));
    }
    if let Some(v) = changes.closed_at {
      sets.push(("closed_at", encode_dt(v).into()));
    }
    sets.push(("updated_at", encode_dt(Utc::now()).into()));

    let assignments = sets
      .iter()
      .enumerate()
      .map(|(i, (column, _))| format!("{column} = ?{}", i + 1))
      .collect::<Vec<_>>()
      .join(", ");
    let sql = format!(
      "UPDATE tickets SET {assignments} WHERE ticket_id = ?{}",
      sets.len() + 1
    );
    let mut values: Vec<Value> = sets.into_iter().map(|(_, v)| v).collect();
    values.push(ticket_id.clone().into());

    let raw = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(&sql, rusqlite::params_from_iter(values))?;
        if changed == 0 {
          return Ok(None);
        }
        Ok(select_ticket(conn, &ticket_id)?)
      })
      .await?;
    raw.map(RawTicket::into_ticket).transpose()
  }

  async fn list_tickets(&self, query: TicketQuery) -> Result<Vec<Ticket>> {
    let limit = query.effective_limit();
    let skip = query.skip;
    let user_id = query.user_id;
    let status = query.status.map(|s| s.as_ref().to_owned());

    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {TICKET_COLUMNS} FROM tickets
           WHERE (?1 IS NULL OR user_id = ?1) AND (?2 IS NULL OR status = ?2)
           ORDER BY created_at DESC, id DESC
           LIMIT ?3 OFFSET ?4"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![user_id, status, limit, skip],
            RawTicket::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawTicket::into_ticket).collect()
  }

  // ── Audit log ─────────────────────────────────────────────────────────

  async fn append_log(&self, input: NewAgentLog) -> Result<AgentLog> {
    let now = encode_dt(Utc::now());
    let agent_name = input.agent_name.as_ref().to_owned();
    let status = input.status.as_ref().to_owned();
    let input_data = input.input_data.as_ref().map(encode_json);
    let output_data = input.output_data.as_ref().map(encode_json);
    let meta_data = input.meta_data.as_ref().map(encode_json);

    let raw = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO agent_logs
             (ticket_id, agent_name, action, input_data, output_data, status,
              processing_time_ms, confidence_score, meta_data, error_message,
              created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            input.ticket_id,
            agent_name,
            input.action,
            input_data,
            output_data,
            status,
            input.processing_time_ms,
            input.confidence_score,
            meta_data,
            input.error_message,
            now,
          ],
        )?;
        let id = conn.last_insert_rowid();
        let raw = conn.query_row(
          &format!("SELECT {LOG_COLUMNS} FROM agent_logs WHERE id = ?1"),
          [id],
          RawLog::from_row,
        )?;
        Ok(raw)
      })
      .await?;
    raw.into_log()
  }

  async fn list_logs(&self, ticket_row_id: i64) -> Result<Vec<AgentLog>> {
    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {LOG_COLUMNS} FROM agent_logs
           WHERE ticket_id = ?1 ORDER BY created_at, id"
        ))?;
        let rows = stmt
          .query_map([ticket_row_id], RawLog::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawLog::into_log).collect()
  }

  // ── Knowledge base ────────────────────────────────────────────────────

  async fn upsert_knowledge(&self, seed: KnowledgeSeed) -> Result<KnowledgeEntry> {
    seed.validate()?;
    let now = encode_dt(Utc::now());
    let keywords = encode_keywords(&seed.keywords)?;
    let priority = seed.priority_level.map(|p| p.as_ref().to_owned());

    let raw = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO knowledge_base
             (category, title, description, solution, keywords,
              auto_resolvable, priority_level, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
           ON CONFLICT (category, title) DO UPDATE SET
             description     = excluded.description,
             solution        = excluded.solution,
             keywords        = excluded.keywords,
             auto_resolvable = excluded.auto_resolvable,
             priority_level  = excluded.priority_level,
             updated_at      = excluded.updated_at",
          rusqlite::params![
            seed.category,
            seed.title,
            seed.description,
            seed.solution,
            keywords,
            seed.auto_resolvable,
            priority,
            now,
          ],
        )?;
        Ok(select_knowledge(conn, &seed.category, &seed.title)?)
      })
      .await?;
    raw.into_entry()
  }

  async fn seed_knowledge(&self, seed: KnowledgeSeed) -> Result<Option<KnowledgeEntry>> {
    seed.validate()?;
    let now = encode_dt(Utc::now());
    let keywords = encode_keywords(&seed.keywords)?;
    let priority = seed.priority_level.map(|p| p.as_ref().to_owned());

    let raw = self
      .conn
      .call(move |conn| {
        let inserted = conn.execute(
          "INSERT INTO knowledge_base
             (category, title, description, solution, keywords,
              auto_resolvable, priority_level, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
           ON CONFLICT (category, title) DO NOTHING",
          rusqlite::params![
            seed.category,
            seed.title,
            seed.description,
            seed.solution,
            keywords,
            seed.auto_resolvable,
            priority,
            now,
          ],
        )?;
        if inserted == 0 {
          return Ok(None);
        }
        Ok(Some(select_knowledge(conn, &seed.category, &seed.title)?))
      })
      .await?;
    raw.map(RawKnowledge::into_entry).transpose()
  }

  async fn list_knowledge(&self) -> Result<Vec<KnowledgeEntry>> {
    let raws = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {KNOWLEDGE_COLUMNS} FROM knowledge_base ORDER BY id"
        ))?;
        let rows = stmt
          .query_map([], RawKnowledge::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawKnowledge::into_entry).collect()
  }

  async fn record_knowledge_use(&self, id: i64) -> Result<()> {
    let now = encode_dt(Utc::now());
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE knowledge_base
           SET usage_count = usage_count + 1, updated_at = ?2
           WHERE id = ?1",
          rusqlite::params![id, now],
        )?)
      })
      .await?;
    if changed == 0 {
      return Err(Error::KnowledgeNotFound(id));
    }
    Ok(())
  }

  // ── Analytics ─────────────────────────────────────────────────────────

  async fn dashboard(&self, recent_limit: u32) -> Result<DashboardMetrics> {
    let recent_limit = if recent_limit == 0 { RECENT_TICKETS } else { recent_limit };

    let (agg, agents, recent) = self
      .conn
      .call(move |conn| {
        let agg = aggregate_tickets(conn, None)?;
        let agents = agent_rows(conn)?;
        let mut stmt = conn.prepare(&format!(
          "SELECT {TICKET_COLUMNS} FROM tickets
           ORDER BY created_at DESC, id DESC LIMIT ?1"
        ))?;
        let recent = stmt
          .query_map([recent_limit], RawTicket::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok((agg, agents, recent))
      })
      .await?;

    Ok(DashboardMetrics {
      tickets:               TicketAnalytics {
        total_tickets:       agg.total,
        auto_resolved:       agg.resolved,
        escalated:           agg.escalated,
        pending:             agg.pending,
        resolution_rate:     percentage(agg.resolved, agg.total),
        avg_resolution_time: agg.avg_resolution,
      },
      agent_performance:     agent_performance(agents)?,
      category_distribution: agg.categories,
      priority_distribution: agg.priorities,
      recent_tickets:        recent
        .into_iter()
        .map(RawTicket::into_ticket)
        .collect::<Result<Vec<_>>>()?,
    })
  }

  async fn rollup_daily(&self, date: NaiveDate) -> Result<DailyMetrics> {
    let day = encode_date(date);
    let agg = self
      .conn
      .call({
        let day = day.clone();
        move |conn| Ok(aggregate_tickets(conn, Some(day))?)
      })
      .await?;

    let success_rate =
      (agg.total > 0).then(|| percentage(agg.resolved, agg.total));
    let categories = encode_distribution(&agg.categories)?;
    let priorities = encode_distribution(&agg.priorities)?;
    let now = encode_dt(Utc::now());

    let raw = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO system_metrics
             (date, total_tickets, auto_resolved, escalated, pending,
              avg_resolution_time_seconds, avg_confidence_score,
              resolution_success_rate, category_distribution,
              priority_distribution, computed_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
           ON CONFLICT (date) DO UPDATE SET
             total_tickets               = excluded.total_tickets,
             auto_resolved               = excluded.auto_resolved,
             escalated                   = excluded.escalated,
             pending                     = excluded.pending,
             avg_resolution_time_seconds = excluded.avg_resolution_time_seconds,
             avg_confidence_score        = excluded.avg_confidence_score,
             resolution_success_rate     = excluded.resolution_success_rate,
             category_distribution       = excluded.category_distribution,
             priority_distribution       = excluded.priority_distribution,
             computed_at                 = excluded.computed_at",
          rusqlite::params![
            day,
            agg.total,
            agg.resolved,
            agg.escalated,
            agg.pending,
            agg.avg_resolution,
            agg.avg_confidence,
            success_rate,
            categories,
            priorities,
            now,
          ],
        )?;
        let raw = conn.query_row(
          &format!("SELECT {DAILY_COLUMNS} FROM system_metrics WHERE date = ?1"),
          [&day],
          RawDaily::from_row,
        )?;
        Ok(raw)
      })
      .await?;

    tracing::info!(date = %date, total = raw.total_tickets, "daily metrics rolled up");
    raw.into_daily()
  }

  async fn list_daily(&self, limit: u32) -> Result<Vec<DailyMetrics>> {
    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {DAILY_COLUMNS} FROM system_metrics ORDER BY date DESC LIMIT ?1"
        ))?;
        let rows = stmt
          .query_map([limit], RawDaily::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawDaily::into_daily).collect()
  }
}
