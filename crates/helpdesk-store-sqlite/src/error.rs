//! Error type for `helpdesk-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] helpdesk_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("cannot decode stored {kind}: {value:?}")]
  Decode {
    kind:  &'static str,
    value: String,
  },

  /// A uniqueness constraint rejected the write.
  #[error("conflict: {0}")]
  Conflict(String),

  #[error("knowledge entry not found: {0}")]
  KnowledgeNotFound(i64),

  #[error("could not allocate a unique ticket id after {0} attempts")]
  TicketIdExhausted(usize),

  #[error("the reserved anonymous account is missing")]
  MissingAnonymousUser,
}

impl helpdesk_core::store::StoreError for Error {
  fn is_conflict(&self) -> bool { matches!(self, Self::Conflict(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
