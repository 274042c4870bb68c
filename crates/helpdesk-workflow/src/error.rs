//! Error type for `helpdesk-workflow`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The submitted issue failed validation.
  #[error("invalid input: {0}")]
  InvalidInput(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  /// The ticket disappeared between pipeline stages.
  #[error("ticket vanished during processing: {0}")]
  TicketVanished(String),
}

impl Error {
  pub(crate) fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
