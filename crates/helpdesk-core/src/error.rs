//! Error types for `helpdesk-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid {field}: {reason}")]
  Validation {
    field:  &'static str,
    reason: String,
  },

  #[error("unknown {kind} value: {value:?}")]
  UnknownVariant {
    kind:  &'static str,
    value: String,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
    Self::Validation { field, reason: reason.into() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
