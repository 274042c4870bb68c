//! Error type for `helpdesk-rag`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("embedding request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("embedding provider returned {got} vectors for {expected} inputs")]
  VectorCount { expected: usize, got: usize },

  #[error("embedding provider misconfigured: {0}")]
  Config(String),

  #[error("cannot read knowledge base {path}: {source}")]
  Io {
    path:   String,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid knowledge base JSON: {0}")]
  Json(#[from] serde_json::Error),

  #[error("invalid knowledge entry: {0}")]
  Core(#[from] helpdesk_core::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
