//! Knowledge retrieval for the helpdesk: text embedding, an in-memory vector
//! index over knowledge-base entries, and loading of the seed knowledge base.

pub mod embed;
pub mod error;
pub mod index;
pub mod knowledge;

pub use embed::{
  Embedder, EmbeddingConfig, EmbeddingProvider, HashingEmbedder,
  OpenAiEmbedder, ProviderKind,
};
pub use error::{Error, Result};
pub use index::{KnowledgeIndex, SearchHit};
