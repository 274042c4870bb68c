//! Text embedding providers.
//!
//! Two providers are available:
//!
//! - [`HashingEmbedder`]: a deterministic, dependency-free bag-of-words
//!   embedder. Terms are hashed into a fixed number of buckets and weighted
//!   by sublinear term frequency. Runs locally and needs no model download.
//! - [`OpenAiEmbedder`]: calls an OpenAI-compatible `/embeddings` endpoint.
//!
//! Every vector returned by a provider is L2-normalised, so cosine similarity
//! reduces to a dot product.

use std::{collections::HashMap, fmt, future::Future};

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use crate::{Error, Result};

/// Produces one vector per input text.
pub trait Embedder: Send + Sync {
  fn embed(
    &self,
    texts: Vec<String>,
  ) -> impl Future<Output = Result<Vec<Vec<f32>>>> + Send + '_;
}

/// Scale `v` to unit length in place. Zero vectors are left untouched.
pub fn l2_normalize(v: &mut [f32]) {
  let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
  if norm > 0.0 {
    for x in v.iter_mut() {
      *x /= norm;
    }
  }
}

// ─── Configuration ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
  #[default]
  Hashing,
  #[serde(rename = "openai")]
  OpenAi,
}

/// The `[embedding]` configuration section.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
  pub provider:   ProviderKind,
  /// Bucket count for the hashing provider.
  pub dimensions: usize,
  pub model:      String,
  pub base_url:   String,
  pub api_key:    Option<String>,
}

impl Default for EmbeddingConfig {
  fn default() -> Self {
    Self {
      provider:   ProviderKind::Hashing,
      dimensions: HashingEmbedder::DEFAULT_DIMENSIONS,
      model:      "text-embedding-3-small".into(),
      base_url:   "https://api.openai.com/v1".into(),
      api_key:    None,
    }
  }
}

impl fmt::Debug for EmbeddingConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("EmbeddingConfig")
      .field("provider", &self.provider)
      .field("dimensions", &self.dimensions)
      .field("model", &self.model)
      .field("base_url", &self.base_url)
      .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
      .finish()
  }
}

// ─── Hashing embedder ────────────────────────────────────────────────────────

/// Words that carry no signal for routing a support request. Includes the
/// field labels used in knowledge-base document text.
const STOP_WORDS: &[&str] = &[
  "a", "about", "after", "again", "all", "also", "am", "an", "and", "any",
  "are", "as", "at", "be", "been", "before", "but", "by", "can", "cannot",
  "cant", "category", "could", "description", "did", "do", "does", "doesn",
  "don", "for", "from", "get", "got", "had", "has", "have", "help", "here",
  "how", "i", "if", "im", "in", "into", "is", "issue", "it", "its", "just",
  "keep", "keeps", "keywords", "me", "my", "need", "no", "not", "now", "of",
  "on", "or", "our", "out", "please", "problem", "should", "so", "some",
  "still", "than", "that", "the", "then", "there", "these", "this", "those",
  "title", "to", "too", "unable", "up", "very", "was", "we", "were", "what",
  "when", "why", "will", "with", "won", "work", "working", "works", "would",
  "you", "your",
];

/// Deterministic local embedder based on feature hashing.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
  dimensions: usize,
}

impl Default for HashingEmbedder {
  fn default() -> Self { Self::new(Self::DEFAULT_DIMENSIONS) }
}

impl HashingEmbedder {
  pub const DEFAULT_DIMENSIONS: usize = 1024;

  pub fn new(dimensions: usize) -> Self {
    Self { dimensions: dimensions.max(1) }
  }

  pub fn dimensions(&self) -> usize { self.dimensions }

  /// Embed a single text synchronously.
  pub fn embed_text(&self, text: &str) -> Vec<f32> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for term in terms(text) {
      *counts.entry(term).or_default() += 1;
    }

    let mut v = vec![0.0_f32; self.dimensions];
    for (term, count) in counts {
      v[self.bucket(&term)] += 1.0 + (count as f32).ln();
    }
    l2_normalize(&mut v);
    v
  }

  fn bucket(&self, term: &str) -> usize {
    let digest = Sha256::digest(term.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    (u64::from_le_bytes(head) % self.dimensions as u64) as usize
  }
}

impl Embedder for HashingEmbedder {
  async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
    Ok(texts.iter().map(|t| self.embed_text(t)).collect())
  }
}

/// Lower-cased, stemmed content terms of `text`.
fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
  text
    .split(|c: char| !c.is_alphanumeric())
    .map(str::to_lowercase)
    .filter(|w| w.chars().count() > 1 && !STOP_WORDS.contains(&w.as_str()))
    .map(|w| stem(&w).to_owned())
}

/// Strip common English inflections so that "printing", "printed" and
/// "prints" share a term.
fn stem(word: &str) -> &str {
  let mut w = word;
  if w.len() > 3
    && w.ends_with('s')
    && !(w.ends_with("ss") || w.ends_with("us") || w.ends_with("is"))
  {
    w = &w[..w.len() - 1];
  }
  if w.len() > 5 && w.ends_with("ing") {
    w = &w[..w.len() - 3];
  } else if w.len() > 4 && w.ends_with("ed") {
    w = &w[..w.len() - 2];
  }
  if w.len() > 4 && w.ends_with('e') {
    w = &w[..w.len() - 1];
  }
  w
}

// ─── OpenAI-compatible embedder ──────────────────────────────────────────────

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
  model: &'a str,
  input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
  data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
  index:     usize,
  embedding: Vec<f32>,
}

/// Client for an OpenAI-compatible `POST {base_url}/embeddings` endpoint.
#[derive(Clone)]
pub struct OpenAiEmbedder {
  client:   reqwest::Client,
  base_url: String,
  model:    String,
  api_key:  String,
}

impl OpenAiEmbedder {
  pub fn new(
    base_url: impl Into<String>,
    model: impl Into<String>,
    api_key: impl Into<String>,
  ) -> Self {
    Self {
      client:   reqwest::Client::new(),
      base_url: base_url.into(),
      model:    model.into(),
      api_key:  api_key.into(),
    }
  }
}

impl Embedder for OpenAiEmbedder {
  async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
    if texts.is_empty() {
      return Ok(Vec::new());
    }

    let url = format!("{}/embeddings", self.base_url.trim_end_matches('/'));
    let response: EmbeddingResponse = self
      .client
      .post(&url)
      .bearer_auth(&self.api_key)
      .json(&EmbeddingRequest { model: &self.model, input: &texts })
      .send()
      .await?
      .error_for_status()?
      .json()
      .await?;

    let mut data = response.data;
    if data.len() != texts.len() {
      return Err(Error::VectorCount {
        expected: texts.len(),
        got:      data.len(),
      });
    }
    data.sort_by_key(|d| d.index);

    tracing::debug!(count = data.len(), model = %self.model, "embedded texts");
    Ok(
      data
        .into_iter()
        .map(|d| {
          let mut v = d.embedding;
          l2_normalize(&mut v);
          v
        })
        .collect(),
    )
  }
}

// ─── Provider selection ──────────────────────────────────────────────────────

/// The embedder chosen by configuration.
#[derive(Clone)]
pub enum EmbeddingProvider {
  Hashing(HashingEmbedder),
  OpenAi(OpenAiEmbedder),
}

impl EmbeddingProvider {
  pub fn from_config(config: &EmbeddingConfig) -> Result<Self> {
    match config.provider {
      ProviderKind::Hashing => {
        if config.dimensions == 0 {
          return Err(Error::Config("dimensions must be positive".into()));
        }
        Ok(Self::Hashing(HashingEmbedder::new(config.dimensions)))
      }
      ProviderKind::OpenAi => {
        let api_key = config
          .api_key
          .clone()
          .filter(|k| !k.is_empty())
          .ok_or_else(|| Error::Config("openai provider needs api_key".into()))?;
        Ok(Self::OpenAi(OpenAiEmbedder::new(
          config.base_url.clone(),
          config.model.clone(),
          api_key,
        )))
      }
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      Self::Hashing(_) => "hashing",
      Self::OpenAi(_) => "openai",
    }
  }
}

impl Default for EmbeddingProvider {
  fn default() -> Self { Self::Hashing(HashingEmbedder::default()) }
}

impl Embedder for EmbeddingProvider {
  async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
    match self {
      Self::Hashing(e) => e.embed(texts).await,
      Self::OpenAi(e) => e.embed(texts).await,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
  }

  #[test]
  fn stemming_merges_inflections() {
    assert_eq!(stem("printing"), "print");
    assert_eq!(stem("printed"), "print");
    assert_eq!(stem("prints"), "print");
    assert_eq!(stem("expired"), stem("expires"));
    assert_eq!(stem("virus"), "virus");
    assert_eq!(stem("access"), "access");
  }

  #[test]
  fn stop_words_and_short_tokens_are_dropped() {
    let got: Vec<_> = terms("I can't get my e-mail to work!").collect();
    assert_eq!(got, vec!["mail".to_string()]);
  }

  #[test]
  fn vectors_are_unit_length_and_deterministic() {
    let e = HashingEmbedder::default();
    let a = e.embed_text("Printer is offline and jobs are stuck in the queue");
    let b = e.embed_text("Printer is offline and jobs are stuck in the queue");
    assert_eq!(a, b);
    assert!((dot(&a, &a) - 1.0).abs() < 1e-5);
  }

  #[test]
  fn text_without_terms_embeds_to_zero() {
    let v = HashingEmbedder::new(64).embed_text("it is the");
    assert!(v.iter().all(|x| *x == 0.0));
  }

  #[test]
  fn related_texts_score_higher_than_unrelated() {
    let e = HashingEmbedder::default();
    let q = e.embed_text("my printer will not print");
    let printer = e.embed_text("printer offline, print queue stuck");
    let vpn = e.embed_text("vpn tunnel disconnects from remote network");
    assert!(dot(&q, &printer) > dot(&q, &vpn));
  }

  #[test]
  fn openai_provider_requires_key() {
    let cfg = EmbeddingConfig {
      provider: ProviderKind::OpenAi,
      ..Default::default()
    };
    assert!(matches!(
      EmbeddingProvider::from_config(&cfg),
      Err(Error::Config(_))
    ));
  }

  #[test]
  fn provider_kind_parses_from_config_strings() {
    let kind: ProviderKind = serde_json::from_str("\"openai\"").unwrap();
    assert_eq!(kind, ProviderKind::OpenAi);
    let kind: ProviderKind = serde_json::from_str("\"hashing\"").unwrap();
    assert_eq!(kind, ProviderKind::Hashing);
  }

  #[tokio::test]
  async fn provider_embeds_batches_in_order() {
    let p = EmbeddingProvider::default();
    let out = p
      .embed(vec!["wifi down".into(), "password reset".into()])
      .await
      .unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[1], HashingEmbedder::default().embed_text("password reset"));
  }
}
