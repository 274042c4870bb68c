//! In-memory vector index over knowledge-base entries.

use helpdesk_core::knowledge::KnowledgeEntry;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::{
  Result,
  embed::{Embedder, EmbeddingProvider},
};

/// One search result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
  pub entry:           KnowledgeEntry,
  /// Cosine similarity between the query and the entry, in `[0, 1]`.
  pub relevance_score: f64,
}

/// Cosine similarity of two vectors, clamped to `[0, 1]`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
  if a.len() != b.len() || a.is_empty() {
    return 0.0;
  }
  let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
  let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
  let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
  if norm_a == 0.0 || norm_b == 0.0 {
    return 0.0;
  }
  (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// Knowledge entries paired with their embeddings.
///
/// Reads take a shared lock; [`KnowledgeIndex::add`] takes the write lock
/// only after the new entry has been embedded.
pub struct KnowledgeIndex {
  embedder: EmbeddingProvider,
  entries:  RwLock<Vec<(KnowledgeEntry, Vec<f32>)>>,
}

impl KnowledgeIndex {
  /// Embed every entry's document text and build the index.
  pub async fn build(
    embedder: EmbeddingProvider,
    entries: Vec<KnowledgeEntry>,
  ) -> Result<Self> {
    let texts = entries.iter().map(KnowledgeEntry::document_text).collect();
    let vectors = embedder.embed(texts).await?;
    let indexed: Vec<_> = entries.into_iter().zip(vectors).collect();
    tracing::info!(
      entries = indexed.len(),
      provider = embedder.name(),
      "knowledge index built"
    );
    Ok(Self {
      embedder,
      entries: RwLock::new(indexed),
    })
  }

  /// Build an index from vectors embedded earlier. Queries and later
  /// additions go through `embedder`, so it must produce vectors of the same
  /// shape.
  pub fn with_embedded(
    embedder: EmbeddingProvider,
    entries: Vec<(KnowledgeEntry, Vec<f32>)>,
  ) -> Self {
    Self {
      embedder,
      entries: RwLock::new(entries),
    }
  }

  pub async fn len(&self) -> usize { self.entries.read().await.len() }

  pub async fn is_empty(&self) -> bool { self.entries.read().await.is_empty() }

  /// The `top_k` most similar entries, best first. An empty index or
  /// `top_k == 0` yields no hits.
  pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchHit>> {
    if top_k == 0 || self.is_empty().await {
      return Ok(Vec::new());
    }
    let mut vectors = self.embedder.embed(vec![query.to_owned()]).await?;
    let Some(q) = vectors.pop() else {
      return Ok(Vec::new());
    };

    let entries = self.entries.read().await;
    let mut hits: Vec<SearchHit> = entries
      .iter()
      .map(|(entry, v)| SearchHit {
        entry:           entry.clone(),
        relevance_score: f64::from(cosine_similarity(&q, v)),
      })
      .collect();
    hits.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    hits.truncate(top_k);
    Ok(hits)
  }

  /// The single most similar entry, if the index is not empty.
  pub async fn best_match(&self, query: &str) -> Result<Option<SearchHit>> {
    Ok(self.search(query, 1).await?.into_iter().next())
  }

  /// Embed and append an entry. An entry with the same id is replaced.
  pub async fn add(&self, entry: KnowledgeEntry) -> Result<()> {
    let mut vectors = self.embedder.embed(vec![entry.document_text()]).await?;
    let vector = vectors.pop().unwrap_or_default();

    let mut entries = self.entries.write().await;
    entries.retain(|(e, _)| e.id != entry.id);
    tracing::info!(category = %entry.category, title = %entry.title, "knowledge entry indexed");
    entries.push((entry, vector));
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::{HashingEmbedder, OpenAiEmbedder, knowledge::default_seeds};

  async fn index() -> KnowledgeIndex {
    let now = Utc::now();
    let entries = default_seeds()
      .unwrap()
      .into_iter()
      .enumerate()
      .map(|(i, seed)| KnowledgeEntry::from_seed(i as i64 + 1, seed, now))
      .collect();
    KnowledgeIndex::build(EmbeddingProvider::default(), entries)
      .await
      .unwrap()
  }

  async fn best_category(index: &KnowledgeIndex, query: &str) -> String {
    index
      .best_match(query)
      .await
      .unwrap()
      .expect("non-empty index")
      .entry
      .category
  }

  #[test]
  fn cosine_is_clamped() {
    assert_eq!(cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]), 0.0);
    assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
    assert!((cosine_similarity(&[3.0, 4.0], &[3.0, 4.0]) - 1.0).abs() < 1e-6);
  }

  #[tokio::test]
  async fn known_phrases_find_their_category() {
    let index = index().await;
    let cases = [
      ("I forgot my password and my account is locked", "Password Reset"),
      ("The wifi keeps dropping and I have no internet", "Network Connectivity"),
      ("My printer is offline and the print queue is stuck", "Printer Issues"),
      ("VPN will not connect when working from home", "VPN Access"),
      ("Outlook is not syncing my mailbox", "Email Issues"),
    ];
    for (query, expected) in cases {
      assert_eq!(best_category(&index, query).await, expected, "query: {query}");
    }
  }

  #[tokio::test]
  async fn exact_document_text_scores_one() {
    let index = index().await;
    let entries = index.entries.read().await;
    let doc = entries[0].0.document_text();
    drop(entries);

    let hit = index.best_match(&doc).await.unwrap().unwrap();
    assert!((hit.relevance_score - 1.0).abs() < 1e-5);
  }

  #[tokio::test]
  async fn search_is_sorted_and_truncated() {
    let index = index().await;
    let hits = index.search("laptop screen cracked", 3).await.unwrap();
    assert_eq!(hits.len(), 3);
    assert!(hits.windows(2).all(|w| w[0].relevance_score >= w[1].relevance_score));
    assert!(hits.iter().all(|h| (0.0..=1.0).contains(&h.relevance_score)));
  }

  #[tokio::test]
  async fn empty_index_has_no_hits() {
    let index = KnowledgeIndex::build(EmbeddingProvider::default(), Vec::new())
      .await
      .unwrap();
    assert!(index.best_match("anything at all").await.unwrap().is_none());
  }

  #[tokio::test]
  async fn unreachable_provider_fails_lookups() {
    let hashing = HashingEmbedder::default();
    let entry = KnowledgeEntry::from_seed(1, default_seeds().unwrap().remove(0), Utc::now());
    let vector = hashing.embed_text(&entry.document_text());
    let offline = EmbeddingProvider::OpenAi(OpenAiEmbedder::new(
      "http://127.0.0.1:1",
      "text-embedding-3-small",
      "key",
    ));

    let index = KnowledgeIndex::with_embedded(offline, vec![(entry, vector)]);
    assert_eq!(index.len().await, 1);
    assert!(matches!(
      index.best_match("my password expired").await,
      Err(crate::Error::Http(_))
    ));
  }

  #[tokio::test]
  async fn added_entry_becomes_searchable() {
    let index = index().await;
    let before = index.len().await;
    let seed = helpdesk_core::knowledge::KnowledgeSeed {
      category:        "Badge Access".into(),
      title:           "Door badge rejected".into(),
      description:     Some("Building badge reader blinks red".into()),
      solution:        "Visit reception to re-encode the badge.".into(),
      keywords:        vec!["badge".into(), "door".into(), "reader".into()],
      auto_resolvable: true,
      priority_level:  None,
    };
    index
      .add(KnowledgeEntry::from_seed(999, seed, Utc::now()))
      .await
      .unwrap();
    assert_eq!(index.len().await, before + 1);
    assert_eq!(
      best_category(&index, "my door badge is rejected by the reader").await,
      "Badge Access"
    );
  }
}
