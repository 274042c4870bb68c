//! Loading the seed knowledge base.
//!
//! A default knowledge base is compiled into the binary. Deployments can
//! replace it with their own JSON file of [`KnowledgeSeed`] objects.

use std::path::Path;

use helpdesk_core::knowledge::KnowledgeSeed;

use crate::{Error, Result};

const DEFAULT_KNOWLEDGE_BASE: &str = include_str!("../data/knowledge_base.json");

/// Parse and validate a JSON array of seeds.
pub fn parse_seeds(json: &str) -> Result<Vec<KnowledgeSeed>> {
  let seeds: Vec<KnowledgeSeed> = serde_json::from_str(json)?;
  for seed in &seeds {
    seed.validate()?;
  }
  Ok(seeds)
}

/// The compiled-in knowledge base.
pub fn default_seeds() -> Result<Vec<KnowledgeSeed>> {
  parse_seeds(DEFAULT_KNOWLEDGE_BASE)
}

/// Seeds from `path`, or the compiled-in defaults when no path is given.
pub async fn load_seeds(path: Option<&Path>) -> Result<Vec<KnowledgeSeed>> {
  let Some(path) = path else {
    return default_seeds();
  };
  let json = tokio::fs::read_to_string(path).await.map_err(|source| Error::Io {
    path: path.display().to_string(),
    source,
  })?;
  let seeds = parse_seeds(&json)?;
  tracing::info!(path = %path.display(), count = seeds.len(), "loaded knowledge base");
  Ok(seeds)
}

#[cfg(test)]
mod tests {
  use helpdesk_core::ticket::Priority;

  use super::*;

  #[test]
  fn default_knowledge_base_is_valid() {
    let seeds = default_seeds().unwrap();
    assert_eq!(seeds.len(), 10);

    let security = seeds
      .iter()
      .find(|s| s.category == "Security Incident")
      .unwrap();
    assert!(!security.auto_resolvable);
    assert_eq!(security.priority_level, Some(Priority::Critical));
  }

  #[test]
  fn categories_and_titles_are_unique() {
    let seeds = default_seeds().unwrap();
    let mut keys: Vec<_> = seeds.iter().map(|s| (&s.category, &s.title)).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), seeds.len());
  }

  #[test]
  fn entries_with_blank_category_are_rejected() {
    let json = r#"[{"category":" ","title":"x","solution":"y"}]"#;
    assert!(matches!(parse_seeds(json), Err(Error::Core(_))));
  }

  #[tokio::test]
  async fn missing_file_is_an_io_error() {
    let err = load_seeds(Some(Path::new("/nonexistent/kb.json")))
      .await
      .unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
  }
}
