//! Knowledge-base entries: the canned answers the classifier matches against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, ticket::Priority};

fn default_true() -> bool { true }

/// One entry as written in the knowledge-base JSON file or posted to the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeSeed {
  pub category:        String,
  pub title:           String,
  #[serde(default)]
  pub description:     Option<String>,
  pub solution:        String,
  #[serde(default)]
  pub keywords:        Vec<String>,
  #[serde(default = "default_true")]
  pub auto_resolvable: bool,
  #[serde(default)]
  pub priority_level:  Option<Priority>,
}

impl KnowledgeSeed {
  pub fn validate(&self) -> Result<()> {
    if self.category.trim().is_empty() {
      return Err(Error::validation("category", "must not be empty"));
    }
    if self.title.trim().is_empty() {
      return Err(Error::validation("title", "must not be empty"));
    }
    Ok(())
  }
}

/// A persisted knowledge-base entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeEntry {
  pub id:              i64,
  pub category:        String,
  pub title:           String,
  pub description:     Option<String>,
  pub solution:        String,
  pub keywords:        Vec<String>,
  pub auto_resolvable: bool,
  pub priority_level:  Option<Priority>,
  pub success_rate:    f64,
  pub usage_count:     i64,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
}

impl KnowledgeEntry {
  /// An entry that has not been used yet, built from its seed.
  pub fn from_seed(id: i64, seed: KnowledgeSeed, now: DateTime<Utc>) -> Self {
    Self {
      id,
      category: seed.category,
      title: seed.title,
      description: seed.description,
      solution: seed.solution,
      keywords: seed.keywords,
      auto_resolvable: seed.auto_resolvable,
      priority_level: seed.priority_level,
      success_rate: 0.0,
      usage_count: 0,
      created_at: now,
      updated_at: now,
    }
  }

  /// The text embedded for similarity search. The solution is left out so
  /// that generic troubleshooting vocabulary does not blur categories.
  pub fn document_text(&self) -> String {
    let mut text = format!(
      "Category: {}\nTitle: {}\nKeywords: {}",
      self.category,
      self.title,
      self.keywords.join(", ")
    );
    if let Some(desc) = self.description.as_deref().filter(|d| !d.is_empty()) {
      text.push_str("\nDescription: ");
      text.push_str(desc);
    }
    text
  }

  pub fn priority(&self) -> Priority { self.priority_level.unwrap_or_default() }
}
