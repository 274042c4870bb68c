//! Turning the best knowledge-base match into a classification.

use helpdesk_core::ticket::Priority;
use helpdesk_rag::SearchHit;
use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::policy::RoutingPolicy;

/// Category reported when the index has nothing to offer.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConfidenceLevel {
  High,
  Medium,
  Low,
}

impl ConfidenceLevel {
  pub fn from_score(score: f64) -> Self {
    if score > 0.7 {
      Self::High
    } else if score > 0.5 {
      Self::Medium
    } else {
      Self::Low
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct Classification {
  /// False when no knowledge entry was available to match against.
  pub success:            bool,
  pub category:           String,
  pub title:              String,
  pub priority:           Priority,
  pub confidence_score:   f64,
  pub confidence_level:   ConfidenceLevel,
  pub auto_resolvable:    bool,
  pub keywords_matched:   Vec<String>,
  pub solution:           Option<String>,
  pub description:        Option<String>,
  /// Id of the matched knowledge entry.
  pub entry_id:           Option<i64>,
  pub processing_time_ms: f64,
}

impl Classification {
  pub fn unmatched() -> Self {
    Self {
      success:            false,
      category:           UNKNOWN_CATEGORY.to_owned(),
      title:              UNKNOWN_CATEGORY.to_owned(),
      priority:           Priority::Medium,
      confidence_score:   0.0,
      confidence_level:   ConfidenceLevel::Low,
      auto_resolvable:    false,
      keywords_matched:   Vec::new(),
      solution:           None,
      description:        None,
      entry_id:           None,
      processing_time_ms: 0.0,
    }
  }

  /// Classify from the best hit, if any.
  pub fn from_hit(hit: Option<SearchHit>, policy: &RoutingPolicy) -> Self {
    let Some(SearchHit { entry, relevance_score }) = hit else {
      return Self::unmatched();
    };
    let priority = entry.priority();
    Self {
      success: true,
      category: entry.category,
      title: entry.title,
      priority,
      confidence_score: relevance_score,
      confidence_level: ConfidenceLevel::from_score(relevance_score),
      auto_resolvable: entry.auto_resolvable
        && relevance_score > policy.classification_threshold,
      keywords_matched: entry.keywords,
      solution: Some(entry.solution),
      description: entry.description,
      entry_id: Some(entry.id),
      processing_time_ms: 0.0,
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use helpdesk_core::knowledge::{KnowledgeEntry, KnowledgeSeed};

  use super::*;

  fn hit(score: f64, auto_resolvable: bool) -> SearchHit {
    let seed = KnowledgeSeed {
      category: "Printer Issues".into(),
      title: "Printer offline".into(),
      description: None,
      solution: "Power cycle the printer.".into(),
      keywords: vec!["printer".into()],
      auto_resolvable,
      priority_level: None,
    };
    SearchHit {
      entry:           KnowledgeEntry::from_seed(3, seed, Utc::now()),
      relevance_score: score,
    }
  }

  #[test]
  fn confidence_levels() {
    assert_eq!(ConfidenceLevel::from_score(0.71), ConfidenceLevel::High);
    assert_eq!(ConfidenceLevel::from_score(0.7), ConfidenceLevel::Medium);
    assert_eq!(ConfidenceLevel::from_score(0.5), ConfidenceLevel::Low);
  }

  #[test]
  fn no_hit_is_unknown() {
    let c = Classification::from_hit(None, &RoutingPolicy::default());
    assert!(!c.success);
    assert_eq!(c.category, "Unknown");
    assert_eq!(c.priority, Priority::Medium);
    assert_eq!(c.confidence_score, 0.0);
    assert!(!c.auto_resolvable);
  }

  #[test]
  fn auto_resolvable_needs_flag_and_score() {
    let policy = RoutingPolicy::default();
    let c = Classification::from_hit(Some(hit(0.65, true)), &policy);
    assert!(c.auto_resolvable);
    assert_eq!(c.entry_id, Some(3));
    assert_eq!(c.priority, Priority::Medium);

    let c = Classification::from_hit(Some(hit(0.6, true)), &policy);
    assert!(!c.auto_resolvable);

    let c = Classification::from_hit(Some(hit(0.95, false)), &policy);
    assert!(!c.auto_resolvable);
  }
}
