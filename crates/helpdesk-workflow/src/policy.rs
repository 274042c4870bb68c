//! Confidence thresholds that drive routing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingPolicy {
  /// Minimum confidence for an automatic resolution.
  pub auto_resolve_threshold:   f64,
  /// A match scoring at or below this is never marked auto-resolvable.
  pub classification_threshold: f64,
  /// Below this, escalation is attributed to low confidence.
  pub low_confidence_threshold: f64,
}

impl Default for RoutingPolicy {
  fn default() -> Self {
    Self {
      auto_resolve_threshold:   0.7,
      classification_threshold: 0.6,
      low_confidence_threshold: 0.5,
    }
  }
}
