//! Routing decision: resolve automatically or hand over to a human.

use helpdesk_core::ticket::Priority;
use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::{classify::Classification, policy::RoutingPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DecisionAction {
  AutoResolve,
  Escalate,
}

#[derive(Debug, Clone, Serialize)]
pub struct Decision {
  pub action:           DecisionAction,
  pub reasoning:        String,
  pub requires_human:   bool,
  pub confidence_score: f64,
}

/// Rules are checked in order; the first that applies wins.
pub fn decide(c: &Classification, policy: &RoutingPolicy) -> Decision {
  let score = c.confidence_score;
  let (action, reasoning) = if c.auto_resolvable
    && score >= policy.auto_resolve_threshold
  {
    (
      DecisionAction::AutoResolve,
      format!(
        "Issue classified as '{}' with high confidence ({score:.2}) and marked as auto-resolvable",
        c.category
      ),
    )
  } else if c.priority == Priority::Critical {
    (
      DecisionAction::Escalate,
      "Critical priority issues always require immediate human attention".to_owned(),
    )
  } else if score < policy.low_confidence_threshold {
    (
      DecisionAction::Escalate,
      format!("Low confidence score ({score:.2}) - human review needed"),
    )
  } else {
    (
      DecisionAction::Escalate,
      "Issue complexity or policy requires human IT staff involvement".to_owned(),
    )
  };

  Decision {
    action,
    reasoning,
    requires_human: action == DecisionAction::Escalate,
    confidence_score: score,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn classification(score: f64, auto: bool, priority: Priority) -> Classification {
    Classification {
      confidence_score: score,
      auto_resolvable: auto,
      priority,
      category: "Email Issues".into(),
      success: true,
      ..Classification::unmatched()
    }
  }

  #[test]
  fn confident_auto_resolvable_match_resolves() {
    let d = decide(
      &classification(0.7, true, Priority::Low),
      &RoutingPolicy::default(),
    );
    assert_eq!(d.action, DecisionAction::AutoResolve);
    assert!(!d.requires_human);
    assert!(d.reasoning.contains("Email Issues"));
  }

  #[test]
  fn critical_priority_escalates() {
    let d = decide(
      &classification(0.9, false, Priority::Critical),
      &RoutingPolicy::default(),
    );
    assert_eq!(d.action, DecisionAction::Escalate);
    assert!(d.requires_human);
    assert!(d.reasoning.starts_with("Critical priority"));
  }

  #[test]
  fn low_confidence_escalates() {
    let d = decide(
      &classification(0.3, true, Priority::Medium),
      &RoutingPolicy::default(),
    );
    assert_eq!(d.action, DecisionAction::Escalate);
    assert_eq!(d.reasoning, "Low confidence score (0.30) - human review needed");
  }

  #[test]
  fn middling_confidence_escalates_by_policy() {
    let d = decide(
      &classification(0.65, true, Priority::High),
      &RoutingPolicy::default(),
    );
    assert_eq!(d.action, DecisionAction::Escalate);
    assert!(d.reasoning.contains("policy"));
  }

  #[test]
  fn auto_resolve_wins_over_critical_priority() {
    let d = decide(
      &classification(0.8, true, Priority::Critical),
      &RoutingPolicy::default(),
    );
    assert_eq!(d.action, DecisionAction::AutoResolve);
  }

  #[test]
  fn thresholds_come_from_policy() {
    let strict = RoutingPolicy {
      auto_resolve_threshold: 0.95,
      ..RoutingPolicy::default()
    };
    let d = decide(&classification(0.9, true, Priority::Low), &strict);
    assert_eq!(d.action, DecisionAction::Escalate);
  }
}
