//! Automatic resolution: the canned answer sent back to the user.

use serde::Serialize;

use crate::classify::Classification;

#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
  pub title:        String,
  pub category:     String,
  pub solution:     String,
  /// The full message shown to the user.
  pub instructions: String,
}

/// Render the resolution message, or `None` when the matched entry has no
/// solution text.
pub fn render_resolution(c: &Classification) -> Option<Resolution> {
  let solution = c.solution.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
  let instructions = format!(
    "Automatic Resolution - {title}\n\n\
     {solution}\n\n\
     ---\n\
     If this solution doesn't resolve your issue, please reply to this ticket \
     or contact IT support directly.\n\n\
     Category: {category}\n\
     Confidence: {confidence:.1}%",
    title = c.title,
    category = c.category,
    confidence = c.confidence_score * 100.0,
  );
  Some(Resolution {
    title: c.title.clone(),
    category: c.category.clone(),
    solution: solution.to_owned(),
    instructions,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn message_contains_solution_and_confidence() {
    let c = Classification {
      title: "Printer offline".into(),
      category: "Printer Issues".into(),
      solution: Some("1. Power cycle the printer".into()),
      confidence_score: 0.8567,
      ..Classification::unmatched()
    };
    let r = render_resolution(&c).unwrap();
    assert!(r.instructions.starts_with("Automatic Resolution - Printer offline\n\n1. Power"));
    assert!(r.instructions.contains("Category: Printer Issues"));
    assert!(r.instructions.ends_with("Confidence: 85.7%"));
  }

  #[test]
  fn blank_solution_cannot_resolve() {
    let c = Classification {
      solution: Some("   ".into()),
      ..Classification::unmatched()
    };
    assert!(render_resolution(&c).is_none());
    assert!(render_resolution(&Classification::unmatched()).is_none());
  }
}
