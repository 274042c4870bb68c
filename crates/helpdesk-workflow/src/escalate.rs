//! Escalation to the human support queue.

use helpdesk_core::ticket::Priority;
use serde::Serialize;

use crate::classify::Classification;

/// Queue that receives every escalated ticket.
pub const SUPPORT_TEAM: &str = "IT Support Team";

#[derive(Debug, Clone, Serialize)]
pub struct Escalation {
  pub assigned_to:             String,
  pub priority:                Priority,
  pub category:                String,
  pub estimated_response_time: String,
  pub message:                 String,
}

pub fn render_escalation(ticket_id: &str, c: &Classification) -> Escalation {
  let response_time = c.priority.response_time();
  let message = format!(
    "Your request has been escalated to our IT support team.\n\n\
     Ticket ID: {ticket_id}\n\
     Category: {category}\n\
     Priority: {priority}\n\n\
     Your request requires attention from our IT specialists. A team member \
     will contact you soon.\n\n\
     Expected Response Time: {response_time}\n\n\
     What happens next:\n\
     1. An IT support specialist will review your request\n\
     2. You'll receive an email when someone is assigned\n\
     3. The specialist may contact you for additional information\n\
     4. You'll be notified when the issue is resolved\n\n\
     You can check your ticket status anytime using Ticket ID: {ticket_id}",
    category = c.category,
    priority = c.priority.as_ref().to_uppercase(),
  );
  Escalation {
    assigned_to: SUPPORT_TEAM.to_owned(),
    priority: c.priority,
    category: c.category.clone(),
    estimated_response_time: response_time.to_owned(),
    message,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn message_names_ticket_and_response_time() {
    let c = Classification {
      category: "Security Incident".into(),
      priority: Priority::Critical,
      ..Classification::unmatched()
    };
    let e = render_escalation("IT-20240101-1234", &c);
    assert_eq!(e.assigned_to, "IT Support Team");
    assert_eq!(e.estimated_response_time, "15 minutes");
    assert!(e.message.contains("Ticket ID: IT-20240101-1234"));
    assert!(e.message.contains("Priority: CRITICAL"));
    assert!(e.message.contains("Expected Response Time: 15 minutes"));
  }
}
