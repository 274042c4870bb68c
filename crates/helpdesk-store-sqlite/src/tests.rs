//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{NaiveDate, Utc};
use helpdesk_core::{
  audit::{LogStatus, NewAgentLog, Stage},
  knowledge::KnowledgeSeed,
  store::HelpdeskStore,
  ticket::{NewTicket, Priority, ResolutionType, TicketChanges, TicketQuery, TicketStatus},
  user::{NewUser, Role},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_user(username: &str) -> NewUser {
  NewUser {
    username:      username.into(),
    email:         format!("{username}@example.com"),
    full_name:     None,
    password_hash: "$argon2id$stub".into(),
    role:          Role::User,
  }
}

async fn ticket(s: &SqliteStore, user_id: i64, text: &str) -> String {
  s.create_ticket(NewTicket {
    user_id,
    issue_description: text.into(),
  })
  .await
  .unwrap()
  .ticket_id
}

fn seed(category: &str, title: &str) -> KnowledgeSeed {
  KnowledgeSeed {
    category:        category.into(),
    title:           title.into(),
    description:     None,
    solution:        "Turn it off and on again.".into(),
    keywords:        vec!["reboot".into()],
    auto_resolvable: true,
    priority_level:  Some(Priority::Low),
  }
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_find_user() {
  let s = store().await;
  let user = s.create_user(new_user("alice")).await.unwrap();
  assert_eq!(user.role, Role::User);
  assert!(user.is_active);

  let found = s.find_user("alice".into()).await.unwrap().unwrap();
  assert_eq!(found.id, user.id);
  assert_eq!(found.password_hash, "$argon2id$stub");

  let by_id = s.get_user(user.id).await.unwrap().unwrap();
  assert_eq!(by_id.email, "alice@example.com");
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
  let s = store().await;
  s.create_user(new_user("alice")).await.unwrap();
  let err = s.create_user(new_user("alice")).await.unwrap_err();
  assert!(matches!(err, Error::Conflict(_)), "got {err:?}");
}

#[tokio::test]
async fn missing_user_returns_none() {
  let s = store().await;
  assert!(s.find_user("nobody".into()).await.unwrap().is_none());
  assert!(s.get_user(9999).await.unwrap().is_none());
}

#[tokio::test]
async fn anonymous_user_is_reserved_and_inactive() {
  let s = store().await;
  let anon = s.anonymous_user().await.unwrap();
  assert_eq!(anon.username, "anonymous");
  assert!(!anon.is_active);
}

// ─── Tickets ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_ticket_assigns_public_id() {
  let s = store().await;
  let user = s.create_user(new_user("alice")).await.unwrap();
  let t = s
    .create_ticket(NewTicket {
      user_id:           user.id,
      issue_description: "My printer shows offline".into(),
    })
    .await
    .unwrap();

  let prefix = format!("IT-{}-", Utc::now().format("%Y%m%d"));
  assert!(t.ticket_id.starts_with(&prefix), "{}", t.ticket_id);
  let suffix: u32 = t.ticket_id[prefix.len()..].parse().unwrap();
  assert!((1000..=9999).contains(&suffix));
  assert_eq!(t.status, TicketStatus::New);
  assert!(t.category.is_none());
  assert_eq!(t.created_at, t.updated_at);
}

#[tokio::test]
async fn ticket_for_unknown_user_is_rejected() {
  let s = store().await;
  let result = s
    .create_ticket(NewTicket {
      user_id:           4242,
      issue_description: "Nobody owns this ticket".into(),
    })
    .await;
  assert!(matches!(result, Err(Error::Database(_))));
}

#[tokio::test]
async fn update_ticket_applies_partial_changes() {
  let s = store().await;
  let anon = s.anonymous_user().await.unwrap();
  let id = ticket(&s, anon.id, "VPN keeps disconnecting").await;
  let before = s.get_ticket(id.clone()).await.unwrap().unwrap();

  let now = Utc::now();
  let after = s
    .update_ticket(id.clone(), TicketChanges {
      category: Some("VPN".into()),
      priority: Some(Priority::High),
      status: Some(TicketStatus::Resolved),
      resolution_type: Some(ResolutionType::Automatic),
      confidence_score: Some(0.82),
      resolved_at: Some(now),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(after.category.as_deref(), Some("VPN"));
  assert_eq!(after.priority, Some(Priority::High));
  assert_eq!(after.status, TicketStatus::Resolved);
  assert_eq!(after.resolution_type, Some(ResolutionType::Automatic));
  assert_eq!(after.confidence_score, Some(0.82));
  assert!(after.resolved_at.is_some());
  assert!(after.assigned_to.is_none());
  assert!(after.updated_at >= before.updated_at);
  assert_eq!(after.issue_description, "VPN keeps disconnecting");
}

#[tokio::test]
async fn update_missing_ticket_returns_none() {
  let s = store().await;
  let result = s
    .update_ticket("IT-19700101-0000".into(), TicketChanges::default())
    .await
    .unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn list_tickets_is_newest_first_and_paginated() {
  let s = store().await;
  let anon = s.anonymous_user().await.unwrap();
  let mut ids = Vec::new();
  for i in 0..5 {
    ids.push(ticket(&s, anon.id, &format!("Issue number {i} here")).await);
  }

  let page = s
    .list_tickets(TicketQuery { skip: 1, limit: Some(2), ..Default::default() })
    .await
    .unwrap();
  let got: Vec<_> = page.iter().map(|t| t.ticket_id.clone()).collect();
  assert_eq!(got, vec![ids[3].clone(), ids[2].clone()]);
}

#[tokio::test]
async fn list_tickets_filters_by_user_and_status() {
  let s = store().await;
  let alice = s.create_user(new_user("alice")).await.unwrap();
  let bob = s.create_user(new_user("bob")).await.unwrap();
  let a1 = ticket(&s, alice.id, "Alice cannot print today").await;
  ticket(&s, alice.id, "Alice forgot her password").await;
  ticket(&s, bob.id, "Bob has no wifi signal").await;

  s.update_ticket(a1.clone(), TicketChanges {
    status: Some(TicketStatus::Escalated),
    ..Default::default()
  })
  .await
  .unwrap();

  let alices = s
    .list_tickets(TicketQuery { user_id: Some(alice.id), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(alices.len(), 2);
  assert!(alices.iter().all(|t| t.user_id == alice.id));

  let escalated = s
    .list_tickets(TicketQuery {
      status: Some(TicketStatus::Escalated),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(escalated.len(), 1);
  assert_eq!(escalated[0].ticket_id, a1);
}

// ─── Audit log ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn logs_are_listed_in_insertion_order() {
  let s = store().await;
  let anon = s.anonymous_user().await.unwrap();
  let id = ticket(&s, anon.id, "Outlook will not sync mail").await;
  let t = s.get_ticket(id).await.unwrap().unwrap();

  let mut first =
    NewAgentLog::new(t.id, Stage::Classification, "classify_issue", LogStatus::Success);
  first.input_data = Some(serde_json::json!({ "issue_description": "Outlook" }));
  first.confidence_score = Some(0.64);
  first.processing_time_ms = Some(1.5);
  s.append_log(first).await.unwrap();
  s.append_log(NewAgentLog::new(
    t.id,
    Stage::Decision,
    "make_decision",
    LogStatus::Success,
  ))
  .await
  .unwrap();

  let logs = s.list_logs(t.id).await.unwrap();
  assert_eq!(logs.len(), 2);
  assert_eq!(logs[0].agent_name, Stage::Classification);
  assert_eq!(
    logs[0].input_data,
    Some(serde_json::json!({ "issue_description": "Outlook" }))
  );
  assert_eq!(logs[1].agent_name, Stage::Decision);
  assert!(logs[1].output_data.is_none());
}

// ─── Knowledge base ──────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_knowledge_preserves_usage() {
  let s = store().await;
  let entry = s.upsert_knowledge(seed("Printer", "Printer offline")).await.unwrap();
  assert_eq!(entry.usage_count, 0);
  assert_eq!(entry.keywords, vec!["reboot".to_string()]);

  s.record_knowledge_use(entry.id).await.unwrap();
  s.record_knowledge_use(entry.id).await.unwrap();

  let mut changed = seed("Printer", "Printer offline");
  changed.solution = "Check the cable first.".into();
  let refreshed = s.upsert_knowledge(changed).await.unwrap();
  assert_eq!(refreshed.id, entry.id);
  assert_eq!(refreshed.usage_count, 2);
  assert_eq!(refreshed.solution, "Check the cable first.");

  s.upsert_knowledge(seed("Email", "Mailbox full")).await.unwrap();
  let all = s.list_knowledge().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].category, "Printer");
}

#[tokio::test]
async fn seeding_keeps_existing_entries() {
  let s = store().await;
  let first = s.seed_knowledge(seed("Printer", "Printer offline")).await.unwrap();
  let first = first.expect("inserted on an empty store");

  let mut edited = seed("Printer", "Printer offline");
  edited.solution = "Call the print room on ext. 4410.".into();
  s.upsert_knowledge(edited).await.unwrap();

  let again = s.seed_knowledge(seed("Printer", "Printer offline")).await.unwrap();
  assert!(again.is_none());

  let all = s.list_knowledge().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].id, first.id);
  assert_eq!(all[0].solution, "Call the print room on ext. 4410.");

  assert!(s.seed_knowledge(seed("Email", "Mailbox full")).await.unwrap().is_some());
  assert_eq!(s.list_knowledge().await.unwrap().len(), 2);
}

#[tokio::test]
async fn record_use_of_unknown_entry_fails() {
  let s = store().await;
  let err = s.record_knowledge_use(77).await.unwrap_err();
  assert!(matches!(err, Error::KnowledgeNotFound(77)));
}

#[tokio::test]
async fn blank_knowledge_seed_is_rejected() {
  let s = store().await;
  let err = s.upsert_knowledge(seed("", "Untitled")).await.unwrap_err();
  assert!(matches!(err, Error::Core(_)));
}

// ─── Analytics ───────────────────────────────────────────────────────────────

async fn populate(s: &SqliteStore) {
  let anon = s.anonymous_user().await.unwrap();
  let resolved = ticket(s, anon.id, "Password expired this morning").await;
  let escalated = ticket(s, anon.id, "Laptop screen is cracked").await;
  ticket(s, anon.id, "Something odd is happening").await;

  let now = Utc::now();
  s.update_ticket(resolved.clone(), TicketChanges {
    category: Some("Password Reset".into()),
    priority: Some(Priority::Medium),
    status: Some(TicketStatus::Resolved),
    confidence_score: Some(0.9),
    resolved_at: Some(now),
    ..Default::default()
  })
  .await
  .unwrap();
  s.update_ticket(escalated.clone(), TicketChanges {
    category: Some("Hardware Failure".into()),
    priority: Some(Priority::High),
    status: Some(TicketStatus::Escalated),
    confidence_score: Some(0.5),
    ..Default::default()
  })
  .await
  .unwrap();

  let row = s.get_ticket(escalated).await.unwrap().unwrap().id;
  s.append_log(NewAgentLog::new(row, Stage::Escalation, "escalate_to_human", LogStatus::Escalated))
    .await
    .unwrap();
  s.append_log(NewAgentLog::new(row, Stage::Classification, "classify_issue", LogStatus::Failed))
    .await
    .unwrap();
  s.append_log(NewAgentLog::new(row, Stage::Classification, "classify_issue", LogStatus::Success))
    .await
    .unwrap();
}

#[tokio::test]
async fn dashboard_counts_match_tickets() {
  let s = store().await;
  populate(&s).await;

  let d = s.dashboard(10).await.unwrap();
  assert_eq!(d.tickets.total_tickets, 3);
  assert_eq!(d.tickets.auto_resolved, 1);
  assert_eq!(d.tickets.escalated, 1);
  assert_eq!(d.tickets.pending, 1);
  assert!((d.tickets.resolution_rate - 100.0 / 3.0).abs() < 1e-9);
  assert!(d.tickets.avg_resolution_time.is_some());
  assert_eq!(d.category_distribution.get("Password Reset"), Some(&1));
  assert_eq!(d.priority_distribution.get("high"), Some(&1));
  assert_eq!(d.recent_tickets.len(), 3);

  // Stages come back in pipeline order.
  let stages: Vec<_> = d.agent_performance.iter().map(|p| p.agent_name).collect();
  assert_eq!(stages, vec![Stage::Classification, Stage::Escalation]);
  assert_eq!(d.agent_performance[0].total_actions, 2);
  assert_eq!(d.agent_performance[0].success_rate, 50.0);
  assert_eq!(d.agent_performance[1].success_rate, 100.0);
}

#[tokio::test]
async fn empty_dashboard_has_zero_rates() {
  let s = store().await;
  let d = s.dashboard(10).await.unwrap();
  assert_eq!(d.tickets.total_tickets, 0);
  assert_eq!(d.tickets.resolution_rate, 0.0);
  assert!(d.tickets.avg_resolution_time.is_none());
  assert!(d.agent_performance.is_empty());
}

#[tokio::test]
async fn daily_rollup_matches_and_is_replaced_on_rerun() {
  let s = store().await;
  populate(&s).await;
  let today = Utc::now().date_naive();

  let first = s.rollup_daily(today).await.unwrap();
  assert_eq!(first.date, today);
  assert_eq!(first.total_tickets, 3);
  assert_eq!(first.auto_resolved, 1);
  assert_eq!(first.escalated, 1);
  assert_eq!(first.pending, 1);
  assert!((first.avg_confidence_score.unwrap() - 0.7).abs() < 1e-9);
  assert_eq!(first.category_distribution.len(), 2);

  let anon = s.anonymous_user().await.unwrap();
  ticket(&s, anon.id, "Another ticket arrives later").await;
  let second = s.rollup_daily(today).await.unwrap();
  assert_eq!(second.total_tickets, 4);

  let stored = s.list_daily(30).await.unwrap();
  assert_eq!(stored.len(), 1);
  assert_eq!(stored[0].total_tickets, 4);
}

#[tokio::test]
async fn rollup_of_empty_day_has_no_success_rate() {
  let s = store().await;
  let day = NaiveDate::from_ymd_opt(2001, 2, 3).unwrap();
  let m = s.rollup_daily(day).await.unwrap();
  assert_eq!(m.total_tickets, 0);
  assert!(m.resolution_success_rate.is_none());
  assert!(m.category_distribution.is_empty());
}
