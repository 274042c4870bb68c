//! [`Workflow`]: runs a submitted issue through every stage and records the
//! outcome on the ticket.

use std::{sync::Arc, time::Instant};

use chrono::Utc;
use helpdesk_core::{
  audit::{LogStatus, NewAgentLog, Stage},
  store::HelpdeskStore,
  ticket::{
    NewTicket, Priority, ResolutionType, Ticket, TicketChanges, TicketStatus,
    normalize_description,
  },
};
use helpdesk_rag::KnowledgeIndex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
  Error, Result,
  classify::Classification,
  decide::{Decision, DecisionAction, decide},
  escalate::render_escalation,
  policy::RoutingPolicy,
  resolve::render_resolution,
};

/// What the submitter is told once the pipeline has finished.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowOutcome {
  pub ticket_id:                 String,
  pub status:                    TicketStatus,
  pub category:                  String,
  pub priority:                  Priority,
  pub resolution_type:           ResolutionType,
  pub confidence_score:          f64,
  pub message:                   String,
  pub resolution_instructions:   Option<String>,
  pub requires_human:            bool,
  pub estimated_resolution_time: String,
}

fn elapsed_ms(started: Instant) -> f64 {
  started.elapsed().as_secs_f64() * 1000.0
}

/// The issue-processing pipeline.
pub struct Workflow<S> {
  store:  S,
  index:  Arc<KnowledgeIndex>,
  policy: RoutingPolicy,
}

impl<S: HelpdeskStore> Workflow<S> {
  pub fn new(store: S, index: Arc<KnowledgeIndex>, policy: RoutingPolicy) -> Self {
    Self { store, index, policy }
  }

  pub fn policy(&self) -> &RoutingPolicy { &self.policy }

  pub fn index(&self) -> &Arc<KnowledgeIndex> { &self.index }

  /// Validate the issue, open a ticket for `user_id`, and route it.
  pub async fn process(&self, user_id: i64, description: &str) -> Result<WorkflowOutcome> {
    let issue = normalize_description(description)
      .map_err(|e| Error::InvalidInput(e.to_string()))?;

    let ticket = self
      .store
      .create_ticket(NewTicket { user_id, issue_description: issue })
      .await
      .map_err(Error::store)?;
    tracing::info!(ticket_id = %ticket.ticket_id, user_id, "ticket opened");

    let classification = self.classify(&ticket).await?;
    let decision = self.decide(&ticket, &classification).await?;

    if decision.action == DecisionAction::AutoResolve
      && let Some(outcome) = self.resolve(&ticket, &classification).await?
    {
      return Ok(outcome);
    }
    self.escalate(&ticket, &classification, &decision).await
  }

  async fn log(&self, entry: NewAgentLog) -> Result<()> {
    self.store.append_log(entry).await.map_err(Error::store)?;
    Ok(())
  }

  async fn update(&self, ticket: &Ticket, changes: TicketChanges) -> Result<Ticket> {
    self
      .store
      .update_ticket(ticket.ticket_id.clone(), changes)
      .await
      .map_err(Error::store)?
      .ok_or_else(|| Error::TicketVanished(ticket.ticket_id.clone()))
  }

  // ── Classification ────────────────────────────────────────────────────

  async fn classify(&self, ticket: &Ticket) -> Result<Classification> {
    let started = Instant::now();
    // A failed lookup is classified like an unmatched issue and escalates.
    let (hit, lookup_error) = match self.index.best_match(&ticket.issue_description).await {
      Ok(hit) => (hit, None),
      Err(e) => {
        tracing::warn!(
          ticket_id = %ticket.ticket_id,
          error = %e,
          "knowledge lookup failed"
        );
        (None, Some(e.to_string()))
      }
    };
    let mut c = Classification::from_hit(hit, &self.policy);
    c.processing_time_ms = elapsed_ms(started);

    tracing::info!(
      ticket_id = %ticket.ticket_id,
      category = %c.category,
      confidence = c.confidence_score,
      level = %c.confidence_level,
      "issue classified"
    );

    let mut log = NewAgentLog::new(
      ticket.id,
      Stage::Classification,
      "classify_issue",
      if c.success { LogStatus::Success } else { LogStatus::Failed },
    );
    log.input_data = Some(json!({ "issue_description": ticket.issue_description }));
    log.output_data = Some(serde_json::to_value(&c)?);
    log.processing_time_ms = Some(c.processing_time_ms);
    log.confidence_score = Some(c.confidence_score);
    if !c.success {
      log.error_message = Some(
        lookup_error.unwrap_or_else(|| "No matching knowledge base entry found".into()),
      );
    }
    self.log(log).await?;

    self
      .update(ticket, TicketChanges {
        category: Some(c.category.clone()),
        priority: Some(c.priority),
        status: Some(TicketStatus::Classified),
        confidence_score: Some(c.confidence_score),
        auto_resolvable: Some(c.auto_resolvable),
        ..Default::default()
      })
      .await?;
    Ok(c)
  }

  // ── Decision ──────────────────────────────────────────────────────────

  async fn decide(&self, ticket: &Ticket, c: &Classification) -> Result<Decision> {
    let started = Instant::now();
    let decision = decide(c, &self.policy);
    let took = elapsed_ms(started);

    tracing::debug!(
      ticket_id = %ticket.ticket_id,
      action = %decision.action,
      reasoning = %decision.reasoning,
      "routing decided"
    );

    let mut log =
      NewAgentLog::new(ticket.id, Stage::Decision, "make_decision", LogStatus::Success);
    log.input_data = Some(json!({
      "category": c.category,
      "confidence_score": c.confidence_score,
      "auto_resolvable": c.auto_resolvable,
      "priority": c.priority,
    }));
    log.output_data = Some(serde_json::to_value(&decision)?);
    log.processing_time_ms = Some(took);
    log.confidence_score = Some(decision.confidence_score);
    self.log(log).await?;
    Ok(decision)
  }

  // ── Resolution ────────────────────────────────────────────────────────

  /// Resolve automatically. Returns `None` when there is nothing to send,
  /// in which case the caller escalates.
  async fn resolve(
    &self,
    ticket: &Ticket,
    c: &Classification,
  ) -> Result<Option<WorkflowOutcome>> {
    let started = Instant::now();
    let Some(resolution) = render_resolution(c) else {
      tracing::warn!(ticket_id = %ticket.ticket_id, "no solution text, escalating");
      let mut log =
        NewAgentLog::new(ticket.id, Stage::Resolution, "auto_resolve", LogStatus::Failed);
      log.error_message = Some("No solution available for this issue type".into());
      log.processing_time_ms = Some(elapsed_ms(started));
      self.log(log).await?;
      return Ok(None);
    };

    let now = Utc::now();
    self
      .update(ticket, TicketChanges {
        status: Some(TicketStatus::Resolved),
        resolution_type: Some(ResolutionType::Automatic),
        resolution: Some(resolution.solution.clone()),
        resolution_instructions: Some(resolution.instructions.clone()),
        requires_human: Some(false),
        resolved_at: Some(now),
        ..Default::default()
      })
      .await?;

    if let Some(entry_id) = c.entry_id
      && let Err(e) = self.store.record_knowledge_use(entry_id).await
    {
      tracing::warn!(entry_id, error = %e, "could not record knowledge entry use");
    }

    let mut log =
      NewAgentLog::new(ticket.id, Stage::Resolution, "auto_resolve", LogStatus::Success);
    log.input_data = Some(json!({ "category": c.category, "title": c.title }));
    log.output_data = Some(serde_json::to_value(&resolution)?);
    log.processing_time_ms = Some(elapsed_ms(started));
    log.confidence_score = Some(c.confidence_score);
    self.log(log).await?;

    tracing::info!(ticket_id = %ticket.ticket_id, category = %c.category, "ticket resolved automatically");

    Ok(Some(WorkflowOutcome {
      ticket_id:                 ticket.ticket_id.clone(),
      status:                    TicketStatus::Resolved,
      category:                  c.category.clone(),
      priority:                  c.priority,
      resolution_type:           ResolutionType::Automatic,
      confidence_score:          c.confidence_score,
      message:                   resolution.instructions.clone(),
      resolution_instructions:   Some(resolution.instructions),
      requires_human:            false,
      estimated_resolution_time: "Immediate".to_owned(),
    }))
  }

  // ── Escalation ────────────────────────────────────────────────────────

  async fn escalate(
    &self,
    ticket: &Ticket,
    c: &Classification,
    decision: &Decision,
  ) -> Result<WorkflowOutcome> {
    let started = Instant::now();
    let escalation = render_escalation(&ticket.ticket_id, c);

    self
      .update(ticket, TicketChanges {
        status: Some(TicketStatus::Escalated),
        resolution_type: Some(ResolutionType::Escalated),
        requires_human: Some(true),
        assigned_to: Some(escalation.assigned_to.clone()),
        assigned_at: Some(Utc::now()),
        ..Default::default()
      })
      .await?;

    let mut log = NewAgentLog::new(
      ticket.id,
      Stage::Escalation,
      "escalate_to_human",
      LogStatus::Escalated,
    );
    log.input_data = Some(json!({
      "original_issue": ticket.issue_description,
      "classification": c.category,
      "confidence": c.confidence_score,
      "knowledge_insights": c.description,
    }));
    log.output_data = Some(serde_json::to_value(&escalation)?);
    log.meta_data = Some(json!({ "reasoning": decision.reasoning }));
    log.processing_time_ms = Some(elapsed_ms(started));
    log.confidence_score = Some(c.confidence_score);
    self.log(log).await?;

    tracing::info!(
      ticket_id = %ticket.ticket_id,
      priority = %escalation.priority,
      "ticket escalated"
    );

    Ok(WorkflowOutcome {
      ticket_id:                 ticket.ticket_id.clone(),
      status:                    TicketStatus::Escalated,
      category:                  escalation.category,
      priority:                  escalation.priority,
      resolution_type:           ResolutionType::Escalated,
      confidence_score:          c.confidence_score,
      message:                   escalation.message,
      resolution_instructions:   None,
      requires_human:            true,
      estimated_resolution_time: escalation.estimated_response_time,
    })
  }
}
