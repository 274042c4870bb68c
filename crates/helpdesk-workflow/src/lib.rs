//! The ticket workflow: intake, classification against the knowledge index,
//! routing decision, and either automatic resolution or escalation to a
//! human. Every stage appends a row to the ticket's audit log.

pub mod classify;
pub mod decide;
pub mod error;
pub mod escalate;
pub mod pipeline;
pub mod policy;
pub mod resolve;

pub use classify::{Classification, ConfidenceLevel};
pub use decide::{Decision, DecisionAction};
pub use error::{Error, Result};
pub use pipeline::{Workflow, WorkflowOutcome};
pub use policy::RoutingPolicy;
