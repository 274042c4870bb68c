//! JSON REST API for the helpdesk.
//!
//! Exposes an axum [`Router`] backed by any
//! [`helpdesk_core::store::HelpdeskStore`]. TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = helpdesk_api::app(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod analytics;
pub mod auth;
pub mod error;
pub mod health;
pub mod knowledge;
pub mod openapi;
pub mod tickets;
pub mod workflow;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use helpdesk_core::store::HelpdeskStore;
use helpdesk_rag::KnowledgeIndex;
use helpdesk_workflow::{RoutingPolicy, Workflow};
use tower_http::trace::TraceLayer;

pub use auth::AuthConfig;
pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Name and version reported by `/health` and the OpenAPI document.
#[derive(Debug, Clone)]
pub struct AppInfo {
  pub app_name: String,
  pub version:  String,
}

impl Default for AppInfo {
  fn default() -> Self {
    Self {
      app_name: "IT Helpdesk".into(),
      version:  env!("CARGO_PKG_VERSION").into(),
    }
  }
}

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S> {
  pub store:    S,
  pub workflow: Arc<Workflow<S>>,
  pub auth:     Arc<AuthConfig>,
  pub info:     Arc<AppInfo>,
}

impl<S: HelpdeskStore + Clone> AppState<S> {
  pub fn new(
    store: S,
    index: Arc<KnowledgeIndex>,
    policy: RoutingPolicy,
    auth: AuthConfig,
    info: AppInfo,
  ) -> Self {
    let workflow = Workflow::new(store.clone(), index, policy);
    Self {
      store,
      workflow: Arc::new(workflow),
      auth: Arc::new(auth),
      info: Arc::new(info),
    }
  }

  pub fn index(&self) -> &Arc<KnowledgeIndex> { self.workflow.index() }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The `/api` routes, still awaiting their state.
pub fn api_routes<S>() -> Router<AppState<S>>
where
  S: HelpdeskStore + Clone + 'static,
{
  Router::new()
    // Auth
    .route("/auth/register", post(auth::register::<S>))
    .route("/auth/login", post(auth::login::<S>))
    .route("/auth/me", get(auth::me))
    // Workflow
    .route("/workflow/process", post(workflow::process::<S>))
    // Tickets
    .route("/tickets", get(tickets::list::<S>))
    .route(
      "/tickets/{ticket_id}",
      get(tickets::get_one::<S>).patch(tickets::update::<S>),
    )
    .route("/tickets/{ticket_id}/logs", get(tickets::logs::<S>))
    // Analytics
    .route("/analytics/dashboard", get(analytics::dashboard::<S>))
    .route("/analytics/daily", get(analytics::daily::<S>))
    .route("/analytics/rollup", post(analytics::rollup::<S>))
    // Knowledge
    .route(
      "/knowledge",
      get(knowledge::list::<S>).post(knowledge::create::<S>),
    )
    .route("/knowledge/search", get(knowledge::search::<S>))
}

/// Build the complete application: `/health`, `/openapi.json`, and the API
/// under `/api`, with request tracing.
pub fn app<S>(state: AppState<S>) -> Router
where
  S: HelpdeskStore + Clone + 'static,
{
  Router::new()
    .route("/health", get(health::handler::<S>))
    .route("/openapi.json", get(openapi::handler::<S>))
    .nest("/api", api_routes::<S>())
    .with_state(state)
    .layer(TraceLayer::new_for_http())
}
