//! A hand-maintained OpenAPI 3.0 description of the API.

use axum::{Json, extract::State};
use helpdesk_core::store::HelpdeskStore;
use serde_json::{Map, Value, json};

use crate::AppState;

pub(crate) struct Operation {
  pub(crate) method:  &'static str,
  pub(crate) path:    &'static str,
  pub(crate) summary: &'static str,
  pub(crate) tag:     &'static str,
  pub(crate) secured: bool,
}

/// Every routed operation. Kept in step with [`crate::app`].
pub(crate) const OPERATIONS: &[Operation] = &[
  op("post", "/api/auth/register", "Register an account", "auth", false),
  op("post", "/api/auth/login", "Exchange credentials for a bearer token", "auth", false),
  op("get", "/api/auth/me", "The authenticated account", "auth", true),
  op("post", "/api/workflow/process", "Submit an issue for automated handling", "workflow", false),
  op("get", "/api/tickets", "List tickets", "tickets", true),
  op("get", "/api/tickets/{ticket_id}", "Fetch one ticket", "tickets", true),
  op("patch", "/api/tickets/{ticket_id}", "Update a ticket (staff)", "tickets", true),
  op("get", "/api/tickets/{ticket_id}/logs", "Audit trail of a ticket", "tickets", true),
  op("get", "/api/analytics/dashboard", "Live dashboard metrics (staff)", "analytics", true),
  op("get", "/api/analytics/daily", "Stored daily rollups (staff)", "analytics", true),
  op("post", "/api/analytics/rollup", "Recompute a daily rollup (admin)", "analytics", true),
  op("get", "/api/knowledge", "List knowledge-base entries", "knowledge", false),
  op("post", "/api/knowledge", "Add a knowledge-base entry (admin)", "knowledge", true),
  op("get", "/api/knowledge/search", "Semantic search over the knowledge base", "knowledge", false),
  op("get", "/health", "Liveness check", "system", false),
];

const fn op(
  method: &'static str,
  path: &'static str,
  summary: &'static str,
  tag: &'static str,
  secured: bool,
) -> Operation {
  Operation { method, path, summary, tag, secured }
}

fn path_parameters(path: &str) -> Vec<Value> {
  path
    .split('/')
    .filter_map(|seg| seg.strip_prefix('{')?.strip_suffix('}'))
    .map(|name| {
      json!({
        "name": name,
        "in": "path",
        "required": true,
        "schema": { "type": "string" },
      })
    })
    .collect()
}

/// Build the document for a given title and version.
pub fn document(title: &str, version: &str) -> Value {
  let mut paths = Map::new();
  for o in OPERATIONS {
    let mut operation = json!({
      "summary": o.summary,
      "tags": [o.tag],
      "responses": {
        "200": { "description": "Success" },
        "default": {
          "description": "Error",
          "content": { "application/json": { "schema": {
            "$ref": "#/components/schemas/Error"
          }}},
        },
      },
    });
    let params = path_parameters(o.path);
    if !params.is_empty() {
      operation["parameters"] = Value::Array(params);
    }
    if o.secured {
      operation["security"] = json!([{ "bearerAuth": [] }]);
    }

    let entry = paths
      .entry(o.path.to_owned())
      .or_insert_with(|| Value::Object(Map::new()));
    entry[o.method] = operation;
  }

  json!({
    "openapi": "3.0.3",
    "info": { "title": title, "version": version },
    "paths": paths,
    "components": {
      "securitySchemes": {
        "bearerAuth": { "type": "http", "scheme": "bearer", "bearerFormat": "JWT" },
      },
      "schemas": {
        "Error": {
          "type": "object",
          "properties": { "error": { "type": "string" } },
          "required": ["error"],
        },
      },
    },
  })
}

/// `GET /openapi.json`
pub async fn handler<S>(State(state): State<AppState<S>>) -> Json<Value>
where
  S: HelpdeskStore + Clone + 'static,
{
  Json(document(&state.info.app_name, &state.info.version))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_operation_is_listed() {
    let doc = document("Helpdesk", "1.2.3");
    assert_eq!(doc["info"]["version"], "1.2.3");
    for o in OPERATIONS {
      assert!(
        doc["paths"][o.path][o.method].is_object(),
        "{} {} missing",
        o.method,
        o.path
      );
    }
  }

  #[test]
  fn path_parameters_are_declared() {
    let doc = document("Helpdesk", "1");
    let params = &doc["paths"]["/api/tickets/{ticket_id}"]["patch"]["parameters"];
    assert_eq!(params[0]["name"], "ticket_id");
    assert_eq!(
      doc["paths"]["/api/tickets/{ticket_id}"]["patch"]["security"][0]["bearerAuth"],
      json!([])
    );
    assert!(doc["paths"]["/health"]["get"].get("security").is_none());
  }
}
