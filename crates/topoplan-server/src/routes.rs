//! HTTP handlers for the planning service.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use topoplan_model::{PlanError, PlanRequest};
use tracing::{error, info, warn};

use crate::AppContext;

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `POST /generate_topology`
///
/// A well-formed request always answers 200 with either a success or an
/// error record; transport-level codes are reserved for bodies that do not
/// parse as a request at all. Successful plans are archived to the results
/// directory, best-effort.
pub async fn generate_topology(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<PlanRequest>,
) -> Json<Value> {
    let node_count = request.nodes.len();
    info!(nodes = node_count, edges = request.edges.len(), "planning request received");

    match topoplan_planner::plan_request(request) {
        Ok(plan) => {
            let body = json!({
                "status": "success",
                "data": plan,
            });
            archive(&ctx, node_count, &body);
            Json(body)
        }
        Err(err) => {
            warn!(kind = err.kind(), "planning failed: {err}");
            Json(error_record(&err))
        }
    }
}

/// The wire error record: `{ status, kind, message, details }`.
fn error_record(err: &PlanError) -> Value {
    json!({
        "status": "error",
        "kind": err.kind(),
        "message": err.to_string(),
        "details": err.details(),
    })
}

fn archive(ctx: &AppContext, node_count: usize, body: &Value) {
    let rendered = body.to_string();
    match crate::persist::save_plan_result(&ctx.results_dir, node_count, &rendered) {
        Ok(path) => info!("archived plan to {}", path.display()),
        Err(err) => error!("failed to archive plan: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_record_shape() {
        let err = PlanError::TopologyUnreachable {
            unreachable: vec!["B".to_string()],
            attached: 1,
        };
        let record = error_record(&err);
        assert_eq!(record["status"], "error");
        assert_eq!(record["kind"], "TopologyUnreachable");
        assert_eq!(record["details"]["unreachable"], json!(["B"]));
        assert!(record["message"].as_str().unwrap().contains("B"));
    }
}
