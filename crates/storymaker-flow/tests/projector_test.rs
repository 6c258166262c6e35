//! Tests for projecting orchestration responses into dashboard views.

use pretty_assertions::assert_eq;
use serde_json::json;
use storymaker_flow::{
  CANONICAL_EDGES, FormatError, GateDecision, NodeStatus, OutcomeStatus, RunFailure, RunResult,
  project, project_diagram, project_gate_decision, project_node_statuses, project_value,
};

fn run_with_nodes(nodes: serde_json::Value) -> RunResult {
  RunResult::from_value(json!({
    "status": "ok",
    "data": { "state": { "inputs": { "premise": "A heist" }, "nodes": nodes, "outputs": {} } }
  }))
  .expect("valid run response")
}

const EDGE_LINES: &str = "  narrative_outline --> qa_trope_budget
  narrative_outline --> qa_promise_payoff
  qa_trope_budget --> decide_gate
  qa_promise_payoff --> decide_gate
  decide_gate --> approve_canon";

#[test]
fn test_empty_outcomes_project_to_empty_statuses() {
  let result = run_with_nodes(json!({}));

  assert!(project_node_statuses(&result).is_empty());
}

#[test]
fn test_empty_outcomes_diagram_has_only_fixed_edges() {
  let result = run_with_nodes(json!({}));

  let diagram = project_diagram(&result);
  assert!(diagram.nodes.is_empty());
  assert_eq!(diagram.edges.len(), CANONICAL_EDGES.len());
  assert_eq!(diagram.to_mermaid(), format!("graph TD\n{}", EDGE_LINES));
}

#[test]
fn test_statuses_preserve_source_order() {
  let result = run_with_nodes(json!({
    "c": { "status": "ok" },
    "a": { "status": "error" },
    "b": { "status": "ok" }
  }));

  let statuses = project_node_statuses(&result);
  assert_eq!(
    statuses,
    vec![
      NodeStatus {
        node_id: "c".to_string(),
        status: OutcomeStatus::Ok
      },
      NodeStatus {
        node_id: "a".to_string(),
        status: OutcomeStatus::Error
      },
      NodeStatus {
        node_id: "b".to_string(),
        status: OutcomeStatus::Ok
      },
    ]
  );
}

#[test]
fn test_diagram_is_deterministic() {
  let result = run_with_nodes(json!({
    "narrative_outline": { "status": "ok" },
    "qa_trope_budget": { "status": "error" }
  }));

  let first = project_diagram(&result).to_mermaid();
  let second = project_diagram(&result).to_mermaid();
  assert_eq!(first, second);
}

#[test]
fn test_diagram_renders_node_lines_before_edges() {
  let result = run_with_nodes(json!({
    "narrative_outline": { "status": "ok" },
    "qa_trope_budget": { "status": "error" }
  }));

  let expected = format!(
    "graph TD\n  narrative_outline[\"✅ narrative_outline\"]\n  qa_trope_budget[\"❌ qa_trope_budget\"]\n{}",
    EDGE_LINES
  );
  assert_eq!(project_diagram(&result).to_string(), expected);
}

#[test]
fn test_diagram_edges_ignore_actual_topology() {
  let result = run_with_nodes(json!({
    "something_else": { "status": "ok" }
  }));

  let diagram = project_diagram(&result);
  let edges: Vec<(&str, &str)> = diagram
    .edges
    .iter()
    .map(|(from, to)| (from.as_str(), to.as_str()))
    .collect();
  assert_eq!(edges, CANONICAL_EDGES.to_vec());
}

#[test]
fn test_gate_approved_when_cond_true() {
  let result = run_with_nodes(json!({
    "decide_gate": { "status": "ok", "data": { "cond": true } }
  }));

  assert_eq!(
    project_gate_decision(&result),
    GateDecision::Decided { approved: true }
  );
}

#[test]
fn test_gate_rejected_when_cond_false() {
  let result = run_with_nodes(json!({
    "decide_gate": { "status": "ok", "data": { "cond": false } }
  }));

  assert_eq!(
    project_gate_decision(&result),
    GateDecision::Decided { approved: false }
  );
}

#[test]
fn test_gate_rejected_when_cond_absent() {
  let result = run_with_nodes(json!({
    "decide_gate": { "status": "ok", "data": {} }
  }));
  assert_eq!(
    project_gate_decision(&result),
    GateDecision::Decided { approved: false }
  );

  let result = run_with_nodes(json!({ "decide_gate": { "status": "ok" } }));
  assert_eq!(
    project_gate_decision(&result),
    GateDecision::Decided { approved: false }
  );
}

#[test]
fn test_gate_coerces_truthy_cond() {
  let result = run_with_nodes(json!({
    "decide_gate": { "status": "ok", "data": { "cond": "yes" } }
  }));

  assert_eq!(project_gate_decision(&result).approved(), Some(true));
}

#[test]
fn test_gate_unknown_without_gate_node() {
  let result = run_with_nodes(json!({
    "narrative_outline": { "status": "ok" }
  }));

  let decision = project_gate_decision(&result);
  assert_eq!(decision, GateDecision::Unknown);
  assert_eq!(decision.approved(), None);
  assert_eq!(serde_json::to_value(decision).unwrap(), json!({ "unknown": true }));
}

#[test]
fn test_story_flow_scenario() {
  let projection = project_value(json!({
    "status": "ok",
    "data": { "state": { "nodes": {
      "narrative_outline": { "status": "ok" },
      "decide_gate": { "status": "ok", "data": { "cond": true } }
    } } }
  }))
  .unwrap();

  assert_eq!(projection.gate_decision, GateDecision::Decided { approved: true });
  assert!(projection.diagram_text.contains("✅ narrative_outline"));
  assert!(projection.diagram_text.contains("✅ decide_gate"));
  assert_eq!(
    serde_json::to_value(&projection).unwrap()["gate_decision"],
    json!({ "approved": true })
  );
}

#[test]
fn test_string_nodes_are_format_error() {
  let result = RunResult::from_value(json!({
    "status": "ok",
    "data": { "state": { "nodes": "narrative_outline,decide_gate" } }
  }));

  assert_eq!(result, Err(FormatError::NodesNotMapping { found: "string" }));
}

#[test]
fn test_array_nodes_are_format_error_not_partial() {
  let result = project_value(json!({
    "status": "ok",
    "data": { "state": { "nodes": [ { "status": "ok" } ] } }
  }));

  assert!(matches!(
    result,
    Err(FormatError::NodesNotMapping { found: "array" })
  ));
}

#[test]
fn test_projection_does_not_mutate_result() {
  let result = run_with_nodes(json!({
    "narrative_outline": { "status": "ok", "data": { "title": "Heist" } },
    "decide_gate": { "status": "ok", "data": { "cond": 1 } }
  }));
  let before = result.clone();

  let _ = project(&result);

  assert_eq!(result, before);
}

#[test]
fn test_null_state_degrades_to_empty_run() {
  let projection = project_value(json!({
    "status": "ok",
    "data": { "state": null }
  }))
  .unwrap();

  assert!(projection.node_statuses.is_empty());
  assert_eq!(projection.gate_decision, GateDecision::Unknown);
  assert_eq!(projection.diagram_text, format!("graph TD\n{}", EDGE_LINES));
}

#[test]
fn test_string_error_becomes_run_failure() {
  let result = RunResult::from_value(json!({
    "status": "error",
    "data": null,
    "error": "graph crashed"
  }))
  .unwrap();

  assert!(!result.is_ok());
  assert_eq!(
    result.failure,
    Some(RunFailure {
      code: None,
      message: "graph crashed".to_string(),
    })
  );
}

#[test]
fn test_null_error_message_degrades_to_empty() {
  let result = RunResult::from_value(json!({
    "status": "error",
    "error": { "code": "x", "message": null }
  }))
  .unwrap();

  assert_eq!(
    result.failure,
    Some(RunFailure {
      code: Some("x".to_string()),
      message: String::new(),
    })
  );
  assert!(project(&result).node_statuses.is_empty());
}
