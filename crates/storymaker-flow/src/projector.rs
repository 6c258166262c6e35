//! Orchestration state projector.
//!
//! Pure functions from a [`RunResult`] to the views the studio renders. None
//! of them perform I/O or mutate the result.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::FormatError;
use crate::result::{OutcomeStatus, RunResult, nodes};
use crate::truthy::is_truthy;

pub const OK_GLYPH: &str = "✅";
pub const FAIL_GLYPH: &str = "❌";

/// Edges of the canonical story flow.
///
/// The diagram always draws this shape, whatever topology the orchestration
/// service actually ran.
pub const CANONICAL_EDGES: [(&str, &str); 5] = [
  (nodes::NARRATIVE_OUTLINE, nodes::QA_TROPE_BUDGET),
  (nodes::NARRATIVE_OUTLINE, nodes::QA_PROMISE_PAYOFF),
  (nodes::QA_TROPE_BUDGET, nodes::DECIDE_GATE),
  (nodes::QA_PROMISE_PAYOFF, nodes::DECIDE_GATE),
  (nodes::DECIDE_GATE, nodes::APPROVE_CANON),
];

/// Status of one node, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeStatus {
  pub node_id: String,
  pub status: OutcomeStatus,
}

/// Approval derived from the `decide_gate` node.
///
/// `Unknown` means the run had no gate node; it is not a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
  Unknown,
  Decided { approved: bool },
}

impl GateDecision {
  /// `Some(approved)` when decided, `None` when unknown.
  pub fn approved(&self) -> Option<bool> {
    match self {
      GateDecision::Unknown => None,
      GateDecision::Decided { approved } => Some(*approved),
    }
  }
}

// Serialized as `{"approved": bool}` or `{"unknown": true}`.
impl Serialize for GateDecision {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(1))?;
    match self {
      GateDecision::Unknown => map.serialize_entry("unknown", &true)?,
      GateDecision::Decided { approved } => map.serialize_entry("approved", approved)?,
    }
    map.end()
  }
}

/// A node line of the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramNode {
  pub node_id: String,
  pub status: OutcomeStatus,
}

impl DiagramNode {
  /// `"<glyph> <node_id>"`.
  pub fn label(&self) -> String {
    let glyph = if self.status.is_ok() {
      OK_GLYPH
    } else {
      FAIL_GLYPH
    };
    format!("{} {}", glyph, self.node_id)
  }
}

/// Node lines followed by the canonical edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramDescription {
  pub nodes: Vec<DiagramNode>,
  pub edges: Vec<(String, String)>,
}

impl DiagramDescription {
  /// Render as a Mermaid `graph TD` document.
  pub fn to_mermaid(&self) -> String {
    let mut lines = Vec::with_capacity(1 + self.nodes.len() + self.edges.len());
    lines.push("graph TD".to_string());

    for node in &self.nodes {
      lines.push(format!(
        "  {}[\"{}\"]",
        node.node_id,
        node.label().replace('"', "#quot;")
      ));
    }

    for (from, to) in &self.edges {
      lines.push(format!("  {} --> {}", from, to));
    }

    lines.join("\n")
  }
}

impl std::fmt::Display for DiagramDescription {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.to_mermaid())
  }
}

/// Everything the view layer needs to render one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
  pub node_statuses: Vec<NodeStatus>,
  pub diagram_text: String,
  pub gate_decision: GateDecision,
}

/// Node statuses in the order the service returned them.
pub fn project_node_statuses(result: &RunResult) -> Vec<NodeStatus> {
  result
    .node_outcomes
    .values()
    .map(|outcome| NodeStatus {
      node_id: outcome.node_id.clone(),
      status: outcome.status,
    })
    .collect()
}

/// One line per node, then the fixed canonical edges.
pub fn project_diagram(result: &RunResult) -> DiagramDescription {
  let nodes = result
    .node_outcomes
    .values()
    .map(|outcome| DiagramNode {
      node_id: outcome.node_id.clone(),
      status: outcome.status,
    })
    .collect();

  let edges = CANONICAL_EDGES
    .iter()
    .map(|(from, to)| (from.to_string(), to.to_string()))
    .collect();

  DiagramDescription { nodes, edges }
}

/// Read `payload.cond` of the `decide_gate` node.
pub fn project_gate_decision(result: &RunResult) -> GateDecision {
  let Some(gate) = result.gate() else {
    return GateDecision::Unknown;
  };

  let approved = gate
    .payload
    .as_ref()
    .and_then(|payload| payload.get("cond"))
    .is_some_and(is_truthy);

  GateDecision::Decided { approved }
}

/// Project a run result into statuses, diagram text and gate decision.
pub fn project(result: &RunResult) -> Projection {
  let node_statuses = project_node_statuses(result);
  let diagram_text = project_diagram(result).to_mermaid();
  let gate_decision = project_gate_decision(result);

  debug!(
    nodes = node_statuses.len(),
    gate = ?gate_decision,
    "projected run result"
  );

  Projection {
    node_statuses,
    diagram_text,
    gate_decision,
  }
}

/// Parse a raw orchestration response and project it.
pub fn project_value(value: serde_json::Value) -> Result<Projection, FormatError> {
  let result = RunResult::from_value(value)?;
  Ok(project(&result))
}
