//! Run result types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{FormatError, json_kind};
use crate::wire::{EnvelopeStatus, FlowRunResponse};

/// Node ids of the canonical story flow.
pub mod nodes {
  pub const NARRATIVE_OUTLINE: &str = "narrative_outline";
  pub const QA_TROPE_BUDGET: &str = "qa_trope_budget";
  pub const QA_PROMISE_PAYOFF: &str = "qa_promise_payoff";
  pub const DECIDE_GATE: &str = "decide_gate";
  pub const APPROVE_CANON: &str = "approve_canon";
}

/// Outcome status of a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
  Ok,
  Error,
}

impl OutcomeStatus {
  pub fn is_ok(&self) -> bool {
    matches!(self, OutcomeStatus::Ok)
  }
}

/// Result of executing one named step of the remote flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeOutcome {
  /// Node ID, matches the key in `RunResult::node_outcomes`.
  pub node_id: String,
  /// `Ok` only when the node envelope reported `"status": "ok"`.
  pub status: OutcomeStatus,
  /// The node envelope's `data`, opaque to the projector.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub payload: Option<serde_json::Value>,
  /// Error message reported by the node, if any.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl NodeOutcome {
  fn from_value(node_id: &str, value: &serde_json::Value) -> Result<Self, FormatError> {
    let entry = match value {
      serde_json::Value::Object(entry) => entry,
      serde_json::Value::Null => {
        return Ok(Self {
          node_id: node_id.to_string(),
          status: OutcomeStatus::Error,
          payload: None,
          error: None,
        });
      }
      other => {
        return Err(FormatError::InvalidOutcome {
          node_id: node_id.to_string(),
          found: json_kind(other),
        });
      }
    };

    let status = match entry.get("status").and_then(|s| s.as_str()) {
      Some("ok") => OutcomeStatus::Ok,
      _ => OutcomeStatus::Error,
    };

    let payload = entry.get("data").filter(|d| !d.is_null()).cloned();

    let error = entry.get("error").and_then(|e| match e {
      serde_json::Value::String(message) => Some(message.clone()),
      serde_json::Value::Object(obj) => obj
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string),
      _ => None,
    });

    Ok(Self {
      node_id: node_id.to_string(),
      status,
      payload,
      error,
    })
  }
}

/// Failure reported by the orchestration envelope itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunFailure {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub code: Option<String>,
  pub message: String,
}

/// Envelope metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMeta {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ts: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub actor: Option<String>,
}

/// Result of one orchestration flow execution.
///
/// A `RunResult` is read-only once parsed; projections borrow it and never
/// change it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
  pub status: EnvelopeStatus,
  /// Inputs echoed back by the service.
  #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
  pub inputs: serde_json::Value,
  /// Node outcomes in execution order.
  pub node_outcomes: IndexMap<String, NodeOutcome>,
  /// Outputs produced after all nodes completed.
  pub final_outputs: serde_json::Map<String, serde_json::Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub failure: Option<RunFailure>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub meta: Option<RunMeta>,
}

impl RunResult {
  /// Parse a raw JSON response.
  pub fn from_value(value: serde_json::Value) -> Result<Self, FormatError> {
    let response: FlowRunResponse =
      serde_json::from_value(value).map_err(|e| FormatError::Envelope {
        message: e.to_string(),
      })?;
    Self::from_response(response)
  }

  /// Parse a raw JSON response body.
  pub fn from_json(body: &str) -> Result<Self, FormatError> {
    let value: serde_json::Value =
      serde_json::from_str(body).map_err(|e| FormatError::Envelope {
        message: e.to_string(),
      })?;
    Self::from_value(value)
  }

  /// Convert a decoded envelope, validating the node outcome mapping.
  pub fn from_response(response: FlowRunResponse) -> Result<Self, FormatError> {
    let data = response.data.unwrap_or_default();

    let node_outcomes = match &data.state.nodes {
      serde_json::Value::Null => IndexMap::new(),
      serde_json::Value::Object(nodes) => nodes
        .iter()
        .map(|(id, value)| Ok((id.clone(), NodeOutcome::from_value(id, value)?)))
        .collect::<Result<IndexMap<_, _>, FormatError>>()?,
      other => {
        return Err(FormatError::NodesNotMapping {
          found: json_kind(other),
        });
      }
    };

    let mut final_outputs = match data.state.outputs {
      serde_json::Value::Object(outputs) => outputs,
      _ => serde_json::Map::new(),
    };
    if let serde_json::Value::Object(outputs) = data.outputs {
      for (key, value) in outputs {
        final_outputs.entry(key).or_insert(value);
      }
    }

    let failure = response.error.map(|e| RunFailure {
      code: e.code,
      message: e.message,
    });

    let meta = match response.meta {
      serde_json::Value::Object(meta) => Some(RunMeta {
        ts: meta.get("ts").and_then(|v| v.as_str()).map(str::to_string),
        actor: meta.get("actor").and_then(|v| v.as_str()).map(str::to_string),
      }),
      _ => None,
    };

    Ok(Self {
      status: response.status,
      inputs: data.state.inputs,
      node_outcomes,
      final_outputs,
      failure,
      meta,
    })
  }

  /// Get a node outcome by ID.
  pub fn node(&self, node_id: &str) -> Option<&NodeOutcome> {
    self.node_outcomes.get(node_id)
  }

  pub fn outline(&self) -> Option<&NodeOutcome> {
    self.node(nodes::NARRATIVE_OUTLINE)
  }

  pub fn trope_budget(&self) -> Option<&NodeOutcome> {
    self.node(nodes::QA_TROPE_BUDGET)
  }

  pub fn promise_payoff(&self) -> Option<&NodeOutcome> {
    self.node(nodes::QA_PROMISE_PAYOFF)
  }

  pub fn gate(&self) -> Option<&NodeOutcome> {
    self.node(nodes::DECIDE_GATE)
  }

  /// The `approved` final output, when the flow produced a boolean one.
  pub fn approved_output(&self) -> Option<bool> {
    self.final_outputs.get("approved").and_then(|v| v.as_bool())
  }

  pub fn is_ok(&self) -> bool {
    self.status == EnvelopeStatus::Ok
  }
}
