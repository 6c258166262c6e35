//! Error types for run result parsing.

use thiserror::Error;

/// The orchestration response does not have the expected shape.
///
/// Missing optional fields are not errors; they degrade to empty or unknown
/// values. Only a node mapping that is present but unusable is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
  /// The response is not a run envelope at all.
  #[error("malformed run envelope: {message}")]
  Envelope { message: String },

  /// `data.state.nodes` is present but is not a key-to-outcome mapping.
  #[error("node outcomes must be a mapping, found {found}")]
  NodesNotMapping { found: &'static str },

  /// A node outcome is neither an object nor null.
  #[error("outcome for node '{node_id}' must be an object, found {found}")]
  InvalidOutcome { node_id: String, found: &'static str },
}

/// Name of the JSON type of a value, for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
  match value {
    serde_json::Value::Null => "null",
    serde_json::Value::Bool(_) => "boolean",
    serde_json::Value::Number(_) => "number",
    serde_json::Value::String(_) => "string",
    serde_json::Value::Array(_) => "array",
    serde_json::Value::Object(_) => "object",
  }
}
