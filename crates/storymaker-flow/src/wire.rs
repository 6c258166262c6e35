//! Wire types for the service envelopes.

use serde::{Deserialize, Deserializer, Serialize};

/// Envelope status shared by every StoryMaker service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeStatus {
  Ok,
  Error,
}

/// Error block of an envelope.
///
/// Services send either `{code, message, details}` or a bare string. Fields
/// that are absent, null or of another type degrade to empty values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvelopeError {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub code: Option<String>,
  pub message: String,
  #[serde(skip_serializing_if = "serde_json::Value::is_null")]
  pub details: serde_json::Value,
}

impl EnvelopeError {
  /// Read an error block from any JSON value. `null` means no error.
  pub fn from_value(value: serde_json::Value) -> Option<Self> {
    match value {
      serde_json::Value::Null => None,
      serde_json::Value::String(message) => Some(Self {
        code: None,
        message,
        details: serde_json::Value::Null,
      }),
      serde_json::Value::Object(obj) => Some(Self {
        code: obj.get("code").and_then(scalar_text),
        message: obj.get("message").and_then(scalar_text).unwrap_or_default(),
        details: obj.get("details").cloned().unwrap_or_default(),
      }),
      other => Some(Self {
        code: None,
        message: other.to_string(),
        details: serde_json::Value::Null,
      }),
    }
  }
}

fn scalar_text(value: &serde_json::Value) -> Option<String> {
  match value {
    serde_json::Value::String(s) => Some(s.clone()),
    serde_json::Value::Number(n) => Some(n.to_string()),
    serde_json::Value::Bool(b) => Some(b.to_string()),
    _ => None,
  }
}

impl<'de> Deserialize<'de> for EnvelopeError {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(Self::from_value(value).unwrap_or(Self {
      code: None,
      message: String::new(),
      details: serde_json::Value::Null,
    }))
  }
}

/// Deserialize `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response wrapper `{status, data, error, meta}`.
///
/// The services fill these fields inconsistently, so everything except
/// `status` is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
  pub status: EnvelopeStatus,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data: Option<T>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<EnvelopeError>,
  #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
  pub meta: serde_json::Value,
}

impl<T> Envelope<T> {
  pub fn is_ok(&self) -> bool {
    self.status == EnvelopeStatus::Ok
  }
}

/// Body of `POST {orchestration}/run`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRunRequest {
  pub premise: String,
}

/// Execution state as reported by the orchestration service.
///
/// `nodes` is kept as a raw value: its shape is validated when the response
/// is turned into a `RunResult`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowState {
  #[serde(default)]
  pub inputs: serde_json::Value,
  #[serde(default)]
  pub nodes: serde_json::Value,
  #[serde(default)]
  pub outputs: serde_json::Value,
}

/// `data` block of a run response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowRunData {
  #[serde(default, deserialize_with = "null_as_default")]
  pub state: FlowState,
  #[serde(default)]
  pub outputs: serde_json::Value,
}

/// Response of `POST {orchestration}/run`.
pub type FlowRunResponse = Envelope<FlowRunData>;
