use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// On-disk configuration overlay.
///
/// Every field is optional; present fields override whatever the environment
/// resolved to.
///
/// ```json
/// {
///   "orchestration_base": "http://orchestrator.internal:8700",
///   "request_timeout_ms": 30000
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub worldcore_base: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub narrative_base: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub screenplay_base: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub media_base: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub interact_base: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub orchestration_base: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub proofs_count_path: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub request_timeout_ms: Option<u64>,
}

impl ConfigFile {
  /// Read a JSON config file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
  }
}
