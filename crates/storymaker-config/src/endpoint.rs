use serde::{Serialize, Serializer};
use url::Url;

use crate::error::ConfigError;

/// A validated service base URL.
///
/// The base is stored without a trailing slash so that request paths can be
/// appended verbatim: `http://host:8000` + `/api/qa/trope-budget`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
  base: String,
}

impl ServiceEndpoint {
  /// Parse and validate a base URL. Only `http` and `https` are accepted.
  pub fn parse(service: &str, value: &str) -> Result<Self, ConfigError> {
    let trimmed = value.trim();
    let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
      service: service.to_string(),
      value: value.to_string(),
      message: e.to_string(),
    })?;

    match url.scheme() {
      "http" | "https" => {}
      other => {
        return Err(ConfigError::UnsupportedScheme {
          service: service.to_string(),
          scheme: other.to_string(),
        });
      }
    }

    Ok(Self {
      base: url.as_str().trim_end_matches('/').to_string(),
    })
  }

  /// Build an endpoint from one of the built-in defaults.
  pub(crate) fn from_default(base: &'static str) -> Self {
    Self {
      base: base.to_string(),
    }
  }

  /// The base URL without a trailing slash.
  pub fn as_str(&self) -> &str {
    &self.base
  }

  /// Append a path to the base. A missing leading slash is added.
  pub fn join(&self, path: &str) -> String {
    if path.starts_with('/') {
      format!("{}{}", self.base, path)
    } else {
      format!("{}/{}", self.base, path)
    }
  }
}

impl std::fmt::Display for ServiceEndpoint {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.base)
  }
}

impl Serialize for ServiceEndpoint {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.base)
  }
}
