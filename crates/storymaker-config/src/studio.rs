use std::collections::HashMap;
use std::ffi::OsString;

use serde::Serialize;

use crate::endpoint::ServiceEndpoint;
use crate::error::ConfigError;
use crate::file::ConfigFile;
use crate::service::Service;

/// Environment variable for the proofs counter path on worldcore.
pub const PROOFS_COUNT_PATH_VAR: &str = "PROOFS_COUNT_PATH";

/// Environment variable for the per-request timeout in milliseconds.
pub const TIMEOUT_VAR: &str = "STORYMAKER_TIMEOUT_MS";

pub const DEFAULT_PROOFS_COUNT_PATH: &str = "/api/proofs/count";

/// Resolved endpoints for every service the studio talks to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudioConfig {
  pub worldcore: ServiceEndpoint,
  pub narrative: ServiceEndpoint,
  pub screenplay: ServiceEndpoint,
  pub media: ServiceEndpoint,
  pub interact: ServiceEndpoint,
  pub orchestration: ServiceEndpoint,
  /// Path of the proofs counter, relative to the worldcore base.
  pub proofs_count_path: String,
  /// Per-request timeout. `None` leaves the transport default in place.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub request_timeout_ms: Option<u64>,
}

/// A configuration together with the variables that fell back to defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
  pub config: StudioConfig,
  /// Variables that were not set and used their default value.
  pub missing: Vec<&'static str>,
}

impl StudioConfig {
  /// Resolve the configuration from an environment-like key/value source.
  ///
  /// Absent or blank variables use the service default and are reported in
  /// [`ResolvedConfig::missing`].
  pub fn from_vars<I>(vars: I) -> Result<ResolvedConfig, ConfigError>
  where
    I: IntoIterator<Item = (String, String)>,
  {
    let vars: HashMap<String, String> = vars
      .into_iter()
      .filter(|(_, v)| !v.trim().is_empty())
      .collect();

    let mut missing = Vec::new();
    let mut endpoint = |service: Service| -> Result<ServiceEndpoint, ConfigError> {
      match vars.get(service.env_var()) {
        Some(value) => ServiceEndpoint::parse(service.name(), value),
        None => {
          missing.push(service.env_var());
          ServiceEndpoint::parse(service.name(), service.default_base())
        }
      }
    };

    let worldcore = endpoint(Service::Worldcore)?;
    let narrative = endpoint(Service::Narrative)?;
    let screenplay = endpoint(Service::Screenplay)?;
    let media = endpoint(Service::Media)?;
    let interact = endpoint(Service::Interact)?;
    let orchestration = endpoint(Service::Orchestration)?;

    let proofs_count_path = match vars.get(PROOFS_COUNT_PATH_VAR) {
      Some(path) => path.trim().to_string(),
      None => {
        missing.push(PROOFS_COUNT_PATH_VAR);
        DEFAULT_PROOFS_COUNT_PATH.to_string()
      }
    };

    let request_timeout_ms = vars
      .get(TIMEOUT_VAR)
      .map(|raw| parse_timeout(TIMEOUT_VAR, raw))
      .transpose()?;

    Ok(ResolvedConfig {
      config: StudioConfig {
        worldcore,
        narrative,
        screenplay,
        media,
        interact,
        orchestration,
        proofs_count_path,
        request_timeout_ms,
      },
      missing,
    })
  }

  /// Resolve the configuration from the process environment.
  pub fn from_env() -> Result<ResolvedConfig, ConfigError> {
    Self::from_os_vars(std::env::vars_os())
  }

  /// Like [`StudioConfig::from_vars`], for raw OS strings.
  ///
  /// Pairs that are not valid UTF-8 are skipped unless they name one of the
  /// studio variables, which is a [`ConfigError::InvalidValue`].
  pub fn from_os_vars<I>(vars: I) -> Result<ResolvedConfig, ConfigError>
  where
    I: IntoIterator<Item = (OsString, OsString)>,
  {
    let mut utf8 = Vec::new();
    for (key, value) in vars {
      let Ok(key) = key.into_string() else {
        continue;
      };
      match value.into_string() {
        Ok(value) => utf8.push((key, value)),
        Err(raw) if is_studio_var(&key) => {
          return Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string_lossy().into_owned(),
          });
        }
        Err(_) => {}
      }
    }
    Self::from_vars(utf8)
  }

  /// Overlay a config file on top of this configuration.
  pub fn apply_file(&mut self, file: ConfigFile) -> Result<(), ConfigError> {
    let overrides = [
      (Service::Worldcore, file.worldcore_base),
      (Service::Narrative, file.narrative_base),
      (Service::Screenplay, file.screenplay_base),
      (Service::Media, file.media_base),
      (Service::Interact, file.interact_base),
      (Service::Orchestration, file.orchestration_base),
    ];

    for (service, value) in overrides {
      if let Some(value) = value {
        *self.endpoint_mut(service) = ServiceEndpoint::parse(service.name(), &value)?;
      }
    }

    if let Some(path) = file.proofs_count_path {
      self.proofs_count_path = path;
    }
    if file.request_timeout_ms.is_some() {
      self.request_timeout_ms = file.request_timeout_ms;
    }

    Ok(())
  }

  /// Get the endpoint of a service.
  pub fn endpoint(&self, service: Service) -> &ServiceEndpoint {
    match service {
      Service::Worldcore => &self.worldcore,
      Service::Narrative => &self.narrative,
      Service::Screenplay => &self.screenplay,
      Service::Media => &self.media,
      Service::Interact => &self.interact,
      Service::Orchestration => &self.orchestration,
    }
  }

  fn endpoint_mut(&mut self, service: Service) -> &mut ServiceEndpoint {
    match service {
      Service::Worldcore => &mut self.worldcore,
      Service::Narrative => &mut self.narrative,
      Service::Screenplay => &mut self.screenplay,
      Service::Media => &mut self.media,
      Service::Interact => &mut self.interact,
      Service::Orchestration => &mut self.orchestration,
    }
  }
}

impl Default for StudioConfig {
  fn default() -> Self {
    let endpoint = |service: Service| ServiceEndpoint::from_default(service.default_base());
    Self {
      worldcore: endpoint(Service::Worldcore),
      narrative: endpoint(Service::Narrative),
      screenplay: endpoint(Service::Screenplay),
      media: endpoint(Service::Media),
      interact: endpoint(Service::Interact),
      orchestration: endpoint(Service::Orchestration),
      proofs_count_path: DEFAULT_PROOFS_COUNT_PATH.to_string(),
      request_timeout_ms: None,
    }
  }
}

fn is_studio_var(key: &str) -> bool {
  key == PROOFS_COUNT_PATH_VAR
    || key == TIMEOUT_VAR
    || Service::ALL.iter().any(|service| service.env_var() == key)
}

fn parse_timeout(key: &str, raw: &str) -> Result<u64, ConfigError> {
  raw
    .trim()
    .parse::<u64>()
    .map_err(|_| ConfigError::InvalidValue {
      key: key.to_string(),
      value: raw.to_string(),
    })
}
