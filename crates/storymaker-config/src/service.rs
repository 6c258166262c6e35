use serde::{Deserialize, Serialize};

/// A remote service the studio talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
  /// World/canon store, QA checks and the entity graph.
  Worldcore,
  /// Narrative generation (outlines).
  Narrative,
  Screenplay,
  Media,
  Interact,
  /// Orchestration graph runner.
  Orchestration,
}

impl Service {
  /// All services, in the order the health row displays them.
  pub const ALL: [Service; 6] = [
    Service::Worldcore,
    Service::Narrative,
    Service::Screenplay,
    Service::Media,
    Service::Interact,
    Service::Orchestration,
  ];

  pub fn name(&self) -> &'static str {
    match self {
      Service::Worldcore => "worldcore",
      Service::Narrative => "narrative",
      Service::Screenplay => "screenplay",
      Service::Media => "media",
      Service::Interact => "interact",
      Service::Orchestration => "orchestration",
    }
  }

  /// Environment variable holding the service base URL.
  pub fn env_var(&self) -> &'static str {
    match self {
      Service::Worldcore => "WORLDCORE_BASE",
      Service::Narrative => "NARRATIVE_BASE",
      Service::Screenplay => "SCREENPLAY_BASE",
      Service::Media => "MEDIA_BASE",
      Service::Interact => "INTERACT_BASE",
      Service::Orchestration => "ORCHESTRATION_BASE",
    }
  }

  /// Path of the readiness endpoint, relative to the base URL.
  pub fn health_path(&self) -> &'static str {
    match self {
      Service::Orchestration => "/healthz",
      _ => "/health",
    }
  }

  /// Base URL used when the environment does not name one.
  pub fn default_base(&self) -> &'static str {
    match self {
      Service::Worldcore => "http://127.0.0.1:8000",
      Service::Narrative => "http://127.0.0.1:8001",
      Service::Screenplay => "http://127.0.0.1:8002",
      Service::Media => "http://127.0.0.1:8003",
      Service::Interact => "http://127.0.0.1:8004",
      Service::Orchestration => "http://127.0.0.1:8700",
    }
  }
}

impl std::fmt::Display for Service {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}
