use std::time::Duration;

use futures::future::join_all;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use storymaker_config::{Service, StudioConfig};
use storymaker_flow::{Envelope, FlowRunRequest, FlowRunResponse, RunResult};
use tracing::{error, info, instrument, warn};

use crate::error::ClientError;
use crate::graph::{GraphDocument, GraphQuery};
use crate::health::{HealthReport, interpret_health_body};
use crate::requests::{DraftRequest, OutlineRequest};

/// Client for every service of the StoryMaker mesh.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct StudioClient {
  http: Client,
  config: StudioConfig,
}

impl StudioClient {
  /// Create a client for the given configuration.
  pub fn new(config: StudioConfig) -> Result<Self, ClientError> {
    let mut builder = Client::builder();
    if let Some(ms) = config.request_timeout_ms {
      builder = builder.timeout(Duration::from_millis(ms));
    }
    let http = builder.build().map_err(ClientError::Build)?;
    Ok(Self { http, config })
  }

  /// Run the story flow for a premise.
  ///
  /// The response is parsed into a [`RunResult`]; a malformed node mapping is
  /// reported as [`ClientError::Format`].
  #[instrument(name = "run_flow", skip(self, premise), fields(premise_len = premise.len()))]
  pub async fn run_flow(&self, premise: &str) -> Result<RunResult, ClientError> {
    let url = self.config.orchestration.join("/run");
    let request = FlowRunRequest {
      premise: premise.to_string(),
    };

    info!(url = %url, "flow run started");

    let response: FlowRunResponse = match self.post_json(&url, &request).await {
      Ok(response) => response,
      Err(e) => {
        error!(error = %e, "flow run failed");
        return Err(e);
      }
    };

    let result = RunResult::from_response(response)?;

    info!(
      status = ?result.status,
      nodes = result.node_outcomes.len(),
      "flow run completed"
    );

    Ok(result)
  }

  /// Check one service. Never fails; failures are reported as unhealthy.
  #[instrument(name = "health", skip(self))]
  pub async fn health(&self, service: Service) -> HealthReport {
    let url = self.config.endpoint(service).join(service.health_path());

    let (ok, detail) = match self.http.get(&url).send().await {
      Err(e) => (false, Some(e.to_string())),
      Ok(response) if !response.status().is_success() => {
        (false, Some(response.status().as_u16().to_string()))
      }
      Ok(response) => match response.json::<serde_json::Value>().await {
        Ok(body) => interpret_health_body(&body),
        Err(e) => (false, Some(e.to_string())),
      },
    };

    if !ok {
      warn!(url = %url, detail = ?detail, "service unhealthy");
    }

    HealthReport {
      service,
      url,
      ok,
      detail,
    }
  }

  /// Check every service concurrently, in display order.
  pub async fn health_all(&self) -> Vec<HealthReport> {
    join_all(Service::ALL.iter().map(|service| self.health(*service))).await
  }

  /// Run the trope budget check on a draft.
  #[instrument(name = "qa_trope_budget", skip(self, draft))]
  pub async fn trope_budget(&self, draft: &str) -> Result<Envelope<serde_json::Value>, ClientError> {
    let url = self.config.worldcore.join("/api/qa/trope-budget");
    self
      .post_json(
        &url,
        &DraftRequest {
          draft: draft.to_string(),
        },
      )
      .await
  }

  /// Run the promise/payoff check on a draft.
  #[instrument(name = "qa_promise_payoff", skip(self, draft))]
  pub async fn promise_payoff(
    &self,
    draft: &str,
  ) -> Result<Envelope<serde_json::Value>, ClientError> {
    let url = self.config.worldcore.join("/api/qa/promise-payoff");
    self
      .post_json(
        &url,
        &DraftRequest {
          draft: draft.to_string(),
        },
      )
      .await
  }

  /// Ask the narrative service for an outline.
  #[instrument(name = "narrative_outline", skip(self, request), fields(world_id = %request.world_id))]
  pub async fn narrative_outline(
    &self,
    request: &OutlineRequest,
  ) -> Result<Envelope<serde_json::Value>, ClientError> {
    let url = self.config.narrative.join("/narrative/outline");
    self.post_json(&url, request).await
  }

  /// Fetch the world entity graph.
  #[instrument(name = "world_graph", skip(self))]
  pub async fn world_graph(&self, query: &GraphQuery) -> Result<GraphDocument, ClientError> {
    let url = self.config.worldcore.join("/graph");
    let response = self
      .http
      .get(&url)
      .query(query)
      .send()
      .await
      .map_err(|source| ClientError::Transport {
        url: url.clone(),
        source,
      })?;
    decode(&url, response).await
  }

  /// Number of recorded proofs, when worldcore exposes the counter.
  ///
  /// Accepts `{"count": n}` and `{"data": {"count": n}}` for any JSON number,
  /// kept as sent. Any failure yields `None`.
  pub async fn proofs_count(&self) -> Option<serde_json::Number> {
    let url = self.config.worldcore.join(&self.config.proofs_count_path);
    let response = self.http.get(&url).send().await.ok()?;
    if !response.status().is_success() {
      return None;
    }
    let body: serde_json::Value = response.json().await.ok()?;
    let count = body
      .get("count")
      .or_else(|| body.get("data").and_then(|d| d.get("count")))?;
    match count {
      serde_json::Value::Number(n) => Some(n.clone()),
      _ => None,
    }
  }

  async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, ClientError>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    let response = self
      .http
      .post(url)
      .json(body)
      .send()
      .await
      .map_err(|source| ClientError::Transport {
        url: url.to_string(),
        source,
      })?;
    decode(url, response).await
  }
}

async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, ClientError> {
  let status = response.status();
  if !status.is_success() {
    return Err(ClientError::Status {
      url: url.to_string(),
      status: status.as_u16(),
      reason: status.canonical_reason().unwrap_or_default().to_string(),
    });
  }

  let body = response
    .text()
    .await
    .map_err(|source| ClientError::Transport {
      url: url.to_string(),
      source,
    })?;

  serde_json::from_str(&body).map_err(|e| ClientError::Decode {
    url: url.to_string(),
    message: e.to_string(),
  })
}
