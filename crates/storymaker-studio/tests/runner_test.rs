//! Flow runner driven against a mocked orchestration service.

use serde_json::json;
use storymaker_client::StudioClient;
use storymaker_config::StudioConfig;
use storymaker_flow::GateDecision;
use storymaker_studio::dashboard::render_flow;
use storymaker_studio::{Completion, FlowPhase, FlowRunError, FlowRunner, FlowState};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> StudioClient {
  let config = StudioConfig::from_vars(vec![("ORCHESTRATION_BASE".to_string(), server.uri())])
    .unwrap()
    .config;
  StudioClient::new(config).unwrap()
}

#[tokio::test]
async fn test_run_applies_projection() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/run"))
    .and(body_json(json!({ "premise": "A heist story" })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "status": "ok",
      "data": { "state": { "nodes": {
        "narrative_outline": { "status": "ok", "data": { "beats": ["Hook"] } },
        "qa_trope_budget": { "status": "error", "error": { "message": "timeout" } },
        "decide_gate": { "status": "ok", "data": { "cond": 1 } }
      } } }
    })))
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  let mut runner = FlowRunner::new();

  let completion = runner.run(&client, "  A heist story  ").await.unwrap();

  assert_eq!(completion, Completion::Applied);
  match runner.state() {
    FlowState::Completed { projection, .. } => {
      assert_eq!(
        projection.gate_decision,
        GateDecision::Decided { approved: true }
      );
      assert!(projection.diagram_text.contains("qa_trope_budget[\"❌ qa_trope_budget\"]"));
    }
    other => panic!("expected completed state, got {other:?}"),
  }

  let text = render_flow(runner.state());
  assert!(text.contains("✅ Approved"));
  assert!(text.contains("❌ qa_trope_budget: timeout"));
}

#[tokio::test]
async fn test_run_transport_failure_lands_in_failed() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/run"))
    .respond_with(ResponseTemplate::new(502))
    .mount(&server)
    .await;

  let mut runner = FlowRunner::new();
  runner.run(&client_for(&server), "premise").await.unwrap();

  assert_eq!(runner.phase(), FlowPhase::Failed);
  assert!(matches!(
    runner.state(),
    FlowState::Failed { error, .. } if error == "502 Bad Gateway"
  ));
}

#[tokio::test]
async fn test_run_malformed_nodes_lands_in_failed() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/run"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "status": "ok",
      "data": { "state": { "nodes": [1, 2] } }
    })))
    .mount(&server)
    .await;

  let mut runner = FlowRunner::new();
  runner.run(&client_for(&server), "premise").await.unwrap();

  assert_eq!(runner.phase(), FlowPhase::Failed);
}

#[tokio::test]
async fn test_blank_premise_sends_nothing() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .respond_with(ResponseTemplate::new(200))
    .expect(0)
    .mount(&server)
    .await;

  let mut runner = FlowRunner::new();
  let err = runner.run(&client_for(&server), " \t ").await.unwrap_err();

  assert!(matches!(err, FlowRunError::EmptyPremise));
  assert_eq!(runner.phase(), FlowPhase::Idle);
}
