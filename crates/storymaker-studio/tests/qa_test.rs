//! QA checks run on an outline draft against mocked services.

use serde_json::{Value, json};
use storymaker_client::{OutlineRequest, StoryStructure, StudioClient};
use storymaker_config::StudioConfig;
use storymaker_flow::Envelope;
use storymaker_studio::{BudgetTone, OutlineView, QaView};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> StudioClient {
  let config = StudioConfig::from_vars(vec![
    ("WORLDCORE_BASE".to_string(), server.uri()),
    ("NARRATIVE_BASE".to_string(), server.uri()),
  ])
  .unwrap()
  .config;
  StudioClient::new(config).unwrap()
}

async fn outline(client: &StudioClient) -> Envelope<Value> {
  let request = OutlineRequest {
    world_id: "default".to_string(),
    premise: "A heist story".to_string(),
    mode: StoryStructure::HeroJourney,
  };
  client.narrative_outline(&request).await.unwrap()
}

#[tokio::test]
async fn test_checks_receive_outline_draft() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/narrative/outline"))
    .and(body_json(json!({
      "world_id": "default",
      "premise": "A heist story",
      "mode": "hero_journey"
    })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "status": "ok",
      "data": { "beats": [
        { "description": "Mara plans the job" },
        { "objective": "Steal the mirror" }
      ] }
    })))
    .expect(1)
    .mount(&server)
    .await;

  let draft = json!({ "draft": "Mara plans the job\nSteal the mirror" });
  Mock::given(method("POST"))
    .and(path("/api/qa/trope-budget"))
    .and(body_json(draft.clone()))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "status": "ok",
      "data": { "used": 2, "cap": 10 }
    })))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("POST"))
    .and(path("/api/qa/promise-payoff"))
    .and(body_json(draft))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "status": "ok",
      "data": { "ledger": [{ "setup": "A mirror", "payoff": "It cracks", "status": "ok" }] }
    })))
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  let view = OutlineView::from_envelope(&outline(&client).await);
  let qa = QaView::run_checks(&client, &view.draft()).await;

  assert_eq!(qa.trope_budget.map(|t| (t.percent, t.tone)), Some((20, BudgetTone::Good)));
  assert_eq!(qa.promise_ledger.map(|l| l.ok_count()), Some(1));
  assert!(qa.errors.is_empty());
}

#[tokio::test]
async fn test_failed_check_keeps_the_other_panel() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/api/qa/trope-budget"))
    .respond_with(ResponseTemplate::new(500))
    .mount(&server)
    .await;
  Mock::given(method("POST"))
    .and(path("/api/qa/promise-payoff"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "status": "ok",
      "data": { "ledger": [] }
    })))
    .mount(&server)
    .await;

  let client = client_for(&server);
  let qa = QaView::run_checks(&client, "Hook").await;

  assert_eq!(qa.trope_budget, None);
  assert_eq!(qa.promise_ledger.map(|l| l.is_empty()), Some(true));
  assert_eq!(qa.errors, vec!["500 Internal Server Error".to_string()]);
}
