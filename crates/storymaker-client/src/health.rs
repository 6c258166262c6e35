use serde::Serialize;
use storymaker_config::Service;

/// Result of probing one service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
  pub service: Service,
  pub url: String,
  pub ok: bool,
  /// Why the service is considered unhealthy.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub detail: Option<String>,
}

/// Decide whether a health body reports a healthy service.
///
/// Accepts `{"ok": true}` and `{"status": "ok"}`; anything else is unhealthy
/// and the body is returned as detail.
pub fn interpret_health_body(body: &serde_json::Value) -> (bool, Option<String>) {
  let ok = body.get("ok").and_then(|v| v.as_bool()) == Some(true)
    || body.get("status").and_then(|v| v.as_str()) == Some("ok");

  if ok {
    (true, None)
  } else {
    (false, Some(body.to_string()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_ok_flag_is_healthy() {
    assert_eq!(interpret_health_body(&json!({ "ok": true })), (true, None));
  }

  #[test]
  fn test_status_ok_is_healthy() {
    assert_eq!(
      interpret_health_body(&json!({ "status": "ok", "meta": {} })),
      (true, None)
    );
  }

  #[test]
  fn test_other_bodies_are_unhealthy() {
    let (ok, detail) = interpret_health_body(&json!({ "ok": "true" }));
    assert!(!ok);
    assert_eq!(detail.as_deref(), Some(r#"{"ok":"true"}"#));

    let (ok, _) = interpret_health_body(&json!({ "status": "degraded" }));
    assert!(!ok);
  }
}
