/// Loose truthiness of a JSON value.
///
/// `null`, `false`, `0`, `NaN` and `""` are falsy; every other value,
/// including empty arrays and objects, is truthy.
pub fn is_truthy(value: &serde_json::Value) -> bool {
  match value {
    serde_json::Value::Null => false,
    serde_json::Value::Bool(b) => *b,
    serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
    serde_json::Value::String(s) => !s.is_empty(),
    serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_falsy_values() {
    for value in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
      assert!(!is_truthy(&value), "expected {value} to be falsy");
    }
  }

  #[test]
  fn test_truthy_values() {
    for value in [json!(true), json!(1), json!(-0.5), json!("no"), json!([]), json!({})] {
      assert!(is_truthy(&value), "expected {value} to be truthy");
    }
  }
}
