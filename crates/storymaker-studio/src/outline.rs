//! Outline beats and the draft built from them.

use serde::Serialize;
use serde_json::Value;
use storymaker_flow::{Envelope, is_truthy};

/// Beat fields holding its text, in order of preference.
const TEXT_FIELDS: [&str; 3] = ["description", "objective", "note"];

/// One beat of a generated outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineBeat {
  /// `b<index>`, stable for the lifetime of the outline.
  pub id: String,
  pub text: String,
}

/// Beats of a narrative outline in service order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutlineView {
  pub beats: Vec<OutlineBeat>,
}

impl OutlineView {
  /// Build from the `data` of an outline response.
  ///
  /// A beat's text is the first truthy of `description`, `objective` and
  /// `note`; a bare string beat is its own text. Beats with none of them are
  /// kept with empty text.
  pub fn from_data(data: &Value) -> Self {
    let beats = data
      .get("beats")
      .and_then(Value::as_array)
      .map(|beats| {
        beats
          .iter()
          .enumerate()
          .map(|(i, beat)| OutlineBeat {
            id: format!("b{}", i),
            text: beat_text(beat),
          })
          .collect()
      })
      .unwrap_or_default();

    Self { beats }
  }

  pub fn from_envelope(envelope: &Envelope<Value>) -> Self {
    envelope
      .data
      .as_ref()
      .map(Self::from_data)
      .unwrap_or_default()
  }

  pub fn is_empty(&self) -> bool {
    self.beats.is_empty()
  }

  /// Beat texts joined by newlines, as sent to the QA checks.
  pub fn draft(&self) -> String {
    self
      .beats
      .iter()
      .map(|beat| beat.text.as_str())
      .collect::<Vec<_>>()
      .join("\n")
  }
}

fn beat_text(beat: &Value) -> String {
  if let Value::String(text) = beat {
    return text.clone();
  }

  TEXT_FIELDS
    .iter()
    .filter_map(|field| beat.get(field))
    .find(|value| is_truthy(value))
    .map(|value| match value {
      Value::String(s) => s.clone(),
      other => other.to_string(),
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_beat_text_fallback_order() {
    let view = OutlineView::from_data(&json!({
      "beats": [
        { "description": "Mara plans the job", "objective": "ignored", "note": "ignored" },
        { "description": "", "objective": "Steal the mirror", "note": "ignored" },
        { "description": null, "note": "Twist in act 3" },
        { "title": "untitled" },
        "The mirror cracks"
      ]
    }));

    let texts: Vec<&str> = view.beats.iter().map(|b| b.text.as_str()).collect();
    assert_eq!(
      texts,
      vec![
        "Mara plans the job",
        "Steal the mirror",
        "Twist in act 3",
        "",
        "The mirror cracks"
      ]
    );
    assert_eq!(view.beats[4].id, "b4");
  }

  #[test]
  fn test_draft_joins_beats_with_newlines() {
    let view = OutlineView::from_data(&json!({
      "beats": [{ "description": "Hook" }, { "objective": "Climax" }]
    }));
    assert_eq!(view.draft(), "Hook\nClimax");
  }

  #[test]
  fn test_missing_beats_is_empty() {
    assert!(OutlineView::from_data(&json!({ "beats": "none" })).is_empty());

    let envelope: Envelope<Value> =
      serde_json::from_value(json!({ "status": "error", "error": "provider down" })).unwrap();
    assert!(OutlineView::from_envelope(&envelope).is_empty());
  }
}
