use serde::{Deserialize, Serialize};

/// Body of the QA endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftRequest {
  pub draft: String,
}

/// Story structure the narrative service builds an outline for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoryStructure {
  #[default]
  #[serde(rename = "hero_journey")]
  HeroJourney,
  #[serde(rename = "harmon_8")]
  Harmon8,
  #[serde(rename = "kishotenketsu")]
  Kishotenketsu,
}

impl StoryStructure {
  /// Wire name of the structure.
  pub fn as_str(&self) -> &'static str {
    match self {
      StoryStructure::HeroJourney => "hero_journey",
      StoryStructure::Harmon8 => "harmon_8",
      StoryStructure::Kishotenketsu => "kishotenketsu",
    }
  }
}

/// Body of `POST {narrative}/narrative/outline`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineRequest {
  pub world_id: String,
  pub premise: String,
  pub mode: StoryStructure,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_outline_request_sends_structure_wire_name() {
    let request = OutlineRequest {
      world_id: "default".to_string(),
      premise: "Mirrors".to_string(),
      mode: StoryStructure::Harmon8,
    };

    assert_eq!(
      serde_json::to_value(&request).unwrap(),
      json!({ "world_id": "default", "premise": "Mirrors", "mode": "harmon_8" })
    );
    assert_eq!(StoryStructure::default().as_str(), "hero_journey");
  }
}
