//! World graph wire types.

use serde::{Deserialize, Serialize};

/// Optional filters of `GET {worldcore}/graph`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphQuery {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub world_id: Option<String>,
  /// Free-text entity search.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub q: Option<String>,
}

/// An entity of the world graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
  pub id: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub label: Option<String>,
  /// Entity type, e.g. "Characters" or "Places".
  #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
  pub entity_type: Option<String>,
  /// `DRAFT` or `CANON`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status: Option<String>,
}

/// A relation between two entities.
///
/// Worldcore has used both `from`/`to`/`type` and `source`/`target`/`relation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
  #[serde(alias = "from")]
  pub source: String,
  #[serde(alias = "to")]
  pub target: String,
  #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
  pub relation: Option<String>,
}

/// Response of `GET {worldcore}/graph`. Missing arrays are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
  #[serde(default)]
  pub nodes: Vec<GraphNode>,
  #[serde(default)]
  pub edges: Vec<GraphEdge>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_edges_accept_both_spellings() {
    let doc: GraphDocument = serde_json::from_value(json!({
      "nodes": [{ "id": "e1", "type": "Characters", "label": "Mara" }],
      "edges": [
        { "from": "e1", "to": "e2", "type": "ally" },
        { "source": "e2", "target": "e3", "relation": "rival" }
      ]
    }))
    .unwrap();

    assert_eq!(doc.nodes[0].entity_type.as_deref(), Some("Characters"));
    assert_eq!(doc.edges[0].source, "e1");
    assert_eq!(doc.edges[0].relation.as_deref(), Some("ally"));
    assert_eq!(doc.edges[1].target, "e3");
    assert_eq!(doc.edges[1].relation.as_deref(), Some("rival"));
  }

  #[test]
  fn test_missing_arrays_are_empty() {
    let doc: GraphDocument = serde_json::from_value(json!({})).unwrap();
    assert!(doc.nodes.is_empty());
    assert!(doc.edges.is_empty());
  }
}
