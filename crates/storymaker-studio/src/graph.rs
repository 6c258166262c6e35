use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;
use storymaker_client::{GraphDocument, GraphEdge};

const UNTYPED: &str = "untyped";

/// Adjacency summary of the world entity graph.
#[derive(Debug, Clone, Serialize)]
pub struct WorldGraph {
  /// Entity ids in document order.
  node_ids: Vec<String>,
  /// node_id -> downstream node_ids.
  #[serde(skip)]
  adjacency: HashMap<String, Vec<String>>,
  /// node_id -> upstream node_ids.
  #[serde(skip)]
  reverse_adjacency: HashMap<String, Vec<String>>,
  /// Nodes with no incoming edges, in document order.
  entry_points: Vec<String>,
  /// Nodes with more than one incoming edge.
  hubs: BTreeSet<String>,
  /// Edges naming an entity that is not in the node list.
  dangling: Vec<GraphEdge>,
  /// Entity type -> number of nodes.
  type_counts: BTreeMap<String, usize>,
  edge_count: usize,
}

impl WorldGraph {
  pub fn new(document: &GraphDocument) -> Self {
    let mut adjacency: HashMap<String, Vec<String>> = HashMap::new();
    let mut reverse_adjacency: HashMap<String, Vec<String>> = HashMap::new();
    let mut type_counts: BTreeMap<String, usize> = BTreeMap::new();

    for node in &document.nodes {
      adjacency.entry(node.id.clone()).or_default();
      reverse_adjacency.entry(node.id.clone()).or_default();
      let entity_type = node.entity_type.as_deref().unwrap_or(UNTYPED);
      *type_counts.entry(entity_type.to_string()).or_default() += 1;
    }

    let mut dangling = Vec::new();
    let mut edge_count = 0;
    for edge in &document.edges {
      if !adjacency.contains_key(&edge.source) || !adjacency.contains_key(&edge.target) {
        dangling.push(edge.clone());
        continue;
      }
      edge_count += 1;
      adjacency
        .entry(edge.source.clone())
        .or_default()
        .push(edge.target.clone());
      reverse_adjacency
        .entry(edge.target.clone())
        .or_default()
        .push(edge.source.clone());
    }

    let node_ids: Vec<String> = document.nodes.iter().map(|n| n.id.clone()).collect();

    let entry_points = node_ids
      .iter()
      .filter(|id| reverse_adjacency.get(*id).is_none_or(|v| v.is_empty()))
      .cloned()
      .collect();

    let hubs = reverse_adjacency
      .iter()
      .filter(|(_, incoming)| incoming.len() > 1)
      .map(|(id, _)| id.clone())
      .collect();

    Self {
      node_ids,
      adjacency,
      reverse_adjacency,
      entry_points,
      hubs,
      dangling,
      type_counts,
      edge_count,
    }
  }

  pub fn node_count(&self) -> usize {
    self.node_ids.len()
  }

  /// Number of edges between known entities.
  pub fn edge_count(&self) -> usize {
    self.edge_count
  }

  pub fn entry_points(&self) -> &[String] {
    &self.entry_points
  }

  pub fn downstream(&self, node_id: &str) -> &[String] {
    self
      .adjacency
      .get(node_id)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  pub fn upstream(&self, node_id: &str) -> &[String] {
    self
      .reverse_adjacency
      .get(node_id)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  pub fn is_hub(&self, node_id: &str) -> bool {
    self.hubs.contains(node_id)
  }

  pub fn hubs(&self) -> &BTreeSet<String> {
    &self.hubs
  }

  pub fn dangling(&self) -> &[GraphEdge] {
    &self.dangling
  }

  /// Node counts per entity type; untyped entities count as `untyped`.
  pub fn type_counts(&self) -> &BTreeMap<String, usize> {
    &self.type_counts
  }
}
