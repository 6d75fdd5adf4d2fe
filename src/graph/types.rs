use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::Category;

/// One component in the dependency graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GraphNode {
    /// Component path, unique within the graph
    pub id: String,
    pub name: String,
    pub category: Category,
    /// `1 + exports + 0.5 * props + complexity rank`
    pub weight: f64,
    /// Edges touching this node, both directions
    pub connections: usize,
    /// Id of the cluster this node belongs to
    pub cluster: usize,
}

/// Relationship carried by an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Import,
}

/// Directed internal import between two components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
    pub weight: u32,
}

/// How a cluster was formed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClusterKind {
    /// A weakly connected group of two or more components
    Connected,
    /// Isolated components sharing a category
    Category,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Cluster {
    pub id: usize,
    pub kind: ClusterKind,
    /// Most connected member name, or the category for category clusters
    pub label: String,
    /// Member paths, sorted
    pub members: Vec<String>,
}

/// Aggregate metrics of the graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GraphMetrics {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub modularity: f64,
    pub average_path_length: f64,
    /// Degree centrality per node id
    pub centrality: BTreeMap<String, f64>,
}

/// The full dependency graph of a workspace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DependencyGraph {
    /// Nodes sorted by id
    pub nodes: Vec<GraphNode>,
    /// Edges sorted by (from, to)
    pub edges: Vec<GraphEdge>,
    /// Clusters ordered by their smallest member
    pub clusters: Vec<Cluster>,
    pub metrics: GraphMetrics,
}

impl DependencyGraph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes
            .binary_search_by(|n| n.id.as_str().cmp(id))
            .ok()
            .map(|i| &self.nodes[i])
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids of the nodes `id` imports
    pub fn dependencies_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.from == id)
            .map(|e| e.to.as_str())
    }

    /// Ids of the nodes importing `id`
    pub fn dependents_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.to == id)
            .map(|e| e.from.as_str())
    }
}
