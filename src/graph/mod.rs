//! Dependency graph builder.
//!
//! Nodes map 1:1 to components, edges to internal imports that resolve to
//! another component. Clusters are weakly connected groups; isolated
//! components are grouped by category. Every output list is sorted, so the
//! graph is a pure function of the component set.

pub mod metrics;
pub mod types;

pub use types::{Cluster, ClusterKind, DependencyGraph, EdgeKind, GraphEdge, GraphMetrics, GraphNode};

use petgraph::unionfind::UnionFind;
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};

use crate::types::{Category, ComponentRecord};

/// Extensions tried when an import omits one
const RESOLVE_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js", "vue"];

/// Node weight: `1 + exports + 0.5 * props + complexity rank`
pub fn node_weight(component: &ComponentRecord) -> f64 {
    1.0 + component.exports.len() as f64
        + 0.5 * component.props.len() as f64
        + component.complexity.rank() as f64
}

/// Maps import sources to the index of the component they name
struct PathIndex {
    keys: BTreeMap<String, usize>,
}

impl PathIndex {
    /// Register each component under its path, its extensionless path and,
    /// for `index` files, its directory
    fn new(paths: &[&str]) -> Self {
        let mut keys = BTreeMap::new();
        // Exact paths first so they always win over derived keys
        for (i, path) in paths.iter().enumerate() {
            keys.insert(path.to_string(), i);
        }
        for (i, path) in paths.iter().enumerate() {
            let Some((stem, ext)) = path.rsplit_once('.') else {
                continue;
            };
            if !RESOLVE_EXTENSIONS.contains(&ext) {
                continue;
            }
            keys.entry(stem.to_string()).or_insert(i);
            if let Some(dir) = stem.strip_suffix("/index") {
                keys.entry(dir.to_string()).or_insert(i);
            }
        }
        Self { keys }
    }

    fn resolve(&self, source: &str) -> Option<usize> {
        self.keys.get(source).copied()
    }
}

impl DependencyGraph {
    /// Build the graph for a component set
    pub fn build<R: Borrow<ComponentRecord>>(components: &[R]) -> Self {
        let mut sorted: Vec<&ComponentRecord> = components.iter().map(|c| c.borrow()).collect();
        sorted.sort_by(|a, b| a.path.cmp(&b.path));
        sorted.dedup_by(|a, b| a.path == b.path);

        let paths: Vec<&str> = sorted.iter().map(|c| c.path.as_str()).collect();
        let index = PathIndex::new(&paths);

        let mut edge_set: BTreeSet<(usize, usize)> = BTreeSet::new();
        for (from, component) in sorted.iter().enumerate() {
            for import in component.internal_imports() {
                match index.resolve(&import.source) {
                    Some(to) if to != from => {
                        edge_set.insert((from, to));
                    }
                    Some(_) => {}
                    None => {
                        tracing::trace!(
                            "Import {} in {} is not a component",
                            import.source,
                            component.path
                        );
                    }
                }
            }
        }
        let edge_pairs: Vec<(usize, usize)> = edge_set.into_iter().collect();

        let n = sorted.len();
        let mut connections = vec![0usize; n];
        for &(a, b) in &edge_pairs {
            connections[a] += 1;
            connections[b] += 1;
        }

        let (clusters, membership) = cluster(&sorted, &edge_pairs, &connections);

        let centrality = metrics::degree_centrality(&connections);
        let graph_metrics = GraphMetrics {
            node_count: n,
            edge_count: edge_pairs.len(),
            density: metrics::density(n, edge_pairs.len()),
            modularity: metrics::modularity(n, &edge_pairs, &membership),
            average_path_length: metrics::average_path_length(n, &edge_pairs),
            centrality: paths
                .iter()
                .zip(centrality)
                .map(|(p, c)| (p.to_string(), c))
                .collect(),
        };

        let nodes = sorted
            .iter()
            .enumerate()
            .map(|(i, c)| GraphNode {
                id: c.path.clone(),
                name: c.name.clone(),
                category: c.category,
                weight: node_weight(c),
                connections: connections[i],
                cluster: membership[i],
            })
            .collect();

        let edges = edge_pairs
            .iter()
            .map(|&(a, b)| GraphEdge {
                from: paths[a].to_string(),
                to: paths[b].to_string(),
                kind: EdgeKind::Import,
                weight: 1,
            })
            .collect();

        tracing::debug!(
            "Built dependency graph: {} nodes, {} edges, {} clusters",
            n,
            graph_metrics.edge_count,
            clusters.len()
        );

        Self {
            nodes,
            edges,
            clusters,
            metrics: graph_metrics,
        }
    }
}

/// Partition nodes into clusters and return them with per-node membership.
///
/// Ids follow the order of each cluster's smallest member path.
fn cluster(
    components: &[&ComponentRecord],
    edges: &[(usize, usize)],
    connections: &[usize],
) -> (Vec<Cluster>, Vec<usize>) {
    let n = components.len();
    let mut union = UnionFind::<usize>::new(n);
    for &(a, b) in edges {
        union.union(a, b);
    }

    let mut connected: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for node in 0..n {
        connected.entry(union.find(node)).or_default().push(node);
    }

    // (smallest member index, kind, label, members)
    let mut groups: Vec<(usize, ClusterKind, String, Vec<usize>)> = Vec::new();
    let mut isolated: BTreeMap<Category, Vec<usize>> = BTreeMap::new();

    for members in connected.into_values() {
        if members.len() >= 2 {
            let hub = members
                .iter()
                .copied()
                .max_by(|&a, &b| connections[a].cmp(&connections[b]).then(b.cmp(&a)))
                .unwrap_or(members[0]);
            groups.push((
                members[0],
                ClusterKind::Connected,
                components[hub].name.clone(),
                members,
            ));
        } else {
            let node = members[0];
            isolated.entry(components[node].category).or_default().push(node);
        }
    }

    for (category, members) in isolated {
        groups.push((
            members[0],
            ClusterKind::Category,
            category.as_str().to_string(),
            members,
        ));
    }

    // Members are pushed in ascending index order, and indices follow path order
    groups.sort_by_key(|g| g.0);

    let mut membership = vec![0usize; n];
    let clusters = groups
        .into_iter()
        .enumerate()
        .map(|(id, (_, kind, label, members))| {
            for &m in &members {
                membership[m] = id;
            }
            Cluster {
                id,
                kind,
                label,
                members: members.iter().map(|&m| components[m].path.clone()).collect(),
            }
        })
        .collect();

    (clusters, membership)
}
