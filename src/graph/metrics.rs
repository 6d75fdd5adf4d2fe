//! Graph metrics over node indices.
//!
//! Nodes are addressed by their position in the sorted node list, so every
//! function here is deterministic for a fixed input.

use petgraph::algo::dijkstra;
use petgraph::graph::{DiGraph, NodeIndex};
use rayon::prelude::*;
use std::collections::BTreeSet;

/// `e / (n * (n - 1))`, zero for graphs with fewer than two nodes
pub fn density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0;
    }
    edge_count as f64 / (node_count as f64 * (node_count as f64 - 1.0))
}

/// Degree centrality `connections / (n - 1)` per node
pub fn degree_centrality(connections: &[usize]) -> Vec<f64> {
    let n = connections.len();
    if n < 2 {
        return vec![0.0; n];
    }
    let denom = (n - 1) as f64;
    connections.iter().map(|&c| c as f64 / denom).collect()
}

/// Newman modularity of a partition over the undirected view of the edges.
///
/// Reciprocal edges collapse into one undirected edge. Zero without edges.
pub fn modularity(node_count: usize, edges: &[(usize, usize)], membership: &[usize]) -> f64 {
    let undirected: BTreeSet<(usize, usize)> = edges
        .iter()
        .filter(|(a, b)| a != b)
        .map(|&(a, b)| if a < b { (a, b) } else { (b, a) })
        .collect();

    let m = undirected.len() as f64;
    if m == 0.0 {
        return 0.0;
    }

    let mut degree = vec![0usize; node_count];
    for &(a, b) in &undirected {
        degree[a] += 1;
        degree[b] += 1;
    }

    let cluster_count = membership.iter().copied().max().map_or(0, |c| c + 1);
    let mut internal = vec![0usize; cluster_count];
    let mut degree_sum = vec![0usize; cluster_count];

    for &(a, b) in &undirected {
        if membership[a] == membership[b] {
            internal[membership[a]] += 1;
        }
    }
    for (node, &d) in degree.iter().enumerate() {
        degree_sum[membership[node]] += d;
    }

    (0..cluster_count)
        .map(|c| {
            let share = degree_sum[c] as f64 / (2.0 * m);
            internal[c] as f64 / m - share * share
        })
        .sum()
}

/// Mean directed shortest-path length over all reachable ordered pairs.
///
/// Sources are processed in parallel; zero when no pair is connected.
pub fn average_path_length(node_count: usize, edges: &[(usize, usize)]) -> f64 {
    if node_count < 2 || edges.is_empty() {
        return 0.0;
    }

    let mut graph: DiGraph<(), ()> = DiGraph::with_capacity(node_count, edges.len());
    for _ in 0..node_count {
        graph.add_node(());
    }
    for &(a, b) in edges {
        graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
    }

    let (total, pairs) = (0..node_count)
        .into_par_iter()
        .map(|source| {
            let start = NodeIndex::new(source);
            let distances = dijkstra(&graph, start, None, |_| 1usize);
            distances
                .into_iter()
                .filter(|(node, _)| *node != start)
                .fold((0usize, 0usize), |(sum, count), (_, d)| (sum + d, count + 1))
        })
        .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1));

    if pairs == 0 {
        0.0
    } else {
        total as f64 / pairs as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_density() {
        assert_eq!(density(0, 0), 0.0);
        assert_eq!(density(1, 0), 0.0);
        assert!(approx(density(2, 1), 0.5));
        assert!(approx(density(3, 6), 1.0));
    }

    #[test]
    fn test_degree_centrality() {
        assert_eq!(degree_centrality(&[]), Vec::<f64>::new());
        assert_eq!(degree_centrality(&[0]), vec![0.0]);
        assert_eq!(degree_centrality(&[2, 1, 1]), vec![1.0, 0.5, 0.5]);
    }

    #[test]
    fn test_modularity_two_communities() {
        // Two triangles joined by one bridge
        let edges = [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)];
        let membership = [0, 0, 0, 1, 1, 1];
        let q = modularity(6, &edges, &membership);
        // m = 7, each side: 3 internal edges, degree sum 7
        let expected = 2.0 * (3.0 / 7.0 - (7.0 / 14.0f64).powi(2));
        assert!(approx(q, expected));
        assert!(q > 0.0 && q <= 1.0);
    }

    #[test]
    fn test_modularity_single_cluster_and_empty() {
        assert_eq!(modularity(3, &[], &[0, 1, 2]), 0.0);
        let q = modularity(2, &[(0, 1), (1, 0)], &[0, 0]);
        assert!(approx(q, 0.0));
    }

    #[test]
    fn test_average_path_length_chain() {
        // 0 -> 1 -> 2: pairs (0,1)=1, (1,2)=1, (0,2)=2
        let apl = average_path_length(3, &[(0, 1), (1, 2)]);
        assert!(approx(apl, 4.0 / 3.0));
    }

    #[test]
    fn test_average_path_length_without_edges() {
        assert_eq!(average_path_length(0, &[]), 0.0);
        assert_eq!(average_path_length(4, &[]), 0.0);
    }
}
