//! Weighted similarity graph backing the recommendation engine.
//!
//! Nodes live in an arena keyed by book id; edges are stored as
//! (target id, weight) pairs rather than node references, so mutual
//! recommendations cannot form ownership cycles. Traversal is a
//! depth-limited DFS with a single visited set across the whole walk:
//! each reachable book appears at most once, ranked by the product of
//! edge weights along its discovery path.

use std::collections::{HashMap, HashSet};

struct GraphNode {
    edges: Vec<(String, f64)>,
}

#[derive(Default)]
pub struct RecommendationGraph {
    nodes: HashMap<String, GraphNode>,
}

impl RecommendationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Register a node. Idempotent: re-adding an existing id keeps its
    /// edges. The graph holds only ids; callers resolve display data
    /// through the canonical record store.
    pub fn add_node(&mut self, id: impl Into<String>) {
        self.nodes
            .entry(id.into())
            .or_insert_with(|| GraphNode { edges: Vec::new() });
    }

    /// Add a directed edge. Ignored when either endpoint is unknown or an
    /// edge to the same target already exists (first write wins).
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) {
        if !self.nodes.contains_key(to) {
            return;
        }
        let Some(node) = self.nodes.get_mut(from) else {
            return;
        };
        if node.edges.iter().any(|(target, _)| target == to) {
            return;
        }
        node.edges.push((to.to_string(), weight));
    }

    pub fn remove_node(&mut self, id: &str) {
        self.nodes.remove(id);
        for node in self.nodes.values_mut() {
            node.edges.retain(|(target, _)| target != id);
        }
    }

    /// Similarity-ranked suggestions reachable within `depth` hops of
    /// `id`, sorted by combined weight descending. The source itself is
    /// never included; unknown ids yield an empty list.
    pub fn recommend(&self, id: &str, depth: usize) -> Vec<(String, f64)> {
        let Some(start) = self.nodes.get(id) else {
            return Vec::new();
        };
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(id);
        let mut results: Vec<(String, f64)> = Vec::new();
        self.dfs(start, depth, 1.0, &mut visited, &mut results);
        results.sort_by(|a, b| b.1.total_cmp(&a.1));
        results
    }

    fn dfs<'a>(
        &'a self,
        node: &'a GraphNode,
        depth: usize,
        combined: f64,
        visited: &mut HashSet<&'a str>,
        results: &mut Vec<(String, f64)>,
    ) {
        if depth == 0 {
            return;
        }
        for (target, weight) in &node.edges {
            if visited.insert(target.as_str()) {
                let next_combined = combined * weight;
                results.push((target.clone(), next_combined));
                if let Some(next) = self.nodes.get(target) {
                    self.dfs(next, depth - 1, next_combined, visited, results);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with_nodes(ids: &[&str]) -> RecommendationGraph {
        let mut graph = RecommendationGraph::new();
        for id in ids {
            graph.add_node(*id);
        }
        graph
    }

    #[test]
    fn depth_one_ranks_direct_neighbors() {
        let mut graph = graph_with_nodes(&["A", "B", "C"]);
        graph.add_edge("A", "B", 0.8);
        graph.add_edge("A", "C", 0.5);
        let recs = graph.recommend("A", 1);
        assert_eq!(
            recs,
            vec![("B".to_string(), 0.8), ("C".to_string(), 0.5)]
        );
    }

    #[test]
    fn deeper_hops_multiply_weights() {
        let mut graph = graph_with_nodes(&["A", "B", "C"]);
        graph.add_edge("A", "B", 0.5);
        graph.add_edge("B", "C", 0.5);
        let recs = graph.recommend("A", 2);
        assert_eq!(
            recs,
            vec![("B".to_string(), 0.5), ("C".to_string(), 0.25)]
        );
        // depth 1 stops before C
        assert_eq!(graph.recommend("A", 1).len(), 1);
    }

    #[test]
    fn cycles_do_not_revisit_or_include_source() {
        let mut graph = graph_with_nodes(&["A", "B"]);
        graph.add_edge("A", "B", 1.0);
        graph.add_edge("B", "A", 1.0);
        let recs = graph.recommend("A", 5);
        assert_eq!(recs, vec![("B".to_string(), 1.0)]);
    }

    #[test]
    fn duplicate_edge_keeps_first_weight() {
        let mut graph = graph_with_nodes(&["A", "B"]);
        graph.add_edge("A", "B", 0.9);
        graph.add_edge("A", "B", 0.1);
        assert_eq!(graph.recommend("A", 1), vec![("B".to_string(), 0.9)]);
    }

    #[test]
    fn results_contain_no_duplicates() {
        // Diamond: A -> B -> D and A -> C -> D; D must appear once.
        let mut graph = graph_with_nodes(&["A", "B", "C", "D"]);
        graph.add_edge("A", "B", 0.9);
        graph.add_edge("A", "C", 0.8);
        graph.add_edge("B", "D", 0.9);
        graph.add_edge("C", "D", 0.9);
        let recs = graph.recommend("A", 2);
        let d_count = recs.iter().filter(|(id, _)| id == "D").count();
        assert_eq!(d_count, 1);
        assert_eq!(recs.len(), 3);
        // sorted descending
        for pair in recs.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn unknown_source_yields_empty() {
        let graph = graph_with_nodes(&["A"]);
        assert!(graph.recommend("missing", 3).is_empty());
    }

    #[test]
    fn edge_to_unknown_target_is_ignored() {
        let mut graph = graph_with_nodes(&["A"]);
        graph.add_edge("A", "ghost", 1.0);
        assert!(graph.recommend("A", 1).is_empty());
    }

    #[test]
    fn remove_node_drops_incoming_edges() {
        let mut graph = graph_with_nodes(&["A", "B"]);
        graph.add_edge("A", "B", 1.0);
        graph.remove_node("B");
        assert!(!graph.contains("B"));
        assert!(graph.recommend("A", 1).is_empty());
    }
}
