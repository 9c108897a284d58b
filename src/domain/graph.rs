use crate::domain::edge::Edge;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::hash::Hash;

/// Directed graph over consolidated edges: at most one edge per (from, to)
/// pair, each carrying every attachment of its pair.
#[derive(Debug)]
pub struct SliceGraph<N, A> {
    /// The directed graph of nodes and consolidated edges
    pub(crate) graph: DiGraph<N, Edge<N, A>>,

    /// Mapping from node value to node index
    pub(crate) node_to_index: HashMap<N, NodeIndex>,
}

impl<N: Clone + Eq + Hash, A> SliceGraph<N, A> {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_to_index: HashMap::new(),
        }
    }

    /// Build from arbitrary edges; parallel edges are consolidated first.
    pub fn from_edges(edges: impl IntoIterator<Item = Edge<N, A>>) -> Self {
        let mut graph = Self::new();
        for edge in consolidate(edges) {
            graph.add_edge(edge);
        }
        graph
    }

    pub fn add_node(&mut self, node: N) -> NodeIndex {
        if let Some(&idx) = self.node_to_index.get(&node) {
            return idx;
        }
        let idx = self.graph.add_node(node.clone());
        self.node_to_index.insert(node, idx);
        idx
    }

    /// Adds the edge, or appends its attachments to the existing edge of the
    /// same (from, to) pair.
    pub fn add_edge(&mut self, edge: Edge<N, A>) -> EdgeIndex {
        let source = self.add_node(edge.from().clone());
        let target = self.add_node(edge.to().clone());
        if let Some(existing) = self.graph.find_edge(source, target) {
            let (_, _, attachments) = edge.into_parts();
            self.graph[existing].merge(attachments);
            return existing;
        }
        self.graph.add_edge(source, target, edge)
    }

    pub fn get_node(&self, node: &N) -> Option<NodeIndex> {
        self.node_to_index.get(node).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &N {
        &self.graph[idx]
    }

    /// Outgoing edges with their target node index.
    pub fn outgoing(&self, idx: NodeIndex) -> impl Iterator<Item = (NodeIndex, &Edge<N, A>)> {
        self.graph
            .edges_directed(idx, petgraph::Direction::Outgoing)
            .map(|e| (e.target(), e.weight()))
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge<N, A>> {
        self.graph.edge_weights()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl<N: Clone + Eq + Hash, A> Default for SliceGraph<N, A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge parallel edges: one edge per (from, to) pair, in order of first
/// appearance, with the attachments of all merged edges in input order.
pub fn consolidate<N, A>(edges: impl IntoIterator<Item = Edge<N, A>>) -> Vec<Edge<N, A>>
where
    N: Clone + Eq + Hash,
{
    let mut positions: HashMap<(N, N), usize> = HashMap::new();
    let mut groups: Vec<(N, N, Vec<A>)> = Vec::new();

    for edge in edges {
        let (from, to, attachments) = edge.into_parts();
        match positions.get(&(from.clone(), to.clone())) {
            Some(&pos) => groups[pos].2.extend(attachments),
            None => {
                positions.insert((from.clone(), to.clone()), groups.len());
                groups.push((from, to, attachments));
            }
        }
    }

    groups
        .into_iter()
        .map(|(from, to, attachments)| Edge::new(from, to, attachments))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: &str, to: &str, attachments: &[&str]) -> Edge<String, String> {
        Edge::new(
            from.to_string(),
            to.to_string(),
            attachments.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_consolidate_merges_parallel_edges_in_order() {
        let merged = consolidate(vec![
            edge("A", "B", &["1"]),
            edge("B", "A", &["2"]),
            edge("A", "B", &["3", "4"]),
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], edge("A", "B", &["1", "3", "4"]));
        assert_eq!(merged[1], edge("B", "A", &["2"]));
    }

    #[test]
    fn test_edges_with_different_attachments_are_distinct() {
        assert_ne!(edge("A", "B", &["1"]), edge("A", "B", &["2"]));
    }

    #[test]
    fn test_from_edges_registers_nodes_once() {
        let graph = SliceGraph::from_edges(vec![
            edge("A", "B", &["1"]),
            edge("A", "B", &["2"]),
            edge("B", "C", &["3"]),
        ]);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);

        let a = graph.get_node(&"A".to_string()).unwrap();
        let outgoing: Vec<_> = graph.outgoing(a).collect();
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].1.attachments(), ["1", "2"]);
    }

    #[test]
    fn test_add_edge_merges_parallel_edges() {
        let mut graph = SliceGraph::new();
        let first = graph.add_edge(edge("A", "B", &["1"]));
        let second = graph.add_edge(edge("A", "B", &["2", "3"]));
        graph.add_edge(edge("B", "A", &["4"]));

        assert_eq!(first, second);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(
            graph.edges().next().unwrap(),
            &edge("A", "B", &["1", "2", "3"])
        );
    }
}
