//! Elementary cycle enumeration over a [`SliceGraph`].
//!
//! Every elementary cycle lies inside one strongly connected component, so the
//! search runs per component (Tarjan's algorithm via petgraph). Within a
//! component the nodes are ranked by their natural order, and each cycle is
//! found exactly once: starting from its smallest node and extending the walk
//! only through larger nodes. The node sequence of a cycle rotated to its
//! smallest node is its canonical form; results are deduplicated and ordered
//! by it, so repeated runs over the same graph report identical cycles in
//! identical order.
//!
//! The number of elementary cycles can grow exponentially with the density of
//! the slice graph. That is a property of the problem, not of the search;
//! callers that need a bound set a cycle limit or restrict the input.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;

use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;
use tracing::{debug, info, instrument, warn};

use crate::domain::builder::GraphBuilder;
use crate::domain::dependency::Dependency;
use crate::domain::edge::Edge;
use crate::domain::error::ConfigurationError;
use crate::domain::graph::SliceGraph;
use crate::domain::path::Cycle;
use crate::domain::ports::SliceAssignment;

/// Cycles found by one search.
#[derive(Debug, Clone)]
pub struct CycleSearch<N, A> {
    /// Cycles ordered by canonical form.
    pub cycles: Vec<Cycle<N, A>>,
    /// True if the search stopped at the configured limit.
    pub truncated: bool,
}

/// Cycle detector - enumerates all elementary cycles of a slice graph
#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    max_cycles: Option<usize>,
}

impl CycleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop after `max_cycles` cycles; `None` enumerates all of them.
    pub fn with_max_cycles(max_cycles: Option<usize>) -> Self {
        Self { max_cycles }
    }

    #[instrument(skip_all, fields(nodes = graph.node_count(), edges = graph.edge_count()))]
    pub fn find_cycles<N, A>(&self, graph: &SliceGraph<N, A>) -> CycleSearch<N, A>
    where
        N: Clone + Ord + Hash,
        A: Clone,
    {
        let mut found: BTreeMap<Vec<N>, Cycle<N, A>> = BTreeMap::new();
        let mut truncated = false;

        let mut components: Vec<Vec<NodeIndex>> = tarjan_scc(&graph.graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .collect();
        for component in &mut components {
            component.sort_by(|a, b| graph.node(*a).cmp(graph.node(*b)));
        }
        components.sort_by(|a, b| graph.node(a[0]).cmp(graph.node(b[0])));

        'components: for component in &components {
            debug!(size = component.len(), "searching strongly connected component");
            let rank: HashMap<NodeIndex, usize> = component
                .iter()
                .enumerate()
                .map(|(position, &idx)| (idx, position))
                .collect();

            for (start_rank, &start) in component.iter().enumerate() {
                let walker = Walker {
                    graph,
                    rank: &rank,
                    start,
                    start_rank,
                };
                let complete = walker.walk(|edges| {
                    let cycle = Cycle::closed_unchecked(edges.into_iter().cloned().collect());
                    let key = canonical_form(&cycle);
                    if found.contains_key(&key) {
                        return true;
                    }
                    if self.max_cycles.is_some_and(|max| found.len() >= max) {
                        return false;
                    }
                    found.insert(key, cycle);
                    true
                });
                if !complete {
                    truncated = true;
                    break 'components;
                }
            }
        }

        if truncated {
            warn!(
                limit = self.max_cycles,
                "cycle limit reached; remaining cycles were not enumerated"
            );
        }
        info!(cycles = found.len(), "cycle search finished");

        CycleSearch {
            cycles: found.into_values().collect(),
            truncated,
        }
    }
}

/// Node sequence of the cycle rotated to start at its smallest node.
pub fn canonical_form<N: Clone + Ord, A>(cycle: &Cycle<N, A>) -> Vec<N> {
    let nodes = cycle.nodes();
    let start = nodes
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map_or(0, |(position, _)| position);
    nodes[start..]
        .iter()
        .chain(&nodes[..start])
        .map(|&n| n.clone())
        .collect()
}

/// Assemble the slice graph of `dependencies` and enumerate all of its
/// elementary cycles.
pub fn dependency_cycles<S>(
    dependencies: &[Dependency],
    assignment: S,
) -> Result<Vec<Cycle<S::Slice, Dependency>>, ConfigurationError>
where
    S: SliceAssignment,
    S::Slice: Clone + Ord + Hash,
{
    let graph = GraphBuilder::new(assignment).build(dependencies)?;
    Ok(CycleDetector::new().find_cycles(&graph).cycles)
}

/// Backtracking walk from one start node through higher-ranked nodes of its
/// component.
struct Walker<'g, N, A> {
    graph: &'g SliceGraph<N, A>,
    rank: &'g HashMap<NodeIndex, usize>,
    start: NodeIndex,
    start_rank: usize,
}

struct Frame<'g, N, A> {
    node: NodeIndex,
    successors: Vec<(NodeIndex, &'g Edge<N, A>)>,
    next: usize,
}

impl<'g, N: Clone + Eq + Hash, A> Walker<'g, N, A> {
    /// Reports each closed walk back to the start node. Returns false as soon
    /// as `emit` asks to stop.
    fn walk(&self, mut emit: impl FnMut(Vec<&'g Edge<N, A>>) -> bool) -> bool {
        let mut path: Vec<&'g Edge<N, A>> = Vec::new();
        let mut on_path: HashSet<NodeIndex> = HashSet::from([self.start]);
        let mut stack = vec![self.frame(self.start)];

        while let Some(frame) = stack.last_mut() {
            let step = frame.successors.get(frame.next).copied();
            frame.next += 1;

            match step {
                None => {
                    let node = frame.node;
                    stack.pop();
                    on_path.remove(&node);
                    path.pop();
                }
                Some((target, edge)) if target == self.start => {
                    let mut edges = path.clone();
                    edges.push(edge);
                    if !emit(edges) {
                        return false;
                    }
                }
                Some((target, edge)) => {
                    if on_path.insert(target) {
                        path.push(edge);
                        stack.push(self.frame(target));
                    }
                }
            }
        }
        true
    }

    /// Successors within the component that rank at or above the start,
    /// in rank order. Self-loops never take part in an elementary cycle.
    fn frame(&self, node: NodeIndex) -> Frame<'g, N, A> {
        let mut successors: Vec<(NodeIndex, &'g Edge<N, A>)> = self
            .graph
            .outgoing(node)
            .filter(|(target, _)| *target != node)
            .filter(|(target, _)| {
                self.rank
                    .get(target)
                    .is_some_and(|&rank| rank >= self.start_rank)
            })
            .collect();
        successors.sort_by_key(|(target, _)| self.rank.get(target).copied());
        Frame {
            node,
            successors,
            next: 0,
        }
    }
}
