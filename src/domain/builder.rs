use crate::domain::dependency::Dependency;
use crate::domain::edge::Edge;
use crate::domain::error::ConfigurationError;
use crate::domain::graph::{SliceGraph, consolidate};
use crate::domain::model::CodeUnit;
use crate::domain::ports::SliceAssignment;
use std::hash::Hash;
use tracing::{debug, instrument};

/// Graph builder - Domain Service for assembling a slice-level dependency graph
pub struct GraphBuilder<S> {
    assignment: S,
}

impl<S> GraphBuilder<S>
where
    S: SliceAssignment,
    S::Slice: Clone + Eq + Hash,
{
    pub fn new(assignment: S) -> Self {
        Self { assignment }
    }

    /// Three-pass build strategy
    ///
    /// Every origin and target must be assigned to a slice; an unassigned code
    /// unit means the slice function is inconsistent with the dependency set
    /// and fails the build.
    #[instrument(skip_all, fields(dependencies = dependencies.len()))]
    pub fn build(
        &self,
        dependencies: &[Dependency],
    ) -> Result<SliceGraph<S::Slice, Dependency>, ConfigurationError> {
        // Pass 1: Projection onto slices, dropping self projections
        let mut projected = Vec::with_capacity(dependencies.len());
        for dependency in dependencies {
            let from = self.slice_of(dependency.origin())?;
            let to = self.slice_of(dependency.target())?;
            if from != to {
                projected.push(Edge::new(from, to, vec![dependency.clone()]));
            }
        }

        // Pass 2: Consolidation of parallel edges
        let edges = consolidate(projected);

        // Pass 3: Adjacency wiring
        let mut graph = SliceGraph::new();
        for edge in edges {
            graph.add_edge(edge);
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "assembled slice graph"
        );
        Ok(graph)
    }

    fn slice_of(&self, unit: &CodeUnit) -> Result<S::Slice, ConfigurationError> {
        self.assignment
            .slice_of(unit)
            .ok_or_else(|| ConfigurationError::UnassignedCodeUnit {
                name: unit.name().to_string(),
            })
    }
}
