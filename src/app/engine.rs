use crate::app::config::CycleConfig;
use crate::domain::builder::GraphBuilder;
use crate::domain::cycles::CycleDetector;
use crate::domain::dependency::Dependency;
use crate::domain::model::ClassSet;
use crate::domain::path::Cycle;
use crate::domain::ports::SliceAssignment;
use anyhow::{Context as _, Result};
use std::hash::Hash;
use tracing::{debug, instrument};

/// Outcome of a cycle check.
#[derive(Debug, Clone)]
pub struct CycleCheckResult<N> {
    /// Cycles in canonical order.
    pub cycles: Vec<Cycle<N, Dependency>>,
    /// True if `max_cycles` cut the enumeration short.
    pub truncated: bool,
}

impl<N> CycleCheckResult<N> {
    pub fn is_free_of_cycles(&self) -> bool {
        self.cycles.is_empty()
    }
}

/// Runs a "slices should be free of cycles" check over an imported class set.
#[derive(Debug, Clone, Default)]
pub struct CycleCheck {
    config: CycleConfig,
}

impl CycleCheck {
    pub fn new(config: CycleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    /// Derive the dependencies of `classes`, keep those between units of the
    /// slice universe, and enumerate the cycles of the resulting slice graph.
    #[instrument(skip_all, fields(units = classes.len()))]
    pub fn run<S>(&self, classes: &ClassSet, assignment: S) -> Result<CycleCheckResult<S::Slice>>
    where
        S: SliceAssignment,
        S::Slice: Clone + Ord + Hash,
    {
        let dependencies = classes
            .direct_dependencies()
            .context("Failed to derive dependencies")?;
        let total = dependencies.len();

        let in_universe: Vec<Dependency> = dependencies
            .into_iter()
            .filter(|d| {
                assignment.slice_of(d.origin()).is_some()
                    && assignment.slice_of(d.target()).is_some()
            })
            .collect();
        debug!(
            total,
            in_universe = in_universe.len(),
            "filtered dependencies to slice universe"
        );

        let graph = GraphBuilder::new(assignment)
            .build(&in_universe)
            .context("Failed to assemble slice graph")?;
        let search = CycleDetector::with_max_cycles(self.config.max_cycles).find_cycles(&graph);

        Ok(CycleCheckResult {
            cycles: search.cycles,
            truncated: search.truncated,
        })
    }
}
