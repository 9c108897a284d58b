//! Violation messages for detected cycles.
//!
//! ```text
//! Cycle detected: Slice a -> Slice b -> Slice a
//!   1. Dependencies of Slice a
//!     - Method <a.A.run()> calls method <b.B.go()> in (A.java:7)
//!   2. Dependencies of Slice b
//!     - Field <b.B.a> has type <a.A> in (B.java:0)
//!     (2 more dependencies)
//! ```

use crate::app::config::CycleConfig;
use crate::app::dto::{CycleViolationDto, EdgeDto};
use crate::domain::dependency::Dependency;
use crate::domain::path::Cycle;
use crate::domain::slice::Slice;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleDescription {
    /// Slice descriptions in cycle order, the first repeated at the end.
    pub slices: Vec<String>,
    pub edges: Vec<EdgeDescription>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeDescription {
    pub from: String,
    pub to: String,
    /// Dependency descriptions in dependency order.
    pub dependencies: Vec<String>,
    pub omitted: usize,
}

impl CycleDescription {
    pub fn header(&self) -> String {
        format!("Cycle detected: {}", self.slices.join(" -> "))
    }
}

pub fn describe_cycle(cycle: &Cycle<Slice, Dependency>, config: &CycleConfig) -> CycleDescription {
    let mut slices: Vec<String> = cycle
        .nodes()
        .iter()
        .map(|slice| slice.description().to_string())
        .collect();
    if let Some(first) = slices.first().cloned() {
        slices.push(first);
    }

    let edges = cycle
        .edges()
        .iter()
        .map(|edge| {
            let mut dependencies: Vec<&Dependency> = edge.attachments().iter().collect();
            dependencies.sort();

            let shown = config
                .max_dependencies_per_edge
                .map_or(dependencies.len(), |max| max.min(dependencies.len()));
            EdgeDescription {
                from: edge.from().description().to_string(),
                to: edge.to().description().to_string(),
                dependencies: dependencies[..shown]
                    .iter()
                    .map(|d| d.description().to_string())
                    .collect(),
                omitted: dependencies.len() - shown,
            }
        })
        .collect();

    CycleDescription { slices, edges }
}

impl fmt::Display for CycleDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())?;
        for (i, edge) in self.edges.iter().enumerate() {
            write!(f, "\n  {}. Dependencies of {}", i + 1, edge.from)?;
            for dependency in &edge.dependencies {
                write!(f, "\n    - {dependency}")?;
            }
            if edge.omitted > 0 {
                write!(f, "\n    ({} more dependencies)", edge.omitted)?;
            }
        }
        Ok(())
    }
}

impl From<CycleDescription> for CycleViolationDto {
    fn from(description: CycleDescription) -> Self {
        let header = description.header();
        Self {
            slices: description.slices,
            description: header,
            edges: description
                .edges
                .into_iter()
                .map(|edge| EdgeDto {
                    from: edge.from,
                    to: edge.to,
                    dependencies: edge.dependencies,
                    omitted: edge.omitted,
                })
                .collect(),
        }
    }
}
