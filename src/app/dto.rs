use crate::domain::dependency::{Dependency, RelationKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleReportDto {
    pub cycles: Vec<CycleViolationDto>,
    /// True if the cycle limit cut enumeration short.
    pub truncated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleViolationDto {
    /// Slice descriptions in cycle order, the first repeated at the end.
    pub slices: Vec<String>,
    pub description: String,
    pub edges: Vec<EdgeDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeDto {
    pub from: String,
    pub to: String,
    pub dependencies: Vec<String>,
    /// Dependencies left out of `dependencies` by the per-edge limit.
    pub omitted: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyDto {
    pub kind: RelationKind,
    pub origin: String,
    pub target: String,
    pub line: u32,
    pub description: String,
}

impl From<&Dependency> for DependencyDto {
    fn from(dependency: &Dependency) -> Self {
        Self {
            kind: dependency.kind(),
            origin: dependency.origin().name().to_string(),
            target: dependency.target().name().to_string(),
            line: dependency.source_line(),
            description: dependency.description().to_string(),
        }
    }
}
