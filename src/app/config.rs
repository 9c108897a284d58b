use serde::{Deserialize, Serialize};

/// Tuning knobs for a cycle check. The defaults report every cycle with every
/// dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    /// Stop enumerating after this many cycles.
    pub max_cycles: Option<usize>,
    /// Number of dependency descriptions rendered per edge of a cycle.
    pub max_dependencies_per_edge: Option<usize>,
}

impl CycleConfig {
    pub fn with_max_cycles(mut self, max_cycles: usize) -> Self {
        self.max_cycles = Some(max_cycles);
        self
    }

    pub fn with_max_dependencies_per_edge(mut self, max: usize) -> Self {
        self.max_dependencies_per_edge = Some(max);
        self
    }
}
