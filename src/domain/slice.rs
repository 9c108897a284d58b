use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// A caller-defined group of code units, used as the node type of
/// component-level cycle checks.
///
/// Slices are identified and ordered by their identifier parts; the
/// description is what reports show.
#[derive(Debug, Clone, Serialize)]
pub struct Slice {
    identifier: Vec<String>,
    description: String,
}

impl Slice {
    /// Slice described as `Slice <parts joined by ".">`.
    pub fn new(identifier: Vec<String>) -> Self {
        let description = format!("Slice {}", identifier.join("."));
        Self {
            identifier,
            description,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn identifier(&self) -> &[String] {
        &self.identifier
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for Slice {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for Slice {}

impl Hash for Slice {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

impl PartialOrd for Slice {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Slice {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identifier.cmp(&other.identifier)
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}
