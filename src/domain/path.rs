//! Chains of edges: [`Path`] and its closed special case [`Cycle`].

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::domain::convertible::Convertible;
use crate::domain::edge::Edge;
use crate::domain::error::ConfigurationError;

/// Ordered edges where every edge starts at the node the previous one ends at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path<N, A> {
    edges: Vec<Edge<N, A>>,
}

impl<N: PartialEq + Debug, A> Path<N, A> {
    pub fn new(edges: Vec<Edge<N, A>>) -> Result<Self, ConfigurationError> {
        for (index, pair) in edges.windows(2).enumerate() {
            if pair[0].to() != pair[1].from() {
                return Err(ConfigurationError::BrokenChain {
                    index,
                    next: index + 1,
                    to: format!("{:?}", pair[0].to()),
                    from: format!("{:?}", pair[1].from()),
                });
            }
        }
        Ok(Self { edges })
    }
}

impl<N, A> Path<N, A> {
    pub fn edges(&self) -> &[Edge<N, A>] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Nodes along the path, including the final target.
    pub fn nodes(&self) -> Vec<&N> {
        let mut nodes: Vec<&N> = self.edges.iter().map(|e| e.from()).collect();
        if let Some(last) = self.edges.last() {
            nodes.push(last.to());
        }
        nodes
    }

    pub fn into_edges(self) -> Vec<Edge<N, A>> {
        self.edges
    }
}

/// A closed path of at least two edges.
///
/// A single self-loop is rejected: it never describes a cycle between
/// distinct components.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cycle<N, A> {
    path: Path<N, A>,
}

impl<N: PartialEq + Debug, A> Cycle<N, A> {
    pub fn new(edges: Vec<Edge<N, A>>) -> Result<Self, ConfigurationError> {
        let path = Path::new(edges)?;
        let closed = match (path.edges.first(), path.edges.last()) {
            (Some(first), Some(last)) => path.len() >= 2 && last.to() == first.from(),
            _ => false,
        };
        if !closed {
            return Err(ConfigurationError::NotACycle {
                edges: describe_edges(path.edges()),
            });
        }
        Ok(Self { path })
    }
}

impl<N, A> Cycle<N, A> {
    /// For walks the caller already knows to be chained and closed.
    pub(crate) fn closed_unchecked(edges: Vec<Edge<N, A>>) -> Self {
        debug_assert!(edges.len() >= 2);
        Self {
            path: Path { edges },
        }
    }

    pub fn edges(&self) -> &[Edge<N, A>] {
        self.path.edges()
    }

    pub fn path(&self) -> &Path<N, A> {
        &self.path
    }

    /// Nodes in cycle order, without repeating the start node at the end.
    pub fn nodes(&self) -> Vec<&N> {
        self.path.edges.iter().map(|e| e.from()).collect()
    }

    /// Union of the evidence every attachment yields for `T`, visiting edges
    /// in cycle order and attachments in edge order.
    pub fn convert_to<T>(&self) -> HashSet<T>
    where
        A: Convertible<T>,
        T: Eq + Hash,
    {
        let mut converted = HashSet::new();
        for edge in self.path.edges() {
            for attachment in edge.attachments() {
                converted.extend(attachment.convert_to());
            }
        }
        converted
    }
}

fn describe_edges<N: Debug, A>(edges: &[Edge<N, A>]) -> String {
    let parts: Vec<String> = edges
        .iter()
        .map(|e| format!("{:?} -> {:?}", e.from(), e.to()))
        .collect();
    format!("[{}]", parts.join(", "))
}
