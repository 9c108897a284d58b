/// Directed edge from one node to another, carrying the attachments that
/// explain why it exists.
///
/// Equality includes the attachments, so parallel edges with different
/// payloads are distinct values. Merging parallel edges is an explicit step
/// (see [`crate::domain::graph::consolidate`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge<N, A> {
    from: N,
    to: N,
    attachments: Vec<A>,
}

impl<N, A> Edge<N, A> {
    /// `attachments` must not be empty: an edge exists because of them.
    pub fn new(from: N, to: N, attachments: Vec<A>) -> Self {
        debug_assert!(!attachments.is_empty(), "edge without attachments");
        Self {
            from,
            to,
            attachments,
        }
    }

    pub fn from(&self) -> &N {
        &self.from
    }

    pub fn to(&self) -> &N {
        &self.to
    }

    /// Attachments in discovery order.
    pub fn attachments(&self) -> &[A] {
        &self.attachments
    }

    pub fn into_parts(self) -> (N, N, Vec<A>) {
        (self.from, self.to, self.attachments)
    }

    pub(crate) fn merge(&mut self, attachments: Vec<A>) {
        self.attachments.extend(attachments);
    }
}

impl<N: PartialEq, A> Edge<N, A> {
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}
