use thiserror::Error;

/// Fatal errors raised while constructing graph primitives or assembling a
/// dependency graph. These indicate a broken rule definition or an
/// inconsistent importer and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("broken chain: edge {index} ends at {to} but edge {next} starts at {from}")]
    BrokenChain {
        index: usize,
        next: usize,
        to: String,
        from: String,
    },

    #[error("edge list {edges} does not form a cycle")]
    NotACycle { edges: String },

    #[error("could not determine dependency type for {access}; this is most likely a bug")]
    UnmappedAccess { access: String },

    #[error("code unit {name} is not assigned to any slice")]
    UnassignedCodeUnit { name: String },

    #[error("{member} is not a method or constructor")]
    NotInvocable { member: String },
}
