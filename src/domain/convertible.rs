//! Capability probe for recovering richer-typed evidence from graph attachments.
//!
//! An attachment implements [`Convertible<T>`] for every evidence type it may be
//! able to produce. Whether a particular instance actually carries such
//! evidence is decided at runtime: a miss yields an empty set, never an error.

use std::collections::HashSet;
use std::hash::Hash;

pub trait Convertible<T: Eq + Hash> {
    /// Evidence of type `T` backing this value; empty if there is none.
    fn convert_to(&self) -> HashSet<T>;
}
