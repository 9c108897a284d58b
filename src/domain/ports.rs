use crate::domain::model::{ClassSet, CodeUnit};
use anyhow::Result;

/// Class model source port (implemented by Infrastructure)
pub trait ModelSource {
    fn load(&self) -> Result<ClassSet>;
}

/// Slice function: assigns code units to graph nodes.
///
/// `None` means the unit lies outside the slice universe. Any closure
/// `Fn(&CodeUnit) -> Option<N>` is a slice assignment.
pub trait SliceAssignment {
    type Slice;

    fn slice_of(&self, unit: &CodeUnit) -> Option<Self::Slice>;
}

impl<N, F> SliceAssignment for F
where
    F: Fn(&CodeUnit) -> Option<N>,
{
    type Slice = N;

    fn slice_of(&self, unit: &CodeUnit) -> Option<N> {
        self(unit)
    }
}
