use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

use crate::error::Result;
use crate::position::{Position, PositionKind};
use crate::sequence::PackedPositionSequence;

/// Metadata and constructor for positions of type `P`.
///
/// Factories are plain values. They carry no state apart from the position type, so they can be created wherever
/// they are needed instead of being looked up in a registry.
pub struct PositionFactory<P> {
    phantom: PhantomData<fn() -> P>,
}

impl<P: Position> PositionFactory<P> {
    /// Creates a factory for `P`.
    pub const fn new() -> Self {
        Self {
            phantom: PhantomData,
        }
    }

    /// Variant of the produced positions.
    pub fn kind(&self) -> PositionKind {
        P::KIND
    }

    /// Number of coordinates in the produced positions.
    pub fn coordinate_dimension(&self) -> usize {
        P::KIND.coordinate_dimension()
    }

    /// Whether produced positions have a vertical component.
    pub fn has_vertical_component(&self) -> bool {
        P::KIND.has_vertical()
    }

    /// Whether produced positions have a measure.
    pub fn has_measure_component(&self) -> bool {
        P::KIND.has_measure()
    }

    /// Index of the measure component, if any.
    pub fn measure_index(&self) -> Option<usize> {
        P::KIND.measure_index()
    }

    /// Index of the vertical component, if any.
    pub fn vertical_index(&self) -> Option<usize> {
        P::KIND.vertical_index()
    }

    /// Creates a position from zero or exactly [`Self::coordinate_dimension`] coordinates.
    pub fn mk_position(&self, coords: &[f64]) -> Result<P> {
        P::from_coords(coords)
    }

    /// The empty position.
    pub fn empty(&self) -> P {
        P::empty()
    }

    /// Creates a packed sequence from a flat coordinate array.
    pub fn mk_sequence(&self, coords: Vec<f64>) -> Result<PackedPositionSequence<P>> {
        PackedPositionSequence::try_new(coords)
    }
}

impl<P: Position> Default for PositionFactory<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for PositionFactory<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for PositionFactory<P> {}

impl<P: Position> Debug for PositionFactory<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PositionFactory<{}>", P::KIND)
    }
}
