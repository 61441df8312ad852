//! Ordered, immutable collections of same-variant positions.
//!
//! A [`PositionSequence`] uses one of two storage strategies:
//! * [`PackedPositionSequence`] - one flat coordinate array with O(1) random access. Used by leaf geometries
//!   (points, line strings, rings).
//! * [`NestedPositionSequence`] - concatenation of other sequences. Used by composite geometries (polygons and
//!   collections) to expose the coordinates of all their parts without copying them.
//!
//! Sequences are built with one of the [builders](PositionSequenceBuilders).

use std::fmt::{Debug, Formatter};

use crate::error::Result;
use crate::position::{Position, PositionKind};

mod builder;
mod nested;
mod packed;

pub use builder::{
    FixedSizePositionSequenceBuilder, PositionSequenceBuilder, PositionSequenceBuilders,
    VariableSizePositionSequenceBuilder,
};
pub use nested::NestedPositionSequence;
pub use packed::PackedPositionSequence;

/// Ordered, immutable collection of positions of type `P`.
pub enum PositionSequence<P> {
    /// Flat coordinate array.
    Packed(PackedPositionSequence<P>),
    /// Concatenation of child sequences.
    Nested(NestedPositionSequence<P>),
}

impl<P: Position> PositionSequence<P> {
    /// Empty packed sequence.
    pub fn empty() -> Self {
        Self::Packed(PackedPositionSequence::empty())
    }

    /// Creates a packed sequence from a flat coordinate array.
    pub fn from_coordinates(coords: Vec<f64>) -> Result<Self> {
        Ok(Self::Packed(PackedPositionSequence::try_new(coords)?))
    }

    /// Creates a packed sequence by copying the given positions.
    pub fn from_positions(positions: &[P]) -> Result<Self> {
        Ok(Self::Packed(PackedPositionSequence::from_positions(
            positions,
        )?))
    }

    /// Creates a nested sequence concatenating the given children.
    pub fn nested(children: Vec<PositionSequence<P>>) -> Self {
        Self::Nested(NestedPositionSequence::new(children))
    }

    /// Variant of the positions in the sequence.
    pub fn kind(&self) -> PositionKind {
        P::KIND
    }

    /// Coordinate dimension of the positions in the sequence.
    pub fn coordinate_dimension(&self) -> usize {
        P::KIND.coordinate_dimension()
    }

    /// Number of positions.
    pub fn size(&self) -> usize {
        match self {
            Self::Packed(v) => v.size(),
            Self::Nested(v) => v.size(),
        }
    }

    /// Returns true if the sequence has no positions.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns the position with the given index.
    pub fn get(&self, index: usize) -> Result<P> {
        match self {
            Self::Packed(v) => v.get(index),
            Self::Nested(v) => v.get(index),
        }
    }

    /// Copies coordinates of the position with the given index into `buffer`.
    pub fn get_coordinates(&self, index: usize, buffer: &mut [f64]) -> Result<()> {
        match self {
            Self::Packed(v) => v.get_coordinates(index, buffer),
            Self::Nested(v) => v.get_coordinates(index, buffer),
        }
    }

    /// Returns a single ordinate of the position with the given index.
    pub fn get_ordinate(&self, index: usize, ordinate: usize) -> Result<f64> {
        match self {
            Self::Packed(v) => v.get_ordinate(index, ordinate),
            Self::Nested(v) => v.get_ordinate(index, ordinate),
        }
    }

    /// Returns a copy of the sequence with one ordinate replaced.
    pub fn with_ordinate(&self, index: usize, ordinate: usize, value: f64) -> Result<Self> {
        Ok(match self {
            Self::Packed(v) => Self::Packed(v.with_ordinate(index, ordinate, value)?),
            Self::Nested(v) => Self::Nested(v.with_ordinate(index, ordinate, value)?),
        })
    }

    /// First position, if any.
    pub fn first(&self) -> Option<P> {
        self.iter().next()
    }

    /// Last position, if any.
    pub fn last(&self) -> Option<P> {
        let size = self.size();
        if size == 0 {
            None
        } else {
            self.get(size - 1).ok()
        }
    }

    /// Returns a new sequence with the positions in reverse order.
    pub fn reverse(&self) -> Self {
        match self {
            Self::Packed(v) => Self::Packed(v.reverse()),
            Self::Nested(v) => Self::Nested(v.reverse()),
        }
    }

    /// Packed leaves of the sequence in iteration order.
    pub fn leaves(&self) -> &[PackedPositionSequence<P>] {
        match self {
            Self::Packed(v) => std::slice::from_ref(v),
            Self::Nested(v) => v.leaves(),
        }
    }

    /// Iterates over all the positions of the sequence.
    pub fn iter(&self) -> impl Iterator<Item = P> + '_ {
        self.leaves().iter().flat_map(|leaf| leaf.iter())
    }

    /// Copies all the coordinates into a single packed sequence.
    pub fn to_packed(&self) -> PackedPositionSequence<P> {
        match self {
            Self::Packed(v) => v.clone(),
            Self::Nested(v) => {
                let mut coords =
                    Vec::with_capacity(v.size() * P::KIND.coordinate_dimension());
                for leaf in v.leaves() {
                    coords.extend_from_slice(leaf.coordinates());
                }
                PackedPositionSequence::from_validated(coords)
            }
        }
    }
}

impl<P> Clone for PositionSequence<P> {
    fn clone(&self) -> Self {
        match self {
            Self::Packed(v) => Self::Packed(v.clone()),
            Self::Nested(v) => Self::Nested(v.clone()),
        }
    }
}

impl<P: Position> PartialEq for PositionSequence<P> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.iter().eq(other.iter())
    }
}

impl<P: Position> Debug for PositionSequence<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Packed(v) => v.fmt(f),
            Self::Nested(v) => v.fmt(f),
        }
    }
}

impl<P: Position> Default for PositionSequence<P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<P> From<PackedPositionSequence<P>> for PositionSequence<P> {
    fn from(value: PackedPositionSequence<P>) -> Self {
        Self::Packed(value)
    }
}

impl<P> From<NestedPositionSequence<P>> for PositionSequence<P> {
    fn from(value: NestedPositionSequence<P>) -> Self {
        Self::Nested(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{C2D, C3D};

    #[test]
    fn packed_and_nested_compare_by_positions() {
        let packed = PositionSequence::<C2D>::from_coordinates(vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0])
            .expect("valid");
        let nested = PositionSequence::nested(vec![
            PositionSequence::from_coordinates(vec![0.0, 0.0]).expect("valid"),
            PositionSequence::from_coordinates(vec![1.0, 1.0, 2.0, 2.0]).expect("valid"),
        ]);
        assert_eq!(packed, nested);
        assert_eq!(nested.to_packed(), packed.to_packed());
        assert_eq!(nested.first(), Some(C2D::new(0.0, 0.0)));
        assert_eq!(nested.last(), Some(C2D::new(2.0, 2.0)));
    }

    #[test]
    fn empty_sequence() {
        let seq = PositionSequence::<C3D>::empty();
        assert!(seq.is_empty());
        assert_eq!(seq.first(), None);
        assert_eq!(seq.last(), None);
        assert_eq!(seq.coordinate_dimension(), 3);
        assert_eq!(seq.iter().count(), 0);
    }
}
