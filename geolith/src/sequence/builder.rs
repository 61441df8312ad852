use std::marker::PhantomData;

use crate::error::{GeometryError, Result};
use crate::position::Position;
use crate::sequence::{PackedPositionSequence, PositionSequence};

/// Accumulates positions and freezes them into an immutable [`PositionSequence`].
///
/// Builders are single-owner accumulators. The finished sequence does not share any state with the builder.
pub trait PositionSequenceBuilder<P: Position> {
    /// Appends a position.
    ///
    /// # Errors
    ///
    /// - if the position is empty
    /// - if the builder cannot accept more positions
    fn add(&mut self, position: &P) -> Result<&mut Self>;

    /// Appends a position given by its coordinates.
    fn add_coordinates(&mut self, coords: &[f64]) -> Result<&mut Self> {
        let position = P::from_coords(coords)?;
        self.add(&position)
    }

    /// Number of positions added so far.
    fn num_positions(&self) -> usize;

    /// Finishes the builder.
    fn to_position_sequence(self) -> Result<PositionSequence<P>>
    where
        Self: Sized;
}

fn check_not_empty<P: Position>(position: &P) -> Result<()> {
    if position.is_empty() {
        Err(GeometryError::invalid(
            "empty position cannot be added to a sequence",
        ))
    } else {
        Ok(())
    }
}

/// Builder expecting an exact number of positions declared up front.
#[derive(Debug, Clone)]
pub struct FixedSizePositionSequenceBuilder<P> {
    expected: usize,
    coords: Vec<f64>,
    phantom: PhantomData<fn() -> P>,
}

impl<P: Position> FixedSizePositionSequenceBuilder<P> {
    /// Creates a builder for exactly `expected` positions.
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            coords: Vec::with_capacity(expected * P::KIND.coordinate_dimension()),
            phantom: PhantomData,
        }
    }

    /// Number of positions the builder expects.
    pub fn expected_size(&self) -> usize {
        self.expected
    }
}

impl<P: Position> PositionSequenceBuilder<P> for FixedSizePositionSequenceBuilder<P> {
    fn add(&mut self, position: &P) -> Result<&mut Self> {
        check_not_empty(position)?;
        if self.num_positions() >= self.expected {
            return Err(GeometryError::IllegalState(format!(
                "builder declared for {} positions is already full",
                self.expected
            )));
        }

        self.coords.extend_from_slice(position.coords());
        Ok(self)
    }

    fn num_positions(&self) -> usize {
        self.coords.len() / P::KIND.coordinate_dimension()
    }

    fn to_position_sequence(self) -> Result<PositionSequence<P>> {
        let added = self.num_positions();
        if added != self.expected {
            return Err(GeometryError::IllegalState(format!(
                "builder declared for {} positions has only {added}",
                self.expected
            )));
        }

        Ok(PositionSequence::Packed(
            PackedPositionSequence::from_validated(self.coords),
        ))
    }
}

/// Builder that grows its buffer as positions are added and can be finished at any time.
///
/// The buffer grows geometrically, so appending is amortized O(1).
#[derive(Debug, Clone)]
pub struct VariableSizePositionSequenceBuilder<P> {
    coords: Vec<f64>,
    phantom: PhantomData<fn() -> P>,
}

impl<P: Position> VariableSizePositionSequenceBuilder<P> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty builder with space reserved for `capacity` positions.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            coords: Vec::with_capacity(capacity * P::KIND.coordinate_dimension()),
            phantom: PhantomData,
        }
    }

    /// Returns true if no positions were added.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// The last added position.
    pub fn last(&self) -> Option<P> {
        let dimension = P::KIND.coordinate_dimension();
        if self.coords.is_empty() {
            return None;
        }

        let start = self.coords.len() - dimension;
        Some(P::from_fn(|i| self.coords[start + i]))
    }

    /// Takes the accumulated positions out, leaving the builder empty and ready for reuse.
    pub fn take(&mut self) -> PositionSequence<P> {
        PositionSequence::Packed(PackedPositionSequence::from_validated(
            std::mem::take(&mut self.coords),
        ))
    }
}

impl<P: Position> Default for VariableSizePositionSequenceBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Position> PositionSequenceBuilder<P> for VariableSizePositionSequenceBuilder<P> {
    fn add(&mut self, position: &P) -> Result<&mut Self> {
        check_not_empty(position)?;
        self.coords.extend_from_slice(position.coords());
        Ok(self)
    }

    fn num_positions(&self) -> usize {
        self.coords.len() / P::KIND.coordinate_dimension()
    }

    fn to_position_sequence(mut self) -> Result<PositionSequence<P>> {
        Ok(self.take())
    }
}

/// Entry point for creating sequence builders.
#[derive(Debug, Clone, Copy)]
pub struct PositionSequenceBuilders;

impl PositionSequenceBuilders {
    /// Builder for exactly `size` positions.
    pub fn fixed_sized<P: Position>(size: usize) -> FixedSizePositionSequenceBuilder<P> {
        FixedSizePositionSequenceBuilder::new(size)
    }

    /// Builder for any number of positions.
    pub fn variable_sized<P: Position>() -> VariableSizePositionSequenceBuilder<P> {
        VariableSizePositionSequenceBuilder::new()
    }
}
