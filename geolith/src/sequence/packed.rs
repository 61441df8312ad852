use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{GeometryError, Result};
use crate::position::{bitwise_eq, Position};

/// Sequence of positions stored in one flat coordinate array.
///
/// Coordinates are interleaved: the array holds `size * dimension` values, position `i` occupying
/// `[i * dimension, (i + 1) * dimension)`. The array is shared between clones, so wrapping the same sequence into
/// several geometries does not copy coordinates.
pub struct PackedPositionSequence<P> {
    coords: Arc<[f64]>,
    phantom: PhantomData<fn() -> P>,
}

impl<P: Position> PackedPositionSequence<P> {
    /// Creates a new sequence from a flat coordinate array.
    ///
    /// # Errors
    ///
    /// - if the length of the array is not a multiple of the coordinate dimension of `P`
    pub fn try_new(coords: impl Into<Arc<[f64]>>) -> Result<Self> {
        let coords = coords.into();
        let dimension = P::KIND.coordinate_dimension();
        if coords.len() % dimension != 0 {
            return Err(GeometryError::InvalidArgument(format!(
                "coordinate array of length {} is not a multiple of {} dimension {dimension}",
                coords.len(),
                P::KIND
            )));
        }

        Ok(Self {
            coords,
            phantom: PhantomData,
        })
    }

    /// Wraps coordinates concatenated from already validated sequences.
    pub(crate) fn from_validated(coords: Vec<f64>) -> Self {
        debug_assert_eq!(coords.len() % P::KIND.coordinate_dimension(), 0);
        Self {
            coords: coords.into(),
            phantom: PhantomData,
        }
    }

    /// Creates an empty sequence.
    pub fn empty() -> Self {
        Self {
            coords: Arc::from(Vec::new()),
            phantom: PhantomData,
        }
    }

    /// Creates a sequence by copying the coordinates of the given positions.
    ///
    /// # Errors
    ///
    /// - if any of the positions is empty
    pub fn from_positions(positions: &[P]) -> Result<Self> {
        let mut coords = Vec::with_capacity(positions.len() * P::KIND.coordinate_dimension());
        for position in positions {
            if position.is_empty() {
                return Err(GeometryError::invalid(
                    "empty position cannot be stored in a sequence",
                ));
            }
            coords.extend_from_slice(position.coords());
        }

        Self::try_new(coords)
    }

    /// Number of positions in the sequence.
    pub fn size(&self) -> usize {
        self.coords.len() / P::KIND.coordinate_dimension()
    }

    /// Returns true if the sequence has no positions.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Flat coordinate array of the sequence.
    pub fn coordinates(&self) -> &[f64] {
        &self.coords
    }

    fn offset(&self, index: usize) -> Result<usize> {
        let size = self.size();
        if index >= size {
            return Err(GeometryError::IndexOutOfRange { index, size });
        }

        Ok(index * P::KIND.coordinate_dimension())
    }

    /// Returns the position with the given index.
    pub fn get(&self, index: usize) -> Result<P> {
        let start = self.offset(index)?;
        Ok(P::from_fn(|i| self.coords[start + i]))
    }

    /// Copies coordinates of the position with the given index into `buffer`.
    ///
    /// # Errors
    ///
    /// - if the index is out of range
    /// - if the buffer is shorter than the coordinate dimension
    pub fn get_coordinates(&self, index: usize, buffer: &mut [f64]) -> Result<()> {
        let start = self.offset(index)?;
        let dimension = P::KIND.coordinate_dimension();
        if buffer.len() < dimension {
            return Err(GeometryError::InvalidArgument(format!(
                "buffer of length {} cannot hold {dimension} coordinates",
                buffer.len()
            )));
        }

        buffer[..dimension].copy_from_slice(&self.coords[start..start + dimension]);
        Ok(())
    }

    /// Returns a single ordinate of the position with the given index.
    pub fn get_ordinate(&self, index: usize, ordinate: usize) -> Result<f64> {
        let start = self.offset(index)?;
        check_ordinate::<P>(ordinate)?;
        Ok(self.coords[start + ordinate])
    }

    /// Returns a copy of the sequence with one ordinate replaced.
    pub fn with_ordinate(&self, index: usize, ordinate: usize, value: f64) -> Result<Self> {
        let start = self.offset(index)?;
        check_ordinate::<P>(ordinate)?;
        let mut coords = self.coords.to_vec();
        coords[start + ordinate] = value;
        Self::try_new(coords)
    }

    /// Returns a new sequence with the positions in reverse order.
    pub fn reverse(&self) -> Self {
        let dimension = P::KIND.coordinate_dimension();
        let mut coords = Vec::with_capacity(self.coords.len());
        for chunk in self.coords.chunks_exact(dimension).rev() {
            coords.extend_from_slice(chunk);
        }

        Self {
            coords: coords.into(),
            phantom: PhantomData,
        }
    }

    /// Iterates over the positions of the sequence.
    pub fn iter(&self) -> impl Iterator<Item = P> + '_ {
        self.coords
            .chunks_exact(P::KIND.coordinate_dimension())
            .map(|chunk| P::from_fn(|i| chunk[i]))
    }
}

pub(crate) fn check_ordinate<P: Position>(ordinate: usize) -> Result<()> {
    let dimension = P::KIND.coordinate_dimension();
    if ordinate >= dimension {
        return Err(GeometryError::InvalidArgument(format!(
            "ordinate {ordinate} does not exist in {} positions",
            P::KIND
        )));
    }

    Ok(())
}

impl<P> Clone for PackedPositionSequence<P> {
    fn clone(&self) -> Self {
        Self {
            coords: self.coords.clone(),
            phantom: PhantomData,
        }
    }
}

impl<P: Position> PartialEq for PackedPositionSequence<P> {
    fn eq(&self, other: &Self) -> bool {
        bitwise_eq(&self.coords, &other.coords)
    }
}

impl<P: Position> Debug for PackedPositionSequence<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackedPositionSequence")
            .field("kind", &P::KIND)
            .field("coords", &self.coords)
            .finish()
    }
}
