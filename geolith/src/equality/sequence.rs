use crate::equality::{CoordinateScope, ExactPositionEquality, PositionEquality, TolerancePositionEquality};
use crate::error::{GeometryError, Result};
use crate::position::Position;
use crate::sequence::PositionSequence;

/// Sequences are equal if they have the same number of positions and the positions are pairwise equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceEquality<E> {
    positions: E,
    scope: CoordinateScope,
}

impl SequenceEquality<ExactPositionEquality> {
    /// Exact comparison of all coordinates.
    pub fn exact() -> Self {
        Self::new(ExactPositionEquality, CoordinateScope::All)
    }
}

impl SequenceEquality<TolerancePositionEquality> {
    /// Comparison of all coordinates within the given tolerance.
    pub fn tolerance(tolerance: f64) -> Self {
        Self::new(
            TolerancePositionEquality::new(tolerance),
            CoordinateScope::All,
        )
    }
}

impl<E: PositionEquality> SequenceEquality<E> {
    /// Creates a new comparator.
    pub fn new(positions: E, scope: CoordinateScope) -> Self {
        Self { positions, scope }
    }

    /// The same comparator restricted to the horizontal coordinates.
    pub fn horizontal(self) -> Self {
        Self {
            scope: CoordinateScope::Horizontal,
            ..self
        }
    }

    /// Comparator of single positions.
    pub fn position_equality(&self) -> &E {
        &self.positions
    }

    /// Coordinates taken into account.
    pub fn scope(&self) -> CoordinateScope {
        self.scope
    }

    /// Number of coordinates compared for positions of types `P` and `Q`.
    ///
    /// # Errors
    ///
    /// - if all coordinates are compared and the types are different variants. Variants of the same dimension
    ///   may still give different meanings to a coordinate (`z` of a `C3D` and `m` of a `C2DM`).
    pub(crate) fn dimension<P: Position, Q: Position>(&self) -> Result<usize> {
        match self.scope {
            CoordinateScope::Horizontal => Ok(2),
            CoordinateScope::All if P::KIND == Q::KIND => Ok(P::KIND.coordinate_dimension()),
            CoordinateScope::All => Err(GeometryError::InvalidArgument(format!(
                "cannot compare all coordinates of {} and {} positions",
                P::KIND,
                Q::KIND
            ))),
        }
    }

    /// Compares two sequences.
    ///
    /// # Errors
    ///
    /// - if all coordinates are compared and the sequences hold different position variants
    pub fn equals<P: Position, Q: Position>(
        &self,
        a: &PositionSequence<P>,
        b: &PositionSequence<Q>,
    ) -> Result<bool> {
        let dimension = self.dimension::<P, Q>()?;
        if a.size() != b.size() {
            return Ok(false);
        }

        for (pa, pb) in a.iter().zip(b.iter()) {
            if !self
                .positions
                .equals_coordinates(pa.coords(), pb.coords(), dimension)?
            {
                return Ok(false);
            }
        }

        Ok(true)
    }
}
