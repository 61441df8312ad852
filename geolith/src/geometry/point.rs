use crate::crs::Crs;
use crate::geometry::{Geometric, GeometryType};
use crate::position::Position;
use crate::sequence::{PackedPositionSequence, PositionSequence};

/// Zero-dimensional geometry with a single position. The empty point has no positions at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Point<P: Position> {
    positions: PositionSequence<P>,
    crs: Crs<P>,
}

impl<P: Position> Point<P> {
    /// Creates a point. An empty position creates the empty point.
    pub fn new(position: P, crs: Crs<P>) -> Self {
        let positions = if position.is_empty() {
            PositionSequence::empty()
        } else {
            PositionSequence::Packed(PackedPositionSequence::from_validated(
                position.coords().to_vec(),
            ))
        };

        Self { positions, crs }
    }

    /// Creates the empty point.
    pub fn empty(crs: Crs<P>) -> Self {
        Self {
            positions: PositionSequence::empty(),
            crs,
        }
    }

    /// Position of the point. The empty position for the empty point.
    pub fn position(&self) -> P {
        self.positions.first().unwrap_or_else(P::empty)
    }
}

impl<P: Position> Geometric<P> for Point<P> {
    fn crs(&self) -> &Crs<P> {
        &self.crs
    }

    fn positions(&self) -> &PositionSequence<P> {
        &self.positions
    }

    fn geometry_type(&self) -> GeometryType {
        GeometryType::Point
    }

    fn dimension(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::G2D;

    #[test]
    fn empty_point() {
        let point = Point::new(G2D::empty(), Crs::wgs84());
        assert!(point.is_empty());
        assert_eq!(point.num_positions(), 0);
        assert!(point.position().is_empty());
        assert_eq!(point, Point::empty(Crs::wgs84()));
    }

    #[test]
    fn single_position() {
        let point = Point::new(G2D::new(4.35, 50.85), Crs::wgs84());
        assert_eq!(point.num_positions(), 1);
        assert_eq!(point.position(), G2D::new(4.35, 50.85));
        assert_eq!(point.dimension(), 0);
    }
}
