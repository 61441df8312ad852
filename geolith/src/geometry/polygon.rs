use crate::crs::Crs;
use crate::error::{GeometryError, Result};
use crate::geometry::{Geometric, GeometryType, LinearRing};
use crate::position::Position;
use crate::sequence::PositionSequence;

/// Planar surface bounded by one exterior ring and zero or more interior rings (holes).
///
/// The positions of the polygon are the positions of all its rings, exterior ring first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<P: Position> {
    rings: Vec<LinearRing<P>>,
    positions: PositionSequence<P>,
    crs: Crs<P>,
}

impl<P: Position> Polygon<P> {
    /// Creates a polygon from its rings, exterior ring first. An empty vector creates the empty polygon.
    ///
    /// # Errors
    ///
    /// - if any of the rings is empty
    /// - if any of the rings has a CRS different from `crs`
    pub fn new(rings: Vec<LinearRing<P>>, crs: Crs<P>) -> Result<Self> {
        for (index, ring) in rings.iter().enumerate() {
            if ring.is_empty() {
                return Err(GeometryError::InvalidArgument(format!(
                    "polygon ring {index} is empty"
                )));
            }
            if ring.crs() != &crs {
                return Err(GeometryError::InvalidArgument(format!(
                    "polygon ring {index} has CRS {}, expected {crs}",
                    ring.crs()
                )));
            }
        }

        let positions = if rings.is_empty() {
            PositionSequence::empty()
        } else {
            PositionSequence::nested(rings.iter().map(|r| r.positions().clone()).collect())
        };

        Ok(Self {
            rings,
            positions,
            crs,
        })
    }

    /// Creates a polygon without holes.
    pub fn from_exterior(exterior: LinearRing<P>) -> Result<Self> {
        let crs = exterior.crs().clone();
        Self::new(vec![exterior], crs)
    }

    /// The empty polygon.
    pub fn empty(crs: Crs<P>) -> Self {
        Self {
            rings: Vec::new(),
            positions: PositionSequence::empty(),
            crs,
        }
    }

    /// Exterior ring. `None` for the empty polygon.
    pub fn exterior_ring(&self) -> Option<&LinearRing<P>> {
        self.rings.first()
    }

    /// Interior rings.
    pub fn interior_rings(&self) -> &[LinearRing<P>] {
        self.rings.get(1..).unwrap_or(&[])
    }

    /// Number of interior rings.
    pub fn num_interior_rings(&self) -> usize {
        self.interior_rings().len()
    }

    /// All the rings, exterior ring first.
    pub fn rings(&self) -> &[LinearRing<P>] {
        &self.rings
    }
}

impl<P: Position> Geometric<P> for Polygon<P> {
    fn crs(&self) -> &Crs<P> {
        &self.crs
    }

    fn positions(&self) -> &PositionSequence<P> {
        &self.positions
    }

    fn geometry_type(&self) -> GeometryType {
        GeometryType::Polygon
    }

    fn dimension(&self) -> usize {
        2
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::crs::CrsId;
    use crate::position::C2D;

    fn square(crs: &Crs<C2D>, min: f64, max: f64) -> LinearRing<C2D> {
        LinearRing::from_positions(
            &[
                C2D::new(min, min),
                C2D::new(max, min),
                C2D::new(max, max),
                C2D::new(min, max),
                C2D::new(min, min),
            ],
            crs.clone(),
        )
        .expect("closed")
    }

    #[test]
    fn positions_are_rings_concatenated() {
        let crs = Crs::cartesian();
        let polygon =
            Polygon::new(vec![square(&crs, 0.0, 10.0), square(&crs, 2.0, 4.0)], crs).expect("valid");
        assert_eq!(polygon.num_positions(), 10);
        assert_eq!(polygon.num_interior_rings(), 1);
        assert_eq!(polygon.position_n(5).expect("in range"), C2D::new(2.0, 2.0));
        assert_matches!(polygon.positions(), PositionSequence::Nested(_));

        let envelope = polygon.envelope();
        assert_eq!(envelope.upper_right(), &C2D::new(10.0, 10.0));
    }

    #[test]
    fn rejects_bad_rings() {
        let crs = Crs::cartesian();
        assert_matches!(
            Polygon::new(vec![square(&crs, 0.0, 1.0), LinearRing::empty(crs.clone())], crs.clone()),
            Err(GeometryError::InvalidArgument(_))
        );

        let other = Crs::new(CrsId::epsg(28992), "Amersfoort / RD New");
        assert_matches!(
            Polygon::new(vec![square(&other, 0.0, 1.0)], crs.clone()),
            Err(GeometryError::InvalidArgument(_))
        );

        let empty = Polygon::new(vec![], crs).expect("empty");
        assert!(empty.is_empty());
        assert!(empty.exterior_ring().is_none());
        assert!(empty.interior_rings().is_empty());
    }
}
