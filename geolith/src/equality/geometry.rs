use crate::equality::{
    CoordinateScope, ExactPositionEquality, PositionEquality, SequenceEquality,
    TolerancePositionEquality,
};
use crate::error::Result;
use crate::geometry::{Geometric, Geometry, Polygon};
use crate::position::Position;

/// Structural equality of geometries.
///
/// Two geometries are equal if:
/// * both are empty, whatever their types and CRS are, or
/// * they use the same coordinate reference system, are of the same type, and
///   * polygons have pairwise equal rings
///   * collections have pairwise equal parts
///   * other geometries have equal position sequences
///
/// Positions are compared by the [`SequenceEquality`] the comparator is created with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryEquality<E = ExactPositionEquality> {
    sequences: SequenceEquality<E>,
}

impl GeometryEquality<ExactPositionEquality> {
    /// Exact comparison of all coordinates.
    pub fn exact() -> Self {
        Self::new(SequenceEquality::exact())
    }
}

impl GeometryEquality<TolerancePositionEquality> {
    /// Comparison of all coordinates within the given tolerance.
    pub fn tolerance(tolerance: f64) -> Self {
        Self::new(SequenceEquality::tolerance(tolerance))
    }
}

impl<E: PositionEquality> GeometryEquality<E> {
    /// Creates a comparator using the given sequence comparator.
    pub fn new(sequences: SequenceEquality<E>) -> Self {
        Self { sequences }
    }

    /// The same comparator restricted to the horizontal coordinates.
    pub fn horizontal(self) -> Self {
        Self::new(self.sequences.horizontal())
    }

    /// Coordinates taken into account.
    pub fn scope(&self) -> CoordinateScope {
        self.sequences.scope()
    }

    /// Compares two geometries.
    ///
    /// # Errors
    ///
    /// - if all coordinates are compared and the geometries use different position variants
    pub fn equals<P: Position, Q: Position>(&self, a: &Geometry<P>, b: &Geometry<Q>) -> Result<bool> {
        match (a.is_empty(), b.is_empty()) {
            (true, true) => return Ok(true),
            (true, false) | (false, true) => return Ok(false),
            (false, false) => {}
        }

        self.sequences.dimension::<P, Q>()?;
        if !a.crs().same_system(b.crs()) {
            return Ok(false);
        }

        match (a, b) {
            (Geometry::Polygon(a), Geometry::Polygon(b)) => self.polygons(a, b),
            (Geometry::MultiPoint(a), Geometry::MultiPoint(b)) => {
                self.parts(a.parts(), b.parts(), |a, b| {
                    self.sequences.equals(a.positions(), b.positions())
                })
            }
            (Geometry::MultiLineString(a), Geometry::MultiLineString(b)) => {
                self.parts(a.parts(), b.parts(), |a, b| {
                    self.sequences.equals(a.positions(), b.positions())
                })
            }
            (Geometry::MultiPolygon(a), Geometry::MultiPolygon(b)) => {
                self.parts(a.parts(), b.parts(), |a, b| self.polygons(a, b))
            }
            (Geometry::GeometryCollection(a), Geometry::GeometryCollection(b)) => {
                self.parts(a.parts(), b.parts(), |a, b| self.equals(a, b))
            }
            (Geometry::Point(a), Geometry::Point(b)) => {
                self.sequences.equals(a.positions(), b.positions())
            }
            (Geometry::LineString(a), Geometry::LineString(b)) => {
                self.sequences.equals(a.positions(), b.positions())
            }
            (Geometry::LinearRing(a), Geometry::LinearRing(b)) => {
                self.sequences.equals(a.positions(), b.positions())
            }
            _ => Ok(false),
        }
    }

    fn polygons<P: Position, Q: Position>(&self, a: &Polygon<P>, b: &Polygon<Q>) -> Result<bool> {
        self.parts(a.rings(), b.rings(), |a, b| {
            self.sequences.equals(a.positions(), b.positions())
        })
    }

    fn parts<A, B>(
        &self,
        a: &[A],
        b: &[B],
        mut part_equals: impl FnMut(&A, &B) -> Result<bool>,
    ) -> Result<bool> {
        if a.len() != b.len() {
            return Ok(false);
        }

        for (a, b) in a.iter().zip(b) {
            if !part_equals(a, b)? {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::crs::{Crs, CrsId};
    use crate::error::GeometryError;
    use crate::geometry::{GeometryCollection, LineString, LinearRing, Point};
    use crate::position::{C2D, C2DM, C3D};

    fn line(crs: &Crs<C2D>, coords: &[(f64, f64)]) -> LineString<C2D> {
        let positions: Vec<_> = coords.iter().map(|(x, y)| C2D::new(*x, *y)).collect();
        LineString::from_positions(&positions, crs.clone()).expect("valid")
    }

    #[test]
    fn empties_are_always_equal() {
        let a: Geometry<C2D> = Point::empty(Crs::cartesian()).into();
        let b: Geometry<C3D> = Polygon::empty(Crs::cartesian().with_position()).into();
        assert_eq!(GeometryEquality::exact().equals(&a, &b), Ok(true));

        let c: Geometry<C2D> = line(&Crs::cartesian(), &[(0.0, 0.0), (1.0, 1.0)]).into();
        assert_eq!(GeometryEquality::exact().equals(&a, &c), Ok(false));
        assert_eq!(GeometryEquality::exact().equals(&c, &a), Ok(false));
    }

    #[test]
    fn crs_and_type_must_match() {
        let crs = Crs::cartesian();
        let other = Crs::new(CrsId::epsg(3857), "other");
        let a: Geometry<C2D> = line(&crs, &[(0.0, 0.0), (1.0, 1.0)]).into();
        let b: Geometry<C2D> = line(&other, &[(0.0, 0.0), (1.0, 1.0)]).into();
        assert_eq!(GeometryEquality::exact().equals(&a, &b), Ok(false));

        let ring = LinearRing::from_positions(
            &[
                C2D::new(0.0, 0.0),
                C2D::new(1.0, 0.0),
                C2D::new(1.0, 1.0),
                C2D::new(0.0, 0.0),
            ],
            crs.clone(),
        )
        .expect("closed");
        let as_line: Geometry<C2D> = LineString::from(ring.clone()).into();
        let as_ring: Geometry<C2D> = ring.into();
        assert_eq!(GeometryEquality::exact().equals(&as_line, &as_ring), Ok(false));
    }

    #[test]
    fn collections_compare_part_wise() {
        let crs = Crs::cartesian();
        let a: Geometry<C2D> = GeometryCollection::new(
            vec![
                line(&crs, &[(0.0, 0.0), (1.0, 1.0)]),
                line(&crs, &[(2.0, 2.0), (3.0, 3.0)]),
            ],
            crs.clone(),
        )
        .expect("valid")
        .into();
        let b: Geometry<C2D> = GeometryCollection::new(
            vec![line(&crs, &[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)])],
            crs.clone(),
        )
        .expect("valid")
        .into();
        assert_eq!(a.num_positions(), b.num_positions());
        assert_eq!(GeometryEquality::exact().equals(&a, &b), Ok(false));
        assert_eq!(GeometryEquality::exact().equals(&a, &a.clone()), Ok(true));
    }

    #[test]
    fn dimension_scopes() {
        let a: Geometry<C3D> = Point::new(C3D::new(1.0, 2.0, 3.0), Crs::cartesian().with_position()).into();
        let b: Geometry<C2D> = Point::new(C2D::new(1.0, 2.0), Crs::cartesian()).into();
        assert_matches!(
            GeometryEquality::exact().equals(&a, &b),
            Err(GeometryError::InvalidArgument(_))
        );
        assert_eq!(GeometryEquality::exact().horizontal().equals(&a, &b), Ok(true));
        assert_eq!(
            GeometryEquality::tolerance(0.5)
                .horizontal()
                .equals(&a, &Geometry::from(Point::new(C2D::new(1.4, 2.0), Crs::cartesian()))),
            Ok(true)
        );
    }

    #[test]
    fn vertical_is_not_compared_to_measure() {
        let a: Geometry<C3D> = Point::new(C3D::new(1.0, 2.0, 7.0), Crs::cartesian().with_position()).into();
        let b: Geometry<C2DM> = Point::new(C2DM::new(1.0, 2.0, 7.0), Crs::cartesian().with_measure()).into();
        assert_matches!(
            GeometryEquality::exact().equals(&a, &b),
            Err(GeometryError::InvalidArgument(_))
        );
        assert_eq!(GeometryEquality::exact().horizontal().equals(&a, &b), Ok(true));
        assert_ne!(
            Geometry::from(Point::new(C3D::new(1.0, 2.0, 7.0), Crs::cartesian().with_position())),
            Geometry::from(Point::new(C3D::new(1.0, 2.0, 8.0), Crs::cartesian().with_position()))
        );
    }
}
