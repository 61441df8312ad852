use std::fmt::Debug;

use crate::crs::Crs;
use crate::error::{GeometryError, Result};
use crate::geometry::{Geometric, Geometry, GeometryType, LineString, Point, Polygon};
use crate::position::Position;
use crate::sequence::PositionSequence;

/// Geometry types that can be parts of a collection.
pub trait CollectionMember<P: Position>: Geometric<P> + Clone + Debug + PartialEq {
    /// Type of the collection made of this kind of parts.
    const COLLECTION_TYPE: GeometryType;
}

impl<P: Position> CollectionMember<P> for Point<P> {
    const COLLECTION_TYPE: GeometryType = GeometryType::MultiPoint;
}

impl<P: Position> CollectionMember<P> for LineString<P> {
    const COLLECTION_TYPE: GeometryType = GeometryType::MultiLineString;
}

impl<P: Position> CollectionMember<P> for Polygon<P> {
    const COLLECTION_TYPE: GeometryType = GeometryType::MultiPolygon;
}

impl<P: Position> CollectionMember<P> for Geometry<P> {
    const COLLECTION_TYPE: GeometryType = GeometryType::GeometryCollection;
}

/// Collection of geometries sharing one CRS.
///
/// With the default part type this is a heterogeneous collection. The homogeneous multi-geometries are aliases
/// of this type with a fixed part type.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCollection<P: Position, G = Geometry<P>> {
    parts: Vec<G>,
    positions: PositionSequence<P>,
    crs: Crs<P>,
}

/// Collection of points.
pub type MultiPoint<P> = GeometryCollection<P, Point<P>>;
/// Collection of line strings.
pub type MultiLineString<P> = GeometryCollection<P, LineString<P>>;
/// Collection of polygons.
pub type MultiPolygon<P> = GeometryCollection<P, Polygon<P>>;

impl<P: Position, G: CollectionMember<P>> GeometryCollection<P, G> {
    /// Creates a collection. An empty vector creates the empty collection.
    ///
    /// # Errors
    ///
    /// - if any part has a CRS different from `crs`
    pub fn new(parts: Vec<G>, crs: Crs<P>) -> Result<Self> {
        if let Some(index) = parts.iter().position(|part| part.crs() != &crs) {
            return Err(GeometryError::InvalidArgument(format!(
                "{} part {index} has CRS {}, expected {crs}",
                G::COLLECTION_TYPE,
                parts[index].crs()
            )));
        }

        let positions = if parts.is_empty() {
            PositionSequence::empty()
        } else {
            PositionSequence::nested(parts.iter().map(|p| p.positions().clone()).collect())
        };

        Ok(Self {
            parts,
            positions,
            crs,
        })
    }

    /// The empty collection.
    pub fn empty(crs: Crs<P>) -> Self {
        Self {
            parts: Vec::new(),
            positions: PositionSequence::empty(),
            crs,
        }
    }

    /// Parts of the collection.
    pub fn parts(&self) -> &[G] {
        &self.parts
    }

    /// Number of parts.
    pub fn num_parts(&self) -> usize {
        self.parts.len()
    }

    /// Part with the given index.
    pub fn part_n(&self, index: usize) -> Option<&G> {
        self.parts.get(index)
    }
}

impl<P: Position, G: CollectionMember<P>> Geometric<P> for GeometryCollection<P, G> {
    fn crs(&self) -> &Crs<P> {
        &self.crs
    }

    fn positions(&self) -> &PositionSequence<P> {
        &self.positions
    }

    fn geometry_type(&self) -> GeometryType {
        G::COLLECTION_TYPE
    }

    fn dimension(&self) -> usize {
        self.parts
            .iter()
            .map(|part| part.dimension())
            .max()
            .unwrap_or_else(|| G::COLLECTION_TYPE.topological_dimension())
    }
}

impl<'a, P: Position, G> IntoIterator for &'a GeometryCollection<P, G> {
    type Item = &'a G;
    type IntoIter = std::slice::Iter<'a, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::position::{C2D, G2D};

    #[test]
    fn empty_input_is_empty_collection() {
        let multi = MultiPoint::<G2D>::new(vec![], Crs::wgs84()).expect("empty");
        assert!(multi.is_empty());
        assert_eq!(multi.num_parts(), 0);
        assert_eq!(multi.dimension(), 0);
        assert_eq!(multi.geometry_type(), GeometryType::MultiPoint);
        assert_eq!(
            MultiPolygon::<G2D>::empty(Crs::wgs84()).dimension(),
            2
        );
    }

    #[test]
    fn positions_follow_parts() {
        let crs = Crs::cartesian();
        let parts = vec![
            Point::new(C2D::new(1.0, 1.0), crs.clone()),
            Point::empty(crs.clone()),
            Point::new(C2D::new(2.0, 2.0), crs.clone()),
        ];
        let multi = MultiPoint::new(parts, crs).expect("valid");
        assert_eq!(multi.num_parts(), 3);
        assert_eq!(multi.num_positions(), 2);
        assert_eq!(multi.position_n(1).expect("in range"), C2D::new(2.0, 2.0));
        assert!(multi.part_n(1).expect("exists").is_empty());
    }

    #[test]
    fn rejects_foreign_crs() {
        let wgs84 = Crs::wgs84();
        let other = Crs::<G2D>::new(crate::crs::CrsId::epsg(4258), "ETRS89");
        assert_matches!(
            MultiPoint::new(vec![Point::new(G2D::new(0.0, 0.0), other)], wgs84),
            Err(GeometryError::InvalidArgument(_))
        );
    }

    #[test]
    fn heterogeneous_dimension() {
        let crs = Crs::cartesian();
        let line = LineString::from_positions(&[C2D::new(0.0, 0.0), C2D::new(1.0, 1.0)], crs.clone())
            .expect("valid");
        let collection = GeometryCollection::<C2D>::new(
            vec![
                Point::new(C2D::new(5.0, 5.0), crs.clone()).into(),
                line.into(),
            ],
            crs,
        )
        .expect("valid");
        assert_eq!(collection.dimension(), 1);
        assert_eq!(collection.num_positions(), 3);
        assert_eq!((&collection).into_iter().count(), 2);
    }
}
