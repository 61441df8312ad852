//! Geometry model.
//!
//! Every geometry owns a [`PositionSequence`] and a shared [`Crs`] handle whose position type is the same as the
//! position type of the geometry. The concrete types validate their invariants on construction and are immutable
//! afterwards. Composite geometries (polygons and collections) expose the positions of all their parts through
//! a nested sequence that shares coordinates with the parts.
//!
//! Code that needs to handle any geometry works with the [`Geometry`] enum and matches over its variants.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::crs::Crs;
use crate::envelope::Envelope;
use crate::equality::GeometryEquality;
use crate::error::Result;
use crate::position::Position;
use crate::sequence::PositionSequence;

mod collection;
mod force;
mod linestring;
mod point;
mod polygon;

pub use collection::{
    CollectionMember, GeometryCollection, MultiLineString, MultiPoint, MultiPolygon,
};
pub use force::force_to_crs;
pub use linestring::{LineString, LinearRing};
pub use point::Point;
pub use polygon::Polygon;

/// Type of a geometry, named as in the OGC simple features model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    /// Single position.
    Point,
    /// Sequence of connected segments.
    LineString,
    /// Closed line string.
    LinearRing,
    /// Exterior ring with zero or more holes.
    Polygon,
    /// Set of points.
    MultiPoint,
    /// Set of line strings.
    MultiLineString,
    /// Set of polygons.
    MultiPolygon,
    /// Heterogeneous set of geometries.
    GeometryCollection,
}

impl GeometryType {
    /// OGC name of the type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::LinearRing => "LinearRing",
            Self::Polygon => "Polygon",
            Self::MultiPoint => "MultiPoint",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPolygon => "MultiPolygon",
            Self::GeometryCollection => "GeometryCollection",
        }
    }

    /// Topological dimension of the geometries of this type. Heterogeneous collections report `0` here, their
    /// actual dimension depends on the parts.
    pub fn topological_dimension(&self) -> usize {
        match self {
            Self::Point | Self::MultiPoint | Self::GeometryCollection => 0,
            Self::LineString | Self::LinearRing | Self::MultiLineString => 1,
            Self::Polygon | Self::MultiPolygon => 2,
        }
    }

    /// Returns true for the multi-part types.
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            Self::MultiPoint | Self::MultiLineString | Self::MultiPolygon | Self::GeometryCollection
        )
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Common accessors of all geometry types.
pub trait Geometric<P: Position> {
    /// Coordinate reference system of the geometry.
    fn crs(&self) -> &Crs<P>;

    /// All the positions of the geometry, parts concatenated in order.
    fn positions(&self) -> &PositionSequence<P>;

    /// Type of the geometry.
    fn geometry_type(&self) -> GeometryType;

    /// Topological dimension.
    fn dimension(&self) -> usize;

    /// Returns true if the geometry has no positions.
    fn is_empty(&self) -> bool {
        self.positions().is_empty()
    }

    /// Number of positions.
    fn num_positions(&self) -> usize {
        self.positions().size()
    }

    /// Position with the given index.
    fn position_n(&self, index: usize) -> Result<P> {
        self.positions().get(index)
    }

    /// Bounding box of the geometry. It is computed on every call.
    fn envelope(&self) -> Envelope<P> {
        Envelope::from_positions(self.positions(), self.crs())
    }
}

/// Any geometry.
#[derive(Debug, Clone)]
pub enum Geometry<P: Position> {
    /// Point.
    Point(Point<P>),
    /// Line string.
    LineString(LineString<P>),
    /// Linear ring.
    LinearRing(LinearRing<P>),
    /// Polygon.
    Polygon(Polygon<P>),
    /// Multi point.
    MultiPoint(MultiPoint<P>),
    /// Multi line string.
    MultiLineString(MultiLineString<P>),
    /// Multi polygon.
    MultiPolygon(MultiPolygon<P>),
    /// Geometry collection.
    GeometryCollection(GeometryCollection<P>),
}

macro_rules! dispatch {
    ($value:expr, $inner:ident => $body:expr) => {
        match $value {
            Geometry::Point($inner) => $body,
            Geometry::LineString($inner) => $body,
            Geometry::LinearRing($inner) => $body,
            Geometry::Polygon($inner) => $body,
            Geometry::MultiPoint($inner) => $body,
            Geometry::MultiLineString($inner) => $body,
            Geometry::MultiPolygon($inner) => $body,
            Geometry::GeometryCollection($inner) => $body,
        }
    };
}

impl<P: Position> Geometric<P> for Geometry<P> {
    fn crs(&self) -> &Crs<P> {
        dispatch!(self, g => g.crs())
    }

    fn positions(&self) -> &PositionSequence<P> {
        dispatch!(self, g => g.positions())
    }

    fn geometry_type(&self) -> GeometryType {
        dispatch!(self, g => g.geometry_type())
    }

    fn dimension(&self) -> usize {
        dispatch!(self, g => g.dimension())
    }
}

macro_rules! geometry_variant {
    ($variant:ident, $ty:ident, $as_fn:ident) => {
        impl<P: Position> From<$ty<P>> for Geometry<P> {
            fn from(value: $ty<P>) -> Self {
                Self::$variant(value)
            }
        }

        impl<P: Position> Geometry<P> {
            #[doc = concat!("Returns the inner value if the geometry is a `", stringify!($ty), "`.")]
            pub fn $as_fn(&self) -> Option<&$ty<P>> {
                match self {
                    Self::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

geometry_variant!(Point, Point, as_point);
geometry_variant!(LineString, LineString, as_line_string);
geometry_variant!(LinearRing, LinearRing, as_linear_ring);
geometry_variant!(Polygon, Polygon, as_polygon);
geometry_variant!(MultiPoint, MultiPoint, as_multi_point);
geometry_variant!(MultiLineString, MultiLineString, as_multi_line_string);
geometry_variant!(MultiPolygon, MultiPolygon, as_multi_polygon);
geometry_variant!(GeometryCollection, GeometryCollection, as_geometry_collection);

impl<P: Position> PartialEq for Geometry<P> {
    fn eq(&self, other: &Self) -> bool {
        GeometryEquality::exact()
            .equals(self, other)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::C2D;

    fn line(coords: Vec<f64>) -> LineString<C2D> {
        LineString::new(
            PositionSequence::from_coordinates(coords).expect("valid"),
            Crs::cartesian(),
        )
        .expect("valid line")
    }

    #[test]
    fn dispatch_through_enum() {
        let geometry: Geometry<C2D> = line(vec![0.0, 0.0, 1.0, 2.0]).into();
        assert_eq!(geometry.geometry_type(), GeometryType::LineString);
        assert_eq!(geometry.dimension(), 1);
        assert_eq!(geometry.num_positions(), 2);
        assert_eq!(geometry.position_n(1).expect("in range"), C2D::new(1.0, 2.0));
        assert!(geometry.as_line_string().is_some());
        assert!(geometry.as_point().is_none());

        let envelope = geometry.envelope();
        assert_eq!(envelope.lower_left(), &C2D::new(0.0, 0.0));
        assert_eq!(envelope.upper_right(), &C2D::new(1.0, 2.0));
    }

    #[test]
    fn empty_geometries_of_different_types_are_equal() {
        let point: Geometry<C2D> = Point::empty(Crs::cartesian()).into();
        let line: Geometry<C2D> = LineString::empty(Crs::cartesian()).into();
        assert!(point.is_empty());
        assert_eq!(point, line);
        assert_ne!(
            point,
            Geometry::from(Point::new(C2D::new(0.0, 0.0), Crs::cartesian()))
        );
    }

    #[test]
    fn type_names() {
        assert_eq!(GeometryType::MultiLineString.to_string(), "MultiLineString");
        assert_eq!(GeometryType::Polygon.topological_dimension(), 2);
        assert!(GeometryType::GeometryCollection.is_collection());
        assert!(!GeometryType::LinearRing.is_collection());
    }
}
