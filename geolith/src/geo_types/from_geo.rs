use geo_types::Coord;

use crate::crs::Crs;
use crate::error::Result;
use crate::geometry::{Geometry, GeometryCollection, LineString, LinearRing, Point, Polygon};
use crate::position::Position;
use crate::sequence::{PackedPositionSequence, PositionSequence};

impl<P: Position> Geometry<P> {
    /// Creates a geometry from a `geo_types` geometry.
    ///
    /// Vertical components and measures of the created positions are set to `NaN`. Lines become line strings,
    /// rectangles and triangles become polygons.
    ///
    /// # Errors
    ///
    /// - if the input violates the invariants of the geometry model, e.g. has a line string with one position
    pub fn from_geo(geometry: &geo_types::Geometry<f64>, crs: &Crs<P>) -> Result<Self> {
        Ok(match geometry {
            geo_types::Geometry::Point(v) => point(v, crs).into(),
            geo_types::Geometry::Line(v) => {
                LineString::new(sequence(&[v.start, v.end]), crs.clone())?.into()
            }
            geo_types::Geometry::LineString(v) => line_string(v, crs)?.into(),
            geo_types::Geometry::Polygon(v) => polygon(v, crs)?.into(),
            geo_types::Geometry::MultiPoint(v) => {
                GeometryCollection::new(v.iter().map(|p| point(p, crs)).collect(), crs.clone())?
                    .into()
            }
            geo_types::Geometry::MultiLineString(v) => GeometryCollection::new(
                v.iter()
                    .map(|l| line_string(l, crs))
                    .collect::<Result<_>>()?,
                crs.clone(),
            )?
            .into(),
            geo_types::Geometry::MultiPolygon(v) => GeometryCollection::new(
                v.iter().map(|p| polygon(p, crs)).collect::<Result<_>>()?,
                crs.clone(),
            )?
            .into(),
            geo_types::Geometry::GeometryCollection(v) => GeometryCollection::new(
                v.iter()
                    .map(|g| Self::from_geo(g, crs))
                    .collect::<Result<_>>()?,
                crs.clone(),
            )?
            .into(),
            geo_types::Geometry::Rect(v) => polygon(&v.to_polygon(), crs)?.into(),
            geo_types::Geometry::Triangle(v) => polygon(&v.to_polygon(), crs)?.into(),
        })
    }
}

fn to_position<P: Position>(coord: &Coord<f64>) -> P {
    P::from_fn(|i| match i {
        0 => coord.x,
        1 => coord.y,
        _ => f64::NAN,
    })
}

fn sequence<P: Position>(coords: &[Coord<f64>]) -> PositionSequence<P> {
    let mut values = Vec::with_capacity(coords.len() * P::coordinate_dimension());
    for coord in coords {
        values.extend_from_slice(to_position::<P>(coord).coords());
    }

    PositionSequence::Packed(PackedPositionSequence::from_validated(values))
}

fn point<P: Position>(point: &geo_types::Point<f64>, crs: &Crs<P>) -> Point<P> {
    Point::new(to_position(&point.0), crs.clone())
}

fn line_string<P: Position>(line: &geo_types::LineString<f64>, crs: &Crs<P>) -> Result<LineString<P>> {
    LineString::new(sequence(&line.0), crs.clone())
}

fn polygon<P: Position>(polygon: &geo_types::Polygon<f64>, crs: &Crs<P>) -> Result<Polygon<P>> {
    if polygon.exterior().0.is_empty() {
        return Ok(Polygon::empty(crs.clone()));
    }

    let rings = std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| LinearRing::new(sequence(&ring.0), crs.clone()))
        .collect::<Result<_>>()?;
    Polygon::new(rings, crs.clone())
}
