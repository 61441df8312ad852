use geo_types::{coord, Coord};

use crate::error::{GeometryError, Result};
use crate::geometry::{Geometric, Geometry, LineString, LinearRing, Point, Polygon};
use crate::position::Position;

impl<P: Position> Geometry<P> {
    /// Converts the geometry into a `geo_types` geometry with `f64` coordinates.
    ///
    /// Vertical components and measures are dropped. Linear rings become line strings.
    ///
    /// # Errors
    ///
    /// - if the geometry is or contains an empty point
    pub fn to_geo(&self) -> Result<geo_types::Geometry<f64>> {
        log::trace!(
            "Converting {} with {} positions to geo-types",
            self.geometry_type(),
            self.num_positions()
        );

        Ok(match self {
            Geometry::Point(v) => geo_types::Geometry::Point(point(v)?),
            Geometry::LineString(v) => geo_types::Geometry::LineString(line_string(v)),
            Geometry::LinearRing(v) => geo_types::Geometry::LineString(ring(v)),
            Geometry::Polygon(v) => geo_types::Geometry::Polygon(polygon(v)),
            Geometry::MultiPoint(v) => geo_types::Geometry::MultiPoint(geo_types::MultiPoint(
                v.parts().iter().map(point).collect::<Result<_>>()?,
            )),
            Geometry::MultiLineString(v) => {
                geo_types::Geometry::MultiLineString(geo_types::MultiLineString(
                    v.parts().iter().map(line_string).collect(),
                ))
            }
            Geometry::MultiPolygon(v) => geo_types::Geometry::MultiPolygon(
                geo_types::MultiPolygon(v.parts().iter().map(polygon).collect()),
            ),
            Geometry::GeometryCollection(v) => {
                geo_types::Geometry::GeometryCollection(geo_types::GeometryCollection(
                    v.parts()
                        .iter()
                        .map(|part| part.to_geo())
                        .collect::<Result<_>>()?,
                ))
            }
        })
    }
}

fn to_coord<P: Position>(position: P) -> Coord<f64> {
    coord!(x: position.x(), y: position.y())
}

fn coords<P: Position>(geometry: &impl Geometric<P>) -> Vec<Coord<f64>> {
    geometry.positions().iter().map(to_coord).collect()
}

fn point<P: Position>(point: &Point<P>) -> Result<geo_types::Point<f64>> {
    if point.is_empty() {
        return Err(GeometryError::Conversion(
            "empty point cannot be represented as geo-types point".into(),
        ));
    }

    Ok(geo_types::Point(to_coord(point.position())))
}

fn line_string<P: Position>(line: &LineString<P>) -> geo_types::LineString<f64> {
    geo_types::LineString(coords(line))
}

fn ring<P: Position>(ring: &LinearRing<P>) -> geo_types::LineString<f64> {
    geo_types::LineString(coords(ring))
}

fn polygon<P: Position>(polygon: &Polygon<P>) -> geo_types::Polygon<f64> {
    let exterior = polygon
        .exterior_ring()
        .map(ring)
        .unwrap_or_else(|| geo_types::LineString(Vec::new()));
    let interiors = polygon.interior_rings().iter().map(ring).collect();
    geo_types::Polygon::new(exterior, interiors)
}
