//! Planar topology and overlay operations.
//!
//! The kernel does not implement computational geometry algorithms itself. They are provided by a
//! [`PlanarEngine`], which receives geometries of the model, converts them to its own representation and
//! converts the results back. With the `geo` feature enabled, [`GeoEngine`] implements the engine over the `geo`
//! crate.
//!
//! All binary operations require both operands to use the same CRS.

use crate::crs::Crs;
use crate::error::{GeometryError, Result};
use crate::geometry::{
    Geometric, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, Point,
};
use crate::position::Position;

#[cfg(feature = "geo")]
mod geo_engine;

#[cfg(feature = "geo")]
pub use geo_engine::GeoEngine;

/// Returns an error if the geometries use different coordinate reference systems.
pub fn check_same_crs<P: Position>(a: &Geometry<P>, b: &Geometry<P>) -> Result<()> {
    if a.crs() != b.crs() {
        return Err(GeometryError::InvalidArgument(format!(
            "geometries have different CRS: {} and {}",
            a.crs(),
            b.crs()
        )));
    }

    Ok(())
}

/// Provider of the planar geometry algorithms.
///
/// Predicates for which DE-9IM patterns are defined by the OGC simple features specification have default
/// implementations over [`PlanarEngine::relate`]. The boundary is derived from the model directly.
pub trait PlanarEngine {
    /// Tests the DE-9IM intersection matrix of two geometries against a pattern, e.g. `"T*F**F***"`.
    fn relate<P: Position>(&self, a: &Geometry<P>, b: &Geometry<P>, pattern: &str) -> Result<bool>;

    /// Returns true if the geometries have at least one common point.
    fn intersects<P: Position>(&self, a: &Geometry<P>, b: &Geometry<P>) -> Result<bool>;

    /// Returns true if `b` lies in `a` and their interiors intersect.
    fn contains<P: Position>(&self, a: &Geometry<P>, b: &Geometry<P>) -> Result<bool>;

    /// Returns true if `a` lies in `b` and their interiors intersect.
    fn within<P: Position>(&self, a: &Geometry<P>, b: &Geometry<P>) -> Result<bool> {
        self.contains(b, a)
    }

    /// Returns true if the geometries have common points but their interiors do not intersect.
    fn touches<P: Position>(&self, a: &Geometry<P>, b: &Geometry<P>) -> Result<bool> {
        if a.dimension() == 0 && b.dimension() == 0 {
            return Ok(false);
        }

        for pattern in ["FT*******", "F**T*****", "F***T****"] {
            if self.relate(a, b, pattern)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Returns true if the interiors of the geometries intersect in a geometry of lower dimension than the
    /// maximum dimension of the operands.
    fn crosses<P: Position>(&self, a: &Geometry<P>, b: &Geometry<P>) -> Result<bool> {
        let (da, db) = (a.dimension(), b.dimension());
        if da < db {
            self.relate(a, b, "T*T******")
        } else if da > db {
            self.relate(a, b, "T*****T**")
        } else if da == 1 {
            self.relate(a, b, "0********")
        } else {
            Ok(false)
        }
    }

    /// Returns true if the geometries have the same dimension, their interiors intersect and neither contains
    /// the other.
    fn overlaps<P: Position>(&self, a: &Geometry<P>, b: &Geometry<P>) -> Result<bool> {
        match (a.dimension(), b.dimension()) {
            (1, 1) => self.relate(a, b, "1*T***T**"),
            (da, db) if da == db => self.relate(a, b, "T*T***T**"),
            _ => Ok(false),
        }
    }

    /// Area within `distance` of the geometry.
    fn buffer<P: Position>(&self, geometry: &Geometry<P>, distance: f64) -> Result<Geometry<P>>;

    /// Points that belong to either of the geometries.
    fn union<P: Position>(&self, a: &Geometry<P>, b: &Geometry<P>) -> Result<Geometry<P>>;

    /// Points of `a` that do not belong to `b`.
    fn difference<P: Position>(&self, a: &Geometry<P>, b: &Geometry<P>) -> Result<Geometry<P>>;

    /// Points that belong to exactly one of the geometries.
    fn symmetric_difference<P: Position>(&self, a: &Geometry<P>, b: &Geometry<P>) -> Result<Geometry<P>>;

    /// Points that belong to both geometries.
    fn intersection<P: Position>(&self, a: &Geometry<P>, b: &Geometry<P>) -> Result<Geometry<P>>;

    /// Smallest convex polygon containing the geometry.
    fn convex_hull<P: Position>(&self, geometry: &Geometry<P>) -> Result<Geometry<P>>;

    /// Shortest distance between the geometries.
    fn distance<P: Position>(&self, a: &Geometry<P>, b: &Geometry<P>) -> Result<f64>;

    /// Length of linear geometries, perimeter of polygonal geometries.
    fn length<P: Position>(&self, geometry: &Geometry<P>) -> Result<f64>;

    /// Area of polygonal geometries, `0` for other geometries.
    fn area<P: Position>(&self, geometry: &Geometry<P>) -> Result<f64>;

    /// Center of mass of the geometry. Empty point for empty geometries.
    fn centroid<P: Position>(&self, geometry: &Geometry<P>) -> Result<Point<P>>;

    /// Combinatorial boundary of the geometry.
    ///
    /// * points have empty boundaries
    /// * the boundary of a line string is its endpoints, unless it is closed
    /// * the boundary of a multi line string is the endpoints that belong to an odd number of parts
    /// * the boundary of a polygon is its rings
    ///
    /// # Errors
    ///
    /// - for heterogeneous geometry collections, which have no defined boundary
    fn boundary<P: Position>(&self, geometry: &Geometry<P>) -> Result<Geometry<P>> {
        boundary(geometry)
    }
}

fn boundary<P: Position>(geometry: &Geometry<P>) -> Result<Geometry<P>> {
    let crs = geometry.crs().clone();
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => {
            Ok(GeometryCollection::<P>::empty(crs).into())
        }
        Geometry::LinearRing(_) => Ok(MultiPoint::empty(crs).into()),
        Geometry::LineString(line) => endpoints(std::slice::from_ref(line), crs),
        Geometry::MultiLineString(multi) => endpoints(multi.parts(), crs),
        Geometry::Polygon(polygon) => {
            let mut rings: Vec<LineString<P>> = polygon
                .rings()
                .iter()
                .map(|ring| ring.as_line_string().clone())
                .collect();
            if rings.len() == 1 {
                Ok(rings.remove(0).into())
            } else {
                Ok(MultiLineString::new(rings, crs)?.into())
            }
        }
        Geometry::MultiPolygon(multi) => {
            let rings = multi
                .parts()
                .iter()
                .flat_map(|polygon| polygon.rings())
                .map(|ring| ring.as_line_string().clone())
                .collect();
            Ok(MultiLineString::new(rings, crs)?.into())
        }
        Geometry::GeometryCollection(_) => Err(GeometryError::invalid(
            "boundary of a geometry collection is not defined",
        )),
    }
}

fn endpoints<P: Position>(lines: &[LineString<P>], crs: Crs<P>) -> Result<Geometry<P>> {
    let mut counts: Vec<(P, usize)> = Vec::new();
    for line in lines.iter().filter(|line| !line.is_closed()) {
        for endpoint in [line.start_position(), line.end_position()].into_iter().flatten() {
            match counts.iter_mut().find(|(p, _)| *p == endpoint) {
                Some((_, count)) => *count += 1,
                None => counts.push((endpoint, 1)),
            }
        }
    }

    let points = counts
        .into_iter()
        .filter(|(_, count)| count % 2 == 1)
        .map(|(position, _)| Point::new(position, crs.clone()))
        .collect();
    Ok(MultiPoint::new(points, crs)?.into())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::geometry::{LinearRing, Polygon};
    use crate::position::C2D;

    fn line(crs: &Crs<C2D>, coords: &[(f64, f64)]) -> LineString<C2D> {
        let positions: Vec<_> = coords.iter().map(|(x, y)| C2D::new(*x, *y)).collect();
        LineString::from_positions(&positions, crs.clone()).expect("valid")
    }

    #[test]
    fn line_boundaries() {
        let crs = Crs::cartesian();
        let open: Geometry<C2D> = line(&crs, &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).into();
        let result = boundary(&open).expect("defined");
        let points = result.as_multi_point().expect("endpoints");
        assert_eq!(points.num_parts(), 2);
        assert_eq!(points.parts()[1].position(), C2D::new(1.0, 1.0));

        let closed: Geometry<C2D> =
            line(&crs, &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]).into();
        assert!(boundary(&closed).expect("defined").is_empty());

        let multi: Geometry<C2D> = MultiLineString::new(
            vec![
                line(&crs, &[(0.0, 0.0), (1.0, 0.0)]),
                line(&crs, &[(1.0, 0.0), (2.0, 0.0)]),
            ],
            crs.clone(),
        )
        .expect("valid")
        .into();
        let result = boundary(&multi).expect("defined");
        let positions: Vec<_> = result.positions().iter().collect();
        assert_eq!(positions, vec![C2D::new(0.0, 0.0), C2D::new(2.0, 0.0)]);
    }

    #[test]
    fn polygon_boundary() {
        let crs = Crs::cartesian();
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
        let polygon: Geometry<C2D> = Polygon::new(vec![ring], crs.clone()).expect("valid").into();
        let result = boundary(&polygon).expect("defined");
        assert!(result.as_line_string().expect("single ring").is_closed());

        let collection: Geometry<C2D> =
            GeometryCollection::new(vec![polygon], crs).expect("valid").into();
        assert_matches!(
            boundary(&collection),
            Err(GeometryError::InvalidArgument(_))
        );
    }
}
