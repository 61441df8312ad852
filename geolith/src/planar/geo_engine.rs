use geo::{
    Area, BooleanOps, Centroid, ConvexHull, EuclideanDistance, EuclideanLength, Relate,
};

use crate::error::{GeometryError, Result};
use crate::geometry::{Geometric, Geometry, Point, Polygon};
use crate::planar::{boundary, check_same_crs, PlanarEngine};
use crate::position::Position;

/// Planar engine backed by the algorithms of the `geo` crate.
///
/// Geometries are converted with [`Geometry::to_geo`] and [`Geometry::from_geo`], so the results carry no
/// vertical components or measures. Overlay operations are supported for polygonal geometries only, and
/// buffering is not supported at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct GeoEngine;

impl GeoEngine {
    /// Creates a new engine.
    pub fn new() -> Self {
        Self
    }

    fn pair<P: Position>(
        a: &Geometry<P>,
        b: &Geometry<P>,
    ) -> Result<(geo::Geometry<f64>, geo::Geometry<f64>)> {
        check_same_crs(a, b)?;
        Ok((a.to_geo()?, b.to_geo()?))
    }

    fn matrix<P: Position>(
        a: &Geometry<P>,
        b: &Geometry<P>,
    ) -> Result<Option<geo::relate::IntersectionMatrix>> {
        check_same_crs(a, b)?;
        if a.is_empty() || b.is_empty() {
            return Ok(None);
        }

        let (a, b) = Self::pair(a, b)?;
        Ok(Some(a.relate(&b)))
    }

    fn overlay<P: Position>(
        a: &Geometry<P>,
        b: &Geometry<P>,
        op: impl FnOnce(&geo::MultiPolygon<f64>, &geo::MultiPolygon<f64>) -> geo::MultiPolygon<f64>,
    ) -> Result<Geometry<P>> {
        let (ga, gb) = Self::pair(a, b)?;
        let (Some(pa), Some(pb)) = (polygonal(ga), polygonal(gb)) else {
            return Err(GeometryError::Unsupported(
                "overlay operations on non-polygonal geometries",
            ));
        };

        let result = op(&pa, &pb);
        log::trace!(
            "Overlay of {} and {} produced {} polygons",
            a.geometry_type(),
            b.geometry_type(),
            result.0.len()
        );
        Geometry::from_geo(&geo::Geometry::MultiPolygon(result), a.crs())
    }
}

fn polygonal(geometry: geo::Geometry<f64>) -> Option<geo::MultiPolygon<f64>> {
    match geometry {
        geo::Geometry::Polygon(p) => Some(geo::MultiPolygon(vec![p])),
        geo::Geometry::MultiPolygon(p) => Some(p),
        geo::Geometry::Rect(r) => Some(geo::MultiPolygon(vec![r.to_polygon()])),
        geo::Geometry::Triangle(t) => Some(geo::MultiPolygon(vec![t.to_polygon()])),
        _ => None,
    }
}

fn length(geometry: &geo::Geometry<f64>) -> f64 {
    match geometry {
        geo::Geometry::Line(v) => v.euclidean_length(),
        geo::Geometry::LineString(v) => v.euclidean_length(),
        geo::Geometry::MultiLineString(v) => v.euclidean_length(),
        geo::Geometry::Polygon(v) => {
            v.exterior().euclidean_length()
                + v.interiors()
                    .iter()
                    .map(|ring| ring.euclidean_length())
                    .sum::<f64>()
        }
        geo::Geometry::MultiPolygon(v) => v
            .iter()
            .map(|p| length(&geo::Geometry::Polygon(p.clone())))
            .sum(),
        geo::Geometry::Rect(v) => 2.0 * (v.width() + v.height()),
        geo::Geometry::Triangle(v) => length(&geo::Geometry::Polygon(v.to_polygon())),
        geo::Geometry::GeometryCollection(v) => v.iter().map(length).sum(),
        geo::Geometry::Point(_) | geo::Geometry::MultiPoint(_) => 0.0,
    }
}

/// Entries of a DE-9IM matrix in row order, `None` standing for `F`.
type Dimensions = [Option<usize>; 9];

fn boundary_dimension<P: Position>(geometry: &Geometry<P>) -> Option<usize> {
    match geometry {
        Geometry::GeometryCollection(collection) => collection
            .parts()
            .iter()
            .filter_map(boundary_dimension)
            .max(),
        _ => boundary(geometry)
            .ok()
            .filter(|b| !b.is_empty())
            .map(|b| b.dimension()),
    }
}

/// Matrix of two geometries at least one of which is empty. `geo` has no empty point, so these are not passed
/// to it.
fn empty_operand_matrix<P: Position>(a: &Geometry<P>, b: &Geometry<P>) -> Dimensions {
    let interior = |g: &Geometry<P>| (!g.is_empty()).then(|| g.dimension());
    let bound = |g: &Geometry<P>| {
        if g.is_empty() {
            None
        } else {
            boundary_dimension(g)
        }
    };

    // Rows are interior, boundary and exterior of `a`, columns the same of `b`.
    [
        None,
        None,
        interior(a),
        None,
        None,
        bound(a),
        interior(b),
        bound(b),
        Some(2),
    ]
}

fn matches_pattern(matrix: &Dimensions, pattern: &str) -> Result<bool> {
    let invalid = || GeometryError::InvalidArgument(format!("invalid DE-9IM pattern {pattern}"));
    if pattern.chars().count() != 9 {
        return Err(invalid());
    }

    let mut matches = true;
    for (entry, symbol) in matrix.iter().zip(pattern.chars()) {
        matches &= match symbol {
            '*' => true,
            'T' | 't' => entry.is_some(),
            'F' | 'f' => entry.is_none(),
            '0'..='2' => *entry == symbol.to_digit(10).map(|d| d as usize),
            _ => return Err(invalid()),
        };
    }

    Ok(matches)
}

impl PlanarEngine for GeoEngine {
    fn relate<P: Position>(&self, a: &Geometry<P>, b: &Geometry<P>, pattern: &str) -> Result<bool> {
        match Self::matrix(a, b)? {
            Some(matrix) => matrix.matches(pattern).map_err(|err| {
                GeometryError::InvalidArgument(format!("invalid DE-9IM pattern {pattern}: {err:?}"))
            }),
            None => matches_pattern(&empty_operand_matrix(a, b), pattern),
        }
    }

    fn intersects<P: Position>(&self, a: &Geometry<P>, b: &Geometry<P>) -> Result<bool> {
        Ok(Self::matrix(a, b)?.is_some_and(|m| m.is_intersects()))
    }

    fn contains<P: Position>(&self, a: &Geometry<P>, b: &Geometry<P>) -> Result<bool> {
        Ok(Self::matrix(a, b)?.is_some_and(|m| m.is_contains()))
    }

    fn within<P: Position>(&self, a: &Geometry<P>, b: &Geometry<P>) -> Result<bool> {
        Ok(Self::matrix(a, b)?.is_some_and(|m| m.is_within()))
    }

    fn buffer<P: Position>(&self, _geometry: &Geometry<P>, _distance: f64) -> Result<Geometry<P>> {
        Err(GeometryError::Unsupported("buffer"))
    }

    fn union<P: Position>(&self, a: &Geometry<P>, b: &Geometry<P>) -> Result<Geometry<P>> {
        Self::overlay(a, b, |a, b| a.union(b))
    }

    fn difference<P: Position>(&self, a: &Geometry<P>, b: &Geometry<P>) -> Result<Geometry<P>> {
        Self::overlay(a, b, |a, b| a.difference(b))
    }

    fn symmetric_difference<P: Position>(&self, a: &Geometry<P>, b: &Geometry<P>) -> Result<Geometry<P>> {
        Self::overlay(a, b, |a, b| a.xor(b))
    }

    fn intersection<P: Position>(&self, a: &Geometry<P>, b: &Geometry<P>) -> Result<Geometry<P>> {
        Self::overlay(a, b, |a, b| a.intersection(b))
    }

    fn convex_hull<P: Position>(&self, geometry: &Geometry<P>) -> Result<Geometry<P>> {
        if geometry.is_empty() {
            return Ok(Polygon::empty(geometry.crs().clone()).into());
        }

        let points: geo::MultiPoint<f64> = geometry
            .positions()
            .iter()
            .map(|p| geo::Point::new(p.x(), p.y()))
            .collect();
        Geometry::from_geo(&geo::Geometry::Polygon(points.convex_hull()), geometry.crs())
    }

    fn distance<P: Position>(&self, a: &Geometry<P>, b: &Geometry<P>) -> Result<f64> {
        if a.is_empty() || b.is_empty() {
            return Err(GeometryError::invalid(
                "distance to an empty geometry is not defined",
            ));
        }

        let (a, b) = Self::pair(a, b)?;
        Ok(a.euclidean_distance(&b))
    }

    fn length<P: Position>(&self, geometry: &Geometry<P>) -> Result<f64> {
        if geometry.is_empty() {
            return Ok(0.0);
        }

        Ok(length(&geometry.to_geo()?))
    }

    fn area<P: Position>(&self, geometry: &Geometry<P>) -> Result<f64> {
        if geometry.is_empty() {
            return Ok(0.0);
        }

        Ok(geometry.to_geo()?.unsigned_area())
    }

    fn centroid<P: Position>(&self, geometry: &Geometry<P>) -> Result<Point<P>> {
        let crs = geometry.crs().clone();
        if geometry.is_empty() {
            return Ok(Point::empty(crs));
        }

        Ok(match geometry.to_geo()?.centroid() {
            Some(c) => Point::new(
                P::from_fn(|i| match i {
                    0 => c.x(),
                    1 => c.y(),
                    _ => f64::NAN,
                }),
                crs,
            ),
            None => Point::empty(crs),
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;

    use super::*;
    use crate::crs::{Crs, CrsId};
    use crate::geometry::{LineString, LinearRing};
    use crate::position::C2D;

    fn square(crs: &Crs<C2D>, min: f64, max: f64) -> Geometry<C2D> {
        let ring = LinearRing::from_positions(
            &[
                C2D::new(min, min),
                C2D::new(max, min),
                C2D::new(max, max),
                C2D::new(min, max),
                C2D::new(min, min),
            ],
            crs.clone(),
        )
        .expect("closed");
        Polygon::from_exterior(ring).expect("valid").into()
    }

    fn line(crs: &Crs<C2D>, coords: &[(f64, f64)]) -> Geometry<C2D> {
        let positions: Vec<_> = coords.iter().map(|(x, y)| C2D::new(*x, *y)).collect();
        LineString::from_positions(&positions, crs.clone())
            .expect("valid")
            .into()
    }

    #[test]
    fn predicates() {
        let engine = GeoEngine::new();
        let crs = Crs::cartesian();
        let big = square(&crs, 0.0, 10.0);
        let small = square(&crs, 2.0, 4.0);
        let adjacent = square(&crs, 10.0, 12.0);
        let shifted = square(&crs, 5.0, 15.0);

        assert!(engine.intersects(&big, &small).expect("same crs"));
        assert!(engine.contains(&big, &small).expect("same crs"));
        assert!(engine.within(&small, &big).expect("same crs"));
        assert!(!engine.within(&big, &small).expect("same crs"));
        assert!(engine.touches(&big, &adjacent).expect("same crs"));
        assert!(!engine.touches(&big, &small).expect("same crs"));
        assert!(engine.overlaps(&big, &shifted).expect("same crs"));
        assert!(!engine.overlaps(&big, &small).expect("same crs"));
        assert!(engine.relate(&big, &small, "T*****FF*").expect("valid pattern"));

        let crossing = line(&crs, &[(-5.0, 5.0), (15.0, 5.0)]);
        assert!(engine.crosses(&crossing, &big).expect("same crs"));
        assert!(!engine.crosses(&small, &adjacent).expect("same crs"));
    }

    #[test]
    fn crs_mismatch_and_empty_operands() {
        let engine = GeoEngine::new();
        let crs = Crs::cartesian();
        let other = Crs::new(CrsId::epsg(3857), "other");
        assert_matches!(
            engine.intersects(&square(&crs, 0.0, 1.0), &square(&other, 0.0, 1.0)),
            Err(GeometryError::InvalidArgument(_))
        );

        let empty: Geometry<C2D> = Point::empty(crs.clone()).into();
        assert_eq!(engine.intersects(&empty, &square(&crs, 0.0, 1.0)), Ok(false));
        assert_matches!(
            engine.distance(&empty, &square(&crs, 0.0, 1.0)),
            Err(GeometryError::InvalidArgument(_))
        );
    }

    #[test]
    fn relate_with_empty_operand() {
        let engine = GeoEngine::new();
        let crs = Crs::cartesian();
        let empty: Geometry<C2D> = Point::empty(crs.clone()).into();
        let polygon = square(&crs, 0.0, 1.0);
        let open_line = line(&crs, &[(0.0, 0.0), (1.0, 1.0)]);

        assert_eq!(engine.relate(&empty, &polygon, "FF*FF****"), Ok(true));
        assert_eq!(engine.relate(&empty, &polygon, "FFFFFF212"), Ok(true));
        assert_eq!(engine.relate(&polygon, &empty, "FF2FF1FF2"), Ok(true));
        assert_eq!(engine.relate(&empty, &open_line, "FFFFFF102"), Ok(true));
        assert_eq!(engine.relate(&empty, &polygon, "T********"), Ok(false));
        assert_eq!(engine.relate(&empty, &empty, "FFFFFFFF2"), Ok(true));
        assert_eq!(engine.touches(&empty, &polygon), Ok(false));
        assert_matches!(
            engine.relate(&empty, &polygon, "FF*"),
            Err(GeometryError::InvalidArgument(_))
        );
        assert_matches!(
            engine.relate(&empty, &polygon, "FF*FF***X"),
            Err(GeometryError::InvalidArgument(_))
        );
    }

    #[test]
    fn overlays() {
        let engine = GeoEngine::new();
        let crs = Crs::cartesian();
        let a = square(&crs, 0.0, 2.0);
        let b = square(&crs, 1.0, 3.0);

        assert_relative_eq!(
            engine.area(&engine.union(&a, &b).expect("polygons")).expect("area"),
            7.0
        );
        assert_relative_eq!(
            engine.area(&engine.intersection(&a, &b).expect("polygons")).expect("area"),
            1.0
        );
        assert_relative_eq!(
            engine.area(&engine.difference(&a, &b).expect("polygons")).expect("area"),
            3.0
        );
        assert_relative_eq!(
            engine
                .area(&engine.symmetric_difference(&a, &b).expect("polygons"))
                .expect("area"),
            6.0
        );

        let l = line(&crs, &[(0.0, 0.0), (1.0, 1.0)]);
        assert_matches!(engine.union(&a, &l), Err(GeometryError::Unsupported(_)));
        assert_matches!(engine.buffer(&a, 1.0), Err(GeometryError::Unsupported(_)));
    }

    #[test]
    fn measurements() {
        let engine = GeoEngine::new();
        let crs = Crs::cartesian();
        let square = square(&crs, 0.0, 2.0);
        assert_relative_eq!(engine.area(&square).expect("area"), 4.0);
        assert_relative_eq!(engine.length(&square).expect("perimeter"), 8.0);

        let l = line(&crs, &[(0.0, 0.0), (3.0, 4.0)]);
        assert_relative_eq!(engine.length(&l).expect("length"), 5.0);
        assert_relative_eq!(engine.area(&l).expect("area"), 0.0);
        let vertical = line(&crs, &[(4.0, 0.0), (4.0, 10.0)]);
        assert_relative_eq!(engine.distance(&l, &vertical).expect("distance"), 1.0);

        let centroid = engine.centroid(&square).expect("centroid");
        assert_relative_eq!(centroid.position().x(), 1.0);
        assert_relative_eq!(centroid.position().y(), 1.0);

        let hull = engine
            .convex_hull(&line(&crs, &[(0.0, 0.0), (2.0, 0.0), (1.0, 1.0), (1.0, 3.0)]))
            .expect("hull");
        assert_relative_eq!(engine.area(&hull).expect("area"), 3.0);
    }
}
