use crate::crs::Crs;
use crate::error::{GeometryError, Result};
use crate::geometry::{
    Geometric, Geometry, GeometryCollection, LineString, LinearRing, Point, Polygon,
};
use crate::position::Position;
use crate::sequence::{PackedPositionSequence, PositionSequence};

/// Re-expresses the geometry in another CRS without transforming coordinates.
///
/// Every position is reinterpreted as a position of the target type: horizontal coordinates are copied, vertical
/// and measure components are carried over when the target has them, and components that the source lacks are
/// set to `NaN`. Composite geometries are rebuilt part by part.
///
/// Applying the function twice with the same target returns a geometry equal to the result of the first call.
///
/// # Errors
///
/// - if the rebuilt geometry is of a different type than the source
pub fn force_to_crs<P: Position, Q: Position>(
    geometry: &Geometry<P>,
    crs: &Crs<Q>,
) -> Result<Geometry<Q>> {
    log::trace!(
        "Forcing {} from {} to {crs}",
        geometry.geometry_type(),
        geometry.crs()
    );

    let forced: Geometry<Q> = match geometry {
        Geometry::Point(g) => force_point(g, crs).into(),
        Geometry::LineString(g) => force_line(g, crs)?.into(),
        Geometry::LinearRing(g) => force_ring(g, crs)?.into(),
        Geometry::Polygon(g) => force_polygon(g, crs)?.into(),
        Geometry::MultiPoint(g) => GeometryCollection::new(
            g.parts().iter().map(|p| force_point(p, crs)).collect(),
            crs.clone(),
        )?
        .into(),
        Geometry::MultiLineString(g) => GeometryCollection::new(
            g.parts()
                .iter()
                .map(|p| force_line(p, crs))
                .collect::<Result<_>>()?,
            crs.clone(),
        )?
        .into(),
        Geometry::MultiPolygon(g) => GeometryCollection::new(
            g.parts()
                .iter()
                .map(|p| force_polygon(p, crs))
                .collect::<Result<_>>()?,
            crs.clone(),
        )?
        .into(),
        Geometry::GeometryCollection(g) => GeometryCollection::new(
            g.parts()
                .iter()
                .map(|p| force_to_crs(p, crs))
                .collect::<Result<_>>()?,
            crs.clone(),
        )?
        .into(),
    };

    if forced.geometry_type() != geometry.geometry_type() {
        return Err(GeometryError::illegal_state(format!(
            "forcing {} to {crs} produced {}",
            geometry.geometry_type(),
            forced.geometry_type()
        )));
    }

    Ok(forced)
}

fn force_positions<P: Position, Q: Position>(positions: &PositionSequence<P>) -> PositionSequence<Q> {
    let mut coords = Vec::with_capacity(positions.size() * Q::coordinate_dimension());
    for position in positions.iter() {
        coords.extend_from_slice(position.convert::<Q>().coords());
    }

    PositionSequence::Packed(PackedPositionSequence::from_validated(coords))
}

fn force_point<P: Position, Q: Position>(point: &Point<P>, crs: &Crs<Q>) -> Point<Q> {
    Point::new(point.position().convert(), crs.clone())
}

fn force_line<P: Position, Q: Position>(line: &LineString<P>, crs: &Crs<Q>) -> Result<LineString<Q>> {
    LineString::new(force_positions(line.positions()), crs.clone())
}

fn force_ring<P: Position, Q: Position>(ring: &LinearRing<P>, crs: &Crs<Q>) -> Result<LinearRing<Q>> {
    LinearRing::new(force_positions(ring.positions()), crs.clone())
}

fn force_polygon<P: Position, Q: Position>(polygon: &Polygon<P>, crs: &Crs<Q>) -> Result<Polygon<Q>> {
    let rings = polygon
        .rings()
        .iter()
        .map(|ring| force_ring(ring, crs))
        .collect::<Result<_>>()?;
    Polygon::new(rings, crs.clone())
}
