//! Linear referencing.
//!
//! Functions in this module treat the measure component of positions as a scalar coordinate along a curve. They
//! work with zero and one dimensional geometries. Polygons, and collections containing them, are rejected with
//! [`GeometryError::InvalidArgument`].

use crate::error::{GeometryError, Result};
use crate::geometry::{Geometric, Geometry};
use crate::position::{Measured, Position};

mod locate;
mod on_length;

pub use locate::{locate_along, locate_between};
pub use on_length::measure_on_length;

pub(crate) fn check_linear<P: Position>(geometry: &Geometry<P>, operation: &str) -> Result<()> {
    if geometry.dimension() > 1 {
        return Err(GeometryError::InvalidArgument(format!(
            "{operation} is not defined for {} geometries",
            geometry.geometry_type()
        )));
    }

    Ok(())
}

/// Smallest measure of the geometry. Positions without a measure are skipped, `NaN` is returned if no position
/// has one.
pub fn minimum_measure<P: Measured>(geometry: &Geometry<P>) -> Result<f64> {
    check_linear(geometry, "minimum measure")?;
    Ok(geometry
        .positions()
        .iter()
        .map(|p| p.m())
        .fold(f64::NAN, f64::min))
}

/// Largest measure of the geometry. Positions without a measure are skipped, `NaN` is returned if no position
/// has one.
pub fn maximum_measure<P: Measured>(geometry: &Geometry<P>) -> Result<f64> {
    check_linear(geometry, "maximum measure")?;
    Ok(geometry
        .positions()
        .iter()
        .map(|p| p.m())
        .fold(f64::NAN, f64::max))
}

/// Measure at the point of the curve closest to `position`.
///
/// The measure is interpolated linearly along the closest segment. Only horizontal coordinates are used to find
/// the closest segment.
///
/// # Errors
///
/// - if the geometry is not a line string or multi line string, or is empty
/// - [`GeometryError::OutOfTolerance`] if the curve does not pass within `tolerance` of the position
pub fn measure_at<P: Measured, Q: Position>(
    geometry: &Geometry<P>,
    position: &Q,
    tolerance: f64,
) -> Result<f64> {
    let lines = match geometry {
        Geometry::LineString(line) => std::slice::from_ref(line),
        Geometry::MultiLineString(multi) => multi.parts(),
        other => {
            return Err(GeometryError::InvalidArgument(format!(
                "measure at position is not defined for {}",
                other.geometry_type()
            )))
        }
    };

    if geometry.is_empty() || position.is_empty() {
        return Err(GeometryError::invalid(
            "measure at position requires a non-empty curve and position",
        ));
    }

    let mut closest_sq = f64::INFINITY;
    let mut measure = f64::NAN;
    for segment in lines.iter().flat_map(|line| line.segments()) {
        let distance_sq = segment.distance_to_point_sq(position);
        if distance_sq < closest_sq {
            closest_sq = distance_sq;
            let r = segment.projection_factor(position).clamp(0.0, 1.0);
            measure = segment.interpolate(r).m();
        }
    }

    let distance = closest_sq.sqrt();
    if distance > tolerance {
        return Err(GeometryError::OutOfTolerance {
            distance,
            tolerance,
        });
    }

    Ok(measure)
}
