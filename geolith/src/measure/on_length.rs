use crate::error::{GeometryError, Result};
use crate::geometry::{Geometric, Geometry, GeometryCollection, LineString};
use crate::measure::check_linear;
use crate::position::{Measured, Position};
use crate::segment::Segment;
use crate::sequence::{PositionSequence, PositionSequenceBuilder, VariableSizePositionSequenceBuilder};

/// Copy of a line string or multi line string with measures set to the planar length along the curve.
///
/// The measure of the first position is `0`, or its existing measure if `keep_begin_measure` is set and the
/// position has one. Every following position gets the measure of its predecessor plus the horizontal distance
/// between them.
///
/// The parts of a multi line string are measured as one curve: the running length continues from the end of one
/// part to the start of the next one, and the gap between the parts is not counted.
///
/// # Errors
///
/// - if the geometry is not a line string or multi line string
pub fn measure_on_length<P: Position>(
    geometry: &Geometry<P>,
    keep_begin_measure: bool,
) -> Result<Geometry<P::Measured>> {
    check_linear(geometry, "measure on length")?;

    let crs = geometry.crs().with_measure();
    let mut length = match geometry.positions().first() {
        Some(first) if keep_begin_measure && !first.m().is_nan() => first.m(),
        _ => 0.0,
    };

    match geometry {
        Geometry::LineString(line) => {
            let positions = measure_part(line.positions(), &mut length)?;
            Ok(LineString::new(positions, crs)?.into())
        }
        Geometry::MultiLineString(multi) => {
            let lines = multi
                .parts()
                .iter()
                .map(|line| LineString::new(measure_part(line.positions(), &mut length)?, crs.clone()))
                .collect::<Result<_>>()?;

            log::trace!("Measured {} parts, total length {length}", multi.num_parts());
            Ok(GeometryCollection::new(lines, crs)?.into())
        }
        other => Err(GeometryError::InvalidArgument(format!(
            "measure on length is not defined for {}",
            other.geometry_type()
        ))),
    }
}

fn measure_part<P: Position>(
    positions: &PositionSequence<P>,
    length: &mut f64,
) -> Result<PositionSequence<P::Measured>> {
    let mut builder = VariableSizePositionSequenceBuilder::with_capacity(positions.size());
    let mut prev: Option<P> = None;
    for position in positions.iter() {
        if let Some(prev) = prev {
            *length += Segment(prev, position).length();
        }

        let measured = position.convert::<P::Measured>().with_measure(*length);
        builder.add(&measured)?;
        prev = Some(position);
    }

    builder.to_position_sequence()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;

    use super::*;
    use crate::crs::Crs;
    use crate::geometry::Point;
    use crate::position::{C2D, C2DM, C3D, C3DM};

    fn measures<P: Position>(geometry: &Geometry<P>) -> Vec<f64> {
        geometry.positions().iter().map(|p| p.m()).collect()
    }

    #[test]
    fn zero_length_segment() {
        let line = LineString::from_positions(
            &[C2D::new(0.0, 0.0), C2D::new(3.0, 4.0), C2D::new(3.0, 4.0)],
            Crs::cartesian(),
        )
        .expect("valid");
        let geometry: Geometry<C2D> = line.into();
        let measured = measure_on_length(&geometry, false).expect("line");
        assert_eq!(measures(&measured), vec![0.0, 5.0, 5.0]);
        assert_eq!(measured.crs(), &Crs::cartesian().with_measure());
    }

    #[test]
    fn keeps_begin_measure() {
        let crs = Crs::cartesian().with_measure();
        let line: Geometry<C2DM> = LineString::from_positions(
            &[C2DM::new(0.0, 0.0, 100.0), C2DM::new(0.0, 2.0, 0.0)],
            crs.clone(),
        )
        .expect("valid")
        .into();
        assert_eq!(measures(&measure_on_length(&line, true).expect("line")), vec![100.0, 102.0]);
        assert_eq!(measures(&measure_on_length(&line, false).expect("line")), vec![0.0, 2.0]);

        let unmeasured: Geometry<C2DM> = LineString::from_positions(
            &[C2DM::new(0.0, 0.0, f64::NAN), C2DM::new(0.0, 2.0, f64::NAN)],
            crs,
        )
        .expect("valid")
        .into();
        assert_eq!(measures(&measure_on_length(&unmeasured, true).expect("line")), vec![0.0, 2.0]);
    }

    #[test]
    fn running_length_continues_across_parts() {
        let crs = Crs::cartesian().with_position::<C3D>();
        let parts = vec![
            LineString::from_positions(
                &[C3D::new(0.0, 0.0, 0.0), C3D::new(3.0, 4.0, 100.0)],
                crs.clone(),
            )
            .expect("valid"),
            LineString::empty(crs.clone()),
            LineString::from_positions(
                &[C3D::new(10.0, 0.0, 0.0), C3D::new(10.0, 1.0, 0.0)],
                crs.clone(),
            )
            .expect("valid"),
        ];
        let multi: Geometry<C3D> = GeometryCollection::new(parts, crs).expect("valid").into();
        let measured = measure_on_length(&multi, false).expect("multi line");
        assert_eq!(measures(&measured), vec![0.0, 5.0, 5.0, 6.0]);

        let multi = measured.as_multi_line_string().expect("same structure");
        assert_eq!(multi.num_parts(), 3);
        let end: C3DM = multi.parts()[0].end_position().expect("not empty");
        assert_relative_eq!(end.z(), 100.0);
    }

    #[test]
    fn rejects_points() {
        let point: Geometry<C2D> = Point::new(C2D::new(0.0, 0.0), Crs::cartesian()).into();
        assert_matches!(
            measure_on_length(&point, false),
            Err(GeometryError::InvalidArgument(_))
        );
    }
}
