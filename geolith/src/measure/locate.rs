use crate::crs::Crs;
use crate::error::{GeometryError, Result};
use crate::geometry::{Geometric, Geometry, GeometryCollection, LineString, Point};
use crate::measure::check_linear;
use crate::position::Measured;
use crate::segment::Segment;
use crate::sequence::{PositionSequence, PositionSequenceBuilder, VariableSizePositionSequenceBuilder};

/// Part of the geometry with measures equal to `measure`.
///
/// See [`locate_between`].
pub fn locate_along<P: Measured>(geometry: &Geometry<P>, measure: f64) -> Result<Geometry<P>> {
    locate_between(geometry, measure, measure)
}

/// Part of the geometry with measures in the range between `start` and `end` (inclusive, in any order).
///
/// Measures are interpolated linearly along segments, so the boundaries of the returned parts may be positions
/// that are not present in the source geometry. The result is:
/// * the empty point if nothing is in range
/// * a point or a line string for one continuous part
/// * a multi point or a multi line string if all the parts are of the same kind
/// * a geometry collection otherwise
///
/// # Errors
///
/// - if the geometry contains polygons
pub fn locate_between<P: Measured>(
    geometry: &Geometry<P>,
    start: f64,
    end: f64,
) -> Result<Geometry<P>> {
    check_linear(geometry, "locate between")?;

    let mut runs = Runs::new(start.min(end), start.max(end));
    runs.collect(geometry)?;

    log::debug!(
        "Located {} parts of {} between measures {start} and {end}",
        runs.runs.len(),
        geometry.geometry_type()
    );

    runs.assemble(geometry.crs())
}

struct Runs<P: Measured> {
    start: f64,
    end: f64,
    current: VariableSizePositionSequenceBuilder<P>,
    runs: Vec<PositionSequence<P>>,
}

impl<P: Measured> Runs<P> {
    fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            current: VariableSizePositionSequenceBuilder::new(),
            runs: Vec::new(),
        }
    }

    fn in_range(&self, position: &P) -> bool {
        let m = position.m();
        self.start <= m && m <= self.end
    }

    fn emit(&mut self, position: P) -> Result<()> {
        if self.current.last() != Some(position) {
            self.current.add(&position)?;
        }

        Ok(())
    }

    fn close(&mut self) {
        if !self.current.is_empty() {
            self.runs.push(self.current.take());
        }
    }

    fn collect(&mut self, geometry: &Geometry<P>) -> Result<()> {
        match geometry {
            Geometry::Point(point) => self.points(point.positions()),
            Geometry::MultiPoint(multi) => self.points(multi.positions()),
            Geometry::LineString(line) => self.curve(line.positions()),
            Geometry::LinearRing(ring) => self.curve(ring.positions()),
            Geometry::MultiLineString(multi) => {
                for line in multi.parts() {
                    self.curve(line.positions())?;
                }
                Ok(())
            }
            Geometry::GeometryCollection(collection) => {
                for part in collection.parts() {
                    self.collect(part)?;
                }
                Ok(())
            }
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Err(GeometryError::InvalidArgument(
                format!("cannot locate measures in {}", geometry.geometry_type()),
            )),
        }
    }

    fn points(&mut self, positions: &PositionSequence<P>) -> Result<()> {
        for position in positions.iter() {
            if self.in_range(&position) {
                self.emit(position)?;
                self.close();
            }
        }

        Ok(())
    }

    fn curve(&mut self, positions: &PositionSequence<P>) -> Result<()> {
        for (p0, p1) in positions.iter().zip(positions.iter().skip(1)) {
            let segment = Segment(p0, p1);
            let (m0, m1) = (p0.m(), p1.m());
            let rs = (self.start - m0) / (m1 - m0);
            let re = (self.end - m0) / (m1 - m0);
            let r1 = rs.min(re);
            let r2 = rs.max(re);

            if self.in_range(&p0) {
                self.emit(p0)?;
            } else {
                self.close();
                if 0.0 < r1 && r1 < 1.0 {
                    self.emit(segment.interpolate(r1))?;
                }
            }

            if self.in_range(&p1) {
                self.emit(p1)?;
            } else {
                if 0.0 < r2 && r2 < 1.0 {
                    self.emit(segment.interpolate(r2))?;
                }
                self.close();
            }
        }

        self.close();
        Ok(())
    }

    fn assemble(self, crs: &Crs<P>) -> Result<Geometry<P>> {
        let mut runs = self.runs;
        if runs.len() <= 1 {
            return match runs.pop() {
                None => Ok(Point::empty(crs.clone()).into()),
                Some(run) => run_to_geometry(run, crs),
            };
        }

        if runs.iter().all(|run| run.size() == 1) {
            let points = runs
                .into_iter()
                .map(|run| Point::new(run.first().unwrap_or_else(P::empty), crs.clone()))
                .collect();
            return Ok(GeometryCollection::new(points, crs.clone())?.into());
        }

        if runs.iter().all(|run| run.size() > 1) {
            let lines = runs
                .into_iter()
                .map(|run| LineString::new(run, crs.clone()))
                .collect::<Result<_>>()?;
            return Ok(GeometryCollection::new(lines, crs.clone())?.into());
        }

        let parts = runs
            .into_iter()
            .map(|run| run_to_geometry(run, crs))
            .collect::<Result<_>>()?;
        Ok(GeometryCollection::new(parts, crs.clone())?.into())
    }
}

fn run_to_geometry<P: Measured>(run: PositionSequence<P>, crs: &Crs<P>) -> Result<Geometry<P>> {
    if run.size() == 1 {
        Ok(Point::new(run.first().unwrap_or_else(P::empty), crs.clone()).into())
    } else {
        Ok(LineString::new(run, crs.clone())?.into())
    }
}
