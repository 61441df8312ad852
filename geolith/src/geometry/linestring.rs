use crate::crs::Crs;
use crate::error::{GeometryError, Result};
use crate::geometry::{Geometric, GeometryType};
use crate::position::Position;
use crate::segment::Segment;
use crate::sequence::PositionSequence;

/// Curve made of straight segments connecting consecutive positions.
///
/// A line string is either empty or has at least two positions.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString<P: Position> {
    positions: PositionSequence<P>,
    crs: Crs<P>,
}

impl<P: Position> LineString<P> {
    /// Creates a new line string. Nested sequences are flattened into a packed one.
    ///
    /// # Errors
    ///
    /// - if the sequence has exactly one position
    pub fn new(positions: PositionSequence<P>, crs: Crs<P>) -> Result<Self> {
        if positions.size() == 1 {
            return Err(GeometryError::invalid(
                "line string must have zero or at least two positions",
            ));
        }

        Ok(Self {
            positions: PositionSequence::Packed(positions.to_packed()),
            crs,
        })
    }

    /// Creates a line string by copying the given positions.
    pub fn from_positions(positions: &[P], crs: Crs<P>) -> Result<Self> {
        Self::new(PositionSequence::from_positions(positions)?, crs)
    }

    /// The empty line string.
    pub fn empty(crs: Crs<P>) -> Self {
        Self {
            positions: PositionSequence::empty(),
            crs,
        }
    }

    /// First position.
    pub fn start_position(&self) -> Option<P> {
        self.positions.first()
    }

    /// Last position.
    pub fn end_position(&self) -> Option<P> {
        self.positions.last()
    }

    /// Returns true if the line string is not empty and its first and last positions are equal.
    pub fn is_closed(&self) -> bool {
        match (self.start_position(), self.end_position()) {
            (Some(start), Some(end)) => start == end,
            _ => false,
        }
    }

    /// Returns true if the line string could be used as a linear ring.
    pub fn is_ring(&self) -> bool {
        self.is_closed() && self.positions.size() >= 4
    }

    /// Number of segments.
    pub fn num_segments(&self) -> usize {
        self.positions.size().saturating_sub(1)
    }

    /// Iterates over the segments of the line string.
    pub fn segments(&self) -> impl Iterator<Item = Segment<P>> + '_ {
        self.positions
            .iter()
            .zip(self.positions.iter().skip(1))
            .map(|(start, end)| Segment(start, end))
    }

    /// Line string with the same positions in reverse order.
    pub fn reverse(&self) -> Self {
        Self {
            positions: self.positions.reverse(),
            crs: self.crs.clone(),
        }
    }
}

impl<P: Position> Geometric<P> for LineString<P> {
    fn crs(&self) -> &Crs<P> {
        &self.crs
    }

    fn positions(&self) -> &PositionSequence<P> {
        &self.positions
    }

    fn geometry_type(&self) -> GeometryType {
        GeometryType::LineString
    }

    fn dimension(&self) -> usize {
        1
    }
}

/// Closed line string used as a polygon boundary.
///
/// A ring is either empty, or has at least four positions with the last one equal to the first one.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRing<P: Position> {
    line: LineString<P>,
}

impl<P: Position> LinearRing<P> {
    /// Creates a new ring.
    ///
    /// # Errors
    ///
    /// - if the sequence is not empty and not closed, or has less than four positions
    pub fn new(positions: PositionSequence<P>, crs: Crs<P>) -> Result<Self> {
        if positions.is_empty() {
            return Ok(Self::empty(crs));
        }

        let size = positions.size();
        let line = LineString::new(positions, crs)?;
        if size < 4 {
            return Err(GeometryError::InvalidArgument(format!(
                "linear ring must have at least 4 positions, got {size}"
            )));
        }
        if !line.is_closed() {
            return Err(GeometryError::invalid("linear ring must be closed"));
        }

        Ok(Self { line })
    }

    /// Creates a ring by copying the given positions.
    pub fn from_positions(positions: &[P], crs: Crs<P>) -> Result<Self> {
        Self::new(PositionSequence::from_positions(positions)?, crs)
    }

    /// The empty ring.
    pub fn empty(crs: Crs<P>) -> Self {
        Self {
            line: LineString::empty(crs),
        }
    }

    /// The ring as a line string.
    pub fn as_line_string(&self) -> &LineString<P> {
        &self.line
    }

    /// Number of segments.
    pub fn num_segments(&self) -> usize {
        self.line.num_segments()
    }

    /// Iterates over the segments of the ring.
    pub fn segments(&self) -> impl Iterator<Item = Segment<P>> + '_ {
        self.line.segments()
    }

    /// Ring with the same positions in reverse order.
    pub fn reverse(&self) -> Self {
        Self {
            line: self.line.reverse(),
        }
    }
}

impl<P: Position> Geometric<P> for LinearRing<P> {
    fn crs(&self) -> &Crs<P> {
        self.line.crs()
    }

    fn positions(&self) -> &PositionSequence<P> {
        self.line.positions()
    }

    fn geometry_type(&self) -> GeometryType {
        GeometryType::LinearRing
    }

    fn dimension(&self) -> usize {
        1
    }
}

impl<P: Position> From<LinearRing<P>> for LineString<P> {
    fn from(value: LinearRing<P>) -> Self {
        value.line
    }
}
