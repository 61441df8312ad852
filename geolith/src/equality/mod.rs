//! Configurable equality of positions, sequences and geometries.
//!
//! Equality is composed from three independent choices:
//! * how single coordinates are compared ([`ExactPositionEquality`] or [`TolerancePositionEquality`])
//! * which coordinates are compared ([`CoordinateScope`])
//! * how positions aggregate into sequences ([`SequenceEquality`]) and geometries ([`GeometryEquality`])

mod geometry;
mod position;
mod sequence;

pub use geometry::GeometryEquality;
pub use position::{ExactPositionEquality, PositionEquality, TolerancePositionEquality};
pub use sequence::SequenceEquality;

/// Coordinates that take part in a comparison.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateScope {
    /// All the coordinates of the positions. Positions of variants with different coordinate dimensions cannot be
    /// compared.
    #[default]
    All,
    /// Only the two horizontal coordinates. Vertical components and measures are ignored.
    Horizontal,
}
