use crate::error::{GeometryError, Result};
use crate::position::Position;

/// Strategy for comparing positions.
///
/// Implementations only decide when two single coordinate values are equal. The rules for empty positions and
/// dimensions are shared:
/// * two empty positions are equal
/// * an empty and a non-empty position are never equal
/// * otherwise the first `dimension` coordinates are compared, any coordinates past `dimension` are ignored
pub trait PositionEquality {
    /// Compares two coordinate values.
    fn equals_ordinate(&self, a: f64, b: f64) -> bool;

    /// Compares the first `dimension` coordinates of two coordinate arrays.
    ///
    /// # Errors
    ///
    /// - if one of the non-empty arrays is shorter than `dimension`
    fn equals_coordinates(&self, a: &[f64], b: &[f64], dimension: usize) -> Result<bool> {
        match (a.is_empty(), b.is_empty()) {
            (true, true) => return Ok(true),
            (true, false) | (false, true) => return Ok(false),
            (false, false) => {}
        }

        if a.len() < dimension || b.len() < dimension {
            return Err(GeometryError::InvalidArgument(format!(
                "cannot compare {dimension} coordinates of positions with {} and {} coordinates",
                a.len(),
                b.len()
            )));
        }

        Ok(a[..dimension]
            .iter()
            .zip(&b[..dimension])
            .all(|(a, b)| self.equals_ordinate(*a, *b)))
    }

    /// Compares all the coordinates of two positions of the same variant.
    fn equals<P: Position>(&self, a: &P, b: &P) -> bool {
        self.equals_coordinates(a.coords(), b.coords(), P::coordinate_dimension())
            .unwrap_or(false)
    }

    /// Compares only the horizontal coordinates of two positions.
    fn equals_2d<P: Position, Q: Position>(&self, a: &P, b: &Q) -> bool {
        self.equals_coordinates(a.coords(), b.coords(), 2)
            .unwrap_or(false)
    }
}

/// Coordinates are equal if they have the same value. `NaN` is equal to `NaN`, so positions with an absent
/// vertical component or measure compare equal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExactPositionEquality;

impl PositionEquality for ExactPositionEquality {
    fn equals_ordinate(&self, a: f64, b: f64) -> bool {
        a == b || (a.is_nan() && b.is_nan())
    }
}

/// Coordinates are equal if they differ by no more than the tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TolerancePositionEquality {
    tolerance: f64,
}

impl TolerancePositionEquality {
    /// Creates a new comparator. A negative tolerance is treated as zero.
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.max(0.0),
        }
    }

    /// Maximum allowed difference between coordinates.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl PositionEquality for TolerancePositionEquality {
    fn equals_ordinate(&self, a: f64, b: f64) -> bool {
        a == b || (a.is_nan() && b.is_nan()) || (a - b).abs() <= self.tolerance
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::position::{C2D, C2DM, C3D};

    #[test]
    fn empty_positions() {
        let eq = ExactPositionEquality;
        assert!(eq.equals(&C2D::empty(), &C2D::empty()));
        assert!(!eq.equals(&C2D::empty(), &C2D::new(0.0, 0.0)));
        assert_eq!(eq.equals_coordinates(&[], &[], 4), Ok(true));
    }

    #[test]
    fn short_arrays_are_an_error() {
        let eq = ExactPositionEquality;
        assert_matches!(
            eq.equals_coordinates(&[1.0, 2.0], &[1.0, 2.0, 3.0], 3),
            Err(GeometryError::InvalidArgument(_))
        );
        assert_eq!(
            eq.equals_coordinates(&[1.0, 2.0, 5.0], &[1.0, 2.0, 3.0], 2),
            Ok(true)
        );
    }

    #[test]
    fn horizontal_only() {
        let eq = ExactPositionEquality;
        assert!(eq.equals_2d(&C3D::new(1.0, 2.0, 3.0), &C2DM::new(1.0, 2.0, 99.0)));
        assert!(!eq.equals(&C3D::new(1.0, 2.0, 3.0), &C3D::new(1.0, 2.0, 4.0)));
    }

    #[test]
    fn nan_components() {
        let eq = ExactPositionEquality;
        assert!(eq.equals(
            &C3D::new(1.0, 2.0, f64::NAN),
            &C3D::new(1.0, 2.0, f64::NAN)
        ));
        assert!(!eq.equals(&C3D::new(1.0, 2.0, f64::NAN), &C3D::new(1.0, 2.0, 0.0)));
    }

    #[test]
    fn tolerance() {
        let eq = TolerancePositionEquality::new(0.1);
        assert!(eq.equals(&C2D::new(1.0, 1.0), &C2D::new(1.05, 0.95)));
        assert!(!eq.equals(&C2D::new(1.0, 1.0), &C2D::new(1.2, 1.0)));

        let zero = TolerancePositionEquality::new(0.0);
        assert!(zero.equals(&C2D::new(1.0, f64::INFINITY), &C2D::new(1.0, f64::INFINITY)));
        assert!(!zero.equals(&C2D::new(1.0, 1.0), &C2D::new(1.0, 1.0 + f64::EPSILON)));
    }
}
