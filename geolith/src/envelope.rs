//! Axis aligned bounding boxes.
//!
//! An [`Envelope`] is described by its lower-left and upper-right corner positions. It is considered empty when
//! either corner is the empty position or when both corners are equal, so a box around a single position is
//! empty. Operations over two envelopes require them to share a CRS.

use crate::crs::Crs;
use crate::error::{GeometryError, Result};
use crate::geometry::Geometric;
use crate::position::Position;
use crate::sequence::PositionSequence;

/// Axis aligned bounding box.
#[derive(Debug, Clone)]
pub struct Envelope<P: Position> {
    lower_left: P,
    upper_right: P,
    crs: Crs<P>,
}

impl<P: Position> Envelope<P> {
    /// Creates a new envelope.
    ///
    /// # Errors
    ///
    /// - if any coordinate of `lower_left` is greater than the matching coordinate of `upper_right`
    pub fn new(lower_left: P, upper_right: P, crs: Crs<P>) -> Result<Self> {
        if !lower_left.is_empty() && !upper_right.is_empty() {
            let inverted = lower_left
                .coords()
                .iter()
                .zip(upper_right.coords())
                .position(|(min, max)| min > max);
            if let Some(index) = inverted {
                return Err(GeometryError::InvalidArgument(format!(
                    "lower left corner {lower_left:?} is above upper right corner {upper_right:?} on axis {index}"
                )));
            }
        }

        Ok(Self {
            lower_left,
            upper_right,
            crs,
        })
    }

    /// The empty envelope.
    pub fn empty(crs: Crs<P>) -> Self {
        Self {
            lower_left: P::empty(),
            upper_right: P::empty(),
            crs,
        }
    }

    /// Smallest envelope containing all the positions of the sequence.
    pub fn from_positions(positions: &PositionSequence<P>, crs: &Crs<P>) -> Self {
        positions
            .iter()
            .fold(Self::empty(crs.clone()), |envelope, position| {
                envelope.expand_to_include(&position)
            })
    }

    /// Envelope of a geometry.
    pub fn from_geometry(geometry: &impl Geometric<P>) -> Self {
        Self::from_positions(geometry.positions(), geometry.crs())
    }

    /// Lower-left corner.
    pub fn lower_left(&self) -> &P {
        &self.lower_left
    }

    /// Upper-right corner.
    pub fn upper_right(&self) -> &P {
        &self.upper_right
    }

    /// Coordinate reference system.
    pub fn crs(&self) -> &Crs<P> {
        &self.crs
    }

    /// Returns true if the envelope is empty.
    pub fn is_empty(&self) -> bool {
        self.lower_left.is_empty()
            || self.upper_right.is_empty()
            || self.lower_left == self.upper_right
    }

    /// Minimum value of the given ordinate. `NaN` for empty envelopes.
    pub fn min(&self, ordinate: usize) -> f64 {
        self.lower_left.coordinate(ordinate)
    }

    /// Maximum value of the given ordinate. `NaN` for empty envelopes.
    pub fn max(&self, ordinate: usize) -> f64 {
        self.upper_right.coordinate(ordinate)
    }

    /// Extent along the first axis.
    pub fn width(&self) -> f64 {
        self.max(0) - self.min(0)
    }

    /// Extent along the second axis.
    pub fn height(&self) -> f64 {
        self.max(1) - self.min(1)
    }

    fn check_crs(&self, other: &Self) -> Result<()> {
        if self.crs != other.crs {
            return Err(GeometryError::InvalidArgument(format!(
                "envelopes have different CRS: {} and {}",
                self.crs, other.crs
            )));
        }

        Ok(())
    }

    /// Smallest envelope containing both envelopes. Empty operands are ignored.
    pub fn union(&self, other: &Self) -> Result<Self> {
        self.check_crs(other)?;
        if other.is_empty() {
            return Ok(self.clone());
        }
        if self.is_empty() {
            return Ok(other.clone());
        }

        Ok(Self {
            lower_left: P::from_fn(|i| self.min(i).min(other.min(i))),
            upper_right: P::from_fn(|i| self.max(i).max(other.max(i))),
            crs: self.crs.clone(),
        })
    }

    /// Common part of the two envelopes. If they do not overlap the result is empty.
    pub fn intersect(&self, other: &Self) -> Result<Self> {
        self.check_crs(other)?;
        if self.is_empty() || other.is_empty() {
            return Ok(Self::empty(self.crs.clone()));
        }

        let lower_left = P::from_fn(|i| self.min(i).max(other.min(i)));
        let upper_right = P::from_fn(|i| self.max(i).min(other.max(i)));
        let disjoint = lower_left
            .coords()
            .iter()
            .zip(upper_right.coords())
            .any(|(min, max)| min > max);
        if disjoint {
            return Ok(Self::empty(self.crs.clone()));
        }

        Ok(Self {
            lower_left,
            upper_right,
            crs: self.crs.clone(),
        })
    }

    /// Returns true if the horizontal extent of this envelope lies inside the extent of `other`. Empty envelopes
    /// are never within anything.
    pub fn within(&self, other: &Self) -> Result<bool> {
        self.check_crs(other)?;
        if self.is_empty() || other.is_empty() {
            return Ok(false);
        }

        Ok((0..2).all(|i| self.min(i) >= other.min(i) && self.max(i) <= other.max(i)))
    }

    /// Returns true if `other` is within this envelope.
    pub fn contains(&self, other: &Self) -> Result<bool> {
        other.within(self)
    }

    /// Returns true if the horizontal extents of the envelopes have at least one common point.
    pub fn intersects(&self, other: &Self) -> Result<bool> {
        self.check_crs(other)?;
        if self.is_empty() || other.is_empty() {
            return Ok(false);
        }

        Ok((0..2).all(|i| self.min(i) <= other.max(i) && self.max(i) >= other.min(i)))
    }

    /// Returns true if the position lies inside the horizontal extent of the envelope, boundary included.
    pub fn contains_position(&self, position: &P) -> bool {
        if self.is_empty() || position.is_empty() {
            return false;
        }

        (0..2).all(|i| {
            let v = position.coordinate(i);
            self.min(i) <= v && v <= self.max(i)
        })
    }

    /// Smallest envelope containing this envelope and the position.
    pub fn expand_to_include(&self, position: &P) -> Self {
        if position.is_empty() {
            return self.clone();
        }

        if self.lower_left.is_empty() || self.upper_right.is_empty() {
            return Self {
                lower_left: *position,
                upper_right: *position,
                crs: self.crs.clone(),
            };
        }

        Self {
            lower_left: P::from_fn(|i| self.min(i).min(position.coordinate(i))),
            upper_right: P::from_fn(|i| self.max(i).max(position.coordinate(i))),
            crs: self.crs.clone(),
        }
    }
}

impl<P: Position> PartialEq for Envelope<P> {
    fn eq(&self, other: &Self) -> bool {
        if self.crs != other.crs {
            return false;
        }

        match (self.is_empty(), other.is_empty()) {
            (true, true) => true,
            (false, false) => {
                self.lower_left == other.lower_left && self.upper_right == other.upper_right
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::crs::CrsId;
    use crate::position::{C2D, C3D};

    fn env(x0: f64, y0: f64, x1: f64, y1: f64) -> Envelope<C2D> {
        Envelope::new(C2D::new(x0, y0), C2D::new(x1, y1), Crs::cartesian()).expect("valid")
    }

    #[test]
    fn construction() {
        assert_matches!(
            Envelope::new(C2D::new(1.0, 0.0), C2D::new(0.0, 1.0), Crs::cartesian()),
            Err(GeometryError::InvalidArgument(_))
        );
        assert!(env(1.0, 1.0, 1.0, 1.0).is_empty());
        assert!(Envelope::<C2D>::empty(Crs::cartesian()).is_empty());
        assert!(!env(0.0, 0.0, 1.0, 1.0).is_empty());
        assert_eq!(env(0.0, 1.0, 4.0, 3.0).width(), 4.0);
        assert_eq!(env(0.0, 1.0, 4.0, 3.0).height(), 2.0);
    }

    #[test]
    fn union_absorbs_empty() {
        let a = env(0.0, 0.0, 1.0, 1.0);
        let empty = Envelope::empty(Crs::cartesian());
        assert_eq!(a.union(&empty).expect("same crs"), a);
        assert_eq!(empty.union(&a).expect("same crs"), a);
        assert_eq!(
            a.union(&env(2.0, -1.0, 3.0, 0.5)).expect("same crs"),
            env(0.0, -1.0, 3.0, 1.0)
        );
    }

    #[test]
    fn intersection() {
        let a = env(0.0, 0.0, 2.0, 2.0);
        assert_eq!(
            a.intersect(&env(1.0, 1.0, 3.0, 3.0)).expect("same crs"),
            env(1.0, 1.0, 2.0, 2.0)
        );
        assert!(a.intersect(&env(3.0, 3.0, 4.0, 4.0)).expect("same crs").is_empty());
        assert!(a.intersects(&env(2.0, 2.0, 4.0, 4.0)).expect("same crs"));
        assert!(!a.intersects(&env(2.5, 2.0, 4.0, 4.0)).expect("same crs"));
    }

    #[test]
    fn within_and_contains() {
        let outer = env(0.0, 0.0, 10.0, 10.0);
        let inner = env(1.0, 1.0, 2.0, 2.0);
        assert!(inner.within(&outer).expect("same crs"));
        assert!(outer.contains(&inner).expect("same crs"));
        assert!(!outer.within(&inner).expect("same crs"));
        assert!(outer.contains_position(&C2D::new(10.0, 5.0)));
        assert!(!outer.contains_position(&C2D::new(10.5, 5.0)));
    }

    #[test]
    fn crs_mismatch_fails() {
        let a = env(0.0, 0.0, 1.0, 1.0);
        let b = Envelope::new(
            C2D::new(0.0, 0.0),
            C2D::new(1.0, 1.0),
            Crs::new(CrsId::epsg(3857), "other"),
        )
        .expect("valid");
        assert_matches!(a.union(&b), Err(GeometryError::InvalidArgument(_)));
        assert_matches!(a.intersect(&b), Err(GeometryError::InvalidArgument(_)));
        assert_matches!(a.within(&b), Err(GeometryError::InvalidArgument(_)));
        assert_matches!(a.contains(&b), Err(GeometryError::InvalidArgument(_)));
        assert_matches!(a.intersects(&b), Err(GeometryError::InvalidArgument(_)));
    }

    #[test]
    fn expand_folds_every_axis() {
        let seq = PositionSequence::<C3D>::from_coordinates(vec![
            1.0, 5.0, -1.0, //
            -2.0, 3.0, 4.0, //
            0.0, 7.0, 0.0,
        ])
        .expect("valid");
        let envelope = Envelope::from_positions(&seq, &Crs::cartesian().with_position());
        assert_eq!(envelope.lower_left(), &C3D::new(-2.0, 3.0, -1.0));
        assert_eq!(envelope.upper_right(), &C3D::new(1.0, 7.0, 4.0));
    }
}
