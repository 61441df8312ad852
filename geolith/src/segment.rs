//! Straight line segments between consecutive positions of a curve.

use nalgebra::Vector2;

use crate::position::Position;

/// A straight line segment between two positions.
///
/// All the distance computations are planar and use only the horizontal coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<P>(pub P, pub P);

impl<P: Position> Segment<P> {
    fn direction(&self) -> Vector2<f64> {
        Vector2::new(self.1.x() - self.0.x(), self.1.y() - self.0.y())
    }

    /// Returns true if both ends of the segment have the same horizontal coordinates.
    pub fn is_degenerate(&self) -> bool {
        self.0.x() == self.1.x() && self.0.y() == self.1.y()
    }

    /// Planar length of the segment.
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// Position of the projection of `point` onto the line through the segment, as a fraction of the segment
    /// length from the start. Values outside of `[0, 1]` mean the projection falls outside of the segment.
    ///
    /// Degenerate segments return `0`.
    pub fn projection_factor(&self, point: &impl Position) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }

        let ds = self.direction();
        let dp = Vector2::new(point.x() - self.0.x(), point.y() - self.0.y());
        dp.dot(&ds) / ds.norm_squared()
    }

    /// Shortest euclidian distance (squared) between a point and the segment:
    ///
    /// * if the normal from the point to the segment ends inside the segment, the returned value is the squared length
    ///   of the normal
    /// * if the normal from the point to the segment ends outside of the segment, the returned value is the smaller one
    ///   of the distances between the point and the segment's endpoints
    pub fn distance_to_point_sq(&self, point: &impl Position) -> f64 {
        let dp = Vector2::new(point.x() - self.0.x(), point.y() - self.0.y());
        if self.is_degenerate() {
            return dp.norm_squared();
        }

        let r = self.projection_factor(point);
        if r <= 0.0 {
            dp.norm_squared()
        } else if r >= 1.0 {
            Vector2::new(point.x() - self.1.x(), point.y() - self.1.y()).norm_squared()
        } else {
            let ds = self.direction();
            let ds_len = ds.norm_squared();
            let s = (dp.y * ds.x - dp.x * ds.y) / ds_len;
            (s * s) * ds_len
        }
    }

    /// Position at fraction `r` of the segment. Every coordinate, including the vertical component and the
    /// measure, is interpolated linearly.
    pub fn interpolate(&self, r: f64) -> P {
        P::from_fn(|i| {
            let start = self.0.coordinate(i);
            start + r * (self.1.coordinate(i) - start)
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::position::{C2D, C3DM};

    #[test]
    fn distance_to_point() {
        let segment = Segment(C2D::new(0.0, 0.0), C2D::new(2.0, 0.0));
        assert_eq!(segment.distance_to_point_sq(&C2D::new(1.0, 1.0)), 1.0);
        assert_eq!(segment.distance_to_point_sq(&C2D::new(-1.0, 0.0)), 1.0);
        assert_eq!(segment.distance_to_point_sq(&C2D::new(3.0, 1.0)), 2.0);
        assert_eq!(segment.distance_to_point_sq(&C2D::new(1.0, 0.0)), 0.0);

        let degenerate = Segment(C2D::new(1.0, 1.0), C2D::new(1.0, 1.0));
        assert_eq!(degenerate.distance_to_point_sq(&C2D::new(4.0, 5.0)), 25.0);
        assert_eq!(degenerate.projection_factor(&C2D::new(4.0, 5.0)), 0.0);
    }

    #[test]
    fn projection_factor() {
        let segment = Segment(C2D::new(0.0, 0.0), C2D::new(4.0, 0.0));
        assert_relative_eq!(segment.projection_factor(&C2D::new(1.0, 3.0)), 0.25);
        assert_relative_eq!(segment.projection_factor(&C2D::new(-4.0, 3.0)), -1.0);
        assert_relative_eq!(segment.projection_factor(&C2D::new(6.0, 0.0)), 1.5);
    }

    #[test]
    fn interpolate_all_components() {
        let segment = Segment(
            C3DM::new(0.0, 0.0, 10.0, 0.0),
            C3DM::new(10.0, 20.0, 20.0, 100.0),
        );
        let p = segment.interpolate(0.25);
        assert_relative_eq!(p.x(), 2.5);
        assert_relative_eq!(p.y(), 5.0);
        assert_relative_eq!(p.z(), 12.5);
        assert_relative_eq!(p.m(), 25.0);
        assert_eq!(segment.length(), (500.0f64).sqrt());
    }
}
