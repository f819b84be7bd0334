use std::f64::consts::{FRAC_PI_2, TAU};

use crate::core::scale::LinearScale;
use crate::core::types::Point;

/// Angle of spoke `index` out of `count`; spoke 0 points straight up and
/// the rest follow clockwise.
#[must_use]
pub fn direction_angle(index: usize, count: usize) -> f64 {
    if count == 0 {
        return -FRAC_PI_2;
    }
    index as f64 * TAU / count as f64 - FRAC_PI_2
}

/// Shared center, radius and magnitude scale of a radar chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarGeometry {
    pub center: Point,
    pub radius: f64,
    pub direction_count: usize,
    value_scale: LinearScale,
}

impl RadarGeometry {
    #[must_use]
    pub fn new(center: Point, radius: f64, max_value: f64, direction_count: usize) -> Self {
        Self {
            center,
            radius,
            direction_count,
            value_scale: LinearScale::new((0.0, max_value), (0.0, radius)),
        }
    }

    #[must_use]
    pub fn value_scale(&self) -> LinearScale {
        self.value_scale
    }

    #[must_use]
    pub fn angle(&self, index: usize) -> f64 {
        direction_angle(index, self.direction_count)
    }

    /// Position of `value` on spoke `index`.
    #[must_use]
    pub fn point(&self, value: f64, index: usize) -> Point {
        self.point_at_radius(self.value_scale.map(value), index)
    }

    #[must_use]
    pub fn point_at_radius(&self, radius: f64, index: usize) -> Point {
        let angle = self.angle(index);
        Point::new(
            self.center.x + radius * angle.cos(),
            self.center.y + radius * angle.sin(),
        )
    }

    /// One vertex per spoke at the same magnitude.
    #[must_use]
    pub fn ring(&self, value: f64) -> Vec<Point> {
        (0..self.direction_count)
            .map(|index| self.point(value, index))
            .collect()
    }

    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        self.value_scale.ticks(count)
    }
}

#[cfg(test)]
mod tests {
    use super::{RadarGeometry, direction_angle};
    use crate::core::Point;

    #[test]
    fn first_spoke_points_up_and_second_clockwise() {
        let geometry = RadarGeometry::new(Point::new(100.0, 100.0), 50.0, 10.0, 4);
        let top = geometry.point(10.0, 0);
        assert!((top.x - 100.0).abs() < 1e-9 && (top.y - 50.0).abs() < 1e-9);
        let right = geometry.point(5.0, 1);
        assert!((right.x - 125.0).abs() < 1e-9 && (right.y - 100.0).abs() < 1e-9);
        assert_eq!(direction_angle(0, 0), direction_angle(0, 7));
    }
}
