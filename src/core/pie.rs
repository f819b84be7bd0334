use std::cmp::Ordering;
use std::f64::consts::{PI, TAU};

use crate::core::types::Point;
use crate::render::PathCommand;

const EPSILON: f64 = 1e-12;

/// Angular extent of one value, radians clockwise from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSlice {
    pub index: usize,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSlice {
    #[must_use]
    pub fn sweep(self) -> f64 {
        self.end_angle - self.start_angle
    }

    #[must_use]
    pub fn mid_angle(self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

/// Lays out `values` over a full turn, returned in input order.
///
/// Angles are handed out largest value first (ties keep input order); only
/// positive values take up space.
#[must_use]
pub fn pie_layout(values: &[f64]) -> Vec<PieSlice> {
    let sum: f64 = values.iter().copied().filter(|value| *value > 0.0).sum();
    let scale = if sum > 0.0 { TAU / sum } else { 0.0 };

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        values[b]
            .partial_cmp(&values[a])
            .unwrap_or(Ordering::Equal)
    });

    let mut slices: Vec<PieSlice> = values
        .iter()
        .enumerate()
        .map(|(index, value)| PieSlice {
            index,
            value: *value,
            start_angle: 0.0,
            end_angle: 0.0,
        })
        .collect();

    let mut angle = 0.0;
    for index in order {
        let value = values[index];
        let end = angle + if value > 0.0 { value * scale } else { 0.0 };
        slices[index].start_angle = angle;
        slices[index].end_angle = end;
        angle = end;
    }
    slices
}

/// Point at `radius` and `angle` (clockwise from 12 o'clock) around `center`.
#[must_use]
pub fn polar_point(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(center.x + radius * angle.sin(), center.y - radius * angle.cos())
}

/// Angle of `offset` (relative to the center), clockwise from 12 o'clock in `[0, 2π)`.
#[must_use]
pub fn clockwise_angle(offset: Point) -> f64 {
    let angle = offset.x.atan2(-offset.y);
    if angle < 0.0 { angle + TAU } else { angle }
}

/// Outline of an annular sector; `inner == 0` gives a solid wedge.
#[must_use]
pub fn arc_path(center: Point, inner: f64, outer: f64, start: f64, end: f64) -> Vec<PathCommand> {
    let (inner, outer) = if outer < inner {
        (outer, inner)
    } else {
        (inner, outer)
    };
    if outer <= EPSILON {
        return vec![PathCommand::MoveTo {
            x: center.x,
            y: center.y,
        }];
    }

    let sweep = (end - start).abs();
    let clockwise = end >= start;
    let mut commands = Vec::with_capacity(8);

    if sweep > TAU - EPSILON {
        push_full_circle(&mut commands, center, outer, start, clockwise);
        if inner > EPSILON {
            push_full_circle(&mut commands, center, inner, end, !clockwise);
        }
        commands.push(PathCommand::Close);
        return commands;
    }

    let outer_start = polar_point(center, outer, start);
    let outer_end = polar_point(center, outer, end);
    commands.push(PathCommand::MoveTo {
        x: outer_start.x,
        y: outer_start.y,
    });
    if sweep > EPSILON {
        commands.push(PathCommand::ArcTo {
            rx: outer,
            ry: outer,
            large_arc: sweep >= PI,
            sweep: clockwise,
            x: outer_end.x,
            y: outer_end.y,
        });
    }

    if inner > EPSILON {
        let inner_end = polar_point(center, inner, end);
        let inner_start = polar_point(center, inner, start);
        commands.push(PathCommand::LineTo {
            x: inner_end.x,
            y: inner_end.y,
        });
        if sweep > EPSILON {
            commands.push(PathCommand::ArcTo {
                rx: inner,
                ry: inner,
                large_arc: sweep >= PI,
                sweep: !clockwise,
                x: inner_start.x,
                y: inner_start.y,
            });
        }
    } else {
        commands.push(PathCommand::LineTo {
            x: center.x,
            y: center.y,
        });
    }
    commands.push(PathCommand::Close);
    commands
}

/// A full circle cannot be one SVG arc, so it is drawn as two halves.
fn push_full_circle(
    commands: &mut Vec<PathCommand>,
    center: Point,
    radius: f64,
    from: f64,
    clockwise: bool,
) {
    let start = polar_point(center, radius, from);
    let opposite = polar_point(center, radius, from + PI);
    commands.push(PathCommand::MoveTo {
        x: start.x,
        y: start.y,
    });
    for target in [opposite, start] {
        commands.push(PathCommand::ArcTo {
            rx: radius,
            ry: radius,
            large_arc: false,
            sweep: clockwise,
            x: target.x,
            y: target.y,
        });
    }
}

/// Whether `offset` (relative to the center) falls inside the slice's sector.
#[must_use]
pub fn sector_contains(slice: PieSlice, inner: f64, outer: f64, offset: Point) -> bool {
    if slice.sweep() <= EPSILON {
        return false;
    }
    let distance = offset.x.hypot(offset.y);
    if distance < inner || distance > outer {
        return false;
    }
    let angle = clockwise_angle(offset);
    angle >= slice.start_angle && angle < slice.end_angle
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    use super::{arc_path, clockwise_angle, pie_layout, sector_contains};
    use crate::core::Point;
    use crate::render::PathCommand;

    #[test]
    fn largest_value_starts_at_twelve_o_clock() {
        let slices = pie_layout(&[1.0, 3.0]);
        assert_eq!(slices[1].start_angle, 0.0);
        assert!((slices[1].end_angle - 1.5 * PI).abs() < 1e-12);
        assert!((slices[0].start_angle - 1.5 * PI).abs() < 1e-12);
        assert!((slices[0].end_angle - TAU).abs() < 1e-12);
    }

    #[test]
    fn non_positive_values_take_no_space() {
        let slices = pie_layout(&[0.0, -2.0, 5.0]);
        assert_eq!(slices[0].sweep(), 0.0);
        assert_eq!(slices[1].sweep(), 0.0);
        assert!((slices[2].sweep() - TAU).abs() < 1e-12);
        assert!(pie_layout(&[0.0, 0.0]).iter().all(|slice| slice.sweep() == 0.0));
    }

    #[test]
    fn angles_run_clockwise_from_the_top() {
        assert!((clockwise_angle(Point::new(1.0, 0.0)) - FRAC_PI_2).abs() < 1e-12);
        assert!((clockwise_angle(Point::new(0.0, 1.0)) - PI).abs() < 1e-12);
        assert_eq!(clockwise_angle(Point::new(0.0, -1.0)), 0.0);
    }

    #[test]
    fn wedge_without_hole_returns_through_center() {
        let commands = arc_path(Point::new(0.0, 0.0), 0.0, 10.0, 0.0, FRAC_PI_2);
        assert_eq!(commands.len(), 4);
        assert_eq!(commands[2], PathCommand::LineTo { x: 0.0, y: 0.0 });
    }

    #[test]
    fn sector_hit_test_respects_hole() {
        let slices = pie_layout(&[1.0, 1.0]);
        assert!(sector_contains(slices[0], 5.0, 10.0, Point::new(8.0, 0.0)));
        assert!(!sector_contains(slices[0], 5.0, 10.0, Point::new(2.0, 0.0)));
        assert!(sector_contains(slices[1], 5.0, 10.0, Point::new(-8.0, 0.0)));
    }
}
