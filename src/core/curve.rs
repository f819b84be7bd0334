//! Path generators for lines and polygons.

use crate::core::types::Point;
use crate::render::PathCommand;

/// Smooth curve through `points` that preserves monotonicity in y between
/// consecutive samples (Fritsch-Carlson style tangents, cubic segments).
///
/// Points are expected in increasing x order. Non-finite points and exact
/// repeats of the previous point are skipped.
#[must_use]
pub fn monotone_x(points: &[Point]) -> Vec<PathCommand> {
    let mut builder = MonotoneBuilder::default();
    for point in points.iter().filter(|point| point.is_finite()) {
        builder.push(*point);
    }
    builder.finish()
}

/// Straight segments through `points`, closed back to the first one.
#[must_use]
pub fn linear_closed(points: &[Point]) -> Vec<PathCommand> {
    let mut commands = Vec::with_capacity(points.len() + 1);
    let mut finite = points.iter().filter(|point| point.is_finite());
    let Some(first) = finite.next() else {
        return commands;
    };
    commands.push(PathCommand::MoveTo {
        x: first.x,
        y: first.y,
    });
    for point in finite {
        commands.push(PathCommand::LineTo {
            x: point.x,
            y: point.y,
        });
    }
    commands.push(PathCommand::Close);
    commands
}

#[derive(Debug, Default)]
struct MonotoneBuilder {
    commands: Vec<PathCommand>,
    seen: u8,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    t0: f64,
}

impl MonotoneBuilder {
    fn push(&mut self, point: Point) {
        let (x, y) = (point.x, point.y);
        if self.seen > 0 && x == self.x1 && y == self.y1 {
            return;
        }

        let mut t1 = f64::NAN;
        match self.seen {
            0 => {
                self.seen = 1;
                self.commands.push(PathCommand::MoveTo { x, y });
            }
            1 => self.seen = 2,
            2 => {
                self.seen = 3;
                t1 = self.slope3(x, y);
                let t0 = self.slope2(t1);
                self.segment(t0, t1);
            }
            _ => {
                t1 = self.slope3(x, y);
                self.segment(self.t0, t1);
            }
        }

        self.x0 = self.x1;
        self.x1 = x;
        self.y0 = self.y1;
        self.y1 = y;
        self.t0 = t1;
    }

    fn finish(mut self) -> Vec<PathCommand> {
        match self.seen {
            2 => self.commands.push(PathCommand::LineTo {
                x: self.x1,
                y: self.y1,
            }),
            3 => {
                let t1 = self.slope2(self.t0);
                self.segment(self.t0, t1);
            }
            _ => {}
        }
        self.commands
    }

    /// Tangent at the middle point of the last three samples.
    fn slope3(&self, x2: f64, y2: f64) -> f64 {
        let h0 = self.x1 - self.x0;
        let h1 = x2 - self.x1;
        let s0 = (self.y1 - self.y0) / nonzero_or_signed_zero(h0, h1);
        let s1 = (y2 - self.y1) / nonzero_or_signed_zero(h1, h0);
        let p = (s0 * h1 + s1 * h0) / (h0 + h1);
        let slope = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
        if slope.is_nan() { 0.0 } else { slope }
    }

    /// One-sided tangent for the end points.
    fn slope2(&self, t: f64) -> f64 {
        let h = self.x1 - self.x0;
        if h == 0.0 || h.is_nan() {
            t
        } else {
            (3.0 * (self.y1 - self.y0) / h - t) / 2.0
        }
    }

    fn segment(&mut self, t0: f64, t1: f64) {
        let dx = (self.x1 - self.x0) / 3.0;
        self.commands.push(PathCommand::CubicTo {
            x1: self.x0 + dx,
            y1: self.y0 + dx * t0,
            x2: self.x1 - dx,
            y2: self.y1 - dx * t1,
            x: self.x1,
            y: self.y1,
        });
    }
}

fn sign(value: f64) -> f64 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

fn nonzero_or_signed_zero(value: f64, other: f64) -> f64 {
    if value != 0.0 {
        value
    } else if other < 0.0 {
        -0.0
    } else {
        0.0
    }
}
