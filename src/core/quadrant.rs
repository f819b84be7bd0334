use serde::{Deserialize, Serialize};

/// Direction an overlay box extends away from its anchor.
///
/// Shared by tooltip placement (chosen from the pointer) and legend
/// placement (chosen by the caller as a corner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Quadrant {
    #[default]
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Quadrant {
    /// Integer code used by the wire format (1..=4).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Quadrant::UpLeft => 1,
            Quadrant::UpRight => 2,
            Quadrant::DownLeft => 3,
            Quadrant::DownRight => 4,
        }
    }

    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Quadrant::UpLeft),
            2 => Some(Quadrant::UpRight),
            3 => Some(Quadrant::DownLeft),
            4 => Some(Quadrant::DownRight),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "upLeft" => Some(Quadrant::UpLeft),
            "upRight" => Some(Quadrant::UpRight),
            "downLeft" => Some(Quadrant::DownLeft),
            "downRight" => Some(Quadrant::DownRight),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_left(self) -> bool {
        matches!(self, Quadrant::UpLeft | Quadrant::DownLeft)
    }

    #[must_use]
    pub const fn is_up(self) -> bool {
        matches!(self, Quadrant::UpLeft | Quadrant::UpRight)
    }
}

/// Picks the quadrant that keeps a tooltip away from the nearest plot edge.
///
/// `x`/`y` are measured from the plot area's top-left corner.
#[must_use]
pub fn tooltip_quadrant(x: f64, y: f64, width: f64, height: f64) -> Quadrant {
    let mid_x = width / 2.0;
    let mid_y = height / 2.0;
    if x > mid_x && y < mid_y {
        Quadrant::DownLeft
    } else if x > mid_x && y > mid_y {
        Quadrant::UpLeft
    } else if x < mid_x && y > mid_y {
        Quadrant::UpRight
    } else {
        Quadrant::DownRight
    }
}
