use chart_xkcd::core::{Quadrant, tooltip_quadrant};
use proptest::prelude::*;

proptest! {
    #[test]
    fn tooltip_opens_away_from_the_nearest_edges(
        width in 10.0f64..2_000.0,
        height in 10.0f64..2_000.0,
        fx in 0.0f64..1.0,
        fy in 0.0f64..1.0
    ) {
        let x = width * fx;
        let y = height * fy;
        prop_assume!(x != width / 2.0 && y != height / 2.0);
        let quadrant = tooltip_quadrant(x, y, width, height);
        let right_half = x > width / 2.0;
        let lower_half = y > height / 2.0;

        prop_assert_eq!(quadrant.is_left(), right_half);
        if right_half {
            prop_assert_eq!(quadrant.is_up(), lower_half);
        } else {
            prop_assert_eq!(
                quadrant,
                if lower_half { Quadrant::UpRight } else { Quadrant::DownRight }
            );
        }
    }
}
