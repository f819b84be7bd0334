use chart_xkcd::core::{Quadrant, tooltip_quadrant};

#[test]
fn tooltip_opens_away_from_the_nearest_corner() {
    assert_eq!(tooltip_quadrant(10.0, 10.0, 100.0, 100.0), Quadrant::DownRight);
    assert_eq!(tooltip_quadrant(90.0, 10.0, 100.0, 100.0), Quadrant::DownLeft);
    assert_eq!(tooltip_quadrant(90.0, 90.0, 100.0, 100.0), Quadrant::UpLeft);
    assert_eq!(tooltip_quadrant(10.0, 90.0, 100.0, 100.0), Quadrant::UpRight);
}

#[test]
fn exact_midlines_fall_back_to_down_right() {
    assert_eq!(tooltip_quadrant(50.0, 50.0, 100.0, 100.0), Quadrant::DownRight);
    assert_eq!(tooltip_quadrant(50.0, 10.0, 100.0, 100.0), Quadrant::DownRight);
    assert_eq!(tooltip_quadrant(90.0, 50.0, 100.0, 100.0), Quadrant::DownRight);
}

#[test]
fn wire_codes_and_names_round_trip() {
    for quadrant in [
        Quadrant::UpLeft,
        Quadrant::UpRight,
        Quadrant::DownLeft,
        Quadrant::DownRight,
    ] {
        assert_eq!(Quadrant::from_code(i64::from(quadrant.code())), Some(quadrant));
    }
    assert_eq!(Quadrant::from_code(0), None);
    assert_eq!(Quadrant::from_name("downLeft"), Some(Quadrant::DownLeft));
    assert_eq!(Quadrant::from_name("DownLeft"), None);
    assert!(Quadrant::UpLeft.is_left() && Quadrant::UpLeft.is_up());
    assert!(!Quadrant::DownRight.is_left() && !Quadrant::DownRight.is_up());
}
