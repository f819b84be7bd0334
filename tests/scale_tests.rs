use approx::assert_relative_eq;
use chart_xkcd::core::scale::extent;
use chart_xkcd::core::{BAND_PADDING, BandScale, LinearScale, PointScale, nearest_index};

#[test]
fn linear_scale_maps_and_inverts() {
    let scale = LinearScale::new((0.0, 30.0), (300.0, 0.0));
    assert_relative_eq!(scale.map(0.0), 300.0);
    assert_relative_eq!(scale.map(15.0), 150.0);
    assert_relative_eq!(scale.map(30.0), 0.0);
    assert_relative_eq!(scale.invert(100.0), 20.0);
}

#[test]
fn zero_based_scale_starts_at_zero() {
    let scale = LinearScale::zero_based([12.0, 40.0, 7.0], (300.0, 0.0));
    assert_eq!(scale.domain(), (0.0, 40.0));
    let scale = LinearScale::from_extent([12.0, 40.0, 7.0], (300.0, 0.0));
    assert_eq!(scale.domain(), (7.0, 40.0));
}

#[test]
fn extent_skips_non_finite_values() {
    assert_eq!(extent([f64::NAN, 3.0, f64::INFINITY, -2.0]), Some((-2.0, 3.0)));
    assert_eq!(extent([f64::NAN]), None);
}

#[test]
fn single_value_extent_is_degenerate_not_broken() {
    let scale = LinearScale::from_extent([5.0, 5.0], (300.0, 0.0));
    assert!(scale.is_degenerate());
    assert!(scale.map(5.0).is_finite());
    assert_relative_eq!(scale.map(5.0), 150.0);
}

#[test]
fn band_scale_pads_inside_and_outside() {
    let scale = BandScale::new(3, (0.0, 520.0), BAND_PADDING);
    let step = 520.0 / 3.4;
    assert_relative_eq!(scale.step(), step, epsilon = 1e-9);
    assert_relative_eq!(scale.bandwidth(), step * 0.6, epsilon = 1e-9);
    assert_relative_eq!(scale.position(0), step * 0.4, epsilon = 1e-9);
    // outer padding is symmetric
    let right_gap = 520.0 - (scale.position(2) + scale.bandwidth());
    assert_relative_eq!(right_gap, scale.position(0), epsilon = 1e-9);
    assert_relative_eq!(scale.center(1), 260.0, epsilon = 1e-9);
}

#[test]
fn point_scale_spans_the_range_without_padding() {
    let scale = PointScale::new(3, (0.0, 520.0));
    assert_eq!(scale.positions(), vec![0.0, 260.0, 520.0]);
    assert_eq!(PointScale::new(1, (0.0, 520.0)).position(0), 260.0);
    assert!(PointScale::new(0, (0.0, 520.0)).nearest_index(10.0).is_none());
}

#[test]
fn nearest_index_prefers_the_first_of_two_ties() {
    assert_eq!(nearest_index(&[0.0, 260.0, 520.0], 130.0), Some(0));
    assert_eq!(nearest_index(&[0.0, 260.0, 520.0], 131.0), Some(1));
    assert_eq!(nearest_index(&[0.0, 260.0, 520.0], 900.0), Some(2));
    assert_eq!(nearest_index(&[], 1.0), None);
}

#[test]
fn ticks_are_nice_numbers_inside_the_domain() {
    let ticks = LinearScale::new((0.0, 30.0), (300.0, 0.0)).ticks(3);
    assert_eq!(ticks, vec![0.0, 10.0, 20.0, 30.0]);
}
