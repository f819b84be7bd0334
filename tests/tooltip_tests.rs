use approx::assert_relative_eq;
use chart_xkcd::api::{OverlayStyle, SwatchItem, Tooltip, TooltipPosition, TooltipUpdate};
use chart_xkcd::core::{Point, Quadrant};
use chart_xkcd::render::{Color, FontWeight, HeuristicTextMeasurer, Primitive, TextMeasurer};

fn style() -> OverlayStyle {
    OverlayStyle {
        background: Color::WHITE,
        stroke: Color::BLACK,
        filter: None,
    }
}

fn content() -> TooltipUpdate {
    TooltipUpdate::new()
        .with_title("c")
        .with_items(vec![SwatchItem::new(Color::BLACK, "series: 30")])
}

#[test]
fn hidden_tooltip_draws_nothing() {
    let tooltip = Tooltip::new(style());
    assert!(!tooltip.is_visible());
    assert!(tooltip.primitives().is_empty());
}

#[test]
fn only_content_changes_trigger_a_measure() {
    let measurer = HeuristicTextMeasurer::default();
    let mut tooltip = Tooltip::new(style());

    assert!(tooltip.update(content(), &measurer));
    assert_eq!(tooltip.measure_count(), 1);

    assert!(!tooltip.update(content(), &measurer));
    assert_eq!(tooltip.measure_count(), 1);

    let moved = TooltipUpdate::new().with_position(TooltipPosition::new(
        Point::new(40.0, 40.0),
        Quadrant::UpRight,
    ));
    assert!(!tooltip.update(moved, &measurer));
    assert_eq!(tooltip.measure_count(), 1);
    assert_eq!(tooltip.state().position.quadrant, Quadrant::UpRight);
    assert_eq!(tooltip.state().title, "c");
}

#[test]
fn size_follows_the_widest_row() {
    let measurer = HeuristicTextMeasurer::default();
    let mut tooltip = Tooltip::new(style());
    tooltip.update(content(), &measurer);

    // 10 glyphs * 15px * 0.5em, plus the row's swatch and text offsets,
    // plus the trailing item offset
    let (width, height) = tooltip.size();
    assert_relative_eq!(width, 15.0 + 12.0 + 75.0 + 15.0);
    assert_relative_eq!(height, 2.0 * 20.0 + 10.0);
}

#[test]
fn quadrant_decides_which_side_of_the_anchor_the_box_opens() {
    let measurer = HeuristicTextMeasurer::default();
    let mut tooltip = Tooltip::new(style());
    tooltip.update(content(), &measurer);
    let (width, height) = tooltip.size();
    let anchor = Point::new(100.0, 100.0);

    tooltip.update(
        TooltipUpdate::new().with_position(TooltipPosition::new(anchor, Quadrant::DownRight)),
        &measurer,
    );
    assert_eq!(tooltip.origin(), anchor);

    tooltip.update(
        TooltipUpdate::new().with_position(TooltipPosition::new(anchor, Quadrant::UpLeft)),
        &measurer,
    );
    let origin = tooltip.origin();
    assert_relative_eq!(origin.x, 100.0 - width - 20.0);
    assert_relative_eq!(origin.y, 100.0 - height - 20.0);
}

#[test]
fn visible_tooltip_draws_background_title_and_rows() {
    let measurer = HeuristicTextMeasurer::default();
    let mut tooltip = Tooltip::new(style());
    tooltip.update(
        content().with_position(TooltipPosition::new(Point::new(10.0, 10.0), Quadrant::DownRight)),
        &measurer,
    );
    tooltip.show();

    let primitives = tooltip.primitives();
    assert_eq!(primitives.len(), 4);
    let background = primitives[0].as_rect().expect("background rect");
    assert_eq!((background.x, background.y), (15.0, 15.0));
    assert_eq!(background.fill_opacity, 0.9);

    let title = primitives[1].as_text().expect("title");
    assert_eq!(title.text, "c");
    assert_eq!(title.weight, FontWeight::Bold);
    assert!(matches!(primitives[2], Primitive::Rect(_)));
    assert_eq!(primitives[3].as_text().map(|text| text.text.as_str()), Some("series: 30"));

    tooltip.hide();
    assert!(tooltip.primitives().is_empty());
}

#[test]
fn a_wide_title_sets_the_width_when_rows_are_narrower() {
    let measurer = HeuristicTextMeasurer::default();
    let mut tooltip = Tooltip::new(style());
    let title = "a title that is much longer";
    tooltip.update(
        TooltipUpdate::new()
            .with_title(title)
            .with_items(vec![SwatchItem::new(Color::BLACK, "x: 1")]),
        &measurer,
    );
    let title_width = measurer.measure(title, 15.0, FontWeight::Bold).width;
    let (width, _) = tooltip.size();
    assert_relative_eq!(width, title_width + 15.0);
}
