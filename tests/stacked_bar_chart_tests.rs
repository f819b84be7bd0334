use approx::assert_relative_eq;
use chart_xkcd::api::{Chart, ChartContext, MarkRenderer, MarkSetup, StackedBarMarks};
use chart_xkcd::core::{
    BAND_PADDING, BandScale, ChartKind, ChartSpec, Dataset, Options, PlotArea, Point, Viewport,
    compute_margins, resolve_for,
};
use chart_xkcd::interaction::{MarkHit, Modifiers, SelectionController, SelectionItem};
use chart_xkcd::render::{DistortionFilter, NullRenderer};

fn spec() -> ChartSpec {
    ChartSpec::new()
        .with_labels(["x", "y"])
        .with_dataset(Dataset::new("A", [1.0, 2.0]))
        .with_dataset(Dataset::new("B", [3.0, 4.0]))
}

fn marks() -> StackedBarMarks {
    let viewport = Viewport::new(600, 400);
    let spec = spec();
    StackedBarMarks::new(MarkSetup {
        options: resolve_for(ChartKind::StackedBar, &spec),
        spec,
        viewport,
        plot: PlotArea::with_margin(viewport, compute_margins(false, false, false)),
        filter: DistortionFilter::new(false, false),
    })
}

fn column_x(category: usize) -> f64 {
    50.0 + BandScale::new(2, (0.0, 520.0), BAND_PADDING).center(category)
}

#[test]
fn value_axis_spans_the_tallest_stack() {
    let marks = marks();
    assert_eq!(marks.stack().totals(), &[4.0, 6.0]);
    assert_eq!(marks.value_scale().domain(), (0.0, 6.0));
}

#[test]
fn segments_stack_in_dataset_order() {
    let marks = marks();
    let bottom = marks.segment_bounds(0, 0);
    let top = marks.segment_bounds(1, 0);
    assert_relative_eq!(bottom.bottom(), 350.0);
    assert_relative_eq!(bottom.height, 50.0);
    assert_relative_eq!(top.bottom(), bottom.y);
    assert_relative_eq!(top.height, 150.0);
}

#[test]
fn every_segment_is_filled_with_its_dataset_color() {
    let marks = marks();
    let primitives = marks.draw_marks(None);
    assert_eq!(primitives.len(), 4);
    assert!(
        primitives
            .iter()
            .all(|p| p.as_rect().is_some_and(|r| r.fill_color.is_some()))
    );
}

#[test]
fn hit_test_resolves_the_segment() {
    let marks = marks();
    assert_eq!(marks.hit_test(Point::new(column_x(0), 325.0)), Some(MarkHit::new(0, 0)));
    assert_eq!(marks.hit_test(Point::new(column_x(0), 200.0)), Some(MarkHit::new(1, 0)));
    assert_eq!(marks.hit_test(Point::new(column_x(0), 120.0)), None);
}

#[test]
fn zero_height_segments_are_not_hit() {
    let viewport = Viewport::new(600, 400);
    let spec = ChartSpec::new()
        .with_labels(["x"])
        .with_dataset(Dataset::new("A", [0.0]))
        .with_dataset(Dataset::new("B", [5.0]));
    let marks = StackedBarMarks::new(MarkSetup {
        options: resolve_for(ChartKind::StackedBar, &spec),
        spec,
        viewport,
        plot: PlotArea::with_margin(viewport, compute_margins(false, false, false)),
        filter: DistortionFilter::new(false, false),
    });
    let x = 50.0 + BandScale::new(1, (0.0, 520.0), BAND_PADDING).center(0);
    assert_eq!(marks.hit_test(Point::new(x, 350.0)), Some(MarkHit::new(1, 0)));
}

#[test]
fn tooltip_lists_datasets_top_down() {
    let marks = marks();
    let feedback = marks.hover(MarkHit::new(0, 1), Point::new(column_x(1), 300.0));
    assert_eq!(feedback.title, "y");
    let rows: Vec<_> = feedback.items.iter().map(|item| item.text.as_str()).collect();
    assert_eq!(rows, vec!["B: 4", "A: 2"]);
}

#[test]
fn legend_is_reversed_to_match_the_stack() {
    let marks = marks();
    let legend: Vec<_> = marks.legend_items().into_iter().map(|item| item.text).collect();
    assert_eq!(legend, vec!["B", "A"]);
}

#[test]
fn click_reports_the_segment() {
    let controller = SelectionController::new();
    let spec = spec().with_options(Options::new().with_on_select(controller.handler()));
    let mut chart = Chart::stacked_bar(
        NullRenderer::default(),
        spec,
        &ChartContext::new(Viewport::new(600, 400)),
    )
    .expect("chart");
    assert!(chart.legend().is_some());

    chart
        .click(Point::new(column_x(0), 200.0), Modifiers::NONE)
        .expect("click");
    assert_eq!(
        controller.selection().items(),
        &[SelectionItem::Segment {
            index: 0,
            label: "x".to_owned(),
            dataset: Some("B".to_owned()),
            value: 3.0,
        }]
    );
}
