use approx::assert_relative_eq;
use chart_xkcd::api::{
    Chart, ChartContext, DOT_HOVER_RADIUS, DOT_RADIUS, MarkRenderer, MarkSetup, ScatterMarks,
};
use chart_xkcd::core::{
    ChartKind, ChartSpec, Dataset, Options, PlotArea, Point, Value, Viewport, XValue,
    compute_margins, resolve_for,
};
use chart_xkcd::interaction::{MarkHit, Modifiers, SelectionController, SelectionItem};
use chart_xkcd::render::{DistortionFilter, NullRenderer};

fn spec() -> ChartSpec {
    ChartSpec::new()
        .with_dataset(Dataset::points(
            "A",
            [Value::point(0.0, 0.0), Value::point(10.0, 10.0)],
        ))
        .with_dataset(Dataset::points("B", [Value::point(5.0, 5.0)]))
}

fn marks(spec: ChartSpec) -> ScatterMarks {
    let viewport = Viewport::new(600, 400);
    ScatterMarks::new(MarkSetup {
        options: resolve_for(ChartKind::Scatter, &spec),
        spec,
        viewport,
        plot: PlotArea::with_margin(viewport, compute_margins(false, false, false)),
        filter: DistortionFilter::new(false, false),
    })
}

#[test]
fn dots_span_the_data_extent() {
    let marks = marks(spec());
    assert_eq!(marks.dot_center(0, 0), Some(Point::new(50.0, 350.0)));
    assert_eq!(marks.dot_center(0, 1), Some(Point::new(570.0, 50.0)));
    assert_eq!(marks.dot_center(1, 0), Some(Point::new(310.0, 200.0)));
    assert_eq!(marks.dot_center(1, 1), None);
}

#[test]
fn plain_numbers_are_not_plotted() {
    let spec = ChartSpec::new().with_dataset(Dataset::new("n", [1.0, 2.0]));
    let marks = marks(spec);
    assert_eq!(marks.dot_center(0, 0), None);
    assert!(marks.draw_marks(None).is_empty());
}

#[test]
fn hovered_dot_grows() {
    let marks = marks(spec());
    let primitives = marks.draw_marks(Some(MarkHit::new(1, 0)));
    let radii: Vec<f64> = primitives
        .iter()
        .filter_map(|p| p.as_circle())
        .map(|circle| circle.radius)
        .collect();
    assert_eq!(radii, vec![DOT_RADIUS, DOT_RADIUS, DOT_HOVER_RADIUS]);
}

#[test]
fn connecting_lines_are_optional() {
    let with_line = spec().with_options(Options::new().with_show_line(true));
    let primitives = marks(with_line).draw_marks(None);
    assert_eq!(primitives.iter().filter(|p| p.as_path().is_some()).count(), 2);
    assert_eq!(primitives.iter().filter(|p| p.as_circle().is_some()).count(), 3);
}

#[test]
fn hit_test_uses_the_dot_radius() {
    let base = marks(spec());
    assert_eq!(base.hit_test(Point::new(312.0, 202.0)), Some(MarkHit::new(1, 0)));
    assert_eq!(base.hit_test(Point::new(310.0, 205.0)), None);

    let large = marks(spec().with_options(Options::new().with_dot_size(2.0)));
    assert_eq!(
        large.hit_test(Point::new(310.0, 205.0)),
        Some(MarkHit::new(1, 0))
    );
}

#[test]
fn tooltip_is_anchored_next_to_the_dot() {
    let marks = marks(spec());
    let feedback = marks.hover(MarkHit::new(0, 1), Point::new(570.0, 50.0));
    assert_eq!(feedback.title, "10");
    assert_eq!(feedback.items[0].text, "A: 10");
    assert_relative_eq!(feedback.anchor.x, 575.0);
    assert_relative_eq!(feedback.anchor.y, 55.0);
}

#[test]
fn click_on_a_dot_reports_the_point() {
    let controller = SelectionController::new();
    let spec = spec().with_options(Options::new().with_on_select(controller.handler()));
    let mut chart = Chart::scatter(
        NullRenderer::default(),
        spec,
        &ChartContext::new(Viewport::new(600, 400)),
    )
    .expect("chart");
    chart
        .click(Point::new(310.0, 200.0), Modifiers::NONE)
        .expect("click");
    assert_eq!(
        controller.selection().items(),
        &[SelectionItem::Point {
            dataset_index: 1,
            point_index: 0,
            label: Some("B".to_owned()),
            x: XValue::Number(5.0),
            y: 5.0,
        }]
    );
}
