use chart_xkcd::api::{Chart, ChartContext, ChartState};
use chart_xkcd::core::{ChartKind, ChartSpec, Dataset, Options, Point, Value, Viewport};
use chart_xkcd::interaction::{
    InteractionMode, Modifiers, PointerButton, SelectionController,
};
use chart_xkcd::render::NullRenderer;
use chart_xkcd::{ChartError, ChartResult};

fn bar_spec() -> ChartSpec {
    ChartSpec::new()
        .with_labels(["a", "b", "c"])
        .with_dataset(Dataset::new("s", [10.0, 20.0, 30.0]))
}

fn scatter_spec(controller: &SelectionController) -> ChartSpec {
    ChartSpec::new()
        .with_dataset(Dataset::points(
            "A",
            [Value::point(0.0, 0.0), Value::point(10.0, 10.0)],
        ))
        .with_options(Options::new().with_on_select(controller.handler()))
}

fn build(kind: ChartKind, spec: ChartSpec, context: &ChartContext) -> ChartResult<Chart<NullRenderer>> {
    Chart::new(kind, NullRenderer::default(), spec, context)
}

#[test]
fn construction_draws_exactly_once() {
    let chart = build(
        ChartKind::Bar,
        bar_spec(),
        &ChartContext::new(Viewport::new(600, 400)),
    )
    .expect("chart");
    assert_eq!(chart.state(), ChartState::Rendered);
    assert!(chart.is_live());
    assert_eq!(chart.renderer().render_count, 1);
    assert!(chart.renderer().last_primitive_count > 0);
    assert!(chart.renderer().last_text_count > 0);
    assert_eq!(chart.interaction_mode(), InteractionMode::Idle);
}

#[test]
fn every_kind_builds_from_the_same_entry_point() {
    let context = ChartContext::new(Viewport::new(600, 400));
    let spec = bar_spec().with_dataset(Dataset::new("t", [3.0, 2.0, 1.0]));
    for kind in ChartKind::ALL {
        let chart = build(kind, spec.clone(), &context).expect("chart");
        assert_eq!(chart.kind(), kind);
        assert_eq!(chart.renderer().render_count, 1);
    }
}

#[test]
fn zero_sized_viewports_are_rejected() {
    let err = build(
        ChartKind::Bar,
        bar_spec(),
        &ChartContext::new(Viewport::new(0, 400)),
    )
    .err()
    .expect("error");
    assert!(matches!(
        err,
        ChartError::InvalidViewport {
            width: 0,
            height: 400
        }
    ));
}

#[test]
fn empty_data_still_draws() {
    let context = ChartContext::new(Viewport::new(600, 400));
    for kind in ChartKind::ALL {
        let chart = build(kind, ChartSpec::new(), &context).expect("chart");
        assert_eq!(chart.renderer().render_count, 1);
        assert!(chart.legend().is_none());
    }
}

#[test]
fn each_chart_gets_its_own_id() {
    let context = ChartContext::new(Viewport::new(600, 400));
    let first = build(ChartKind::Bar, bar_spec(), &context).expect("chart");
    let second = build(ChartKind::Bar, bar_spec(), &context).expect("chart");
    assert_ne!(first.id(), second.id());
}

#[test]
fn disposed_charts_ignore_input() {
    let context = ChartContext::new(Viewport::new(600, 400));
    let mut chart = build(ChartKind::Line, bar_spec(), &context).expect("chart");
    chart.dispose();
    chart.dispose();
    assert_eq!(chart.state(), ChartState::Disposed);
    assert!(!chart.is_live());

    chart.pointer_move(Point::new(300.0, 200.0)).expect("move");
    chart.complete_layout().expect("layout");
    assert_eq!(chart.renderer().render_count, 1);
    assert!(!chart.tooltip().is_visible());
}

#[test]
fn detached_surfaces_ignore_input() {
    let context = ChartContext::new(Viewport::new(600, 400));
    let mut chart = build(ChartKind::Line, bar_spec(), &context).expect("chart");
    chart.renderer_mut().detach();
    assert!(!chart.is_live());
    chart.pointer_move(Point::new(300.0, 200.0)).expect("move");
    assert_eq!(chart.renderer().render_count, 1);
    assert!(chart.hovered().is_none());
}

#[test]
fn hovering_changes_the_interaction_mode() {
    let context = ChartContext::new(Viewport::new(600, 400));
    let mut chart = build(ChartKind::Line, bar_spec(), &context).expect("chart");
    chart.pointer_move(Point::new(300.0, 200.0)).expect("move");
    assert_eq!(chart.interaction_mode(), InteractionMode::Hovering);
    chart.pointer_leave().expect("leave");
    assert_eq!(chart.interaction_mode(), InteractionMode::Idle);
}

#[test]
fn drag_listeners_come_and_go_with_the_gesture() {
    let context = ChartContext::new(Viewport::new(600, 400));
    let controller = SelectionController::new();
    let mut chart = build(ChartKind::Scatter, scatter_spec(&controller), &context).expect("chart");
    assert!(context.listeners.is_empty());

    chart
        .pointer_down(Point::new(200.0, 100.0), PointerButton::Primary)
        .expect("down");
    assert_eq!(chart.interaction_mode(), InteractionMode::Dragging);
    assert_eq!(context.listeners.len(), 1);

    chart
        .window_pointer_up(Point::new(205.0, 100.0), Modifiers::NONE)
        .expect("up");
    assert!(context.listeners.is_empty());
}

#[test]
fn dispose_mid_drag_removes_the_listeners() {
    let context = ChartContext::new(Viewport::new(600, 400));
    let controller = SelectionController::new();
    let mut chart = build(ChartKind::Scatter, scatter_spec(&controller), &context).expect("chart");

    chart
        .pointer_down(Point::new(200.0, 100.0), PointerButton::Primary)
        .expect("down");
    assert!(context.listeners.is_installed(chart.id()));
    chart.dispose();
    assert!(!context.listeners.is_installed(chart.id()));
    assert!(!chart.is_dragging());

    chart
        .window_pointer_up(Point::new(400.0, 300.0), Modifiers::NONE)
        .expect("late up");
    assert!(controller.selection().is_empty());
}

#[test]
fn detaching_mid_drag_still_releases_on_pointer_up() {
    let context = ChartContext::new(Viewport::new(600, 400));
    let controller = SelectionController::new();
    let mut chart = build(ChartKind::Scatter, scatter_spec(&controller), &context).expect("chart");

    chart
        .pointer_down(Point::new(200.0, 100.0), PointerButton::Primary)
        .expect("down");
    chart.renderer_mut().detach();
    chart
        .window_pointer_up(Point::new(400.0, 300.0), Modifiers::NONE)
        .expect("up");
    assert!(context.listeners.is_empty());
    assert!(controller.selection().is_empty());
}

#[test]
fn each_chart_owns_a_copy_of_its_spec() {
    let context = ChartContext::new(Viewport::new(600, 400));
    let mut spec = bar_spec();
    let chart = build(ChartKind::Bar, spec.clone(), &context).expect("chart");
    spec.data.datasets.clear();
    assert_eq!(chart.marks().legend_items().len(), 1);
}
