use std::f64::consts::{FRAC_PI_2, PI, TAU};

use approx::assert_relative_eq;
use chart_xkcd::api::{
    Chart, ChartContext, HOVER_FILL_OPACITY, MarkRenderer, MarkSetup, PieMarks,
};
use chart_xkcd::core::{
    ChartKind, ChartSpec, Dataset, Options, PlotArea, Point, Viewport, resolve_for,
};
use chart_xkcd::interaction::{MarkHit, Modifiers, SelectionController, SelectionItem};
use chart_xkcd::render::{CanvasLayerKind, DistortionFilter, NullRenderer};

fn spec() -> ChartSpec {
    ChartSpec::new()
        .with_labels(["a", "b"])
        .with_dataset(Dataset::new("share", [3.0, 1.0]))
}

fn marks(spec: ChartSpec) -> PieMarks {
    let viewport = Viewport::new(600, 400);
    PieMarks::new(MarkSetup {
        options: resolve_for(ChartKind::Pie, &spec),
        spec,
        viewport,
        plot: PlotArea::full(viewport),
        filter: DistortionFilter::new(false, true),
    })
}

#[test]
fn donut_is_centered_with_half_inner_radius() {
    let marks = marks(spec());
    assert_eq!(marks.center(), Point::new(300.0, 200.0));
    assert_eq!(marks.radii(), (75.0, 150.0));
}

#[test]
fn slices_run_clockwise_from_the_top() {
    let marks = marks(spec());
    let slices = marks.slices();
    assert_eq!(slices.len(), 2);
    assert_relative_eq!(slices[0].start_angle, 0.0);
    assert_relative_eq!(slices[0].end_angle, PI + FRAC_PI_2);
    assert_relative_eq!(slices[1].start_angle, PI + FRAC_PI_2);
    assert_relative_eq!(slices[1].end_angle, TAU);
}

#[test]
fn hit_test_follows_the_ring() {
    let marks = marks(spec());
    assert_eq!(marks.hit_test(Point::new(400.0, 200.0)), Some(MarkHit::new(0, 0)));
    assert_eq!(marks.hit_test(Point::new(200.0, 170.0)), Some(MarkHit::new(0, 1)));
    assert_eq!(marks.hit_test(Point::new(300.0, 200.0)), None);
    assert_eq!(marks.hit_test(Point::new(300.0, 20.0)), None);
}

#[test]
fn solid_pie_hits_near_the_center() {
    let solid = marks(spec().with_options(Options::new().with_inner_radius(0.0)));
    assert_eq!(solid.radii(), (0.0, 150.0));
    assert_eq!(solid.hit_test(Point::new(310.0, 210.0)), Some(MarkHit::new(0, 0)));
}

#[test]
fn hovered_slice_fades() {
    let marks = marks(spec());
    let paths: Vec<_> = marks
        .draw_marks(Some(MarkHit::new(0, 1)))
        .into_iter()
        .filter_map(|p| p.as_path().cloned())
        .collect();
    assert_eq!(paths.len(), 2);
    assert_relative_eq!(paths[0].fill_opacity, 1.0);
    assert_relative_eq!(paths[1].fill_opacity, HOVER_FILL_OPACITY);
}

#[test]
fn tooltip_names_the_label_and_value() {
    let marks = marks(spec());
    let feedback = marks.hover(MarkHit::new(0, 0), Point::new(400.0, 200.0));
    assert_eq!(feedback.title, "a");
    assert_eq!(feedback.items.len(), 1);
    assert_eq!(feedback.items[0].text, "share: 3");
}

#[test]
fn legend_lists_labels_below_the_title_band() {
    let mut chart = Chart::pie(
        NullRenderer::default(),
        spec(),
        &ChartContext::new(Viewport::new(600, 400)),
    )
    .expect("chart");
    let texts: Vec<_> = chart
        .legend()
        .expect("legend")
        .items()
        .iter()
        .map(|item| item.text.clone())
        .collect();
    assert_eq!(texts, vec!["a", "b"]);

    chart.complete_layout().expect("layout");
    let background = chart.legend().and_then(|legend| legend.background()).expect("placed");
    assert_relative_eq!(background.x, 8.0);
    assert_relative_eq!(background.y, 35.0);
    assert!(!chart.frame().layer_primitives(CanvasLayerKind::Legend).is_empty());
}

#[test]
fn click_reports_the_category() {
    let controller = SelectionController::new();
    let spec = spec().with_options(Options::new().with_on_select(controller.handler()));
    let mut chart = Chart::pie(
        NullRenderer::default(),
        spec,
        &ChartContext::new(Viewport::new(600, 400)),
    )
    .expect("chart");
    chart
        .click(Point::new(200.0, 170.0), Modifiers::NONE)
        .expect("click");
    assert_eq!(
        controller.selection().items(),
        &[SelectionItem::Category {
            index: 1,
            label: "b".to_owned(),
            value: 1.0,
        }]
    );
}
