use chart_xkcd::api::{MarkRenderer, MarkSetup, ScatterMarks};
use chart_xkcd::core::{
    ChartKind, ChartSpec, Dataset, PlotArea, Point, Value, Viewport, compute_margins, resolve_for,
};
use chart_xkcd::interaction::{MIN_DRAG_PX, SelectionItem, clamp_drag_rect};
use chart_xkcd::render::DistortionFilter;
use proptest::prelude::*;

fn marks(points: &[(f64, f64)]) -> ScatterMarks {
    let viewport = Viewport::new(600, 400);
    let spec = ChartSpec::new().with_dataset(Dataset::points(
        "p",
        points.iter().map(|(x, y)| Value::point(*x, *y)),
    ));
    ScatterMarks::new(MarkSetup {
        options: resolve_for(ChartKind::Scatter, &spec),
        spec,
        viewport,
        plot: PlotArea::with_margin(viewport, compute_margins(false, false, false)),
        filter: DistortionFilter::new(false, false),
    })
}

proptest! {
    #[test]
    fn selected_points_lie_inside_the_dragged_rectangle(
        points in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 2..30),
        ax in 0.0f64..520.0,
        ay in 0.0f64..300.0,
        bx in 0.0f64..520.0,
        by in 0.0f64..300.0
    ) {
        let marks = marks(&points);
        let start = Point::new(ax, ay);
        let end = Point::new(bx, by);
        let items = marks.box_select(start, end);
        let dragged = (bx - ax).abs() >= MIN_DRAG_PX || (by - ay).abs() >= MIN_DRAG_PX;
        if !dragged {
            prop_assert!(items.is_empty());
        }

        let plot = marks.plot();
        let (left, right) = (ax.min(bx), ax.max(bx));
        let (top, bottom) = (ay.min(by), ay.max(by));
        for item in &items {
            let point_index = match item {
                SelectionItem::Point { point_index, .. } => *point_index,
                other => return Err(TestCaseError::fail(format!("unexpected item {other:?}"))),
            };
            let center = marks.dot_center(0, point_index).expect("plotted");
            let local = plot.to_local(center);
            prop_assert!(local.x >= left - 1e-6 && local.x <= right + 1e-6);
            prop_assert!(local.y >= top - 1e-6 && local.y <= bottom + 1e-6);
        }
    }

    #[test]
    fn drag_feedback_never_leaves_the_plot(
        sx in 0.0f64..520.0,
        sy in 0.0f64..300.0,
        cx in -500.0f64..1_000.0,
        cy in -500.0f64..1_000.0
    ) {
        let rect = clamp_drag_rect(Point::new(sx, sy), Point::new(cx, cy), 520.0, 300.0);
        prop_assert!(rect.x >= 0.0 && rect.y >= 0.0);
        prop_assert!(rect.width >= 0.0 && rect.height >= 0.0);
        prop_assert!(rect.right() <= 520.0 + 1e-9);
        prop_assert!(rect.bottom() <= 300.0 + 1e-9);
    }
}
