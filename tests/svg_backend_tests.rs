use chart_xkcd::api::{Chart, ChartContext};
use chart_xkcd::core::{ChartSpec, Dataset, Options, Viewport};
use chart_xkcd::render::{
    CanvasLayerKind, Color, FALLBACK_FONT_FAMILY, RectPrimitive, RenderFrame, SvgRenderer,
    TextHAlign, TextPrimitive, format_svg_number,
};

fn bar_spec() -> ChartSpec {
    ChartSpec::new()
        .with_title("Sales <2024> & more")
        .with_labels(["a", "b"])
        .with_dataset(Dataset::new("s", [1.0, 2.0]))
}

fn context() -> ChartContext {
    ChartContext::new(Viewport::new(600, 400))
}

#[test]
fn numbers_keep_at_most_three_decimals() {
    assert_eq!(format_svg_number(12.0), "12");
    assert_eq!(format_svg_number(1.5), "1.5");
    assert_eq!(format_svg_number(0.12345), "0.123");
    assert_eq!(format_svg_number(-2.25), "-2.25");
    assert_eq!(format_svg_number(-0.0001), "0");
    assert_eq!(format_svg_number(f64::NAN), "0");
    assert_eq!(format_svg_number(f64::INFINITY), "0");
}

#[test]
fn hand_drawn_charts_define_both_filters() {
    let chart = Chart::bar(SvgRenderer::new(), bar_spec(), &context()).expect("chart");
    let svg = chart.renderer().document();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"<filter id="xkcdify""#));
    assert!(svg.contains(r#"<filter id="xkcdify-pie""#));
    assert!(svg.contains(r#"filter="url(#xkcdify)""#));
    assert!(svg.contains(r#"font-family="xkcd""#));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn plain_charts_skip_the_filters() {
    let spec = bar_spec().with_options(Options::new().with_unxkcdify(true));
    let chart = Chart::bar(SvgRenderer::new(), spec, &context()).expect("chart");
    let svg = chart.renderer().document();
    assert!(!svg.contains("<filter"));
    assert!(!svg.contains("url(#xkcdify"));
    assert!(svg.contains(&format!(r#"font-family="{FALLBACK_FONT_FAMILY}""#)));
}

#[test]
fn text_is_escaped() {
    let chart = Chart::bar(SvgRenderer::new(), bar_spec(), &context()).expect("chart");
    let svg = chart.renderer().document();
    assert!(svg.contains("Sales &lt;2024&gt; &amp; more"));
    assert!(!svg.contains("<2024>"));
}

#[test]
fn layers_are_grouped_in_paint_order() {
    let chart = Chart::bar(SvgRenderer::new(), bar_spec(), &context()).expect("chart");
    let svg = chart.renderer().document();
    let labels = svg.find(r#"<g class="labels">"#).expect("labels group");
    let axis = svg.find(r#"<g class="axis">"#).expect("axis group");
    let series = svg.find(r#"<g class="series">"#).expect("series group");
    assert!(labels < axis && axis < series);
    assert!(!svg.contains(r#"<g class="tooltip">"#));
}

#[test]
fn empty_layers_are_omitted() {
    let frame = RenderFrame::new(Viewport::new(100, 50)).with_primitive(
        CanvasLayerKind::Series,
        RectPrimitive::new(1.0, 2.0, 10.5, 20.0).with_fill(Some(Color::BLACK)),
    );
    let svg = SvgRenderer::render_to_string(&frame).expect("svg");
    assert!(svg.contains(r#"<g class="series">"#));
    assert!(!svg.contains(r#"<g class="axis">"#));
    assert!(svg.contains(r#"<rect x="1" y="2" width="10.5" height="20""#));
    assert!(!svg.contains("<defs>"));
}

#[test]
fn invalid_frames_are_rejected() {
    let frame = RenderFrame::new(Viewport::new(100, 50)).with_primitive(
        CanvasLayerKind::Labels,
        TextPrimitive::new("x", f64::NAN, 0.0, 12.0, Color::BLACK, TextHAlign::Left),
    );
    assert!(SvgRenderer::render_to_string(&frame).is_err());
}

#[test]
fn hover_rerenders_with_a_tooltip() {
    let mut chart = Chart::bar(SvgRenderer::new(), bar_spec(), &context()).expect("chart");
    assert_eq!(chart.renderer().render_count(), 1);
    let target = {
        let plot = chart.plot_area();
        chart_xkcd::core::Point::new(plot.left + plot.width * 0.75, plot.bottom() - 5.0)
    };
    chart.pointer_move(target).expect("move");
    assert_eq!(chart.renderer().render_count(), 2);
    assert!(chart.renderer().document().contains(r#"<g class="tooltip">"#));
}
