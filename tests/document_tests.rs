use std::fs;
use std::path::PathBuf;

use chart_xkcd::api::{
    ChartContext, DocumentFormat, render_html_document, render_svg_document, write_document,
};
use chart_xkcd::core::{ChartKind, ChartSpec, Dataset, Viewport};

fn spec() -> ChartSpec {
    ChartSpec::new()
        .with_title("Pets & <owners>")
        .with_labels(["cats", "dogs"])
        .with_dataset(Dataset::new("count", [3.0, 5.0]))
}

fn context() -> ChartContext {
    ChartContext::new(Viewport::new(600, 400))
}

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("chart-xkcd-{}-{name}", std::process::id()))
}

#[test]
fn svg_documents_include_the_placed_legend() {
    let svg = render_svg_document(ChartKind::Pie, spec(), &context()).expect("svg");
    assert!(svg.starts_with("<svg"));
    let legend = svg.find(r#"<g class="legend">"#).expect("legend group");
    assert!(svg[legend..].contains("<rect"));
    assert!(svg.contains(">cats</text>"));
}

#[test]
fn html_documents_wrap_the_svg() {
    let html = render_html_document(ChartKind::Bar, spec(), &context()).expect("html");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Pets &amp; &lt;owners&gt;</title>"));
    assert!(html.contains("width:600px;height:400px"));
    assert!(html.contains("<svg"));
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn untitled_pages_are_named_after_the_kind() {
    let untitled = ChartSpec {
        title: None,
        ..spec()
    };
    let html = render_html_document(ChartKind::Radar, untitled, &context()).expect("html");
    assert!(html.contains("<title>Radar chart</title>"));
}

#[test]
fn write_document_picks_the_format_from_the_extension() {
    let svg_path = scratch_path("chart.svg");
    let format = write_document(&svg_path, ChartKind::Line, spec(), &context()).expect("write");
    assert_eq!(format, DocumentFormat::Svg);
    let written = fs::read_to_string(&svg_path).expect("read back");
    assert!(written.starts_with("<svg"));
    let _ = fs::remove_file(&svg_path);

    let html_path = scratch_path("chart.HTML");
    let format = write_document(&html_path, ChartKind::Line, spec(), &context()).expect("write");
    assert_eq!(format, DocumentFormat::Html);
    let _ = fs::remove_file(&html_path);
}

#[test]
fn unsupported_extensions_are_rejected_before_rendering() {
    let path = scratch_path("chart.png");
    assert!(write_document(&path, ChartKind::Bar, spec(), &context()).is_err());
    assert!(!path.exists());
}
