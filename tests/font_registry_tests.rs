use std::cell::Cell;
use std::rc::Rc;

use chart_xkcd::api::{Chart, ChartContext};
use chart_xkcd::core::{ChartSpec, Dataset, Options, Viewport};
use chart_xkcd::render::{FontFace, FontLoader, FontRegistry, SvgRenderer};
use chart_xkcd::{ChartError, ChartResult};

struct StaticLoader {
    calls: Cell<usize>,
}

impl StaticLoader {
    fn new() -> Self {
        Self { calls: Cell::new(0) }
    }
}

impl FontLoader for StaticLoader {
    fn load(&self) -> ChartResult<FontFace> {
        self.calls.set(self.calls.get() + 1);
        Ok(FontFace::new("xkcd", "data:font/ttf;base64,AAAA"))
    }
}

struct FailingLoader;

impl FontLoader for FailingLoader {
    fn load(&self) -> ChartResult<FontFace> {
        Err(ChartError::Backend("font fetch failed".to_owned()))
    }
}

fn spec() -> ChartSpec {
    ChartSpec::new()
        .with_title("t")
        .with_labels(["a", "b"])
        .with_dataset(Dataset::new("s", [1.0, 2.0]))
}

#[test]
fn registration_happens_once() {
    let registry = FontRegistry::new();
    let loader = StaticLoader::new();
    assert!(registry.ensure_registered(&loader).expect("first"));
    assert!(!registry.ensure_registered(&loader).expect("second"));
    assert_eq!(loader.calls.get(), 1);
    assert_eq!(registry.registration_count(), 1);
    assert!(registry.is_registered());
    assert_eq!(
        registry.registered_face().map(|face| face.family),
        Some("xkcd".to_owned())
    );
}

#[test]
fn only_one_registration_can_be_in_flight() {
    let registry = FontRegistry::new();
    let ticket = registry.begin_registration().expect("ticket");
    assert!(registry.is_pending());
    assert!(registry.begin_registration().is_none());
    assert!(!registry.ensure_registered(&StaticLoader::new()).expect("no-op"));

    registry.complete_registration(ticket, FontFace::new("xkcd", "font.ttf"));
    assert!(!registry.is_pending());
    assert!(registry.begin_registration().is_none());
}

#[test]
fn failed_loads_can_be_retried() {
    let registry = FontRegistry::new();
    assert!(registry.ensure_registered(&FailingLoader).is_err());
    assert!(!registry.is_pending());
    assert!(!registry.is_registered());
    assert_eq!(registry.registration_count(), 0);

    assert!(registry.ensure_registered(&StaticLoader::new()).expect("retry"));
    assert_eq!(registry.registration_count(), 1);
}

#[test]
fn text_waits_for_a_pending_font() {
    let fonts = Rc::new(FontRegistry::new());
    let context = ChartContext::new(Viewport::new(600, 400)).with_fonts(Rc::clone(&fonts));
    let ticket = fonts.begin_registration().expect("ticket");

    let mut chart = Chart::bar(SvgRenderer::new(), spec(), &context).expect("chart");
    assert!(chart.frame().text_deferred);
    assert!(!chart.renderer().document().contains("<text"));
    assert!(!chart.renderer().document().contains("@font-face"));

    fonts.complete_registration(ticket, FontFace::new("xkcd", "font.ttf"));
    chart.font_ready().expect("font ready");
    assert!(!chart.frame().text_deferred);
    let svg = chart.renderer().document();
    assert!(svg.contains("<text"));
    assert!(svg.contains("@font-face"));
    assert!(svg.contains(r#"url("font.ttf")"#));
}

#[test]
fn charts_built_after_registration_embed_the_font() {
    let context = ChartContext::new(Viewport::new(600, 400));
    context
        .fonts
        .ensure_registered(&StaticLoader::new())
        .expect("register");
    let chart = Chart::bar(SvgRenderer::new(), spec(), &context).expect("chart");
    assert!(!chart.frame().text_deferred);
    assert!(chart.renderer().document().contains("@font-face"));
}

#[test]
fn plain_charts_never_embed_the_font() {
    let context = ChartContext::new(Viewport::new(600, 400));
    let ticket = context.fonts.begin_registration().expect("ticket");
    let spec = spec().with_options(Options::new().with_unxkcdify(true));
    let mut chart = Chart::bar(SvgRenderer::new(), spec, &context).expect("chart");
    assert!(!chart.frame().text_deferred);
    assert!(chart.renderer().document().contains("<text"));

    context
        .fonts
        .complete_registration(ticket, FontFace::new("xkcd", "font.ttf"));
    chart.font_ready().expect("font ready");
    assert!(chart.frame().font_face.is_none());
    assert!(!chart.renderer().document().contains("@font-face"));
}
