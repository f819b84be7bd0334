use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::chart::Chart;
use crate::api::context::ChartContext;
use crate::core::{ChartKind, ChartSpec};
use crate::error::{ChartError, ChartResult};
use crate::render::SvgRenderer;
use crate::render::svg_backend::escape_xml;

/// Output container for a statically rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    Svg,
    Html,
}

impl DocumentFormat {
    /// Picks the format from the file extension (`.svg`, `.html`, `.htm`).
    pub fn from_path(path: &Path) -> ChartResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("svg") => Ok(Self::Svg),
            Some("html" | "htm") => Ok(Self::Html),
            _ => Err(ChartError::InvalidSpec(format!(
                "cannot infer output format from `{}`; use .svg or .html",
                path.display()
            ))),
        }
    }
}

/// Draws one chart with the SVG backend and returns the finished markup,
/// legend placed.
pub fn render_svg_document(
    kind: ChartKind,
    spec: ChartSpec,
    context: &ChartContext,
) -> ChartResult<String> {
    let mut chart = Chart::new(kind, SvgRenderer::new(), spec, context)?;
    chart.complete_layout()?;
    Ok(chart.into_renderer().into_document())
}

/// Same chart wrapped in a minimal standalone HTML page.
pub fn render_html_document(
    kind: ChartKind,
    spec: ChartSpec,
    context: &ChartContext,
) -> ChartResult<String> {
    let title = spec
        .title
        .clone()
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| format!("{kind} chart"));
    let svg = render_svg_document(kind, spec, context)?;
    let width = context.viewport.width;
    let height = context.viewport.height;
    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<div class=\"chart-xkcd\" style=\"width:{width}px;height:{height}px;margin:0 auto\">\n{svg}</div>\n</body>\n</html>\n",
        escape_xml(&title)
    ))
}

/// Renders to `path`, choosing SVG or HTML from its extension.
pub fn write_document(
    path: &Path,
    kind: ChartKind,
    spec: ChartSpec,
    context: &ChartContext,
) -> ChartResult<DocumentFormat> {
    let format = DocumentFormat::from_path(path)?;
    let markup = match format {
        DocumentFormat::Svg => render_svg_document(kind, spec, context)?,
        DocumentFormat::Html => render_html_document(kind, spec, context)?,
    };
    fs::write(path, &markup)?;
    info!(path = %path.display(), ?format, bytes = markup.len(), "chart document written");
    Ok(format)
}
