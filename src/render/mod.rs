mod filter;
mod font;
mod frame;
mod layer_stack;
mod null_renderer;
mod primitives;
pub(crate) mod svg_backend;
mod text_metrics;

pub use filter::{DistortionFilter, DistortionParams, FALLBACK_FONT_FAMILY, FilterRef};
pub use font::{FontFace, FontLoader, FontRegistry, RegistrationTicket};
pub use frame::{LayerPrimitives, RenderFrame};
pub use layer_stack::{CanvasLayerKind, LayerStack};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, FontWeight, LinePrimitive, LineStrokeStyle, PathCommand,
    PathPrimitive, Primitive, RectPrimitive, TextHAlign, TextPrimitive,
};
pub use svg_backend::{SvgRenderer, format_svg_number};
pub use text_metrics::{HeuristicTextMeasurer, TextExtent, TextMeasurer};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from chart domain and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;

    /// Whether the drawing surface is still part of the host document.
    /// Charts ignore input once their surface is gone.
    fn is_attached(&self) -> bool {
        true
    }
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
