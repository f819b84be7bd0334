//! chart-xkcd: hand-drawn (xkcd-style) charts.
//!
//! Six chart kinds share one pipeline: a [`ChartSpec`](core::ChartSpec) is
//! resolved against layered defaults, laid out by the `core` scales and
//! geometry helpers, materialized into a layered `RenderFrame` and handed to
//! a [`Renderer`](render::Renderer) backend. Pointer input forwarded by the
//! host drives hover tooltips, click selection and scatter box selection.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{Chart, ChartContext, ChartState};
pub use error::{ChartError, ChartResult};
