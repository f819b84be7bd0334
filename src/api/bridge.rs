use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::api::chart::Chart;
use crate::api::context::ChartContext;
use crate::core::{ChartKind, ChartSpec, SelectHandler, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{SelectionItem, SelectionPayload, toggle_items};
use crate::render::{FontLoader, Renderer};

pub const DEFAULT_WIDGET_WIDTH: u32 = 600;
pub const DEFAULT_WIDGET_HEIGHT: u32 = 400;
pub const SELECTION_KEY: &str = "selection";

/// Key/value model a notebook host synchronizes with its front end.
pub trait HostModel {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value);
    fn save_changes(&mut self);
}

/// A chart built from a host model, writing selections back into it.
///
/// The model keeps `selection` as a JSON string holding an array of
/// selection items.
pub struct WidgetSession<R: Renderer> {
    chart: Chart<R>,
}

impl<R: Renderer> WidgetSession<R> {
    /// Reads `width`, `height`, `chart_type` and `config` from `model` and
    /// draws the chart. The context's viewport is replaced by the model's size.
    pub fn open<M: HostModel + 'static>(
        model: Rc<RefCell<M>>,
        renderer: R,
        context: &ChartContext,
    ) -> ChartResult<Self> {
        let (viewport, kind, mut spec) = {
            let model = model.borrow();
            let width = read_dimension(&*model, "width", DEFAULT_WIDGET_WIDTH)?;
            let height = read_dimension(&*model, "height", DEFAULT_WIDGET_HEIGHT)?;
            let kind: ChartKind = read_string(&*model, "chart_type")?
                .as_deref()
                .unwrap_or("Bar")
                .parse()?;
            let config = read_string(&*model, "config")?.unwrap_or_else(|| "{}".to_owned());
            (
                Viewport::new(width, height),
                kind,
                ChartSpec::from_json_str(&config)?,
            )
        };

        spec.options.on_select = Some(selection_writer(model));
        debug!(%kind, width = viewport.width, height = viewport.height, "widget session opened");
        let context = context.clone().with_viewport(viewport);
        let chart = Chart::new(kind, renderer, spec, &context)?;
        Ok(Self { chart })
    }

    /// Registers the hand-drawn font through `loader` first, then opens.
    pub fn open_with_font<M: HostModel + 'static>(
        model: Rc<RefCell<M>>,
        renderer: R,
        context: &ChartContext,
        loader: &dyn FontLoader,
    ) -> ChartResult<Self> {
        context.fonts.ensure_registered(loader)?;
        Self::open(model, renderer, context)
    }

    #[must_use]
    pub fn chart(&self) -> &Chart<R> {
        &self.chart
    }

    pub fn chart_mut(&mut self) -> &mut Chart<R> {
        &mut self.chart
    }

    #[must_use]
    pub fn into_chart(self) -> Chart<R> {
        self.chart
    }
}

/// Select handler that mirrors the host's selection list: a plain gesture
/// replaces it, a shift gesture toggles each incoming item.
pub fn selection_writer<M: HostModel + 'static>(model: Rc<RefCell<M>>) -> SelectHandler {
    SelectHandler::new(move |payload, additive| {
        if let Err(err) = write_selection(&mut *model.borrow_mut(), payload, additive) {
            warn!(error = %err, "selection not written back to host model");
        }
    })
}

fn write_selection(
    model: &mut dyn HostModel,
    payload: &SelectionPayload,
    additive: bool,
) -> ChartResult<()> {
    let items = if additive {
        let mut current = current_selection(model)?;
        toggle_items(&mut current, payload.items());
        current
    } else {
        payload.items().to_vec()
    };
    let count = items.len();
    model.set(SELECTION_KEY, Value::String(serde_json::to_string(&items)?));
    model.save_changes();
    debug!(count, additive, "selection written to host model");
    Ok(())
}

/// Host selection decoded into typed items, so `10` and `10.0` match.
fn current_selection(model: &dyn HostModel) -> ChartResult<Vec<SelectionItem>> {
    match model.get(SELECTION_KEY) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(Vec::new()),
        Some(Value::String(text)) => Ok(serde_json::from_str(&text)?),
        Some(value @ Value::Array(_)) => Ok(serde_json::from_value(value)?),
        Some(other) => Err(ChartError::InvalidData(format!(
            "host selection must be a JSON array, got {other}"
        ))),
    }
}

fn read_dimension(model: &dyn HostModel, key: &str, default: u32) -> ChartResult<u32> {
    match model.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => value
            .as_u64()
            .and_then(|value| u32::try_from(value).ok())
            .ok_or_else(|| ChartError::InvalidData(format!("`{key}` must be a pixel size"))),
    }
}

fn read_string(model: &dyn HostModel, key: &str) -> ChartResult<Option<String>> {
    match model.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(_) => Err(ChartError::InvalidData(format!("`{key}` must be a string"))),
    }
}
