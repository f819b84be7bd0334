use std::fmt;
use std::rc::Rc;

use crate::core::Viewport;
use crate::interaction::GlobalListenerRegistry;
use crate::render::{FontRegistry, HeuristicTextMeasurer, TextMeasurer};

/// Host-provided services shared by every chart on one page or notebook.
///
/// Cloning is cheap: the font and listener registries are shared handles,
/// so charts built from clones of one context see the same registrations.
#[derive(Clone)]
pub struct ChartContext {
    pub viewport: Viewport,
    pub text_measurer: Rc<dyn TextMeasurer>,
    pub fonts: Rc<FontRegistry>,
    pub listeners: GlobalListenerRegistry,
}

impl ChartContext {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            text_measurer: Rc::new(HeuristicTextMeasurer::default()),
            fonts: Rc::new(FontRegistry::new()),
            listeners: GlobalListenerRegistry::new(),
        }
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_text_measurer(mut self, measurer: Rc<dyn TextMeasurer>) -> Self {
        self.text_measurer = measurer;
        self
    }

    #[must_use]
    pub fn with_fonts(mut self, fonts: Rc<FontRegistry>) -> Self {
        self.fonts = fonts;
        self
    }

    #[must_use]
    pub fn with_listeners(mut self, listeners: GlobalListenerRegistry) -> Self {
        self.listeners = listeners;
        self
    }
}

impl fmt::Debug for ChartContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartContext")
            .field("viewport", &self.viewport)
            .field("font_registered", &self.fonts.is_registered())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
