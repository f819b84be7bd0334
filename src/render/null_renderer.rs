use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// Headless renderer used by tests and embedding hosts that only need the
/// scene model.
///
/// It still validates frame content so tests catch invalid geometry, and it
/// keeps the last frame around for inspection.
#[derive(Debug)]
pub struct NullRenderer {
    pub last_primitive_count: usize,
    pub last_text_count: usize,
    pub render_count: usize,
    pub last_frame: Option<RenderFrame>,
    attached: bool,
}

impl Default for NullRenderer {
    fn default() -> Self {
        Self {
            last_primitive_count: 0,
            last_text_count: 0,
            render_count: 0,
            last_frame: None,
            attached: true,
        }
    }
}

impl NullRenderer {
    /// Simulates the host removing the chart's drawing surface.
    pub fn detach(&mut self) {
        self.attached = false;
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_primitive_count = frame.primitive_count();
        self.last_text_count = frame.text_count();
        self.render_count += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}
