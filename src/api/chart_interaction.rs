use tracing::{debug, trace};

use crate::api::chart::{Chart, ChartState};
use crate::api::tooltip::{TooltipPosition, TooltipUpdate};
use crate::core::Point;
use crate::error::ChartResult;
use crate::interaction::{
    DragSession, GlobalEvent, Modifiers, PointerButton, SelectionPayload, selection_rect_primitive,
};
use crate::render::{CanvasLayerKind, Renderer};

impl<R: Renderer> Chart<R> {
    /// Pointer moved over the chart surface (root coordinates).
    pub fn pointer_move(&mut self, root: Point) -> ChartResult<()> {
        if !self.accepts_input("pointer_move") {
            return Ok(());
        }
        match self.marks.hit_test(root) {
            Some(hit) => {
                let feedback = self.marks.hover(hit, root);
                let update = TooltipUpdate::new()
                    .with_title(feedback.title)
                    .with_items(feedback.items)
                    .with_position(TooltipPosition::new(feedback.anchor, feedback.quadrant));
                self.tooltip
                    .update(update, self.context.text_measurer.as_ref());
                self.tooltip.show();
                if self.hovered != Some(hit) {
                    trace!(chart = %self.id, ?hit, "hover target changed");
                    self.hovered = Some(hit);
                    self.frame
                        .replace_layer(CanvasLayerKind::Series, self.marks.draw_marks(Some(hit)));
                }
                self.frame
                    .replace_layer(CanvasLayerKind::Guide, feedback.guide);
            }
            None => self.clear_hover(),
        }
        self.frame
            .replace_layer(CanvasLayerKind::Tooltip, self.tooltip.primitives());
        self.renderer.render(&self.frame)
    }

    /// Pointer left the chart surface.
    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        if !self.accepts_input("pointer_leave") {
            return Ok(());
        }
        self.clear_hover();
        self.frame.clear_layer(CanvasLayerKind::Tooltip);
        self.renderer.render(&self.frame)
    }

    /// Click on the chart surface; reports the mark under the pointer to
    /// the select handler, if one is configured.
    pub fn click(&mut self, root: Point, modifiers: Modifiers) -> ChartResult<()> {
        if !self.accepts_input("click") {
            return Ok(());
        }
        let Some(handler) = self.options.on_select.clone() else {
            return Ok(());
        };
        let Some(item) = self
            .marks
            .hit_test(root)
            .and_then(|hit| self.marks.click_payload(hit))
        else {
            return Ok(());
        };
        debug!(
            chart = %self.id,
            additive = modifiers.additive(),
            "dispatching click selection"
        );
        handler.call(&SelectionPayload::Single(item), modifiers.additive());
        Ok(())
    }

    /// Button press; may start a box selection.
    pub fn pointer_down(&mut self, root: Point, button: PointerButton) -> ChartResult<()> {
        if !self.accepts_input("pointer_down") {
            return Ok(());
        }
        if button != PointerButton::Primary || !self.marks.drag_surface(root) {
            return Ok(());
        }
        let local = self.marks.plot().to_local(root);
        let guard = self
            .context
            .listeners
            .install(self.id, &[GlobalEvent::PointerMove, GlobalEvent::PointerUp]);
        self.drag = Some(DragSession::new(local, guard));
        self.frame.clear_layer(CanvasLayerKind::Selection);
        debug!(chart = %self.id, x = local.x, y = local.y, "box selection started");
        self.renderer.render(&self.frame)
    }

    /// Window-level pointer move, delivered while a drag listener is installed.
    pub fn window_pointer_move(&mut self, root: Point) -> ChartResult<()> {
        if !self.accepts_input("window_pointer_move") {
            return Ok(());
        }
        let plot = self.marks.plot();
        let Some(drag) = self.drag.as_mut() else {
            return Ok(());
        };
        drag.current = plot.to_local(root);
        let rect = drag
            .visible_rect(plot.width, plot.height)
            .translated(plot.left, plot.top);
        self.frame.replace_layer(
            CanvasLayerKind::Selection,
            vec![selection_rect_primitive(rect, self.options.stroke_color).into()],
        );
        self.renderer.render(&self.frame)
    }

    /// Window-level pointer release; ends the drag and reports the points
    /// inside the rectangle.
    pub fn window_pointer_up(&mut self, root: Point, modifiers: Modifiers) -> ChartResult<()> {
        // the listener goes away even when the chart no longer takes input
        let Some(drag) = self.drag.take() else {
            return Ok(());
        };
        if !self.accepts_input("window_pointer_up") {
            return Ok(());
        }
        let end = self.marks.plot().to_local(root);
        let items = self.marks.box_select(drag.start, end);
        drop(drag);
        self.frame.clear_layer(CanvasLayerKind::Selection);
        debug!(chart = %self.id, selected = items.len(), "box selection ended");

        if let Some(handler) = self.options.on_select.clone() {
            if !items.is_empty() {
                handler.call(&SelectionPayload::Many(items), modifiers.additive());
            }
        }
        self.renderer.render(&self.frame)
    }

    /// Second layout phase: sizes and corners the legend. Safe to call
    /// more than once.
    pub fn complete_layout(&mut self) -> ChartResult<()> {
        if !self.accepts_input("complete_layout") {
            return Ok(());
        }
        let Some(legend) = self.legend.as_mut() else {
            return Ok(());
        };
        if legend.is_placed() {
            return Ok(());
        }
        legend.place();
        let primitives = legend.primitives();
        self.frame
            .replace_layer(CanvasLayerKind::Legend, primitives);
        self.renderer.render(&self.frame)
    }

    /// The hand-drawn font finished loading: embed it and show the text.
    pub fn font_ready(&mut self) -> ChartResult<()> {
        if !self.accepts_input("font_ready") {
            return Ok(());
        }
        if !self.options.unxkcdify {
            self.frame.font_face = self.context.fonts.registered_face();
        }
        self.frame.text_deferred = false;
        debug!(
            chart = %self.id,
            embedded = self.frame.font_face.is_some(),
            "font ready"
        );
        self.renderer.render(&self.frame)
    }

    /// Tears the chart down: ends any drag (removing its window listeners)
    /// and stops reacting to input. Idempotent.
    pub fn dispose(&mut self) {
        if self.state == ChartState::Disposed {
            return;
        }
        self.drag = None;
        self.hovered = None;
        self.tooltip.hide();
        self.state = ChartState::Disposed;
        debug!(chart = %self.id, "chart disposed");
    }

    fn clear_hover(&mut self) {
        self.tooltip.hide();
        self.frame.clear_layer(CanvasLayerKind::Guide);
        if self.hovered.take().is_some() {
            self.frame
                .replace_layer(CanvasLayerKind::Series, self.marks.draw_marks(None));
        }
    }
}
