mod box_select;
mod listeners;
mod selection;

pub use box_select::{
    DataRect, DragSession, MIN_DRAG_PX, clamp_drag_rect, exceeds_drag_threshold,
    selection_rect_primitive,
};
pub use listeners::{ChartId, GlobalEvent, GlobalListenerRegistry, ListenerGuard};
pub use selection::{
    LabeledValue, Selection, SelectionController, SelectionItem, SelectionPayload, toggle_items,
};

use serde::{Deserialize, Serialize};

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true };

    /// Shift turns a selection into a toggle against the existing set.
    #[must_use]
    pub const fn additive(self) -> bool {
        self.shift
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// A mark under the pointer: `index` is the category, slice or point
/// index inside `dataset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkHit {
    pub dataset: usize,
    pub index: usize,
}

impl MarkHit {
    #[must_use]
    pub const fn new(dataset: usize, index: usize) -> Self {
        Self { dataset, index }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Hovering,
    Dragging,
}
