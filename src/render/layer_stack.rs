use serde::{Deserialize, Serialize};

/// Paint-order groups of a chart frame, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Background,
    Labels,
    Grid,
    Axis,
    Series,
    Guide,
    Selection,
    Legend,
    Tooltip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStack {
    pub layers: Vec<CanvasLayerKind>,
}

impl LayerStack {
    #[must_use]
    pub fn canonical() -> Self {
        Self {
            layers: vec![
                CanvasLayerKind::Background,
                CanvasLayerKind::Labels,
                CanvasLayerKind::Grid,
                CanvasLayerKind::Axis,
                CanvasLayerKind::Series,
                CanvasLayerKind::Guide,
                CanvasLayerKind::Selection,
                CanvasLayerKind::Legend,
                CanvasLayerKind::Tooltip,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CanvasLayerKind, LayerStack};

    #[test]
    fn overlays_paint_above_marks() {
        let stack = LayerStack::canonical();
        let position = |kind| stack.layers.iter().position(|layer| *layer == kind);
        assert!(position(CanvasLayerKind::Series) < position(CanvasLayerKind::Legend));
        assert!(position(CanvasLayerKind::Legend) < position(CanvasLayerKind::Tooltip));
        assert_eq!(stack.layers.first(), Some(&CanvasLayerKind::Background));
    }
}
