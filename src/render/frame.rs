use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CanvasLayerKind, Color, DistortionParams, FontFace, LayerStack, Primitive,
};

/// Primitives of one paint-order group, in root coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: CanvasLayerKind,
    pub visible: bool,
    pub primitives: Vec<Primitive>,
}

impl LayerPrimitives {
    #[must_use]
    pub fn new(kind: CanvasLayerKind) -> Self {
        Self {
            kind,
            visible: true,
            primitives: Vec::new(),
        }
    }
}

/// Backend-agnostic scene for one chart draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub background: Color,
    pub font_family: String,
    /// Present when the frame defines the hand-drawn distortion filters.
    pub distortion: Option<DistortionParams>,
    /// Font embedded with the frame, if the host registered one.
    pub font_face: Option<FontFace>,
    /// Text stays hidden until the hand-drawn font finishes loading.
    pub text_deferred: bool,
    pub layers: Vec<LayerPrimitives>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        let layers = LayerStack::canonical()
            .layers
            .into_iter()
            .map(LayerPrimitives::new)
            .collect();
        Self {
            viewport,
            background: Color::WHITE,
            font_family: crate::core::options::DEFAULT_FONT_FAMILY.to_owned(),
            distortion: None,
            font_face: None,
            text_deferred: false,
            layers,
        }
    }

    #[must_use]
    pub fn with_primitive(mut self, kind: CanvasLayerKind, primitive: impl Into<Primitive>) -> Self {
        self.push(kind, primitive);
        self
    }

    pub fn push(&mut self, kind: CanvasLayerKind, primitive: impl Into<Primitive>) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.primitives.push(primitive.into());
        }
    }

    pub fn extend(&mut self, kind: CanvasLayerKind, primitives: impl IntoIterator<Item = Primitive>) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.primitives.extend(primitives);
        }
    }

    /// Swaps the whole content of one layer, leaving the others untouched.
    pub fn replace_layer(&mut self, kind: CanvasLayerKind, primitives: Vec<Primitive>) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.primitives = primitives;
        }
    }

    pub fn clear_layer(&mut self, kind: CanvasLayerKind) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.primitives.clear();
        }
    }

    pub fn set_layer_visible(&mut self, kind: CanvasLayerKind, visible: bool) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.visible = visible;
        }
    }

    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> Option<&LayerPrimitives> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    fn layer_mut(&mut self, kind: CanvasLayerKind) -> Option<&mut LayerPrimitives> {
        self.layers.iter_mut().find(|layer| layer.kind == kind)
    }

    /// Primitives of a layer, empty when the layer is missing.
    #[must_use]
    pub fn layer_primitives(&self, kind: CanvasLayerKind) -> &[Primitive] {
        self.layer(kind)
            .map_or(&[], |layer| layer.primitives.as_slice())
    }

    #[must_use]
    pub fn is_layer_visible(&self, kind: CanvasLayerKind) -> bool {
        self.layer(kind).is_some_and(|layer| layer.visible)
    }

    /// Visible primitives in paint order.
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.layers
            .iter()
            .filter(|layer| layer.visible)
            .flat_map(|layer| layer.primitives.iter())
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.background.validate()?;
        for layer in &self.layers {
            for primitive in &layer.primitives {
                primitive.validate()?;
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|layer| layer.primitives.is_empty())
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.primitives.len()).sum()
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.primitives()
            .filter(|primitive| matches!(primitive, Primitive::Text(_)))
            .count()
    }
}
