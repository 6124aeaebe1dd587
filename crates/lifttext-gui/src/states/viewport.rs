use lifttext_core::geometry::Size;
use lifttext_core::viewer::Viewer;

/// Viewport display state.
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    /// Zoom, pan, selection and word boxes; sized to the viewport each frame.
    pub viewer: Viewer,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            texture: None,
            viewer: Viewer::new(Size::new(0, 0)),
        }
    }
}
