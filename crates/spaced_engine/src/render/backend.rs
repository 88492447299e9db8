//! Render backend seam
//!
//! The engine core decides *what* to draw; an actual graphics device
//! (swap chains, shaders, GPU buffers) lives on the other side of this
//! trait. The headless implementation records submission counts, which is
//! all the tests and the windowless demo binary need.

use crate::assets::ModelId;
use crate::foundation::math::Mat4;
use crate::scene::{DirectionalLight, PointLight};

/// One draw submission for a single model instance
#[derive(Debug, Clone)]
pub struct DrawCall {
    /// Model to draw
    pub model: ModelId,

    /// World transform of the instance
    pub world: Mat4,

    /// Pre-multiplied world-view-projection matrix
    pub world_view_proj: Mat4,

    /// Set for debug cell markers whose cell currently has residents
    pub highlighted: bool,
}

/// Sink for per-frame draw submissions
pub trait RenderBackend {
    /// Upload the frame's light environment
    fn set_lights(&mut self, directional: &[DirectionalLight], point: &[PointLight]);

    /// Submit one draw call
    fn submit(&mut self, call: &DrawCall);

    /// Finish the frame
    fn present(&mut self);
}

/// Backend that counts submissions without touching a GPU
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    submitted: usize,
    frames: usize,
    light_count: usize,
}

impl HeadlessBackend {
    /// Create a new headless backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls submitted since creation
    pub fn submitted(&self) -> usize {
        self.submitted
    }

    /// Frames presented since creation
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Lights uploaded for the most recent frame
    pub fn light_count(&self) -> usize {
        self.light_count
    }
}

impl RenderBackend for HeadlessBackend {
    fn set_lights(&mut self, directional: &[DirectionalLight], point: &[PointLight]) {
        self.light_count = directional.len() + point.len();
    }

    fn submit(&mut self, call: &DrawCall) {
        log::trace!("draw {:?} highlighted={}", call.model, call.highlighted);
        self.submitted += 1;
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}
