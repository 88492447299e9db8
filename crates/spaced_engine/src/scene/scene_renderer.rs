//! Render dispatch
//!
//! Walks the grid cell by cell, asks the camera whether each resident's
//! bounding sphere is visible, and submits draw calls for the survivors.
//! Out-of-bounds entities are never drawn. Per-frame counters are
//! returned to the caller instead of accumulating in hidden state.

use crate::assets::ModelId;
use crate::foundation::math::{Mat4, Transform, Vec3};
use crate::render::{Camera, DrawCall, RenderBackend};
use crate::scene::Scene;

/// Render dispatch options
#[derive(Debug, Clone, Default)]
pub struct SceneRendererConfig {
    /// Draw a marker on every grid cell, highlighting occupied ones
    pub debug_draw_cells: bool,
}

/// Per-frame dispatch counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Draw calls submitted for entities
    pub submitted: usize,

    /// Entities rejected by the frustum test
    pub culled: usize,
}

impl RenderStats {
    /// Entities considered this frame
    pub fn total(&self) -> usize {
        self.submitted + self.culled
    }
}

/// Dispatches visible scene content to a render backend
pub struct SceneRenderer {
    config: SceneRendererConfig,
    cell_marker: Option<ModelId>,
}

impl SceneRenderer {
    /// Create a renderer with the given options
    pub fn new(config: SceneRendererConfig) -> Self {
        Self {
            config,
            cell_marker: None,
        }
    }

    /// Set the model used for debug cell markers
    pub fn set_cell_marker(&mut self, model: ModelId) {
        self.cell_marker = Some(model);
    }

    /// Dispatch one frame
    ///
    /// The camera must have been updated this frame; the frustum the
    /// visibility test runs against is whatever the last update produced.
    pub fn render(
        &self,
        scene: &Scene,
        camera: &Camera,
        backend: &mut dyn RenderBackend,
    ) -> RenderStats {
        let view_proj = camera.view_projection_matrix();
        let mut stats = RenderStats::default();

        backend.set_lights(scene.directional_lights(), scene.point_lights());

        if self.config.debug_draw_cells {
            self.draw_cell_markers(scene, &view_proj, backend);
        }

        for cell in scene.grid().cells() {
            for entity in cell.residents() {
                let entity = entity.borrow();
                let translation = entity.state.translation();
                let radius = entity.state.bounding_radius();

                if !camera.is_visible(translation, radius) {
                    stats.culled += 1;
                    continue;
                }

                let world = entity.state.transform.to_matrix();
                backend.submit(&DrawCall {
                    model: entity.state.model,
                    world,
                    world_view_proj: view_proj * world,
                    highlighted: false,
                });
                stats.submitted += 1;
            }
        }

        backend.present();
        stats
    }

    fn draw_cell_markers(&self, scene: &Scene, view_proj: &Mat4, backend: &mut dyn RenderBackend) {
        let Some(marker) = self.cell_marker else {
            return;
        };

        let cell_size = scene.grid().config().cell_size;
        for cell in scene.grid().cells() {
            let transform = Transform {
                translation: Vec3::new(cell.center_x(), 0.0, cell.center_z()),
                rotation: Vec3::zeros(),
                scale: Vec3::new(cell_size, cell_size, cell_size),
            };
            let world = transform.to_matrix();
            backend.submit(&DrawCall {
                model: marker,
                world,
                world_view_proj: view_proj * world,
                highlighted: !cell.residents().is_empty(),
            });
        }
    }
}
