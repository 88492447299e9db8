//! Scene management
//!
//! The scene owns the spatial partition and the frame's light lists, and
//! runs the per-frame entity sweep. Rendering queries the partition
//! through [`Scene::grid`] and dispatches via [`SceneRenderer`].

mod lighting;
mod scene_renderer;
mod spatial_grid;

pub use lighting::{DirectionalLight, PointLight, MAX_DIRECTIONAL_LIGHTS, MAX_POINT_LIGHTS};
pub use scene_renderer::{RenderStats, SceneRenderer, SceneRendererConfig};
pub use spatial_grid::{Cell, CellCoords, GridConfig, Residency, SpatialGrid};

use crate::entity::{EntityHandle, FrameInput};

/// The game scene: spatial partition plus lights
pub struct Scene {
    grid: SpatialGrid,
    directional_lights: Vec<DirectionalLight>,
    point_lights: Vec<PointLight>,
}

impl Scene {
    /// Create a scene over the given grid shape
    pub fn new(grid: GridConfig) -> Self {
        Self {
            grid: SpatialGrid::new(grid),
            directional_lights: Vec::new(),
            point_lights: Vec::new(),
        }
    }

    /// Track an entity in the spatial partition
    pub fn insert_entity(&mut self, entity: EntityHandle) {
        self.grid.insert(entity);
    }

    /// Untrack an entity immediately
    pub fn remove_entity(&mut self, entity: &EntityHandle) -> bool {
        self.grid.remove(entity)
    }

    /// Add a directional light; ignored (with a warning) past the cap
    pub fn insert_directional_light(&mut self, light: DirectionalLight) -> bool {
        if self.directional_lights.len() >= MAX_DIRECTIONAL_LIGHTS {
            log::warn!(
                "Directional light cap ({}) reached, ignoring light",
                MAX_DIRECTIONAL_LIGHTS
            );
            return false;
        }
        self.directional_lights.push(light);
        true
    }

    /// Add a point light; ignored (with a warning) past the cap
    pub fn insert_point_light(&mut self, light: PointLight) -> bool {
        if self.point_lights.len() >= MAX_POINT_LIGHTS {
            log::warn!("Point light cap ({}) reached, ignoring light", MAX_POINT_LIGHTS);
            return false;
        }
        self.point_lights.push(light);
        true
    }

    /// Run one frame of the entity sweep
    pub fn update(&mut self, delta_time: f32, frame: &FrameInput) {
        self.grid.update(delta_time, frame);
    }

    /// The spatial partition
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Visit every in-bounds resident, grouped by cell
    pub fn for_each_resident<F>(&self, visitor: F)
    where
        F: FnMut(CellCoords, &EntityHandle),
    {
        self.grid.for_each_resident(visitor);
    }

    /// Number of tracked entities
    pub fn entity_count(&self) -> usize {
        self.grid.len()
    }

    /// Directional lights for the frame
    pub fn directional_lights(&self) -> &[DirectionalLight] {
        &self.directional_lights
    }

    /// Point lights for the frame
    pub fn point_lights(&self) -> &[PointLight] {
        &self.point_lights
    }

    /// Debug accessor: entity by linear index
    pub fn entity_at(&self, index: usize) -> Option<EntityHandle> {
        self.grid.entity_at(index)
    }

    /// Debug accessor: remove an entity by linear index
    pub fn remove_entity_at(&mut self, index: usize) -> Option<EntityHandle> {
        self.grid.remove_entity_at(index)
    }

    /// Debug accessor: directional light by index
    pub fn directional_light_at(&self, index: usize) -> Option<&DirectionalLight> {
        self.directional_lights.get(index)
    }

    /// Debug accessor: point light by index
    pub fn point_light_at(&self, index: usize) -> Option<&PointLight> {
        self.point_lights.get(index)
    }
}
