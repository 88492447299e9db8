//! Model registry with handle-based access
//!
//! Registered once at startup by the composition root, then shared by
//! reference with whatever needs to resolve a [`ModelId`]. Registration
//! is interned by name so registering the same model twice returns the
//! original handle.

use std::collections::HashMap;

use slotmap::SlotMap;

use crate::foundation::math::Dimensions;

slotmap::new_key_type! {
    /// Handle to a registered model
    pub struct ModelId;
}

/// Data tracked per registered model
#[derive(Debug, Clone)]
pub struct ModelData {
    /// Model name (matches the on-disk asset name)
    pub name: String,

    /// Axis-aligned bounding dimensions of the model geometry
    pub dimensions: Dimensions,
}

/// Registry of models known to the engine
#[derive(Debug, Default)]
pub struct ModelCache {
    models: SlotMap<ModelId, ModelData>,
    by_name: HashMap<String, ModelId>,
}

impl ModelCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model and return its handle
    ///
    /// Registering a name that already exists returns the existing handle
    /// without touching the stored data.
    pub fn register(&mut self, name: &str, dimensions: Dimensions) -> ModelId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }

        let id = self.models.insert(ModelData {
            name: name.to_string(),
            dimensions,
        });
        self.by_name.insert(name.to_string(), id);
        log::debug!("Registered model '{}' ({:?})", name, dimensions);
        id
    }

    /// Look up a model by handle
    pub fn get(&self, id: ModelId) -> Option<&ModelData> {
        self.models.get(id)
    }

    /// Look up a model handle by name
    pub fn find(&self, name: &str) -> Option<ModelId> {
        self.by_name.get(name).copied()
    }

    /// Bounding dimensions for a model, zero if the handle is stale
    pub fn dimensions(&self, id: ModelId) -> Dimensions {
        self.models
            .get(id)
            .map(|m| m.dimensions)
            .unwrap_or_default()
    }

    /// Number of registered models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_interns_by_name() {
        let mut cache = ModelCache::new();
        let a = cache.register("ship_dps", Dimensions::new(4.0, 2.0, 6.0));
        let b = cache.register("ship_dps", Dimensions::new(1.0, 1.0, 1.0));

        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.dimensions(a).depth, 6.0);
    }

    #[test]
    fn find_resolves_registered_names_only() {
        let mut cache = ModelCache::new();
        let id = cache.register("projectile_dps_basic", Dimensions::new(1.0, 1.0, 2.0));

        assert_eq!(cache.find("projectile_dps_basic"), Some(id));
        assert_eq!(cache.find("enemy_training_bot"), None);
    }
}
