//! Game entity model
//!
//! Entities are plain state (transform, bounds, flags) paired with an
//! optional [`Behavior`] that runs once per frame inside the scene sweep.
//! There is no entity class hierarchy; what an entity *is* lives in its
//! flags, what it *does* lives in its behavior. The scene references
//! entities through shared-ownership [`EntityHandle`]s; an entity sits in
//! exactly one partition slot (a cell or the out-of-bounds list) at a time.
//!
//! Behaviors may not mutate scene structure directly; structural intents
//! (spawning a projectile, despawning a collided entity) are staged on the
//! [`UpdateContext`] and applied by the scene after the sweep completes.

use std::cell::RefCell;
use std::rc::Rc;

use bitflags::bitflags;

use crate::assets::ModelId;
use crate::foundation::math::{utils, Dimensions, Mat4, Transform, Vec2, Vec3};

bitflags! {
    /// Classification flags the scene consults during its sweep
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct EntityFlags: u8 {
        /// Entity is a projectile
        const PROJECTILE = 1 << 0;

        /// Entity belongs to the enemy side
        const ENEMY = 1 << 1;

        /// Drop the entity instead of tracking it once it leaves the
        /// bounded world region
        const DESTROY_WHEN_OUT_OF_BOUNDS = 1 << 2;
    }
}

/// Shared-ownership handle to a game entity
pub type EntityHandle = Rc<RefCell<GameEntity>>;

/// Pure entity state: where it is, how big it is, what it is
#[derive(Debug, Clone)]
pub struct EntityState {
    /// World transform; translation is mutated at most once per frame,
    /// before the grid repartitions the entity
    pub transform: Transform,

    /// Bounding dimensions, copied from the model at creation time
    pub dimensions: Dimensions,

    /// Model to draw this entity with
    pub model: ModelId,

    /// Classification flags
    pub flags: EntityFlags,
}

impl EntityState {
    /// Create entity state at the default transform
    pub fn new(model: ModelId, dimensions: Dimensions, flags: EntityFlags) -> Self {
        Self {
            transform: Transform::default(),
            dimensions,
            model,
            flags,
        }
    }

    /// Create entity state at a given translation
    pub fn at(model: ModelId, dimensions: Dimensions, flags: EntityFlags, translation: Vec3) -> Self {
        Self {
            transform: Transform::from_translation(translation),
            dimensions,
            model,
            flags,
        }
    }

    /// Current world translation
    pub fn translation(&self) -> Vec3 {
        self.transform.translation
    }

    /// Conservative bounding-sphere radius
    pub fn bounding_radius(&self) -> f32 {
        self.dimensions.bounding_radius()
    }

    /// Whether this entity is a projectile
    pub fn is_projectile(&self) -> bool {
        self.flags.contains(EntityFlags::PROJECTILE)
    }

    /// Whether this entity belongs to the enemy side
    pub fn is_enemy(&self) -> bool {
        self.flags.contains(EntityFlags::ENEMY)
    }

    /// Whether the scene should drop this entity when it leaves bounds
    pub fn destroy_when_out_of_bounds(&self) -> bool {
        self.flags.contains(EntityFlags::DESTROY_WHEN_OUT_OF_BOUNDS)
    }

    /// Bounding-sphere overlap test against another entity
    pub fn collides_with(&self, other: &EntityState) -> bool {
        let combined = self.bounding_radius() + other.bounding_radius();
        utils::distance_squared(self.translation(), other.translation()) < combined * combined
    }
}

/// Per-frame entity behavior
///
/// Implementations own their private gameplay state (timers, velocities,
/// animation phases) and mutate the entity through the `state` argument.
pub trait Behavior {
    /// Advance the entity by one frame
    fn update(&mut self, state: &mut EntityState, ctx: &mut UpdateContext<'_>);
}

/// A game entity: state plus optional behavior
pub struct GameEntity {
    /// Entity state, visible to the scene and renderer
    pub state: EntityState,

    behavior: Option<Box<dyn Behavior>>,
}

impl GameEntity {
    /// Create an inert entity (no per-frame behavior)
    pub fn new(state: EntityState) -> Self {
        Self {
            state,
            behavior: None,
        }
    }

    /// Create an entity driven by a behavior
    pub fn with_behavior(state: EntityState, behavior: Box<dyn Behavior>) -> Self {
        Self {
            state,
            behavior: Some(behavior),
        }
    }

    /// Wrap this entity in a shared-ownership handle
    pub fn into_handle(self) -> EntityHandle {
        Rc::new(RefCell::new(self))
    }

    /// Run this entity's behavior for the frame
    pub fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        if let Some(behavior) = self.behavior.as_mut() {
            behavior.update(&mut self.state, ctx);
        }
    }
}

impl std::fmt::Debug for GameEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEntity")
            .field("state", &self.state)
            .field("has_behavior", &self.behavior.is_some())
            .finish()
    }
}

/// Frame-wide inputs snapshotted before the scene sweep
///
/// Behaviors that steer toward the cursor project their translation
/// through `view_proj`; the matrices are the camera's most recent update.
#[derive(Debug, Clone)]
pub struct FrameInput {
    /// Mouse position in normalized device coordinates
    pub mouse_ndc: Vec2,

    /// Combined view-projection matrix of the active camera
    pub view_proj: Mat4,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            mouse_ndc: Vec2::zeros(),
            view_proj: Mat4::identity(),
        }
    }
}

/// Context handed to behaviors during the scene sweep
///
/// Carries read access to the frame inputs and the updating entity's cell
/// neighbors, plus the staging buffers for structural changes. Staged
/// spawns and despawns are applied by the scene once the sweep finishes.
pub struct UpdateContext<'a> {
    /// Seconds since the previous frame
    pub delta_time: f32,

    /// Frame-wide input snapshot
    pub frame: &'a FrameInput,

    /// Residents of the updating entity's cell at sweep start (includes
    /// the updating entity itself; borrow attempts on it will fail, which
    /// is how behaviors skip self-collision)
    pub neighbors: &'a [EntityHandle],

    spawned: Vec<GameEntity>,
    despawned: Vec<EntityHandle>,
}

impl<'a> UpdateContext<'a> {
    /// Create a context for one cell's sweep
    pub fn new(delta_time: f32, frame: &'a FrameInput, neighbors: &'a [EntityHandle]) -> Self {
        Self {
            delta_time,
            frame,
            neighbors,
            spawned: Vec::new(),
            despawned: Vec::new(),
        }
    }

    /// Stage a new entity for insertion after the sweep
    pub fn spawn(&mut self, entity: GameEntity) {
        self.spawned.push(entity);
    }

    /// Stage an entity for removal after the sweep
    pub fn despawn(&mut self, entity: &EntityHandle) {
        self.despawned.push(Rc::clone(entity));
    }

    /// Drain the staged structural changes
    pub(crate) fn drain_into(
        &mut self,
        spawned: &mut Vec<GameEntity>,
        despawned: &mut Vec<EntityHandle>,
    ) {
        spawned.append(&mut self.spawned);
        despawned.append(&mut self.despawned);
    }
}
