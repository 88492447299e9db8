//! Projectile entities

use spaced_engine::prelude::*;

/// Forward acceleration of a projectile in units per second squared.
/// Enemy shots run toward negative Z, the player's toward positive Z.
pub const PROJECTILE_ACCEL: f32 = 2.0;

/// Projectile flight: accelerate along Z, spin for effect
pub struct ProjectileBehavior {
    velocity: Vec3,
    accel_z: f32,
}

impl ProjectileBehavior {
    /// Create projectile flight with the given Z acceleration
    pub fn new(accel_z: f32) -> Self {
        Self {
            velocity: Vec3::zeros(),
            accel_z,
        }
    }
}

impl Behavior for ProjectileBehavior {
    fn update(&mut self, state: &mut EntityState, ctx: &mut UpdateContext<'_>) {
        self.velocity.z += self.accel_z * ctx.delta_time;

        state.transform.translation.z += self.velocity.z;
        state.transform.rotation.z += ctx.delta_time * 2.0;
    }
}

/// Build a projectile entity at the given position
///
/// Projectiles are destroyed the moment they leave the world bounds;
/// nothing keeps track of a spent shot.
pub fn projectile_entity(
    model: ModelId,
    dimensions: Dimensions,
    position: Vec3,
    enemy: bool,
    accel_z: f32,
) -> GameEntity {
    let mut flags = EntityFlags::PROJECTILE | EntityFlags::DESTROY_WHEN_OUT_OF_BOUNDS;
    if enemy {
        flags |= EntityFlags::ENEMY;
    }

    let mut state = EntityState::at(model, dimensions, flags, position);
    state.transform.scale = Vec3::new(2.0, 2.0, 2.0);

    GameEntity::with_behavior(state, Box::new(ProjectileBehavior::new(accel_z)))
}
