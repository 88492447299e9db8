//! Training bot enemy

use spaced_engine::foundation::math::{constants, utils};
use spaced_engine::prelude::*;

use crate::projectile::{projectile_entity, PROJECTILE_ACCEL};

/// Update ticks between shots
const ATTACK_TIMER: u32 = 60;

/// Z line the bot advances to before holding position
const HOLD_LINE_Z: f32 = -37.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnimState {
    Idle,
    RotRight,
}

/// Training bot: advance to the hold line, fire on a fixed cadence,
/// recoil a quarter turn after each shot, soak up player projectiles
pub struct TrainingBotBehavior {
    attack_timer: u32,
    anim_state: AnimState,
    anim_target: f32,
    projectile_model: ModelId,
    projectile_dims: Dimensions,
}

impl TrainingBotBehavior {
    /// Create bot behavior firing the given projectile model
    pub fn new(projectile_model: ModelId, projectile_dims: Dimensions) -> Self {
        Self {
            attack_timer: ATTACK_TIMER,
            anim_state: AnimState::Idle,
            anim_target: 0.0,
            projectile_model,
            projectile_dims,
        }
    }

    fn resolve_hits(&self, state: &EntityState, ctx: &mut UpdateContext<'_>) {
        let mut hits = Vec::new();
        for neighbor in ctx.neighbors {
            // The updating entity itself is mutably borrowed by the sweep;
            // a failed borrow is how we skip self.
            let Ok(other) = neighbor.try_borrow() else {
                continue;
            };
            if other.state.is_projectile()
                && !other.state.is_enemy()
                && state.collides_with(&other.state)
            {
                hits.push(neighbor.clone());
            }
        }

        for hit in hits {
            // Damage accounting would go here.
            log::debug!("Training bot absorbed a projectile");
            ctx.despawn(&hit);
        }
    }
}

impl Behavior for TrainingBotBehavior {
    fn update(&mut self, state: &mut EntityState, ctx: &mut UpdateContext<'_>) {
        if state.translation().z < HOLD_LINE_Z {
            state.transform.translation.z += ctx.delta_time * 2.0;
        }

        self.resolve_hits(state, ctx);

        match self.anim_state {
            AnimState::Idle => {
                self.attack_timer -= 1;
                if self.attack_timer == 0 {
                    self.attack_timer = ATTACK_TIMER;

                    let muzzle = state.translation()
                        + Vec3::new(0.0, 0.0, state.dimensions.depth / 1.4);
                    ctx.spawn(projectile_entity(
                        self.projectile_model,
                        self.projectile_dims,
                        muzzle,
                        true,
                        -PROJECTILE_ACCEL,
                    ));

                    self.anim_state = AnimState::RotRight;
                    self.anim_target = state.transform.rotation.z - constants::HALF_PI;
                }
            }
            AnimState::RotRight => {
                let (value, reached) = utils::lerp_step(
                    state.transform.rotation.z,
                    self.anim_target,
                    6.0 * ctx.delta_time,
                );
                state.transform.rotation.z = value;
                if reached {
                    self.anim_state = AnimState::Idle;
                }
            }
        }
    }
}

/// Build a training bot entity at the given position
pub fn training_bot_entity(
    model: ModelId,
    dimensions: Dimensions,
    projectile_model: ModelId,
    projectile_dims: Dimensions,
    position: Vec3,
) -> GameEntity {
    GameEntity::with_behavior(
        EntityState::at(model, dimensions, EntityFlags::ENEMY, position),
        Box::new(TrainingBotBehavior::new(projectile_model, projectile_dims)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use spaced_engine::scene::{GridConfig, Residency};
    use std::rc::Rc;

    fn bot_at(z: f32) -> GameEntity {
        training_bot_entity(
            ModelId::default(),
            Dimensions::new(6.0, 4.0, 6.0),
            ModelId::default(),
            Dimensions::new(1.0, 1.0, 2.0),
            Vec3::new(0.0, 0.0, z),
        )
    }

    #[test]
    fn bot_fires_on_the_attack_cadence() {
        let mut scene = Scene::new(GridConfig::default());
        scene.insert_entity(bot_at(-37.0).into_handle());

        let frame = FrameInput::default();
        for _ in 0..ATTACK_TIMER - 1 {
            scene.update(0.016, &frame);
        }
        assert_eq!(scene.entity_count(), 1);

        // The 60th tick fires.
        scene.update(0.016, &frame);
        assert_eq!(scene.entity_count(), 2);
    }

    #[test]
    fn bot_advances_to_the_hold_line() {
        let mut scene = Scene::new(GridConfig::default());
        let bot = bot_at(-44.0).into_handle();
        scene.insert_entity(Rc::clone(&bot));

        let frame = FrameInput::default();
        scene.update(0.25, &frame);
        assert!((bot.borrow().state.translation().z - (-43.5)).abs() < 1e-5);

        // Already at the line: no further advance.
        bot.borrow_mut().state.transform.translation.z = -37.0;
        scene.update(0.25, &frame);
        assert!((bot.borrow().state.translation().z - (-37.0)).abs() < 1e-5);
    }

    #[test]
    fn bot_despawns_player_projectiles_on_contact() {
        let mut scene = Scene::new(GridConfig::default());
        let bot = bot_at(-37.0).into_handle();
        scene.insert_entity(Rc::clone(&bot));

        // A player projectile overlapping the bot, inert so it stays put.
        let shot = GameEntity::new(EntityState::at(
            ModelId::default(),
            Dimensions::new(1.0, 1.0, 2.0),
            EntityFlags::PROJECTILE | EntityFlags::DESTROY_WHEN_OUT_OF_BOUNDS,
            Vec3::new(0.5, 0.0, -37.0),
        ))
        .into_handle();
        scene.insert_entity(Rc::clone(&shot));

        scene.update(0.016, &FrameInput::default());

        assert_eq!(scene.grid().residency(&shot), None);
        assert!(matches!(
            scene.grid().residency(&bot),
            Some(Residency::Cell(_))
        ));
    }

    #[test]
    fn enemy_projectiles_are_ignored_by_the_bot() {
        let mut scene = Scene::new(GridConfig::default());
        scene.insert_entity(bot_at(-37.0).into_handle());

        let shot = GameEntity::new(EntityState::at(
            ModelId::default(),
            Dimensions::new(1.0, 1.0, 2.0),
            EntityFlags::PROJECTILE | EntityFlags::ENEMY,
            Vec3::new(0.5, 0.0, -37.0),
        ))
        .into_handle();
        scene.insert_entity(Rc::clone(&shot));

        scene.update(0.016, &FrameInput::default());

        assert!(scene.grid().residency(&shot).is_some());
    }
}
