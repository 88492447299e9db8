//! Player ship

use std::cell::RefCell;
use std::rc::Rc;

use spaced_engine::foundation::math::{constants, utils, Vec4};
use spaced_engine::prelude::*;

use crate::projectile::{projectile_entity, PROJECTILE_ACCEL};

/// Steering gain applied to the cursor distance
const STEER_GAIN: f32 = 200.0;

/// Cursor distance below which the ship stops correcting
const STEER_DEADZONE: f32 = 0.0005;

/// Sideways velocity that triggers the barrel roll
const ROLL_TRIGGER: f32 = 0.3;

/// Per-frame intents the input layer hands to the ship
///
/// The windowing glue owns the other end of this cell and writes into it
/// before the scene sweep runs; the behavior drains it during its update.
#[derive(Debug, Default)]
pub struct ShipController {
    /// Fire a projectile this frame
    pub fire: bool,
}

/// Shared handle to the ship controller
pub type ShipControllerHandle = Rc<RefCell<ShipController>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnimState {
    Idle,
    RotLeft,
    RotRight,
}

/// Player ship: chase the cursor across the plane, barrel-roll on hard
/// sideways corrections, fire on request
pub struct PlayerShipBehavior {
    controller: ShipControllerHandle,
    velocity: Vec3,
    anim_state: AnimState,
    anim_target: f32,
    projectile_model: ModelId,
    projectile_dims: Dimensions,
}

impl PlayerShipBehavior {
    /// Create ship behavior wired to the given controller
    pub fn new(
        controller: ShipControllerHandle,
        projectile_model: ModelId,
        projectile_dims: Dimensions,
    ) -> Self {
        Self {
            controller,
            velocity: Vec3::zeros(),
            anim_state: AnimState::Idle,
            anim_target: 0.0,
            projectile_model,
            projectile_dims,
        }
    }

    fn steer(&mut self, state: &EntityState, ctx: &UpdateContext<'_>) {
        // Project the ship into the mouse's coordinate space. The scaled
        // 4-vector normalization is what the steering was tuned against.
        let t = state.translation();
        let clip = ctx.frame.view_proj * Vec4::new(t.x, t.y, t.z, 1.0);
        let projected = clip.try_normalize(f32::EPSILON).unwrap_or_else(Vec4::zeros) * 2.0;

        let mouse = ctx.frame.mouse_ndc;

        let diff_x = (mouse.x - projected.x).abs();
        if diff_x < STEER_DEADZONE {
            self.velocity.x = 0.0;
        } else if mouse.x < projected.x {
            self.velocity.x = -STEER_GAIN * ctx.delta_time * diff_x;
        } else {
            self.velocity.x = STEER_GAIN * ctx.delta_time * diff_x;
        }

        let diff_y = (mouse.y - projected.y).abs();
        if diff_y < STEER_DEADZONE {
            self.velocity.z = 0.0;
        } else if mouse.y < projected.y {
            self.velocity.z = STEER_GAIN * ctx.delta_time * diff_y;
        } else {
            self.velocity.z = -STEER_GAIN * ctx.delta_time * diff_y;
        }
    }

    fn animate(&mut self, state: &mut EntityState, delta_time: f32) {
        match self.anim_state {
            AnimState::Idle => {
                if self.velocity.x > ROLL_TRIGGER {
                    self.anim_state = AnimState::RotLeft;
                    self.anim_target = state.transform.rotation.z - constants::PI;
                } else if self.velocity.x < -ROLL_TRIGGER {
                    self.anim_state = AnimState::RotRight;
                    self.anim_target = state.transform.rotation.z + constants::PI;
                }
            }
            AnimState::RotLeft | AnimState::RotRight => {
                let (value, reached) = utils::lerp_step(
                    state.transform.rotation.z,
                    self.anim_target,
                    6.0 * delta_time,
                );
                state.transform.rotation.z = value;
                if reached {
                    self.anim_state = AnimState::Idle;
                }
            }
        }
    }
}

impl Behavior for PlayerShipBehavior {
    fn update(&mut self, state: &mut EntityState, ctx: &mut UpdateContext<'_>) {
        self.steer(state, ctx);
        self.animate(state, ctx.delta_time);

        state.transform.translation.x += self.velocity.x;
        state.transform.translation.z += self.velocity.z;

        let fire = std::mem::take(&mut self.controller.borrow_mut().fire);
        if fire {
            let muzzle =
                state.translation() + Vec3::new(0.0, 0.0, state.dimensions.depth / 1.4);
            ctx.spawn(projectile_entity(
                self.projectile_model,
                self.projectile_dims,
                muzzle,
                false,
                PROJECTILE_ACCEL,
            ));
        }
    }
}

/// Build the player ship entity at the origin
pub fn player_ship_entity(
    model: ModelId,
    dimensions: Dimensions,
    controller: ShipControllerHandle,
    projectile_model: ModelId,
    projectile_dims: Dimensions,
) -> GameEntity {
    GameEntity::with_behavior(
        EntityState::new(model, dimensions, EntityFlags::empty()),
        Box::new(PlayerShipBehavior::new(
            controller,
            projectile_model,
            projectile_dims,
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use spaced_engine::foundation::math::Vec2;
    use spaced_engine::scene::GridConfig;
    use std::rc::Rc;

    fn ship_setup() -> (Scene, EntityHandle, ShipControllerHandle) {
        let controller = ShipControllerHandle::default();
        let ship = player_ship_entity(
            ModelId::default(),
            Dimensions::new(4.0, 2.0, 6.0),
            Rc::clone(&controller),
            ModelId::default(),
            Dimensions::new(1.0, 1.0, 2.0),
        )
        .into_handle();

        let mut scene = Scene::new(GridConfig::default());
        scene.insert_entity(Rc::clone(&ship));
        (scene, ship, controller)
    }

    #[test]
    fn ship_steers_toward_the_cursor() {
        let (mut scene, ship, _controller) = ship_setup();

        // Identity view-projection: the ship at the origin projects to
        // NDC (0, 0); put the cursor off to the right.
        let frame = FrameInput {
            mouse_ndc: Vec2::new(0.8, 0.0),
            view_proj: Mat4::identity(),
        };
        scene.update(0.016, &frame);

        assert!(ship.borrow().state.translation().x > 0.0);
    }

    #[test]
    fn ship_holds_position_inside_the_deadzone() {
        let (mut scene, ship, _controller) = ship_setup();

        let frame = FrameInput {
            mouse_ndc: Vec2::new(0.0, 0.0),
            view_proj: Mat4::identity(),
        };
        scene.update(0.016, &frame);

        let t = ship.borrow().state.translation();
        assert!(t.x.abs() < 1e-6);
        assert!(t.z.abs() < 1e-6);
    }

    #[test]
    fn fire_intent_spawns_one_player_projectile() {
        let (mut scene, _ship, controller) = ship_setup();

        controller.borrow_mut().fire = true;
        scene.update(0.016, &FrameInput::default());
        assert_eq!(scene.entity_count(), 2);

        // The intent is consumed; no follow-up shot.
        scene.update(0.016, &FrameInput::default());
        assert_eq!(scene.entity_count(), 2);

        let shot = scene.entity_at(1).expect("projectile tracked");
        let shot = shot.borrow();
        assert!(shot.state.is_projectile());
        assert!(!shot.state.is_enemy());
    }
}
