//! Space-D
//!
//! A small 3D arcade game: steer a ship across the play field, trade
//! projectiles with training bots. The composition root wires the engine
//! together; without a windowing layer the game runs headless against the
//! engine's counting backend, which is enough to exercise the full frame
//! loop (sweep, migration, culling, dispatch).

mod config;
mod projectile;
mod ship;
mod training_bot;

use rand::Rng;
use spaced_engine::prelude::*;

use config::GameConfig;
use ship::{player_ship_entity, ShipControllerHandle};
use training_bot::training_bot_entity;

/// Default config file path, next to the executable
const CONFIG_PATH: &str = "spaced.toml";

struct SpaceDGame {
    config: GameConfig,
    ship_controller: ShipControllerHandle,
}

impl SpaceDGame {
    fn new(config: GameConfig) -> Self {
        Self {
            config,
            ship_controller: ShipControllerHandle::default(),
        }
    }

    fn drive_camera(&self, engine: &mut Engine, delta_time: f32) {
        let rotate = self.config.camera.rotate_speed * delta_time;
        let translate = self.config.camera.move_speed * delta_time;

        if engine.input.is_down(KeyCode::Left) {
            engine.camera.rotate_camera(CameraDirection::Left, rotate);
        }
        if engine.input.is_down(KeyCode::Right) {
            engine.camera.rotate_camera(CameraDirection::Right, rotate);
        }
        if engine.input.is_down(KeyCode::Up) {
            engine.camera.rotate_camera(CameraDirection::Up, rotate);
        }
        if engine.input.is_down(KeyCode::Down) {
            engine.camera.rotate_camera(CameraDirection::Down, rotate);
        }
        if engine.input.is_down(KeyCode::W) {
            engine.camera.move_camera(CameraDirection::Forward, translate);
        }
        if engine.input.is_down(KeyCode::A) {
            engine.camera.move_camera(CameraDirection::Left, translate);
        }
        if engine.input.is_down(KeyCode::S) {
            engine.camera.move_camera(CameraDirection::Backward, translate);
        }
        if engine.input.is_down(KeyCode::D) {
            engine.camera.move_camera(CameraDirection::Right, translate);
        }
    }
}

impl Application for SpaceDGame {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let ship_model = engine.models.register("ship_dps", Dimensions::new(4.0, 2.0, 6.0));
        let bot_model = engine
            .models
            .register("enemy_training_bot", Dimensions::new(6.0, 4.0, 6.0));
        let projectile_model = engine
            .models
            .register("projectile_dps_basic", Dimensions::new(1.0, 1.0, 2.0));

        if self.config.debug.draw_cells {
            let marker = engine
                .models
                .register("debug_scene_cell", Dimensions::new(1.0, 0.0, 1.0));
            engine.scene_renderer.set_cell_marker(marker);
        }

        let projectile_dims = engine.models.dimensions(projectile_model);

        engine.scene.insert_entity(
            player_ship_entity(
                ship_model,
                engine.models.dimensions(ship_model),
                ShipControllerHandle::clone(&self.ship_controller),
                projectile_model,
                projectile_dims,
            )
            .into_handle(),
        );

        let mut rng = rand::thread_rng();
        let bot_dims = engine.models.dimensions(bot_model);
        for _ in 0..self.config.gameplay.bot_count {
            let position = Vec3::new(
                rng.gen_range(-40.0..40.0),
                0.0,
                rng.gen_range(-44.0..-38.0),
            );
            engine.scene.insert_entity(
                training_bot_entity(
                    bot_model,
                    bot_dims,
                    projectile_model,
                    projectile_dims,
                    position,
                )
                .into_handle(),
            );
        }

        engine
            .scene
            .insert_directional_light(DirectionalLight::facing(Vec3::new(0.0, -0.707, -0.707)));
        engine
            .scene
            .insert_point_light(PointLight::at(Vec3::new(0.0, 10.0, -20.0), 30.0));

        log::info!(
            "Scene populated: {} entities, {} models",
            engine.scene.entity_count(),
            engine.models.len()
        );
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        self.drive_camera(engine, delta_time);

        if engine.input.is_tapped(KeyCode::Space) {
            self.ship_controller.borrow_mut().fire = true;
        }

        let frame_budget = self.config.gameplay.run_frames;
        if frame_budget > 0 && engine.timer().frame_count() >= frame_budget {
            engine.request_exit();
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        log::info!(
            "Shutting down after {} frames, {} entities tracked",
            engine.timer().frame_count(),
            engine.scene.entity_count()
        );
    }
}

fn main() {
    spaced_engine::foundation::logging::init();

    let config = GameConfig::load_or_default(CONFIG_PATH);

    let engine_config = EngineConfig {
        aspect_ratio: config.window.aspect_ratio(),
        renderer: SceneRendererConfig {
            debug_draw_cells: config.debug.draw_cells,
        },
        ..Default::default()
    };

    let mut backend = HeadlessBackend::new();
    let mut game = SpaceDGame::new(config);

    if let Err(e) = Engine::run(engine_config, &mut backend, &mut game) {
        log::error!("Fatal: {}", e);
        std::process::exit(1);
    }

    log::info!(
        "Rendered {} frames, {} draw calls total",
        backend.frames(),
        backend.submitted()
    );
}
