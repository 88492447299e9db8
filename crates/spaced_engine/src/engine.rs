//! Core engine implementation
//!
//! Owns the scene, camera, input snapshot and asset registry, and runs
//! the fixed frame order: application update (input and camera steering),
//! scene sweep (entity behaviors plus grid migration), camera update,
//! render dispatch. Nothing in the per-frame path fails; the loop exits
//! when the application requests it.

use thiserror::Error;

use crate::application::Application;
use crate::assets::ModelCache;
use crate::entity::FrameInput;
use crate::foundation::time::Timer;
use crate::input::InputState;
use crate::render::{Camera, RenderBackend};
use crate::scene::{GridConfig, RenderStats, Scene, SceneRenderer, SceneRendererConfig};

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Viewport aspect ratio fed to the camera each frame
    pub aspect_ratio: f32,

    /// Spatial grid shape
    pub grid: GridConfig,

    /// Render dispatch options
    pub renderer: SceneRendererConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            grid: GridConfig::default(),
            renderer: SceneRendererConfig::default(),
        }
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Application hook failed
    #[error("Application error: {0}")]
    Application(String),
}

/// Main engine struct
///
/// The engine coordinates the core subsystems and manages the main loop.
pub struct Engine {
    /// The game scene (spatial partition and lights)
    pub scene: Scene,

    /// Active camera
    pub camera: Camera,

    /// Model registry shared with gameplay code
    pub models: ModelCache,

    /// Input snapshot, fed by the windowing layer (or scripted in
    /// headless runs)
    pub input: InputState,

    /// Render dispatcher
    pub scene_renderer: SceneRenderer,

    timer: Timer,
    config: EngineConfig,
    last_stats: RenderStats,

    stats_elapsed: f32,
    stats_frames: u32,
    stats_submitted: usize,
    stats_culled: usize,

    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Self {
        log::info!(
            "Initializing engine ({}x{} cells of {} units)",
            config.grid.rows,
            config.grid.cols,
            config.grid.cell_size
        );

        Self {
            scene: Scene::new(config.grid.clone()),
            camera: Camera::default(),
            models: ModelCache::new(),
            input: InputState::new(),
            scene_renderer: SceneRenderer::new(config.renderer.clone()),
            timer: Timer::new(),
            config,
            last_stats: RenderStats::default(),
            stats_elapsed: 0.0,
            stats_frames: 0,
            stats_submitted: 0,
            stats_culled: 0,
            running: true,
        }
    }

    /// Run the engine main loop with the given application
    pub fn run<T: Application>(
        config: EngineConfig,
        backend: &mut dyn RenderBackend,
        app: &mut T,
    ) -> Result<(), EngineError> {
        let mut engine = Self::new(config);

        app.initialize(&mut engine)
            .map_err(|e| EngineError::Application(format!("App initialization: {}", e)))?;

        log::info!("Starting main loop...");

        while engine.running {
            engine.timer.update();
            let delta_time = engine.timer.delta_time();

            app.update(&mut engine, delta_time)
                .map_err(|e| EngineError::Application(format!("App update: {}", e)))?;

            engine.frame(delta_time, backend);
        }

        app.cleanup(&mut engine);

        log::info!("Engine shutdown complete");
        Ok(())
    }

    /// Execute one frame: scene sweep, camera update, render dispatch
    pub fn frame(&mut self, delta_time: f32, backend: &mut dyn RenderBackend) {
        let frame_input = FrameInput {
            mouse_ndc: self.input.mouse_ndc(),
            view_proj: self.camera.view_projection_matrix(),
        };

        self.scene.update(delta_time, &frame_input);
        self.camera.update(self.config.aspect_ratio);
        self.last_stats = self
            .scene_renderer
            .render(&self.scene, &self.camera, backend);

        self.input.end_frame();
        self.track_frame_stats(delta_time);
    }

    /// Request the main loop to exit after the current frame
    pub fn request_exit(&mut self) {
        self.running = false;
    }

    /// Frame timing
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Dispatch counters from the most recent frame
    pub fn last_stats(&self) -> RenderStats {
        self.last_stats
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // Averages dispatch counters over one-second windows and logs them.
    fn track_frame_stats(&mut self, delta_time: f32) {
        self.stats_elapsed += delta_time;
        self.stats_frames += 1;
        self.stats_submitted += self.last_stats.submitted;
        self.stats_culled += self.last_stats.culled;

        if self.stats_elapsed >= 1.0 {
            let fps = self.stats_frames as f32 / self.stats_elapsed;
            let mspf = if fps > 0.0 { 1000.0 / fps } else { 0.0 };
            log::info!(
                "FPS: {:.0}  Frame Time: {:.2} ms  drawn: {}  culled: {}",
                fps,
                mspf,
                self.stats_submitted,
                self.stats_culled
            );

            self.stats_elapsed = 0.0;
            self.stats_frames = 0;
            self.stats_submitted = 0;
            self.stats_culled = 0;
        }
    }
}
