//! Game configuration
//!
//! Loaded from `spaced.toml` (or `.ron`) next to the executable when
//! present, otherwise defaults apply. World-grid shape is not in here;
//! it is a fixed property of the game.

use serde::{Deserialize, Serialize};
use spaced_engine::prelude::Config;

/// Top-level game configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window settings
    pub window: WindowConfig,

    /// Camera control settings
    pub camera: CameraConfig,

    /// Gameplay settings
    pub gameplay: GameplayConfig,

    /// Debug settings
    pub debug: DebugConfig,
}

impl Config for GameConfig {}

/// Window settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in pixels
    pub width: u32,

    /// Window height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl WindowConfig {
    /// Aspect ratio of the window
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Camera control settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Movement speed in units per second
    pub move_speed: f32,

    /// Rotation speed in radians per second
    pub rotate_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            move_speed: 4.0,
            rotate_speed: 4.0,
        }
    }
}

/// Gameplay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Number of training bots to spawn
    pub bot_count: u32,

    /// Frames to run before exiting in headless mode (0 = run until
    /// interrupted)
    pub run_frames: u64,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            bot_count: 3,
            run_frames: 600,
        }
    }
}

/// Debug settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Render grid cell markers with occupancy highlighting
    pub draw_cells: bool,
}
