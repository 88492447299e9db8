//! Application trait and lifecycle management

use crate::config::ConfigError;
use crate::engine::Engine;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to build a game on the engine. The engine drives
/// the frame loop; the application supplies setup, per-frame gameplay
/// (input handling, camera steering) and teardown.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once before the first frame. Register models, populate the
    /// scene, place lights.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame before the scene sweep runs.
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Cleanup the application
    ///
    /// Called when the frame loop exits.
    fn cleanup(&mut self, engine: &mut Engine) {
        let _ = engine;
    }
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Asset lookup or registration error
    #[error("Asset error: {0}")]
    Asset(String),

    /// Game logic error
    #[error("Game logic error: {0}")]
    GameLogic(String),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}
