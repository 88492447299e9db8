//! # Space-D Engine
//!
//! The engine core of the Space-D arcade game: a cell-grid scene manager
//! with out-of-bounds overflow tracking, a free-fly camera with six-plane
//! frustum culling, and a render-dispatch loop that submits draw calls
//! only for visible entities.
//!
//! ## Frame order
//!
//! Every frame runs the same sequence, with no suspension points:
//!
//! ```text
//! application update (input, camera steering)
//!      ↓
//! scene sweep (entity behaviors, grid migration)
//!      ↓
//! camera update (view, projection, frustum)
//!      ↓
//! render dispatch (frustum cull, draw submission)
//! ```
//!
//! The engine core is single-threaded. The one structural hazard,
//! behaviors spawning or despawning entities mid-sweep, is handled by
//! staging intents and applying them after the sweep.
//!
//! Actual GPU work, windowing and the OS input layer live behind seams
//! ([`render::RenderBackend`], [`input::InputState`]); the engine ships a
//! headless backend for tests and windowless runs.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod entity;
pub mod foundation;
pub mod input;
pub mod render;
pub mod scene;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use engine::{Engine, EngineConfig, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{ModelCache, ModelId},
        config::{Config, ConfigError},
        entity::{
            Behavior, EntityFlags, EntityHandle, EntityState, FrameInput, GameEntity,
            UpdateContext,
        },
        foundation::{
            math::{Dimensions, Mat4, Transform, Vec2, Vec3, Vec4},
            time::Timer,
        },
        input::{InputState, KeyCode},
        render::{Camera, CameraDirection, HeadlessBackend, RenderBackend},
        scene::{
            DirectionalLight, GridConfig, PointLight, RenderStats, Scene, SceneRenderer,
            SceneRendererConfig,
        },
        AppError, Application, Engine, EngineConfig, EngineError,
    };
}
