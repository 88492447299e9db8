//! Rendering-facing engine pieces
//!
//! The camera with its view frustum, and the backend seam draw calls are
//! dispatched through. Actual GPU work is an external collaborator.

mod backend;
mod camera;
mod frustum;

pub use backend::{DrawCall, HeadlessBackend, RenderBackend};
pub use camera::{Camera, CameraDirection};
pub use frustum::{Frustum, Plane};
