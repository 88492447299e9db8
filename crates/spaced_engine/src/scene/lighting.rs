//! Light definitions
//!
//! Plain light descriptions the renderer uploads once per frame. The
//! shader side works with fixed-size arrays, so the scene caps how many
//! of each kind it accepts.

use crate::foundation::math::{Vec3, Vec4};

/// Maximum directional lights a scene will accept
pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;

/// Maximum point lights a scene will accept
pub const MAX_POINT_LIGHTS: usize = 8;

/// Directional light (sun-style)
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    /// Ambient color contribution
    pub ambient: Vec4,
    /// Diffuse color contribution
    pub diffuse: Vec4,
    /// Specular color contribution
    pub specular: Vec4,
    /// Light direction
    pub direction: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            ambient: Vec4::new(0.4, 0.4, 0.4, 1.0),
            diffuse: Vec4::new(0.6, 0.6, 0.6, 1.0),
            specular: Vec4::new(0.8, 0.8, 0.8, 1.0),
            direction: Vec3::zeros(),
        }
    }
}

impl DirectionalLight {
    /// Create a directional light facing the given direction
    pub fn facing(direction: Vec3) -> Self {
        Self {
            direction,
            ..Default::default()
        }
    }
}

/// Point light with distance attenuation
#[derive(Debug, Clone)]
pub struct PointLight {
    /// Ambient color contribution
    pub ambient: Vec4,
    /// Diffuse color contribution
    pub diffuse: Vec4,
    /// Specular color contribution
    pub specular: Vec4,
    /// Light position in world space
    pub position: Vec3,
    /// Maximum lit distance
    pub range: f32,
    /// Attenuation coefficients (constant, linear, quadratic)
    pub attenuation: Vec3,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            ambient: Vec4::new(0.4, 0.4, 0.4, 1.0),
            diffuse: Vec4::new(0.6, 0.6, 0.6, 1.0),
            specular: Vec4::new(0.8, 0.8, 0.8, 1.0),
            position: Vec3::zeros(),
            range: 10.0,
            attenuation: Vec3::new(0.0, 0.0, 0.1),
        }
    }
}

impl PointLight {
    /// Create a point light at the given position
    pub fn at(position: Vec3, range: f32) -> Self {
        Self {
            position,
            range,
            ..Default::default()
        }
    }
}
