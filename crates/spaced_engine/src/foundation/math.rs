//! Math utilities and types
//!
//! Provides the fundamental math types used by the scene, camera and
//! gameplay code. All rotation state in the engine is Euler angles in
//! radians; matrices follow nalgebra's column-vector convention.

pub use nalgebra::{Matrix3, Matrix4, Rotation3, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Transform representing position, rotation, and scale
///
/// Rotation is stored as Euler angles (radians) applied in X, then Y,
/// then Z order when building the world matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Translation in world space
    pub translation: Vec3,

    /// Euler rotation in radians (x, y, z)
    pub rotation: Vec3,

    /// Non-uniform scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only a translation
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Convert to a world transformation matrix
    ///
    /// Scale is applied first, then the X/Y/Z rotations, then the
    /// translation.
    pub fn to_matrix(&self) -> Mat4 {
        let rotation = Rotation3::from_axis_angle(&Vec3::z_axis(), self.rotation.z)
            * Rotation3::from_axis_angle(&Vec3::y_axis(), self.rotation.y)
            * Rotation3::from_axis_angle(&Vec3::x_axis(), self.rotation.x);

        Mat4::new_translation(&self.translation)
            * rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// Axis-aligned bounding dimensions of a model (width, height, depth)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dimensions {
    /// Extent along X
    pub width: f32,
    /// Extent along Y
    pub height: f32,
    /// Extent along Z
    pub depth: f32,
}

impl Dimensions {
    /// Create a new dimensions triple
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Radius of the conservative bounding sphere: half the largest extent
    pub fn bounding_radius(&self) -> f32 {
        self.width.max(self.height).max(self.depth) / 2.0
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Pi / 4
    pub const QUARTER_PI: f32 = PI * 0.25;
}

/// Math utility functions
pub mod utils {
    use super::{Mat4, Vec2, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * (super::constants::PI / 180.0)
    }

    /// Step `current` toward `target` by at most `max_step`
    ///
    /// Returns the stepped value and whether the target was reached this
    /// step. Used for the rate-limited rotation animations.
    pub fn lerp_step(current: f32, target: f32, max_step: f32) -> (f32, bool) {
        let diff = target - current;
        if diff > max_step {
            (current + max_step, false)
        } else if diff < -max_step {
            (current - max_step, false)
        } else {
            (target, true)
        }
    }

    /// Squared distance between two points
    pub fn distance_squared(a: Vec3, b: Vec3) -> f32 {
        (a - b).magnitude_squared()
    }

    /// Convert window-space mouse coordinates to normalized device coordinates
    ///
    /// NDC X runs -1..1 left to right, NDC Y runs -1..1 bottom to top.
    pub fn mouse_to_ndc(mouse_x: f32, mouse_y: f32, window_width: f32, window_height: f32) -> Vec2 {
        Vec2::new(
            (2.0 * mouse_x) / window_width - 1.0,
            -((2.0 * mouse_y) / window_height - 1.0),
        )
    }

    /// Build a left-handed perspective projection with depth mapped to [0, 1]
    ///
    /// The view space convention is +Z forward; `fov_y` is the vertical
    /// field of view in radians.
    pub fn perspective_lh(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let tan_half_fovy = (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = far / (far - near);
        result[(2, 3)] = -(near * far) / (far - near);
        result[(3, 2)] = 1.0;

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn transform_matrix_applies_translation_last() {
        let transform = Transform {
            translation: Vec3::new(10.0, 0.0, -5.0),
            rotation: Vec3::new(0.0, constants::HALF_PI, 0.0),
            scale: Vec3::new(2.0, 2.0, 2.0),
        };

        // +X scaled to length 2, yawed 90 degrees onto -Z, then translated.
        let p = transform.to_matrix().transform_point(&nalgebra::Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.z, -7.0, epsilon = 1e-5);
    }

    #[test]
    fn bounding_radius_uses_largest_dimension() {
        let dims = Dimensions::new(2.0, 8.0, 4.0);
        assert_relative_eq!(dims.bounding_radius(), 4.0);
    }

    #[test]
    fn lerp_step_reaches_target() {
        let (value, reached) = utils::lerp_step(0.0, 1.0, 0.25);
        assert!(!reached);
        assert_relative_eq!(value, 0.25);

        let (value, reached) = utils::lerp_step(0.9, 1.0, 0.25);
        assert!(reached);
        assert_relative_eq!(value, 1.0);

        let (value, reached) = utils::lerp_step(0.0, -1.0, 0.25);
        assert!(!reached);
        assert_relative_eq!(value, -0.25);
    }

    #[test]
    fn mouse_to_ndc_maps_corners() {
        let center = utils::mouse_to_ndc(640.0, 360.0, 1280.0, 720.0);
        assert_relative_eq!(center.x, 0.0);
        assert_relative_eq!(center.y, 0.0);

        let top_left = utils::mouse_to_ndc(0.0, 0.0, 1280.0, 720.0);
        assert_relative_eq!(top_left.x, -1.0);
        assert_relative_eq!(top_left.y, 1.0);
    }

    #[test]
    fn perspective_lh_maps_near_and_far_to_unit_depth() {
        let proj = utils::perspective_lh(constants::QUARTER_PI, 16.0 / 9.0, 1.0, 1000.0);

        let near = proj * Vec4::new(0.0, 0.0, 1.0, 1.0);
        assert_relative_eq!(near.z / near.w, 0.0, epsilon = 1e-5);

        let far = proj * Vec4::new(0.0, 0.0, 1000.0, 1.0);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-4);
    }
}
