//! Free-fly camera
//!
//! First-person style camera driven by a position plus yaw/pitch/roll
//! Euler angles. Each update re-derives the basis vectors in a fixed
//! order (yaw about world up, pitch about the yawed right axis, roll
//! about the pitched forward axis) and then rebuilds the left-handed
//! view matrix, the projection, and the culling frustum. The derivation
//! order is load-bearing: pitching around the *yawed* right axis is what
//! makes "look up" follow the heading, so it must not be reordered.
//!
//! Angles are never range-reduced; movement and orientation only ever
//! feed them through `sin`/`cos`, so periodicity keeps long sessions
//! well-behaved.
//!
//! The frustum (and the matrices) are only valid for the frame in which
//! [`Camera::update`] ran; the frame loop calculates first and queries
//! second.

use crate::foundation::math::{constants, utils, Mat4, Rotation3, Unit, Vec3};
use crate::render::frustum::Frustum;

/// Discrete movement/rotation directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraDirection {
    /// Along the view direction
    Forward,
    /// Against the view direction
    Backward,
    /// Strafe left
    Left,
    /// Strafe right
    Right,
    /// World up
    Up,
    /// World down
    Down,
}

/// Free-fly camera with derived view, projection and frustum
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    roll: f32,

    view: Mat4,
    projection: Mat4,
    frustum: Frustum,
}

impl Camera {
    const DEFAULT_FORWARD: Vec3 = Vec3::new(0.0, 0.0, -1.0);
    const DEFAULT_RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    const DEFAULT_UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

    const DEFAULT_FOV: f32 = constants::QUARTER_PI;
    const DEFAULT_ZNEAR: f32 = 1.0;
    const DEFAULT_ZFAR: f32 = 1000.0;

    /// Create a camera at the given position and orientation
    pub fn new(position: Vec3, yaw: f32, pitch: f32, roll: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
            roll,
            view: Mat4::identity(),
            projection: Mat4::identity(),
            frustum: Frustum::default(),
        }
    }

    /// Translate the camera along its movement axes
    ///
    /// Forward/backward displace along the yaw heading and additionally
    /// along pitch (free-fly); up/down are world-axis moves; left/right
    /// strafe perpendicular to the heading.
    pub fn move_camera(&mut self, direction: CameraDirection, amount: f32) {
        match direction {
            CameraDirection::Forward => {
                self.position.x -= self.yaw.sin() * amount;
                self.position.y += self.pitch.sin() * amount;
                self.position.z -= self.yaw.cos() * amount;
            }
            CameraDirection::Backward => {
                self.position.x += self.yaw.sin() * amount;
                self.position.y -= self.pitch.sin() * amount;
                self.position.z += self.yaw.cos() * amount;
            }
            CameraDirection::Up => {
                self.position.y += amount;
            }
            CameraDirection::Down => {
                self.position.y -= amount;
            }
            CameraDirection::Left => {
                self.position.x -= (self.yaw + constants::HALF_PI).sin() * amount;
                self.position.z -= (self.yaw + constants::HALF_PI).cos() * amount;
            }
            CameraDirection::Right => {
                self.position.x += (self.yaw + constants::HALF_PI).sin() * amount;
                self.position.z += (self.yaw + constants::HALF_PI).cos() * amount;
            }
        }
    }

    /// Adjust yaw, pitch or roll by a signed amount
    ///
    /// Forward/backward roll, up/down pitch, left/right yaw. No bounds.
    pub fn rotate_camera(&mut self, direction: CameraDirection, amount: f32) {
        match direction {
            CameraDirection::Forward => self.roll += amount,
            CameraDirection::Backward => self.roll -= amount,
            CameraDirection::Up => self.pitch += amount,
            CameraDirection::Down => self.pitch -= amount,
            CameraDirection::Left => self.yaw += amount,
            CameraDirection::Right => self.yaw -= amount,
        }
    }

    /// Pan the camera without leaving its movement plane
    ///
    /// Like [`Camera::move_camera`] but forward/backward ignore pitch,
    /// and up/down slide along the pitched vertical instead of world Y.
    pub fn pan_camera(&mut self, direction: CameraDirection, amount: f32) {
        match direction {
            CameraDirection::Forward => {
                self.position.x -= self.yaw.sin() * amount;
                self.position.z -= self.yaw.cos() * amount;
            }
            CameraDirection::Backward => {
                self.position.x += self.yaw.sin() * amount;
                self.position.z += self.yaw.cos() * amount;
            }
            CameraDirection::Up => {
                self.position.y -= self.pitch.sin() * amount;
            }
            CameraDirection::Down => {
                self.position.y += self.pitch.sin() * amount;
            }
            CameraDirection::Left => {
                self.position.x -= (self.yaw + constants::HALF_PI).sin() * amount;
                self.position.z -= (self.yaw + constants::HALF_PI).cos() * amount;
            }
            CameraDirection::Right => {
                self.position.x += (self.yaw + constants::HALF_PI).sin() * amount;
                self.position.z += (self.yaw + constants::HALF_PI).cos() * amount;
            }
        }
    }

    /// Recompute the view matrix, projection matrix and frustum
    ///
    /// Must run once per frame before any visibility or matrix query.
    pub fn update(&mut self, aspect_ratio: f32) {
        let yaw_rotation = Rotation3::from_axis_angle(&Vec3::y_axis(), self.yaw);
        let mut forward = yaw_rotation * Self::DEFAULT_FORWARD;
        let mut right = yaw_rotation * Self::DEFAULT_RIGHT;

        let pitch_rotation = Rotation3::from_axis_angle(&Unit::new_normalize(right), self.pitch);
        forward = pitch_rotation * forward;
        let mut up = pitch_rotation * Self::DEFAULT_UP;

        let roll_rotation = Rotation3::from_axis_angle(&Unit::new_normalize(forward), self.roll);
        right = roll_rotation * right;
        up = roll_rotation * up;

        self.view = Mat4::new(
            right.x,
            right.y,
            right.z,
            -right.dot(&self.position),
            up.x,
            up.y,
            up.z,
            -up.dot(&self.position),
            forward.x,
            forward.y,
            forward.z,
            -forward.dot(&self.position),
            0.0,
            0.0,
            0.0,
            1.0,
        );

        self.projection = utils::perspective_lh(
            Self::DEFAULT_FOV,
            aspect_ratio,
            Self::DEFAULT_ZNEAR,
            Self::DEFAULT_ZFAR,
        );

        self.frustum = Frustum::from_view_projection(&(self.projection * self.view));
    }

    /// Sphere visibility against the current frustum
    ///
    /// Valid only after [`Camera::update`] has run this frame. Spheres on
    /// a plane boundary count as visible.
    pub fn is_visible(&self, position: Vec3, radius: f32) -> bool {
        self.frustum.contains_sphere(position, radius)
    }

    /// Current view matrix
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view
    }

    /// Current projection matrix
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    /// Combined view-projection matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Current frustum
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Camera position in world space
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current yaw in radians
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current pitch in radians
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Current roll in radians
    pub fn roll(&self) -> f32 {
        self.roll
    }
}

impl Default for Camera {
    /// The game's opening viewpoint: high above the play field, pitched
    /// straight down
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 90.0, -5.0), 0.0, -constants::HALF_PI, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ASPECT: f32 = 16.0 / 9.0;

    #[test]
    fn forward_move_follows_yaw_and_pitch() {
        let mut camera = Camera::new(Vec3::zeros(), 0.0, 0.0, 0.0);
        camera.move_camera(CameraDirection::Forward, 2.0);
        assert_relative_eq!(camera.position().z, -2.0);
        assert_relative_eq!(camera.position().x, 0.0);

        let mut pitched = Camera::new(Vec3::zeros(), 0.0, -constants::HALF_PI, 0.0);
        pitched.move_camera(CameraDirection::Forward, 2.0);
        // Straight-down pitch turns forward motion into descent.
        assert_relative_eq!(pitched.position().y, -2.0);
        assert_relative_eq!(pitched.position().z, -2.0, epsilon = 1e-5);
    }

    #[test]
    fn strafe_is_perpendicular_to_heading() {
        let mut camera = Camera::new(Vec3::zeros(), 0.0, 0.0, 0.0);
        camera.move_camera(CameraDirection::Right, 3.0);
        assert_relative_eq!(camera.position().x, 3.0, epsilon = 1e-5);
        assert_relative_eq!(camera.position().z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn angles_are_not_range_reduced() {
        let mut camera = Camera::default();
        for _ in 0..100 {
            camera.rotate_camera(CameraDirection::Left, 1.0);
        }
        assert_relative_eq!(camera.yaw(), 100.0);
    }

    #[test]
    fn view_matrix_centers_the_camera() {
        let mut camera = Camera::new(Vec3::new(3.0, 5.0, -7.0), 0.4, -0.3, 0.1);
        camera.update(ASPECT);

        let eye = camera.view_matrix() * crate::foundation::math::Vec4::new(3.0, 5.0, -7.0, 1.0);
        assert_relative_eq!(eye.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(eye.y, 0.0, epsilon = 1e-4);
        assert_relative_eq!(eye.z, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn top_down_camera_sees_the_play_field() {
        // The opening viewpoint: (0, 90, -5) pitched straight down.
        let mut camera = Camera::default();
        camera.update(ASPECT);

        // The plane directly below the camera is well inside the frustum.
        assert!(camera.is_visible(Vec3::new(0.0, 0.0, -5.0), 1.0));

        // A point far past the far plane along the view direction is not.
        assert!(!camera.is_visible(Vec3::new(0.0, -1500.0, -5.0), 1.0));
    }

    #[test]
    fn culling_is_conservative_at_plane_boundaries() {
        let mut camera = Camera::new(Vec3::zeros(), constants::PI, 0.0, 0.0);
        camera.update(ASPECT);

        // Yaw of pi flips the heading onto +Z.
        assert!(camera.is_visible(Vec3::new(0.0, 0.0, 100.0), 1.0));
        assert!(!camera.is_visible(Vec3::new(0.0, 0.0, -100.0), 1.0));

        // A sphere straddling the far plane survives; one fully beyond it
        // does not.
        assert!(camera.is_visible(Vec3::new(0.0, 0.0, 1004.0), 5.0));
        assert!(!camera.is_visible(Vec3::new(0.0, 0.0, 1010.0), 5.0));
    }

    #[test]
    fn rotation_order_is_yaw_then_pitch_then_roll() {
        // With a quarter yaw the heading lies on -X; pitching up must then
        // rotate about the new right axis (-Z world), lifting the view
        // toward +Y without disturbing the heading's X component sign.
        let mut camera = Camera::new(Vec3::zeros(), constants::HALF_PI, 0.4, 0.0);
        camera.update(ASPECT);

        // Forward row of the view matrix is the third row.
        let view = camera.view_matrix();
        let forward = Vec3::new(view[(2, 0)], view[(2, 1)], view[(2, 2)]);
        assert!(forward.x < 0.0);
        assert!(forward.y > 0.0);
        assert_relative_eq!(forward.z, 0.0, epsilon = 1e-5);
    }
}
