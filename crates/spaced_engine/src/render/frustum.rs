//! View frustum and clipping planes
//!
//! The six planes are extracted algebraically from the combined
//! view-projection matrix (Gribb-Hartmann) and carry inward-facing
//! normals, so a positive signed distance means "inside this plane".

use crate::foundation::math::{Mat4, Vec3};

/// A plane in constant-normal form: `normal · p + d = 0`
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Plane normal, pointing toward the inside of the frustum
    pub normal: Vec3,

    /// Signed distance term
    pub d: f32,
}

impl Plane {
    /// Build a plane from raw view-projection row coefficients, normalized
    /// so that signed distances are in world units
    fn from_coefficients(x: f32, y: f32, z: f32, w: f32) -> Self {
        let normal = Vec3::new(x, y, z);
        let length = normal.magnitude();
        if length > 0.0 {
            Self {
                normal: normal / length,
                d: w / length,
            }
        } else {
            // Degenerate plane: classifies every point as on-plane, which
            // keeps visibility queries permissive before the first update.
            Self {
                normal: Vec3::zeros(),
                d: 0.0,
            }
        }
    }

    /// Signed distance from the plane to a point
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(&point) + self.d
    }
}

/// Six-plane view frustum (near, far, left, right, top, bottom)
#[derive(Debug, Clone)]
pub struct Frustum {
    /// The clipping planes, normals pointing inward
    pub planes: [Plane; 6],
}

impl Default for Frustum {
    /// A frustum that reports everything visible, matching the camera's
    /// state before its first update
    fn default() -> Self {
        Self {
            planes: [Plane {
                normal: Vec3::zeros(),
                d: 0.0,
            }; 6],
        }
    }
}

impl Frustum {
    /// Extract the six planes from a column-vector view-projection matrix
    ///
    /// Row combinations follow the standard extraction: near = r4+r3,
    /// far = r4-r3, left = r4+r1, right = r4-r1, top = r4-r2,
    /// bottom = r4+r2.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let r1 = vp.row(0);
        let r2 = vp.row(1);
        let r3 = vp.row(2);
        let r4 = vp.row(3);

        let near = Plane::from_coefficients(
            r4[0] + r3[0],
            r4[1] + r3[1],
            r4[2] + r3[2],
            r4[3] + r3[3],
        );
        let far = Plane::from_coefficients(
            r4[0] - r3[0],
            r4[1] - r3[1],
            r4[2] - r3[2],
            r4[3] - r3[3],
        );
        let left = Plane::from_coefficients(
            r4[0] + r1[0],
            r4[1] + r1[1],
            r4[2] + r1[2],
            r4[3] + r1[3],
        );
        let right = Plane::from_coefficients(
            r4[0] - r1[0],
            r4[1] - r1[1],
            r4[2] - r1[2],
            r4[3] - r1[3],
        );
        let top = Plane::from_coefficients(
            r4[0] - r2[0],
            r4[1] - r2[1],
            r4[2] - r2[2],
            r4[3] - r2[3],
        );
        let bottom = Plane::from_coefficients(
            r4[0] + r2[0],
            r4[1] + r2[1],
            r4[2] + r2[2],
            r4[3] + r2[3],
        );

        Self {
            planes: [near, far, left, right, top, bottom],
        }
    }

    /// Conservative sphere-frustum visibility test
    ///
    /// A sphere more than `radius` outside any single plane is rejected;
    /// anything on a plane boundary counts as visible. No false negatives
    /// for intersecting spheres.
    pub fn contains_sphere(&self, center: Vec3, radius: f32) -> bool {
        for plane in &self.planes {
            if plane.signed_distance(center) < -radius {
                return false;
            }
        }
        true
    }
}
