use bytemuck::{Pod, Zeroable};

use super::vector::Vector3;

/// A row-major 4x4 transform matrix.
///
/// `mRC` is the entry at row `R`, column `C`. Points transform as row
/// vectors on the left: `p' = p * M`, so translation lives in the fourth
/// row. Values are immutable; build them with the factory functions and
/// pass by copy.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Matrix4x4 {
    pub m11: f32,
    pub m12: f32,
    pub m13: f32,
    pub m14: f32,
    pub m21: f32,
    pub m22: f32,
    pub m23: f32,
    pub m24: f32,
    pub m31: f32,
    pub m32: f32,
    pub m33: f32,
    pub m34: f32,
    pub m41: f32,
    pub m42: f32,
    pub m43: f32,
    pub m44: f32,
}

impl Matrix4x4 {
    pub const IDENTITY: Self = Self {
        m11: 1.0, m12: 0.0, m13: 0.0, m14: 0.0,
        m21: 0.0, m22: 1.0, m23: 0.0, m24: 0.0,
        m31: 0.0, m32: 0.0, m33: 1.0, m34: 0.0,
        m41: 0.0, m42: 0.0, m43: 0.0, m44: 1.0,
    };

    /// Standard 4x4 matrix product `self * other`.
    ///
    /// Each output entry is a 4-term dot product of a row of `self` and a
    /// column of `other`. Under the row-vector convention this means
    /// `p * a.multiply(b) == (p * a) * b`: `a` is applied first, then `b`.
    /// Associative, not commutative.
    #[must_use]
    pub fn multiply(self, other: Self) -> Self {
        let a = self;
        let b = other;
        Self {
            m11: a.m11 * b.m11 + a.m12 * b.m21 + a.m13 * b.m31 + a.m14 * b.m41,
            m12: a.m11 * b.m12 + a.m12 * b.m22 + a.m13 * b.m32 + a.m14 * b.m42,
            m13: a.m11 * b.m13 + a.m12 * b.m23 + a.m13 * b.m33 + a.m14 * b.m43,
            m14: a.m11 * b.m14 + a.m12 * b.m24 + a.m13 * b.m34 + a.m14 * b.m44,
            m21: a.m21 * b.m11 + a.m22 * b.m21 + a.m23 * b.m31 + a.m24 * b.m41,
            m22: a.m21 * b.m12 + a.m22 * b.m22 + a.m23 * b.m32 + a.m24 * b.m42,
            m23: a.m21 * b.m13 + a.m22 * b.m23 + a.m23 * b.m33 + a.m24 * b.m43,
            m24: a.m21 * b.m14 + a.m22 * b.m24 + a.m23 * b.m34 + a.m24 * b.m44,
            m31: a.m31 * b.m11 + a.m32 * b.m21 + a.m33 * b.m31 + a.m34 * b.m41,
            m32: a.m31 * b.m12 + a.m32 * b.m22 + a.m33 * b.m32 + a.m34 * b.m42,
            m33: a.m31 * b.m13 + a.m32 * b.m23 + a.m33 * b.m33 + a.m34 * b.m43,
            m34: a.m31 * b.m14 + a.m32 * b.m24 + a.m33 * b.m34 + a.m34 * b.m44,
            m41: a.m41 * b.m11 + a.m42 * b.m21 + a.m43 * b.m31 + a.m44 * b.m41,
            m42: a.m41 * b.m12 + a.m42 * b.m22 + a.m43 * b.m32 + a.m44 * b.m42,
            m43: a.m41 * b.m13 + a.m42 * b.m23 + a.m43 * b.m33 + a.m44 * b.m43,
            m44: a.m41 * b.m14 + a.m42 * b.m24 + a.m43 * b.m34 + a.m44 * b.m44,
        }
    }

    /// Rotation about the Z axis. A positive angle rotates +X toward +Y.
    #[must_use]
    pub fn rotation_z(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            m11: cos,  m12: sin, m13: 0.0, m14: 0.0,
            m21: -sin, m22: cos, m23: 0.0, m24: 0.0,
            m31: 0.0,  m32: 0.0, m33: 1.0, m34: 0.0,
            m41: 0.0,  m42: 0.0, m43: 0.0, m44: 1.0,
        }
    }

    /// Identity with the translation row set.
    #[must_use]
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Self {
            m11: 1.0, m12: 0.0, m13: 0.0, m14: 0.0,
            m21: 0.0, m22: 1.0, m23: 0.0, m24: 0.0,
            m31: 0.0, m32: 0.0, m33: 1.0, m34: 0.0,
            m41: x,   m42: y,   m43: z,   m44: 1.0,
        }
    }

    /// Maps the given box to the canonical clip volume.
    ///
    /// Divides by `right - left`, `top - bottom` and `z_near - z_far`; the
    /// caller must ensure none of these is zero.
    #[must_use]
    pub fn orthographic_off_center(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        Self {
            m11: 2.0 / (right - left),
            m12: 0.0,
            m13: 0.0,
            m14: 0.0,
            m21: 0.0,
            m22: 2.0 / (top - bottom),
            m23: 0.0,
            m24: 0.0,
            m31: 0.0,
            m32: 0.0,
            m33: 1.0 / (z_near - z_far),
            m34: 0.0,
            m41: (left + right) / (left - right),
            m42: (top + bottom) / (bottom - top),
            m43: z_near / (z_near - z_far),
            m44: 1.0,
        }
    }

    /// Standard field-of-view perspective projection.
    ///
    /// `fov_radians` must lie in `(0, PI)` exclusive or the half-angle
    /// tangent blows up.
    #[must_use]
    pub fn perspective_fov(fov_radians: f32, aspect: f32, near: f32, far: f32) -> Self {
        let num = 1.0 / (fov_radians * 0.5).tan();
        Self {
            m11: num / aspect,
            m12: 0.0,
            m13: 0.0,
            m14: 0.0,
            m21: 0.0,
            m22: num,
            m23: 0.0,
            m24: 0.0,
            m31: 0.0,
            m32: 0.0,
            m33: far / (near - far),
            m34: -1.0,
            m41: 0.0,
            m42: 0.0,
            m43: (near * far) / (near - far),
            m44: 0.0,
        }
    }

    /// Builds a view matrix looking from `eye` toward `target`.
    ///
    /// Degenerate when `eye == target` (zero-vector normalize) or when `up`
    /// is parallel to the eye-target axis (near-zero cross product); both
    /// produce NaN components and are the caller's responsibility.
    #[must_use]
    pub fn look_at(eye: Vector3, target: Vector3, up: Vector3) -> Self {
        let target_to_eye = Vector3::new(eye.x - target.x, eye.y - target.y, eye.z - target.z);
        let axis_z = target_to_eye.normalize();
        let axis_x = up.cross(axis_z).normalize();
        let axis_y = axis_z.cross(axis_x);

        Self {
            m11: axis_x.x,
            m12: axis_y.x,
            m13: axis_z.x,
            m14: 0.0,
            m21: axis_x.y,
            m22: axis_y.y,
            m23: axis_z.y,
            m24: 0.0,
            m31: axis_x.z,
            m32: axis_y.z,
            m33: axis_z.z,
            m34: 0.0,
            m41: -axis_x.dot(eye),
            m42: -axis_y.dot(eye),
            m43: -axis_z.dot(eye),
            m44: 1.0,
        }
    }

    /// Transforms a point (`w = 1`) as a row vector and divides by the
    /// resulting `w`.
    #[must_use]
    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        let x = p.x * self.m11 + p.y * self.m21 + p.z * self.m31 + self.m41;
        let y = p.x * self.m12 + p.y * self.m22 + p.z * self.m32 + self.m42;
        let z = p.x * self.m13 + p.y * self.m23 + p.z * self.m33 + self.m43;
        let w = p.x * self.m14 + p.y * self.m24 + p.z * self.m34 + self.m44;
        Vector3::new(x / w, y / w, z / w)
    }
}

impl std::ops::Mul for Matrix4x4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(rhs)
    }
}
