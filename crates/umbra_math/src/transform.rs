// Transform utilities for Mat4
//
// Extends glam::Mat4 with the normal-correction helpers the ray tracer needs.
// Note: glam::Mat4 already provides transform_point3(), transform_vector3() and inverse()

use glam::{Mat3, Mat4, Vec3};

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// The inverse-transpose of this matrix.
    ///
    /// Normals transformed by it stay perpendicular to surfaces under
    /// non-uniform scale.
    fn normal_matrix(&self) -> Mat4;

    /// Transform a surface normal by this (already inverse-transposed) matrix.
    ///
    /// Only the upper 3x3 block is applied, so the translation row picked up
    /// by the inverse-transpose cannot leak into the result. The output is
    /// normalized.
    fn transform_normal(&self, normal: Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn normal_matrix(&self) -> Mat4 {
        self.inverse().transpose()
    }

    fn transform_normal(&self, normal: Vec3) -> Vec3 {
        (Mat3::from_mat4(*self) * normal).normalize_or_zero()
    }
}
