use crate::{Mat4, Vec3, Vec4};

/// A ray in homogeneous coordinates.
///
/// `position` is a point (w = 1) and `direction` a vector (w = 0), so both can
/// be carried between object and world space with a single matrix multiply.
/// Rays are values: transforms and offsets return a new ray.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub position: Vec4,
    pub direction: Vec4,
}

impl Ray {
    /// Create a ray from a 3D origin and direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            position: origin.extend(1.0),
            direction: direction.extend(0.0),
        }
    }

    /// Origin point of the ray, without the homogeneous component.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.position.truncate()
    }

    /// Direction of the ray, without the homogeneous component.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction.truncate()
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin() + t * self.direction()
    }

    /// Transform both position and direction by `m`.
    #[inline]
    pub fn transform(&self, m: &Mat4) -> Ray {
        Ray {
            position: *m * self.position,
            direction: *m * self.direction,
        }
    }

    /// Same direction, origin moved `epsilon` units of the direction forward.
    ///
    /// Used to start secondary rays just off a surface.
    #[inline]
    pub fn nudged(&self, epsilon: f32) -> Ray {
        Ray {
            position: self.position + self.direction * epsilon,
            direction: self.direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let direction = Vec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(origin, direction);

        assert_eq!(ray.position, Vec4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(ray.direction, Vec4::new(0.0, 1.0, 0.0, 0.0));
        assert_eq!(ray.origin(), origin);
        assert_eq!(ray.direction(), direction);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_transform_ignores_translation_for_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let m = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0));
        let moved = ray.transform(&m);

        assert_eq!(moved.origin(), Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(moved.direction(), Vec3::Z);
        assert_eq!(moved.direction.w, 0.0);
    }

    #[test]
    fn test_nudged() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0));
        let nudged = ray.nudged(0.5);

        assert_eq!(nudged.origin(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(nudged.direction(), ray.direction());
    }
}
