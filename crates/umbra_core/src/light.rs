//! Point, directional and spot lights.

use umbra_math::{Mat4, Vec3, Vec4};

use crate::Color;

/// A light illuminating the scene.
///
/// `position.w` selects the kind: 1 for a point light, 0 for a directional
/// light whose xyz is the direction the light travels. The light aims
/// at `spot_target`; `spot_cutoff` is the cosine of the cone half-angle.
/// A cutoff of `cos(180°) = -1` makes the light omnidirectional.
#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub position: Vec4,
    pub spot_target: Vec4,
    pub spot_cutoff: f32,
}

impl Light {
    /// An omnidirectional point light with the same intensity on all three terms.
    pub fn point(position: Vec3, intensity: Color) -> Self {
        Self {
            ambient: intensity,
            diffuse: intensity,
            specular: intensity,
            position: position.extend(1.0),
            spot_target: Vec4::new(0.0, 0.0, 0.0, 1.0),
            spot_cutoff: 180f32.to_radians().cos(),
        }
    }

    /// A directional light; `direction` points from the light into the scene.
    pub fn directional(direction: Vec3, intensity: Color) -> Self {
        Self {
            position: direction.extend(0.0),
            spot_target: Vec4::ZERO,
            ..Self::point(Vec3::ZERO, intensity)
        }
    }

    /// Restrict the light to a cone aimed at `target` with the given half-angle.
    pub fn with_spot(mut self, target: Vec3, half_angle_degrees: f32) -> Self {
        self.spot_target = target.extend(1.0);
        self.spot_cutoff = half_angle_degrees.to_radians().cos();
        self
    }

    /// True for point lights (w != 0).
    pub fn is_point(&self) -> bool {
        self.position.w != 0.0
    }

    /// Copy of this light with position and spot target carried by `m`.
    pub fn transformed(&self, m: &Mat4) -> Light {
        Light {
            position: *m * self.position,
            spot_target: *m * self.spot_target,
            ..self.clone()
        }
    }
}
