//! Flattened scene snapshot consumed by the ray tracer.
//!
//! A [`Scene`] is produced once per render by [`crate::graph::flatten`] (or
//! built by hand) and is read-only while the image is being traced.

use std::sync::Arc;

use umbra_math::{Mat4, Mat4Ext};

use crate::{Light, Material, Texture};

/// The implicit-surface families the tracer can intersect.
///
/// All are unit-sized in object space:
/// - `Box`/`Room`: axis-aligned cube with half-extent 0.5 (room normals face inward)
/// - `Sphere`: radius 0.5 at the origin
/// - `Cylinder`: radius 0.5, z in [-0.5, 0.5]
/// - `Cone`: apex at the origin, radius equal to z, capped at z = 1
/// - `Hemisphere`: the z >= 0 half of the sphere, capped at z = 0
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Box,
    Sphere,
    Cylinder,
    Cone,
    Hemisphere,
    Room,
}

impl Primitive {
    /// All primitive kinds, for exhaustive tests and tooling.
    pub const ALL: [Primitive; 6] = [
        Primitive::Box,
        Primitive::Sphere,
        Primitive::Cylinder,
        Primitive::Cone,
        Primitive::Hemisphere,
        Primitive::Room,
    ];
}

/// One renderable leaf of the scene graph with its accumulated transform.
#[derive(Clone, Debug)]
pub struct SceneObject {
    /// Leaf name (for debugging)
    pub name: String,

    pub primitive: Primitive,

    /// Object space -> world space
    pub transform: Mat4,

    /// World space -> object space
    pub inverse: Mat4,

    /// Inverse-transpose of `transform`, for normals
    pub normal_matrix: Mat4,

    pub material: Material,

    /// Decoded texture, shared between objects using the same image
    pub texture: Option<Arc<Texture>>,

    /// Blend the texture into the lit color
    pub texture_enabled: bool,
}

impl SceneObject {
    /// Create an untextured object, deriving the inverse and normal matrices.
    pub fn new(name: impl Into<String>, primitive: Primitive, transform: Mat4, material: Material) -> Self {
        Self {
            name: name.into(),
            primitive,
            transform,
            inverse: transform.inverse(),
            normal_matrix: transform.normal_matrix(),
            material,
            texture: None,
            texture_enabled: false,
        }
    }

    /// Attach a texture and enable sampling.
    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self.texture_enabled = true;
        self
    }

    /// The texture to sample, if sampling is enabled and one is attached.
    pub fn active_texture(&self) -> Option<&Texture> {
        if self.texture_enabled {
            self.texture.as_deref()
        } else {
            None
        }
    }
}

/// Immutable render input: every object and light in a common (camera) space.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub lights: Vec<Light>,
}

impl Scene {
    /// Create a scene from already-flattened lists.
    pub fn new(objects: Vec<SceneObject>, lights: Vec<Light>) -> Self {
        Self { objects, lights }
    }

    /// Number of objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of lights.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use umbra_math::Vec3;

    #[test]
    fn test_scene_object_matrices() {
        let transform = Mat4::from_scale(Vec3::new(2.0, 4.0, 8.0));
        let object = SceneObject::new("box", Primitive::Box, transform, Material::default());

        let round_trip = object.inverse * object.transform;
        assert!(round_trip.abs_diff_eq(Mat4::IDENTITY, 1e-6));
        assert!(object
            .normal_matrix
            .abs_diff_eq(transform.inverse().transpose(), 1e-6));
    }

    #[test]
    fn test_active_texture() {
        let texture = Arc::new(Texture::checkerboard(2, 2, 1, [255; 4], [0, 0, 0, 255]));
        let mut object = SceneObject::new("ball", Primitive::Sphere, Mat4::IDENTITY, Material::default());
        assert!(object.active_texture().is_none());

        object = object.with_texture(texture);
        assert!(object.active_texture().is_some());

        object.texture_enabled = false;
        assert!(object.active_texture().is_none());
    }

    #[test]
    fn test_scene_counts() {
        let scene = Scene::new(
            vec![SceneObject::new("a", Primitive::Cone, Mat4::IDENTITY, Material::default())],
            vec![],
        );
        assert_eq!(scene.object_count(), 1);
        assert_eq!(scene.light_count(), 0);
    }
}
