//! Built-in demo scene.

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use umbra_core::graph::{LeafNode, Model, SceneNode};
use umbra_core::{Color, Light, Material, Primitive, Texture};
use umbra_math::{Mat4, Vec3};

/// Where the demo camera sits and what it looks at.
pub struct DemoCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl DemoCamera {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

impl Default for DemoCamera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 2.0, 6.5),
            target: Vec3::new(0.0, 0.5, 0.0),
            up: Vec3::Y,
        }
    }
}

fn leaf(name: &str, primitive: Primitive, material: Material) -> SceneNode {
    SceneNode::Leaf(LeafNode::new(name, primitive, material))
}

/// A room holding one of each primitive, lit by a spotlight and an omni light.
///
/// `box_texture` is blended onto the box.
pub fn demo_model(box_texture: Arc<Texture>) -> Model {
    let matte = |color: Color| Material::new(color, 1.0, 8.0).with_transport(1.0, 0.0, 0.0, 1.0);

    // Cylinder and cone stand upright: their axis is z in object space
    let upright = Mat4::from_rotation_x(-FRAC_PI_2);

    let furniture = SceneNode::group("furniture")
        .with_child(
            Mat4::from_translation(Vec3::new(-2.2, 0.0, 0.0)) * Mat4::from_scale(Vec3::splat(2.0)),
            leaf(
                "glass_ball",
                Primitive::Sphere,
                Material::new(Color::ONE, 0.2, 120.0).with_transport(0.05, 0.1, 0.85, 1.5),
            ),
        )
        .with_child(
            Mat4::from_translation(Vec3::new(2.2, 0.0, -0.5)) * upright * Mat4::from_scale(Vec3::new(1.2, 1.2, 2.5)),
            leaf(
                "mirror_column",
                Primitive::Cylinder,
                Material::new(Color::splat(0.8), 0.5, 200.0).with_transport(0.25, 0.75, 0.0, 1.0),
            ),
        )
        .with_child(
            Mat4::from_translation(Vec3::new(0.0, -0.5, 1.5)) * Mat4::from_rotation_y(0.7) * Mat4::from_scale(Vec3::splat(1.5)),
            SceneNode::Leaf(
                LeafNode::new("crate", Primitive::Box, Material::new(Color::new(0.6, 0.45, 0.3), 0.8, 10.0))
                    .with_texture(box_texture),
            ),
        )
        .with_child(
            Mat4::from_translation(Vec3::new(-0.6, 2.5, -2.5)) * Mat4::from_rotation_x(FRAC_PI_2),
            leaf("cone", Primitive::Cone, matte(Color::new(0.9, 0.4, 0.1))),
        )
        .with_child(
            Mat4::from_translation(Vec3::new(1.0, -1.25, -2.0)) * upright * Mat4::from_scale(Vec3::splat(2.0)),
            leaf("dome", Primitive::Hemisphere, matte(Color::new(0.2, 0.7, 0.3))),
        );

    let spot = Light::point(Vec3::ZERO, Color::splat(0.7)).with_spot(Vec3::new(0.0, -1.0, 0.0), 35.0);

    let root = SceneNode::group("root")
        .with_child(
            Mat4::from_translation(Vec3::new(0.0, 2.75, 0.0)) * Mat4::from_scale(Vec3::new(12.0, 8.0, 14.0)),
            leaf("room", Primitive::Room, matte(Color::new(0.75, 0.72, 0.68))),
        )
        .with_child(Mat4::IDENTITY, furniture)
        .with_child(
            Mat4::from_translation(Vec3::new(0.0, 6.0, 0.5)),
            SceneNode::Light {
                name: "ceiling_spot".into(),
                light: spot,
            },
        );

    Model::new("demo", root).with_view_space_light(Light::point(Vec3::new(-3.0, 3.0, 2.0), Color::splat(0.35)))
}

/// Texture used when no image is given on the command line.
pub fn default_box_texture() -> Texture {
    Texture::checkerboard(64, 64, 8, [235, 225, 200, 255], [120, 60, 30, 255])
}
