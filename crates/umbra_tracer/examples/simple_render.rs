//! Simple ray tracer example.
//!
//! Renders a glass sphere and a mirror box in a room and saves to PPM format.

use std::fs::File;
use std::io::{BufWriter, Write};

use umbra_core::graph::{flatten, LeafNode, Model, SceneNode};
use umbra_tracer::{render, Color, ImageBuffer, Light, Mat4, Material, Primitive, RenderConfig, Vec3};

fn main() {
    env_logger::init();

    println!("Umbra Ray Tracer - Simple Example");
    println!("=================================");

    let model = build_model();
    let view = Mat4::look_at_rh(Vec3::new(0.0, 1.5, 6.0), Vec3::ZERO, Vec3::Y);
    let scene = flatten(&model, view);

    let config = RenderConfig {
        width: 640,
        height: 360,
        ..RenderConfig::default()
    };

    println!("Rendering {}x{} on {} workers...", config.width, config.height, config.workers);

    let start = std::time::Instant::now();
    let image = match render(scene, &config) {
        Ok(image) => image,
        Err(err) => {
            eprintln!("Render failed: {}", err);
            std::process::exit(1);
        }
    };
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_ppm(&image, filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_model() -> Model {
    let leaf = |name: &str, primitive, material| SceneNode::Leaf(LeafNode::new(name, primitive, material));

    let root = SceneNode::group("root")
        .with_child(
            Mat4::from_scale(Vec3::splat(16.0)),
            leaf("room", Primitive::Room, Material::new(Color::new(0.7, 0.7, 0.8), 0.8, 4.0).with_transport(1.0, 0.0, 0.0, 1.0)),
        )
        .with_child(
            Mat4::from_translation(Vec3::new(-1.0, 0.0, 0.0)) * Mat4::from_scale(Vec3::splat(1.5)),
            leaf("glass", Primitive::Sphere, Material::new(Color::ONE, 0.1, 100.0).with_transport(0.05, 0.1, 0.85, 1.5)),
        )
        .with_child(
            Mat4::from_translation(Vec3::new(1.2, 0.0, -0.5)) * Mat4::from_rotation_y(0.5),
            leaf("mirror", Primitive::Box, Material::new(Color::splat(0.6), 0.4, 60.0).with_transport(0.3, 0.7, 0.0, 1.0)),
        );

    Model::new("simple", root).with_view_space_light(Light::point(Vec3::new(2.0, 4.0, 2.0), Color::ONE))
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    // PPM is written top row first
    for y in (0..image.height).rev() {
        for x in 0..image.width {
            let [r, g, b, _] = image.get(x, y);
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    Ok(())
}
