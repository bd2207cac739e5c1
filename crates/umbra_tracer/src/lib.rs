//! Umbra Tracer - recursive CPU ray tracing.
//!
//! Closed-form intersection against six implicit primitive families, Phong
//! shading with shadow rays, and recursive reflection/refraction. Images are
//! split into horizontal bands that render in parallel on a rayon pool.

mod band;
mod config;
mod error;
mod hit;
pub mod intersect;
mod raster;
mod renderer;
mod shading;
mod transport;

pub use band::{partition_bands, render_band, Band, BandResult};
pub use config::{ConfigError, RenderConfig};
pub use error::RenderError;
pub use hit::{HitRecord, ObjectHit};
pub use intersect::{closest_exit, closest_hit, intersect, ClosestHit};
pub use raster::{color_to_rgba, ImageBuffer};
pub use renderer::render;
pub use shading::shade;
pub use transport::{transmission_ray, Raytracer, AIR_REFRACTIVE_INDEX, DEFAULT_MAX_DEPTH};

/// Re-export the scene and math types the tracer API is expressed in
pub use umbra_core::{Color, Light, Material, Primitive, Scene, SceneObject, Texture};
pub use umbra_math::{Mat4, Ray, Vec2, Vec3, Vec4};
