//! Recursive ray transport.
//!
//! Implements Whitted-style tracing with:
//! - Local Phong shading weighted by the absorptive share
//! - Mirror reflection weighted by the reflective share
//! - Snell refraction weighted by the transparency share, folding into
//!   reflection on total internal reflection
//! - A fixed recursion depth limit

use umbra_core::Scene;
use umbra_math::{Ray, Vec3};

use crate::shading::{reflect, shade};
use crate::{closest_exit, closest_hit, ClosestHit, Color, HitRecord, RenderConfig};

/// Default recursion depth for reflection and refraction.
pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// Refractive index of the medium the camera sits in.
pub const AIR_REFRACTIVE_INDEX: f32 = 1.0;

/// Secondary rays start this far from the surface they leave.
const SURFACE_OFFSET: f32 = 1e-3;

/// Distance past an exit point at which the next enclosing medium is probed.
const EXIT_PROBE_OFFSET: f32 = 1e-4;

/// Ray tracer over one flattened scene.
///
/// Read-only once built; each band worker drives its own copy.
#[derive(Debug, Clone, Copy)]
pub struct Raytracer<'a> {
    scene: &'a Scene,
    /// Half of the vertical field of view, in radians
    half_fov: f32,
    max_depth: u32,
    background: Color,
}

impl<'a> Raytracer<'a> {
    pub fn new(scene: &'a Scene, config: &RenderConfig) -> Self {
        Self {
            scene,
            half_fov: config.half_fov_degrees.to_radians(),
            max_depth: config.max_depth,
            background: config.background_color(),
        }
    }

    /// Camera ray through pixel (x, y), where y counts up from the bottom row
    /// of the full image.
    ///
    /// The camera sits at the origin looking down -z; the image plane is placed
    /// so that `image_height` pixels span the vertical field of view.
    pub fn primary_ray(&self, x: u32, y: u32, width: u32, image_height: u32) -> Ray {
        let h = image_height as f32;
        let direction = Vec3::new(
            x as f32 - width as f32 / 2.0,
            y as f32 - h / 2.0,
            -h / (2.0 * self.half_fov.tan()),
        );
        Ray::new(Vec3::ZERO, direction)
    }

    /// Color of one pixel, starting in air with the full depth budget.
    pub fn trace_pixel(&self, x: u32, y: u32, width: u32, image_height: u32) -> Color {
        let ray = self.primary_ray(x, y, width, image_height);
        self.raycast(&ray, AIR_REFRACTIVE_INDEX, self.max_depth)
    }

    /// Color seen along `ray`, travelling through a medium of index
    /// `current_ior`, with `depth` recursion levels left.
    pub fn raycast(&self, ray: &Ray, current_ior: f32, depth: u32) -> Color {
        let Some(hit) = closest_hit(ray, &self.scene.objects) else {
            return self.background;
        };

        let material = &hit.object.material;
        let local = shade(hit.object, &hit.record, self.scene);

        if depth == 0 || material.is_opaque() {
            return local;
        }

        let mut color = material.absorptive * local;
        let mut reflective_share = material.reflective;

        if material.transparency > 0.0 {
            match self.refracted_color(ray, &hit, current_ior, depth - 1) {
                Some(refracted) => color += material.transparency * refracted,
                // Total internal reflection
                None => reflective_share += material.transparency,
            }
        }

        if reflective_share > 0.0 {
            color += reflective_share * self.reflected_color(ray, &hit.record, current_ior, depth - 1);
        }

        color
    }

    fn reflected_color(&self, ray: &Ray, hit: &HitRecord, current_ior: f32, depth: u32) -> Color {
        let direction = reflect(ray.direction(), hit.normal);
        let reflected = Ray::new(hit.point, direction).nudged(SURFACE_OFFSET);
        self.raycast(&reflected, current_ior, depth)
    }

    /// None on total internal reflection.
    fn refracted_color(&self, ray: &Ray, hit: &ClosestHit, current_ior: f32, depth: u32) -> Option<Color> {
        let record = &hit.record;
        let object_ior = hit.object.material.refractive_index;

        let (from, to, normal) = if hit.is_enter {
            (current_ior, object_ior, record.normal)
        } else {
            (object_ior, self.enclosing_ior(ray, record.point), -record.normal)
        };

        let transmitted = transmission_ray(ray.direction(), record.point, normal, from, to)?;
        Some(self.raycast(&transmitted, to, depth))
    }

    /// Refractive index of the medium a ray continues into after leaving an
    /// object at `exit_point`: that of the nearest object it would exit next,
    /// or air.
    fn enclosing_ior(&self, ray: &Ray, exit_point: Vec3) -> f32 {
        let direction = ray.direction().normalize_or_zero();
        let probe = Ray::new(exit_point + EXIT_PROBE_OFFSET * direction, direction);
        closest_exit(&probe, &self.scene.objects)
            .map_or(AIR_REFRACTIVE_INDEX, |object| object.material.refractive_index)
    }
}

/// Refract `direction` through a surface at `point` whose `normal` faces the
/// incoming ray, passing from index `from` to index `to`.
///
/// Returns a unit-direction ray nudged off the surface, or None on total
/// internal reflection.
pub fn transmission_ray(direction: Vec3, point: Vec3, normal: Vec3, from: f32, to: f32) -> Option<Ray> {
    let ratio = from / to;
    let i = direction.normalize_or_zero();
    let n = normal.normalize_or_zero();

    let cos_i = -n.dot(i);
    let sin_i = (1.0 - cos_i * cos_i).max(0.0).sqrt();
    let sin_t = ratio * sin_i;
    if sin_t > 1.0 {
        return None;
    }
    let cos_t = (1.0 - sin_t * sin_t).sqrt();

    let refracted = ratio * i + (ratio * cos_i - cos_t) * n;
    Some(Ray::new(point, refracted).nudged(SURFACE_OFFSET))
}
