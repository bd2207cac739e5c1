use std::f32::consts::PI;

use umbra_math::Vec2;

use super::{solve_quadratic, turn_fraction, ObjectRay};
use crate::{HitRecord, ObjectHit};

pub(super) const RADIUS: f32 = 0.5;

/// Sphere of radius 0.5 centered at the origin.
pub(super) fn intersect_sphere(ray: &ObjectRay) -> ObjectHit {
    let Some((t_enter, t_exit)) = sphere_roots(ray) else {
        return ObjectHit::MISS;
    };
    ObjectHit::new(surface_record(ray, t_enter), surface_record(ray, t_exit))
}

/// Roots of |S + tV|² = r².
pub(super) fn sphere_roots(ray: &ObjectRay) -> Option<(f32, f32)> {
    let a = ray.v.length_squared();
    let b = 2.0 * ray.v.dot(ray.s);
    let c = ray.s.length_squared() - RADIUS * RADIUS;
    solve_quadratic(a, b, c)
}

/// Crossing on the curved surface, with latitude/longitude texture coordinates.
pub(super) fn surface_record(ray: &ObjectRay, t: f32) -> Option<HitRecord> {
    let p = ray.at(t);
    let polar = (p.z / RADIUS).clamp(-1.0, 1.0).acos();
    let uv = Vec2::new(turn_fraction(p), 1.0 - polar / PI);
    ray.record(t, p, p.normalize_or_zero(), uv)
}
