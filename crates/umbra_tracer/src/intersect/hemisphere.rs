use umbra_math::{Interval, Vec2, Vec3};

use super::sphere::{sphere_roots, surface_record, RADIUS};
use super::{radial_distance, turn_fraction, ObjectRay};
use crate::{HitRecord, ObjectHit};

const HEIGHT: Interval = Interval::new(0.0, RADIUS);

/// Upper half of the radius-0.5 sphere, closed by a disc at z = 0.
pub(super) fn intersect_hemisphere(ray: &ObjectRay) -> ObjectHit {
    let Some((t_enter, t_exit)) = sphere_roots(ray) else {
        return ObjectHit::MISS;
    };

    let dome = |t: f32| {
        if HEIGHT.contains(ray.at(t).z) {
            surface_record(ray, t)
        } else {
            None
        }
    };
    let enter = dome(t_enter);
    let exit = dome(t_exit);

    if enter.is_none() && exit.is_none() {
        return ObjectHit::MISS;
    }

    ObjectHit::new(enter.or_else(|| base_record(ray)), exit.or_else(|| base_record(ray)))
}

/// Crossing of the flat base, with polar texture coordinates.
fn base_record(ray: &ObjectRay) -> Option<HitRecord> {
    let t = ray.t_at_z(HEIGHT.min);
    let p = ray.at(t);
    let uv = Vec2::new(turn_fraction(p), radial_distance(p));
    ray.record(t, p, Vec3::NEG_Z, uv)
}
