use umbra_math::{Interval, Vec2, Vec3};

use super::{radial_distance, solve_quadratic, turn_fraction, ObjectRay};
use crate::{HitRecord, ObjectHit};

/// The cone grows from its apex at the origin to a radius-1 cap at z = 1.
const HEIGHT: Interval = Interval::new(0.0, 1.0);

/// Capped cone x² + y² = z², for z in [0, 1].
pub(super) fn intersect_cone(ray: &ObjectRay) -> ObjectHit {
    let (s, v) = (ray.s, ray.v);

    let a = v.x * v.x + v.y * v.y - v.z * v.z;
    let b = 2.0 * (v.x * s.x + v.y * s.y - v.z * s.z);
    let c = s.x * s.x + s.y * s.y - s.z * s.z;

    // Ray parallel to a generating line; the surface is touched at most once
    if ray.is_degenerate(a) {
        return ObjectHit::MISS;
    }

    let Some((t_enter, t_exit)) = solve_quadratic(a, b, c) else {
        return ObjectHit::MISS;
    };
    let z_enter = ray.at(t_enter).z;
    let z_exit = ray.at(t_exit).z;

    let enter = side_record(ray, t_enter, z_enter);
    let exit = side_record(ray, t_exit, z_exit);

    // With one root on the cone, the other lies on the mirrored nappe or past
    // the cap. Its side of the apex tells whether the cap comes first.
    let (enter, exit) = match (enter, exit) {
        (Some(side), None) if z_exit <= 0.0 => (cap_record(ray), Some(side)),
        (Some(side), None) => (Some(side), cap_record(ray)),
        (None, Some(side)) if z_enter <= 0.0 => (Some(side), cap_record(ray)),
        (None, Some(side)) => (cap_record(ray), Some(side)),
        pair => pair,
    };

    ObjectHit::new(enter, exit)
}

fn side_record(ray: &ObjectRay, t: f32, z: f32) -> Option<HitRecord> {
    if !HEIGHT.contains(z) {
        return None;
    }
    let p = ray.at(t);
    let uv = Vec2::new(turn_fraction(p), 1.0 - z / 2.0);
    // Gradient of x² + y² - z²
    ray.record(t, p, Vec3::new(p.x, p.y, -p.z), uv)
}

fn cap_record(ray: &ObjectRay) -> Option<HitRecord> {
    let t = ray.t_at_z(HEIGHT.max);
    let p = ray.at(t);
    let uv = Vec2::new(turn_fraction(p), radial_distance(p) / 2.0);
    ray.record(t, p, Vec3::Z, uv)
}

#[cfg(test)]
mod tests {
    use super::super::intersect;
    use super::*;
    use std::f32::consts::FRAC_1_SQRT_2;
    use umbra_core::{Material, Primitive, SceneObject};
    use umbra_math::{Mat4, Ray};

    fn cone() -> SceneObject {
        SceneObject::new("cone", Primitive::Cone, Mat4::IDENTITY, Material::default())
    }

    #[test]
    fn test_side_hits() {
        let ray = Ray::new(Vec3::new(-2.0, 0.0, 0.5), Vec3::X);
        let hit = intersect(&ray, &cone());

        let enter = hit.enter.unwrap();
        let exit = hit.exit.unwrap();
        assert!((enter.t - 1.5).abs() < 1e-5);
        assert!((exit.t - 2.5).abs() < 1e-5);
        assert!((enter.normal - Vec3::new(-FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2)).length() < 1e-5);
        assert!((enter.uv.y - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_enters_through_cap() {
        let ray = Ray::new(Vec3::new(0.25, 0.0, 2.0), Vec3::NEG_Z);
        let hit = intersect(&ray, &cone());

        let enter = hit.enter.unwrap();
        let exit = hit.exit.unwrap();
        assert!((enter.t - 1.0).abs() < 1e-5);
        assert_eq!(enter.normal, Vec3::Z);
        assert!((exit.t - 1.75).abs() < 1e-5);
        assert!((exit.point.z - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_exits_through_cap() {
        let ray = Ray::new(Vec3::new(0.25, 0.0, 0.0), Vec3::Z);
        let hit = intersect(&ray, &cone());

        let enter = hit.enter.unwrap();
        let exit = hit.exit.unwrap();
        assert!((enter.t - 0.25).abs() < 1e-5);
        assert!((exit.t - 1.0).abs() < 1e-5);
        assert_eq!(exit.normal, Vec3::Z);
    }

    #[test]
    fn test_parallel_to_surface_misses() {
        let ray = Ray::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 1.0));
        assert!(intersect(&ray, &cone()).is_miss());
    }
}
