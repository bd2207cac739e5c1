use umbra_math::{Interval, Vec2, Vec3};

use super::{radial_distance, solve_quadratic, turn_fraction, ObjectRay};
use crate::{HitRecord, ObjectHit};

const RADIUS: f32 = 0.5;
const HEIGHT: Interval = Interval::new(-0.5, 0.5);

/// Capped cylinder of radius 0.5 around the z axis, spanning z in [-0.5, 0.5].
pub(super) fn intersect_cylinder(ray: &ObjectRay) -> ObjectHit {
    let (s, v) = (ray.s, ray.v);

    let a = v.x * v.x + v.y * v.y;
    let b = 2.0 * (v.x * s.x + v.y * s.y);
    let c = s.x * s.x + s.y * s.y - RADIUS * RADIUS;

    // Parallel to the axis: only the caps can be reached, and only from inside the radius
    if ray.is_degenerate(a) {
        if c > 0.0 {
            return ObjectHit::MISS;
        }
        let near = if v.z > 0.0 { HEIGHT.min } else { HEIGHT.max };
        return ObjectHit::new(cap_record(ray, near), cap_record(ray, -near));
    }

    let Some((t_enter, t_exit)) = solve_quadratic(a, b, c) else {
        return ObjectHit::MISS;
    };
    let z_enter = ray.at(t_enter).z;
    let z_exit = ray.at(t_exit).z;

    let enter = side_record(ray, t_enter, z_enter);
    let exit = side_record(ray, t_exit, z_exit);

    // Both crossings of the infinite cylinder lie beyond the same cap
    if enter.is_none() && exit.is_none() && (z_enter < 0.0) == (z_exit < 0.0) {
        return ObjectHit::MISS;
    }

    ObjectHit::new(
        enter.or_else(|| cap_record(ray, cap_plane(z_enter))),
        exit.or_else(|| cap_record(ray, cap_plane(z_exit))),
    )
}

fn side_record(ray: &ObjectRay, t: f32, z: f32) -> Option<HitRecord> {
    if !HEIGHT.contains(z) {
        return None;
    }
    let p = ray.at(t);
    let uv = Vec2::new(turn_fraction(p), z / 2.0 + 0.5);
    ray.record(t, p, Vec3::new(p.x, p.y, 0.0), uv)
}

/// The cap on the same side as `z`.
fn cap_plane(z: f32) -> f32 {
    if z < 0.0 {
        HEIGHT.min
    } else {
        HEIGHT.max
    }
}

/// Crossing of the cap plane z = `z_cap`. Bottom cap texels occupy the lower
/// quarter of the atlas and top cap texels the upper quarter.
fn cap_record(ray: &ObjectRay, z_cap: f32) -> Option<HitRecord> {
    let t = ray.t_at_z(z_cap);
    let p = ray.at(t);
    let dist = radial_distance(p);
    let v = if z_cap < 0.0 {
        dist / 2.0
    } else {
        (0.5 - dist) / 2.0 + 0.75
    };
    ray.record(t, p, Vec3::new(0.0, 0.0, z_cap.signum()), Vec2::new(turn_fraction(p), v))
}

#[cfg(test)]
mod tests {
    use super::super::intersect;
    use super::*;
    use umbra_core::{Material, Primitive, SceneObject};
    use umbra_math::{Mat4, Ray};

    fn cylinder() -> SceneObject {
        SceneObject::new("can", Primitive::Cylinder, Mat4::IDENTITY, Material::default())
    }

    #[test]
    fn test_side_hits() {
        let ray = Ray::new(Vec3::new(-2.0, 0.0, 0.25), Vec3::X);
        let hit = intersect(&ray, &cylinder());

        let enter = hit.enter.unwrap();
        let exit = hit.exit.unwrap();
        assert!((enter.t - 1.5).abs() < 1e-6);
        assert!((exit.t - 2.5).abs() < 1e-6);
        assert!((enter.normal - Vec3::NEG_X).length() < 1e-6);
        assert!((enter.uv.y - 0.625).abs() < 1e-6);
    }

    #[test]
    fn test_falls_back_to_cap() {
        // Enters through the top cap, leaves through the side
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.75), Vec3::new(1.0, 0.0, -1.0));
        let hit = intersect(&ray, &cylinder());

        let enter = hit.enter.unwrap();
        let exit = hit.exit.unwrap();
        assert!((enter.t - 0.25).abs() < 1e-6);
        assert!((exit.t - 0.5).abs() < 1e-6);
        assert_eq!(enter.normal, Vec3::Z);
        assert!((exit.point.x - 0.5).abs() < 1e-5);
        assert!((exit.normal - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_misses_above_caps() {
        // The infinite cylinder is crossed, but only above the top cap
        let ray = Ray::new(Vec3::new(-2.0, 0.0, 1.0), Vec3::X);
        assert!(intersect(&ray, &cylinder()).is_miss());
    }

    #[test]
    fn test_parallel_to_axis() {
        let inside = Ray::new(Vec3::new(0.1, 0.2, 3.0), Vec3::NEG_Z);
        let hit = intersect(&inside, &cylinder());
        let enter = hit.enter.unwrap();
        let exit = hit.exit.unwrap();
        assert!((enter.t - 2.5).abs() < 1e-6);
        assert!((exit.t - 3.5).abs() < 1e-6);
        assert_eq!(enter.normal, Vec3::Z);
        assert_eq!(exit.normal, Vec3::NEG_Z);

        let outside = Ray::new(Vec3::new(0.6, 0.0, 3.0), Vec3::NEG_Z);
        assert!(intersect(&outside, &cylinder()).is_miss());
    }
}
