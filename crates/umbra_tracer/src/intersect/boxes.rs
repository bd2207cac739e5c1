use std::f32::consts::{FRAC_PI_2, PI};

use umbra_math::{Vec2, Vec3};

use super::ObjectRay;
use crate::{HitRecord, ObjectHit};

const HALF_EXTENT: f32 = 0.5;

/// Unit cube centered at the origin, by the slab method.
pub(super) fn intersect_box(ray: &ObjectRay) -> ObjectHit {
    let slabs = [0, 1, 2].map(|axis| slab_range(ray.s[axis], ray.v[axis]));

    // Axis holding the latest entry and the earliest exit
    let enter_axis = (0..3).fold(0, |best, axis| if slabs[axis].0 > slabs[best].0 { axis } else { best });
    let exit_axis = (0..3).fold(0, |best, axis| if slabs[axis].1 < slabs[best].1 { axis } else { best });

    let t_enter = slabs[enter_axis].0;
    let t_exit = slabs[exit_axis].1;

    // Written so that NaN bounds count as a miss
    if !(t_enter <= t_exit) {
        return ObjectHit::MISS;
    }

    ObjectHit::new(face_record(ray, t_enter, enter_axis), face_record(ray, t_exit, exit_axis))
}

/// A box seen from the inside: same crossings, normals facing the center.
pub(super) fn intersect_room(ray: &ObjectRay) -> ObjectHit {
    let flip = |record: HitRecord| HitRecord {
        normal: -record.normal,
        ..record
    };
    let hit = intersect_box(ray);
    ObjectHit::new(hit.enter.map(flip), hit.exit.map(flip))
}

/// Parameter range spent between the two planes of one axis.
fn slab_range(s: f32, v: f32) -> (f32, f32) {
    let t1 = (-HALF_EXTENT - s) / v;
    let t2 = (HALF_EXTENT - s) / v;
    (t1.min(t2), t1.max(t2))
}

fn face_record(ray: &ObjectRay, t: f32, axis: usize) -> Option<HitRecord> {
    let p = ray.at(t);
    let positive = p[axis] > 0.0;

    let mut normal = Vec3::ZERO;
    normal[axis] = if positive { 1.0 } else { -1.0 };

    ray.record(t, p, normal, face_uv(p, axis, positive))
}

/// Texture coordinates on a cube-cross atlas.
///
/// Each face is scaled into a quarter-size tile, turned upright, and placed at
/// its own spot in the atlas.
fn face_uv(p: Vec3, axis: usize, positive: bool) -> Vec2 {
    let (base, angle, offset) = match (axis, positive) {
        (0, true) => (Vec2::new(-p.z, p.y), PI, Vec2::new(0.5, 1.0)),
        (0, false) => (Vec2::new(p.z, p.y), 0.0, Vec2::new(0.25, 0.25)),
        (1, true) => (Vec2::new(p.x, -p.z), FRAC_PI_2, Vec2::new(0.5, 0.5)),
        (1, false) => (Vec2::new(p.x, p.z), FRAC_PI_2, Vec2::new(1.0, 0.5)),
        (_, true) => (Vec2::new(p.x, p.y), FRAC_PI_2, Vec2::new(0.75, 0.5)),
        (_, false) => (Vec2::new(-p.x, p.y), -FRAC_PI_2, Vec2::new(0.0, 0.75)),
    };

    let tile = (base + Vec2::splat(0.5)) * 0.25;
    Vec2::from_angle(angle).rotate(tile) + offset
}

#[cfg(test)]
mod tests {
    use super::super::intersect;
    use super::*;
    use umbra_core::{Material, Primitive, SceneObject};
    use umbra_math::{Mat4, Ray};

    fn unit(primitive: Primitive) -> SceneObject {
        SceneObject::new("unit", primitive, Mat4::IDENTITY, Material::default())
    }

    #[test]
    fn test_face_normals() {
        let cube = unit(Primitive::Box);
        let cases = [
            (Vec3::new(2.0, 0.1, -0.2), Vec3::NEG_X, Vec3::X),
            (Vec3::new(-2.0, 0.1, -0.2), Vec3::X, Vec3::NEG_X),
            (Vec3::new(0.1, 2.0, 0.2), Vec3::NEG_Y, Vec3::Y),
            (Vec3::new(0.1, -2.0, 0.2), Vec3::Y, Vec3::NEG_Y),
            (Vec3::new(-0.1, 0.2, 2.0), Vec3::NEG_Z, Vec3::Z),
            (Vec3::new(-0.1, 0.2, -2.0), Vec3::Z, Vec3::NEG_Z),
        ];

        for (origin, direction, expected) in cases {
            let hit = intersect(&Ray::new(origin, direction), &cube);
            let enter = hit.enter.unwrap();
            let exit = hit.exit.unwrap();
            assert!((enter.t - 1.5).abs() < 1e-6);
            assert!((exit.t - 2.5).abs() < 1e-6);
            assert_eq!(enter.normal, expected, "entering from {:?}", origin);
            assert_eq!(exit.normal, -expected, "exiting from {:?}", origin);
        }
    }

    #[test]
    fn test_oblique_entry_picks_last_slab() {
        let cube = unit(Primitive::Box);
        // Crosses the x planes before reaching the y = 0.5 face
        let ray = Ray::new(Vec3::new(-1.0, 2.0, 0.0), Vec3::new(1.0, -1.5, 0.0));
        let enter = intersect(&ray, &cube).enter.unwrap();

        assert_eq!(enter.normal, Vec3::Y);
        assert!((enter.point.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_room_normals_face_inward() {
        let room = unit(Primitive::Room);
        let ray = Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::NEG_X);
        let hit = intersect(&ray, &room);

        assert_eq!(hit.enter.unwrap().normal, Vec3::NEG_X);
        assert_eq!(hit.exit.unwrap().normal, Vec3::X);
    }

    #[test]
    fn test_face_tiles_are_distinct() {
        let centers = [
            face_uv(Vec3::new(0.5, 0.0, 0.0), 0, true),
            face_uv(Vec3::new(-0.5, 0.0, 0.0), 0, false),
            face_uv(Vec3::new(0.0, 0.5, 0.0), 1, true),
            face_uv(Vec3::new(0.0, -0.5, 0.0), 1, false),
            face_uv(Vec3::new(0.0, 0.0, 0.5), 2, true),
            face_uv(Vec3::new(0.0, 0.0, -0.5), 2, false),
        ];

        for (i, a) in centers.iter().enumerate() {
            assert!(a.x > -1e-6 && a.x < 1.0 + 1e-6, "face {} u = {}", i, a.x);
            assert!(a.y > -1e-6 && a.y < 1.0 + 1e-6, "face {} v = {}", i, a.y);
            for b in &centers[i + 1..] {
                assert!((*a - *b).length() > 0.1);
            }
        }
    }
}
