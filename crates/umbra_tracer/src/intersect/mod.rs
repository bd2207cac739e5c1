//! Ray-primitive intersection algorithms.
//!
//! Every primitive is solved in its own object space: the world ray is carried
//! in by the object's inverse transform, solved in closed form against the
//! unit-sized primitive, and the resulting points and normals are mapped back
//! with the forward transform and the inverse-transpose respectively.

mod boxes;
mod cone;
mod cylinder;
mod hemisphere;
mod sphere;

use std::f32::consts::TAU;

use umbra_core::{Primitive, SceneObject};
use umbra_math::{Interval, Mat4Ext, Ray, Vec2, Vec3};

use crate::{HitRecord, ObjectHit};

/// Leading quadratic coefficients smaller than this fraction of |V|² are
/// treated as zero (ray parallel to the primitive's axis or surface).
const PARALLEL_EPSILON: f32 = 1e-7;

/// Intersect a world-space ray with one object.
pub fn intersect(ray: &Ray, object: &SceneObject) -> ObjectHit {
    let local = ObjectRay::new(ray, object);
    match object.primitive {
        Primitive::Box => boxes::intersect_box(&local),
        Primitive::Room => boxes::intersect_room(&local),
        Primitive::Sphere => sphere::intersect_sphere(&local),
        Primitive::Cylinder => cylinder::intersect_cylinder(&local),
        Primitive::Cone => cone::intersect_cone(&local),
        Primitive::Hemisphere => hemisphere::intersect_hemisphere(&local),
    }
}

/// The nearest object in front of a ray.
#[derive(Debug, Clone, Copy)]
pub struct ClosestHit<'a> {
    pub object: &'a SceneObject,
    pub record: HitRecord,
    /// True if the ray is entering the object at this crossing
    pub is_enter: bool,
}

/// Linear scan for the closest crossing with t >= 0 across all objects.
pub fn closest_hit<'a>(ray: &Ray, objects: &'a [SceneObject]) -> Option<ClosestHit<'a>> {
    let mut closest: Option<ClosestHit<'a>> = None;

    for object in objects {
        let Some((record, is_enter)) = intersect(ray, object).first_forward() else {
            continue;
        };
        if closest.map_or(true, |c| record.t < c.record.t) {
            closest = Some(ClosestHit {
                object,
                record,
                is_enter,
            });
        }
    }

    closest
}

/// The object whose exit crossing is nearest in front of the ray.
///
/// Used to find the medium a ray continues into after leaving an object.
pub fn closest_exit<'a>(ray: &Ray, objects: &'a [SceneObject]) -> Option<&'a SceneObject> {
    let mut closest: Option<(f32, &'a SceneObject)> = None;

    for object in objects {
        let Some(exit) = intersect(ray, object).exit else {
            continue;
        };
        if Interval::FORWARD.contains(exit.t) && closest.map_or(true, |(t, _)| exit.t < t) {
            closest = Some((exit.t, object));
        }
    }

    closest.map(|(_, object)| object)
}

/// A ray expressed in an object's local frame.
pub(crate) struct ObjectRay<'a> {
    /// Origin
    pub s: Vec3,
    /// Direction (not normalized; t values are shared with the world ray)
    pub v: Vec3,
    object: &'a SceneObject,
}

impl<'a> ObjectRay<'a> {
    fn new(ray: &Ray, object: &'a SceneObject) -> Self {
        let local = ray.transform(&object.inverse);
        Self {
            s: local.origin(),
            v: local.direction(),
            object,
        }
    }

    /// Local point at parameter t.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.s + t * self.v
    }

    /// Parameter where the ray crosses the plane z = `z`.
    #[inline]
    pub fn t_at_z(&self, z: f32) -> f32 {
        (z - self.s.z) / self.v.z
    }

    /// True if `a` is negligible for this ray's direction.
    #[inline]
    pub fn is_degenerate(&self, a: f32) -> bool {
        a.abs() <= PARALLEL_EPSILON * self.v.length_squared()
    }

    /// Map a local crossing into a world-space record.
    ///
    /// Non-finite t values (from a zero denominator) are discarded.
    pub fn record(&self, t: f32, local_point: Vec3, local_normal: Vec3, uv: Vec2) -> Option<HitRecord> {
        if !t.is_finite() {
            return None;
        }
        Some(HitRecord {
            t,
            point: self.object.transform.transform_point3(local_point),
            normal: self.object.normal_matrix.transform_normal(local_normal),
            uv,
        })
    }
}

/// Real roots of `a t² + b t + c`, smaller first. None if the discriminant is negative.
pub(crate) fn solve_quadratic(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let t1 = (-b + sqrt_d) / (2.0 * a);
    let t2 = (-b - sqrt_d) / (2.0 * a);
    Some((t1.min(t2), t1.max(t2)))
}

/// Angle around the z axis, as a fraction of a full turn in (-0.5, 0.5].
#[inline]
pub(crate) fn turn_fraction(p: Vec3) -> f32 {
    p.y.atan2(p.x) / TAU
}

/// Distance from the z axis.
#[inline]
pub(crate) fn radial_distance(p: Vec3) -> f32 {
    p.truncate().length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use umbra_core::Material;
    use umbra_math::Mat4;

    fn unit(primitive: Primitive) -> SceneObject {
        SceneObject::new("unit", primitive, Mat4::IDENTITY, Material::default())
    }

    #[test]
    fn test_far_rays_miss_every_primitive() {
        let mut rng = StdRng::seed_from_u64(7);

        for primitive in Primitive::ALL {
            let object = unit(primitive);
            for _ in 0..200 {
                // Rays parallel to z, offset well outside every primitive's bounds
                let angle = rng.gen_range(0.0..TAU);
                let radius = rng.gen_range(2.0..50.0);
                let origin = Vec3::new(radius * angle.cos(), radius * angle.sin(), rng.gen_range(-5.0..5.0));
                let direction = Vec3::new(0.0, 0.0, if rng.gen_bool(0.5) { 1.0 } else { -1.0 });
                let hit = intersect(&Ray::new(origin, direction), &object);
                assert!(hit.is_miss(), "{:?} hit by ray from {:?}", primitive, origin);

                // And rays skimming past in the xy plane
                let skim = Ray::new(Vec3::new(-10.0, radius, 0.25), Vec3::X);
                assert!(intersect(&skim, &object).is_miss(), "{:?} hit by skimming ray", primitive);
            }
        }
    }

    #[test]
    fn test_closest_hit_picks_nearest() {
        let near = SceneObject::new(
            "near",
            Primitive::Sphere,
            Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0)),
            Material::default(),
        );
        let far = SceneObject::new(
            "far",
            Primitive::Box,
            Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)),
            Material::default(),
        );
        let objects = vec![far, near];
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let hit = closest_hit(&ray, &objects).unwrap();
        assert_eq!(hit.object.name, "near");
        assert!(hit.is_enter);
        assert!((hit.record.t - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_closest_hit_ignores_objects_behind() {
        let behind = SceneObject::new(
            "behind",
            Primitive::Sphere,
            Mat4::from_translation(Vec3::new(0.0, 0.0, 3.0)),
            Material::default(),
        );
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(closest_hit(&ray, &[behind]).is_none());
    }

    #[test]
    fn test_closest_hit_from_inside_uses_exit() {
        let room = SceneObject::new("room", Primitive::Room, Mat4::from_scale(Vec3::splat(10.0)), Material::default());
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let hit = closest_hit(&ray, std::slice::from_ref(&room)).unwrap();
        assert!(!hit.is_enter);
        assert!((hit.record.t - 5.0).abs() < 1e-4);
        // Room walls face inward
        assert!((hit.record.normal - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_closest_exit() {
        let glass = SceneObject::new(
            "glass",
            Primitive::Sphere,
            Mat4::from_scale(Vec3::splat(2.0)),
            Material::default().with_transport(0.0, 0.0, 1.0, 1.5),
        );
        let water = SceneObject::new(
            "water",
            Primitive::Box,
            Mat4::from_scale(Vec3::splat(8.0)),
            Material::default().with_transport(0.0, 0.0, 1.0, 1.33),
        );
        let objects = vec![water, glass];

        // Starting inside both, the glass wall is nearer
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(closest_exit(&ray, &objects).unwrap().name, "glass");

        // Past the glass, only the water remains ahead
        let ray = Ray::new(Vec3::new(1.5, 0.0, 0.0), Vec3::X);
        assert_eq!(closest_exit(&ray, &objects).unwrap().name, "water");

        // Outside everything
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::X);
        assert!(closest_exit(&ray, &objects).is_none());
    }

    #[test]
    fn test_transformed_hit_maps_back_to_world() {
        let object = SceneObject::new(
            "stretched",
            Primitive::Sphere,
            Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0)) * Mat4::from_scale(Vec3::new(4.0, 1.0, 1.0)),
            Material::default(),
        );
        // Hit the long side of the ellipsoid
        let ray = Ray::new(Vec3::new(-10.0, 0.0, -10.0), Vec3::X);
        let hit = intersect(&ray, &object);
        let enter = hit.enter.unwrap();

        assert!((enter.point - Vec3::new(-2.0, 0.0, -10.0)).length() < 1e-4);
        assert!((enter.t - 8.0).abs() < 1e-4);
        assert!((enter.normal - Vec3::NEG_X).length() < 1e-4);
        assert!((enter.normal.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_solve_quadratic() {
        // (t - 1)(t - 3)
        let (a, b) = solve_quadratic(1.0, -4.0, 3.0).unwrap();
        assert!((a - 1.0).abs() < 1e-6);
        assert!((b - 3.0).abs() < 1e-6);

        assert!(solve_quadratic(1.0, 0.0, 1.0).is_none());
    }
}
