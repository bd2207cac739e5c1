//! Phong local illumination with shadow rays.

use umbra_core::{Light, Scene, SceneObject};
use umbra_math::{Ray, Vec3};

use crate::{closest_hit, Color, HitRecord};

/// Shadow rays start this far along the (unnormalized) light vector.
const SHADOW_OFFSET: f32 = 0.01;

/// Weight of the lit color when a texture is blended on top.
const TEXTURE_LIT_WEIGHT: f32 = 0.5;

/// Local color at a hit: the sum over all lights of ambient, plus diffuse and
/// specular for lights that are neither occluded nor outside their spot cone.
///
/// The viewer is at the origin, so the view vector is `-point`.
pub fn shade(object: &SceneObject, hit: &HitRecord, scene: &Scene) -> Color {
    let material = &object.material;
    let normal = hit.normal.normalize_or_zero();
    let view = (-hit.point).normalize_or_zero();

    let mut color = Color::ZERO;

    for light in &scene.lights {
        color += material.ambient * light.ambient;

        let to_light = light_vector(light, hit.point);
        if is_occluded(hit.point, to_light, scene) {
            continue;
        }

        let l = to_light.normalize_or_zero();
        if !in_spot_cone(light, l) {
            continue;
        }

        let n_dot_l = normal.dot(l);
        color += material.diffuse * light.diffuse * n_dot_l.max(0.0);

        if n_dot_l > 0.0 {
            let r = reflect(-l, normal);
            let r_dot_v = r.dot(view).max(0.0);
            color += material.specular * light.specular * r_dot_v.powf(material.shininess);
        }
    }

    match object.active_texture() {
        Some(texture) => TEXTURE_LIT_WEIGHT * color + texture.sample(hit.uv),
        None => color,
    }
}

/// Unnormalized vector from `point` toward the light. For point lights its
/// length is the distance to the light.
fn light_vector(light: &Light, point: Vec3) -> Vec3 {
    if light.is_point() {
        light.position.truncate() - point
    } else {
        -light.position.truncate()
    }
}

/// True if any object lies between `point` and the light.
///
/// The shadow ray's direction is the full light vector, so the light itself
/// sits at t = 1.
fn is_occluded(point: Vec3, to_light: Vec3, scene: &Scene) -> bool {
    let shadow_ray = Ray::new(point + SHADOW_OFFSET * to_light, to_light);
    closest_hit(&shadow_ray, &scene.objects).is_some_and(|hit| hit.record.t <= 1.0)
}

fn in_spot_cone(light: &Light, l: Vec3) -> bool {
    if light.spot_cutoff <= -1.0 {
        return true;
    }
    let aim = (light.spot_target - light.position).truncate().normalize_or_zero();
    (-l).dot(aim) >= light.spot_cutoff
}

/// Mirror `incident` about `normal`. Both are normalized first, so the result
/// is unit length.
pub(crate) fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    let i = incident.normalize_or_zero();
    let n = normal.normalize_or_zero();
    i - 2.0 * n.dot(i) * n
}
