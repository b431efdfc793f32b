//! Local illumination and recursive specular transport.
//!
//! [`shade`] lights a hit point with every light in the scene (Lambert
//! diffuse plus a Phong highlight, with shadows, radial attenuation and
//! spotlight falloff), then adds mirrored and transmitted rays traced with
//! [`trace`]. Recursion depth is an explicit parameter and is capped by
//! [`RenderConfig::max_depth`], so every ray terminates.

use crate::caster::{shoot_ray, shoot_ray_shadow};
use crate::hittable::{Hit, HitRecord};
use crate::renderer::RenderConfig;
use prism_core::{Light, Object, Scene, Surface};
use prism_math::vector::{distance, normalize, reflect, refract};
use prism_math::{Color, DVec3, Ray};

/// Radial attenuation `1 / (a2*d^2 + a1*d + a0)` at distance `d`.
#[inline]
pub fn frad(a0: f64, a1: f64, a2: f64, d: f64) -> f64 {
    1.0 / (a2 * d * d + a1 * d + a0)
}

/// Angular attenuation of a spotlight.
///
/// `light_direction` is the spotlight axis and `to_point` the vector from the
/// light to the lit point. Returns 1 for an omnidirectional light
/// (`theta == 0`), 0 outside the cone, and `cos(angle)^angular_a0` inside.
pub fn fang(light_direction: DVec3, to_point: DVec3, theta: f64, angular_a0: f64) -> f64 {
    if theta == 0.0 {
        return 1.0;
    }
    let (Some(axis), Some(v)) = (normalize(light_direction), normalize(to_point)) else {
        return 1.0;
    };

    let cos_angle = axis.dot(v).clamp(-1.0, 1.0);
    if cos_angle.acos() > theta {
        0.0
    } else {
        cos_angle.max(0.0).powf(angular_a0)
    }
}

/// Color seen along `ray`, starting a new path at depth 0.
pub fn trace(scene: &Scene, ray: &Ray, config: &RenderConfig) -> Color {
    trace_at_depth(scene, ray, 0, 1.0, config)
}

/// Cast `ray` and shade whatever it hits, or return the background.
fn trace_at_depth(scene: &Scene, ray: &Ray, depth: u8, weight: f64, config: &RenderConfig) -> Color {
    match shoot_ray(scene, ray) {
        Some(hit) => shade_weighted(scene, ray, hit, depth, weight, config),
        None => config.background,
    }
}

/// Outgoing color at `hit`, reached by `ray` after `depth` bounces.
///
/// At `depth == config.max_depth` no further rays are traced and only the
/// locally lit color is returned.
pub fn shade(scene: &Scene, ray: &Ray, hit: Hit, depth: u8, config: &RenderConfig) -> Color {
    shade_weighted(scene, ray, hit, depth, 1.0, config)
}

/// [`shade`] for a path whose contribution to the final pixel is `weight`.
///
/// A path lighter than `config.min_contribution` ends here the same way a
/// path at the depth bound does.
fn shade_weighted(
    scene: &Scene,
    ray: &Ray,
    hit: Hit,
    depth: u8,
    weight: f64,
    config: &RenderConfig,
) -> Color {
    let Some(object) = scene.get(hit.index) else {
        return config.background;
    };
    let surface = &object.surface;
    let rec = HitRecord::new(ray, hit.t, object);

    let local = direct_lighting(scene, ray, hit.index, &rec, surface);
    if depth >= config.max_depth || weight < config.min_contribution {
        return local;
    }

    let mut color = surface.local_weight() * local;

    if surface.reflectivity > 0.0 {
        let direction = reflect(ray.direction, rec.normal);
        let path_weight = weight * surface.reflectivity;
        color += surface.reflectivity
            * secondary(scene, rec.p, direction, depth, path_weight, config);
    }

    if surface.refractivity > 0.0 {
        let direction = transmitted_direction(ray, &rec, object);
        let path_weight = weight * surface.refractivity;
        color += surface.refractivity
            * secondary(scene, rec.p, direction, depth, path_weight, config);
    }

    color
}

/// Trace a reflected or refracted ray one level deeper.
fn secondary(
    scene: &Scene,
    origin: DVec3,
    direction: DVec3,
    depth: u8,
    weight: f64,
    config: &RenderConfig,
) -> Color {
    match Ray::normalized(origin, direction) {
        Some(ray) => trace_at_depth(scene, &ray, depth + 1, weight, config),
        None => Color::ZERO,
    }
}

/// Snell refraction through the hit surface, or the mirror direction on
/// total internal reflection.
fn transmitted_direction(ray: &Ray, rec: &HitRecord, object: &Object) -> DVec3 {
    let ior = object.surface.ior;
    let eta = if rec.front_face { 1.0 / ior } else { ior };

    refract(ray.direction, rec.normal, eta).unwrap_or_else(|| reflect(ray.direction, rec.normal))
}

/// Sum of diffuse and specular light reaching the hit point.
fn direct_lighting(
    scene: &Scene,
    ray: &Ray,
    self_index: usize,
    rec: &HitRecord,
    surface: &Surface,
) -> Color {
    let view = -ray.direction;

    scene
        .lights()
        .map(|light| light_contribution(scene, light, self_index, rec, surface, view))
        .fold(Color::ZERO, |acc, c| acc + c)
}

fn light_contribution(
    scene: &Scene,
    light: &Light,
    self_index: usize,
    rec: &HitRecord,
    surface: &Surface,
    view: DVec3,
) -> Color {
    let light_distance = distance(light.position, rec.p);
    let Some(l) = normalize(light.position - rec.p) else {
        return Color::ZERO;
    };

    let n_dot_l = rec.normal.dot(l);
    if n_dot_l <= 0.0 {
        return Color::ZERO;
    }

    if shoot_ray_shadow(scene, self_index, &Ray::new(rec.p, l), light_distance) {
        return Color::ZERO;
    }

    let diffuse = surface.diffuse_color * light.color * n_dot_l;

    let r = reflect(-l, rec.normal);
    let r_dot_v = r.dot(view).max(0.0);
    let specular = surface.specular_color * light.color * r_dot_v.powf(surface.shininess);

    let radial = frad(light.radial_a0, light.radial_a1, light.radial_a2, light_distance);
    let angular = match light.direction {
        Some(axis) if light.is_spot() => fang(axis, -l, light.theta, light.angular_a0),
        _ => 1.0,
    };

    radial * angular * (diffuse + specular)
}
