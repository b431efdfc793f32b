//! Primary and shadow ray casting.
//!
//! Both casters do a linear scan over the scene. There is no acceleration
//! structure: each ray tests every object.

use crate::hittable::{Hit, Hittable};
use prism_core::Scene;
use prism_math::{Interval, Ray, EPSILON};

/// Find the nearest object hit by `ray`.
///
/// Cameras and lights are skipped. When two objects are hit at exactly the
/// same distance the one with the lower scene index wins, because a later
/// object only replaces the current best if it is strictly closer.
pub fn shoot_ray(scene: &Scene, ray: &Ray) -> Option<Hit> {
    let mut best: Option<Hit> = None;

    for (index, object) in scene.geometry() {
        let Some(t) = object.intersect(ray) else {
            continue;
        };
        if best.map_or(true, |hit| t < hit.t) {
            best = Some(Hit { index, t });
        }
    }

    best
}

/// Check whether anything blocks `ray` before it reaches a light.
///
/// `ray` starts at a hit point on object `self_index` and points at the
/// light; `light_distance` is the distance to the light along the (unit)
/// direction. The hit object itself is never treated as an occluder. Only
/// hits strictly between `EPSILON` and the light count, so a surface exactly
/// at the light's position does not shadow it.
pub fn shoot_ray_shadow(scene: &Scene, self_index: usize, ray: &Ray, light_distance: f64) -> bool {
    let range = Interval::new(EPSILON, light_distance);

    scene
        .geometry()
        .filter(|(index, _)| *index != self_index)
        .filter_map(|(_, object)| object.intersect(ray))
        .any(|t| range.surrounds(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{Light, Object, Surface};
    use prism_math::{Color, DVec3};

    fn sphere(z: f64) -> Object {
        Object::sphere(DVec3::new(0.0, 0.0, z), 1.0, Surface::default())
    }

    #[test]
    fn test_shoot_ray_picks_nearer() {
        let scene = Scene::new("two spheres")
            .with(Object::camera(1.0, 1.0))
            .and_then(|s| s.with(sphere(10.0)))
            .and_then(|s| s.with(sphere(5.0)))
            .unwrap();

        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        let hit = shoot_ray(&scene, &ray).unwrap();
        assert_eq!(hit.index, 2);
        assert!((hit.t - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_shoot_ray_equidistant_lowest_index_wins() {
        let scene = Scene::new("duplicates")
            .with(sphere(5.0))
            .and_then(|s| s.with(sphere(5.0)))
            .unwrap();

        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        assert_eq!(shoot_ray(&scene, &ray).unwrap().index, 0);
    }

    #[test]
    fn test_shoot_ray_miss() {
        let scene = Scene::new("miss")
            .with(Object::camera(1.0, 1.0))
            .and_then(|s| s.with(Object::light(Light::point(DVec3::Z * 3.0, Color::ONE))))
            .and_then(|s| s.with(sphere(5.0)))
            .unwrap();

        let ray = Ray::new(DVec3::ZERO, DVec3::NEG_Z);
        assert!(shoot_ray(&scene, &ray).is_none());
    }

    #[test]
    fn test_shoot_ray_mixed_kinds() {
        let scene = Scene::new("mixed")
            .with(Object::plane(DVec3::new(0.0, 0.0, 20.0), DVec3::NEG_Z, Surface::default()))
            .and_then(|s| s.with(sphere(5.0)))
            .unwrap();

        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        assert_eq!(shoot_ray(&scene, &ray).unwrap().index, 1);

        // Beside the sphere only the plane remains
        let side = Ray::new(DVec3::new(3.0, 0.0, 0.0), DVec3::Z);
        let hit = shoot_ray(&scene, &side).unwrap();
        assert_eq!(hit.index, 0);
        assert!((hit.t - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_shadow_occluded() {
        // Point on a floor at the origin, blocker at z=5, light at z=10
        let scene = Scene::new("occluded")
            .with(Object::plane(DVec3::ZERO, DVec3::Z, Surface::default()))
            .and_then(|s| s.with(sphere(5.0)))
            .unwrap();

        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        assert!(shoot_ray_shadow(&scene, 0, &ray, 10.0));
    }

    #[test]
    fn test_shadow_visible() {
        let scene = Scene::new("visible")
            .with(Object::plane(DVec3::ZERO, DVec3::Z, Surface::default()))
            .and_then(|s| s.with(sphere(5.0)))
            .unwrap();

        // Light closer than the blocker
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        assert!(!shoot_ray_shadow(&scene, 0, &ray, 3.0));

        // Light off to the side
        let side = Ray::new(DVec3::ZERO, DVec3::X);
        assert!(!shoot_ray_shadow(&scene, 0, &side, 10.0));
    }

    #[test]
    fn test_shadow_light_at_far_edge() {
        // Blocker spans t in [4, 6]; light sits exactly on its far edge, so
        // the near surface still blocks it.
        let scene = Scene::new("edge")
            .with(Object::plane(DVec3::ZERO, DVec3::Z, Surface::default()))
            .and_then(|s| s.with(sphere(5.0)))
            .unwrap();
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        assert!(shoot_ray_shadow(&scene, 0, &ray, 6.0));

        // Light exactly on the blocker's near edge is not blocked
        assert!(!shoot_ray_shadow(&scene, 0, &ray, 4.0));
    }

    #[test]
    fn test_shadow_ignores_own_surface() {
        // Shadow ray leaving the top of a sphere toward a light above it
        let scene = Scene::new("self").with(sphere(0.0)).unwrap();
        let origin = DVec3::new(0.0, 0.0, 1.0);

        let up = Ray::new(origin, DVec3::Z);
        assert!(!shoot_ray_shadow(&scene, 0, &up, 10.0));

        // Even pointing back through itself
        let down = Ray::new(origin, DVec3::NEG_Z);
        assert!(!shoot_ray_shadow(&scene, 0, &down, 10.0));
    }
}
