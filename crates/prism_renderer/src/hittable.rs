//! Hittable trait and HitRecord for ray-object intersection.

use crate::intersect::{plane_intersection, sphere_intersection};
use prism_core::{Object, Plane, Shape, Sphere};
use prism_math::{DVec3, Ray};

/// Nearest hit found by the primary caster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Scene index of the object that was hit
    pub index: usize,
    /// Ray parameter of the hit
    pub t: f64,
}

/// Surface information at a hit point, as needed for shading.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    /// Point of intersection
    pub p: DVec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: DVec3,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl HitRecord {
    /// Resolve a hit into a point and a shading normal.
    pub fn new(ray: &Ray, t: f64, object: &impl Hittable) -> Self {
        let p = ray.at(t);
        let mut rec = Self {
            p,
            normal: DVec3::ZERO,
            t,
            front_face: true,
        };
        rec.set_face_normal(ray, object.outward_normal(p));
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: DVec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction.dot(outward_normal) < 0.0;

        // Normal always points against the ray
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable {
    /// Ray parameter of the nearest hit in front of the ray origin.
    fn intersect(&self, ray: &Ray) -> Option<f64>;

    /// Unit normal pointing out of the surface at `p`.
    ///
    /// `p` is assumed to lie on the surface.
    fn outward_normal(&self, p: DVec3) -> DVec3;
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        sphere_intersection(ray, self.center, self.radius)
    }

    fn outward_normal(&self, p: DVec3) -> DVec3 {
        (p - self.center) / self.radius
    }
}

impl Hittable for Plane {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        plane_intersection(ray, self.center, self.normal)
    }

    fn outward_normal(&self, _p: DVec3) -> DVec3 {
        self.normal
    }
}

/// Cameras and lights are never hit.
impl Hittable for Shape {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        match self {
            Shape::Sphere(sphere) => sphere.intersect(ray),
            Shape::Plane(plane) => plane.intersect(ray),
            Shape::Camera(_) | Shape::Light(_) => None,
        }
    }

    fn outward_normal(&self, p: DVec3) -> DVec3 {
        match self {
            Shape::Sphere(sphere) => sphere.outward_normal(p),
            Shape::Plane(plane) => plane.outward_normal(p),
            Shape::Camera(_) | Shape::Light(_) => DVec3::ZERO,
        }
    }
}

impl Hittable for Object {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        self.shape.intersect(ray)
    }

    fn outward_normal(&self, p: DVec3) -> DVec3 {
        self.shape.outward_normal(p)
    }
}
