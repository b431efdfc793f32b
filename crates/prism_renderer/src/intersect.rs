//! Closed-form ray-primitive intersection tests.
//!
//! Both tests return the ray parameter `t` of the nearest hit in front of the
//! origin, or `None`. Hits at `t <= EPSILON` are rejected so that secondary
//! rays starting on a surface do not immediately hit it again.

use prism_math::{DVec3, Ray, EPSILON};

/// Intersect a ray with a sphere.
///
/// Solves `|o + t*d - c|^2 = r^2` for `t`. Returns the smaller root past
/// `EPSILON`, falling back to the larger one when the origin is inside the
/// sphere, or `None` if the discriminant is negative or both roots are behind.
pub fn sphere_intersection(ray: &Ray, center: DVec3, radius: f64) -> Option<f64> {
    let oc = ray.origin - center;
    let a = ray.direction.length_squared();
    if a == 0.0 {
        return None;
    }
    let b = 2.0 * ray.direction.dot(oc);
    let c = oc.length_squared() - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();

    // Nearer root first
    let t0 = (-b - sqrtd) / (2.0 * a);
    if t0 > EPSILON {
        return Some(t0);
    }
    let t1 = (-b + sqrtd) / (2.0 * a);
    if t1 > EPSILON {
        return Some(t1);
    }

    None
}

/// Intersect a ray with an infinite plane through `center` with `normal`.
///
/// Returns `None` if the ray is parallel to the plane or the plane is behind
/// the origin.
pub fn plane_intersection(ray: &Ray, center: DVec3, normal: DVec3) -> Option<f64> {
    let denom = normal.dot(ray.direction);

    // Ray is parallel to plane
    if denom.abs() < EPSILON {
        return None;
    }

    let t = normal.dot(center - ray.origin) / denom;
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}
