//! Named vector operations used by the tracer.
//!
//! These are thin wrappers over `glam::DVec3` so that intersection and
//! shading code reads in the vocabulary of the algorithm. All functions are
//! pure and allocation-free.

use crate::DVec3;

#[inline]
pub fn add(a: DVec3, b: DVec3) -> DVec3 {
    a + b
}

#[inline]
pub fn sub(a: DVec3, b: DVec3) -> DVec3 {
    a - b
}

#[inline]
pub fn scale(a: DVec3, s: f64) -> DVec3 {
    a * s
}

#[inline]
pub fn dot(a: DVec3, b: DVec3) -> f64 {
    a.dot(b)
}

#[inline]
pub fn cross(a: DVec3, b: DVec3) -> DVec3 {
    a.cross(b)
}

/// Scale `v` to unit length.
///
/// Returns `None` for a zero or non-finite magnitude instead of dividing by
/// zero, so callers have to handle degenerate vectors explicitly.
#[inline]
pub fn normalize(v: DVec3) -> Option<DVec3> {
    v.try_normalize()
}

#[inline]
pub fn magnitude(v: DVec3) -> f64 {
    v.length()
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: DVec3, b: DVec3) -> f64 {
    a.distance(b)
}

/// Map a real channel value to a byte.
///
/// Values above 255 saturate to 255, values below 0 (and NaN) to 0, anything
/// else is floored.
#[inline]
pub fn clamp(d: f64) -> u8 {
    if d > 255.0 {
        255
    } else if d >= 0.0 {
        d.floor() as u8
    } else {
        0
    }
}

/// Mirror `v` about the unit normal `n`.
#[inline]
pub fn reflect(v: DVec3, n: DVec3) -> DVec3 {
    v - 2.0 * v.dot(n) * n
}

/// Bend the unit direction `v` through a surface with unit normal `n`.
///
/// `n` must face against `v` and `eta` is the ratio of the incident index of
/// refraction to the transmitted one. Returns `None` on total internal
/// reflection.
pub fn refract(v: DVec3, n: DVec3, eta: f64) -> Option<DVec3> {
    let cos_i = (-v).dot(n).min(1.0);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }
    Some(eta * v + (eta * cos_i - k.sqrt()) * n)
}
