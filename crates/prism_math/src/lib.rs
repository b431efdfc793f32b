// Re-export glam for convenience
pub use glam::*;

// Prism math types
mod interval;
mod ray;
pub mod vector;

pub use interval::Interval;
pub use ray::Ray;

/// RGB color in linear space. Channels are nominally 0-1 but light colors
/// and accumulated radiance may exceed 1 before the final clamp.
pub type Color = DVec3;

/// Rays with a parameter at or below this value are treated as misses.
///
/// Keeps secondary rays from re-hitting the surface they start on.
pub const EPSILON: f64 = 1e-6;
