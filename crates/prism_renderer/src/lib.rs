//! Prism Renderer - CPU Ray Casting
//!
//! A Whitted-style ray caster: one primary ray per pixel, local Phong
//! lighting with hard shadows and light attenuation, and recursive mirror
//! reflection and refraction up to a bounded depth.
//!
//! Every ray is tested against every object; there is no acceleration
//! structure and no multi-sampling.

mod camera;
mod caster;
mod hittable;
mod intersect;
mod output;
mod pixel;
mod renderer;
mod shade;

pub use camera::{ImagePlane, ORIGIN};
pub use caster::{shoot_ray, shoot_ray_shadow};
pub use hittable::{Hit, HitRecord, Hittable};
pub use intersect::{plane_intersection, sphere_intersection};
pub use output::{save_image, save_ppm, write_ppm, OutputError, OutputResult, PpmFormat};
pub use pixel::{Pixel, PixelBuffer, MAX_CHANNEL};
pub use renderer::{raycast, render_pixel, RenderConfig, RenderError, RenderResult, MAX_DEPTH};
pub use shade::{fang, frad, shade, trace};

/// Re-export common math types from prism_math
pub use prism_math::{Color, DVec3, Interval, Ray, EPSILON};
