//! Frame driver.
//!
//! Casts one primary ray per pixel through the camera's image plane and
//! writes the shaded, clamped color into a [`PixelBuffer`]. Pixels are
//! independent, so rows are rendered in parallel with rayon.

use std::time::Instant;

use log::info;
use rayon::prelude::*;
use thiserror::Error;

use crate::camera::ImagePlane;
use crate::pixel::{Pixel, PixelBuffer};
use crate::shade::trace;
use prism_core::Scene;
use prism_math::Color;

/// Upper bound on reflection/refraction recursion.
pub const MAX_DEPTH: u8 = 255;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Maximum reflection/refraction depth
    pub max_depth: u8,
    /// Background color when ray doesn't hit anything
    pub background: Color,
    /// Paths whose weight in the final pixel falls below this stop at their
    /// local color. 0 traces every bounce up to `max_depth`.
    pub min_contribution: f64,
    /// Render rows on the rayon thread pool
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            background: Color::ZERO,
            min_contribution: 0.0,
            parallel: true,
        }
    }
}

impl RenderConfig {
    /// Set the recursion limit.
    pub fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Set the path weight below which recursion stops.
    pub fn with_min_contribution(mut self, min_contribution: f64) -> Self {
        self.min_contribution = min_contribution;
        self
    }

    /// Enable or disable parallel rendering.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Errors that prevent a frame from being rendered.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Scene has no camera")]
    NoCamera,

    #[error("Image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Render a single pixel.
pub fn render_pixel(
    scene: &Scene,
    plane: &ImagePlane,
    row: u32,
    col: u32,
    config: &RenderConfig,
) -> Pixel {
    let ray = plane.primary_ray(row, col);
    Pixel::from_color(trace(scene, &ray, config))
}

fn image_plane(scene: &Scene, width: u32, height: u32) -> RenderResult<ImagePlane> {
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyImage { width, height });
    }
    let camera = scene.camera().ok_or(RenderError::NoCamera)?;
    Ok(ImagePlane::new(camera, width, height))
}

/// Render the entire scene to a `width` x `height` pixel buffer.
pub fn raycast(
    scene: &Scene,
    width: u32,
    height: u32,
    config: &RenderConfig,
) -> RenderResult<PixelBuffer> {
    let plane = image_plane(scene, width, height)?;
    let mut buffer = PixelBuffer::new(width, height);

    info!(
        "Rendering '{}' at {}x{} (max depth {}, {})",
        scene.name,
        width,
        height,
        config.max_depth,
        if config.parallel { "parallel" } else { "sequential" }
    );
    let start = Instant::now();

    let render_row = |(row, pixels): (usize, &mut [Pixel])| {
        for (col, pixel) in pixels.iter_mut().enumerate() {
            *pixel = render_pixel(scene, &plane, row as u32, col as u32, config);
        }
    };

    let row_len = width as usize;
    if config.parallel {
        buffer
            .pixels
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(render_row);
    } else {
        buffer
            .pixels
            .chunks_mut(row_len)
            .enumerate()
            .for_each(render_row);
    }

    info!("Rendered in {:?}", start.elapsed());
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{Light, Object, Surface};
    use prism_math::DVec3;

    fn sphere_scene() -> Scene {
        Scene::new("sphere")
            .with(Object::camera(1.0, 1.0))
            .and_then(|s| {
                s.with(Object::sphere(
                    DVec3::new(0.0, 0.0, 5.0),
                    1.0,
                    Surface::diffuse(Color::new(1.0, 0.0, 0.0)),
                ))
            })
            .and_then(|s| s.with(Object::light(Light::point(DVec3::ZERO, Color::ONE))))
            .unwrap()
    }

    #[test]
    fn test_buffer_size() {
        let buffer = raycast(&sphere_scene(), 7, 5, &RenderConfig::default()).unwrap();
        assert_eq!(buffer.width, 7);
        assert_eq!(buffer.height, 5);
        assert_eq!(buffer.pixels.len(), 35);
    }

    #[test]
    fn test_center_hits_sphere_corner_misses() {
        let buffer = raycast(&sphere_scene(), 9, 9, &RenderConfig::default()).unwrap();

        let center = buffer.get(4, 4);
        assert!(center.r > 200);
        assert_eq!(center.g, 0);

        assert_eq!(buffer.get(0, 0), Pixel::BLACK);
    }

    #[test]
    fn test_background_for_misses() {
        let config = RenderConfig::default().with_background(Color::new(0.0, 0.0, 1.0));
        let buffer = raycast(&sphere_scene(), 9, 9, &config).unwrap();
        assert_eq!(buffer.get(0, 0), Pixel::new(0, 0, 255));
    }

    #[test]
    fn test_top_left_origin() {
        // Sphere above the view axis shows up in the top rows
        let scene = Scene::new("high")
            .with(Object::camera(2.0, 2.0))
            .and_then(|s| {
                s.with(Object::sphere(
                    DVec3::new(0.0, 3.0, 5.0),
                    1.0,
                    Surface::diffuse(Color::ONE),
                ))
            })
            .and_then(|s| s.with(Object::light(Light::point(DVec3::ZERO, Color::ONE))))
            .unwrap();
        let config = RenderConfig::default().with_parallel(false);
        let buffer = raycast(&scene, 10, 10, &config).unwrap();

        let top: u32 = (0..10).map(|x| buffer.get(x, 2).r as u32).sum();
        let bottom: u32 = (0..10).map(|x| buffer.get(x, 7).r as u32).sum();
        assert!(top > 0);
        assert_eq!(bottom, 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let scene = sphere_scene();
        let parallel = raycast(&scene, 16, 12, &RenderConfig::default()).unwrap();
        let sequential = raycast(&scene, 16, 12, &RenderConfig::default().with_parallel(false)).unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.max_depth, MAX_DEPTH);
        assert_eq!(config.background, Color::ZERO);
        assert_eq!(config.min_contribution, 0.0);
        assert!(config.parallel);
    }

    #[test]
    fn test_no_camera() {
        let scene = Scene::new("no camera");
        assert_eq!(
            raycast(&scene, 4, 4, &RenderConfig::default()),
            Err(RenderError::NoCamera)
        );
    }

    #[test]
    fn test_empty_image() {
        assert_eq!(
            raycast(&sphere_scene(), 0, 4, &RenderConfig::default()),
            Err(RenderError::EmptyImage { width: 0, height: 4 })
        );
    }

    #[test]
    fn test_no_lights_renders_black() {
        let scene = Scene::new("unlit")
            .with(Object::camera(2.0, 2.0))
            .and_then(|s| s.with(Object::sphere(DVec3::new(0.0, 0.0, 3.0), 1.0, Surface::diffuse(Color::ONE))))
            .and_then(|s| {
                s.with(Object::plane(DVec3::new(0.0, -1.0, 0.0), DVec3::Y, Surface::diffuse(Color::ONE)))
            })
            .unwrap();

        let buffer = raycast(&scene, 16, 16, &RenderConfig::default()).unwrap();
        assert!(buffer.pixels.iter().all(|p| *p == Pixel::BLACK));
    }
}
