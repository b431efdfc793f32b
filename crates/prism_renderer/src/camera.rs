//! Primary ray generation.

use prism_core::Camera;
use prism_math::{DVec3, Ray};

/// Camera position. The eye sits at the origin and looks down +Z.
pub const ORIGIN: DVec3 = DVec3::ZERO;

/// The camera's image plane at unit distance, divided into pixels.
///
/// Row 0 is the top of the image and column 0 the left edge, so rows map to
/// decreasing `y`.
#[derive(Debug, Clone, Copy)]
pub struct ImagePlane {
    pub width: u32,
    pub height: u32,
    pixel00_loc: DVec3,
    pixel_delta_u: DVec3,
    pixel_delta_v: DVec3,
}

impl ImagePlane {
    pub fn new(camera: &Camera, width: u32, height: u32) -> Self {
        // Viewport vectors across and down the plane
        let viewport_u = DVec3::new(camera.width, 0.0, 0.0);
        let viewport_v = DVec3::new(0.0, -camera.height, 0.0);

        let pixel_delta_u = viewport_u / f64::from(width.max(1));
        let pixel_delta_v = viewport_v / f64::from(height.max(1));

        let viewport_upper_left = ORIGIN + DVec3::Z - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        Self {
            width,
            height,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
        }
    }

    /// Point on the image plane at the center of pixel (`row`, `col`).
    pub fn pixel_center(&self, row: u32, col: u32) -> DVec3 {
        self.pixel00_loc + f64::from(col) * self.pixel_delta_u + f64::from(row) * self.pixel_delta_v
    }

    /// Unit-direction ray from the eye through the center of pixel (`row`, `col`).
    pub fn primary_ray(&self, row: u32, col: u32) -> Ray {
        let direction = (self.pixel_center(row, col) - ORIGIN).normalize();
        Ray::new(ORIGIN, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn test_pixel_centers() {
        let plane = ImagePlane::new(&Camera { width: 2.0, height: 2.0 }, 2, 2);

        assert!((plane.pixel_center(0, 0) - DVec3::new(-0.5, 0.5, 1.0)).length() < TOLERANCE);
        assert!((plane.pixel_center(0, 1) - DVec3::new(0.5, 0.5, 1.0)).length() < TOLERANCE);
        assert!((plane.pixel_center(1, 0) - DVec3::new(-0.5, -0.5, 1.0)).length() < TOLERANCE);
        assert!((plane.pixel_center(1, 1) - DVec3::new(0.5, -0.5, 1.0)).length() < TOLERANCE);
    }

    #[test]
    fn test_center_ray_points_forward() {
        let plane = ImagePlane::new(&Camera { width: 1.0, height: 1.0 }, 3, 3);
        let ray = plane.primary_ray(1, 1);

        assert_eq!(ray.origin, ORIGIN);
        assert!((ray.direction - DVec3::Z).length() < TOLERANCE);
    }

    #[test]
    fn test_top_row_looks_up() {
        let plane = ImagePlane::new(&Camera { width: 4.0, height: 2.0 }, 40, 20);

        let top = plane.primary_ray(0, 20);
        let bottom = plane.primary_ray(19, 20);
        assert!(top.direction.y > 0.0);
        assert!(bottom.direction.y < 0.0);
        assert!((top.direction.length() - 1.0).abs() < TOLERANCE);

        let left = plane.primary_ray(10, 0);
        assert!(left.direction.x < 0.0);
    }
}
