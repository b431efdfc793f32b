//! Scene object types.
//!
//! An [`Object`] is a [`Surface`] envelope (the optical properties every
//! object carries) wrapped around a [`Shape`] that holds the per-kind
//! geometry. Matching on the shape is the only way to reach geometry fields,
//! so a sphere's radius can never be read off a plane.

use prism_math::{Color, DVec3};

/// Default Phong exponent for the specular highlight.
pub const DEFAULT_SHININESS: f64 = 20.0;

/// Optical properties shared by every object kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    /// Diffuse color (RGB, 0-1)
    pub diffuse_color: Color,

    /// Specular color (RGB, 0-1)
    pub specular_color: Color,

    /// Weight of the recursively traced mirror ray (0-1)
    pub reflectivity: f64,

    /// Weight of the recursively traced transmitted ray (0-1)
    pub refractivity: f64,

    /// Index of refraction (>= 1)
    pub ior: f64,

    /// Phong exponent of the specular term
    pub shininess: f64,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            diffuse_color: Color::ZERO,
            specular_color: Color::ZERO,
            reflectivity: 0.0,
            refractivity: 0.0,
            ior: 1.0,
            shininess: DEFAULT_SHININESS,
        }
    }
}

impl Surface {
    /// Create a matte surface with just a diffuse color.
    pub fn diffuse(diffuse_color: Color) -> Self {
        Self {
            diffuse_color,
            ..Default::default()
        }
    }

    /// Set the specular color.
    pub fn with_specular(mut self, specular_color: Color) -> Self {
        self.specular_color = specular_color;
        self
    }

    /// Set the reflectivity coefficient.
    pub fn with_reflectivity(mut self, reflectivity: f64) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    /// Set the refractivity coefficient and index of refraction.
    pub fn with_refraction(mut self, refractivity: f64, ior: f64) -> Self {
        self.refractivity = refractivity;
        self.ior = ior;
        self
    }

    /// Set the Phong exponent.
    pub fn with_shininess(mut self, shininess: f64) -> Self {
        self.shininess = shininess;
        self
    }

    /// Weight left for the locally lit color once the recursive terms are
    /// taken out.
    pub fn local_weight(&self) -> f64 {
        (1.0 - self.reflectivity - self.refractivity).max(0.0)
    }
}

/// A sphere primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: DVec3,
    pub radius: f64,
}

/// An infinite plane through `center` with unit `normal`.
///
/// `width` and `height` come from the scene file and are kept as metadata;
/// intersection does not clip against them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub center: DVec3,
    pub width: f64,
    pub height: f64,
    pub normal: DVec3,
}

/// Pinhole camera at the origin, looking down +Z.
///
/// `width` and `height` size the image plane at unit distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub width: f64,
    pub height: f64,
}

/// Point light or spotlight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: DVec3,
    pub color: Color,
    /// Spotlight axis (unit length). `None` for point lights.
    pub direction: Option<DVec3>,
    /// Spotlight half-angle in radians, 0 for an omnidirectional light.
    pub theta: f64,
    /// Constant radial attenuation coefficient
    pub radial_a0: f64,
    /// Linear radial attenuation coefficient
    pub radial_a1: f64,
    /// Quadratic radial attenuation coefficient
    pub radial_a2: f64,
    /// Angular falloff exponent
    pub angular_a0: f64,
}

impl Light {
    /// Unattenuated point light.
    pub fn point(position: DVec3, color: Color) -> Self {
        Self {
            position,
            color,
            direction: None,
            theta: 0.0,
            radial_a0: 1.0,
            radial_a1: 0.0,
            radial_a2: 0.0,
            angular_a0: 0.0,
        }
    }

    /// Turn this light into a spotlight along `direction` with half-angle
    /// `theta` (radians).
    pub fn with_spot(mut self, direction: DVec3, theta: f64, angular_a0: f64) -> Self {
        self.direction = direction.try_normalize();
        self.theta = theta;
        self.angular_a0 = angular_a0;
        self
    }

    /// Set the radial attenuation coefficients.
    pub fn with_radial(mut self, a0: f64, a1: f64, a2: f64) -> Self {
        self.radial_a0 = a0;
        self.radial_a1 = a1;
        self.radial_a2 = a2;
        self
    }

    /// Whether the light is restricted to a cone.
    pub fn is_spot(&self) -> bool {
        self.theta != 0.0 && self.direction.is_some()
    }
}

/// Per-kind geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Camera(Camera),
    Light(Light),
}

impl Shape {
    /// Lower-case kind name as it appears in scene files.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Sphere(_) => "sphere",
            Shape::Plane(_) => "plane",
            Shape::Camera(_) => "camera",
            Shape::Light(_) => "light",
        }
    }
}

/// A scene entry: optical envelope plus geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    pub surface: Surface,
    pub shape: Shape,
}

impl Object {
    pub fn new(shape: Shape, surface: Surface) -> Self {
        Self { surface, shape }
    }

    pub fn sphere(center: DVec3, radius: f64, surface: Surface) -> Self {
        Self::new(Shape::Sphere(Sphere { center, radius }), surface)
    }

    /// Plane with unbounded extent. `normal` is normalized here; a zero
    /// normal is kept as-is and will never be hit.
    pub fn plane(center: DVec3, normal: DVec3, surface: Surface) -> Self {
        let normal = normal.try_normalize().unwrap_or(normal);
        Self::new(
            Shape::Plane(Plane {
                center,
                width: 0.0,
                height: 0.0,
                normal,
            }),
            surface,
        )
    }

    pub fn camera(width: f64, height: f64) -> Self {
        Self::new(Shape::Camera(Camera { width, height }), Surface::default())
    }

    pub fn light(light: Light) -> Self {
        Self::new(Shape::Light(light), Surface::default())
    }

    /// Lower-case kind name as it appears in scene files.
    pub fn kind(&self) -> &'static str {
        self.shape.kind()
    }

    /// Whether rays can hit this object. Cameras and lights are invisible.
    pub fn is_geometry(&self) -> bool {
        matches!(self.shape, Shape::Sphere(_) | Shape::Plane(_))
    }

    pub fn as_light(&self) -> Option<&Light> {
        match &self.shape {
            Shape::Light(light) => Some(light),
            _ => None,
        }
    }

    pub fn as_camera(&self) -> Option<&Camera> {
        match &self.shape {
            Shape::Camera(camera) => Some(camera),
            _ => None,
        }
    }
}
