//! JSON scene loading.
//!
//! A scene file is a JSON array of objects, each tagged with a `"type"` of
//! `camera`, `sphere`, `plane` or `light`:
//!
//! ```json
//! [
//!   { "type": "camera", "width": 2.0, "height": 2.0 },
//!   { "type": "sphere", "position": [0, 1, 5], "radius": 2,
//!     "diffuse_color": [1, 0, 0], "specular_color": [1, 1, 1],
//!     "reflectivity": 0.2 },
//!   { "type": "plane", "position": [0, -1, 0], "normal": [0, 1, 0],
//!     "diffuse_color": [0, 0, 1] },
//!   { "type": "light", "position": [1, 3, 2], "color": [2, 2, 2],
//!     "radial-a0": 0.125, "radial-a1": 0.125, "radial-a2": 0.125,
//!     "theta": 0 }
//! ]
//! ```
//!
//! Spotlight `theta` is given in degrees. Every field is checked against the
//! object's kind before the scene is handed to the renderer, so the renderer
//! can assume a well-formed scene.

use std::path::Path;

use log::{debug, info, warn};
use prism_math::{Color, DVec3};
use serde::Deserialize;
use thiserror::Error;

use crate::object::{Camera, Light, Object, Plane, Shape, Sphere, Surface, DEFAULT_SHININESS};
use crate::scene::{Scene, SceneError};

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Object {index}: unknown type \"{kind}\"")]
    UnknownType { index: usize, kind: String },

    #[error("Object {index} ({kind}): missing required field \"{field}\"")]
    MissingField {
        index: usize,
        kind: &'static str,
        field: &'static str,
    },

    #[error("Object {index} ({kind}): invalid \"{field}\": {reason}")]
    InvalidValue {
        index: usize,
        kind: &'static str,
        field: &'static str,
        reason: String,
    },

    #[error("Scene has no camera")]
    NoCamera,

    #[error("Scene has more than one camera (objects {first} and {second})")]
    MultipleCameras { first: usize, second: usize },

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Raw object as written in the file. Which fields are required depends on
/// `kind`, so everything is optional here and checked in [`build_object`].
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct ObjectDescription {
    #[serde(rename = "type")]
    kind: String,

    width: Option<f64>,
    height: Option<f64>,

    #[serde(alias = "center")]
    position: Option<[f64; 3]>,
    radius: Option<f64>,
    normal: Option<[f64; 3]>,

    color: Option<[f64; 3]>,
    diffuse_color: Option<[f64; 3]>,
    specular_color: Option<[f64; 3]>,
    reflectivity: Option<f64>,
    refractivity: Option<f64>,
    ior: Option<f64>,
    #[serde(alias = "shininess")]
    ns: Option<f64>,

    direction: Option<[f64; 3]>,
    theta: Option<f64>,
    #[serde(rename = "radial-a0", alias = "radial_a0")]
    radial_a0: Option<f64>,
    #[serde(rename = "radial-a1", alias = "radial_a1")]
    radial_a1: Option<f64>,
    #[serde(rename = "radial-a2", alias = "radial_a2")]
    radial_a2: Option<f64>,
    #[serde(rename = "angular-a0", alias = "angular_a0")]
    angular_a0: Option<f64>,
}

/// Load a scene file from disk.
///
/// The scene is named after the file stem.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");

    let json = std::fs::read_to_string(path)?;
    parse_scene(name, &json)
}

/// Load a scene from a JSON string.
pub fn load_scene_from_str(json: &str) -> LoadResult<Scene> {
    parse_scene("untitled", json)
}

fn parse_scene(name: &str, json: &str) -> LoadResult<Scene> {
    let descriptions: Vec<ObjectDescription> = serde_json::from_str(json)?;

    let mut scene = Scene::new(name);
    let mut camera_index: Option<usize> = None;

    for (index, description) in descriptions.iter().enumerate() {
        let object = build_object(index, description)?;

        if object.as_camera().is_some() {
            if let Some(first) = camera_index {
                return Err(LoadError::MultipleCameras {
                    first,
                    second: index,
                });
            }
            camera_index = Some(index);
        }

        debug!("Object {}: {}", index, object.kind());
        scene.push(object)?;
    }

    if camera_index.is_none() {
        return Err(LoadError::NoCamera);
    }

    let light_count = scene.lights().count();
    if light_count == 0 {
        warn!("Scene '{}' has no lights; lit surfaces will render black", scene.name);
    }

    info!(
        "Loaded scene '{}': {} objects ({} lights)",
        scene.name,
        scene.len(),
        light_count
    );

    Ok(scene)
}

/// Field checks for one object, carrying its index and kind for errors.
struct Checker {
    index: usize,
    kind: &'static str,
}

impl Checker {
    fn require<T: Copy>(&self, value: Option<T>, field: &'static str) -> LoadResult<T> {
        value.ok_or(LoadError::MissingField {
            index: self.index,
            kind: self.kind,
            field,
        })
    }

    fn invalid(&self, field: &'static str, reason: impl Into<String>) -> LoadError {
        LoadError::InvalidValue {
            index: self.index,
            kind: self.kind,
            field,
            reason: reason.into(),
        }
    }

    fn positive(&self, value: f64, field: &'static str) -> LoadResult<f64> {
        if value > 0.0 && value.is_finite() {
            Ok(value)
        } else {
            Err(self.invalid(field, format!("must be positive, got {}", value)))
        }
    }

    fn unit_range(&self, value: f64, field: &'static str) -> LoadResult<f64> {
        if (0.0..=1.0).contains(&value) {
            Ok(value)
        } else {
            Err(self.invalid(field, format!("must be within [0, 1], got {}", value)))
        }
    }

    fn non_negative(&self, value: f64, field: &'static str) -> LoadResult<f64> {
        if value >= 0.0 && value.is_finite() {
            Ok(value)
        } else {
            Err(self.invalid(field, format!("must not be negative, got {}", value)))
        }
    }

    fn direction(&self, value: [f64; 3], field: &'static str) -> LoadResult<DVec3> {
        let v = DVec3::from_array(value);
        let unit = v
            .try_normalize()
            .ok_or_else(|| self.invalid(field, "must have non-zero length"))?;
        if (v.length() - 1.0).abs() > 1e-6 {
            warn!(
                "Object {} ({}): normalizing {} {:?}",
                self.index, self.kind, field, value
            );
        }
        Ok(unit)
    }
}

fn build_object(index: usize, desc: &ObjectDescription) -> LoadResult<Object> {
    let kind: &'static str = match desc.kind.as_str() {
        "camera" => "camera",
        "sphere" => "sphere",
        "plane" => "plane",
        "light" => "light",
        other => {
            return Err(LoadError::UnknownType {
                index,
                kind: other.to_string(),
            })
        }
    };
    let check = Checker { index, kind };

    let shape = match kind {
        "camera" => Shape::Camera(Camera {
            width: check.positive(check.require(desc.width, "width")?, "width")?,
            height: check.positive(check.require(desc.height, "height")?, "height")?,
        }),
        "sphere" => Shape::Sphere(Sphere {
            center: DVec3::from_array(check.require(desc.position, "position")?),
            radius: check.positive(check.require(desc.radius, "radius")?, "radius")?,
        }),
        "plane" => Shape::Plane(Plane {
            center: DVec3::from_array(check.require(desc.position, "position")?),
            width: check.non_negative(desc.width.unwrap_or(0.0), "width")?,
            height: check.non_negative(desc.height.unwrap_or(0.0), "height")?,
            normal: check.direction(check.require(desc.normal, "normal")?, "normal")?,
        }),
        _ => Shape::Light(build_light(&check, desc)?),
    };

    let surface = match shape {
        Shape::Sphere(_) | Shape::Plane(_) => build_surface(&check, desc)?,
        Shape::Camera(_) | Shape::Light(_) => Surface::default(),
    };

    Ok(Object::new(shape, surface))
}

fn build_surface(check: &Checker, desc: &ObjectDescription) -> LoadResult<Surface> {
    let diffuse = desc.diffuse_color.or(desc.color).unwrap_or([0.0; 3]);
    let specular = desc.specular_color.unwrap_or([0.0; 3]);

    let surface = Surface {
        diffuse_color: Color::from_array(diffuse),
        specular_color: Color::from_array(specular),
        reflectivity: check.unit_range(desc.reflectivity.unwrap_or(0.0), "reflectivity")?,
        refractivity: check.unit_range(desc.refractivity.unwrap_or(0.0), "refractivity")?,
        ior: desc.ior.unwrap_or(1.0),
        shininess: check.non_negative(desc.ns.unwrap_or(DEFAULT_SHININESS), "ns")?,
    };

    if !(surface.ior >= 1.0 && surface.ior.is_finite()) {
        return Err(check.invalid("ior", format!("must be at least 1, got {}", surface.ior)));
    }
    if surface.reflectivity + surface.refractivity > 1.0 {
        warn!(
            "Object {} ({}): reflectivity + refractivity exceeds 1; local lighting is dropped",
            check.index, check.kind
        );
    }

    Ok(surface)
}

fn build_light(check: &Checker, desc: &ObjectDescription) -> LoadResult<Light> {
    let theta_degrees = desc.theta.unwrap_or(0.0);
    if !(0.0..180.0).contains(&theta_degrees) {
        return Err(check.invalid(
            "theta",
            format!("must be within [0, 180) degrees, got {}", theta_degrees),
        ));
    }

    let direction = match desc.direction {
        Some(direction) => Some(check.direction(direction, "direction")?),
        None if theta_degrees != 0.0 => {
            return Err(LoadError::MissingField {
                index: check.index,
                kind: check.kind,
                field: "direction",
            })
        }
        None => None,
    };

    let radial_a0 = check.non_negative(desc.radial_a0.unwrap_or(1.0), "radial-a0")?;
    let radial_a1 = check.non_negative(desc.radial_a1.unwrap_or(0.0), "radial-a1")?;
    let radial_a2 = check.non_negative(desc.radial_a2.unwrap_or(0.0), "radial-a2")?;
    if radial_a0 == 0.0 && radial_a1 == 0.0 && radial_a2 == 0.0 {
        return Err(check.invalid("radial-a0", "radial coefficients cannot all be zero"));
    }

    Ok(Light {
        position: DVec3::from_array(check.require(desc.position, "position")?),
        color: Color::from_array(check.require(desc.color, "color")?),
        direction,
        theta: theta_degrees.to_radians(),
        radial_a0,
        radial_a1,
        radial_a2,
        angular_a0: check.non_negative(desc.angular_a0.unwrap_or(0.0), "angular-a0")?,
    })
}
