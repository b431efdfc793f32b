//! Prism Core - Scene description for the Prism ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Object`, `Surface`, `Shape` and the per-kind
//!   geometry (`Sphere`, `Plane`, `Camera`, `Light`)
//! - **Scene loading**: JSON scene file parsing and validation
//!
//! # Example
//!
//! ```ignore
//! use prism_core::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} objects, {} lights",
//!     scene.len(),
//!     scene.lights().count());
//! ```

pub mod loader;
pub mod object;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};
pub use object::{Camera, Light, Object, Plane, Shape, Sphere, Surface};
pub use scene::{Scene, SceneError};
