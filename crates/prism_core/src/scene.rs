//! The scene container.
//!
//! A [`Scene`] is an ordered list of objects with a fixed upper bound on its
//! size. It is filled once by the loader (or by hand in tests) and then only
//! read: the renderer borrows it immutably for the whole frame.

use thiserror::Error;

use crate::object::{Camera, Light, Object};

/// Errors raised while building a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Scene is full: capacity is {capacity} objects")]
    CapacityExceeded { capacity: usize },
}

/// Ordered sequence of scene objects.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Objects in file order. Indices are stable for the life of the scene.
    objects: Vec<Object>,

    /// Maximum number of objects
    capacity: usize,

    /// Scene name (usually from filename)
    pub name: String,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("untitled")
    }
}

impl Scene {
    /// Object limit used by [`Scene::new`].
    pub const DEFAULT_CAPACITY: usize = 128;

    /// Create an empty scene holding at most [`Scene::DEFAULT_CAPACITY`] objects.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_capacity(name, Self::DEFAULT_CAPACITY)
    }

    /// Create an empty scene with a custom object limit.
    pub fn with_capacity(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            objects: Vec::new(),
            capacity,
            name: name.into(),
        }
    }

    /// Append an object and return its index.
    pub fn push(&mut self, object: Object) -> Result<usize, SceneError> {
        if self.objects.len() >= self.capacity {
            return Err(SceneError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        let index = self.objects.len();
        self.objects.push(object);
        Ok(index)
    }

    /// Builder-style [`Scene::push`].
    pub fn with(mut self, object: Object) -> Result<Self, SceneError> {
        self.push(object)?;
        Ok(self)
    }

    /// All objects in order.
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Get an object by index.
    pub fn get(&self, index: usize) -> Option<&Object> {
        self.objects.get(index)
    }

    /// Get object count.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Get the object limit.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// First camera in the scene, if any.
    pub fn camera(&self) -> Option<&Camera> {
        self.objects.iter().find_map(Object::as_camera)
    }

    /// Iterate over every light.
    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.objects.iter().filter_map(Object::as_light)
    }

    /// Iterate over objects rays can hit, with their scene indices.
    pub fn geometry(&self) -> impl Iterator<Item = (usize, &Object)> {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, object)| object.is_geometry())
    }
}
