//! Structure registry for managing the structures of a scene.

use crate::error::{CalibscopeError, Result};
use crate::structure::Structure;

/// Ordered collection of the structures in a scene.
///
/// Insertion order is preserved so that structures built from a document
/// keep document order. Names are not required to be unique; lookups by
/// name return the first match.
#[derive(Default)]
pub struct Registry {
    structures: Vec<Box<dyn Structure>>,
}

impl Registry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a structure and returns its index.
    pub fn register(&mut self, structure: Box<dyn Structure>) -> usize {
        log::debug!(
            "registering {} '{}'",
            structure.type_name(),
            structure.name()
        );
        self.structures.push(structure);
        self.structures.len() - 1
    }

    /// Gets a reference to the first structure with the given type and name.
    pub fn get(&self, type_name: &str, name: &str) -> Option<&dyn Structure> {
        self.structures
            .iter()
            .find(|s| s.type_name() == type_name && s.name() == name)
            .map(AsRef::as_ref)
    }

    /// Gets the first structure of type `T` with the given name.
    pub fn get_as<T: Structure>(&self, name: &str) -> Option<&T> {
        self.structures
            .iter()
            .filter(|s| s.name() == name)
            .find_map(|s| s.as_any().downcast_ref::<T>())
    }

    /// Like [`Registry::get_as`], but reports a missing structure as an error.
    pub fn require_as<T: Structure>(&self, name: &str) -> Result<&T> {
        self.get_as(name)
            .ok_or_else(|| CalibscopeError::StructureNotFound(name.to_string()))
    }

    /// Checks if a structure with the given type and name exists.
    pub fn contains(&self, type_name: &str, name: &str) -> bool {
        self.get(type_name, name).is_some()
    }

    /// Removes the first structure with the given type and name.
    pub fn remove(&mut self, type_name: &str, name: &str) -> Option<Box<dyn Structure>> {
        let idx = self
            .structures
            .iter()
            .position(|s| s.type_name() == type_name && s.name() == name)?;
        Some(self.structures.remove(idx))
    }

    /// Removes all structures from the registry.
    pub fn clear(&mut self) {
        self.structures.clear();
    }

    /// Returns an iterator over all structures.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Structure> {
        self.structures.iter().map(AsRef::as_ref)
    }

    /// Returns all structures of type `T`, in registration order.
    pub fn iter_as<T: Structure>(&self) -> impl Iterator<Item = &T> {
        self.structures
            .iter()
            .filter_map(|s| s.as_any().downcast_ref::<T>())
    }

    /// Returns mutable references to all structures of type `T`.
    pub fn iter_as_mut<T: Structure>(&mut self) -> impl Iterator<Item = &mut T> {
        self.structures
            .iter_mut()
            .filter_map(|s| s.as_any_mut().downcast_mut::<T>())
    }

    /// Returns the total number of registered structures.
    pub fn len(&self) -> usize {
        self.structures.len()
    }

    /// Returns true if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }
}
