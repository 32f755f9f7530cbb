//! Generic entity registry mapping mesh ids to dense indices.
//!
//! Geometric entities arrive with externally assigned mesh ids that are
//! unique but otherwise arbitrary. The registry assigns each entity a
//! dense, zero-based index in first-registration order and backs O(1)
//! lookup by mesh id. Registration order is preserved under iteration, so
//! a given traversal of the source mesh always reproduces the same index
//! assignment: the cell indices assigned here end up as row/column
//! positions in the linear system.

use std::collections::HashMap;

use thiserror::Error;

use crate::types::MeshId;

/// Error type for registry lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// No entity was registered under the given mesh id.
    #[error("no entity registered for mesh id {0}")]
    NotFound(MeshId),
}

/// Store of entities of one kind, indexed both by mesh id and densely.
///
/// # Example
///
/// ```
/// use fvm2d::registry::EntityRegistry;
/// use fvm2d::types::MeshId;
///
/// let mut registry = EntityRegistry::new();
/// let idx = registry.register_entity(MeshId::new(17), "first");
/// assert_eq!(idx, 0);
///
/// // Repeat registration is idempotent and keeps the original entity.
/// let idx = registry.register_entity(MeshId::new(17), "second");
/// assert_eq!(idx, 0);
/// assert_eq!(registry.lookup(MeshId::new(17)), Ok(&"first"));
/// ```
#[derive(Debug, Clone)]
pub struct EntityRegistry<T> {
    entities: Vec<T>,
    mesh_ids: Vec<MeshId>,
    index_by_id: HashMap<MeshId, usize>,
}

// Hand-written so `T` itself needs no `Default`.
impl<T> Default for EntityRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EntityRegistry<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            mesh_ids: Vec::new(),
            index_by_id: HashMap::new(),
        }
    }

    /// Register an entity under `mesh_id` and return its dense index.
    ///
    /// The first registration of a mesh id assigns the next unused index
    /// (starting at 0, strictly increasing). Repeat calls return the
    /// existing index and drop the supplied entity unchanged.
    pub fn register_entity(&mut self, mesh_id: MeshId, entity: T) -> usize {
        if let Some(&index) = self.index_by_id.get(&mesh_id) {
            return index;
        }
        let index = self.entities.len();
        self.entities.push(entity);
        self.mesh_ids.push(mesh_id);
        self.index_by_id.insert(mesh_id, index);
        index
    }

    /// Check whether a mesh id has been registered.
    pub fn contains(&self, mesh_id: MeshId) -> bool {
        self.index_by_id.contains_key(&mesh_id)
    }

    /// Get the dense index assigned to a mesh id.
    pub fn index_of(&self, mesh_id: MeshId) -> Result<usize, RegistryError> {
        self.index_by_id
            .get(&mesh_id)
            .copied()
            .ok_or(RegistryError::NotFound(mesh_id))
    }

    /// Look up an entity by mesh id.
    pub fn lookup(&self, mesh_id: MeshId) -> Result<&T, RegistryError> {
        self.index_of(mesh_id).map(|i| &self.entities[i])
    }

    /// Look up an entity mutably by mesh id.
    pub fn lookup_mut(&mut self, mesh_id: MeshId) -> Result<&mut T, RegistryError> {
        let index = self.index_of(mesh_id)?;
        Ok(&mut self.entities[index])
    }

    /// Get an entity by dense index.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.entities.get(index)
    }

    /// Number of registered entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over `(mesh_id, entity)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (MeshId, &T)> {
        self.mesh_ids.iter().copied().zip(self.entities.iter())
    }

    /// Iterate over entities mutably in registration order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entities.iter_mut()
    }

    /// Freeze the registry into its entities, in registration order.
    pub fn into_entities(self) -> Vec<T> {
        self.entities
    }
}
