//! Boundary conditions for mesh faces.
//!
//! Each boundary face can carry at most one condition, registered once
//! before the computational mesh is built. The registry is write-once per
//! face: a second registration for the same face is rejected and leaves
//! the existing entry untouched.

use std::collections::HashMap;

use crate::types::MeshId;

/// Kind of a boundary condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryConditionKind {
    /// Prescribed value at the boundary.
    Dirichlet,

    /// Prescribed flux through the boundary.
    Neumann,
}

impl BoundaryConditionKind {
    /// Check if this is a Dirichlet condition.
    pub fn is_dirichlet(&self) -> bool {
        matches!(self, BoundaryConditionKind::Dirichlet)
    }

    /// Check if this is a Neumann condition.
    pub fn is_neumann(&self) -> bool {
        matches!(self, BoundaryConditionKind::Neumann)
    }
}

/// Immutable (kind, value) pair attached to one boundary face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryCondition {
    kind: BoundaryConditionKind,
    value: f64,
}

impl BoundaryCondition {
    /// Create a new boundary condition.
    pub fn new(kind: BoundaryConditionKind, value: f64) -> Self {
        Self { kind, value }
    }

    /// The condition kind.
    pub fn kind(&self) -> BoundaryConditionKind {
        self.kind
    }

    /// The prescribed value (meaning depends on the kind).
    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Write-once registry of boundary conditions, keyed by face mesh id.
#[derive(Debug, Clone, Default)]
pub struct BoundaryConditionRegistry {
    conditions: HashMap<MeshId, BoundaryCondition>,
}

impl BoundaryConditionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            conditions: HashMap::new(),
        }
    }

    /// Register a condition for a face.
    ///
    /// Returns `false` and leaves the registry unchanged if a condition
    /// already exists for `face_id`.
    pub fn add(&mut self, face_id: MeshId, kind: BoundaryConditionKind, value: f64) -> bool {
        if self.conditions.contains_key(&face_id) {
            return false;
        }
        self.conditions
            .insert(face_id, BoundaryCondition::new(kind, value));
        true
    }

    /// Find the condition registered for a face, if any.
    pub fn find(&self, face_id: MeshId) -> Option<BoundaryCondition> {
        self.conditions.get(&face_id).copied()
    }

    /// Number of registered conditions.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Check whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
