//! Computational node, face and cell wrappers.

use std::collections::HashMap;

use thiserror::Error;

use crate::boundary::BoundaryCondition;
use crate::molecule::{ComputationalVariable, FluxMolecule, Molecule};
use crate::types::{CellIndex, FaceIndex, MeshId, NodeIndex};

/// Error type for entity-level lookups.
///
/// These are precondition violations: asking an entity for a quantity that
/// was never registered on it indicates a caller or evaluator bug, not a
/// recoverable condition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntityError {
    /// No molecule/variable registered under this name on the entity.
    #[error("no variable named {name:?} on {entity} {mesh_id}")]
    UnknownVariable {
        entity: &'static str,
        mesh_id: MeshId,
        name: String,
    },
}

impl EntityError {
    fn unknown(entity: &'static str, mesh_id: MeshId, name: &str) -> Self {
        Self::UnknownVariable {
            entity,
            mesh_id,
            name: name.to_owned(),
        }
    }
}

/// Computational wrapper around a geometric node.
#[derive(Debug, Clone)]
pub struct ComputationalNode {
    index: NodeIndex,
    mesh_id: MeshId,
    on_boundary: bool,
    location: (f64, f64),
    molecules: HashMap<String, Molecule>,
}

impl ComputationalNode {
    pub(crate) fn new(
        index: NodeIndex,
        mesh_id: MeshId,
        on_boundary: bool,
        location: (f64, f64),
    ) -> Self {
        Self {
            index,
            mesh_id,
            on_boundary,
            location,
            molecules: HashMap::new(),
        }
    }

    /// Dense index of the underlying geometric node.
    pub fn geometric(&self) -> NodeIndex {
        self.index
    }

    /// Mesh id of the underlying geometric node.
    pub fn mesh_id(&self) -> MeshId {
        self.mesh_id
    }

    /// Whether the node lies on the domain boundary.
    pub fn on_boundary(&self) -> bool {
        self.on_boundary
    }

    /// Node coordinates.
    pub fn location(&self) -> (f64, f64) {
        self.location
    }

    pub(crate) fn add_molecule(&mut self, name: &str) {
        self.molecules
            .entry(name.to_owned())
            .or_insert_with(Molecule::new);
    }

    /// The molecule for quantity `name`.
    pub fn molecule(&self, name: &str) -> Result<&Molecule, EntityError> {
        self.molecules
            .get(name)
            .ok_or_else(|| EntityError::unknown("node", self.mesh_id, name))
    }

    /// Mutable access to the molecule for quantity `name`.
    pub fn molecule_mut(&mut self, name: &str) -> Result<&mut Molecule, EntityError> {
        let mesh_id = self.mesh_id;
        self.molecules
            .get_mut(name)
            .ok_or_else(|| EntityError::unknown("node", mesh_id, name))
    }
}

/// Computational wrapper around a geometric face.
///
/// Holds exactly two computational nodes (its start and end, mirroring the
/// geometric face), the face geometry needed by flux evaluators, an
/// optional boundary condition and one flux molecule per registered
/// quantity.
#[derive(Debug, Clone)]
pub struct ComputationalFace {
    index: FaceIndex,
    mesh_id: MeshId,
    on_boundary: bool,
    nodes: [NodeIndex; 2],
    area: f64,
    centroid: (f64, f64),
    normal: (f64, f64),
    boundary_condition: Option<BoundaryCondition>,
    molecules: HashMap<String, FluxMolecule>,
}

impl ComputationalFace {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        index: FaceIndex,
        mesh_id: MeshId,
        on_boundary: bool,
        nodes: [NodeIndex; 2],
        area: f64,
        centroid: (f64, f64),
        normal: (f64, f64),
        boundary_condition: Option<BoundaryCondition>,
    ) -> Self {
        Self {
            index,
            mesh_id,
            on_boundary,
            nodes,
            area,
            centroid,
            normal,
            boundary_condition,
            molecules: HashMap::new(),
        }
    }

    /// Dense index of the underlying geometric face.
    pub fn geometric(&self) -> FaceIndex {
        self.index
    }

    /// Mesh id of the underlying geometric face.
    pub fn mesh_id(&self) -> MeshId {
        self.mesh_id
    }

    /// Whether the face lies on the domain boundary (geometric flag).
    pub fn on_boundary(&self) -> bool {
        self.on_boundary
    }

    /// The start node of the face.
    pub fn start_node(&self) -> NodeIndex {
        self.nodes[0]
    }

    /// The end node of the face.
    pub fn end_node(&self) -> NodeIndex {
        self.nodes[1]
    }

    /// Face area (edge length in 2D).
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Face midpoint.
    pub fn centroid(&self) -> (f64, f64) {
        self.centroid
    }

    /// Unit face normal.
    pub fn normal(&self) -> (f64, f64) {
        self.normal
    }

    /// The boundary condition attached to this face, if any.
    pub fn boundary_condition(&self) -> Option<&BoundaryCondition> {
        self.boundary_condition.as_ref()
    }

    pub(crate) fn add_flux_molecule(&mut self, name: &str) {
        self.molecules
            .entry(name.to_owned())
            .or_insert_with(FluxMolecule::new);
    }

    /// The flux molecule for quantity `name`.
    pub fn flux_molecule(&self, name: &str) -> Result<&FluxMolecule, EntityError> {
        self.molecules
            .get(name)
            .ok_or_else(|| EntityError::unknown("face", self.mesh_id, name))
    }

    /// Mutable access to the flux molecule for quantity `name`.
    pub fn flux_molecule_mut(&mut self, name: &str) -> Result<&mut FluxMolecule, EntityError> {
        let mesh_id = self.mesh_id;
        self.molecules
            .get_mut(name)
            .ok_or_else(|| EntityError::unknown("face", mesh_id, name))
    }
}

/// Computational wrapper around a geometric cell.
///
/// Owns the solved-for variables for the active quantities and the dense
/// linear index used as the cell's row/column position in the external
/// linear system.
#[derive(Debug, Clone)]
pub struct ComputationalCell {
    index: CellIndex,
    mesh_id: MeshId,
    faces: Vec<FaceIndex>,
    centroid: (f64, f64),
    volume: f64,
    variables: HashMap<String, ComputationalVariable>,
    molecules: HashMap<String, Molecule>,
}

impl ComputationalCell {
    pub(crate) fn new(
        index: CellIndex,
        mesh_id: MeshId,
        faces: Vec<FaceIndex>,
        centroid: (f64, f64),
        volume: f64,
    ) -> Self {
        Self {
            index,
            mesh_id,
            faces,
            centroid,
            volume,
            variables: HashMap::new(),
            molecules: HashMap::new(),
        }
    }

    /// Dense index of the underlying geometric cell.
    pub fn geometric(&self) -> CellIndex {
        self.index
    }

    /// Dense linear index: the cell's row/column position in the external
    /// linear system. Assigned in traversal order, starting at zero.
    pub fn linear_index(&self) -> usize {
        self.index.get()
    }

    /// Mesh id of the underlying geometric cell.
    pub fn mesh_id(&self) -> MeshId {
        self.mesh_id
    }

    /// Bounding faces, in definition order.
    pub fn faces(&self) -> &[FaceIndex] {
        &self.faces
    }

    /// Cell centroid.
    pub fn centroid(&self) -> (f64, f64) {
        self.centroid
    }

    /// Cell volume (polygon area in 2D).
    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub(crate) fn add_variable(&mut self, name: &str) {
        let variable = ComputationalVariable::new(name, self.index);
        self.variables.entry(name.to_owned()).or_insert(variable);
    }

    /// The solved-for variable for active quantity `name` at this cell.
    pub fn variable(&self, name: &str) -> Result<&ComputationalVariable, EntityError> {
        self.variables
            .get(name)
            .ok_or_else(|| EntityError::unknown("cell", self.mesh_id, name))
    }

    pub(crate) fn add_molecule(&mut self, name: &str) {
        self.molecules
            .entry(name.to_owned())
            .or_insert_with(Molecule::new);
    }

    /// The molecule for quantity `name`.
    pub fn molecule(&self, name: &str) -> Result<&Molecule, EntityError> {
        self.molecules
            .get(name)
            .ok_or_else(|| EntityError::unknown("cell", self.mesh_id, name))
    }

    /// Mutable access to the molecule for quantity `name`.
    pub fn molecule_mut(&mut self, name: &str) -> Result<&mut Molecule, EntityError> {
        let mesh_id = self.mesh_id;
        self.molecules
            .get_mut(name)
            .ok_or_else(|| EntityError::unknown("cell", mesh_id, name))
    }
}
