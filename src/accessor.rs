//! Read-only grid queries for flux evaluators.

use thiserror::Error;

use crate::computational::{ComputationalCell, ComputationalFace};
use crate::geometry::Mesh;
use crate::types::{CellIndex, FaceIndex};

/// Error type for grid accessor queries.
///
/// Both variants are precondition violations: evaluators must only ask for
/// the neighbor across an interior face of the cell they are evaluating.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// The face has only one adjacent cell.
    #[error("face {0} is a boundary face and has no opposite cell")]
    BoundaryFace(FaceIndex),

    /// The face does not bound the given cell.
    #[error("face {face} does not bound cell {cell}")]
    NotAdjacent { face: FaceIndex, cell: CellIndex },
}

/// Read-only query surface over mesh connectivity, handed to flux
/// evaluators during the flux pass.
///
/// Cross-entity access through the accessor is immutable: evaluators can
/// reach a neighbor's variables but can never mutate another entity's
/// molecules.
pub struct ComputationalGridAccessor<'a> {
    geometry: &'a Mesh,
    cells: &'a [ComputationalCell],
}

impl<'a> ComputationalGridAccessor<'a> {
    pub(crate) fn new(geometry: &'a Mesh, cells: &'a [ComputationalCell]) -> Self {
        Self { geometry, cells }
    }

    /// The geometric mesh.
    pub fn geometry(&self) -> &'a Mesh {
        self.geometry
    }

    /// The cell on the opposite side of an interior face from `cell`.
    ///
    /// Fails with [`GridError::BoundaryFace`] if the face has a single
    /// adjacent cell and with [`GridError::NotAdjacent`] if the face does
    /// not bound `cell`.
    pub fn other_cell(
        &self,
        face: &ComputationalFace,
        cell: &ComputationalCell,
    ) -> Result<&'a ComputationalCell, GridError> {
        let face_index = face.geometric();
        let cell_index = cell.geometric();
        let adjacent = self.geometry.connectivity().cells_at_face(face_index);

        if !adjacent.contains(&cell_index) {
            return Err(GridError::NotAdjacent {
                face: face_index,
                cell: cell_index,
            });
        }
        match self.geometry.connectivity().other_cell(face_index, cell_index) {
            Some(other) => Ok(&self.cells[other.get()]),
            None => Err(GridError::BoundaryFace(face_index)),
        }
    }
}
