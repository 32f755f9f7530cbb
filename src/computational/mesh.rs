//! The finished computational mesh and its entity threads.

use super::entities::{ComputationalCell, ComputationalFace, ComputationalNode};
use crate::geometry::{Cell, Mesh};
use crate::types::{CellIndex, FaceIndex, NodeIndex};

/// Interior/boundary classification of an entity thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Partition {
    /// Entities inside the domain.
    Interior,
    /// Entities on the domain boundary.
    Boundary,
}

/// Ordered collection of computational entities of one kind.
///
/// A thread stores dense indices into the mesh's entity store, in
/// traversal order.
#[derive(Debug, Clone, Default)]
pub struct Thread {
    members: Vec<usize>,
}

impl Thread {
    pub(crate) fn new(members: Vec<usize>) -> Self {
        Self { members }
    }

    /// Number of entities in the thread.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check whether the thread is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate over the member indices in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().copied()
    }

    /// The index of the `i`-th member.
    pub fn get(&self, i: usize) -> Option<usize> {
        self.members.get(i).copied()
    }
}

/// The finished, read-only computational mesh.
///
/// Produced by the builder's `build()`; exposes the partitioned entity
/// threads, the geometric mesh it wraps and the geometric↔computational
/// cell mapping. No mutation is exposed, so the mesh can be shared
/// read-only across consumers.
#[derive(Debug)]
pub struct ComputationalMesh {
    geometry: Mesh,
    nodes: Vec<ComputationalNode>,
    faces: Vec<ComputationalFace>,
    cells: Vec<ComputationalCell>,
    interior_nodes: Thread,
    boundary_nodes: Thread,
    interior_faces: Thread,
    boundary_faces: Thread,
    cells_thread: Thread,
}

impl ComputationalMesh {
    pub(crate) fn new(
        geometry: Mesh,
        nodes: Vec<ComputationalNode>,
        faces: Vec<ComputationalFace>,
        cells: Vec<ComputationalCell>,
    ) -> Self {
        // Nodes partition by the geometric boundary flag, faces by whether
        // a boundary condition ended up attached.
        let (boundary_nodes, interior_nodes): (Vec<usize>, Vec<usize>) =
            (0..nodes.len()).partition(|&i| nodes[i].on_boundary());
        let (boundary_faces, interior_faces): (Vec<usize>, Vec<usize>) =
            (0..faces.len()).partition(|&i| faces[i].boundary_condition().is_some());
        let cells_thread = Thread::new((0..cells.len()).collect());

        Self {
            geometry,
            nodes,
            faces,
            cells,
            interior_nodes: Thread::new(interior_nodes),
            boundary_nodes: Thread::new(boundary_nodes),
            interior_faces: Thread::new(interior_faces),
            boundary_faces: Thread::new(boundary_faces),
            cells_thread,
        }
    }

    /// The wrapped geometric mesh.
    pub fn geometry(&self) -> &Mesh {
        &self.geometry
    }

    /// The node thread for a partition.
    pub fn node_thread(&self, partition: Partition) -> &Thread {
        match partition {
            Partition::Interior => &self.interior_nodes,
            Partition::Boundary => &self.boundary_nodes,
        }
    }

    /// The face thread for a partition.
    pub fn face_thread(&self, partition: Partition) -> &Thread {
        match partition {
            Partition::Interior => &self.interior_faces,
            Partition::Boundary => &self.boundary_faces,
        }
    }

    /// The cell thread (cells are not partitioned).
    pub fn cell_thread(&self) -> &Thread {
        &self.cells_thread
    }

    /// Get a computational node by dense index.
    pub fn node(&self, index: NodeIndex) -> &ComputationalNode {
        &self.nodes[index.get()]
    }

    /// Get a computational face by dense index.
    pub fn face(&self, index: FaceIndex) -> &ComputationalFace {
        &self.faces[index.get()]
    }

    /// Get a computational cell by dense index.
    pub fn cell(&self, index: CellIndex) -> &ComputationalCell {
        &self.cells[index.get()]
    }

    /// All computational nodes, in traversal order.
    pub fn nodes(&self) -> &[ComputationalNode] {
        &self.nodes
    }

    /// All computational faces, in traversal order.
    pub fn faces(&self) -> &[ComputationalFace] {
        &self.faces
    }

    /// All computational cells, in traversal order.
    pub fn cells(&self) -> &[ComputationalCell] {
        &self.cells
    }

    /// The computational cell wrapping a geometric cell.
    pub fn computational_cell(&self, geometric: CellIndex) -> &ComputationalCell {
        &self.cells[geometric.get()]
    }

    /// The geometric cell wrapped by a computational cell.
    pub fn geometric_cell(&self, cell: &ComputationalCell) -> &Cell {
        self.geometry.cell(cell.geometric())
    }

    /// Iterate over the nodes of a partition.
    pub fn nodes_in(&self, partition: Partition) -> impl Iterator<Item = &ComputationalNode> {
        self.node_thread(partition).iter().map(|i| &self.nodes[i])
    }

    /// Iterate over the faces of a partition.
    pub fn faces_in(&self, partition: Partition) -> impl Iterator<Item = &ComputationalFace> {
        self.face_thread(partition).iter().map(|i| &self.faces[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_accessors() {
        let thread = Thread::new(vec![3, 1, 4]);
        assert_eq!(thread.len(), 3);
        assert!(!thread.is_empty());
        assert_eq!(thread.get(0), Some(3));
        assert_eq!(thread.get(3), None);
        assert_eq!(thread.iter().collect::<Vec<_>>(), vec![3, 1, 4]);
    }

    #[test]
    fn test_empty_thread() {
        let thread = Thread::default();
        assert_eq!(thread.len(), 0);
        assert!(thread.is_empty());
    }
}
