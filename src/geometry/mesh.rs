//! Geometric entities and the read-only mesh aggregate.

use crate::types::{CellIndex, FaceIndex, MeshId, NodeIndex};

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    (dx * dx + dy * dy).sqrt()
}

/// A mesh node (vertex).
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) mesh_id: MeshId,
    pub(crate) on_boundary: bool,
    pub(crate) location: (f64, f64),
}

impl Node {
    /// The externally assigned mesh id.
    pub fn mesh_id(&self) -> MeshId {
        self.mesh_id
    }

    /// Whether this node lies on the domain boundary.
    pub fn on_boundary(&self) -> bool {
        self.on_boundary
    }

    /// Node coordinates.
    pub fn location(&self) -> (f64, f64) {
        self.location
    }
}

/// A mesh face. In 2D a face is an edge with exactly two nodes.
#[derive(Debug, Clone)]
pub struct Face {
    pub(crate) mesh_id: MeshId,
    pub(crate) on_boundary: bool,
    pub(crate) nodes: [NodeIndex; 2],
    pub(crate) area: f64,
    pub(crate) centroid: (f64, f64),
    pub(crate) normal: (f64, f64),
}

impl Face {
    /// The externally assigned mesh id.
    pub fn mesh_id(&self) -> MeshId {
        self.mesh_id
    }

    /// Whether this face lies on the domain boundary.
    pub fn on_boundary(&self) -> bool {
        self.on_boundary
    }

    /// The two nodes the face is composed of, in definition order.
    pub fn nodes(&self) -> [NodeIndex; 2] {
        self.nodes
    }

    /// Face area (edge length in 2D).
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Face midpoint.
    pub fn centroid(&self) -> (f64, f64) {
        self.centroid
    }

    /// Unit normal, rotated clockwise from the start→end direction.
    pub fn normal(&self) -> (f64, f64) {
        self.normal
    }
}

/// A mesh cell (control volume), bounded by three or more faces.
#[derive(Debug, Clone)]
pub struct Cell {
    pub(crate) mesh_id: MeshId,
    pub(crate) faces: Vec<FaceIndex>,
    pub(crate) nodes: Vec<NodeIndex>,
    pub(crate) centroid: (f64, f64),
    pub(crate) volume: f64,
}

impl Cell {
    /// The externally assigned mesh id.
    pub fn mesh_id(&self) -> MeshId {
        self.mesh_id
    }

    /// Bounding faces, in definition order.
    pub fn faces(&self) -> &[FaceIndex] {
        &self.faces
    }

    /// Cell vertices, ordered along the cell boundary.
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    /// Cell centroid.
    pub fn centroid(&self) -> (f64, f64) {
        self.centroid
    }

    /// Cell volume (polygon area in 2D).
    pub fn volume(&self) -> f64 {
        self.volume
    }
}

/// Face-cell adjacency derived from the cell-face connectivity.
///
/// Every face is bounded by one cell (boundary face) or two cells
/// (interior face); meshes where a face is referenced by more than two
/// cells are rejected at build time.
#[derive(Debug, Clone, Default)]
pub struct MeshConnectivity {
    pub(crate) cells_at_face: Vec<Vec<CellIndex>>,
}

impl MeshConnectivity {
    /// The cells adjacent to a face (one or two).
    pub fn cells_at_face(&self, face: FaceIndex) -> &[CellIndex] {
        &self.cells_at_face[face.get()]
    }

    /// The cell on the opposite side of an interior face from `cell`.
    ///
    /// Returns `None` for boundary faces and for faces not bounding `cell`.
    pub fn other_cell(&self, face: FaceIndex, cell: CellIndex) -> Option<CellIndex> {
        match self.cells_at_face[face.get()].as_slice() {
            [a, b] if *a == cell => Some(*b),
            [a, b] if *b == cell => Some(*a),
            _ => None,
        }
    }
}

/// Read-only geometric mesh: nodes, faces, cells and their adjacency.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub(crate) nodes: Vec<Node>,
    pub(crate) faces: Vec<Face>,
    pub(crate) cells: Vec<Cell>,
    pub(crate) connectivity: MeshConnectivity,
}

impl Mesh {
    /// All nodes, in registration order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All faces, in registration order.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// All cells, in registration order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get a node by dense index.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index]
    }

    /// Get a face by dense index.
    pub fn face(&self, index: FaceIndex) -> &Face {
        &self.faces[index]
    }

    /// Get a cell by dense index.
    pub fn cell(&self, index: CellIndex) -> &Cell {
        &self.cells[index]
    }

    /// Face-cell adjacency.
    pub fn connectivity(&self) -> &MeshConnectivity {
        &self.connectivity
    }

    /// Number of nodes.
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of faces.
    pub fn n_faces(&self) -> usize {
        self.faces.len()
    }

    /// Number of cells.
    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }
}
