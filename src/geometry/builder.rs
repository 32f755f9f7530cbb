//! Programmatic construction of geometric meshes.

use log::debug;
use thiserror::Error;

use super::mesh::{Cell, Face, Mesh, MeshConnectivity, Node};
use crate::registry::EntityRegistry;
use crate::types::{CellIndex, FaceIndex, MeshId, NodeIndex};

/// Error type for geometric mesh construction.
#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    /// A node mesh id was registered twice.
    #[error("node {0} already registered")]
    DuplicateNode(MeshId),

    /// A face mesh id was registered twice.
    #[error("face {0} already registered")]
    DuplicateFace(MeshId),

    /// A cell mesh id was registered twice.
    #[error("cell {0} already registered")]
    DuplicateCell(MeshId),

    /// A face references a node that was never registered.
    #[error("face {face} references unknown node {node}")]
    UnknownNode { face: MeshId, node: MeshId },

    /// A cell references a face that was never registered.
    #[error("cell {cell} references unknown face {face}")]
    UnknownFace { cell: MeshId, face: MeshId },

    /// A 2D cell needs at least three bounding faces.
    #[error("cell {cell} has only {count} faces")]
    TooFewFaces { cell: MeshId, count: usize },

    /// The faces of a cell do not close into a single loop.
    #[error("faces of cell {0} do not form a closed boundary")]
    OpenCellBoundary(MeshId),

    /// A cell with zero area.
    #[error("cell {0} has zero area")]
    DegenerateCell(MeshId),

    /// A face referenced by more than two cells. Such a mesh would break
    /// the once-per-side flux visitation contract, so it is rejected here
    /// instead of reaching the flux pass.
    #[error("face {0} is bounded by more than two cells")]
    TooManyCellsAtFace(MeshId),
}

/// Incremental builder for a [`Mesh`].
///
/// Entities are registered bottom-up: nodes first, then faces referencing
/// nodes, then cells referencing faces, all by mesh id. Dense indices are
/// assigned in registration order.
///
/// # Example
///
/// ```
/// use fvm2d::geometry::MeshBuilder;
/// use fvm2d::types::MeshId;
///
/// let mut builder = MeshBuilder::new();
/// for (id, x, y) in [(0u64, 0.0, 0.0), (1, 1.0, 0.0), (2, 0.0, 1.0)] {
///     builder.add_node(MeshId::new(id), true, x, y).unwrap();
/// }
/// builder.add_face(MeshId::new(0), true, [MeshId::new(0), MeshId::new(1)]).unwrap();
/// builder.add_face(MeshId::new(1), true, [MeshId::new(1), MeshId::new(2)]).unwrap();
/// builder.add_face(MeshId::new(2), true, [MeshId::new(2), MeshId::new(0)]).unwrap();
/// builder
///     .add_cell(MeshId::new(0), &[MeshId::new(0), MeshId::new(1), MeshId::new(2)])
///     .unwrap();
///
/// let mesh = builder.finish();
/// assert_eq!(mesh.n_cells(), 1);
/// ```
#[derive(Default)]
pub struct MeshBuilder {
    nodes: EntityRegistry<Node>,
    faces: EntityRegistry<Face>,
    cells: EntityRegistry<Cell>,
    cells_at_face: Vec<Vec<CellIndex>>,
}

impl MeshBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node.
    pub fn add_node(
        &mut self,
        mesh_id: MeshId,
        on_boundary: bool,
        x: f64,
        y: f64,
    ) -> Result<NodeIndex, MeshError> {
        if self.nodes.contains(mesh_id) {
            return Err(MeshError::DuplicateNode(mesh_id));
        }
        let node = Node {
            mesh_id,
            on_boundary,
            location: (x, y),
        };
        Ok(NodeIndex::new(self.nodes.register_entity(mesh_id, node)))
    }

    /// Register a face composed of two previously registered nodes.
    pub fn add_face(
        &mut self,
        mesh_id: MeshId,
        on_boundary: bool,
        node_ids: [MeshId; 2],
    ) -> Result<FaceIndex, MeshError> {
        if self.faces.contains(mesh_id) {
            return Err(MeshError::DuplicateFace(mesh_id));
        }

        let mut nodes = [NodeIndex::new(0); 2];
        for (slot, node_id) in nodes.iter_mut().zip(node_ids) {
            let index = self
                .nodes
                .index_of(node_id)
                .map_err(|_| MeshError::UnknownNode {
                    face: mesh_id,
                    node: node_id,
                })?;
            *slot = NodeIndex::new(index);
        }

        let start = self.nodes.get(nodes[0].get()).unwrap().location;
        let end = self.nodes.get(nodes[1].get()).unwrap().location;
        let area = super::mesh::distance(start, end);
        let centroid = ((start.0 + end.0) / 2.0, (start.1 + end.1) / 2.0);
        let normal = if area > 0.0 {
            ((end.1 - start.1) / area, -(end.0 - start.0) / area)
        } else {
            (0.0, 0.0)
        };

        let face = Face {
            mesh_id,
            on_boundary,
            nodes,
            area,
            centroid,
            normal,
        };
        let index = self.faces.register_entity(mesh_id, face);
        self.cells_at_face.push(Vec::with_capacity(2));
        Ok(FaceIndex::new(index))
    }

    /// Register a cell bounded by previously registered faces.
    pub fn add_cell(
        &mut self,
        mesh_id: MeshId,
        face_ids: &[MeshId],
    ) -> Result<CellIndex, MeshError> {
        if self.cells.contains(mesh_id) {
            return Err(MeshError::DuplicateCell(mesh_id));
        }
        if face_ids.len() < 3 {
            return Err(MeshError::TooFewFaces {
                cell: mesh_id,
                count: face_ids.len(),
            });
        }

        let mut faces = Vec::with_capacity(face_ids.len());
        let mut face_nodes = Vec::with_capacity(face_ids.len());
        for &face_id in face_ids {
            let index = self
                .faces
                .index_of(face_id)
                .map_err(|_| MeshError::UnknownFace {
                    cell: mesh_id,
                    face: face_id,
                })?;
            faces.push(FaceIndex::new(index));
            face_nodes.push(self.faces.get(index).unwrap().nodes);
        }

        let nodes =
            order_cell_nodes(&face_nodes).ok_or(MeshError::OpenCellBoundary(mesh_id))?;
        let points: Vec<(f64, f64)> = nodes
            .iter()
            .map(|&n| self.nodes.get(n.get()).unwrap().location)
            .collect();
        let (centroid, volume) =
            polygon_centroid_area(&points).ok_or(MeshError::DegenerateCell(mesh_id))?;

        // Validate every face before touching any adjacency list, so a
        // rejected cell leaves the connectivity unchanged.
        for &face in &faces {
            if self.cells_at_face[face.get()].len() == 2 {
                let face_id = self.faces.get(face.get()).unwrap().mesh_id;
                return Err(MeshError::TooManyCellsAtFace(face_id));
            }
        }
        let cell_index = CellIndex::new(self.cells.len());
        for &face in &faces {
            self.cells_at_face[face.get()].push(cell_index);
        }

        let cell = Cell {
            mesh_id,
            faces,
            nodes,
            centroid,
            volume,
        };
        self.cells.register_entity(mesh_id, cell);
        Ok(cell_index)
    }

    /// Freeze the builder into a read-only mesh.
    pub fn finish(self) -> Mesh {
        let mesh = Mesh {
            nodes: self.nodes.into_entities(),
            faces: self.faces.into_entities(),
            cells: self.cells.into_entities(),
            connectivity: MeshConnectivity {
                cells_at_face: self.cells_at_face,
            },
        };
        debug!(
            "geometric mesh: {} nodes, {} faces, {} cells",
            mesh.n_nodes(),
            mesh.n_faces(),
            mesh.n_cells()
        );
        mesh
    }
}

/// Chain the unordered bounding faces of a cell into a closed node loop.
///
/// Returns `None` if the faces do not form exactly one closed loop.
fn order_cell_nodes(face_nodes: &[[NodeIndex; 2]]) -> Option<Vec<NodeIndex>> {
    let n = face_nodes.len();
    let mut used = vec![false; n];
    let mut ordered = Vec::with_capacity(n);

    let start = face_nodes[0][0];
    let mut current = start;
    loop {
        ordered.push(current);
        let next_face = (0..n)
            .find(|&i| !used[i] && (face_nodes[i][0] == current || face_nodes[i][1] == current))?;
        used[next_face] = true;
        current = if face_nodes[next_face][0] == current {
            face_nodes[next_face][1]
        } else {
            face_nodes[next_face][0]
        };
        if current == start {
            break;
        }
        if ordered.len() == n {
            // walked every face without closing the loop
            return None;
        }
    }

    if ordered.len() == n {
        Some(ordered)
    } else {
        None
    }
}

/// Centroid and area of a simple polygon (shoelace formula).
///
/// Returns `None` for degenerate (zero-area) polygons. Works for either
/// vertex orientation.
fn polygon_centroid_area(points: &[(f64, f64)]) -> Option<((f64, f64), f64)> {
    let n = points.len();
    let mut twice_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        let cross = p.0 * q.1 - q.0 * p.1;
        twice_area += cross;
        cx += (p.0 + q.0) * cross;
        cy += (p.1 + q.1) * cross;
    }
    if twice_area == 0.0 {
        return None;
    }
    let centroid = (cx / (3.0 * twice_area), cy / (3.0 * twice_area));
    Some((centroid, twice_area.abs() / 2.0))
}
