//! Computational mesh construction and the flux-evaluation pass.
//!
//! The builder walks a geometric mesh, wraps every entity in its
//! computational counterpart, seeds the molecules for all registered
//! quantities and then drives the caller-supplied flux evaluators over
//! every (cell, bounding face) pair. Flux physics lives entirely in the
//! evaluators; the builder's job is the traversal order, the once/twice
//! visitation contract and the molecule storage the evaluators write into.
//!
//! Visitation contract: for each active quantity, every cell visits each
//! of its bounding faces exactly once. An interior face is therefore
//! visited twice (once per adjacent cell) and a boundary face once. An
//! evaluator finding the face's flux molecule non-empty must treat the
//! face as already evaluated; this idempotence check is the evaluator's
//! obligation, not the builder's.

use std::collections::HashMap;

use log::{debug, info, warn};
use thiserror::Error;

use crate::accessor::ComputationalGridAccessor;
use crate::boundary::BoundaryConditionRegistry;
use crate::computational::{
    ComputationalCell, ComputationalFace, ComputationalMesh, ComputationalNode,
};
use crate::geometry::Mesh;
use crate::registry::EntityRegistry;
use crate::types::{CellIndex, FaceIndex, NodeIndex};

/// Flux evaluator callback: `(accessor, cell, face) -> bool`.
///
/// Invoked once per (cell, bounding face) pair during the flux pass. The
/// return value is advisory: `false` is logged as a soft failure and does
/// not alter control flow.
pub type FluxEvaluator =
    Box<dyn FnMut(&ComputationalGridAccessor<'_>, &ComputationalCell, &mut ComputationalFace) -> bool>;

/// Cell molecule evaluator callback: `(cell) -> bool`.
///
/// Invoked once per cell after all face-flux evaluation has completed.
/// The return value is advisory, as for [`FluxEvaluator`].
pub type CellEvaluator = Box<dyn FnMut(&mut ComputationalCell) -> bool>;

/// Error type for computational mesh construction.
///
/// Configuration errors are non-retryable: a failed build leaves no usable
/// computational mesh and the builder must be reconfigured.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// `build()` was called with no active variable registered.
    #[error("no active computational variable registered")]
    NoActiveVariables,

    /// `build()` was called with no cell molecule evaluator registered.
    #[error("no cell molecule evaluator registered")]
    NoCellEvaluator,
}

/// Scope of a registered variable name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VariableKind {
    Active,
    PassiveNode,
    PassiveFace,
    PassiveCell,
}

/// Builder producing a [`ComputationalMesh`] from a geometric mesh and a
/// set of boundary conditions.
///
/// Variables are registered while configuring; `build()` consumes the
/// builder. Variable names are globally unique across the active set and
/// all three passive scopes.
///
/// # Example
///
/// ```
/// use fvm2d::builder::ComputationalMeshBuilder;
/// use fvm2d::boundary::BoundaryConditionRegistry;
/// use fvm2d::geometry::MeshBuilder;
/// use fvm2d::types::MeshId;
///
/// let mut geometry = MeshBuilder::new();
/// for (i, x, y) in [(0u64, 0.0, 0.0), (1, 1.0, 0.0), (2, 0.0, 1.0)] {
///     geometry.add_node(MeshId::new(i), true, x, y).unwrap();
/// }
/// geometry.add_face(MeshId::new(0), true, [MeshId::new(0), MeshId::new(1)]).unwrap();
/// geometry.add_face(MeshId::new(1), true, [MeshId::new(1), MeshId::new(2)]).unwrap();
/// geometry.add_face(MeshId::new(2), true, [MeshId::new(2), MeshId::new(0)]).unwrap();
/// geometry.add_cell(MeshId::new(0), &[MeshId::new(0), MeshId::new(1), MeshId::new(2)]).unwrap();
///
/// let mut builder = ComputationalMeshBuilder::new(
///     geometry.finish(),
///     BoundaryConditionRegistry::new(),
/// );
/// builder.add_computational_variable("Temperature", |_, _, _| true);
/// builder.set_cell_molecule_evaluator(|_| true);
///
/// let cmesh = builder.build().unwrap();
/// assert_eq!(cmesh.cells().len(), 1);
/// ```
pub struct ComputationalMeshBuilder {
    mesh: Mesh,
    boundary_conditions: BoundaryConditionRegistry,
    kinds: HashMap<String, VariableKind>,
    /// Active variables with their flux evaluators, in registration order.
    active: Vec<(String, FluxEvaluator)>,
    cell_evaluator: Option<CellEvaluator>,
}

impl ComputationalMeshBuilder {
    /// Create a builder for a geometric mesh and its boundary conditions.
    pub fn new(mesh: Mesh, boundary_conditions: BoundaryConditionRegistry) -> Self {
        Self {
            mesh,
            boundary_conditions,
            kinds: HashMap::new(),
            active: Vec::new(),
            cell_evaluator: None,
        }
    }

    /// Register `name` as an active variable, solved for at every cell.
    ///
    /// The flux evaluator is invoked for every (cell, bounding face) pair
    /// during the flux pass. Re-registering an active name swaps the
    /// evaluator; registering a name already used as a passive variable
    /// fails and changes nothing.
    pub fn add_computational_variable<F>(&mut self, name: &str, flux_evaluator: F) -> bool
    where
        F: FnMut(&ComputationalGridAccessor<'_>, &ComputationalCell, &mut ComputationalFace) -> bool
            + 'static,
    {
        match self.kinds.get(name) {
            Some(VariableKind::Active) => {
                let slot = self
                    .active
                    .iter_mut()
                    .find(|(n, _)| n == name)
                    .expect("active name tracked in kinds but missing from list");
                slot.1 = Box::new(flux_evaluator);
                true
            }
            Some(_) => false,
            None => {
                self.kinds.insert(name.to_owned(), VariableKind::Active);
                self.active.push((name.to_owned(), Box::new(flux_evaluator)));
                true
            }
        }
    }

    /// Register a passive variable tracked on every node.
    pub fn add_passive_node_variable(&mut self, name: &str) -> bool {
        self.add_passive(name, VariableKind::PassiveNode)
    }

    /// Register a passive variable tracked on every face.
    pub fn add_passive_face_variable(&mut self, name: &str) -> bool {
        self.add_passive(name, VariableKind::PassiveFace)
    }

    /// Register a passive variable tracked on every cell.
    pub fn add_passive_cell_variable(&mut self, name: &str) -> bool {
        self.add_passive(name, VariableKind::PassiveCell)
    }

    fn add_passive(&mut self, name: &str, kind: VariableKind) -> bool {
        if self.kinds.contains_key(name) {
            return false;
        }
        self.kinds.insert(name.to_owned(), kind);
        true
    }

    /// Register the per-cell molecule evaluator, invoked once per cell
    /// after all flux evaluation has completed. Repeated calls replace the
    /// previous evaluator.
    pub fn set_cell_molecule_evaluator<F>(&mut self, cell_evaluator: F)
    where
        F: FnMut(&mut ComputationalCell) -> bool + 'static,
    {
        self.cell_evaluator = Some(Box::new(cell_evaluator));
    }

    /// Build the computational mesh.
    ///
    /// Fails if no active variable or no cell evaluator has been
    /// registered. On success the returned mesh is immutable.
    pub fn build(self) -> Result<ComputationalMesh, BuildError> {
        let ComputationalMeshBuilder {
            mesh,
            boundary_conditions,
            kinds,
            mut active,
            cell_evaluator,
        } = self;

        if active.is_empty() {
            return Err(BuildError::NoActiveVariables);
        }
        let mut cell_evaluator = cell_evaluator.ok_or(BuildError::NoCellEvaluator)?;

        // Wrap every geometric entity, attaching boundary conditions to
        // faces as they are created. Dense indices follow the geometric
        // traversal order.
        let mut node_registry = EntityRegistry::new();
        for (i, node) in mesh.nodes().iter().enumerate() {
            node_registry.register_entity(
                node.mesh_id(),
                ComputationalNode::new(
                    NodeIndex::new(i),
                    node.mesh_id(),
                    node.on_boundary(),
                    node.location(),
                ),
            );
        }

        let mut face_registry = EntityRegistry::new();
        for (i, face) in mesh.faces().iter().enumerate() {
            let bc = boundary_conditions.find(face.mesh_id());
            face_registry.register_entity(
                face.mesh_id(),
                ComputationalFace::new(
                    FaceIndex::new(i),
                    face.mesh_id(),
                    face.on_boundary(),
                    face.nodes(),
                    face.area(),
                    face.centroid(),
                    face.normal(),
                    bc,
                ),
            );
        }

        let mut cell_registry = EntityRegistry::new();
        for (i, cell) in mesh.cells().iter().enumerate() {
            cell_registry.register_entity(
                cell.mesh_id(),
                ComputationalCell::new(
                    CellIndex::new(i),
                    cell.mesh_id(),
                    cell.faces().to_vec(),
                    cell.centroid(),
                    cell.volume(),
                ),
            );
        }

        // Seed molecules: an active quantity gets a variable and a
        // molecule on every cell and a flux molecule on every face; a
        // passive quantity gets a molecule on entities of its scope only.
        for (name, _) in &active {
            for cell in cell_registry.iter_mut() {
                cell.add_variable(name);
                cell.add_molecule(name);
            }
            for face in face_registry.iter_mut() {
                face.add_flux_molecule(name);
            }
        }
        for (name, kind) in &kinds {
            match kind {
                VariableKind::Active => {}
                VariableKind::PassiveNode => {
                    for node in node_registry.iter_mut() {
                        node.add_molecule(name);
                    }
                }
                VariableKind::PassiveFace => {
                    for face in face_registry.iter_mut() {
                        face.add_flux_molecule(name);
                    }
                }
                VariableKind::PassiveCell => {
                    for cell in cell_registry.iter_mut() {
                        cell.add_molecule(name);
                    }
                }
            }
        }

        let nodes = node_registry.into_entities();
        let mut faces = face_registry.into_entities();
        let cells = cell_registry.into_entities();

        debug!(
            "seeded molecules for {} active and {} total variables",
            active.len(),
            kinds.len()
        );

        // Flux pass: for each active quantity, every cell visits each of
        // its bounding faces exactly once. Both adjacent cells of an
        // interior face write into the same flux molecule instance.
        let mut invocations: usize = 0;
        for (name, evaluator) in active.iter_mut() {
            for ci in 0..cells.len() {
                let cell = &cells[ci];
                for &fi in cell.faces() {
                    let accessor = ComputationalGridAccessor::new(&mesh, &cells);
                    let face = &mut faces[fi];
                    invocations += 1;
                    if !evaluator(&accessor, cell, face) {
                        warn!(
                            "flux evaluator for {:?} reported failure at cell {}, face {}",
                            name,
                            cell.mesh_id(),
                            face.mesh_id()
                        );
                    }
                }
            }
        }
        debug!("flux pass complete after {} evaluator invocations", invocations);

        // Cell pass: once per cell, after all flux evaluation.
        let mut cells = cells;
        for cell in cells.iter_mut() {
            if !cell_evaluator(cell) {
                warn!("cell evaluator reported failure at cell {}", cell.mesh_id());
            }
        }

        let cmesh = ComputationalMesh::new(mesh, nodes, faces, cells);
        info!(
            "built computational mesh: {} cells, {} faces ({} boundary), {} nodes",
            cmesh.cells().len(),
            cmesh.faces().len(),
            cmesh.face_thread(crate::computational::Partition::Boundary).len(),
            cmesh.nodes().len()
        );
        Ok(cmesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryConditionKind;
    use crate::computational::Partition;
    use crate::geometry::MeshBuilder;
    use crate::types::MeshId;
    use std::cell::Cell as StdCell;
    use std::rc::Rc;

    fn id(v: u64) -> MeshId {
        MeshId::new(v)
    }

    /// Unit square split along the diagonal into two triangles:
    /// 4 boundary faces, 1 interior face, 2 cells.
    fn two_triangle_square() -> Mesh {
        let mut builder = MeshBuilder::new();
        for (i, x, y) in [(0u64, 0.0, 0.0), (1, 1.0, 0.0), (2, 1.0, 1.0), (3, 0.0, 1.0)] {
            builder.add_node(id(i), true, x, y).unwrap();
        }
        builder.add_face(id(0), true, [id(0), id(1)]).unwrap();
        builder.add_face(id(1), true, [id(1), id(2)]).unwrap();
        builder.add_face(id(2), true, [id(2), id(3)]).unwrap();
        builder.add_face(id(3), true, [id(3), id(0)]).unwrap();
        builder.add_face(id(4), false, [id(0), id(2)]).unwrap();
        builder.add_cell(id(0), &[id(0), id(1), id(4)]).unwrap();
        builder.add_cell(id(1), &[id(4), id(2), id(3)]).unwrap();
        builder.finish()
    }

    fn wall_conditions() -> BoundaryConditionRegistry {
        let mut bcs = BoundaryConditionRegistry::new();
        for i in 0..4 {
            bcs.add(id(i), BoundaryConditionKind::Dirichlet, 0.0);
        }
        bcs
    }

    #[test]
    fn test_build_without_active_variable_fails() {
        let mut builder =
            ComputationalMeshBuilder::new(two_triangle_square(), wall_conditions());
        builder.set_cell_molecule_evaluator(|_| true);
        assert_eq!(builder.build().unwrap_err(), BuildError::NoActiveVariables);
    }

    #[test]
    fn test_build_without_cell_evaluator_fails() {
        let mut builder =
            ComputationalMeshBuilder::new(two_triangle_square(), wall_conditions());
        builder.add_computational_variable("Temperature", |_, _, _| true);
        assert_eq!(builder.build().unwrap_err(), BuildError::NoCellEvaluator);
    }

    #[test]
    fn test_flux_invocation_count() {
        let mut builder =
            ComputationalMeshBuilder::new(two_triangle_square(), wall_conditions());

        let count = Rc::new(StdCell::new(0u32));
        let counter = Rc::clone(&count);
        builder.add_computational_variable("Temperature", move |_, _, _| {
            counter.set(counter.get() + 1);
            true
        });
        builder.set_cell_molecule_evaluator(|_| true);
        builder.build().unwrap();

        // 1 interior face visited twice + 4 boundary faces visited once.
        assert_eq!(count.get(), 6);
    }

    #[test]
    fn test_cell_evaluator_runs_once_per_cell() {
        let mut builder =
            ComputationalMeshBuilder::new(two_triangle_square(), wall_conditions());
        builder.add_computational_variable("Temperature", |_, _, _| true);

        let count = Rc::new(StdCell::new(0u32));
        let counter = Rc::clone(&count);
        builder.set_cell_molecule_evaluator(move |_| {
            counter.set(counter.get() + 1);
            // Advisory failure must not abort the build.
            false
        });
        let cmesh = builder.build().unwrap();
        assert_eq!(count.get(), 2);
        assert_eq!(cmesh.cells().len(), 2);
    }

    #[test]
    fn test_reregistering_active_variable_swaps_evaluator() {
        let mut builder =
            ComputationalMeshBuilder::new(two_triangle_square(), wall_conditions());

        let first = Rc::new(StdCell::new(0u32));
        let counter = Rc::clone(&first);
        assert!(builder.add_computational_variable("Temperature", move |_, _, _| {
            counter.set(counter.get() + 1);
            true
        }));

        let second = Rc::new(StdCell::new(0u32));
        let counter = Rc::clone(&second);
        assert!(builder.add_computational_variable("Temperature", move |_, _, _| {
            counter.set(counter.get() + 1);
            true
        }));

        builder.set_cell_molecule_evaluator(|_| true);
        builder.build().unwrap();

        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 6);
    }

    #[test]
    fn test_passive_name_collisions() {
        let mut builder =
            ComputationalMeshBuilder::new(two_triangle_square(), wall_conditions());
        builder.add_computational_variable("Temperature", |_, _, _| true);

        // Passive name colliding with the active variable.
        assert!(!builder.add_passive_node_variable("Temperature"));
        assert!(!builder.add_passive_face_variable("Temperature"));
        assert!(!builder.add_passive_cell_variable("Temperature"));

        // Fresh passive name: first scope wins, any scope reuse fails.
        assert!(builder.add_passive_node_variable("Pressure"));
        assert!(!builder.add_passive_node_variable("Pressure"));
        assert!(!builder.add_passive_face_variable("Pressure"));
        assert!(!builder.add_passive_cell_variable("Pressure"));

        // An active registration cannot take over a passive name.
        assert!(!builder.add_computational_variable("Pressure", |_, _, _| true));
    }

    #[test]
    fn test_face_partition_follows_boundary_conditions() {
        let mut builder =
            ComputationalMeshBuilder::new(two_triangle_square(), wall_conditions());
        builder.add_computational_variable("Temperature", |_, _, _| true);
        builder.set_cell_molecule_evaluator(|_| true);
        let cmesh = builder.build().unwrap();

        assert_eq!(cmesh.face_thread(Partition::Boundary).len(), 4);
        assert_eq!(cmesh.face_thread(Partition::Interior).len(), 1);
        assert_eq!(cmesh.cell_thread().len(), 2);
    }
}
