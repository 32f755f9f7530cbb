//! # fvm2d
//!
//! A finite-volume mesh construction and flux-molecule assembly library.
//!
//! This crate provides the building blocks for assembling the sparse
//! linear system of a cell-centered finite-volume discretization:
//! - Geometric mesh representation (nodes, faces, cells, connectivity)
//! - Boundary condition registry (Dirichlet, Neumann)
//! - Computational entity wrappers carrying per-quantity molecules
//! - Flux molecules accumulating variable weights and source terms
//! - A builder orchestrating the once/twice-per-face flux pass
//! - A read-only grid accessor for neighbor queries in flux evaluators
//!
//! The crate assembles equations; it does not solve them. A finished
//! [`ComputationalMesh`] exposes one molecule per active quantity per
//! cell, holding that cell's row of the linear system.

pub mod accessor;
pub mod boundary;
pub mod builder;
pub mod computational;
pub mod geometry;
pub mod molecule;
pub mod registry;
pub mod types;

// Re-export main types for convenience
pub use accessor::{ComputationalGridAccessor, GridError};
pub use boundary::{BoundaryCondition, BoundaryConditionKind, BoundaryConditionRegistry};
pub use builder::{BuildError, CellEvaluator, ComputationalMeshBuilder, FluxEvaluator};
pub use computational::{
    ComputationalCell, ComputationalFace, ComputationalMesh, ComputationalNode, EntityError,
    Partition, Thread,
};
pub use geometry::{Mesh, MeshBuilder, MeshError};
pub use molecule::{ComputationalVariable, FluxMolecule, Molecule, SourceTerm};
pub use registry::{EntityRegistry, RegistryError};
pub use types::{CellIndex, FaceIndex, MeshId, NodeIndex};
