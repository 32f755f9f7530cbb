//! Computational wrappers around geometric entities.
//!
//! Computational entities decorate geometric nodes, faces and cells with
//! the state the assembly engine works on: named molecules, boundary
//! condition references and, for cells, the solved-for variables and the
//! dense linear index. The finished [`ComputationalMesh`] partitions them
//! into interior/boundary threads.

mod entities;
mod mesh;

pub use entities::{
    ComputationalCell, ComputationalFace, ComputationalNode, EntityError,
};
pub use mesh::{ComputationalMesh, Partition, Thread};
