//! Geometric mesh layer.
//!
//! The geometric mesh stores:
//! - Node coordinates and boundary flags
//! - Face-node connectivity (each 2D face is an edge with two nodes)
//! - Cell-face connectivity and the derived face-cell adjacency
//! - Precomputed face area/centroid/normal and cell centroid/volume
//!
//! The computational layer walks this structure but never mutates it.
//! Meshes are assembled programmatically through [`MeshBuilder`]; file
//! readers live outside this crate and drive the same builder surface.

mod builder;
mod mesh;

pub use builder::{MeshBuilder, MeshError};
pub use mesh::{distance, Cell, Face, Mesh, MeshConnectivity, Node};
