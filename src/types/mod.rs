//! Strongly-typed identifiers and indices.
//!
//! Two distinct addressing schemes coexist in a finite-volume mesh:
//!
//! - [`MeshId`]: the externally stable identifier an entity carries in its
//!   source definition. Faces reference the nodes they are composed of by
//!   mesh id, boundary conditions are keyed by face mesh id.
//! - [`NodeIndex`] / [`FaceIndex`] / [`CellIndex`]: dense, zero-based
//!   indices assigned internally in registration order. The cell index
//!   doubles as the row/column position in the assembled linear system.
//!
//! Keeping them as separate newtypes prevents accidentally using one where
//! the other is expected.

mod indices;

pub use indices::{CellIndex, FaceIndex, MeshId, NodeIndex};
