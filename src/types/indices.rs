//! Index and identifier newtypes.

use std::fmt;

/// Macro to generate dense index newtypes with common functionality.
macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident, $display_prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Create a new index.
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Get the raw index value.
            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }

            /// Create an iterator over `[0, n)` indices.
            pub fn iter(n: usize) -> impl Iterator<Item = $name> + ExactSizeIterator {
                (0..n).map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(idx: $name) -> usize {
                idx.0
            }
        }

        impl<T> std::ops::Index<$name> for [T] {
            type Output = T;
            #[inline]
            fn index(&self, idx: $name) -> &T {
                &self[idx.0]
            }
        }

        impl<T> std::ops::IndexMut<$name> for [T] {
            #[inline]
            fn index_mut(&mut self, idx: $name) -> &mut T {
                &mut self[idx.0]
            }
        }

        impl<T> std::ops::Index<$name> for Vec<T> {
            type Output = T;
            #[inline]
            fn index(&self, idx: $name) -> &T {
                &self[idx.0]
            }
        }

        impl<T> std::ops::IndexMut<$name> for Vec<T> {
            #[inline]
            fn index_mut(&mut self, idx: $name) -> &mut T {
                &mut self[idx.0]
            }
        }
    };
}

define_index!(
    /// Dense node index, assigned in registration order.
    NodeIndex,
    "N"
);

define_index!(
    /// Dense face index, assigned in registration order.
    FaceIndex,
    "F"
);

define_index!(
    /// Dense cell index, assigned in registration order.
    ///
    /// This is the linear index used as the row/column position of the
    /// cell's unknown in the external linear system.
    CellIndex,
    "C"
);

/// Externally stable entity identifier from the mesh source definition.
///
/// Mesh ids are unique within one entity kind (node, face, cell) but carry
/// no ordering or density guarantees. They are never used for array
/// placement; see [`NodeIndex`], [`FaceIndex`] and [`CellIndex`] for that.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MeshId(u64);

impl MeshId {
    /// Create a new mesh id.
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for MeshId {
    #[inline]
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_index_basics() {
        let idx = CellIndex::new(42);
        assert_eq!(idx.get(), 42);
        assert_eq!(usize::from(idx), 42);
        assert_eq!(CellIndex::from(42), idx);
    }

    #[test]
    fn test_array_indexing() {
        let mut data = vec![10, 20, 30];
        let idx = FaceIndex::new(1);
        assert_eq!(data[idx], 20);
        data[idx] = 25;
        assert_eq!(data[1], 25);
    }

    #[test]
    fn test_index_iter() {
        let indices: Vec<_> = NodeIndex::iter(4).collect();
        assert_eq!(indices.len(), 4);
        assert_eq!(indices[0].get(), 0);
        assert_eq!(indices[3].get(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", NodeIndex::new(3)), "N3");
        assert_eq!(format!("{}", FaceIndex::new(10)), "F10");
        assert_eq!(format!("{}", CellIndex::new(0)), "C0");
        assert_eq!(format!("{}", MeshId::new(7)), "#7");
    }

    #[test]
    fn test_mesh_id_is_not_an_index() {
        // MeshId intentionally has no slice indexing; only equality and hashing.
        let a = MeshId::new(5);
        let b = MeshId::from(5);
        assert_eq!(a, b);
        assert_eq!(a.get(), 5);
    }
}
