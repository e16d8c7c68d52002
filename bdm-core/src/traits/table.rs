//! Reference table interface
//!
//! A reference table holds precomputed CTM values for every block of a
//! given shape and alphabet. It is read-only for the pipeline.

use alloc::sync::Arc;

use crate::key::BlockKey;

/// Read-only mapping from block keys to complexity values
pub trait ReferenceTable {
    /// Complexity value for a block, `None` if the table does not cover it
    fn get(&self, key: &BlockKey) -> Option<f64>;

    /// Number of entries in the table
    fn len(&self) -> usize;

    /// Whether the table has no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the table covers a block
    fn contains(&self, key: &BlockKey) -> bool {
        self.get(key).is_some()
    }

    /// Alphabet size and block dimensionality, when the table records them
    fn layout(&self) -> Option<(u32, usize)> {
        None
    }
}

impl<T: ReferenceTable + ?Sized> ReferenceTable for &T {
    fn get(&self, key: &BlockKey) -> Option<f64> {
        (**self).get(key)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn layout(&self) -> Option<(u32, usize)> {
        (**self).layout()
    }
}

impl<T: ReferenceTable + ?Sized> ReferenceTable for Arc<T> {
    fn get(&self, key: &BlockKey) -> Option<f64> {
        (**self).get(key)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn layout(&self) -> Option<(u32, usize)> {
        (**self).layout()
    }
}
