//! Pipeline stage interfaces
//!
//! Partitioning and lookup are modelled as capabilities so that the
//! orchestrator can hold any implementation of each stage. Aggregation
//! needs floating point logarithms and lives in the `bdm` crate.

use crate::array::ArrayView;
use crate::error::{CoreError, ShapeError};
use crate::key::BlockKey;
use crate::lookup::LookupIter;
use crate::partition::BlockShape;

use super::table::ReferenceTable;

/// Decomposes an array into blocks of a symmetric target shape
pub trait Partitioner {
    /// Lazy sequence of blocks borrowing the partitioned array
    type Blocks<'a>: Iterator<Item = ArrayView<'a>>;

    /// Target shape of the produced blocks
    fn block_shape(&self) -> &BlockShape;

    /// Start a fresh decomposition of `array`
    ///
    /// Fails before producing any block when the array cannot be
    /// conformed to the block dimensionality.
    fn partition<'a>(&self, array: ArrayView<'a>) -> Result<Self::Blocks<'a>, ShapeError>;
}

/// Maps blocks to their complexity values in a reference table
pub trait Lookup {
    /// Key and value for a single block
    fn lookup_block<T>(
        &self,
        table: &T,
        block: &ArrayView<'_>,
        base: u32,
    ) -> Result<(BlockKey, f64), CoreError>
    where
        T: ReferenceTable + ?Sized;

    /// Lazily look up every block of a sequence
    ///
    /// The iterator yields an error for the first block that cannot be
    /// resolved; callers are expected to stop there.
    fn lookup<'t, 'a, T, I>(&'t self, table: &'t T, blocks: I, base: u32) -> LookupIter<'t, T, Self, I>
    where
        Self: Sized,
        T: ReferenceTable + ?Sized,
        I: Iterator<Item = ArrayView<'a>>,
    {
        LookupIter::new(self, table, blocks, base)
    }
}
