//! Lookup of block complexity values
//!
//! Blocks are keyed by [`BlockKey`] (shape plus integer code). There is no
//! fallback for absent keys: leading zeros are significant because the
//! shape is part of the key.

use crate::array::ArrayView;
use crate::error::CoreError;
use crate::key::BlockKey;
use crate::traits::{Lookup, ReferenceTable};

/// Lookup through integer block codes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeLookup;

impl Lookup for CodeLookup {
    fn lookup_block<T>(
        &self,
        table: &T,
        block: &ArrayView<'_>,
        base: u32,
    ) -> Result<(BlockKey, f64), CoreError>
    where
        T: ReferenceTable + ?Sized,
    {
        let key = BlockKey::from_view(block, base)?;
        match table.get(&key) {
            Some(value) => Ok((key, value)),
            None => Err(CoreError::MissingKey(key.into())),
        }
    }
}

/// Lazy lookup over a sequence of blocks
///
/// Produced by [`Lookup::lookup`]. After the first error the iterator is
/// fused and yields nothing more.
pub struct LookupIter<'t, T: ?Sized, L, I> {
    lookup: &'t L,
    table: &'t T,
    blocks: I,
    base: u32,
    failed: bool,
}

impl<'t, T: ?Sized, L, I> LookupIter<'t, T, L, I> {
    pub fn new(lookup: &'t L, table: &'t T, blocks: I, base: u32) -> Self {
        Self {
            lookup,
            table,
            blocks,
            base,
            failed: false,
        }
    }
}

impl<'t, 'a, T, L, I> Iterator for LookupIter<'t, T, L, I>
where
    T: ReferenceTable + ?Sized,
    L: Lookup,
    I: Iterator<Item = ArrayView<'a>>,
{
    type Item = Result<(BlockKey, f64), CoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let block = self.blocks.next()?;
        let result = self.lookup.lookup_block(self.table, &block, self.base);
        self.failed = result.is_err();
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Array;
    use crate::encoding::string_to_array;
    use crate::error::EncodingError;
    use crate::partition::{BlockShape, PartitionIgnore};
    use crate::traits::Partitioner;
    use alloc::collections::BTreeMap;
    use alloc::vec;
    use alloc::vec::Vec;

    struct MapTable(BTreeMap<BlockKey, f64>);

    impl ReferenceTable for MapTable {
        fn get(&self, key: &BlockKey) -> Option<f64> {
            self.0.get(key).copied()
        }

        fn len(&self) -> usize {
            self.0.len()
        }
    }

    fn table() -> MapTable {
        let mut map = BTreeMap::new();
        map.insert(BlockKey::symmetric(2, 4, 0xFFFF), 22.0067);
        map.insert(BlockKey::symmetric(2, 4, 0), 20.5);
        MapTable(map)
    }

    #[test]
    fn test_lookup_block() {
        let ones = string_to_array("1111-1111-1111-1111", '-').unwrap();
        let (key, value) = CodeLookup.lookup_block(&table(), &ones.view(), 2).unwrap();
        assert_eq!(key, BlockKey::symmetric(2, 4, 65535));
        assert_eq!(value, 22.0067);
    }

    #[test]
    fn test_lookup_missing_key() {
        let arr = string_to_array("1000-0000-0000-0000", '-').unwrap();
        let err = CodeLookup.lookup_block(&table(), &arr.view(), 2).unwrap_err();
        assert_eq!(
            err,
            CoreError::MissingKey(BlockKey::symmetric(2, 4, 1 << 15).into())
        );
    }

    #[test]
    fn test_lookup_invalid_symbol() {
        let arr = Array::filled(vec![4, 4], 2).unwrap();
        let err = CodeLookup.lookup_block(&table(), &arr.view(), 2).unwrap_err();
        assert_eq!(
            err,
            CoreError::Encoding(EncodingError::SymbolOutOfRange { symbol: 2, base: 2 })
        );
    }

    #[test]
    fn test_lookup_stream_stops_at_first_error() {
        // Left half zeros (known), right half has an unknown block
        let mut data = vec![0; 32];
        data[4] = 1;
        let arr = Array::new(vec![4, 8], data).unwrap();
        let part = PartitionIgnore::new(BlockShape::new(&[4, 4]).unwrap());
        let table = table();
        let blocks = part.partition(arr.view()).unwrap();
        let results: Vec<_> = CodeLookup.lookup(&table, blocks, 2).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(CoreError::MissingKey(_))));
    }
}
