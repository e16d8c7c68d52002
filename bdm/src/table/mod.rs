//! In-memory CTM reference tables
//!
//! A [`CtmTable`] maps [`BlockKey`]s of one dimensionality and alphabet to
//! their CTM values. Tables are built once, then only read: the
//! orchestrator owns them behind shared references.

#[cfg(feature = "serde")]
pub mod json;
pub mod binary;

use bdm_core::validation::validate_base;
use bdm_core::{
    string_to_array_with_ndim, validate_code, Array, BlockKey, ReferenceTable, DEFAULT_SEPARATOR,
};
use hashbrown::HashMap;

use crate::error::{BdmError, Result};

/// Reference table of CTM values for symmetric blocks
#[derive(Debug, Clone, PartialEq)]
pub struct CtmTable {
    base: u32,
    ndim: usize,
    entries: HashMap<BlockKey, f64>,
}

impl CtmTable {
    /// Empty table for blocks of `ndim` axes over a `base` symbol alphabet
    pub fn new(base: u32, ndim: usize) -> Result<Self> {
        validate_base(base)?;
        if ndim == 0 {
            return Err(BdmError::InvalidTable(
                "table dimensionality must be positive".into(),
            ));
        }
        Ok(Self {
            base,
            ndim,
            entries: HashMap::new(),
        })
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Value stored for `key`
    pub fn value(&self, key: &BlockKey) -> Option<f64> {
        self.entries.get(key).copied()
    }

    /// Iterate over all entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&BlockKey, f64)> + '_ {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    /// Entries sorted by block width, then code
    pub fn sorted_entries(&self) -> Vec<(&BlockKey, f64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Widest block the table knows about
    pub fn max_width(&self) -> Option<usize> {
        self.entries.keys().filter_map(BlockKey::symmetric_width).max()
    }

    /// Add or replace the value of a block
    ///
    /// The key must be symmetric, match the table dimensionality and be a
    /// valid code for its shape in the table base. Shapes with more codes
    /// than fit in a `Code` are rejected.
    pub fn insert(&mut self, key: BlockKey, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(BdmError::InvalidTable(format!(
                "non-finite CTM value {value} for {key}"
            )));
        }
        if key.shape().len() != self.ndim {
            return Err(BdmError::InvalidTable(format!(
                "key {key} does not have {} dimensions",
                self.ndim
            )));
        }
        if key.symmetric_width().map_or(true, |w| w == 0) {
            return Err(BdmError::InvalidTable(format!(
                "key {key} is not a symmetric block"
            )));
        }
        validate_code(key.code(), key.shape(), self.base)?;
        self.entries.insert(key, value);
        Ok(())
    }

    /// Add the value of the block given as an array
    pub fn insert_array(&mut self, block: &Array, value: f64) -> Result<()> {
        let key = BlockKey::from_view(&block.view(), self.base)?;
        self.insert(key, value)
    }

    /// Add the value of the block given in canonical string form
    pub fn insert_str(&mut self, block: &str, value: f64) -> Result<()> {
        let array = string_to_array_with_ndim(block, DEFAULT_SEPARATOR, self.ndim)?;
        self.insert_array(&array, value)
    }
}

impl ReferenceTable for CtmTable {
    fn get(&self, key: &BlockKey) -> Option<f64> {
        self.value(key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn layout(&self) -> Option<(u32, usize)> {
        Some((self.base, self.ndim))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bdm_core::{CoreError, EncodingError};

    #[test]
    fn test_insert_and_get() {
        let mut table = CtmTable::new(2, 2).unwrap();
        table.insert_str("11-11", 9.0).unwrap();
        table.insert_str("1111-1111-1111-1111", 22.0067).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&BlockKey::symmetric(2, 2, 15)), Some(9.0));
        assert_eq!(table.get(&BlockKey::symmetric(2, 4, 65535)), Some(22.0067));
        assert!(!table.contains(&BlockKey::symmetric(2, 3, 0)));
        assert_eq!(table.max_width(), Some(4));
    }

    #[test]
    fn test_insert_rejects_bad_entries() {
        let mut table = CtmTable::new(2, 2).unwrap();
        assert!(matches!(
            table.insert(BlockKey::symmetric(2, 2, 0), f64::NAN),
            Err(BdmError::InvalidTable(_))
        ));
        assert!(matches!(
            table.insert(BlockKey::new(vec![2, 3], 0), 1.0),
            Err(BdmError::InvalidTable(_))
        ));
        assert!(matches!(
            table.insert(BlockKey::symmetric(1, 4, 0), 1.0),
            Err(BdmError::InvalidTable(_))
        ));
        assert!(matches!(
            table.insert(BlockKey::symmetric(2, 2, 16), 1.0),
            Err(BdmError::Core(CoreError::Encoding(EncodingError::CodeTooLarge { .. })))
        ));
        assert!(matches!(
            table.insert(BlockKey::symmetric(2, 12, 0), 1.0),
            Err(BdmError::Core(CoreError::Encoding(EncodingError::CodeOverflow)))
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn test_one_dimensional_strings() {
        let mut table = CtmTable::new(2, 1).unwrap();
        table.insert_str("000000000000", 25.61).unwrap();
        table.insert_str("1", 2.51).unwrap();
        assert_eq!(table.get(&BlockKey::symmetric(1, 12, 0)), Some(25.61));
        assert_eq!(table.get(&BlockKey::symmetric(1, 1, 1)), Some(2.51));
        assert!(table.insert_str("01-10", 1.0).is_err());
    }

    #[test]
    fn test_invalid_construction() {
        assert!(CtmTable::new(1, 1).is_err());
        assert!(CtmTable::new(2, 0).is_err());
    }
}
