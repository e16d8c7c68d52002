//! Aggregation of block values into a BDM estimate
//!
//! Blocks are grouped by their key and CTM value. Each distinct group
//! contributes `c + log2(n)`: its CTM value once, plus the cost of
//! describing how often it repeats.

use bdm_core::{BlockKey, CoreError};
use hashbrown::HashMap;

/// Distinct blocks with their multiplicities, in first-occurrence order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockCounts {
    entries: Vec<(BlockKey, f64, usize)>,
    index: HashMap<(BlockKey, u64), usize>,
}

impl BlockCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of a block
    pub fn insert(&mut self, key: BlockKey, value: f64) {
        let slot = (key, value.to_bits());
        if let Some(&i) = self.index.get(&slot) {
            self.entries[i].2 += 1;
            return;
        }
        self.index.insert(slot.clone(), self.entries.len());
        self.entries.push((slot.0, value, 1));
    }

    /// Distinct blocks as `(key, value, multiplicity)`
    pub fn iter(&self) -> impl Iterator<Item = (&BlockKey, f64, usize)> + '_ {
        self.entries.iter().map(|(k, v, n)| (k, *v, *n))
    }

    /// Number of distinct blocks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of blocks recorded
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, _, n)| n).sum()
    }
}

impl FromIterator<(BlockKey, f64)> for BlockCounts {
    fn from_iter<I: IntoIterator<Item = (BlockKey, f64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (key, value) in iter {
            counts.insert(key, value);
        }
        counts
    }
}

/// Combines looked-up blocks into a single complexity value
pub trait Aggregator {
    /// Value of a grouped decomposition
    fn combine(&self, counts: &BlockCounts) -> f64;

    /// Group `pairs` and combine them
    fn aggregate<I>(&self, pairs: I) -> f64
    where
        I: IntoIterator<Item = (BlockKey, f64)>,
    {
        self.combine(&pairs.into_iter().collect())
    }

    /// Like [`aggregate`](Self::aggregate), stopping at the first failed lookup
    fn try_aggregate<I>(&self, results: I) -> Result<f64, CoreError>
    where
        I: IntoIterator<Item = Result<(BlockKey, f64), CoreError>>,
    {
        let counts = results.into_iter().collect::<Result<BlockCounts, _>>()?;
        Ok(self.combine(&counts))
    }
}

/// Standard BDM sum `Σ (c + log2 n)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BdmAggregator;

impl Aggregator for BdmAggregator {
    fn combine(&self, counts: &BlockCounts) -> f64 {
        counts
            .iter()
            .map(|(_, value, n)| value + (n as f64).log2())
            .sum()
    }
}
