//! The BDM pipeline: partition, lookup, aggregate
//!
//! [`Bdm`] owns a reference table and one implementation of every stage.
//! Each call partitions the array lazily, looks every block up as soon as
//! it is produced and groups the results for the aggregator. Nothing is
//! mutated after construction, so one instance can serve many threads.

use std::path::Path;

use bdm_core::{
    Array, ArrayView, CodeLookup, Lookup, PartitionStrategy, Partitioner, ReferenceTable,
};
use log::{debug, trace, warn};
use rayon::prelude::*;

use crate::aggregate::{Aggregator, BdmAggregator, BlockCounts};
use crate::config::BdmConfig;
use crate::dataset::CtmDataset;
use crate::error::{BdmError, Result};
use crate::table::CtmTable;

/// Block decomposition method over a reference table `T`
#[derive(Debug, Clone)]
pub struct Bdm<T, P = PartitionStrategy, L = CodeLookup, A = BdmAggregator> {
    table: T,
    base: u32,
    partitioner: P,
    lookup: L,
    aggregator: A,
}

impl<T: ReferenceTable> Bdm<T> {
    /// Pipeline for `config` over `table`
    ///
    /// Fails when the configuration is invalid or when the table records
    /// a base or dimensionality other than the configured one.
    pub fn new(config: BdmConfig, table: T) -> Result<Self> {
        let partitioner = config.partitioner()?;
        if let Some((base, ndim)) = table.layout() {
            if base != config.base || ndim != config.ndim {
                return Err(BdmError::Config(format!(
                    "table holds base {base} {ndim}D blocks, configured for base {} {}D",
                    config.base, config.ndim
                )));
            }
        }
        if table.is_empty() {
            warn!("BDM configured with an empty CTM table");
        }
        debug!(
            "BDM ready: {} blocks, {} boundary, base {}, {} table entries",
            partitioner.block_shape(),
            config.boundary,
            config.base,
            table.len()
        );
        Ok(Self {
            table,
            base: config.base,
            partitioner,
            lookup: CodeLookup,
            aggregator: BdmAggregator,
        })
    }
}

impl Bdm<CtmTable> {
    /// Pipeline over a dataset from the registry, loaded from `dir`
    pub fn from_dataset<P: AsRef<Path>>(dataset: &CtmDataset, dir: P) -> Result<Self> {
        let table = dataset.load_from_dir(dir)?;
        Self::new(dataset.config(), table)
    }
}

impl<T, P, L, A> Bdm<T, P, L, A> {
    /// Replace the partition stage
    pub fn with_partitioner<Q>(self, partitioner: Q) -> Bdm<T, Q, L, A> {
        Bdm {
            table: self.table,
            base: self.base,
            partitioner,
            lookup: self.lookup,
            aggregator: self.aggregator,
        }
    }

    /// Replace the lookup stage
    pub fn with_lookup<M>(self, lookup: M) -> Bdm<T, P, M, A> {
        Bdm {
            table: self.table,
            base: self.base,
            partitioner: self.partitioner,
            lookup,
            aggregator: self.aggregator,
        }
    }

    /// Replace the aggregate stage
    pub fn with_aggregator<B>(self, aggregator: B) -> Bdm<T, P, L, B> {
        Bdm {
            table: self.table,
            base: self.base,
            partitioner: self.partitioner,
            lookup: self.lookup,
            aggregator,
        }
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn partitioner(&self) -> &P {
        &self.partitioner
    }
}

impl<T, P, L, A> Bdm<T, P, L, A>
where
    T: ReferenceTable,
    P: Partitioner,
    L: Lookup,
    A: Aggregator,
{
    /// Approximate algorithmic complexity of `array` in bits
    pub fn complexity(&self, array: &Array) -> Result<f64> {
        self.complexity_view(array.view())
    }

    /// Approximate algorithmic complexity of a borrowed view
    pub fn complexity_view(&self, view: ArrayView<'_>) -> Result<f64> {
        let counts = self.decompose_view(view)?;
        let value = self.aggregator.combine(&counts);
        debug!(
            "{} blocks, {} distinct, complexity {value:.4}",
            counts.total(),
            counts.len()
        );
        Ok(value)
    }

    /// Distinct blocks of `array` with their CTM values and multiplicities
    pub fn decompose(&self, array: &Array) -> Result<BlockCounts> {
        self.decompose_view(array.view())
    }

    /// Distinct blocks of a view with their CTM values and multiplicities
    pub fn decompose_view(&self, view: ArrayView<'_>) -> Result<BlockCounts> {
        let blocks = self.partitioner.partition(view)?;
        let mut counts = BlockCounts::new();
        for result in self.lookup.lookup(&self.table, blocks, self.base) {
            let (key, value) = result.map_err(|err| BdmError::from_core(err, self.base))?;
            trace!("block {key} -> {value}");
            counts.insert(key, value);
        }
        Ok(counts)
    }

    /// Complexity of many arrays, evaluated in parallel
    ///
    /// Results are in input order; one failing array does not affect the
    /// others.
    pub fn complexity_batch(&self, arrays: &[Array]) -> Vec<Result<f64>>
    where
        Self: Sync,
    {
        debug!(
            "Evaluating {} arrays on {} threads",
            arrays.len(),
            rayon::current_num_threads()
        );
        arrays.par_iter().map(|array| self.complexity(array)).collect()
    }
}
