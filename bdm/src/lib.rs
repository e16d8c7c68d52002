//! BDM - Block Decomposition Method
//!
//! Estimates the algorithmic (Kolmogorov) complexity of discrete arrays by
//! splitting them into small blocks, looking up each block's precomputed
//! CTM (Coding Theorem Method) value and combining the values into one
//! number.
//!
//! ## Architecture
//!
//! BDM separates pure stages from their I/O-bearing implementation:
//!
//! - **bdm-core**: Pure stages (encoding, partitioning, lookup), table
//!   traits and the binary table format (no I/O)
//! - **bdm**: Aggregation, reference tables with persistence, configuration,
//!   dataset registry and the pipeline itself
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bdm::{Array, Bdm, CtmDataset};
//!
//! fn example() -> bdm::Result<()> {
//!     // Load the 4x4 binary matrix dataset from a local directory
//!     let dataset = CtmDataset::find("ctm-b2-d4x4").expect("known dataset");
//!     let bdm = Bdm::from_dataset(dataset, "ctm-data")?;
//!
//!     let ones = Array::filled(vec![8, 8], 1)?;
//!     println!("K(ones) ~ {:.4} bits", bdm.complexity(&ones)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **serde** (default): JSON tables and configuration
//! - **mmap** (default): Memory-mapped loading of binary `.ctm` tables
//! - **cli**: The `bdm_cli` example front end

// Re-export core abstractions
pub use bdm_core::{
    // Arrays and keys
    Array, ArrayView, BlockKey, Code, Digit,
    // Encoding
    array_to_string, decode, decode_array, decode_string, encode, encode_array,
    encode_sequence, encode_string, string_to_array, string_to_array_with_ndim,
    DEFAULT_SEPARATOR,
    // Stages
    BlockShape, BoundaryCondition, CodeLookup, Lookup, PartitionIgnore, PartitionShift,
    PartitionShrink, PartitionStrategy, Partitioner, ReferenceTable, Symbol,
    // Errors from the core stages
    CoreError, EncodingError, ShapeError,
};
pub use bdm_core::validation::{parse_boundary, parse_shape};

pub mod aggregate;
pub mod bdm;
pub mod config;
pub mod dataset;
pub mod error;
pub mod table;

pub use aggregate::{Aggregator, BdmAggregator, BlockCounts};
pub use bdm::Bdm;
pub use config::BdmConfig;
pub use dataset::{list_ctm_datasets, CtmDataset, CTM_DATASETS};
pub use error::{BdmError, Result};
pub use table::CtmTable;
