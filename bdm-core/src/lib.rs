#![no_std]

//! BDM Core - Block Decomposition Method building blocks
//!
//! This crate provides the pure stages of the Block Decomposition Method:
//! encoding blocks of symbols as integers, partitioning arrays into blocks
//! under a boundary condition, and looking blocks up in a reference table
//! of CTM values. It also defines the layout of binary CTM table files.
//!
//! Nothing here performs I/O; loading tables and aggregating complexity
//! lives in the `bdm` crate.

extern crate alloc;

pub mod array;
pub mod encoding;
pub mod error;
pub mod format;
pub mod key;
pub mod lookup;
pub mod partition;
pub mod traits;
pub mod validation;

pub use array::{Array, ArrayView, Digit};
pub use encoding::{
    array_to_string, decode, decode_array, decode_string, encode, encode_array, encode_sequence,
    encode_string, string_to_array, string_to_array_with_ndim, validate_code, Code,
    DEFAULT_SEPARATOR,
};
pub use error::*;
pub use format::{CtmHeader, EntryRecord};
pub use key::BlockKey;
pub use lookup::{CodeLookup, LookupIter};
pub use partition::{
    BlockShape, Blocks, BoundaryCondition, PartitionIgnore, PartitionShift, PartitionShrink,
    PartitionStrategy,
};
pub use traits::*;
