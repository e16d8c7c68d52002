//! Binary format definitions for precomputed CTM tables
//!
//! Pure layout definitions: a fixed header followed by an 8-byte aligned
//! array of fixed-size entry records. Reading files and mapping them into
//! memory happens in the `bdm` crate.

pub mod header;

pub use header::{CtmHeader, EntryRecord};
