//! Abstract interfaces for the block decomposition pipeline
//!
//! This module defines all trait abstractions used across the BDM crates.
//! Traits are pure interfaces - no concrete implementations.

pub mod stage;
pub mod symbol;
pub mod table;

pub use stage::{Lookup, Partitioner};
pub use symbol::Symbol;
pub use table::ReferenceTable;
