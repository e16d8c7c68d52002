//! Validation utilities for BDM inputs
//!
//! This module contains pure validation and parsing functions with no I/O
//! dependencies.

pub mod format;
pub mod parsing;
pub mod shape;
pub mod symbols;

pub use format::{align_to_8, align_to_boundary, validate_magic_bytes, validate_records_region};
pub use parsing::{parse_boundary, parse_shape};
pub use shape::{conform, validate_block_shape};
pub use symbols::{validate_base, validate_digit, MAX_STRING_BASE};
