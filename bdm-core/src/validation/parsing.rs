//! Parsing utilities for textual BDM parameters
//!
//! Shapes are written as `4x4` or `12`, boundary conditions as `ignore`,
//! `shift:<n>` or `shrink:<min_width>`.

use alloc::vec::Vec;

use crate::error::CoreError;
use crate::partition::BoundaryCondition;

/// Parse a shape string such as `4x4` or `12`
pub fn parse_shape(shape_str: &str) -> Result<Vec<usize>, CoreError> {
    if shape_str.is_empty() {
        return Err(CoreError::InvalidFormat("empty shape"));
    }
    shape_str.split(['x', 'X', ',']).map(parse_usize).collect()
}

/// Parse a boundary condition string
pub fn parse_boundary(boundary_str: &str) -> Result<BoundaryCondition, CoreError> {
    let (name, arg) = match boundary_str.split_once(':') {
        Some((name, arg)) => (name, Some(arg)),
        None => (boundary_str, None),
    };
    match (name, arg) {
        ("ignore", None) => Ok(BoundaryCondition::Ignore),
        ("shift", Some(arg)) => Ok(BoundaryCondition::Shift {
            shift: parse_isize(arg)?,
        }),
        ("shrink", Some(arg)) => Ok(BoundaryCondition::Shrink {
            min_width: parse_usize(arg)?,
        }),
        _ => Err(CoreError::InvalidFormat("unknown boundary condition")),
    }
}

/// Parse a usize from a string with error handling
fn parse_usize(s: &str) -> Result<usize, CoreError> {
    if s.is_empty() {
        return Err(CoreError::InvalidFormat("empty number"));
    }

    let mut result: usize = 0;
    for byte in s.bytes() {
        if !byte.is_ascii_digit() {
            return Err(CoreError::InvalidFormat("not a number"));
        }
        let digit = (byte - b'0') as usize;
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(digit))
            .ok_or(CoreError::InvalidFormat("number too large"))?;
    }

    Ok(result)
}

fn parse_isize(s: &str) -> Result<isize, CoreError> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let magnitude = isize::try_from(parse_usize(digits)?)
        .map_err(|_| CoreError::InvalidFormat("number too large"))?;
    Ok(if negative { -magnitude } else { magnitude })
}
