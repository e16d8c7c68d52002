//! Layout validation for the binary CTM table format
//!
//! Pure arithmetic on offsets and sizes; no I/O.

use crate::error::CoreError;

/// Align an offset to a specific boundary
///
/// The boundary must be a power of two.
pub const fn align_to_boundary(offset: usize, boundary: usize) -> usize {
    (offset + boundary - 1) & !(boundary - 1)
}

/// Align an offset to the 8-byte boundary used by table records
pub const fn align_to_8(offset: usize) -> usize {
    align_to_boundary(offset, 8)
}

/// Validate magic bytes match expected pattern
pub const fn validate_magic_bytes(actual: &[u8; 4], expected: &[u8; 4]) -> Result<(), CoreError> {
    if actual[0] != expected[0]
        || actual[1] != expected[1]
        || actual[2] != expected[2]
        || actual[3] != expected[3]
    {
        return Err(CoreError::InvalidFormat("bad magic bytes"));
    }
    Ok(())
}

/// Validate that `count` records of `record_size` bytes starting at
/// `offset` lie inside a buffer of `total_len` bytes
pub fn validate_records_region(
    offset: usize,
    count: usize,
    record_size: usize,
    total_len: usize,
) -> Result<(), CoreError> {
    if offset % 8 != 0 {
        return Err(CoreError::InvalidFormat("records are not 8-byte aligned"));
    }
    let end = count
        .checked_mul(record_size)
        .and_then(|size| size.checked_add(offset))
        .ok_or(CoreError::InvalidFormat("record region overflows"))?;
    if end > total_len {
        return Err(CoreError::InvalidFormat("record region extends beyond data"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_to_boundary() {
        assert_eq!(align_to_boundary(0, 8), 0);
        assert_eq!(align_to_boundary(1, 8), 8);
        assert_eq!(align_to_boundary(8, 8), 8);
        assert_eq!(align_to_boundary(9, 8), 16);
        assert_eq!(align_to_boundary(3, 4), 4);
        assert_eq!(align_to_8(33), 40);
    }

    #[test]
    fn test_validate_magic_bytes() {
        assert_eq!(validate_magic_bytes(b"BCTM", b"BCTM"), Ok(()));
        assert!(validate_magic_bytes(b"CTMB", b"BCTM").is_err());
    }

    #[test]
    fn test_validate_records_region() {
        assert_eq!(validate_records_region(40, 2, 32, 104), Ok(()));
        assert!(validate_records_region(40, 3, 32, 104).is_err());
        assert!(validate_records_region(41, 1, 32, 104).is_err());
        assert!(validate_records_region(40, usize::MAX, 32, 104).is_err());
    }
}
