//! Alphabet validation

use crate::array::Digit;
use crate::error::EncodingError;

/// Largest alphabet whose digits have a single-character string form
pub const MAX_STRING_BASE: u32 = 36;

/// Validate an alphabet size, which must be at least two
pub const fn validate_base(base: u32) -> Result<(), EncodingError> {
    if base < 2 {
        return Err(EncodingError::InvalidBase { base });
    }
    Ok(())
}

/// Validate that a digit belongs to an alphabet of size `base`
pub const fn validate_digit(digit: Digit, base: u32) -> Result<Digit, EncodingError> {
    if digit >= base {
        return Err(EncodingError::SymbolOutOfRange {
            symbol: digit as u64,
            base,
        });
    }
    Ok(digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base() {
        assert_eq!(validate_base(2), Ok(()));
        assert_eq!(validate_base(9), Ok(()));
        assert_eq!(validate_base(0), Err(EncodingError::InvalidBase { base: 0 }));
        assert_eq!(validate_base(1), Err(EncodingError::InvalidBase { base: 1 }));
    }

    #[test]
    fn test_validate_digit() {
        assert_eq!(validate_digit(1, 2), Ok(1));
        assert_eq!(
            validate_digit(2, 2),
            Err(EncodingError::SymbolOutOfRange { symbol: 2, base: 2 })
        );
    }
}
