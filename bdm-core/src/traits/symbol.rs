//! Symbol type constraints for input datasets
//!
//! This module defines the trait that constrains which caller-side element
//! types can be turned into alphabet digits.

use crate::array::Digit;
use crate::error::EncodingError;

/// Trait for types that can be used as symbols of a dataset
///
/// A symbol must represent a non-negative integer that fits a [`Digit`].
/// Whether it is smaller than the alphabet size is checked at encoding
/// time, when the base is known.
pub trait Symbol: Copy {
    /// Convert to a digit, rejecting negative and non-integral values
    fn to_digit(self) -> Result<Digit, EncodingError>;
}

macro_rules! impl_unsigned_symbol {
    ($($type:ty),*) => {
        $(
            impl Symbol for $type {
                fn to_digit(self) -> Result<Digit, EncodingError> {
                    Digit::try_from(self).map_err(|_| EncodingError::SymbolOutOfRange {
                        symbol: self as u64,
                        base: Digit::MAX,
                    })
                }
            }
        )*
    };
}

macro_rules! impl_signed_symbol {
    ($($type:ty),*) => {
        $(
            impl Symbol for $type {
                fn to_digit(self) -> Result<Digit, EncodingError> {
                    if self < 0 {
                        return Err(EncodingError::NegativeSymbol { symbol: self as i64 });
                    }
                    Digit::try_from(self).map_err(|_| EncodingError::SymbolOutOfRange {
                        symbol: self as u64,
                        base: Digit::MAX,
                    })
                }
            }
        )*
    };
}

macro_rules! impl_float_symbol {
    ($($type:ty),*) => {
        $(
            impl Symbol for $type {
                fn to_digit(self) -> Result<Digit, EncodingError> {
                    if !self.is_finite() || (self as i64) as $type != self {
                        return Err(EncodingError::NonIntegral);
                    }
                    (self as i64).to_digit()
                }
            }
        )*
    };
}

impl_unsigned_symbol!(u8, u16, u32, u64, usize);
impl_signed_symbol!(i8, i16, i32, i64);
impl_float_symbol!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_symbols() {
        assert_eq!(3u8.to_digit(), Ok(3));
        assert_eq!(7i64.to_digit(), Ok(7));
        assert_eq!(
            (-2i32).to_digit(),
            Err(EncodingError::NegativeSymbol { symbol: -2 })
        );
        assert!(u64::MAX.to_digit().is_err());
    }

    #[test]
    fn test_float_symbols() {
        assert_eq!(1.0f64.to_digit(), Ok(1));
        assert_eq!(0.5f64.to_digit(), Err(EncodingError::NonIntegral));
        assert_eq!(f32::NAN.to_digit(), Err(EncodingError::NonIntegral));
        assert_eq!(
            (-1.0f64).to_digit(),
            Err(EncodingError::NegativeSymbol { symbol: -1 })
        );
    }
}
