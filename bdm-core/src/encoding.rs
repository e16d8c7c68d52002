//! Encoding and decoding of arrays over a finite alphabet
//!
//! Every symbol of an alphabet of size `base` is an integer in `[0, base)`.
//! Reading an array in row-major order as the digits of a base-`base`
//! numeral, first element most significant, gives a one-to-one mapping
//! between arrays of a fixed shape and the integers `0..base^size`.
//!
//! Arrays also have a canonical textual form: last-axis digits are written
//! next to each other, rows are joined with a separator, and each further
//! axis repeats the separator once more.

use alloc::string::String;
use alloc::vec::Vec;

use crate::array::{shape_len, Array, ArrayView, Digit};
use crate::error::{CoreError, EncodingError, ShapeError};
use crate::traits::Symbol;
use crate::validation::{validate_base, validate_digit, MAX_STRING_BASE};

/// Integer code of an array
pub type Code = u128;

/// Default separator of the canonical string form
pub const DEFAULT_SEPARATOR: char = '-';

/// Encode a sequence of symbols as a base-`base` integer
///
/// The first symbol is the most significant digit. An empty sequence
/// encodes to zero.
pub fn encode<S: Symbol>(seq: &[S], base: u32) -> Result<Code, EncodingError> {
    validate_base(base)?;
    encode_digits(seq.iter().map(|&s| s.to_digit()), base)
}

/// Encode a one-dimensional view
pub fn encode_sequence(seq: &ArrayView<'_>, base: u32) -> Result<Code, CoreError> {
    if seq.ndim() != 1 {
        return Err(ShapeError::NotOneDimensional { ndim: seq.ndim() }.into());
    }
    Ok(encode_array(seq, base)?)
}

/// Encode a view of any dimensionality, flattened in row-major order
pub fn encode_array(view: &ArrayView<'_>, base: u32) -> Result<Code, EncodingError> {
    validate_base(base)?;
    encode_digits(view.iter().map(Ok), base)
}

fn encode_digits<I>(digits: I, base: u32) -> Result<Code, EncodingError>
where
    I: Iterator<Item = Result<Digit, EncodingError>>,
{
    let mut code: Code = 0;
    for digit in digits {
        let digit = validate_digit(digit?, base)?;
        code = code
            .checked_mul(Code::from(base))
            .and_then(|c| c.checked_add(Code::from(digit)))
            .ok_or(EncodingError::CodeOverflow)?;
    }
    Ok(code)
}

/// Decode the digits of `code`
///
/// Produces the shortest representation, left-padded with zeros up to
/// `min_length`. Fails when the shortest representation is already longer
/// than `min_length`.
pub fn decode(code: Code, base: u32, min_length: Option<usize>) -> Result<Vec<Digit>, EncodingError> {
    validate_base(base)?;
    let radix = Code::from(base);

    let mut digits = Vec::new();
    let mut rest = code;
    while rest > 0 {
        // Remainder is below `base`, which is a u32
        digits.push((rest % radix) as Digit);
        rest /= radix;
    }

    if let Some(length) = min_length {
        if digits.len() > length {
            return Err(EncodingError::CodeTooLarge { code, length });
        }
        digits.resize(length, 0);
    }
    digits.reverse();
    Ok(digits)
}

/// Decode `code` into an array of the given shape
pub fn decode_array(code: Code, shape: &[usize], base: u32) -> Result<Array, CoreError> {
    let len = shape_len(shape).ok_or_else(|| ShapeError::TooLarge {
        shape: Vec::from(shape),
    })?;
    let digits = decode(code, base, Some(len))?;
    Ok(Array::new(Vec::from(shape), digits)?)
}

/// Check that `code` identifies a block of `shape` without decoding it
///
/// Every code of the shape must be representable, so `base^len` has to
/// fit in a [`Code`], and `code` must lie below it.
pub fn validate_code(code: Code, shape: &[usize], base: u32) -> Result<(), CoreError> {
    validate_base(base)?;
    let len = shape_len(shape).ok_or_else(|| ShapeError::TooLarge {
        shape: Vec::from(shape),
    })?;
    let capacity = u32::try_from(len)
        .ok()
        .and_then(|len| Code::from(base).checked_pow(len))
        .ok_or(EncodingError::CodeOverflow)?;
    if code >= capacity {
        return Err(EncodingError::CodeTooLarge { code, length: len }.into());
    }
    Ok(())
}

/// Canonical string form of an array
///
/// Digits are written as `0-9a-z`, so only alphabets of up to 36 symbols
/// can be represented.
pub fn array_to_string(view: &ArrayView<'_>, sep: char) -> Result<String, EncodingError> {
    let ndim = view.ndim();
    let mut out = String::with_capacity(view.len() * 2);
    if ndim == 0 {
        return Ok(out);
    }

    let shape = view.shape();
    for (pos, digit) in view.iter().enumerate() {
        if pos > 0 {
            // Number of axes (beyond the last) whose index wrapped at `pos`
            let mut wrapped = 0;
            let mut stride = 1;
            for &dim in shape.iter().rev() {
                stride *= dim;
                if pos % stride != 0 {
                    break;
                }
                wrapped += 1;
            }
            for _ in 0..wrapped.min(ndim - 1) {
                out.push(sep);
            }
        }
        out.push(digit_to_char(digit)?);
    }
    Ok(out)
}

/// Parse the canonical string form of an array
///
/// The number of dimensions follows from the longest run of separators.
/// An empty string is the empty one-dimensional array.
pub fn string_to_array(s: &str, sep: char) -> Result<Array, CoreError> {
    let ndim = longest_separator_run(s, sep) + 1;
    parse_level(s, sep, ndim)
}

/// Parse the canonical string form of an array with known dimensionality
///
/// Needed when leading axes may have length one, since such axes leave no
/// separator behind (`1x4` and `4` both serialize as four digits).
pub fn string_to_array_with_ndim(s: &str, sep: char, ndim: usize) -> Result<Array, CoreError> {
    if ndim == 0 {
        return Err(ShapeError::EmptyBlockShape.into());
    }
    if longest_separator_run(s, sep) >= ndim {
        return Err(ShapeError::NotConformable {
            array_ndim: longest_separator_run(s, sep) + 1,
            block_ndim: ndim,
        }
        .into());
    }
    parse_level(s, sep, ndim)
}

fn longest_separator_run(s: &str, sep: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in s.chars() {
        if c == sep {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

fn parse_level(s: &str, sep: char, ndim: usize) -> Result<Array, CoreError> {
    if ndim == 1 {
        let digits = s.chars().map(char_to_digit).collect::<Result<Vec<_>, _>>()?;
        return Ok(Array::from_vec(digits));
    }

    let delimiter: String = core::iter::repeat(sep).take(ndim - 1).collect();
    let mut inner_shape: Option<Vec<usize>> = None;
    let mut data = Vec::new();
    let mut count = 0;
    for part in s.split(delimiter.as_str()) {
        let sub = parse_level(part, sep, ndim - 1)?;
        match &inner_shape {
            Some(shape) if shape.as_slice() != sub.shape() => {
                return Err(ShapeError::Ragged.into());
            }
            Some(_) => {}
            None => inner_shape = Some(Vec::from(sub.shape())),
        }
        data.extend_from_slice(sub.as_slice());
        count += 1;
    }

    let mut shape = alloc::vec![count];
    shape.extend(inner_shape.unwrap_or_default());
    Ok(Array::new(shape, data)?)
}

fn digit_to_char(digit: Digit) -> Result<char, EncodingError> {
    char::from_digit(digit, MAX_STRING_BASE).ok_or(EncodingError::SymbolOutOfRange {
        symbol: u64::from(digit),
        base: MAX_STRING_BASE,
    })
}

fn char_to_digit(c: char) -> Result<Digit, EncodingError> {
    c.to_digit(MAX_STRING_BASE)
        .ok_or(EncodingError::InvalidCharacter { character: c })
}

/// Encode an array given in canonical string form
pub fn encode_string(s: &str, sep: char, base: u32) -> Result<Code, CoreError> {
    let array = string_to_array(s, sep)?;
    Ok(encode_array(&array.view(), base)?)
}

/// Decode `code` into the canonical string of an array of the given shape
pub fn decode_string(code: Code, shape: &[usize], sep: char, base: u32) -> Result<String, CoreError> {
    let array = decode_array(code, shape, base)?;
    Ok(array_to_string(&array.view(), sep)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_encode_sequence() {
        assert_eq!(encode::<u32>(&[], 2), Ok(0));
        assert_eq!(encode(&[1u8, 0, 0, 1], 2), Ok(9));
        assert_eq!(encode(&[1u8, 0, 0, 1], 3), Ok(28));
        assert_eq!(encode(&[0u8, 0, 1, 1], 2), Ok(3));
    }

    #[test]
    fn test_encode_rejects_bad_symbols() {
        assert_eq!(
            encode(&[0u8, 2, 1], 2),
            Err(EncodingError::SymbolOutOfRange { symbol: 2, base: 2 })
        );
        assert_eq!(
            encode(&[0i32, -1], 2),
            Err(EncodingError::NegativeSymbol { symbol: -1 })
        );
        assert_eq!(encode(&[0.0f64, 0.5], 2), Err(EncodingError::NonIntegral));
        assert_eq!(encode(&[0u8], 1), Err(EncodingError::InvalidBase { base: 1 }));
    }

    #[test]
    fn test_encode_overflow() {
        let seq = vec![1u8; 129];
        assert_eq!(encode(&seq, 2), Err(EncodingError::CodeOverflow));
        assert_eq!(encode(&seq[..128], 2), Ok(u128::MAX));
    }

    #[test]
    fn test_encode_sequence_requires_1d() {
        let arr = Array::new(vec![2, 2], vec![0, 1, 1, 0]).unwrap();
        assert_eq!(
            encode_sequence(&arr.view(), 2),
            Err(CoreError::Shape(ShapeError::NotOneDimensional { ndim: 2 }))
        );
        assert_eq!(encode_array(&arr.view(), 2), Ok(6));
    }

    #[test]
    fn test_decode_sequence() {
        assert_eq!(decode(0, 2, None), Ok(vec![]));
        assert_eq!(decode(9, 2, None), Ok(vec![1, 0, 0, 1]));
        assert_eq!(decode(28, 3, None), Ok(vec![1, 0, 0, 1]));
        assert_eq!(decode(20, 4, Some(5)), Ok(vec![0, 1, 1, 0, 0]));
        assert_eq!(decode(0, 2, Some(3)), Ok(vec![0, 0, 0]));
        assert_eq!(
            decode(9, 2, Some(3)),
            Err(EncodingError::CodeTooLarge { code: 9, length: 3 })
        );
    }

    #[test]
    fn test_validate_code() {
        assert_eq!(validate_code(15, &[2, 2], 2), Ok(()));
        assert_eq!(
            validate_code(16, &[2, 2], 2),
            Err(EncodingError::CodeTooLarge { code: 16, length: 4 }.into())
        );
        assert_eq!(validate_code(80, &[4], 3), Ok(()));
        // 2^144 codes do not fit in 128 bits
        assert_eq!(
            validate_code(0, &[12, 12], 2),
            Err(EncodingError::CodeOverflow.into())
        );
        assert_eq!(
            validate_code(0, &[1 << 22; 3], 2),
            Err(ShapeError::TooLarge {
                shape: vec![1 << 22; 3]
            }
            .into())
        );
    }

    #[test]
    fn test_decode_array() {
        let arr = decode_array(6, &[2, 2], 2).unwrap();
        assert_eq!(arr.shape(), &[2, 2]);
        assert_eq!(arr.as_slice(), &[0, 1, 1, 0]);
        assert!(decode_array(16, &[2, 2], 2).is_err());
    }

    #[test]
    fn test_array_to_string() {
        let empty = Array::from_vec(vec![]);
        assert_eq!(array_to_string(&empty.view(), '-').unwrap(), "");

        let arr = Array::new(vec![3, 4], vec![0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 1]).unwrap();
        assert_eq!(array_to_string(&arr.view(), '-').unwrap(), "0000-1000-0101");

        let cube = Array::new(vec![2, 2, 2], vec![0, 0, 0, 1, 1, 0, 1, 1]).unwrap();
        assert_eq!(array_to_string(&cube.view(), '-').unwrap(), "00-01--10-11");

        let seq = Array::from_vec(vec![1, 0, 12]);
        assert_eq!(array_to_string(&seq.view(), '-').unwrap(), "10c");
    }

    #[test]
    fn test_string_to_array() {
        let arr = string_to_array("0000-1000-0101", '-').unwrap();
        assert_eq!(arr.shape(), &[3, 4]);
        assert_eq!(arr.as_slice(), &[0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 1]);

        let empty = string_to_array("", '-').unwrap();
        assert_eq!(empty.shape(), &[0]);

        let cube = string_to_array("00-01--10-11", '-').unwrap();
        assert_eq!(cube.shape(), &[2, 2, 2]);

        assert_eq!(
            string_to_array("000-10", '-'),
            Err(CoreError::Shape(ShapeError::Ragged))
        );
        assert_eq!(
            string_to_array("01?", '-'),
            Err(CoreError::Encoding(EncodingError::InvalidCharacter { character: '?' }))
        );
    }

    #[test]
    fn test_string_with_ndim() {
        let single = string_to_array_with_ndim("1", '-', 2).unwrap();
        assert_eq!(single.shape(), &[1, 1]);

        let row = string_to_array_with_ndim("0110", '-', 2).unwrap();
        assert_eq!(row.shape(), &[1, 4]);

        assert!(string_to_array_with_ndim("01--10", '-', 2).is_err());
    }

    #[test]
    fn test_string_helpers() {
        assert_eq!(encode_string("1111-1111", '-', 2), Ok(255));
        assert_eq!(decode_string(255, &[2, 4], '-', 2).unwrap(), "1111-1111");
        assert_eq!(decode_string(3, &[4], '-', 2).unwrap(), "0011");
    }
}
