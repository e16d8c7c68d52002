//! Error types for BDM core operations

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::encoding::Code;
use crate::key::BlockKey;

/// Errors raised when array or block shapes cannot be reconciled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Block shape has different widths along different axes
    AsymmetricBlock { shape: Vec<usize> },
    /// Block shape has no dimensions
    EmptyBlockShape,
    /// Block width is zero
    ZeroWidth,
    /// Array and block dimensionality differ even after squeezing
    NotConformable { array_ndim: usize, block_ndim: usize },
    /// Operation requires a one-dimensional array
    NotOneDimensional { ndim: usize },
    /// Element count does not match the requested shape
    LengthMismatch { expected: usize, found: usize },
    /// Rows of a textual array have different lengths
    Ragged,
    /// Shrinking partition needs a minimal width of at least one
    InvalidMinWidth { min_width: usize },
    /// Axis index or slice bounds outside of the array
    OutOfBounds { axis: usize },
    /// Element count of a shape does not fit in `usize`
    TooLarge { shape: Vec<usize> },
}

impl core::fmt::Display for ShapeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ShapeError::AsymmetricBlock { shape } => {
                write!(f, "Partition shape is not symmetric {shape:?}")
            }
            ShapeError::EmptyBlockShape => write!(f, "Partition shape has no dimensions"),
            ShapeError::ZeroWidth => write!(f, "Partition shape has zero width"),
            ShapeError::NotConformable {
                array_ndim,
                block_ndim,
            } => write!(
                f,
                "Dataset and part shapes are not conformable ({array_ndim} vs {block_ndim} dimensions)"
            ),
            ShapeError::NotOneDimensional { ndim } => {
                write!(f, "Sequence has to be one-dimensional, got {ndim} dimensions")
            }
            ShapeError::LengthMismatch { expected, found } => {
                write!(f, "Shape requires {expected} elements, found {found}")
            }
            ShapeError::Ragged => write!(f, "Rows of the array have different lengths"),
            ShapeError::InvalidMinWidth { min_width } => {
                write!(f, "Minimal part width must be positive, got {min_width}")
            }
            ShapeError::OutOfBounds { axis } => write!(f, "Slice out of bounds on axis {axis}"),
            ShapeError::TooLarge { shape } => write!(f, "Shape {shape:?} has too many elements"),
        }
    }
}

/// Errors raised while mapping between arrays, codes and strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingError {
    /// Symbol is a floating point value with a fractional part
    NonIntegral,
    /// Symbol is negative
    NegativeSymbol { symbol: i64 },
    /// Symbol is not a digit of the alphabet
    SymbolOutOfRange { symbol: u64, base: u32 },
    /// Alphabet size is not supported
    InvalidBase { base: u32 },
    /// Code does not fit in 128 bits
    CodeOverflow,
    /// Code needs more digits than the requested length
    CodeTooLarge { code: Code, length: usize },
    /// Character is not a digit in canonical string form
    InvalidCharacter { character: char },
}

impl core::fmt::Display for EncodingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EncodingError::NonIntegral => write!(f, "Symbols have to be integral"),
            EncodingError::NegativeSymbol { symbol } => {
                write!(f, "Symbols have to be non-negative, got {symbol}")
            }
            EncodingError::SymbolOutOfRange { symbol, base } => {
                write!(f, "Symbol {symbol} is not a digit in base {base}")
            }
            EncodingError::InvalidBase { base } => write!(f, "Unsupported base {base}"),
            EncodingError::CodeOverflow => write!(f, "Code does not fit in 128 bits"),
            EncodingError::CodeTooLarge { code, length } => {
                write!(f, "{code} does not encode an array of {length} elements")
            }
            EncodingError::InvalidCharacter { character } => {
                write!(f, "Invalid symbol character {character:?}")
            }
        }
    }
}

/// Errors that can occur in any core stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Shape precondition violated
    Shape(ShapeError),
    /// Symbol or code could not be encoded
    Encoding(EncodingError),
    /// Reference table has no entry for a block
    MissingKey(Box<BlockKey>),
    /// Binary table data is malformed
    InvalidFormat(&'static str),
}

impl core::fmt::Display for CoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CoreError::Shape(err) => write!(f, "{err}"),
            CoreError::Encoding(err) => write!(f, "{err}"),
            CoreError::MissingKey(key) => {
                write!(f, "CTM dataset does not contain object {key}")
            }
            CoreError::InvalidFormat(msg) => write!(f, "Invalid CTM table format: {msg}"),
        }
    }
}

impl core::error::Error for ShapeError {}
impl core::error::Error for EncodingError {}
impl core::error::Error for CoreError {}

impl From<ShapeError> for CoreError {
    fn from(err: ShapeError) -> Self {
        CoreError::Shape(err)
    }
}

impl From<EncodingError> for CoreError {
    fn from(err: EncodingError) -> Self {
        CoreError::Encoding(err)
    }
}

/// Result type for core operations
pub type Result<T> = core::result::Result<T, CoreError>;
