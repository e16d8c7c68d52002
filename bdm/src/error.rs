//! Error type of the `bdm` crate.

use bdm_core::{
    array_to_string, decode_array, BlockKey, CoreError, EncodingError, ShapeError,
    DEFAULT_SEPARATOR,
};
use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum BdmError {
    /// A partitioning, encoding or format error from `bdm-core`.
    #[error(transparent)]
    Core(CoreError),

    /// The reference table has no entry for a block.
    #[error("CTM dataset does not contain object '{block}' ({key})")]
    MissingKey { block: String, key: BlockKey },

    /// Configuration values are inconsistent or unsupported.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A reference table could not be built or does not match its use.
    #[error("Invalid CTM table: {0}")]
    InvalidTable(String),

    /// An error originating from I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON table or configuration document is malformed.
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenience `Result` type alias using the crate's `BdmError` type.
pub type Result<T> = std::result::Result<T, BdmError>;

impl BdmError {
    /// Missing key error naming the block in canonical string form
    ///
    /// The block digits are recovered from the key, which needs the base
    /// the code was computed in.
    pub fn missing_key(key: BlockKey, base: u32) -> Self {
        let block = decode_array(key.code(), key.shape(), base)
            .ok()
            .and_then(|array| array_to_string(&array.view(), DEFAULT_SEPARATOR).ok())
            .unwrap_or_else(|| key.to_string());
        BdmError::MissingKey { block, key }
    }

    /// Convert a core error, resolving missing keys against `base`
    pub fn from_core(err: CoreError, base: u32) -> Self {
        match err {
            CoreError::MissingKey(key) => Self::missing_key(*key, base),
            other => BdmError::Core(other),
        }
    }
}

impl From<CoreError> for BdmError {
    fn from(err: CoreError) -> Self {
        BdmError::Core(err)
    }
}

impl From<ShapeError> for BdmError {
    fn from(err: ShapeError) -> Self {
        BdmError::Core(err.into())
    }
}

impl From<EncodingError> for BdmError {
    fn from(err: EncodingError) -> Self {
        BdmError::Core(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_renders_block() {
        let key = BlockKey::symmetric(2, 2, 0b1001);
        let err = BdmError::from_core(CoreError::MissingKey(Box::new(key.clone())), 2);
        match &err {
            BdmError::MissingKey { block, key: k } => {
                assert_eq!(block, "10-01");
                assert_eq!(k, &key);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "CTM dataset does not contain object '10-01' (2x2#9)"
        );
    }

    #[test]
    fn test_core_errors_pass_through() {
        let err = BdmError::from_core(ShapeError::ZeroWidth.into(), 2);
        assert!(matches!(err, BdmError::Core(CoreError::Shape(ShapeError::ZeroWidth))));
        assert_eq!(err.to_string(), "Partition shape has zero width");
    }
}
