//! Reference table keys
//!
//! A block is identified by its shape together with the integer code of its
//! digits. The shape is needed because codes alone collide across block
//! sizes (`0011` and `11` share code 3).

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::array::ArrayView;
use crate::encoding::{encode_array, Code};
use crate::error::EncodingError;

/// Canonical lookup key of a block
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockKey {
    shape: Box<[usize]>,
    code: Code,
}

impl BlockKey {
    pub fn new(shape: impl Into<Box<[usize]>>, code: Code) -> Self {
        Self {
            shape: shape.into(),
            code,
        }
    }

    /// Key of the block content seen through `view`
    pub fn from_view(view: &ArrayView<'_>, base: u32) -> Result<Self, EncodingError> {
        let code = encode_array(view, base)?;
        Ok(Self::new(Vec::from(view.shape()), code))
    }

    /// Key of a symmetric block of `ndim` axes with the given width
    pub fn symmetric(ndim: usize, width: usize, code: Code) -> Self {
        Self::new(alloc::vec![width; ndim], code)
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn code(&self) -> Code {
        self.code
    }

    /// Common width if every axis has the same length
    pub fn symmetric_width(&self) -> Option<usize> {
        let (&first, rest) = self.shape.split_first()?;
        rest.iter().all(|&w| w == first).then_some(first)
    }
}

impl core::fmt::Display for BlockKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, dim) in self.shape.iter().enumerate() {
            if i > 0 {
                write!(f, "x")?;
            }
            write!(f, "{dim}")?;
        }
        write!(f, "#{}", self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Array;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_key_includes_shape() {
        let short = Array::from_vec(vec![1, 1]);
        let long = Array::from_vec(vec![0, 0, 1, 1]);
        let a = BlockKey::from_view(&short.view(), 2).unwrap();
        let b = BlockKey::from_view(&long.view(), 2).unwrap();
        assert_eq!(a.code(), b.code());
        assert_ne!(a, b);
    }

    #[test]
    fn test_display() {
        let key = BlockKey::symmetric(2, 4, 65535);
        assert_eq!(key.to_string(), "4x4#65535");
        assert_eq!(key.symmetric_width(), Some(4));
        assert_eq!(BlockKey::new(vec![2, 3], 0).symmetric_width(), None);
    }
}
