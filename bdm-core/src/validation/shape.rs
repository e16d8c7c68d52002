//! Shape validation for block decomposition
//!
//! Block shapes must be symmetric and dataset views must have the same
//! dimensionality as the blocks they are cut into.

use crate::array::ArrayView;
use crate::error::ShapeError;

/// Validate a block shape and return its common width
pub fn validate_block_shape(shape: &[usize]) -> Result<usize, ShapeError> {
    let (&width, rest) = shape.split_first().ok_or(ShapeError::EmptyBlockShape)?;
    if rest.iter().any(|&w| w != width) {
        return Err(ShapeError::AsymmetricBlock {
            shape: shape.into(),
        });
    }
    if width == 0 {
        return Err(ShapeError::ZeroWidth);
    }
    Ok(width)
}

/// Bring a view to `ndim` dimensions
///
/// A view with a different dimensionality is squeezed first; if that does
/// not help the shapes are not conformable.
pub fn conform<'a>(view: ArrayView<'a>, ndim: usize) -> Result<ArrayView<'a>, ShapeError> {
    if view.ndim() == ndim {
        return Ok(view);
    }
    let squeezed = view.squeeze();
    if squeezed.ndim() != ndim {
        return Err(ShapeError::NotConformable {
            array_ndim: view.ndim(),
            block_ndim: ndim,
        });
    }
    Ok(squeezed)
}
