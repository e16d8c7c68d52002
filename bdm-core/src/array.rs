//! Dense n-dimensional symbol arrays and strided views
//!
//! Arrays store digits in row-major order. Partitioning works on
//! [`ArrayView`]s so that blocks borrow the parent data instead of
//! copying it.

use alloc::vec::Vec;

use crate::error::{CoreError, ShapeError};
use crate::traits::Symbol;

/// Single symbol of an array, an integer in `[0, base)`
pub type Digit = u32;

/// Number of elements described by a shape, `None` on overflow
pub fn shape_len(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
}

/// Element count of a caller-supplied shape
fn checked_len(shape: &[usize]) -> Result<usize, ShapeError> {
    shape_len(shape).ok_or_else(|| ShapeError::TooLarge {
        shape: shape.into(),
    })
}

/// Row-major strides for a shape
fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = alloc::vec![0; shape.len()];
    let mut acc = 1;
    for (stride, &dim) in strides.iter_mut().zip(shape).rev() {
        *stride = acc;
        acc *= dim;
    }
    strides
}

/// Owned n-dimensional array of digits
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Array {
    shape: Vec<usize>,
    data: Vec<Digit>,
}

impl Array {
    /// Create an array from a shape and row-major digits
    pub fn new(shape: Vec<usize>, data: Vec<Digit>) -> Result<Self, ShapeError> {
        let expected = checked_len(&shape)?;
        if expected != data.len() {
            return Err(ShapeError::LengthMismatch {
                expected,
                found: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Create a one-dimensional array
    pub fn from_vec(data: Vec<Digit>) -> Self {
        Self {
            shape: alloc::vec![data.len()],
            data,
        }
    }

    /// Create an array from caller-side symbols, validating each one
    pub fn from_symbols<S: Symbol>(shape: Vec<usize>, symbols: &[S]) -> Result<Self, CoreError> {
        let data = symbols
            .iter()
            .map(|&s| s.to_digit())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(shape, data)?)
    }

    /// Array of the given shape with every element set to `digit`
    pub fn filled(shape: Vec<usize>, digit: Digit) -> Result<Self, ShapeError> {
        let len = checked_len(&shape)?;
        Ok(Self {
            shape,
            data: alloc::vec![digit; len],
        })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major digits
    pub fn as_slice(&self) -> &[Digit] {
        &self.data
    }

    /// Reinterpret the digits under a new shape with the same element count
    pub fn reshape(self, shape: Vec<usize>) -> Result<Self, ShapeError> {
        Self::new(shape, self.data)
    }

    /// Borrow the whole array as a view
    pub fn view(&self) -> ArrayView<'_> {
        ArrayView {
            data: &self.data,
            offset: 0,
            strides: row_major_strides(&self.shape),
            shape: self.shape.clone(),
        }
    }
}

/// Borrowed strided view into an [`Array`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayView<'a> {
    data: &'a [Digit],
    offset: usize,
    shape: Vec<usize>,
    strides: Vec<usize>,
}

impl<'a> ArrayView<'a> {
    /// View over row-major data with an explicit shape
    pub fn from_slice(shape: Vec<usize>, data: &'a [Digit]) -> Result<Self, ShapeError> {
        let expected = checked_len(&shape)?;
        if expected != data.len() {
            return Err(ShapeError::LengthMismatch {
                expected,
                found: data.len(),
            });
        }
        Ok(Self {
            data,
            offset: 0,
            strides: row_major_strides(&shape),
            shape,
        })
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        // A view never covers more elements than its backing data
        self.shape.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at a multi-index, `None` when out of bounds
    pub fn get(&self, index: &[usize]) -> Option<Digit> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut pos = self.offset;
        for ((&i, &dim), &stride) in index.iter().zip(&self.shape).zip(&self.strides) {
            if i >= dim {
                return None;
            }
            pos += i * stride;
        }
        self.data.get(pos).copied()
    }

    /// Restrict one axis to `start..end`
    pub fn slice_axis(&self, axis: usize, start: usize, end: usize) -> Result<Self, ShapeError> {
        let dim = *self.shape.get(axis).ok_or(ShapeError::OutOfBounds { axis })?;
        if start > end || end > dim {
            return Err(ShapeError::OutOfBounds { axis });
        }
        let mut view = self.clone();
        // An empty slice keeps the offset so it never points past the data.
        if end > start {
            view.offset += start * self.strides[axis];
        }
        view.shape[axis] = end - start;
        Ok(view)
    }

    /// Drop every axis of length one
    pub fn squeeze(&self) -> Self {
        let (shape, strides) = self
            .shape
            .iter()
            .zip(&self.strides)
            .filter(|&(&dim, _)| dim != 1)
            .map(|(&dim, &stride)| (dim, stride))
            .unzip();
        Self {
            data: self.data,
            offset: self.offset,
            shape,
            strides,
        }
    }

    /// Iterate over the digits in row-major order
    pub fn iter(&self) -> ViewIter<'_, 'a> {
        let remaining = self.len();
        ViewIter {
            view: self,
            index: alloc::vec![0; self.shape.len()],
            remaining,
        }
    }

    /// Copy the viewed digits into an owned array
    pub fn to_array(&self) -> Array {
        Array {
            shape: self.shape.clone(),
            data: self.iter().collect(),
        }
    }
}

/// Row-major iterator over the digits of a view
pub struct ViewIter<'v, 'a> {
    view: &'v ArrayView<'a>,
    index: Vec<usize>,
    remaining: usize,
}

impl Iterator for ViewIter<'_, '_> {
    type Item = Digit;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let pos = self.view.offset
            + self
                .index
                .iter()
                .zip(&self.view.strides)
                .map(|(i, s)| i * s)
                .sum::<usize>();

        // Odometer step, last axis fastest
        for axis in (0..self.index.len()).rev() {
            self.index[axis] += 1;
            if self.index[axis] < self.view.shape[axis] {
                break;
            }
            self.index[axis] = 0;
        }

        Some(self.view.data[pos])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ViewIter<'_, '_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn grid() -> Array {
        // 0 1 2
        // 3 4 5
        Array::new(vec![2, 3], vec![0, 1, 2, 3, 4, 5]).unwrap()
    }

    #[test]
    fn test_new_checks_length() {
        assert_eq!(
            Array::new(vec![2, 2], vec![0, 1, 0]),
            Err(ShapeError::LengthMismatch {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_overflowing_shape_is_an_error() {
        let huge = vec![usize::MAX, 2];
        assert_eq!(
            Array::new(huge.clone(), vec![0]),
            Err(ShapeError::TooLarge {
                shape: huge.clone()
            })
        );
        assert!(Array::filled(huge.clone(), 0).is_err());
        assert!(ArrayView::from_slice(huge, &[0]).is_err());
        assert_eq!(shape_len(&[1 << 40, 1 << 40]), None);
        assert_eq!(shape_len(&[4, 4]), Some(16));
    }

    #[test]
    fn test_view_iterates_row_major() {
        let arr = grid();
        let digits: Vec<_> = arr.view().iter().collect();
        assert_eq!(digits, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_slice_axis() {
        let arr = grid();
        let cols = arr.view().slice_axis(1, 1, 3).unwrap();
        assert_eq!(cols.shape(), &[2, 2]);
        assert_eq!(cols.iter().collect::<Vec<_>>(), vec![1, 2, 4, 5]);

        let row = cols.slice_axis(0, 1, 2).unwrap();
        assert_eq!(row.iter().collect::<Vec<_>>(), vec![4, 5]);
        assert_eq!(row.get(&[0, 1]), Some(5));
        assert_eq!(row.get(&[1, 0]), None);

        assert_eq!(
            arr.view().slice_axis(0, 1, 3),
            Err(ShapeError::OutOfBounds { axis: 0 })
        );
    }

    #[test]
    fn test_squeeze() {
        let arr = Array::new(vec![1, 3, 1], vec![7, 8, 9]).unwrap();
        let view = arr.view().squeeze();
        assert_eq!(view.shape(), &[3]);
        assert_eq!(view.to_array(), Array::from_vec(vec![7, 8, 9]));
    }

    #[test]
    fn test_empty_view() {
        let arr = Array::from_vec(vec![]);
        assert!(arr.view().is_empty());
        assert_eq!(arr.view().iter().count(), 0);
    }

    #[test]
    fn test_from_symbols_rejects_negative() {
        let err = Array::from_symbols(vec![3], &[0i32, -1, 1]).unwrap_err();
        assert_eq!(
            err,
            CoreError::Encoding(crate::EncodingError::NegativeSymbol { symbol: -1 })
        );
    }
}
