//! Block decomposition of n-dimensional arrays
//!
//! The raw decomposition slices the first axis that is longer than the
//! block width and decomposes every slice again, until all axes fit. Views
//! waiting to be decomposed are kept on an explicit stack, so blocks are
//! produced lazily and in nested row-major order (outermost axis slowest).
//!
//! Boundary conditions decide what happens with blocks that end up smaller
//! than the target shape:
//!
//! - [`PartitionIgnore`] drops them,
//! - [`PartitionShift`] slides an overlapping window so that no leftovers
//!   are produced along sliced axes, dropping what still does not fit,
//! - [`PartitionShrink`] re-partitions them with a smaller symmetric shape.

use alloc::vec::Vec;

use crate::array::ArrayView;
use crate::error::ShapeError;
use crate::traits::Partitioner;
use crate::validation::{conform, validate_block_shape};

/// Symmetric block shape: `ndim` axes of the same width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockShape {
    ndim: usize,
    width: usize,
}

impl BlockShape {
    /// Build from explicit dimensions, which must all be equal and positive
    pub fn new(dims: &[usize]) -> Result<Self, ShapeError> {
        let width = validate_block_shape(dims)?;
        Ok(Self {
            ndim: dims.len(),
            width,
        })
    }

    /// Build from dimensionality and width
    pub fn symmetric(ndim: usize, width: usize) -> Result<Self, ShapeError> {
        if ndim == 0 {
            return Err(ShapeError::EmptyBlockShape);
        }
        if width == 0 {
            return Err(ShapeError::ZeroWidth);
        }
        Ok(Self { ndim, width })
    }

    pub const fn ndim(&self) -> usize {
        self.ndim
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of elements of one block
    pub fn len(&self) -> usize {
        self.width.pow(self.ndim as u32)
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn dims(&self) -> Vec<usize> {
        alloc::vec![self.width; self.ndim]
    }

    /// Whether a view has exactly this shape
    pub fn matches(&self, shape: &[usize]) -> bool {
        shape.len() == self.ndim && shape.iter().all(|&w| w == self.width)
    }
}

impl core::fmt::Display for BlockShape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for i in 0..self.ndim {
            if i > 0 {
                write!(f, "x")?;
            }
            write!(f, "{}", self.width)?;
        }
        Ok(())
    }
}

/// Policy for array regions that do not divide evenly into blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "kind"))]
pub enum BoundaryCondition {
    /// Drop leftover regions
    #[default]
    Ignore,
    /// Sliding window with the given shift; non-positive shift is `Ignore`
    Shift { shift: isize },
    /// Re-partition leftovers with smaller shapes down to `min_width`
    Shrink { min_width: usize },
}

impl core::fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoundaryCondition::Ignore => write!(f, "ignore"),
            BoundaryCondition::Shift { shift } => write!(f, "shift:{shift}"),
            BoundaryCondition::Shrink { min_width } => write!(f, "shrink:{min_width}"),
        }
    }
}

/// Raw decomposition into blocks no larger than `width` along any axis
///
/// With a non-positive shift, slices start every `width` elements and the
/// last one may be narrower. With a positive shift, slices start every
/// `shift` elements, up to the last full window.
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    stack: Vec<ArrayView<'a>>,
    width: usize,
    shift: usize,
}

impl<'a> Blocks<'a> {
    /// Decompose a view that already has the block dimensionality
    ///
    /// A zero width is treated as one.
    pub fn new(view: ArrayView<'a>, width: usize, shift: isize) -> Self {
        Self {
            stack: alloc::vec![view],
            width: width.max(1),
            shift: usize::try_from(shift).unwrap_or(0),
        }
    }

    /// Conform `view` to `shape` and decompose it
    pub fn conformed(view: ArrayView<'a>, shape: &BlockShape, shift: isize) -> Result<Self, ShapeError> {
        let view = conform(view, shape.ndim())?;
        Ok(Self::new(view, shape.width(), shift))
    }

    fn split(&mut self, view: ArrayView<'a>, axis: usize) {
        let n = view.shape()[axis];
        let (end, step) = if self.shift > 0 {
            (n - self.width + 1, self.shift)
        } else {
            (n, self.width)
        };

        let first = self.stack.len();
        for start in (0..end).step_by(step) {
            let stop = (start + self.width).min(n);
            // Bounds hold by construction: start < end <= n and stop <= n
            if let Ok(slice) = view.slice_axis(axis, start, stop) {
                self.stack.push(slice);
            }
        }
        // Stack pops from the back, slices must come out in order
        self.stack[first..].reverse();
    }
}

impl<'a> Iterator for Blocks<'a> {
    type Item = ArrayView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(view) = self.stack.pop() {
            match view.shape().iter().position(|&n| n > self.width) {
                None => return Some(view),
                Some(axis) => self.split(view, axis),
            }
        }
        None
    }
}

/// Blocks of exactly the target shape, everything else dropped
#[derive(Debug, Clone)]
pub struct ExactBlocks<'a> {
    inner: Blocks<'a>,
    shape: BlockShape,
}

impl<'a> Iterator for ExactBlocks<'a> {
    type Item = ArrayView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let shape = self.shape;
        self.inner.by_ref().find(|block| shape.matches(block.shape()))
    }
}

/// Blocks of the target shape plus shrunk re-partitions of leftovers
#[derive(Debug, Clone)]
pub struct ShrinkBlocks<'a> {
    /// Nested decompositions, innermost last
    levels: Vec<Blocks<'a>>,
    min_width: usize,
    ndim: usize,
}

impl<'a> Iterator for ShrinkBlocks<'a> {
    type Item = ArrayView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.levels.last_mut()?;
            let width = level.width;
            let Some(block) = level.next() else {
                self.levels.pop();
                continue;
            };

            if block.ndim() == self.ndim && block.shape().iter().all(|&n| n == width) {
                return Some(block);
            }
            let smallest = block.shape().iter().copied().min().unwrap_or(0);
            if smallest >= self.min_width {
                self.levels.push(Blocks::new(block, smallest, 0));
            }
        }
    }
}

/// Ignore-leftover boundary condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionIgnore {
    shape: BlockShape,
}

impl PartitionIgnore {
    pub fn new(shape: BlockShape) -> Self {
        Self { shape }
    }
}

impl Partitioner for PartitionIgnore {
    type Blocks<'a> = ExactBlocks<'a>;

    fn block_shape(&self) -> &BlockShape {
        &self.shape
    }

    fn partition<'a>(&self, array: ArrayView<'a>) -> Result<Self::Blocks<'a>, ShapeError> {
        Ok(ExactBlocks {
            inner: Blocks::conformed(array, &self.shape, 0)?,
            shape: self.shape,
        })
    }
}

/// Sliding-window boundary condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionShift {
    shape: BlockShape,
    shift: isize,
}

impl PartitionShift {
    pub fn new(shape: BlockShape, shift: isize) -> Self {
        Self { shape, shift }
    }

    pub fn shift(&self) -> isize {
        self.shift
    }
}

impl Partitioner for PartitionShift {
    type Blocks<'a> = ExactBlocks<'a>;

    fn block_shape(&self) -> &BlockShape {
        &self.shape
    }

    fn partition<'a>(&self, array: ArrayView<'a>) -> Result<Self::Blocks<'a>, ShapeError> {
        Ok(ExactBlocks {
            inner: Blocks::conformed(array, &self.shape, self.shift)?,
            shape: self.shape,
        })
    }
}

/// Shrinking-shape boundary condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionShrink {
    shape: BlockShape,
    min_width: usize,
}

impl PartitionShrink {
    pub fn new(shape: BlockShape, min_width: usize) -> Result<Self, ShapeError> {
        if min_width == 0 {
            return Err(ShapeError::InvalidMinWidth { min_width });
        }
        Ok(Self { shape, min_width })
    }

    pub fn min_width(&self) -> usize {
        self.min_width
    }
}

impl Partitioner for PartitionShrink {
    type Blocks<'a> = ShrinkBlocks<'a>;

    fn block_shape(&self) -> &BlockShape {
        &self.shape
    }

    fn partition<'a>(&self, array: ArrayView<'a>) -> Result<Self::Blocks<'a>, ShapeError> {
        Ok(ShrinkBlocks {
            levels: alloc::vec![Blocks::conformed(array, &self.shape, 0)?],
            min_width: self.min_width,
            ndim: self.shape.ndim(),
        })
    }
}

/// Partitioner selected by a [`BoundaryCondition`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionStrategy {
    Ignore(PartitionIgnore),
    Shift(PartitionShift),
    Shrink(PartitionShrink),
}

impl PartitionStrategy {
    pub fn new(shape: BlockShape, boundary: BoundaryCondition) -> Result<Self, ShapeError> {
        Ok(match boundary {
            BoundaryCondition::Ignore => Self::Ignore(PartitionIgnore::new(shape)),
            BoundaryCondition::Shift { shift } => Self::Shift(PartitionShift::new(shape, shift)),
            BoundaryCondition::Shrink { min_width } => {
                Self::Shrink(PartitionShrink::new(shape, min_width)?)
            }
        })
    }

    pub fn boundary(&self) -> BoundaryCondition {
        match self {
            Self::Ignore(_) => BoundaryCondition::Ignore,
            Self::Shift(p) => BoundaryCondition::Shift { shift: p.shift },
            Self::Shrink(p) => BoundaryCondition::Shrink {
                min_width: p.min_width,
            },
        }
    }
}

/// Blocks produced by a [`PartitionStrategy`]
#[derive(Debug, Clone)]
pub enum StrategyBlocks<'a> {
    Exact(ExactBlocks<'a>),
    Shrink(ShrinkBlocks<'a>),
}

impl<'a> Iterator for StrategyBlocks<'a> {
    type Item = ArrayView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            StrategyBlocks::Exact(blocks) => blocks.next(),
            StrategyBlocks::Shrink(blocks) => blocks.next(),
        }
    }
}

impl Partitioner for PartitionStrategy {
    type Blocks<'a> = StrategyBlocks<'a>;

    fn block_shape(&self) -> &BlockShape {
        match self {
            Self::Ignore(p) => p.block_shape(),
            Self::Shift(p) => p.block_shape(),
            Self::Shrink(p) => p.block_shape(),
        }
    }

    fn partition<'a>(&self, array: ArrayView<'a>) -> Result<Self::Blocks<'a>, ShapeError> {
        Ok(match self {
            Self::Ignore(p) => StrategyBlocks::Exact(p.partition(array)?),
            Self::Shift(p) => StrategyBlocks::Exact(p.partition(array)?),
            Self::Shrink(p) => StrategyBlocks::Shrink(p.partition(array)?),
        })
    }
}
