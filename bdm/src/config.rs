//! Pipeline configuration
//!
//! A [`BdmConfig`] fixes the array dimensionality, the alphabet size, the
//! block width and the boundary condition. Defaults follow the published
//! CTM datasets: binary alphabet, blocks of 12 symbols for sequences and
//! 4x4 blocks for matrices.

use bdm_core::{BlockShape, BoundaryCondition, PartitionStrategy};

use crate::error::{BdmError, Result};

/// Configuration of a [`Bdm`](crate::Bdm) pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BdmConfig {
    /// Number of array axes
    pub ndim: usize,
    /// Alphabet size
    pub base: u32,
    /// Width of the symmetric blocks
    pub block_width: usize,
    /// Treatment of regions that do not divide evenly into blocks
    #[cfg_attr(feature = "serde", serde(default))]
    pub boundary: BoundaryCondition,
}

impl BdmConfig {
    /// Default block width for a dimensionality with a known CTM dataset
    pub fn default_width(ndim: usize) -> Option<usize> {
        match ndim {
            1 => Some(12),
            2 => Some(4),
            _ => None,
        }
    }

    /// Defaults for one- or two-dimensional arrays
    pub fn for_ndim(ndim: usize) -> Result<Self> {
        let block_width = Self::default_width(ndim).ok_or_else(|| {
            BdmError::Config(format!(
                "no default block width for {ndim}D arrays, set one explicitly"
            ))
        })?;
        Ok(Self {
            ndim,
            base: 2,
            block_width,
            boundary: BoundaryCondition::Ignore,
        })
    }

    /// Configuration for any dimensionality with an explicit block width
    pub fn new(ndim: usize, block_width: usize) -> Self {
        Self {
            ndim,
            base: 2,
            block_width,
            boundary: BoundaryCondition::Ignore,
        }
    }

    /// Set the alphabet size
    pub fn with_base(mut self, base: u32) -> Self {
        self.base = base;
        self
    }

    /// Set the block width
    pub fn with_block_width(mut self, block_width: usize) -> Self {
        self.block_width = block_width;
        self
    }

    /// Set the boundary condition
    pub fn with_boundary(mut self, boundary: BoundaryCondition) -> Self {
        self.boundary = boundary;
        self
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<()> {
        if self.base < 2 {
            return Err(BdmError::Config(format!(
                "base must be at least 2, got {}",
                self.base
            )));
        }
        if self.ndim == 0 {
            return Err(BdmError::Config("ndim must be positive".into()));
        }
        if self.block_width == 0 {
            return Err(BdmError::Config("block width must be positive".into()));
        }
        if let BoundaryCondition::Shrink { min_width } = self.boundary {
            if min_width == 0 || min_width > self.block_width {
                return Err(BdmError::Config(format!(
                    "shrink min width must be in 1..={}, got {min_width}",
                    self.block_width
                )));
            }
        }
        Ok(())
    }

    /// Symmetric block shape
    pub fn block_shape(&self) -> Result<BlockShape> {
        Ok(BlockShape::symmetric(self.ndim, self.block_width)?)
    }

    /// Partitioner implementing the configured boundary condition
    pub fn partitioner(&self) -> Result<PartitionStrategy> {
        self.validate()?;
        Ok(PartitionStrategy::new(self.block_shape()?, self.boundary)?)
    }

    /// Parse a configuration from JSON
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for BdmConfig {
    fn default() -> Self {
        Self::new(2, 4)
    }
}
