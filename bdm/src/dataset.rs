//! Registry of the published CTM datasets
//!
//! Dataset names follow the `ctm-bX-dY` scheme: alphabet size `X` and the
//! largest block shape `Y`. Table files are looked up by name in a
//! directory, as `<name>.ctm` or `<name>.json`.

use std::path::Path;

use bdm_core::ReferenceTable;
use log::{info, warn};

use crate::config::BdmConfig;
use crate::error::{BdmError, Result};
use crate::table::CtmTable;

/// Description of a reference CTM dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtmDataset {
    pub name: &'static str,
    pub base: u32,
    pub ndim: usize,
    /// Width of the largest blocks in the dataset
    pub width: usize,
    pub description: &'static str,
}

/// Known datasets
pub const CTM_DATASETS: [CtmDataset; 2] = [
    CtmDataset {
        name: "ctm-b2-d12",
        base: 2,
        ndim: 1,
        width: 12,
        description: "Binary strings of length from 1 to 12",
    },
    CtmDataset {
        name: "ctm-b2-d4x4",
        base: 2,
        ndim: 2,
        width: 4,
        description: "Square binary matrices of width from 1 to 4",
    },
];

/// All known datasets
pub fn list_ctm_datasets() -> &'static [CtmDataset] {
    &CTM_DATASETS
}

impl CtmDataset {
    /// Dataset by name, with or without a file extension
    pub fn find(name: &str) -> Option<&'static CtmDataset> {
        let stem = name
            .strip_suffix(".ctm")
            .or_else(|| name.strip_suffix(".json"))
            .unwrap_or(name);
        CTM_DATASETS.iter().find(|d| d.name == stem)
    }

    /// Default binary dataset for a dimensionality
    pub fn for_ndim(ndim: usize) -> Option<&'static CtmDataset> {
        CTM_DATASETS.iter().find(|d| d.ndim == ndim && d.base == 2)
    }

    /// Pipeline configuration matching this dataset
    pub fn config(&self) -> BdmConfig {
        BdmConfig::new(self.ndim, self.width).with_base(self.base)
    }

    /// Load the dataset's table from `dir`
    ///
    /// Prefers the binary `<name>.ctm` file and falls back to
    /// `<name>.json`. The loaded table must agree with the dataset's base
    /// and dimensionality.
    pub fn load_from_dir<P: AsRef<Path>>(&self, dir: P) -> Result<CtmTable> {
        let dir = dir.as_ref();
        let binary = dir.join(format!("{}.ctm", self.name));
        let table = if binary.is_file() {
            CtmTable::read_binary(&binary)?
        } else {
            self.load_json(dir)?
        };

        if table.base() != self.base || table.ndim() != self.ndim {
            return Err(BdmError::InvalidTable(format!(
                "{} expects base {} and {}D blocks, file has base {} and {}D",
                self.name,
                self.base,
                self.ndim,
                table.base(),
                table.ndim()
            )));
        }
        if table.max_width() != Some(self.width) {
            warn!(
                "{}: widest block in file is {:?}, expected {}",
                self.name,
                table.max_width(),
                self.width
            );
        }
        info!("Dataset {} ready with {} entries", self.name, table.len());
        Ok(table)
    }

    #[cfg(feature = "serde")]
    fn load_json(&self, dir: &Path) -> Result<CtmTable> {
        CtmTable::read_json(dir.join(format!("{}.json", self.name)))
    }

    #[cfg(not(feature = "serde"))]
    fn load_json(&self, dir: &Path) -> Result<CtmTable> {
        Err(BdmError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{}.ctm not found in {}", self.name, dir.display()),
        )))
    }
}

impl core::fmt::Display for CtmDataset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.name, self.description)
    }
}
