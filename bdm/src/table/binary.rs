//! Binary `.ctm` table files
//!
//! Layout: a [`CtmHeader`] followed by `entry_count` fixed-size
//! [`EntryRecord`]s starting at the 8-byte aligned `entries_offset`.
//! Records are decoded straight from the mapped bytes. Every record goes
//! through [`CtmTable::insert`], so widths and codes are checked before any
//! block is materialized.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use bdm_core::validation::validate_records_region;
use bdm_core::{CoreError, CtmHeader, EntryRecord, ReferenceTable};
#[cfg(feature = "mmap")]
use memmap2::MmapOptions;
use log::info;

use super::CtmTable;
use crate::error::{BdmError, Result};

impl CtmTable {
    /// Parse a table from the bytes of a `.ctm` file
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let header = CtmHeader::from_bytes(bytes)?;
        let count = usize::try_from(header.entry_count)
            .map_err(|_| CoreError::InvalidFormat("entry count too large"))?;
        let offset = usize::try_from(header.entries_offset)
            .map_err(|_| CoreError::InvalidFormat("entries offset too large"))?;
        if offset < CtmHeader::SIZE {
            return Err(CoreError::InvalidFormat("entries overlap the header").into());
        }
        validate_records_region(offset, count, EntryRecord::SIZE, bytes.len())?;

        let region = &bytes[offset..offset + count * EntryRecord::SIZE];
        let mut table = Self::new(header.base, usize::from(header.ndim))?;
        for record in records(region).iter() {
            table.insert(record.to_key(table.ndim), record.value())?;
        }
        Ok(table)
    }

    /// Serialize the table in `.ctm` layout
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let ndim = u8::try_from(self.ndim).map_err(|_| {
            BdmError::InvalidTable(format!("{} dimensions do not fit the binary format", self.ndim))
        })?;
        let header = CtmHeader::new(self.base, ndim, self.len() as u64);
        let offset = header.entries_offset as usize;

        let mut bytes = Vec::with_capacity(offset + self.len() * EntryRecord::SIZE);
        bytes.extend_from_slice(&header.to_bytes());
        bytes.resize(offset, 0);
        for (key, value) in self.sorted_entries() {
            let record = EntryRecord::from_key(key, value).ok_or_else(|| {
                BdmError::InvalidTable(format!("key {key} cannot be stored in binary form"))
            })?;
            bytes.extend_from_slice(bytemuck::bytes_of(&record));
        }
        Ok(bytes)
    }

    /// Read a `.ctm` file through a read-only memory map
    #[cfg(feature = "mmap")]
    pub fn read_binary<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        // SAFETY: Read-only mapping; contents are validated before use and
        // copied into the table before the map is dropped
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        let table = Self::from_bytes(&mmap)?;
        info!(
            "Mapped CTM table {}: {} entries (base {}, {}D)",
            path.display(),
            table.len(),
            table.base,
            table.ndim
        );
        Ok(table)
    }

    /// Read a `.ctm` file into memory
    #[cfg(not(feature = "mmap"))]
    pub fn read_binary<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let table = Self::from_bytes(&std::fs::read(path)?)?;
        info!(
            "Loaded CTM table {}: {} entries (base {}, {}D)",
            path.display(),
            table.len(),
            table.base,
            table.ndim
        );
        Ok(table)
    }

    /// Write the table as a `.ctm` file
    pub fn write_binary<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(&self.to_bytes()?)?;
        writer.flush()?;
        info!("Wrote {} CTM entries to {}", self.len(), path.display());
        Ok(())
    }
}

/// View the record region as records, copying only if it is misaligned
fn records(region: &[u8]) -> Cow<'_, [EntryRecord]> {
    match bytemuck::try_cast_slice(region) {
        Ok(records) => Cow::Borrowed(records),
        Err(_) => Cow::Owned(
            region
                .chunks_exact(EntryRecord::SIZE)
                .map(bytemuck::pod_read_unaligned)
                .collect(),
        ),
    }
}
