//! JSON documents of CTM tables
//!
//! ```json
//! { "base": 2, "ndim": 2, "entries": { "00-01": 11.3, "1111-1111-1111-1111": 22.0067 } }
//! ```
//!
//! Entry keys are canonical block strings. Entries are written sorted so
//! regenerated files diff cleanly.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use bdm_core::{array_to_string, decode_array, ReferenceTable, DEFAULT_SEPARATOR};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::CtmTable;
use crate::error::Result;

#[derive(Debug, Serialize, Deserialize)]
struct TableDocument {
    base: u32,
    ndim: usize,
    entries: BTreeMap<String, f64>,
}

impl CtmTable {
    /// Parse a table from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_document(serde_json::from_str(json)?)
    }

    /// Read a table from a JSON file
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let table = Self::from_document(serde_json::from_reader(reader)?)?;
        info!(
            "Loaded CTM table from {}: {} entries (base {}, {}D)",
            path.display(),
            table.len(),
            table.base,
            table.ndim
        );
        Ok(table)
    }

    /// Serialize the table as a JSON document
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document()?)?)
    }

    /// Write the table as a JSON file
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &self.to_document()?)?;
        writer.flush()?;
        info!("Wrote {} CTM entries to {}", self.len(), path.display());
        Ok(())
    }

    fn from_document(doc: TableDocument) -> Result<Self> {
        let mut table = Self::new(doc.base, doc.ndim)?;
        if doc.entries.is_empty() {
            warn!("CTM table document has no entries");
        }
        for (block, value) in &doc.entries {
            table.insert_str(block, *value)?;
        }
        Ok(table)
    }

    fn to_document(&self) -> Result<TableDocument> {
        let mut entries = BTreeMap::new();
        for (key, value) in self.iter() {
            let block = decode_array(key.code(), key.shape(), self.base)?;
            entries.insert(array_to_string(&block.view(), DEFAULT_SEPARATOR)?, value);
        }
        Ok(TableDocument {
            base: self.base,
            ndim: self.ndim,
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BdmError;
    use bdm_core::BlockKey;

    #[test]
    fn test_from_json_str() {
        let table = CtmTable::from_json_str(
            r#"{"base": 2, "ndim": 2, "entries": {"0000-0000-0000-0000": 20.5, "10-01": 11.25}}"#,
        )
        .unwrap();
        assert_eq!(table.base(), 2);
        assert_eq!(table.get(&BlockKey::symmetric(2, 4, 0)), Some(20.5));
        assert_eq!(table.get(&BlockKey::symmetric(2, 2, 9)), Some(11.25));
    }

    #[test]
    fn test_document_roundtrip_is_sorted() {
        let mut table = CtmTable::new(2, 1).unwrap();
        table.insert_str("10", 4.0).unwrap();
        table.insert_str("0", 2.0).unwrap();
        table.insert_str("01", 3.0).unwrap();

        let json = table.to_json_string().unwrap();
        let zero = json.find("\"0\"").unwrap();
        let one_zero = json.find("\"10\"").unwrap();
        assert!(zero < one_zero);
        assert_eq!(CtmTable::from_json_str(&json).unwrap(), table);
    }

    #[test]
    fn test_rejects_bad_documents() {
        assert!(matches!(
            CtmTable::from_json_str("{\"base\": 2}"),
            Err(BdmError::Json(_))
        ));
        assert!(matches!(
            CtmTable::from_json_str(r#"{"base": 2, "ndim": 2, "entries": {"012-000": 1.0}}"#),
            Err(BdmError::Core(_))
        ));
    }
}
