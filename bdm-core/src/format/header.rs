//! Header and record layout of `.ctm` table files

use core::mem::size_of;

use bytemuck::{Pod, Zeroable};

use crate::encoding::Code;
use crate::error::CoreError;
use crate::key::BlockKey;
use crate::validation::{align_to_8, validate_magic_bytes};

/// File header of a binary CTM table (all integers little-endian)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CtmHeader {
    /// Magic bytes: "BCTM"
    pub magic: [u8; 4],
    /// Format version
    pub version: u8,
    /// Number of axes of every block in the table
    pub ndim: u8,
    /// Padding, always zero
    pub reserved0: [u8; 2],
    /// Alphabet size
    pub base: u32,
    /// Padding, always zero
    pub reserved1: u32,
    /// Number of entry records
    pub entry_count: u64,
    /// Offset of the first entry record from file start
    pub entries_offset: u64,
    /// Reserved space for future extensions
    pub reserved: [u8; 16],
}

impl CtmHeader {
    /// Magic bytes for .ctm files
    pub const MAGIC: [u8; 4] = *b"BCTM";

    /// Current format version
    pub const VERSION: u8 = 1;

    /// Size of the header in bytes
    pub const SIZE: usize = size_of::<Self>();

    /// Header for a table of `entry_count` records placed right after it
    pub const fn new(base: u32, ndim: u8, entry_count: u64) -> Self {
        Self {
            magic: Self::MAGIC,
            version: Self::VERSION,
            ndim,
            reserved0: [0; 2],
            base,
            reserved1: 0,
            entry_count,
            entries_offset: align_to_8(Self::SIZE) as u64,
            reserved: [0; 16],
        }
    }

    /// Validate the header structure
    pub fn is_valid(&self) -> bool {
        self.magic == Self::MAGIC
            && self.version <= Self::VERSION
            && self.base >= 2
            && self.ndim >= 1
    }

    /// Parse header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.len() < Self::SIZE {
            return Err(CoreError::InvalidFormat("buffer shorter than header"));
        }

        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        validate_magic_bytes(&magic, &Self::MAGIC)?;

        let mut reserved = [0u8; 16];
        reserved.copy_from_slice(&bytes[32..48]);

        let header = Self {
            magic,
            version: bytes[4],
            ndim: bytes[5],
            reserved0: [bytes[6], bytes[7]],
            base: read_u32(bytes, 8),
            reserved1: read_u32(bytes, 12),
            entry_count: read_u64(bytes, 16),
            entries_offset: read_u64(bytes, 24),
            reserved,
        };

        if !header.is_valid() {
            return Err(CoreError::InvalidFormat("unsupported header"));
        }
        Ok(header)
    }

    /// Serialize header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes[5] = self.ndim;
        bytes[6..8].copy_from_slice(&self.reserved0);
        bytes[8..12].copy_from_slice(&self.base.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.reserved1.to_le_bytes());
        bytes[16..24].copy_from_slice(&self.entry_count.to_le_bytes());
        bytes[24..32].copy_from_slice(&self.entries_offset.to_le_bytes());
        bytes[32..48].copy_from_slice(&self.reserved);
        bytes
    }
}

impl Default for CtmHeader {
    fn default() -> Self {
        Self::new(2, 1, 0)
    }
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[at..at + 4]);
    u32::from_le_bytes(buf)
}

fn read_u64(bytes: &[u8], at: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[at..at + 8]);
    u64::from_le_bytes(buf)
}

/// One table entry: a symmetric block and its CTM value
///
/// Fields are stored little-endian so a record slice can be cast directly
/// from file bytes with `bytemuck`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct EntryRecord {
    code_lo: u64,
    code_hi: u64,
    value_bits: u64,
    width: u32,
    reserved: u32,
}

impl EntryRecord {
    /// Size of a record in bytes
    pub const SIZE: usize = size_of::<Self>();

    pub fn new(width: u32, code: Code, value: f64) -> Self {
        Self {
            code_lo: (code as u64).to_le(),
            code_hi: ((code >> 64) as u64).to_le(),
            value_bits: value.to_bits().to_le(),
            width: width.to_le(),
            reserved: 0,
        }
    }

    /// Record for a symmetric key, `None` when the key is not symmetric
    pub fn from_key(key: &BlockKey, value: f64) -> Option<Self> {
        let width = u32::try_from(key.symmetric_width()?).ok()?;
        Some(Self::new(width, key.code(), value))
    }

    pub fn width(&self) -> u32 {
        u32::from_le(self.width)
    }

    pub fn code(&self) -> Code {
        (u64::from_le(self.code_hi) as Code) << 64 | u64::from_le(self.code_lo) as Code
    }

    pub fn value(&self) -> f64 {
        f64::from_bits(u64::from_le(self.value_bits))
    }

    /// Lookup key of this record in a table of `ndim` axes
    pub fn to_key(&self, ndim: usize) -> BlockKey {
        BlockKey::symmetric(ndim, self.width() as usize, self.code())
    }
}
