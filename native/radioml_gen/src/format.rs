//! `.rml` dataset container
//!
//! ```text
//! +----------+----------------+-------------------+------------------+
//! | RMLTBL01 | header_len u64 | JSON header       | packed records   |
//! | 8 bytes  | little-endian  | header_len bytes  | per record set   |
//! +----------+----------------+-------------------+------------------+
//! ```
//!
//! The header lists every record set with its row count, record size,
//! field layout and attributes. Record sets follow the header in the
//! order listed, each `rows * record_size` bytes of little-endian data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;

pub const MAGIC: &[u8; 8] = b"RMLTBL01";

/// Container format revision
pub const FORMAT_VERSION: u32 = 1;

/// Magic plus header length
pub const PREAMBLE_LEN: usize = 16;

/// One field of a fixed-size record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLayout {
    pub name: String,
    /// Numpy-style element type, e.g. `<i8`, `<f8`, `<f4`
    pub dtype: String,
    /// Byte offset within the record
    pub offset: usize,
    /// Empty for scalars
    #[serde(default)]
    pub shape: Vec<usize>,
}

impl FieldLayout {
    /// Number of elements in one cell, `None` when the shape overflows
    pub fn element_count(&self) -> Option<usize> {
        self.shape.iter().try_fold(1usize, |n, &dim| n.checked_mul(dim))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetHeader {
    pub name: String,
    pub rows: u64,
    pub record_size: u64,
    pub fields: Vec<FieldLayout>,
    #[serde(default)]
    pub attrs: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileHeader {
    pub version: u32,
    /// Parameters of the run that produced the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<GenerationConfig>,
    pub datasets: Vec<DatasetHeader>,
}
