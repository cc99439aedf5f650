//! Read `.rml` containers back

use std::fs;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};

use crate::config::GenerationConfig;
use crate::error::{GenerateError, Result};
use crate::format::{DatasetHeader, FieldLayout, FileHeader, FORMAT_VERSION, MAGIC, PREAMBLE_LEN};
use crate::schema::categories_attr;

/// One record set with its raw record bytes
#[derive(Debug, Clone)]
pub struct RecordSet {
    header: DatasetHeader,
    data: Vec<u8>,
}

/// A parsed container
#[derive(Debug, Clone)]
pub struct DatasetFile {
    config: Option<GenerationConfig>,
    record_sets: Vec<RecordSet>,
}

/// One row of the radioml record set, categorical code decoded
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub modname: String,
    pub snr: i64,
    pub realization_index: i64,
    pub window_offset: i64,
    pub samples_per_symbol: f64,
    pub excess_bandwidth: f64,
    /// Row-major `[2, vector_length]`
    pub iq_data: Vec<f32>,
}

pub fn read_dataset(path: impl AsRef<Path>) -> Result<DatasetFile> {
    let bytes = fs::read(path)?;
    decode_dataset(&bytes)
}

pub fn decode_dataset(bytes: &[u8]) -> Result<DatasetFile> {
    if bytes.len() < PREAMBLE_LEN || &bytes[..8] != MAGIC {
        return Err(GenerateError::Format("missing RMLTBL01 magic".into()));
    }
    let header_len = usize::try_from(LittleEndian::read_u64(&bytes[8..PREAMBLE_LEN]))
        .map_err(|_| GenerateError::Format("header length overflows".into()))?;
    let header_end = PREAMBLE_LEN
        .checked_add(header_len)
        .filter(|&end| end <= bytes.len())
        .ok_or_else(|| GenerateError::Format("truncated header".into()))?;

    let header: FileHeader = serde_json::from_slice(&bytes[PREAMBLE_LEN..header_end])?;
    if header.version != FORMAT_VERSION {
        return Err(GenerateError::Format(format!(
            "unsupported format version {}",
            header.version
        )));
    }

    let mut pos = header_end;
    let mut record_sets = Vec::with_capacity(header.datasets.len());
    for set_header in header.datasets {
        check_fields(&set_header)?;
        let size = set_header
            .rows
            .checked_mul(set_header.record_size)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| GenerateError::Format(format!("{} is too large", set_header.name)))?;
        let end = pos
            .checked_add(size)
            .filter(|&end| end <= bytes.len())
            .ok_or_else(|| GenerateError::Format(format!("{} records truncated", set_header.name)))?;

        record_sets.push(RecordSet {
            header: set_header,
            data: bytes[pos..end].to_vec(),
        });
        pos = end;
    }

    if pos != bytes.len() {
        return Err(GenerateError::Format(format!(
            "{} trailing bytes after records",
            bytes.len() - pos
        )));
    }

    Ok(DatasetFile {
        config: header.config,
        record_sets,
    })
}

fn element_size(dtype: &str) -> Option<usize> {
    match dtype {
        "<i8" | "<f8" => Some(8),
        "<f4" => Some(4),
        _ => None,
    }
}

/// Every field must have a known type and fit inside the record
fn check_fields(header: &DatasetHeader) -> Result<()> {
    for field in &header.fields {
        let size = element_size(&field.dtype).ok_or_else(|| {
            GenerateError::Format(format!("field {} has unknown dtype {}", field.name, field.dtype))
        })?;
        let end = field
            .element_count()
            .and_then(|count| count.checked_mul(size))
            .and_then(|bytes| bytes.checked_add(field.offset))
            .and_then(|end| u64::try_from(end).ok())
            .ok_or_else(|| GenerateError::Format(format!("field {} overflows", field.name)))?;
        if end > header.record_size {
            return Err(GenerateError::Format(format!(
                "field {} overruns the {}-byte record",
                field.name, header.record_size
            )));
        }
    }
    Ok(())
}

impl DatasetFile {
    pub fn config(&self) -> Option<&GenerationConfig> {
        self.config.as_ref()
    }

    pub fn record_set(&self, name: &str) -> Option<&RecordSet> {
        self.record_sets.iter().find(|s| s.header.name == name)
    }
}

impl RecordSet {
    pub fn name(&self) -> &str {
        &self.header.name
    }

    pub fn rows(&self) -> usize {
        self.header.rows as usize
    }

    pub fn field(&self, name: &str) -> Result<&FieldLayout> {
        self.header
            .fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| GenerateError::Format(format!("no field {} in {}", name, self.header.name)))
    }

    fn typed_field(&self, name: &str, dtype: &str, scalar: bool) -> Result<&FieldLayout> {
        let field = self.field(name)?;
        if field.dtype != dtype || field.shape.is_empty() != scalar {
            return Err(GenerateError::Format(format!(
                "field {} is {} {:?}, not {}",
                name, field.dtype, field.shape, dtype
            )));
        }
        Ok(field)
    }

    /// Start of field `field` in row `row`
    fn cell(&self, row: usize, field: &FieldLayout) -> &[u8] {
        let start = row * self.header.record_size as usize + field.offset;
        &self.data[start..]
    }

    pub fn int64_column(&self, name: &str) -> Result<Vec<i64>> {
        let field = self.typed_field(name, "<i8", true)?;
        Ok((0..self.rows())
            .map(|row| LittleEndian::read_i64(self.cell(row, field)))
            .collect())
    }

    pub fn float64_column(&self, name: &str) -> Result<Vec<f64>> {
        let field = self.typed_field(name, "<f8", true)?;
        Ok((0..self.rows())
            .map(|row| LittleEndian::read_f64(self.cell(row, field)))
            .collect())
    }

    /// Flattened array cell of one row
    pub fn f32_array(&self, name: &str, row: usize) -> Result<Vec<f32>> {
        let field = self.typed_field(name, "<f4", false)?;
        if row >= self.rows() {
            return Err(GenerateError::Format(format!("row {} out of range", row)));
        }
        let count = field
            .element_count()
            .ok_or_else(|| GenerateError::Format(format!("field {} overflows", name)))?;
        let mut values = vec![0.0f32; count];
        LittleEndian::read_f32_into(&self.cell(row, field)[..values.len() * 4], &mut values);
        Ok(values)
    }

    /// Sorted labels stored for a categorical column
    pub fn categories(&self, name: &str) -> Result<Vec<String>> {
        let key = categories_attr(name);
        let value = self
            .header
            .attrs
            .get(&key)
            .ok_or_else(|| GenerateError::Format(format!("no attribute {}", key)))?;
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Categorical codes decoded through the stored category list
    pub fn categorical_column(&self, name: &str) -> Result<Vec<String>> {
        let labels = self.categories(name)?;
        self.int64_column(name)?
            .into_iter()
            .map(|code| {
                usize::try_from(code)
                    .ok()
                    .and_then(|i| labels.get(i))
                    .cloned()
                    .ok_or_else(|| GenerateError::Format(format!("{} code {} out of range", name, code)))
            })
            .collect()
    }

    /// Decode every row of a radioml record set
    pub fn records(&self) -> Result<Vec<StoredRecord>> {
        let modname = self.categorical_column("modname")?;
        let snr = self.int64_column("snr")?;
        let realization_index = self.int64_column("realization_index")?;
        let window_offset = self.int64_column("window_offset")?;
        let sps = self.float64_column("samples_per_symbol")?;
        let ebw = self.float64_column("excess_bandwidth")?;

        modname
            .into_iter()
            .enumerate()
            .map(|(row, modname)| {
                Ok(StoredRecord {
                    modname,
                    snr: snr[row],
                    realization_index: realization_index[row],
                    window_offset: window_offset[row],
                    samples_per_symbol: sps[row],
                    excess_bandwidth: ebw[row],
                    iq_data: self.f32_array("iq_data", row)?,
                })
            })
            .collect()
    }
}
