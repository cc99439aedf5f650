//! Dataset serialization
//!
//! The whole file is encoded in memory first; the destination is only
//! created once encoding has succeeded, so a schema error never leaves a
//! partial file behind.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use tracing::info;

use crate::config::GenerationConfig;
use crate::dataset::DatasetTable;
use crate::error::{GenerateError, Result};
use crate::format::{DatasetHeader, FileHeader, FORMAT_VERSION, MAGIC};
use crate::schema::{
    categories_attr, infer_layout, row_values, ColumnType, RecordLayout, Value, COLUMNS, DATASET_NAME,
};

/// Sorted distinct labels for each categorical column
fn collect_categories(table: &DatasetTable) -> BTreeMap<usize, Vec<&str>> {
    let mut sets: BTreeMap<usize, BTreeSet<&str>> = COLUMNS
        .iter()
        .enumerate()
        .filter(|(_, c)| c.ty == ColumnType::Categorical)
        .map(|(i, _)| (i, BTreeSet::new()))
        .collect();

    for row in table {
        for (i, value) in row_values(row).iter().enumerate() {
            if let (Some(set), Value::Str(s)) = (sets.get_mut(&i), value) {
                set.insert(*s);
            }
        }
    }

    sets.into_iter()
        .map(|(i, set)| (i, set.into_iter().collect()))
        .collect()
}

/// Encode a table as a complete `.rml` file image
pub fn encode_table(table: &DatasetTable, config: Option<&GenerationConfig>) -> Result<Vec<u8>> {
    let first = table
        .rows()
        .first()
        .ok_or_else(|| GenerateError::SchemaInference("no rows to infer a layout from".into()))?;
    let RecordLayout { fields, record_size } = infer_layout(&COLUMNS, &row_values(first))?;
    let array_shape = fields
        .iter()
        .find(|f| !f.shape.is_empty())
        .map(|f| f.shape.clone())
        .unwrap_or_default();

    let categories = collect_categories(table);

    let mut records = Vec::with_capacity(table.len() * record_size);
    for (row_idx, row) in table.iter().enumerate() {
        for (col_idx, (column, value)) in COLUMNS.iter().zip(row_values(row)).enumerate() {
            match value {
                Value::Str(s) => {
                    let labels = categories.get(&col_idx).map(Vec::as_slice).unwrap_or(&[]);
                    let code = labels.binary_search(&s).map_err(|_| {
                        GenerateError::SchemaInference(format!(
                            "row {}: {} is not a categorical column",
                            row_idx, column.name
                        ))
                    })?;
                    records.write_i64::<LittleEndian>(code as i64)?;
                }
                Value::Int(v) => records.write_i64::<LittleEndian>(v)?,
                Value::Float(v) => records.write_f64::<LittleEndian>(v)?,
                Value::Array { shape, planes } => {
                    if shape[..] != array_shape[..] {
                        return Err(GenerateError::SchemaInference(format!(
                            "row {}: {} has shape {:?}, expected {:?}",
                            row_idx, column.name, shape, array_shape
                        )));
                    }
                    for plane in planes {
                        for &x in plane {
                            records.write_f32::<LittleEndian>(x)?;
                        }
                    }
                }
            }
        }
    }

    let attrs = categories
        .iter()
        .map(|(&i, labels)| (categories_attr(COLUMNS[i].name), serde_json::json!(labels)))
        .collect();

    let header = FileHeader {
        version: FORMAT_VERSION,
        config: config.cloned(),
        datasets: vec![DatasetHeader {
            name: DATASET_NAME.to_string(),
            rows: table.len() as u64,
            record_size: record_size as u64,
            fields,
            attrs,
        }],
    };
    let header_json = serde_json::to_vec(&header)?;

    let mut out = Vec::with_capacity(16 + header_json.len() + records.len());
    out.extend_from_slice(MAGIC);
    out.write_u64::<LittleEndian>(header_json.len() as u64)?;
    out.extend_from_slice(&header_json);
    out.extend_from_slice(&records);
    Ok(out)
}

/// Encode and write a table, returning the number of records written
pub fn write_table(
    table: &DatasetTable,
    config: Option<&GenerationConfig>,
    path: impl AsRef<Path>,
) -> Result<usize> {
    let path = path.as_ref();
    let bytes = encode_table(table, config)?;
    fs::write(path, &bytes)?;
    info!(
        path = %path.display(),
        records = table.len(),
        bytes = bytes.len(),
        "wrote dataset"
    );
    Ok(table.len())
}
