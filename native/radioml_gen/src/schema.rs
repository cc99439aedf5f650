//! Static column descriptor for the dataset record layout
//!
//! The column list is declared once. Serialization checks the first row
//! against it to fix the array shape, then checks every row against the
//! resulting layout.

use crate::dataset::LabeledVector;
use crate::error::{GenerateError, Result};
use crate::format::FieldLayout;

/// Name of the record set written to the container
pub const DATASET_NAME: &str = "radioml";

/// Attribute key holding a categorical column's sorted labels
pub fn categories_attr(column: &str) -> String {
    format!("{}_categories", column)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// String label stored as an `int64` code into a sorted category list
    Categorical,
    Int64,
    Float64,
    /// Fixed-shape `float32` array, shape taken from the first row
    Float32Array,
}

impl ColumnType {
    /// Little-endian numpy-style type string
    pub fn dtype(&self) -> &'static str {
        match self {
            Self::Categorical | Self::Int64 => "<i8",
            Self::Float64 => "<f8",
            Self::Float32Array => "<f4",
        }
    }

    fn element_size(&self) -> usize {
        match self {
            Self::Categorical | Self::Int64 | Self::Float64 => 8,
            Self::Float32Array => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
}

/// Record columns in storage order
pub const COLUMNS: [Column; 7] = [
    Column { name: "modname", ty: ColumnType::Categorical },
    Column { name: "snr", ty: ColumnType::Int64 },
    Column { name: "realization_index", ty: ColumnType::Int64 },
    Column { name: "window_offset", ty: ColumnType::Int64 },
    Column { name: "samples_per_symbol", ty: ColumnType::Float64 },
    Column { name: "excess_bandwidth", ty: ColumnType::Float64 },
    Column { name: "iq_data", ty: ColumnType::Float32Array },
];

/// One cell of a row, borrowed from the row
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Str(&'a str),
    Int(i64),
    Float(f64),
    /// Row-major `[planes, samples]`
    Array { shape: [usize; 2], planes: [&'a [f32]; 2] },
}

impl Value<'_> {
    fn matches(&self, ty: ColumnType) -> bool {
        matches!(
            (self, ty),
            (Value::Str(_), ColumnType::Categorical)
                | (Value::Int(_), ColumnType::Int64)
                | (Value::Float(_), ColumnType::Float64)
                | (Value::Array { .. }, ColumnType::Float32Array)
        )
    }

    fn kind(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Array { .. } => "array",
        }
    }
}

/// Row cells in `COLUMNS` order
pub fn row_values(row: &LabeledVector) -> [Value<'_>; 7] {
    [
        Value::Str(row.modulation),
        Value::Int(row.snr),
        Value::Int(row.realization_index),
        Value::Int(row.window_offset),
        Value::Float(row.samples_per_symbol),
        Value::Float(row.excess_bandwidth),
        Value::Array {
            shape: row.iq_data.shape(),
            planes: [row.iq_data.real.as_slice(), row.iq_data.imag.as_slice()],
        },
    ]
}

/// Byte layout of one fixed-size record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLayout {
    pub fields: Vec<FieldLayout>,
    pub record_size: usize,
}

/// Fixed record layout derived from the descriptor and the first row
pub fn infer_layout(columns: &[Column], first: &[Value<'_>]) -> Result<RecordLayout> {
    if columns.len() != first.len() {
        return Err(GenerateError::SchemaInference(format!(
            "{} columns declared, first row has {}",
            columns.len(),
            first.len()
        )));
    }

    let mut offset = 0;
    let mut fields = Vec::with_capacity(columns.len());
    for (column, value) in columns.iter().zip(first) {
        if !value.matches(column.ty) {
            return Err(GenerateError::SchemaInference(format!(
                "column {} declared {:?}, first row holds {}",
                column.name,
                column.ty,
                value.kind()
            )));
        }

        let shape: Vec<usize> = match value {
            Value::Array { shape, .. } => {
                if shape[0] != 2 || shape[1] == 0 {
                    return Err(GenerateError::SchemaInference(format!(
                        "column {} has unusable shape {:?}",
                        column.name, shape
                    )));
                }
                shape.to_vec()
            }
            _ => Vec::new(),
        };

        let size = column.ty.element_size() * shape.iter().product::<usize>();
        fields.push(FieldLayout {
            name: column.name.to_string(),
            dtype: column.ty.dtype().to_string(),
            offset,
            shape,
        });
        offset += size;
    }

    Ok(RecordLayout {
        fields,
        record_size: offset,
    })
}
