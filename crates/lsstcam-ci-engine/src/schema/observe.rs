//! Observed column schemas read from parquet outputs.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use arrow::datatypes::{DataType, TimeUnit};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

/// Column names and runtime dtype names from a parquet file footer.
///
/// Only the footer is read; no row data is decoded.
pub fn observed_columns(path: &Path) -> Result<Vec<(String, String)>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open parquet file: {}", path.display()))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .with_context(|| format!("Failed to read parquet footer: {}", path.display()))?;
    Ok(builder
        .schema()
        .fields()
        .iter()
        .map(|field| (field.name().clone(), dtype_name(field.data_type())))
        .collect())
}

/// Render an Arrow type under the dataframe dtype naming the DDL
/// patterns target.
pub fn dtype_name(data_type: &DataType) -> String {
    match data_type {
        DataType::Boolean => "bool".to_string(),
        DataType::Int8 => "int8".to_string(),
        DataType::Int16 => "int16".to_string(),
        DataType::Int32 => "int32".to_string(),
        DataType::Int64 => "int64".to_string(),
        DataType::UInt8 => "uint8".to_string(),
        DataType::UInt16 => "uint16".to_string(),
        DataType::UInt32 => "uint32".to_string(),
        DataType::UInt64 => "uint64".to_string(),
        DataType::Float16 => "float16".to_string(),
        DataType::Float32 => "float32".to_string(),
        DataType::Float64 => "float64".to_string(),
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => "object".to_string(),
        DataType::Binary | DataType::LargeBinary | DataType::BinaryView => "object".to_string(),
        DataType::Timestamp(unit, _) => {
            let suffix = match unit {
                TimeUnit::Second => "s",
                TimeUnit::Millisecond => "ms",
                TimeUnit::Microsecond => "us",
                TimeUnit::Nanosecond => "ns",
            };
            format!("datetime64[{suffix}]")
        }
        other => format!("{other:?}").to_lowercase(),
    }
}
