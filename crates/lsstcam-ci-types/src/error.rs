//! Typed error model for the schema conformance check.

use thiserror::Error;

/// A single schema conformance failure.
///
/// `ColumnSetMismatch` and `DtypeMismatch` are the CI-facing outcomes;
/// the remaining variants indicate a broken DDL file or an output table
/// that could not be retrieved at all.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("table '{table}' not found in DDL")]
    UnknownTable { table: String },

    #[error("table '{table}' defined {count} times in DDL")]
    DuplicateTable { table: String, count: usize },

    #[error("unknown DDL datatype '{datatype}'")]
    UnknownDatatype { datatype: String },

    #[error(
        "{table}: column sets differ; missing from output: [{}]; unexpected in output: [{}]",
        .missing.join(", "),
        .unexpected.join(", ")
    )]
    ColumnSetMismatch {
        table: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error(
        "{table}.{column}: dtype '{observed}' does not match '{pattern}' (DDL datatype '{datatype}')"
    )]
    DtypeMismatch {
        table: String,
        column: String,
        datatype: String,
        pattern: String,
        observed: String,
    },

    #[error("{table}: {message}")]
    Access { table: String, message: String },

    #[error("invalid DDL: {0}")]
    Ddl(#[from] serde_yaml::Error),
}
