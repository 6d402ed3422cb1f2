//! Schema conformance against a real parquet file.
//!
//! Writes a parquet footer the way the pipeline's table outputs are
//! written, reads it back, and validates it against a felis fixture.

use std::fs::File;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use lsstcam_ci_engine::schema::{observe, validate};
use lsstcam_ci_types::FelisSchema;

const DDL_FIXTURE: &str = r#"
name: lsstcam
tables:
  - name: Object
    columns:
      - name: objectId
        datatype: long
      - name: coord_ra
        datatype: double
      - name: g_psfFlux
        datatype: float
      - name: detect_isPrimary
        datatype: boolean
      - name: obsStart
        datatype: timestamp
      - name: g_cModelMag
        datatype: float
      - name: g_cModelMagErr
        datatype: float
"#;

fn write_object_parquet(path: &std::path::Path) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("index", DataType::Int64, false),
        Field::new("objectId", DataType::Int64, false),
        Field::new("coord_ra", DataType::Float64, true),
        Field::new("g_psfFlux", DataType::Float32, true),
        Field::new("detect_isPrimary", DataType::Boolean, true),
        Field::new(
            "obsStart",
            DataType::Timestamp(TimeUnit::Nanosecond, None),
            true,
        ),
        Field::new("forcedSourceId", DataType::Int64, true),
    ]));
    let file = File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema.clone(), None).unwrap();
    writer.write(&RecordBatch::new_empty(schema)).unwrap();
    writer.close().unwrap();
}

#[test]
fn parquet_footer_yields_dataframe_dtype_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("object_tract10563.parq");
    write_object_parquet(&path);

    let observed = observe::observed_columns(&path).unwrap();
    let as_pairs: Vec<(&str, &str)> = observed
        .iter()
        .map(|(name, dtype)| (name.as_str(), dtype.as_str()))
        .collect();
    assert_eq!(
        as_pairs,
        vec![
            ("index", "int64"),
            ("objectId", "int64"),
            ("coord_ra", "float64"),
            ("g_psfFlux", "float32"),
            ("detect_isPrimary", "bool"),
            ("obsStart", "datetime64[ns]"),
            ("forcedSourceId", "int64"),
        ]
    );
}

#[test]
fn observed_parquet_conforms_to_the_ddl() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("object_tract10563.parq");
    write_object_parquet(&path);

    let ddl = FelisSchema::from_yaml_str(DDL_FIXTURE).unwrap();
    let table = ddl.table("Object").unwrap();
    let observed = observe::observed_columns(&path).unwrap();

    // index, the Mag/MagErr pair, and forcedSourceId all fall under the
    // documented exceptions.
    validate::validate_table(&table.name, table.expected_columns(), observed).unwrap();
}

#[test]
fn a_dropped_column_fails_conformance() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("object_tract10563.parq");
    write_object_parquet(&path);

    let with_extra = format!("{DDL_FIXTURE}      - name: r_psfFlux\n        datatype: float\n");
    let ddl = FelisSchema::from_yaml_str(&with_extra).unwrap();
    let table = ddl.table("Object").unwrap();
    let observed = observe::observed_columns(&path).unwrap();

    let err = validate::validate_table(&table.name, table.expected_columns(), observed)
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("missing from output"));
    assert!(msg.contains("r_psfFlux"));
}
