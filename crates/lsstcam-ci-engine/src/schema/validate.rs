//! Column-set and dtype validation against the DDL.
//!
//! The comparison carries four historical exceptions; they are business
//! rules inherited from the production pipeline and must be kept as-is.

use std::collections::{BTreeMap, BTreeSet};

use lsstcam_ci_types::{dtype, SchemaError};

/// Check one observed table against its DDL definition.
///
/// `expected` maps column name to DDL datatype; `observed` pairs column
/// name with the runtime dtype name read from the parquet footer.
pub fn validate_table(
    table: &str,
    mut expected: BTreeMap<String, String>,
    mut observed: Vec<(String, String)>,
) -> Result<(), SchemaError> {
    // A bare positional index survives as an explicit column on both
    // sides; it is not part of the comparison.
    observed.retain(|(name, _)| name != "index");
    expected.remove("index");

    // Mag and MagErr columns are added in the view layer and are not
    // expected in the parquet files.
    expected.retain(|name, _| !(name.ends_with("Mag") || name.ends_with("MagErr")));

    // Bands with no data never appear in DiaObject; the test dataset
    // has no z or y band coverage.
    if table == "DiaObject" {
        expected.retain(|name, _| !(name.starts_with("z_") || name.starts_with("y_")));
    }

    // forcedSourceId and forcedSourceOnDiaObjectId were removed in DP1.
    observed.retain(|(name, _)| name != "forcedSourceId" && name != "forcedSourceOnDiaObjectId");

    let observed_names: BTreeSet<&str> = observed.iter().map(|(name, _)| name.as_str()).collect();
    let expected_names: BTreeSet<&str> = expected.keys().map(String::as_str).collect();
    if observed_names != expected_names {
        return Err(SchemaError::ColumnSetMismatch {
            table: table.to_string(),
            missing: expected_names
                .difference(&observed_names)
                .map(ToString::to_string)
                .collect(),
            unexpected: observed_names
                .difference(&expected_names)
                .map(ToString::to_string)
                .collect(),
        });
    }

    for (name, observed_dtype) in &observed {
        let datatype = &expected[name];
        let pattern = dtype::expected_pattern(datatype)?;
        if !pattern.is_match(observed_dtype) {
            return Err(SchemaError::DtypeMismatch {
                table: table.to_string(),
                column: name.clone(),
                datatype: datatype.clone(),
                pattern: pattern.as_str().to_string(),
                observed: observed_dtype.clone(),
            });
        }
    }

    Ok(())
}
