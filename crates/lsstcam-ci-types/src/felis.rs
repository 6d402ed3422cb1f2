//! Felis DDL schema model.
//!
//! `sdm_schemas` publishes table definitions as felis YAML. Only the
//! parts the conformance check reads are modeled here; the rest of the
//! files (ids, descriptions, index definitions) is ignored on load.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::SchemaError;

/// A felis schema document: a named set of table definitions.
#[derive(Debug, Clone, Deserialize)]
pub struct FelisSchema {
    pub name: String,
    #[serde(default)]
    pub tables: Vec<FelisTable>,
}

/// One table definition within a felis schema.
#[derive(Debug, Clone, Deserialize)]
pub struct FelisTable {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<FelisColumn>,
}

/// One column definition: name plus the DDL logical datatype.
#[derive(Debug, Clone, Deserialize)]
pub struct FelisColumn {
    pub name: String,
    pub datatype: String,
}

impl FelisSchema {
    /// Parse a felis YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Look up a table by name. Exactly one definition must exist.
    pub fn table(&self, name: &str) -> Result<&FelisTable, SchemaError> {
        let matches: Vec<&FelisTable> = self.tables.iter().filter(|t| t.name == name).collect();
        match matches.len() {
            0 => Err(SchemaError::UnknownTable {
                table: name.to_string(),
            }),
            1 => Ok(matches[0]),
            count => Err(SchemaError::DuplicateTable {
                table: name.to_string(),
                count,
            }),
        }
    }
}

impl FelisTable {
    /// Column name to DDL datatype, in a deterministic order.
    pub fn expected_columns(&self) -> BTreeMap<String, String> {
        self.columns
            .iter()
            .map(|c| (c.name.clone(), c.datatype.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
name: lsstcam
"@id": "#lsstcam"
tables:
  - name: Object
    "@id": "#Object"
    columns:
      - name: objectId
        "@id": "#Object.objectId"
        datatype: long
        description: Unique object identifier.
      - name: coord_ra
        datatype: double
  - name: Source
    columns:
      - name: sourceId
        datatype: long
"##;

    #[test]
    fn parses_schema_ignoring_unknown_keys() {
        let schema = FelisSchema::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(schema.name, "lsstcam");
        assert_eq!(schema.tables.len(), 2);
        assert_eq!(schema.tables[0].columns.len(), 2);
        assert_eq!(schema.tables[0].columns[0].datatype, "long");
    }

    #[test]
    fn table_lookup_by_name() {
        let schema = FelisSchema::from_yaml_str(SAMPLE).unwrap();
        let table = schema.table("Source").unwrap();
        assert_eq!(table.columns[0].name, "sourceId");
    }

    #[test]
    fn unknown_table_is_an_error() {
        let schema = FelisSchema::from_yaml_str(SAMPLE).unwrap();
        let err = schema.table("DiaObject").unwrap_err();
        assert!(matches!(err, SchemaError::UnknownTable { .. }));
    }

    #[test]
    fn duplicate_table_is_an_error() {
        let yaml = r#"
name: dup
tables:
  - name: Object
    columns: []
  - name: Object
    columns: []
"#;
        let schema = FelisSchema::from_yaml_str(yaml).unwrap();
        let err = schema.table("Object").unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateTable { count: 2, .. }));
    }

    #[test]
    fn expected_columns_maps_name_to_datatype() {
        let schema = FelisSchema::from_yaml_str(SAMPLE).unwrap();
        let expected = schema.table("Object").unwrap().expected_columns();
        assert_eq!(expected["objectId"], "long");
        assert_eq!(expected["coord_ra"], "double");
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = FelisSchema::from_yaml_str("tables: [not: {valid");
        assert!(matches!(result, Err(SchemaError::Ddl(_))));
    }
}
