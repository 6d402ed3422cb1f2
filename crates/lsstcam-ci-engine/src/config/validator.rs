//! Semantic validation for parsed harness configuration values.

use std::collections::HashSet;

use anyhow::{bail, Result};

use crate::config::types::HarnessConfig;

/// Validate a parsed harness configuration.
/// Returns `Ok(())` if valid, Err with all validation errors if not.
///
/// # Errors
///
/// Returns an error listing all validation failures found in the config.
pub fn validate_config(config: &HarnessConfig) -> Result<()> {
    let mut errors = Vec::new();

    if config.version != "1.0" {
        errors.push(format!(
            "Unsupported harness version '{}', expected '1.0'",
            config.version
        ));
    }

    if config.harness.trim().is_empty() {
        errors.push("Harness name must not be empty".to_string());
    }

    if config.run_dir.as_os_str().is_empty() {
        errors.push("run_dir must not be empty".to_string());
    }

    if config.instrument.name.trim().is_empty() {
        errors.push("instrument.name must not be empty".to_string());
    }
    if config.instrument.class.trim().is_empty() {
        errors.push("instrument.class must not be empty".to_string());
    }

    for (field, value) in [
        ("collections.input", &config.collections.input),
        ("collections.output", &config.collections.output),
        ("collections.hips", &config.collections.hips),
        ("collections.raw", &config.collections.raw),
    ] {
        if value.trim().is_empty() {
            errors.push(format!("{field} must not be empty"));
        }
    }

    if config.skymap.name.trim().is_empty() {
        errors.push("skymap.name must not be empty".to_string());
    }

    if config.query.data_query.trim().is_empty() {
        errors.push("query.data_query must not be empty".to_string());
    }

    if config.pipelines.drp.trim().is_empty() {
        errors.push("pipelines.drp must not be empty".to_string());
    }

    if config.qgraph_file.trim().is_empty() {
        errors.push("qgraph_file must not be empty".to_string());
    }

    if config.schema.ddl.trim().is_empty() {
        errors.push("schema.ddl must not be empty".to_string());
    }

    let mut seen = HashSet::new();
    for (i, check) in config.schema.checks.iter().enumerate() {
        if check.dataset.trim().is_empty() {
            errors.push(format!("schema.checks[{i}] has an empty dataset"));
        }
        if check.table.trim().is_empty() {
            errors.push(format!("schema.checks[{i}] has an empty table"));
        }
        if !seen.insert((check.dataset.clone(), check.table.clone())) {
            errors.push(format!(
                "schema.checks[{i}] duplicates check for dataset '{}' against table '{}'",
                check.dataset, check.table
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        bail!(
            "Invalid harness configuration:\n  - {}",
            errors.join("\n  - ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::SchemaCheckConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&HarnessConfig::default()).is_ok());
    }

    #[test]
    fn wrong_version_is_rejected() {
        let config = HarnessConfig {
            version: "2.0".into(),
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err().to_string();
        assert!(err.contains("Unsupported harness version '2.0'"));
    }

    #[test]
    fn all_errors_reported_together() {
        let mut config = HarnessConfig {
            harness: String::new(),
            qgraph_file: "  ".into(),
            ..Default::default()
        };
        config.collections.output = String::new();
        let err = validate_config(&config).unwrap_err().to_string();
        assert!(err.contains("Harness name must not be empty"));
        assert!(err.contains("qgraph_file must not be empty"));
        assert!(err.contains("collections.output must not be empty"));
    }

    #[test]
    fn duplicate_schema_checks_rejected() {
        let mut config = HarnessConfig::default();
        config.schema.checks = vec![
            SchemaCheckConfig {
                dataset: "object".into(),
                table: "Object".into(),
                where_clause: "tract = 1".into(),
            },
            SchemaCheckConfig {
                dataset: "object".into(),
                table: "Object".into(),
                where_clause: "tract = 2".into(),
            },
        ];
        let err = validate_config(&config).unwrap_err().to_string();
        assert!(err.contains("duplicates check"));
    }

    #[test]
    fn empty_check_fields_rejected() {
        let mut config = HarnessConfig::default();
        config.schema.checks = vec![SchemaCheckConfig {
            dataset: String::new(),
            table: String::new(),
            where_clause: String::new(),
        }];
        let err = validate_config(&config).unwrap_err().to_string();
        assert!(err.contains("schema.checks[0] has an empty dataset"));
        assert!(err.contains("schema.checks[0] has an empty table"));
    }
}
