//! Schema conformance checking of run outputs against the sdm_schemas
//! DDL.

pub mod butler;
pub mod observe;
pub mod validate;

use std::path::Path;

use anyhow::Context;

use lsstcam_ci_types::{FelisSchema, SchemaError};

use crate::config::parser::substitute_env_vars;
use crate::config::types::SchemaCheckConfig;
use crate::error::HarnessError;
use crate::steps::StepContext;

use self::butler::ButlerClient;

/// Outcome of one table check.
#[derive(Debug)]
pub struct CheckOutcome {
    pub dataset: String,
    pub table: String,
    pub result: Result<(), SchemaError>,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run every configured schema check against the run directory.
///
/// All checks run; per-table failures land in the outcomes rather than
/// aborting the pass, matching how CI reads the results.
pub fn run_checks(ctx: &StepContext) -> Result<Vec<CheckOutcome>, HarnessError> {
    let schema = load_ddl(&ctx.config.schema.ddl)?;
    let client = ButlerClient::new(&ctx.run_dir, &ctx.config.collections.output);

    let mut outcomes = Vec::with_capacity(ctx.config.schema.checks.len());
    for check in &ctx.config.schema.checks {
        let result = check_table(&schema, &client, check);
        match &result {
            Ok(()) => {
                tracing::info!(dataset = check.dataset, table = check.table, "Schema check passed");
            }
            Err(err) => {
                tracing::error!(
                    dataset = check.dataset,
                    table = check.table,
                    "Schema check failed: {err}"
                );
            }
        }
        outcomes.push(CheckOutcome {
            dataset: check.dataset.clone(),
            table: check.table.clone(),
            result,
        });
    }
    Ok(outcomes)
}

/// Load the felis DDL, resolving `${VAR}` references in its path.
///
/// The harness reads this file itself, unlike the pipeline paths that
/// the external tools resolve.
pub fn load_ddl(ddl: &str) -> Result<FelisSchema, HarnessError> {
    let path_str = substitute_env_vars(ddl)?;
    let path = Path::new(&path_str);
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read DDL file: {}", path.display()))
        .map_err(HarnessError::Infrastructure)?;
    FelisSchema::from_yaml_str(&raw).map_err(|err| HarnessError::Schema(vec![err]))
}

fn check_table(
    schema: &FelisSchema,
    client: &ButlerClient,
    check: &SchemaCheckConfig,
) -> Result<(), SchemaError> {
    let table = schema.table(&check.table)?;

    let uri = client
        .dataset_uri(&check.dataset, &check.where_clause)
        .map_err(|err| SchemaError::Access {
            table: check.table.clone(),
            message: format!("{err:#}"),
        })?;
    let observed = observe::observed_columns(&uri).map_err(|err| SchemaError::Access {
        table: check.table.clone(),
        message: format!("{err:#}"),
    })?;

    validate::validate_table(&table.name, table.expected_columns(), observed)
}
