//! Final step: schema conformance of the run outputs.

use lsstcam_ci_types::SchemaError;

use crate::command::CommandSpec;
use crate::error::HarnessError;
use crate::schema;
use crate::steps::{Step, StepContext};

/// `test`: check every configured output table against the DDL.
///
/// Runs in-process; the external commands are behind it by this point.
pub struct SchemaTest;

impl Step for SchemaTest {
    fn name(&self) -> &'static str {
        "test"
    }

    fn plan(&self, _ctx: &StepContext) -> Result<Vec<CommandSpec>, HarnessError> {
        Ok(vec![])
    }

    fn run(&self, ctx: &StepContext) -> Result<(), HarnessError> {
        let outcomes = schema::run_checks(ctx)?;
        let failures: Vec<SchemaError> = outcomes
            .into_iter()
            .filter_map(|outcome| outcome.result.err())
            .collect();
        if failures.is_empty() {
            Ok(())
        } else {
            Err(HarnessError::Schema(failures))
        }
    }
}
