use std::path::Path;

use anyhow::Result;

use lsstcam_ci_engine::schema;
use lsstcam_ci_engine::RunOptions;

/// Execute the `check-schema` command: validate output table schemas.
pub fn execute(config_path: Option<&Path>) -> Result<()> {
    let ctx = super::load_context(config_path, RunOptions::default())?;
    let outcomes = schema::run_checks(&ctx)?;

    let mut failed = 0usize;
    for outcome in &outcomes {
        if let Err(err) = &outcome.result {
            failed += 1;
            println!("{:<28} FAILED  (dataset '{}')", outcome.table, outcome.dataset);
            println!("    {err}");
        } else {
            println!("{:<28} OK      (dataset '{}')", outcome.table, outcome.dataset);
        }
    }

    if failed == 0 {
        println!("\nAll {} schema check(s) passed.", outcomes.len());
        Ok(())
    } else {
        anyhow::bail!("{failed} of {} schema check(s) failed", outcomes.len())
    }
}
