use std::path::Path;

use anyhow::Result;

use lsstcam_ci_engine::state::BuildState;
use lsstcam_ci_engine::{builtin_steps, run_harness, RunOptions, StepSelection, StepStatus};

/// Execute the `run` command: load config, then drive the build steps.
pub fn execute(
    config_path: Option<&Path>,
    options: RunOptions,
    from: Option<String>,
    only: Option<String>,
) -> Result<()> {
    let dry_run = options.dry_run;
    let ctx = super::load_context(config_path, options)?;
    let registry = builtin_steps();
    let mut state = BuildState::load_or_default(&ctx.run_dir, &ctx.config.harness)?;

    let selection = match (from, only) {
        (Some(step), _) => StepSelection::From(step),
        (None, Some(step)) => StepSelection::Only(step),
        (None, None) => StepSelection::All,
    };

    let report = run_harness(&registry, &ctx, &mut state, &selection)?;

    if dry_run {
        println!("Dry run: planned {} step(s), nothing executed.", report.planned());
        return Ok(());
    }

    println!("Harness '{}' completed.", ctx.config.harness);
    println!("  Steps completed: {}", report.completed());
    println!("  Steps skipped:   {}", report.skipped());
    println!("  Duration:        {:.1}s", report.duration_secs);
    for outcome in &report.steps {
        if outcome.status == StepStatus::Completed {
            println!("    {:<36} {:.1}s", outcome.name, outcome.duration_secs);
        }
    }

    Ok(())
}
