use std::path::Path;

use anyhow::Result;

use lsstcam_ci_engine::state::BuildState;
use lsstcam_ci_engine::{builtin_steps, RunOptions};

/// Execute the `steps` command: list steps in order with their status.
pub fn execute(config_path: Option<&Path>) -> Result<()> {
    let ctx = super::load_context(config_path, RunOptions::default())?;
    let registry = builtin_steps();
    let state = BuildState::load_or_default(&ctx.run_dir, &ctx.config.harness)?;

    for (index, step) in registry.iter().enumerate() {
        let status = if state.is_complete(step.name()) {
            "done"
        } else {
            "pending"
        };
        println!("{index:>2}  {:<36} {status}", step.name());
    }

    Ok(())
}
