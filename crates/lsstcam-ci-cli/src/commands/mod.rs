pub mod check_schema;
pub mod run;
pub mod steps;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use lsstcam_ci_engine::config::{parse_harness, validate_config};
use lsstcam_ci_engine::{RunOptions, StepContext};

/// Package root: `CI_LSSTCAM_DIR` if set, else the current directory.
pub fn pkg_root() -> Result<PathBuf> {
    match std::env::var_os("CI_LSSTCAM_DIR") {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => std::env::current_dir().context("Failed to determine current directory"),
    }
}

/// Parse and validate the harness config, producing a step context.
pub fn load_context(config_path: Option<&Path>, options: RunOptions) -> Result<StepContext> {
    let root = pkg_root()?;
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.join("resources/ci_lsstcam.yaml"));

    let config = parse_harness(&path)
        .with_context(|| format!("Failed to load harness config: {}", path.display()))?;
    validate_config(&config)?;

    tracing::info!(
        harness = config.harness,
        config = %path.display(),
        "Harness configuration loaded"
    );
    Ok(StepContext::new(root, config, options))
}
