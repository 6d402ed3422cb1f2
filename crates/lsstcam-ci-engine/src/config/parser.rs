//! Harness YAML parsing with environment variable substitution.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::config::types::HarnessConfig;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid env var regex"));

/// Substitute `${VAR_NAME}` patterns with environment variable values.
///
/// Bare `$VAR` references are left alone; the external stack tools
/// resolve those themselves.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set.
pub fn substitute_env_vars(input: &str) -> Result<String> {
    let mut result = input.to_string();
    let mut missing = Vec::new();

    for cap in ENV_VAR_RE.captures_iter(input) {
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(val) => {
                result = result.replace(&cap[0], &val);
            }
            Err(_) => {
                missing.push(var_name.to_string());
            }
        }
    }

    if !missing.is_empty() {
        anyhow::bail!("Undefined environment variable(s): {}", missing.join(", "));
    }

    Ok(result)
}

/// Parse a harness YAML string (after env var substitution).
///
/// # Errors
///
/// Returns an error if env var substitution fails or the YAML is invalid.
pub fn parse_harness_str(yaml_str: &str) -> Result<HarnessConfig> {
    let substituted = substitute_env_vars(yaml_str)?;
    let config: HarnessConfig =
        serde_yaml::from_str(&substituted).context("Failed to parse harness YAML")?;
    Ok(config)
}

/// Parse a harness YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the YAML is invalid.
pub fn parse_harness(path: &Path) -> Result<HarnessConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read harness file: {}", path.display()))?;
    parse_harness_str(&content)
}
