//! Blocking subprocess execution with fail-fast semantics.

use std::process::Command;
use std::time::Instant;

use anyhow::Context;

use crate::command::CommandSpec;
use crate::error::HarnessError;

/// Run one external command to completion, inheriting stdio.
///
/// A non-zero or signalled exit aborts the step: no retry, no timeout,
/// no output capture. The child's stdout/stderr go straight to the CI
/// log.
pub fn run_command(step: &str, spec: &CommandSpec) -> Result<(), HarnessError> {
    tracing::info!(step, command = %spec, "Running external command");
    let start = Instant::now();

    let status = Command::new(&spec.program)
        .args(&spec.args)
        .status()
        .with_context(|| format!("Failed to spawn {}", spec.program.display()))
        .map_err(HarnessError::Infrastructure)?;

    if !status.success() {
        return Err(HarnessError::Command {
            step: step.to_string(),
            command: spec.to_string(),
            status,
        });
    }

    tracing::info!(
        step,
        elapsed_secs = format!("{:.1}", start.elapsed().as_secs_f64()),
        "Command completed"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_failure_is_infrastructure() {
        let spec = CommandSpec::new("/nonexistent/ci-test-binary").arg("create");
        let err = run_command("butler", &spec).unwrap_err();
        assert!(matches!(err, HarnessError::Infrastructure(_)));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_a_command_error() {
        let spec = CommandSpec::new("false");
        let err = run_command("process", &spec).unwrap_err();
        match err {
            HarnessError::Command { step, status, .. } => {
                assert_eq!(step, "process");
                assert!(!status.success());
            }
            other => panic!("expected Command error, got {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_succeeds() {
        let spec = CommandSpec::new("true");
        assert!(run_command("butler", &spec).is_ok());
    }
}
