//! Harness error model.

use std::process::ExitStatus;

use lsstcam_ci_types::SchemaError;

// ---------------------------------------------------------------------------
// HarnessError — categorised errors for CI reporting
// ---------------------------------------------------------------------------

/// Categorized harness error.
///
/// `Command` carries the rendered command line of a failed external
/// invocation; the run aborts on the first one. `Schema` aggregates
/// every conformance failure from a check pass. `Infrastructure` wraps
/// host-side errors (I/O, config, state file).
#[derive(Debug)]
pub enum HarnessError {
    /// A step name that is not in the registry.
    UnknownStep { name: String, known: Vec<String> },
    /// An external command exited unsuccessfully.
    Command {
        step: String,
        command: String,
        status: ExitStatus,
    },
    /// One or more schema conformance failures.
    Schema(Vec<SchemaError>),
    /// Host-side error (I/O, config parse, state file, ...).
    Infrastructure(anyhow::Error),
}

impl std::fmt::Display for HarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownStep { name, known } => {
                write!(f, "unknown step '{}'; known steps: {}", name, known.join(", "))
            }
            Self::Command {
                step,
                command,
                status,
            } => {
                write!(f, "step '{step}' failed with {status}: {command}")
            }
            Self::Schema(errors) => {
                write!(f, "{} schema check(s) failed:", errors.len())?;
                for err in errors {
                    write!(f, "\n  - {err}")?;
                }
                Ok(())
            }
            Self::Infrastructure(e) => write!(f, "{e:#}"),
        }
    }
}

impl std::error::Error for HarnessError {}

impl From<anyhow::Error> for HarnessError {
    fn from(e: anyhow::Error) -> Self {
        Self::Infrastructure(e)
    }
}

impl HarnessError {
    /// Returns the schema failures if this is a `Schema` variant.
    pub fn as_schema_errors(&self) -> Option<&[SchemaError]> {
        match self {
            Self::Schema(errors) => Some(errors),
            _ => None,
        }
    }
}
