//! Sequential harness runner: ordered steps, skip-complete, fail fast.

use std::time::Instant;

use crate::error::HarnessError;
use crate::result::{RunReport, StepOutcome, StepStatus};
use crate::state::BuildState;
use crate::steps::{StepContext, StepRegistry};

/// Which steps a harness invocation covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepSelection {
    /// Every step not already recorded complete.
    All,
    /// Invalidate this step and everything after it, then run.
    From(String),
    /// Exactly one step, regardless of its record.
    Only(String),
}

fn index_of_or_err(registry: &StepRegistry, name: &str) -> Result<usize, HarnessError> {
    registry
        .index_of(name)
        .ok_or_else(|| HarnessError::UnknownStep {
            name: name.to_string(),
            known: registry.names().iter().map(ToString::to_string).collect(),
        })
}

/// Run the registered steps in order.
///
/// Strictly sequential; each step blocks until its commands exit. The
/// first failure aborts the run. State is saved after every completed
/// step so an aborted run resumes from where it stopped. A dry run
/// plans command lines without executing and never touches state.
pub fn run_harness(
    registry: &StepRegistry,
    ctx: &StepContext,
    state: &mut BuildState,
    selection: &StepSelection,
) -> Result<RunReport, HarnessError> {
    let names = registry.names();
    let only_index = match selection {
        StepSelection::All => None,
        StepSelection::Only(name) => Some(index_of_or_err(registry, name)?),
        StepSelection::From(name) => {
            index_of_or_err(registry, name)?;
            state.invalidate_from(&names, name);
            if !ctx.options.dry_run {
                state.save(&ctx.run_dir)?;
            }
            None
        }
    };

    let run_start = Instant::now();
    let mut report = RunReport::default();

    for (index, step) in registry.iter().enumerate() {
        if let Some(only) = only_index {
            if index != only {
                continue;
            }
        } else if state.is_complete(step.name()) {
            tracing::info!(step = step.name(), "Step already complete, skipping");
            report.steps.push(StepOutcome {
                name: step.name().to_string(),
                status: StepStatus::Skipped,
                duration_secs: 0.0,
            });
            continue;
        }

        if ctx.options.dry_run {
            let plan = step.plan(ctx)?;
            if plan.is_empty() {
                tracing::info!(step = step.name(), "Would run (in-process)");
            }
            for spec in plan {
                tracing::info!(step = step.name(), command = %spec, "Would run");
            }
            report.steps.push(StepOutcome {
                name: step.name().to_string(),
                status: StepStatus::Planned,
                duration_secs: 0.0,
            });
            continue;
        }

        tracing::info!(step = step.name(), index, "Starting step");
        let step_start = Instant::now();
        step.run(ctx)?;
        let duration_secs = step_start.elapsed().as_secs_f64();

        state.record(step.name(), duration_secs);
        state.save(&ctx.run_dir)?;

        tracing::info!(
            step = step.name(),
            elapsed_secs = format!("{duration_secs:.1}"),
            "Step complete"
        );
        report.steps.push(StepOutcome {
            name: step.name().to_string(),
            status: StepStatus::Completed,
            duration_secs,
        });
    }

    report.duration_secs = run_start.elapsed().as_secs_f64();
    Ok(report)
}
