//! Harness run result types.

/// What happened to one step during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Ran to completion in this invocation.
    Completed,
    /// Recorded complete in a previous invocation.
    Skipped,
    /// Dry run: commands planned, nothing executed.
    Planned,
}

/// Per-step outcome.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub name: String,
    pub status: StepStatus,
    pub duration_secs: f64,
}

/// Result of a harness run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub steps: Vec<StepOutcome>,
    pub duration_secs: f64,
}

impl RunReport {
    pub fn completed(&self) -> usize {
        self.count(StepStatus::Completed)
    }

    pub fn skipped(&self) -> usize {
        self.count(StepStatus::Skipped)
    }

    pub fn planned(&self) -> usize {
        self.count(StepStatus::Planned)
    }

    fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|s| s.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_by_status() {
        let report = RunReport {
            steps: vec![
                StepOutcome {
                    name: "butler".into(),
                    status: StepStatus::Skipped,
                    duration_secs: 0.0,
                },
                StepOutcome {
                    name: "qgraph".into(),
                    status: StepStatus::Completed,
                    duration_secs: 12.0,
                },
                StepOutcome {
                    name: "process".into(),
                    status: StepStatus::Completed,
                    duration_secs: 80.0,
                },
            ],
            duration_secs: 92.0,
        };
        assert_eq!(report.completed(), 2);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.planned(), 0);
    }
}
