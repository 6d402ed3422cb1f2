//! Build state persistence: which steps have completed in the run
//! directory.
//!
//! The state lives beside the data it describes, so wiping the run
//! directory resets the build. Saved after every completed step; an
//! aborted run resumes from the first unrecorded step.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const STATE_FILE: &str = "build_state.json";

const STATE_VERSION: u32 = 1;

/// Completion record for one step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub completed_at: DateTime<Utc>,
    pub duration_secs: f64,
}

/// Per-run-directory build state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildState {
    pub version: u32,
    pub harness: String,
    #[serde(default)]
    pub steps: BTreeMap<String, StepRecord>,
}

impl BuildState {
    pub fn new(harness: &str) -> Self {
        Self {
            version: STATE_VERSION,
            harness: harness.to_string(),
            steps: BTreeMap::new(),
        }
    }

    /// Load the state file from a run directory, or start fresh if none
    /// exists. A present-but-unreadable file is an error, not a reset.
    pub fn load_or_default(run_dir: &Path, harness: &str) -> Result<Self> {
        let path = run_dir.join(STATE_FILE);
        if !path.exists() {
            return Ok(Self::new(harness));
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read build state: {}", path.display()))?;
        let state: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Corrupt build state: {}", path.display()))?;
        if state.version != STATE_VERSION {
            anyhow::bail!(
                "Build state version {} in {} is not supported (expected {})",
                state.version,
                path.display(),
                STATE_VERSION
            );
        }
        Ok(state)
    }

    pub fn is_complete(&self, step: &str) -> bool {
        self.steps.contains_key(step)
    }

    pub fn record(&mut self, step: &str, duration_secs: f64) {
        self.steps.insert(
            step.to_string(),
            StepRecord {
                completed_at: Utc::now(),
                duration_secs,
            },
        );
    }

    /// Forget `from` and every step after it in the given order.
    pub fn invalidate_from(&mut self, ordered_names: &[&str], from: &str) {
        if let Some(start) = ordered_names.iter().position(|name| *name == from) {
            for name in &ordered_names[start..] {
                self.steps.remove(*name);
            }
        }
    }

    /// Write the state file atomically (temp file + rename).
    pub fn save(&self, run_dir: &Path) -> Result<()> {
        fs::create_dir_all(run_dir)
            .with_context(|| format!("Failed to create run dir: {}", run_dir.display()))?;
        let path = run_dir.join(STATE_FILE);
        let tmp = run_dir.join(format!("{STATE_FILE}.tmp"));
        let raw = serde_json::to_string_pretty(self).context("Failed to serialize build state")?;
        fs::write(&tmp, raw)
            .with_context(|| format!("Failed to write build state: {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to move build state into place: {}", path.display()))?;
        Ok(())
    }
}
