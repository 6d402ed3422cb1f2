//! Minimal CLI client for the external data butler.
//!
//! The butler is an opaque collaborator; the only thing the schema
//! check needs from it is the file location of one dataset per table.

use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context, Result};

use crate::executable;

/// Queries dataset locations from a butler repository.
pub struct ButlerClient {
    repo: PathBuf,
    collections: String,
}

impl ButlerClient {
    pub fn new(repo: impl Into<PathBuf>, collections: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            collections: collections.into(),
        }
    }

    /// File path of the first dataset matching the query.
    pub fn dataset_uri(&self, dataset: &str, where_clause: &str) -> Result<PathBuf> {
        let mut command = Command::new(executable::butler());
        command
            .arg("query-datasets")
            .arg(&self.repo)
            .arg(dataset)
            .arg("--collections")
            .arg(&self.collections)
            .arg("--limit")
            .arg("1")
            .arg("--show-uri");
        if !where_clause.is_empty() {
            command.arg("--where").arg(where_clause);
        }

        let output = command
            .output()
            .context("Failed to run butler query-datasets")?;
        if !output.status.success() {
            bail!(
                "butler query-datasets failed for dataset '{dataset}' with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_dataset_uri(&stdout).ok_or_else(|| {
            anyhow::anyhow!("No parquet URI in butler output for dataset '{dataset}'")
        })
    }
}

/// Scan query-datasets table output for the first parquet URI.
///
/// The output is a human-oriented table, so this looks for any
/// whitespace-separated token ending in `.parq`/`.parquet` rather than
/// parsing columns.
fn parse_dataset_uri(stdout: &str) -> Option<PathBuf> {
    for token in stdout.split_whitespace() {
        if token.ends_with(".parq") || token.ends_with(".parquet") {
            let path = token.strip_prefix("file://").unwrap_or(token);
            return Some(PathBuf::from(path));
        }
    }
    None
}
