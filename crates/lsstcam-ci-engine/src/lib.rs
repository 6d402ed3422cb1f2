//! Engine for the LSSTCam CI harness.
//!
//! Assembles and sequences the external `butler`/`pipetask` commands
//! that build the CI data repository, persists per-step completion so
//! reruns resume where they left off, and checks the parquet outputs
//! against the `sdm_schemas` DDL.

pub mod command;
pub mod config;
pub mod error;
pub mod executable;
pub mod execution;
pub mod result;
pub mod runner;
pub mod schema;
pub mod state;
pub mod steps;

pub use error::HarnessError;
pub use result::{RunReport, StepOutcome, StepStatus};
pub use runner::{run_harness, StepSelection};
pub use steps::{builtin_steps, RunOptions, Step, StepContext, StepRegistry};
