//! Build step model and ordered registry.
//!
//! Steps run strictly in registration order; each wraps one or more
//! external commands (or, for the schema test, an in-process check).

pub mod butler;
pub mod pipetask;
pub mod schema;

use std::path::{Path, PathBuf};

use crate::command::CommandSpec;
use crate::config::types::HarnessConfig;
use crate::error::HarnessError;
use crate::execution;

/// Runtime options for a harness invocation (not part of the YAML
/// config).
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Worker processes passed to `pipetask run`.
    pub num_cores: u32,
    /// Disable useCiLimits for deblending and process all blends.
    pub no_limit_deblend: bool,
    /// Enable processSingles (isolated objects) for deblending.
    pub process_singles: bool,
    /// Plan commands without executing anything.
    pub dry_run: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            num_cores: 1,
            no_limit_deblend: false,
            process_singles: false,
            dry_run: false,
        }
    }
}

/// Everything a step needs to plan and run its commands.
#[derive(Debug, Clone)]
pub struct StepContext {
    /// Package root; relative config paths resolve against it.
    pub pkg_root: PathBuf,
    /// Butler repository directory for this run.
    pub run_dir: PathBuf,
    pub config: HarnessConfig,
    pub options: RunOptions,
}

impl StepContext {
    pub fn new(pkg_root: impl Into<PathBuf>, config: HarnessConfig, options: RunOptions) -> Self {
        let pkg_root = pkg_root.into();
        // join() keeps an already-absolute run_dir as-is
        let run_dir = pkg_root.join(&config.run_dir);
        Self {
            pkg_root,
            run_dir,
            config,
            options,
        }
    }

    /// Resolve a package-root-relative resource path.
    pub fn resource(&self, path: impl AsRef<Path>) -> PathBuf {
        self.pkg_root.join(path)
    }

    /// The run directory rendered as a command argument.
    pub fn run_dir_arg(&self) -> String {
        self.run_dir.display().to_string()
    }
}

/// One named build step.
pub trait Step {
    fn name(&self) -> &'static str;

    /// External commands this step will run, in order. Empty for
    /// in-process steps.
    fn plan(&self, ctx: &StepContext) -> Result<Vec<CommandSpec>, HarnessError>;

    /// Execute the step. The default runs each planned command,
    /// aborting on the first failure.
    fn run(&self, ctx: &StepContext) -> Result<(), HarnessError> {
        for spec in self.plan(ctx)? {
            execution::run_command(self.name(), &spec)?;
        }
        Ok(())
    }
}

/// Ordered collection of build steps. Registration order is execution
/// order.
#[derive(Default)]
pub struct StepRegistry {
    steps: Vec<Box<dyn Step>>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step. Names must be unique.
    pub fn register(&mut self, step: Box<dyn Step>) -> Result<(), HarnessError> {
        if self.index_of(step.name()).is_some() {
            return Err(HarnessError::Infrastructure(anyhow::anyhow!(
                "step '{}' registered twice",
                step.name()
            )));
        }
        self.steps.push(step);
        Ok(())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Step> {
        self.steps.iter().map(Box::as_ref)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// The harness's built-in steps, in registration order.
pub fn builtin_steps() -> StepRegistry {
    let mut registry = StepRegistry::new();
    for step in [
        Box::new(butler::CreateButler) as Box<dyn Step>,
        Box::new(butler::RegisterInstrument),
        Box::new(butler::WriteCuratedCalibrations),
        Box::new(butler::RegisterSkyMap),
        Box::new(butler::ImportExternal),
        Box::new(butler::DefineVisits),
        Box::new(butler::ImportPretrainedModels),
        Box::new(pipetask::BuildQuantumGraph),
        Box::new(pipetask::RunPipeline),
        Box::new(pipetask::GenerateHips),
        Box::new(schema::SchemaTest),
    ] {
        registry
            .register(step)
            .expect("built-in step names are unique");
    }
    registry
}
