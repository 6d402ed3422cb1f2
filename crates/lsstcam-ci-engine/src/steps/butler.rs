//! Butler repository steps: creation, registrations, and imports.

use crate::command::CommandSpec;
use crate::error::HarnessError;
use crate::executable;
use crate::steps::{Step, StepContext};

/// `butler`: create the data repository.
pub struct CreateButler;

impl Step for CreateButler {
    fn name(&self) -> &'static str {
        "butler"
    }

    fn plan(&self, ctx: &StepContext) -> Result<Vec<CommandSpec>, HarnessError> {
        Ok(vec![CommandSpec::new(executable::butler())
            .arg("create")
            .arg(ctx.run_dir_arg())])
    }
}

/// `instrument`: register the instrument class.
pub struct RegisterInstrument;

impl Step for RegisterInstrument {
    fn name(&self) -> &'static str {
        "instrument"
    }

    fn plan(&self, ctx: &StepContext) -> Result<Vec<CommandSpec>, HarnessError> {
        Ok(vec![CommandSpec::new(executable::butler())
            .arg("register-instrument")
            .arg(ctx.run_dir_arg())
            .arg(&ctx.config.instrument.class)])
    }
}

/// `write_calibrations`: write the instrument's curated calibrations.
pub struct WriteCuratedCalibrations;

impl Step for WriteCuratedCalibrations {
    fn name(&self) -> &'static str {
        "write_calibrations"
    }

    fn plan(&self, ctx: &StepContext) -> Result<Vec<CommandSpec>, HarnessError> {
        Ok(vec![CommandSpec::new(executable::butler())
            .arg("write-curated-calibrations")
            .arg(ctx.run_dir_arg())
            .arg(&ctx.config.instrument.name)])
    }
}

/// `skymap`: register the sky map from its config file.
pub struct RegisterSkyMap;

impl Step for RegisterSkyMap {
    fn name(&self) -> &'static str {
        "skymap"
    }

    fn plan(&self, ctx: &StepContext) -> Result<Vec<CommandSpec>, HarnessError> {
        Ok(vec![CommandSpec::new(executable::butler())
            .arg("register-skymap")
            .arg(ctx.run_dir_arg())
            .arg("-C")
            .path_arg(ctx.resource(&ctx.config.skymap.config))
            .arg("-c")
            .arg(format!("name={}", ctx.config.skymap.name))])
    }
}

/// `import_external`: import the curated test dataset.
pub struct ImportExternal;

impl Step for ImportExternal {
    fn name(&self) -> &'static str {
        "import_external"
    }

    fn plan(&self, ctx: &StepContext) -> Result<Vec<CommandSpec>, HarnessError> {
        Ok(vec![CommandSpec::new(executable::butler())
            .arg("import")
            .arg(ctx.run_dir_arg())
            .path_arg(&ctx.config.data.testdata)
            .arg("--export-file")
            .path_arg(ctx.resource(&ctx.config.data.external_file))])
    }
}

/// `define_visits`: group raw exposures into visits.
pub struct DefineVisits;

impl Step for DefineVisits {
    fn name(&self) -> &'static str {
        "define_visits"
    }

    fn plan(&self, ctx: &StepContext) -> Result<Vec<CommandSpec>, HarnessError> {
        Ok(vec![CommandSpec::new(executable::butler())
            .arg("define-visits")
            .arg(ctx.run_dir_arg())
            .arg(&ctx.config.instrument.name)
            .arg("--collections")
            .arg(&ctx.config.collections.raw)])
    }
}

/// `import_external_pretrained_models`: import the pretrained model
/// dataset used by the CNN tasks.
pub struct ImportPretrainedModels;

impl Step for ImportPretrainedModels {
    fn name(&self) -> &'static str {
        "import_external_pretrained_models"
    }

    fn plan(&self, ctx: &StepContext) -> Result<Vec<CommandSpec>, HarnessError> {
        Ok(vec![CommandSpec::new(executable::butler())
            .arg("import")
            .arg(ctx.run_dir_arg())
            .path_arg(&ctx.config.data.pretrained_models)
            .arg("--export-file")
            .path_arg(ctx.resource(&ctx.config.data.pretrained_models_file))])
    }
}
