//! Pipeline execution steps driven through `pipetask`.

use crate::command::CommandSpec;
use crate::error::HarnessError;
use crate::executable;
use crate::steps::{Step, StepContext};

/// Render a boolean for a `--config` override. The far side parses
/// override values as Python literals.
fn py_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// `qgraph`: build and save the quantum graph for the DRP pipeline.
pub struct BuildQuantumGraph;

impl Step for BuildQuantumGraph {
    fn name(&self) -> &'static str {
        "qgraph"
    }

    fn plan(&self, ctx: &StepContext) -> Result<Vec<CommandSpec>, HarnessError> {
        let options = &ctx.options;
        let use_ci_limits = py_bool(!options.no_limit_deblend);
        Ok(vec![CommandSpec::new(executable::pipetask())
            .arg("--long-log")
            .arg("qgraph")
            .arg("-d")
            .arg(&ctx.config.query.data_query)
            .arg("-b")
            .arg(ctx.run_dir_arg())
            .arg("--input")
            .arg(&ctx.config.collections.input)
            .arg("--output")
            .arg(&ctx.config.collections.output)
            .arg("-p")
            .arg(&ctx.config.pipelines.drp)
            .arg("--skip-existing")
            .arg("--save-qgraph")
            .path_arg(ctx.run_dir.join(&ctx.config.qgraph_file))
            .arg("--config")
            .arg(format!(
                "reprocessVisitImage:deblend.useCiLimits={use_ci_limits}"
            ))
            .arg("--config")
            .arg(format!(
                "deblendCoaddFootprints:multibandDeblend.processSingles={}",
                py_bool(options.process_singles)
            ))
            .arg("--config")
            .arg(format!(
                "deblendCoaddFootprints:multibandDeblend.useCiLimits={use_ci_limits}"
            ))])
    }
}

/// `process`: execute the saved quantum graph.
pub struct RunPipeline;

impl Step for RunPipeline {
    fn name(&self) -> &'static str {
        "process"
    }

    fn plan(&self, ctx: &StepContext) -> Result<Vec<CommandSpec>, HarnessError> {
        Ok(vec![CommandSpec::new(executable::pipetask())
            .arg("--long-log")
            .arg("run")
            .arg("-j")
            .arg(ctx.options.num_cores.to_string())
            .arg("-b")
            .arg(ctx.run_dir_arg())
            .arg("--input")
            .arg(&ctx.config.collections.input)
            .arg("--output")
            .arg(&ctx.config.collections.output)
            .arg("--register-dataset-types")
            .arg("--skip-existing")
            .arg("--qgraph")
            .path_arg(ctx.run_dir.join(&ctx.config.qgraph_file))])
    }
}

/// `hips`: generate HiPS tiles from the processed collection.
pub struct GenerateHips;

impl Step for GenerateHips {
    fn name(&self) -> &'static str {
        "hips"
    }

    fn plan(&self, ctx: &StepContext) -> Result<Vec<CommandSpec>, HarnessError> {
        let hips_dir = ctx.run_dir.join("hips");
        let hips_base = hips_dir.display();
        Ok(vec![CommandSpec::new(executable::pipetask())
            .arg("--long-log")
            .arg("run")
            .arg("-j")
            .arg(ctx.options.num_cores.to_string())
            .arg("-b")
            .arg(ctx.run_dir_arg())
            .arg("-i")
            .arg(&ctx.config.collections.output)
            .arg("--output")
            .arg(&ctx.config.collections.hips)
            .arg("-p")
            .path_arg(ctx.resource(&ctx.config.pipelines.hips))
            .arg("-c")
            .arg(format!("generateHips:hips_base_uri={hips_base}"))
            .arg("-c")
            .arg(format!("generateColorHips:hips_base_uri={hips_base}"))
            .arg("--register-dataset-types")])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::HarnessConfig;
    use crate::steps::RunOptions;

    fn ctx_with(options: RunOptions) -> StepContext {
        StepContext::new("/ci", HarnessConfig::default(), options)
    }

    #[test]
    fn qgraph_argv_with_default_options() {
        let mut plan = BuildQuantumGraph.plan(&ctx_with(RunOptions::default())).unwrap();
        let spec = plan.remove(0);
        assert_eq!(
            spec.args,
            vec![
                "--long-log",
                "qgraph",
                "-d",
                "skymap='lsst_cells_v1' AND tract=10563 AND patch=36",
                "-b",
                "/ci/DATA",
                "--input",
                "LSSTCam/ci_m49,pretrained_models/tac_cnn_comcam_2025-02-18,skymaps",
                "--output",
                "LSSTCam/runs/ci_lsstcam",
                "-p",
                "$DRP_PIPE_DIR/pipelines/LSSTCam/DRP-ci_lsstcam.yaml",
                "--skip-existing",
                "--save-qgraph",
                "/ci/DATA/DRP.qgraph",
                "--config",
                "reprocessVisitImage:deblend.useCiLimits=True",
                "--config",
                "deblendCoaddFootprints:multibandDeblend.processSingles=False",
                "--config",
                "deblendCoaddFootprints:multibandDeblend.useCiLimits=True",
            ]
        );
    }

    #[test]
    fn qgraph_deblend_flags_flip_the_python_literals() {
        let options = RunOptions {
            no_limit_deblend: true,
            process_singles: true,
            ..Default::default()
        };
        let plan = BuildQuantumGraph.plan(&ctx_with(options)).unwrap();
        let args = &plan[0].args;
        assert!(args.contains(&"reprocessVisitImage:deblend.useCiLimits=False".to_string()));
        assert!(args.contains(
            &"deblendCoaddFootprints:multibandDeblend.processSingles=True".to_string()
        ));
        assert!(args.contains(
            &"deblendCoaddFootprints:multibandDeblend.useCiLimits=False".to_string()
        ));
    }

    #[test]
    fn process_argv_uses_saved_qgraph_and_core_count() {
        let options = RunOptions {
            num_cores: 4,
            ..Default::default()
        };
        let mut plan = RunPipeline.plan(&ctx_with(options)).unwrap();
        let spec = plan.remove(0);
        assert_eq!(
            spec.args,
            vec![
                "--long-log",
                "run",
                "-j",
                "4",
                "-b",
                "/ci/DATA",
                "--input",
                "LSSTCam/ci_m49,pretrained_models/tac_cnn_comcam_2025-02-18,skymaps",
                "--output",
                "LSSTCam/runs/ci_lsstcam",
                "--register-dataset-types",
                "--skip-existing",
                "--qgraph",
                "/ci/DATA/DRP.qgraph",
            ]
        );
    }

    #[test]
    fn hips_argv_points_both_tasks_at_the_hips_dir() {
        let mut plan = GenerateHips.plan(&ctx_with(RunOptions::default())).unwrap();
        let spec = plan.remove(0);
        assert_eq!(
            spec.args,
            vec![
                "--long-log",
                "run",
                "-j",
                "1",
                "-b",
                "/ci/DATA",
                "-i",
                "LSSTCam/runs/ci_lsstcam",
                "--output",
                "LSSTCam/runs/ci_lsstcam_hips",
                "-p",
                "/ci/resources/hips.yaml",
                "-c",
                "generateHips:hips_base_uri=/ci/DATA/hips",
                "-c",
                "generateColorHips:hips_base_uri=/ci/DATA/hips",
                "--register-dataset-types",
            ]
        );
    }

    #[test]
    fn py_bool_renders_python_literals() {
        assert_eq!(py_bool(true), "True");
        assert_eq!(py_bool(false), "False");
    }
}
