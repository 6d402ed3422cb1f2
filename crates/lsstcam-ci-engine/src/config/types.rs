//! Serde model of the harness YAML.
//!
//! Every field has a default reproducing the original ci_lsstcam
//! constants, so a config file only needs to override what differs.
//! Paths that start with `$VAR` are passed through to the external tools
//! unexpanded; those tools resolve stack environment variables
//! themselves.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_harness")]
    pub harness: String,
    /// Butler repository directory, relative to the package root unless
    /// absolute.
    #[serde(default = "default_run_dir")]
    pub run_dir: PathBuf,
    #[serde(default)]
    pub instrument: InstrumentConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub collections: CollectionsConfig,
    #[serde(default)]
    pub skymap: SkymapConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub pipelines: PipelinesConfig,
    #[serde(default = "default_qgraph_file")]
    pub qgraph_file: String,
    #[serde(default)]
    pub schema: SchemaConfig,
}

fn default_version() -> String {
    "1.0".to_string()
}
fn default_harness() -> String {
    "ci_lsstcam".to_string()
}
fn default_run_dir() -> PathBuf {
    PathBuf::from("DATA")
}
fn default_qgraph_file() -> String {
    "DRP.qgraph".to_string()
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            harness: default_harness(),
            run_dir: default_run_dir(),
            instrument: InstrumentConfig::default(),
            data: DataConfig::default(),
            collections: CollectionsConfig::default(),
            skymap: SkymapConfig::default(),
            query: QueryConfig::default(),
            pipelines: PipelinesConfig::default(),
            qgraph_file: default_qgraph_file(),
            schema: SchemaConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Short instrument name used in butler commands and collections.
    #[serde(default = "default_instrument_name")]
    pub name: String,
    /// Fully-qualified instrument class registered with the butler.
    #[serde(default = "default_instrument_class")]
    pub class: String,
}

fn default_instrument_name() -> String {
    "LSSTCam".to_string()
}
fn default_instrument_class() -> String {
    "lsst.obs.lsst.LsstCam".to_string()
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            name: default_instrument_name(),
            class: default_instrument_class(),
        }
    }
}

/// Import source directories and their butler export descriptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_testdata")]
    pub testdata: PathBuf,
    #[serde(default = "default_pretrained_models")]
    pub pretrained_models: PathBuf,
    /// Export file for the main testdata import, package-root relative.
    #[serde(default = "default_external_file")]
    pub external_file: PathBuf,
    #[serde(default = "default_pretrained_models_file")]
    pub pretrained_models_file: PathBuf,
}

fn default_testdata() -> PathBuf {
    PathBuf::from("/sdf/group/rubin/shared/data/test_data/testdata_ci_lsstcam_m49")
}
fn default_pretrained_models() -> PathBuf {
    PathBuf::from("/sdf/group/rubin/shared/data/test_data/testdata_ci_imsim")
}
fn default_external_file() -> PathBuf {
    PathBuf::from("resources/external.yaml")
}
fn default_pretrained_models_file() -> PathBuf {
    PathBuf::from("resources/external_pretrained_models.yaml")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            testdata: default_testdata(),
            pretrained_models: default_pretrained_models(),
            external_file: default_external_file(),
            pretrained_models_file: default_pretrained_models_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionsConfig {
    /// Input collection search path for qgraph/run.
    #[serde(default = "default_input_collections")]
    pub input: String,
    /// Output run collection.
    #[serde(default = "default_output_collection")]
    pub output: String,
    /// Output collection for HiPS generation.
    #[serde(default = "default_hips_collection")]
    pub hips: String,
    /// Raw exposure collection consumed by define-visits.
    #[serde(default = "default_raw_collection")]
    pub raw: String,
}

fn default_input_collections() -> String {
    "LSSTCam/ci_m49,pretrained_models/tac_cnn_comcam_2025-02-18,skymaps".to_string()
}
fn default_output_collection() -> String {
    "LSSTCam/runs/ci_lsstcam".to_string()
}
fn default_hips_collection() -> String {
    "LSSTCam/runs/ci_lsstcam_hips".to_string()
}
fn default_raw_collection() -> String {
    "LSSTCam/raw/all".to_string()
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            input: default_input_collections(),
            output: default_output_collection(),
            hips: default_hips_collection(),
            raw: default_raw_collection(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkymapConfig {
    #[serde(default = "default_skymap_name")]
    pub name: String,
    /// Sky-map config passed to register-skymap, package-root relative.
    #[serde(default = "default_skymap_config")]
    pub config: PathBuf,
}

fn default_skymap_name() -> String {
    "lsst_cells_v1".to_string()
}
fn default_skymap_config() -> PathBuf {
    PathBuf::from("configs/skymap.py")
}

impl Default for SkymapConfig {
    fn default() -> Self {
        Self {
            name: default_skymap_name(),
            config: default_skymap_config(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Data query restricting the quantum graph (`-d`).
    #[serde(default = "default_data_query")]
    pub data_query: String,
}

fn default_data_query() -> String {
    "skymap='lsst_cells_v1' AND tract=10563 AND patch=36".to_string()
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            data_query: default_data_query(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelinesConfig {
    /// DRP pipeline definition; the default is resolved by pipetask
    /// against the stack environment.
    #[serde(default = "default_drp_pipeline")]
    pub drp: String,
    /// HiPS pipeline definition, package-root relative.
    #[serde(default = "default_hips_pipeline")]
    pub hips: PathBuf,
}

fn default_drp_pipeline() -> String {
    "$DRP_PIPE_DIR/pipelines/LSSTCam/DRP-ci_lsstcam.yaml".to_string()
}
fn default_hips_pipeline() -> PathBuf {
    PathBuf::from("resources/hips.yaml")
}

impl Default for PipelinesConfig {
    fn default() -> Self {
        Self {
            drp: default_drp_pipeline(),
            hips: default_hips_pipeline(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Felis DDL file; `${VAR}` references are resolved when the check
    /// runs, since the harness reads this file itself.
    #[serde(default = "default_ddl")]
    pub ddl: String,
    #[serde(default = "default_schema_checks")]
    pub checks: Vec<SchemaCheckConfig>,
}

fn default_ddl() -> String {
    "${SDM_SCHEMAS_DIR}/yml/lsstcam.yaml".to_string()
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            ddl: default_ddl(),
            checks: default_schema_checks(),
        }
    }
}

/// One dataset-to-DDL-table conformance check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaCheckConfig {
    /// Butler dataset type holding the table output.
    pub dataset: String,
    /// DDL table name to compare against.
    pub table: String,
    /// Data-ID constraint selecting one dataset (`--where`).
    #[serde(rename = "where", default)]
    pub where_clause: String,
}

fn default_schema_checks() -> Vec<SchemaCheckConfig> {
    let check = |dataset: &str, table: &str, where_clause: &str| SchemaCheckConfig {
        dataset: dataset.to_string(),
        table: table.to_string(),
        where_clause: where_clause.to_string(),
    };
    vec![
        check(
            "object",
            "Object",
            "instrument = 'LSSTCam' AND skymap = 'lsst_cells_v1' AND tract = 10563",
        ),
        check(
            "source",
            "Source",
            "instrument = 'LSSTCam' AND detector = 148 AND visit = 2025050300358",
        ),
        check(
            "object_forced_source",
            "ForcedSource",
            "instrument = 'LSSTCam' AND skymap = 'lsst_cells_v1' AND tract = 10563 AND patch = 36",
        ),
        check(
            "dia_object_forced_source",
            "ForcedSourceOnDiaObject",
            "instrument = 'LSSTCam' AND skymap = 'lsst_cells_v1' AND tract = 10563 AND patch = 36",
        ),
        check(
            "dia_object",
            "DiaObject",
            "instrument = 'LSSTCam' AND skymap = 'lsst_cells_v1' AND tract = 10563",
        ),
        check(
            "dia_source",
            "DiaSource",
            "instrument = 'LSSTCam' AND skymap = 'lsst_cells_v1' AND tract = 10563",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mapping_yields_defaults() {
        let config: HarnessConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.harness, "ci_lsstcam");
        assert_eq!(config.run_dir, PathBuf::from("DATA"));
        assert_eq!(config.instrument.name, "LSSTCam");
        assert_eq!(config.instrument.class, "lsst.obs.lsst.LsstCam");
        assert_eq!(config.collections.output, "LSSTCam/runs/ci_lsstcam");
        assert_eq!(config.qgraph_file, "DRP.qgraph");
        assert_eq!(config.schema.checks.len(), 6);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let yaml = r#"
harness: ci_other
instrument:
  name: LSSTComCam
collections:
  output: LSSTComCam/runs/ci
"#;
        let config: HarnessConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.harness, "ci_other");
        assert_eq!(config.instrument.name, "LSSTComCam");
        // class untouched by a partial instrument mapping
        assert_eq!(config.instrument.class, "lsst.obs.lsst.LsstCam");
        assert_eq!(config.collections.output, "LSSTComCam/runs/ci");
        assert_eq!(config.collections.raw, "LSSTCam/raw/all");
    }

    #[test]
    fn schema_checks_deserialize_where_clause() {
        let yaml = r#"
schema:
  ddl: /tmp/lsstcam.yaml
  checks:
    - dataset: object
      table: Object
      where: "tract = 1"
"#;
        let config: HarnessConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.schema.ddl, "/tmp/lsstcam.yaml");
        assert_eq!(config.schema.checks.len(), 1);
        assert_eq!(config.schema.checks[0].where_clause, "tract = 1");
    }

    #[test]
    fn default_checks_cover_the_six_tables() {
        let checks = default_schema_checks();
        let tables: Vec<&str> = checks
            .iter()
            .map(|c| c.table.as_str())
            .collect();
        assert_eq!(
            tables,
            vec![
                "Object",
                "Source",
                "ForcedSource",
                "ForcedSourceOnDiaObject",
                "DiaObject",
                "DiaSource",
            ]
        );
    }
}
