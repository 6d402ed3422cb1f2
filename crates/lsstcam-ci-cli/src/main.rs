mod commands;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use lsstcam_ci_engine::RunOptions;

#[derive(Parser)]
#[command(
    name = "lsstcam-ci",
    version,
    about = "CI harness for the LSSTCam DRP pipeline"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the build steps in order
    Run {
        /// Path to harness YAML file (default: resources/ci_lsstcam.yaml)
        config: Option<PathBuf>,
        /// Worker processes passed to pipetask run
        #[arg(short = 'j', long, default_value_t = 1)]
        num_cores: u32,
        /// Rerun from this step, invalidating it and everything after
        #[arg(long, conflicts_with = "only")]
        from: Option<String>,
        /// Run exactly one step
        #[arg(long)]
        only: Option<String>,
        /// Whether to disable useCiLimits for deblending and process all blends
        #[arg(long)]
        config_no_limit_deblend: bool,
        /// Whether to enable processSingles (isolated objects) for deblending
        #[arg(long)]
        config_process_singles: bool,
        /// Print the commands without executing them
        #[arg(long)]
        dry_run: bool,
    },
    /// List build steps and their completion status
    Steps {
        /// Path to harness YAML file (default: resources/ci_lsstcam.yaml)
        config: Option<PathBuf>,
    },
    /// Check output table schemas against the sdm_schemas DDL
    CheckSchema {
        /// Path to harness YAML file (default: resources/ci_lsstcam.yaml)
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_level);

    match cli.command {
        Commands::Run {
            config,
            num_cores,
            from,
            only,
            config_no_limit_deblend,
            config_process_singles,
            dry_run,
        } => {
            let options = RunOptions {
                num_cores,
                no_limit_deblend: config_no_limit_deblend,
                process_singles: config_process_singles,
                dry_run,
            };
            commands::run::execute(config.as_deref(), options, from, only)
        }
        Commands::Steps { config } => commands::steps::execute(config.as_deref()),
        Commands::CheckSchema { config } => commands::check_schema::execute(config.as_deref()),
    }
}
