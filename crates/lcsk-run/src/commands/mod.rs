pub mod init;
pub mod run;
pub mod status;
pub mod version;

use std::path::PathBuf;

use clap::Args;
use lcsk_core::errors::LcskError;
use lcsk_exp::RunnerConfig;

/// Flags shared by every subcommand. Values given here override `--config`.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// YAML runner configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// CSV ledger of completed pairs.
    #[arg(long)]
    pub ledger: Option<PathBuf>,
    /// Stats binary invoked as `<binary> <k> <filename>`.
    #[arg(long)]
    pub binary: Option<PathBuf>,
    /// Working directory for the stats binary.
    #[arg(long)]
    pub workdir: Option<PathBuf>,
    /// Smallest k of the sweep.
    #[arg(long)]
    pub k_min: Option<u32>,
    /// Largest k of the sweep.
    #[arg(long)]
    pub k_max: Option<u32>,
    /// FASTA file to include; repeat to build the list.
    #[arg(long = "file", value_name = "FASTA")]
    pub files: Vec<String>,
}

impl ConfigArgs {
    pub fn resolve(&self) -> Result<RunnerConfig, LcskError> {
        let mut config = match &self.config {
            Some(path) => RunnerConfig::load(path)?,
            None => RunnerConfig::default(),
        };
        if let Some(ledger) = &self.ledger {
            config.ledger = ledger.clone();
        }
        if let Some(binary) = &self.binary {
            config.binary = binary.clone();
        }
        if let Some(workdir) = &self.workdir {
            config.workdir = Some(workdir.clone());
        }
        if let Some(k_min) = self.k_min {
            config.plan.k_min = k_min;
        }
        if let Some(k_max) = self.k_max {
            config.plan.k_max = k_max;
        }
        if !self.files.is_empty() {
            config.plan.filenames = self.files.clone();
        }
        config.plan.validate()?;
        Ok(config)
    }
}
