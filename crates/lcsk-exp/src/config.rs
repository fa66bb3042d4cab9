use std::fs;
use std::path::{Path, PathBuf};

use lcsk_core::errors::{ErrorInfo, LcskError};
use serde::{Deserialize, Serialize};

use crate::plan::ExperimentPlan;

/// Default ledger location, relative to the working directory.
pub const DEFAULT_LEDGER: &str = "ratios_hg.csv";
/// Default stats binary, relative to the working directory.
pub const DEFAULT_BINARY: &str = "./stats_fasta";

/// Runner configuration: where results go, what to invoke and over which
/// parameter space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    #[serde(default = "RunnerConfig::default_ledger")]
    pub ledger: PathBuf,
    #[serde(default = "RunnerConfig::default_binary")]
    pub binary: PathBuf,
    /// Working directory for the stats binary; inherits the runner's when unset.
    #[serde(default)]
    pub workdir: Option<PathBuf>,
    #[serde(flatten)]
    pub plan: ExperimentPlan,
}

impl RunnerConfig {
    fn default_ledger() -> PathBuf {
        PathBuf::from(DEFAULT_LEDGER)
    }

    fn default_binary() -> PathBuf {
        PathBuf::from(DEFAULT_BINARY)
    }

    /// Parses a YAML document; absent keys fall back to defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, LcskError> {
        let config: RunnerConfig = serde_yaml::from_str(text).map_err(|err| {
            LcskError::Serde(
                ErrorInfo::new("config-yaml", "failed to parse runner configuration")
                    .with_hint(err.to_string()),
            )
        })?;
        config.plan.validate()?;
        Ok(config)
    }

    /// Loads and validates a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, LcskError> {
        let text = fs::read_to_string(path).map_err(|err| {
            LcskError::Serde(
                ErrorInfo::new("config-read", "failed to read runner configuration")
                    .with_context("path", path.display().to_string())
                    .with_hint(err.to_string()),
            )
        })?;
        Self::from_yaml_str(&text)
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            ledger: Self::default_ledger(),
            binary: Self::default_binary(),
            workdir: None,
            plan: ExperimentPlan::default(),
        }
    }
}
