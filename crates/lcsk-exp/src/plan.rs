use std::fmt;

use lcsk_core::errors::{ErrorInfo, LcskError};
use serde::{Deserialize, Serialize};

/// Chromosome files of the GRCh38 human genome used by the default plan.
pub const DEFAULT_FILENAMES: [&str; 3] = [
    "Homo_sapiens.GRCh38.dna.chromosome.1.fa",
    "Homo_sapiens.GRCh38.dna.chromosome.2.fa",
    "Homo_sapiens.GRCh38.dna.chromosome.3.fa",
];

/// One unit of work: a `k` value applied to one FASTA file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParamPair {
    pub k: u32,
    /// FASTA path as passed to the stats binary.
    pub filename: String,
}

impl ParamPair {
    /// Pairs `k` with a FASTA file name.
    pub fn new(k: u32, filename: impl Into<String>) -> Self {
        Self {
            k,
            filename: filename.into(),
        }
    }
}

impl fmt::Display for ParamPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k = {}, filename = {}", self.k, self.filename)
    }
}

/// Parameter space of the experiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentPlan {
    #[serde(default = "ExperimentPlan::default_k_min")]
    pub k_min: u32,
    #[serde(default = "ExperimentPlan::default_k_max")]
    pub k_max: u32,
    #[serde(default = "ExperimentPlan::default_filenames")]
    pub filenames: Vec<String>,
}

impl ExperimentPlan {
    const fn default_k_min() -> u32 {
        2
    }

    const fn default_k_max() -> u32 {
        30
    }

    fn default_filenames() -> Vec<String> {
        DEFAULT_FILENAMES.iter().map(|name| name.to_string()).collect()
    }

    /// Checks that the `k` range is non-empty and strictly positive.
    pub fn validate(&self) -> Result<(), LcskError> {
        if self.k_min == 0 {
            return Err(LcskError::Plan(
                ErrorInfo::new("plan-k-zero", "k must be a positive integer")
                    .with_context("k_min", self.k_min.to_string()),
            ));
        }
        if self.k_min > self.k_max {
            return Err(LcskError::Plan(
                ErrorInfo::new("plan-k-range", "k_min exceeds k_max")
                    .with_context("k_min", self.k_min.to_string())
                    .with_context("k_max", self.k_max.to_string()),
            ));
        }
        Ok(())
    }

    /// Enumerates the plan: `k` descending in the outer loop, filenames in
    /// configured order in the inner loop.
    pub fn pairs(&self) -> Vec<ParamPair> {
        let mut pairs = Vec::with_capacity(self.len());
        for k in (self.k_min..=self.k_max).rev() {
            for filename in &self.filenames {
                pairs.push(ParamPair::new(k, filename.clone()));
            }
        }
        pairs
    }

    /// Number of pairs produced by [`ExperimentPlan::pairs`].
    pub fn len(&self) -> usize {
        if self.k_min > self.k_max {
            return 0;
        }
        (self.k_max - self.k_min + 1) as usize * self.filenames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ExperimentPlan {
    fn default() -> Self {
        Self {
            k_min: Self::default_k_min(),
            k_max: Self::default_k_max(),
            filenames: Self::default_filenames(),
        }
    }
}
