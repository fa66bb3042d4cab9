//! Resumable orchestration of the LCSk++ ratio experiment.
//!
//! A run walks an [`ExperimentPlan`] of `(k, filename)` pairs, invokes a
//! [`StatsSource`] for every pair missing from the [`Ledger`] and appends the
//! result. Restarting a run re-reads the ledger and continues where it left off.

mod config;
mod ledger;
mod plan;
mod runner;
mod stats;

pub use config::{RunnerConfig, DEFAULT_BINARY, DEFAULT_LEDGER};
pub use ledger::{DoneSet, Ledger, LogRow, LEDGER_COLUMNS};
pub use plan::{ExperimentPlan, ParamPair, DEFAULT_FILENAMES};
pub use runner::{pending_pairs, run_plan, RunSummary};
pub use stats::{ExternalStats, StatsOutput, StatsSource};
