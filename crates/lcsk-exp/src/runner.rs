use lcsk_core::errors::LcskError;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ledger::{DoneSet, Ledger, LogRow};
use crate::plan::{ExperimentPlan, ParamPair};
use crate::stats::StatsSource;

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Pairs enumerated by the plan.
    pub planned: usize,
    /// Pairs found in the ledger before they were reached.
    pub skipped: usize,
    /// Pairs computed and appended during this run.
    pub completed: usize,
    pub rows: Vec<LogRow>,
}

/// Walks the plan in order, computing and recording every pair that the
/// ledger does not already hold. The first failure stops the run; rows
/// appended before it remain in the ledger.
pub fn run_plan<S: StatsSource + ?Sized>(
    plan: &ExperimentPlan,
    ledger: &Ledger,
    source: &mut S,
) -> Result<RunSummary, LcskError> {
    plan.validate()?;
    let mut done = ledger.done_set()?;
    let pairs = plan.pairs();
    let mut summary = RunSummary {
        planned: pairs.len(),
        skipped: 0,
        completed: 0,
        rows: Vec::new(),
    };
    for pair in pairs {
        info!("{pair}");
        if done.contains(&pair) {
            info!("done before");
            summary.skipped += 1;
            continue;
        }
        let stats = source.compute(&pair)?;
        let row = LogRow::from_stats(&pair, stats);
        ledger.append(&row)?;
        done.insert(pair);
        info!("done");
        summary.completed += 1;
        summary.rows.push(row);
    }
    Ok(summary)
}

/// Pairs of the plan absent from `done`, in enumeration order.
pub fn pending_pairs(plan: &ExperimentPlan, done: &DoneSet) -> Vec<ParamPair> {
    plan.pairs()
        .into_iter()
        .filter(|pair| !done.contains(pair))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_pairs_keep_enumeration_order() {
        let plan = ExperimentPlan {
            k_min: 2,
            k_max: 3,
            filenames: vec!["a.fa".into(), "b.fa".into()],
        };
        let done: DoneSet = [ParamPair::new(3, "b.fa"), ParamPair::new(2, "a.fa")]
            .into_iter()
            .collect();
        assert_eq!(
            pending_pairs(&plan, &done),
            vec![ParamPair::new(3, "a.fa"), ParamPair::new(2, "b.fa")]
        );
    }
}
