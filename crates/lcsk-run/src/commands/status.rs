use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use lcsk_exp::{pending_pairs, Ledger, ParamPair};
use serde::Serialize;

use super::ConfigArgs;

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Debug, Serialize)]
struct StatusReport {
    ledger: PathBuf,
    /// Distinct pairs in the ledger, inside or outside the plan.
    recorded: usize,
    planned: usize,
    done: usize,
    pending: Vec<ParamPair>,
}

pub fn run(args: &StatusArgs) -> Result<(), Box<dyn Error>> {
    let config = args.config.resolve()?;
    let done = Ledger::new(&config.ledger).done_set()?;
    let pending = pending_pairs(&config.plan, &done);
    let planned = config.plan.len();
    let report = StatusReport {
        ledger: config.ledger,
        recorded: done.len(),
        planned,
        done: planned - pending.len(),
        pending,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
