use std::error::Error;

use clap::Args;
use lcsk_exp::{run_plan, ExternalStats, Ledger};
use tracing::info;

use super::ConfigArgs;

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let config = args.config.resolve()?;
    let ledger = Ledger::new(&config.ledger);
    let mut stats = ExternalStats::new(&config.binary);
    if let Some(dir) = &config.workdir {
        stats = stats.with_workdir(dir);
    }
    info!(
        ledger = %config.ledger.display(),
        binary = %config.binary.display(),
        pairs = config.plan.len(),
        "starting run"
    );
    let summary = run_plan(&config.plan, &ledger, &mut stats)?;
    info!(
        completed = summary.completed,
        skipped = summary.skipped,
        "run finished"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
