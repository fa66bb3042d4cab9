use std::error::Error;

use clap::Args;
use lcsk_exp::Ledger;
use tracing::{info, warn};

use super::ConfigArgs;

#[derive(Args, Debug)]
pub struct InitArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

pub fn run(args: &InitArgs) -> Result<(), Box<dyn Error>> {
    let config = args.config.resolve()?;
    let ledger = Ledger::new(&config.ledger);
    if ledger.init()? {
        info!(path = %ledger.path().display(), "ledger created");
    } else {
        warn!(path = %ledger.path().display(), "ledger already exists, left untouched");
    }
    println!("{}", ledger.path().display());
    Ok(())
}
