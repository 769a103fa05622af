mod cost;
mod octopus;
mod rates;

use clap::{Parser, Subcommand};

use crate::cli::{cost::CostArgs, rates::RatesArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch the current prices and show the hourly rates.
    #[clap(name = "rates")]
    Rates(Box<RatesArgs>),

    /// Estimate the cost of the consumption export.
    #[clap(name = "cost")]
    Cost(Box<CostArgs>),
}
