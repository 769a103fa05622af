use clap::Parser;

use crate::{cli::octopus::OctopusArgs, prelude::*, tables::build_timeline_table};

#[derive(Parser)]
pub struct RatesArgs {
    #[clap(flatten)]
    octopus: OctopusArgs,
}

impl RatesArgs {
    pub async fn run(self) -> Result {
        let timeline = self.octopus.fetch_timeline().await?;
        if timeline.is_empty() {
            warn!("no complete hours in the fetched prices");
        }
        println!("{}", build_timeline_table(&timeline));
        Ok(())
    }
}
