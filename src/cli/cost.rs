use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use clap::Parser;

use crate::{
    cli::octopus::OctopusArgs,
    core::{consumption::ConsumptionCsv, report::CostReport},
    prelude::*,
};

#[derive(Parser)]
pub struct CostArgs {
    /// Consumption export: timestamps in the 2nd column, watt-hours in the 26th one.
    #[clap(value_name = "FILE")]
    path: PathBuf,

    /// Maximum accepted file size in bytes.
    #[clap(long = "max-input-size", env = "MAX_INPUT_SIZE", default_value = "16384")]
    max_input_size: usize,

    #[clap(flatten)]
    octopus: OctopusArgs,
}

impl CostArgs {
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub async fn run(self) -> Result {
        let bytes = read_limited(&self.path, self.max_input_size)?;
        let export = ConsumptionCsv::try_new(&bytes, self.max_input_size)?;

        let timeline = self.octopus.fetch_timeline().await?;
        let report = CostReport::aggregate(export.rows(), &timeline);
        println!("{report}");
        Ok(())
    }
}

/// Read at most one byte over the limit, which is enough to reject the file.
fn read_limited(path: &Path, max_size: usize) -> Result<Vec<u8>> {
    let file =
        File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
    let mut bytes = Vec::new();
    file.take(u64::try_from(max_size)?.saturating_add(1))
        .read_to_end(&mut bytes)
        .with_context(|| format!("failed to read `{}`", path.display()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_limited_unbounded() -> Result {
        let bytes = read_limited(Path::new("Cargo.toml"), usize::MAX)?;
        assert!(bytes.starts_with(b"[package]"));
        Ok(())
    }

    #[test]
    fn test_read_limited_stops_past_limit() -> Result {
        let bytes = read_limited(Path::new("Cargo.toml"), 8)?;
        assert_eq!(bytes.len(), 9);
        Ok(())
    }
}
