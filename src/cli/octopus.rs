use clap::Parser;
use reqwest::Url;

use crate::{
    api::{octopus, page_fetcher::PageFetcher},
    core::timeline::Timeline,
    prelude::*,
};

#[derive(Parser)]
pub struct OctopusArgs {
    /// Octopus API key, the public tariffs do not need one.
    #[clap(long = "octopus-api-key", env = "OCTOPUS_API_KEY")]
    api_key: Option<String>,

    #[clap(
        long = "octopus-base-url",
        env = "OCTOPUS_BASE_URL",
        default_value = "https://api.octopus.energy/v1/"
    )]
    base_url: Url,

    #[clap(
        long = "product-code",
        env = "OCTOPUS_PRODUCT_CODE",
        default_value = "AGILE-FLEX-22-11-25"
    )]
    product_code: String,

    #[clap(
        long = "tariff-code",
        env = "OCTOPUS_TARIFF_CODE",
        default_value = "E-1R-AGILE-FLEX-22-11-25-H"
    )]
    tariff_code: String,

    /// Maximum number of pages to fetch, each page holds up to 100 half-hourly prices.
    #[clap(long = "page-limit", env = "OCTOPUS_PAGE_LIMIT", default_value = "2")]
    page_limit: usize,

    #[clap(long = "octopus-timeout", env = "OCTOPUS_TIMEOUT", default_value = "2s")]
    timeout: humantime::Duration,
}

impl OctopusArgs {
    /// Fetch the price pages and build the hourly timeline.
    ///
    /// The timeline is only built when every page has been fetched.
    #[instrument(
        skip_all,
        fields(product_code = %self.product_code, tariff_code = %self.tariff_code)
    )]
    pub async fn fetch_timeline(&self) -> Result<Timeline> {
        let api = octopus::Api::builder()
            .base_url(&self.base_url)
            .product_code(&self.product_code)
            .tariff_code(&self.tariff_code)
            .maybe_api_key(self.api_key.clone())
            .timeout(self.timeout.into())
            .build()?;
        let records = api
            .fetch_all(api.rates_url(), self.page_limit)
            .await
            .context("failed to fetch the tariff rates")?;
        Ok(Timeline::build(records))
    }
}
