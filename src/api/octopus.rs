//! [Octopus Energy](https://developer.octopus.energy/rest/) tariff client.

mod models;

use std::time::Duration;

use async_trait::async_trait;
use bon::bon;
use reqwest::{Client, Url};

pub use self::models::{Page, PriceRecord};
use crate::{api::page_fetcher::PageFetcher, prelude::*};

pub struct Api {
    client: Client,
    api_key: Option<String>,
    rates_url: Url,
}

#[bon]
impl Api {
    #[builder]
    pub fn new(
        base_url: &Url,
        product_code: &str,
        tariff_code: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().user_agent("agile-cost").timeout(timeout).build()?;
        let rates_url = base_url
            .join(&format!(
                "products/{product_code}/electricity-tariffs/{tariff_code}/standard-unit-rates/"
            ))
            .with_context(|| format!("invalid tariff `{product_code}/{tariff_code}`"))?;
        Ok(Self { client, api_key, rates_url })
    }

    /// First page of the standard unit rates, newest first.
    pub fn rates_url(&self) -> Url {
        self.rates_url.clone()
    }
}

#[async_trait]
impl PageFetcher for Api {
    #[instrument(skip_all, fields(url = %url))]
    async fn fetch_page(&self, url: &Url) -> Result<Page> {
        debug!("fetching…");
        let mut request = self.client.get(url.clone());
        if let Some(api_key) = &self.api_key {
            request = request.basic_auth(api_key, None::<&str>);
        }
        request
            .send()
            .await
            .with_context(|| format!("failed to call `{url}`"))?
            .error_for_status()
            .context("request failed")?
            .json::<Page>()
            .await
            .context("failed to deserialize the response")
    }
}
