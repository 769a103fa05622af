use async_trait::async_trait;
use reqwest::Url;

use crate::{
    api::octopus::{Page, PriceRecord},
    prelude::*,
};

#[async_trait]
pub trait PageFetcher: Sync {
    /// Fetch a single page of price records.
    async fn fetch_page(&self, url: &Url) -> Result<Page>;

    /// Follow the `next` cursors starting at `url`.
    ///
    /// Stops after `page_limit` pages or when the provider returns no cursor.
    /// Any failed page fails the whole accumulation: the caller never sees a partial set.
    #[instrument(skip_all, fields(page_limit = page_limit))]
    async fn fetch_all(&self, url: Url, page_limit: usize) -> Result<Vec<PriceRecord>> {
        let mut records = Vec::new();
        let mut cursor = Some(url);
        let mut n_pages = 0;
        while n_pages < page_limit
            && let Some(url) = cursor.take()
        {
            let page = self
                .fetch_page(&url)
                .await
                .with_context(|| format!("failed to fetch the page #{}", n_pages + 1))?;
            n_pages += 1;
            debug!(n_pages, n_records = page.results.len(), has_next = page.next.is_some());
            records.extend(page.results);
            cursor = page.next;
        }
        info!(n_pages, n_records = records.len(), "fetched");
        Ok(records)
    }
}
