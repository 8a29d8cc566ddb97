use crate::parser::parse_postal_records;
use crate::types::PostalRecord;

use reqwest::Client;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct WebScraper {
    client: Client,
    url: String,
}

impl WebScraper {
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(crate::USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            url: crate::SOURCE_URL.to_string(),
        })
    }

    /// One GET against the source page, then a pure in-memory parse.
    /// Non-2xx responses and transport errors abort the run; there is no
    /// retry. An empty result means the page had no recognizable tables.
    pub async fn fetch_postal_records(&self) -> Result<Vec<PostalRecord>, ScraperError> {
        log::info!("Scraping data from: {}", self.url);
        let html = self
            .client
            .get(&self.url)
            .send()
            .await
            .inspect_err(|e| log::error!("HTTP error: {e:?}"))?
            .error_for_status()?
            .text()
            .await
            .inspect_err(|e| log::error!("Decode error: {e:?}"))?;

        Ok(parse_postal_records(&html))
    }
}
