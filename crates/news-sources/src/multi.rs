//! Fetch several sources in sequence and package per-source outcomes.

use crate::{create_source, NewsSource, SourceKind};
use sentiment_core::{ScrapedNews, SourcePayload};
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Delay between consecutive sources, to stay polite.
const PACING: Duration = Duration::from_secs(1);

/// Scrapes a configured set of sources, one at a time.
///
/// A failing source becomes an error-marked payload; it never aborts the
/// round.
pub struct MultiSourceScraper {
    client: reqwest::Client,
    sources: Vec<Box<dyn NewsSource>>,
}

impl MultiSourceScraper {
    pub fn new(kinds: &[SourceKind]) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            sources: kinds.iter().map(|&kind| create_source(kind)).collect(),
        }
    }

    /// Default source set: LiveMint, Google Finance, Yahoo Finance.
    pub fn with_defaults() -> Self {
        Self::new(&[
            SourceKind::LiveMint,
            SourceKind::GoogleFinance,
            SourceKind::YahooFinance,
        ])
    }

    /// Scrape every configured source, in configuration order.
    pub async fn scrape_all(&self) -> Vec<SourcePayload> {
        let mut payloads = Vec::with_capacity(self.sources.len());

        for (i, source) in self.sources.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(PACING).await;
            }

            let name = source.kind().display_name();
            tracing::info!(source = name, "Scraping source");

            match source.fetch_raw(&self.client).await {
                Ok(pages) => {
                    let data = source.extract(&pages);
                    tracing::info!(
                        source = name,
                        headlines = data.headlines.len(),
                        stock_news = data.stock_news.len(),
                        "Scraped source"
                    );
                    payloads.push(SourcePayload::ok(name, data));
                }
                Err(e) => {
                    tracing::warn!(source = name, error = %e, "Source failed");
                    payloads.push(SourcePayload::failed(name, e.to_string()));
                }
            }
        }

        payloads
    }

    /// Scrape everything and flatten it into one combined pool of texts.
    pub async fn combined_news(&self) -> ScrapedNews {
        combine_payloads(&self.scrape_all().await)
    }
}

/// Flatten payloads into one de-duplicated pool, keeping first-seen order.
/// Errored payloads contribute nothing.
pub fn combine_payloads(payloads: &[SourcePayload]) -> ScrapedNews {
    let mut combined = ScrapedNews::default();

    for payload in payloads {
        let Some(data) = &payload.data else { continue };
        for headline in &data.headlines {
            if !combined.headlines.contains(headline) {
                combined.headlines.push(headline.clone());
            }
        }
        for snippet in &data.stock_news {
            if !combined.stock_news.contains(snippet) {
                combined.stock_news.push(snippet.clone());
            }
        }
    }

    combined
}
