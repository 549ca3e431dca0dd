//! Market-news sources: a closed set of scraper variants behind one
//! capability interface, plus multi-source orchestration.
//!
//! Each variant knows which pages to fetch and how to pull headlines and
//! market snippets out of them. New sources are added by adding a
//! [`SourceKind`] variant and wiring it into [`create_source`], never by
//! extending an open hierarchy.

pub mod multi;
pub mod variants;

pub use multi::{combine_payloads, MultiSourceScraper};

use async_trait::async_trait;
use sentiment_core::{ScrapedNews, SentimentError};

/// The supported news sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    LiveMint,
    GoogleFinance,
    YahooFinance,
    MarketWatch,
}

impl SourceKind {
    pub fn all() -> &'static [SourceKind] {
        &[
            SourceKind::LiveMint,
            SourceKind::GoogleFinance,
            SourceKind::YahooFinance,
            SourceKind::MarketWatch,
        ]
    }

    /// Stable identifier used in configuration and payload keys.
    pub fn id(&self) -> &'static str {
        match self {
            SourceKind::LiveMint => "livemint",
            SourceKind::GoogleFinance => "google",
            SourceKind::YahooFinance => "yahoo",
            SourceKind::MarketWatch => "marketwatch",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SourceKind::LiveMint => "LiveMint",
            SourceKind::GoogleFinance => "Google Finance",
            SourceKind::YahooFinance => "Yahoo Finance",
            SourceKind::MarketWatch => "MarketWatch",
        }
    }

    pub fn from_id(id: &str) -> Result<Self, SentimentError> {
        match id.to_lowercase().as_str() {
            "livemint" => Ok(SourceKind::LiveMint),
            "google" => Ok(SourceKind::GoogleFinance),
            "yahoo" => Ok(SourceKind::YahooFinance),
            "marketwatch" => Ok(SourceKind::MarketWatch),
            other => Err(SentimentError::UnsupportedSource(other.to_string())),
        }
    }
}

/// Capability interface every source variant implements: fetch the raw page
/// blobs, then extract headlines and market snippets from them.
#[async_trait]
pub trait NewsSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Page URLs to fetch, in order.
    fn page_urls(&self) -> Vec<String>;

    /// Fetch the raw page blobs. A non-success status or transport failure
    /// is a fetch error for the whole source.
    async fn fetch_raw(&self, client: &reqwest::Client) -> Result<Vec<String>, SentimentError> {
        let mut pages = Vec::new();
        for url in self.page_urls() {
            let response = client
                .get(&url)
                .send()
                .await
                .map_err(|e| SentimentError::Fetch(format!("{}: {}", url, e)))?;
            if !response.status().is_success() {
                return Err(SentimentError::Fetch(format!(
                    "{}: status {}",
                    url,
                    response.status()
                )));
            }
            let body = response
                .text()
                .await
                .map_err(|e| SentimentError::Fetch(format!("{}: {}", url, e)))?;
            pages.push(body);
        }
        Ok(pages)
    }

    /// Extract news from the fetched pages (same order as [`page_urls`]).
    fn extract(&self, pages: &[String]) -> ScrapedNews;
}

/// Factory keyed on the source kind.
pub fn create_source(kind: SourceKind) -> Box<dyn NewsSource> {
    match kind {
        SourceKind::LiveMint => Box::new(variants::LiveMint),
        SourceKind::GoogleFinance => Box::new(variants::GoogleFinance),
        SourceKind::YahooFinance => Box::new(variants::YahooFinance),
        SourceKind::MarketWatch => Box::new(variants::MarketWatch),
    }
}
