//! The individual source variants and their CSS extraction rules.
//!
//! Selectors track what each site actually serves; they are the part of a
//! variant expected to rot and get patched.

use crate::{NewsSource, SourceKind};
use async_trait::async_trait;
use scraper::{Html, Selector};
use sentiment_core::ScrapedNews;

/// Collect trimmed element texts matching any of `selectors`, de-duplicated
/// first-seen, keeping texts longer than `min_chars`, up to `limit` entries.
fn select_texts(
    document: &Html,
    selectors: &[&str],
    min_chars: usize,
    limit: usize,
    out: &mut Vec<String>,
) {
    for css in selectors {
        let selector = Selector::parse(css).unwrap();
        for element in document.select(&selector) {
            if out.len() >= limit {
                return;
            }
            let text = element.text().collect::<String>();
            let text = text.trim();
            if text.chars().count() > min_chars && !out.iter().any(|seen| seen == text) {
                out.push(text.to_string());
            }
        }
    }
}

fn has_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

pub struct LiveMint;

#[async_trait]
impl NewsSource for LiveMint {
    fn kind(&self) -> SourceKind {
        SourceKind::LiveMint
    }

    fn page_urls(&self) -> Vec<String> {
        vec!["https://www.livemint.com/market".to_string()]
    }

    fn extract(&self, pages: &[String]) -> ScrapedNews {
        let Some(page) = pages.first() else {
            return ScrapedNews::default();
        };
        let document = Html::parse_document(page);

        let mut headlines = Vec::new();
        select_texts(&document, &["li.newsBlock h2"], 0, usize::MAX, &mut headlines);

        let mut stock_news = Vec::new();
        select_texts(
            &document,
            &[".market-new-common-collection_contentBox__leEBU h3 a"],
            0,
            10,
            &mut stock_news,
        );

        ScrapedNews {
            headlines,
            stock_news,
        }
    }
}

pub struct GoogleFinance;

impl GoogleFinance {
    const HEADLINE_SELECTORS: &'static [&'static str] = &[
        "article h3",
        "article h4",
        "[data-n-tid] h3",
        "[data-n-tid] h4",
        ".JheGif",
        ".ipQwMb",
        ".DY5T1d",
    ];

    const MARKET_DATA_SELECTORS: &'static [&'static str] =
        &[".YMlKec", ".P6K39c", "[data-symbol]", ".ln0Gqe"];
}

#[async_trait]
impl NewsSource for GoogleFinance {
    fn kind(&self) -> SourceKind {
        SourceKind::GoogleFinance
    }

    fn page_urls(&self) -> Vec<String> {
        vec![
            "https://www.google.com/finance".to_string(),
            "https://news.google.com/topics/CAAqJggKIiBDQkFTRWdvSUwyMHZNRFZ4ZERBU0FtVnVHZ0pWVXlnQVAB?hl=en-US&gl=US&ceid=US%3Aen".to_string(),
        ]
    }

    fn extract(&self, pages: &[String]) -> ScrapedNews {
        let mut headlines = Vec::new();
        for page in pages {
            let document = Html::parse_document(page);
            select_texts(&document, Self::HEADLINE_SELECTORS, 20, 15, &mut headlines);
        }

        let mut stock_news = Vec::new();
        if let Some(page) = pages.first() {
            let document = Html::parse_document(page);
            let mut raw = Vec::new();
            select_texts(&document, Self::MARKET_DATA_SELECTORS, 0, usize::MAX, &mut raw);
            stock_news = raw.into_iter().filter(|t| has_digit(t)).take(10).collect();
        }

        ScrapedNews {
            headlines,
            stock_news,
        }
    }
}

pub struct YahooFinance;

impl YahooFinance {
    const HEADLINE_SELECTORS: &'static [&'static str] = &[
        "h3[data-test-locator=\"StreamTitle\"]",
        "h3 a[data-test-locator=\"StreamTitle\"]",
        ".js-stream-content h3",
        "[data-module=\"Stream\"] h3",
    ];

    const MOVER_SELECTORS: &'static [&'static str] =
        &["[data-test=\"market-summary\"] span", "[data-symbol] span"];
}

#[async_trait]
impl NewsSource for YahooFinance {
    fn kind(&self) -> SourceKind {
        SourceKind::YahooFinance
    }

    fn page_urls(&self) -> Vec<String> {
        vec![
            "https://finance.yahoo.com".to_string(),
            "https://finance.yahoo.com/news".to_string(),
        ]
    }

    fn extract(&self, pages: &[String]) -> ScrapedNews {
        let mut headlines = Vec::new();
        for page in pages {
            let document = Html::parse_document(page);
            select_texts(&document, Self::HEADLINE_SELECTORS, 15, 15, &mut headlines);
        }

        let mut stock_news = Vec::new();
        if let Some(page) = pages.first() {
            let document = Html::parse_document(page);
            let mut raw = Vec::new();
            select_texts(&document, Self::MOVER_SELECTORS, 0, usize::MAX, &mut raw);
            stock_news = raw
                .into_iter()
                .filter(|t| has_digit(t) || t.contains('%'))
                .take(10)
                .collect();
        }

        ScrapedNews {
            headlines,
            stock_news,
        }
    }
}

pub struct MarketWatch;

impl MarketWatch {
    const HEADLINE_SELECTORS: &'static [&'static str] = &[
        ".article__headline a",
        "h3.article__headline",
        ".headline a",
        "h2 a",
        "h3 a",
    ];
}

#[async_trait]
impl NewsSource for MarketWatch {
    fn kind(&self) -> SourceKind {
        SourceKind::MarketWatch
    }

    fn page_urls(&self) -> Vec<String> {
        vec!["https://www.marketwatch.com/latest-news".to_string()]
    }

    fn extract(&self, pages: &[String]) -> ScrapedNews {
        let mut headlines = Vec::new();
        if let Some(page) = pages.first() {
            let document = Html::parse_document(page);
            select_texts(&document, Self::HEADLINE_SELECTORS, 20, 15, &mut headlines);
        }

        ScrapedNews {
            headlines,
            stock_news: Vec::new(),
        }
    }
}
