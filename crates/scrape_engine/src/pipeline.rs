use serde::Serialize;
use scrape_logging::{scrape_info, scrape_warn};

use crate::decode::decode_html;
use crate::extract::{ContentExtractor, ExtractionMode, Extractor};
use crate::fetch::Fetcher;
use crate::search::{SearchClient, SearchError, SearchResult};

/// One search result paired with the markdown text scraped from its URL.
/// `text = None` records a fetch failure or a content-less page; the pairing
/// itself is always kept so the persisted output stays aligned with the
/// search response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapedResult {
    pub result: SearchResult,
    pub text: Option<String>,
}

/// Composes search, fetch and extraction into one serial pass: every result
/// URL is scraped one at a time, and per-URL failures never abort the batch.
pub struct SearchScraper {
    search: SearchClient,
    fetcher: Box<dyn Fetcher>,
    extractor: ContentExtractor,
}

impl SearchScraper {
    pub fn new(search: SearchClient, fetcher: Box<dyn Fetcher>) -> Self {
        Self {
            search,
            fetcher,
            extractor: ContentExtractor,
        }
    }

    pub async fn run(&self, query: &str) -> Result<Vec<ScrapedResult>, SearchError> {
        let response = self.search.search(query).await?;

        let mut scraped = Vec::with_capacity(response.results.len());
        for result in response.results {
            let text = self.scrape_one(&result.url).await;
            scraped.push(ScrapedResult { result, text });
        }

        scrape_info!(
            "scraped {} of {} result pages",
            scraped.iter().filter(|s| s.text.is_some()).count(),
            scraped.len()
        );
        Ok(scraped)
    }

    async fn scrape_one(&self, url: &str) -> Option<String> {
        let output = match self.fetcher.fetch(url).await {
            Ok(output) => output,
            Err(err) => {
                scrape_warn!("skipping {url}: {err}");
                return None;
            }
        };

        let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref());
        if decoded.had_errors {
            scrape_warn!(
                "{url}: lossy {} decode, some characters were replaced",
                decoded.encoding_label
            );
        }

        self.extractor
            .extract(&decoded.html, ExtractionMode::Markdown)
            .value
    }
}
