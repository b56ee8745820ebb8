//! Scrape engine: fetch pages, extract their content, pair them with search
//! results.
mod decode;
mod extract;
mod fetch;
mod filename;
mod persist;
mod pipeline;
mod search;
mod types;

pub use decode::{decode_html, DecodedHtml};
pub use extract::{ContentExtractor, ExtractedContent, ExtractionMode, Extractor};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use filename::{output_filename, sanitize_query};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use pipeline::{ScrapedResult, SearchScraper};
pub use search::{SearchClient, SearchError, SearchResponse, SearchResult, SearchSettings};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
