mod logging;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use scrape_engine::{
    decode_html, output_filename, sanitize_query, AtomicFileWriter, ContentExtractor,
    ExtractionMode, Extractor, FetchSettings, Fetcher, ReqwestFetcher, SearchClient,
    SearchScraper, SearchSettings,
};

const QUERY_STEM_MAX: usize = 50;

#[derive(Parser, Debug)]
#[command(name = "scrape")]
#[command(about = "Scrape web pages and search results into structured text", long_about = None)]
struct Cli {
    /// Also write logs to ./scrape.log
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scrape a single page into a file named after its URL
    Page(PageArgs),
    /// Query a searx instance, scrape every result URL and save the pairs as JSON
    Search(SearchArgs),
}

#[derive(Args, Debug)]
struct PageArgs {
    /// The URL of the website to scrape
    #[arg(long)]
    url: String,

    /// Export plain text, default is markdown
    #[arg(long, conflicts_with = "img_only")]
    text: bool,

    /// Export only images as an HTML list
    #[arg(long = "img-only")]
    img_only: bool,

    /// Directory the output file is written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// The search query
    #[arg(long)]
    query: String,

    /// Base URL of the searx instance
    #[arg(long, default_value = "http://localhost:8080")]
    searx_url: String,

    /// Searx safesearch level (0, 1 or 2), forwarded as-is
    #[arg(long)]
    safesearch: Option<u8>,

    /// Output filename, defaults to the sanitized query plus `.json`
    #[arg(long)]
    save_as: Option<String>,

    /// Directory the output file is written to
    #[arg(long, default_value = "_search_results")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(if cli.log_file {
        logging::LogDestination::Both
    } else {
        logging::LogDestination::Terminal
    });

    match cli.command {
        Commands::Page(args) => scrape_page(args).await,
        Commands::Search(args) => run_search(args).await,
    }
}

async fn scrape_page(args: PageArgs) -> Result<()> {
    let mode = if args.img_only {
        ExtractionMode::ImageList
    } else if args.text {
        ExtractionMode::PlainText
    } else {
        ExtractionMode::Markdown
    };

    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let output = fetcher
        .fetch(&args.url)
        .await
        .with_context(|| format!("failed to fetch {}", args.url))?;

    let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref());
    let content = ContentExtractor.extract(&decoded.html, mode);
    let Some(value) = content.value else {
        bail!("no extractable content at {}", args.url);
    };

    let filename = output_filename(&args.url, mode);
    let path = AtomicFileWriter::new(args.out_dir).write(&filename, &value)?;
    log::info!("content written to {}", path.display());
    Ok(())
}

async fn run_search(args: SearchArgs) -> Result<()> {
    let mut settings = SearchSettings {
        endpoint: args.searx_url,
        ..SearchSettings::default()
    };
    if let Some(level) = args.safesearch {
        settings
            .extra_params
            .push(("safesearch".to_string(), level.to_string()));
    }

    let client = SearchClient::new(settings)?;
    let fetcher = Box::new(ReqwestFetcher::new(FetchSettings::default()));
    let scraper = SearchScraper::new(client, fetcher);
    let results = scraper.run(&args.query).await?;

    let filename = args
        .save_as
        .unwrap_or_else(|| format!("{}.json", sanitize_query(&args.query, QUERY_STEM_MAX)));
    let path = AtomicFileWriter::new(args.out_dir).write_json(&filename, &results)?;
    log::info!("search results saved as {}", path.display());
    Ok(())
}
