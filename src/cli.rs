use clap::{Args, Parser, Subcommand};

/// ThriftBooks BookTok bestsellers listing, 50 items per page.
pub const DEFAULT_LISTING_URL: &str =
    "https://www.thriftbooks.com/browse/#b.s=bestsellers-desc&b.p=1&b.pp=50&b.f.t%5B%5D=15999";

/// Default chromedriver endpoint.
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Scrape(ScrapeArgs),
    Links(LinksArgs),
}

#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// Listing page to start from (must be http/https).
    #[arg(long, default_value = DEFAULT_LISTING_URL)]
    pub url: String,

    /// Output CSV path.
    #[arg(long, default_value = "booktok_bestsellers.csv")]
    pub out: String,

    /// Stop after this many book links (bounds collection and detail visits).
    #[arg(long)]
    pub max_links: Option<usize>,

    /// WebDriver endpoint to connect to.
    #[arg(long, default_value = DEFAULT_WEBDRIVER_URL)]
    pub webdriver: String,

    /// Run the browser without a visible window.
    #[arg(long)]
    pub headless: bool,

    /// Pause after a presence wait before reading the page.
    #[arg(long, default_value_t = 2000)]
    pub settle_ms: u64,

    /// Pause after advancing pagination before re-reading items.
    #[arg(long, default_value_t = 3000)]
    pub page_delay_ms: u64,
}

#[derive(Debug, Args)]
pub struct LinksArgs {
    /// Listing page to start from (must be http/https).
    #[arg(long, default_value = DEFAULT_LISTING_URL)]
    pub url: String,

    /// Output path for the JSONL link log (stdout when omitted).
    #[arg(long)]
    pub out: Option<String>,

    /// Stop after this many book links.
    #[arg(long)]
    pub max_links: Option<usize>,

    /// WebDriver endpoint to connect to.
    #[arg(long, default_value = DEFAULT_WEBDRIVER_URL)]
    pub webdriver: String,

    /// Run the browser without a visible window.
    #[arg(long)]
    pub headless: bool,

    /// Pause after a presence wait before reading the page.
    #[arg(long, default_value_t = 2000)]
    pub settle_ms: u64,

    /// Pause after advancing pagination before re-reading items.
    #[arg(long, default_value_t = 3000)]
    pub page_delay_ms: u64,
}
