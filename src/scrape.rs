use anyhow::Context as _;
use url::Url;

use crate::cli::ScrapeArgs;
use crate::page::{PageQuery, Waits};
use crate::{collect, detail, export, session};

/// The full pipeline: collect listing links, visit each detail page, write
/// the CSV. The browser session is torn down whatever the outcome.
pub async fn run(args: ScrapeArgs) -> anyhow::Result<()> {
    let start_url = Url::parse(&args.url).context("parse --url")?;
    if start_url.scheme() != "http" && start_url.scheme() != "https" {
        anyhow::bail!("--url must be http/https: {start_url}");
    }

    let waits = Waits::tuned(args.settle_ms, args.page_delay_ms);
    let driver = session::connect(&args.webdriver, args.headless)
        .await
        .context("create browser session")?;

    let outcome = run_pipeline(&driver, &args, &waits).await;

    if let Err(err) = driver.quit().await {
        tracing::warn!(?err, "failed to shut down browser session");
    }

    outcome
}

async fn run_pipeline(
    page: &impl PageQuery,
    args: &ScrapeArgs,
    waits: &Waits,
) -> anyhow::Result<()> {
    page.navigate(&args.url)
        .await
        .context("open listing page")?;

    tracing::info!(url = %args.url, "scrape: collect links");
    let links = collect::collect_links(page, waits, args.max_links).await;

    tracing::info!(links = links.len(), "scrape: extract details");
    let records = detail::extract_details(page, &links, waits, args.max_links).await;

    tracing::info!(records = records.len(), out = %args.out, "scrape: export csv");
    export::write_csv(&records, &args.out).context("export csv")?;

    Ok(())
}
