use std::fs::OpenOptions;
use std::io::{BufWriter, Write as _};

use anyhow::Context as _;
use url::Url;

use crate::cli::LinksArgs;
use crate::formats::LinkRecord;
use crate::page::{PageQuery, Waits};
use crate::session;

/// CSS class of one listing tile; its `href` is the detail-page link.
pub const GRID_ITEM: &str = ".SearchResultGridItem";

/// The pagination "next" control.
pub const NEXT_BUTTON: &str = "button.Pagination-link.is-right.is-link";

pub async fn run(args: LinksArgs) -> anyhow::Result<()> {
    let start_url = Url::parse(&args.url).context("parse --url")?;
    if start_url.scheme() != "http" && start_url.scheme() != "https" {
        anyhow::bail!("--url must be http/https: {start_url}");
    }

    let waits = Waits::tuned(args.settle_ms, args.page_delay_ms);
    let driver = session::connect(&args.webdriver, args.headless)
        .await
        .context("create browser session")?;

    let outcome = collect_and_write(&driver, &args, &waits).await;

    if let Err(err) = driver.quit().await {
        tracing::warn!(?err, "failed to shut down browser session");
    }

    outcome
}

async fn collect_and_write(
    page: &impl PageQuery,
    args: &LinksArgs,
    waits: &Waits,
) -> anyhow::Result<()> {
    page.navigate(&args.url)
        .await
        .context("open listing page")?;

    let links = collect_links(page, waits, args.max_links).await;
    write_link_log(&links, args.out.as_deref())
}

/// Walk the paginated listing and return every detail-page link, first
/// occurrence first, optionally capped at `max_links`.
///
/// Collection degrades instead of erroring: if a page never shows its
/// items, or an item read fails, whatever was gathered so far is returned.
pub async fn collect_links(
    page: &impl PageQuery,
    waits: &Waits,
    max_links: Option<usize>,
) -> Vec<String> {
    let mut links: Vec<String> = Vec::new();

    loop {
        if !page.wait_for_presence(GRID_ITEM, waits.items).await {
            tracing::warn!(
                total = links.len(),
                "listing items never appeared; keeping what was collected"
            );
            break;
        }
        tokio::time::sleep(waits.settle).await;

        let hrefs = match page.read_attributes(GRID_ITEM, "href").await {
            Ok(hrefs) => hrefs,
            Err(err) => {
                tracing::warn!(
                    ?err,
                    total = links.len(),
                    "failed to read listing items; keeping what was collected"
                );
                break;
            }
        };

        let on_page = hrefs.len();
        for href in hrefs.into_iter().flatten() {
            if href.is_empty() || links.contains(&href) {
                continue;
            }
            links.push(href);
            if let Some(max) = max_links
                && links.len() >= max
            {
                tracing::info!(max, "reached link limit");
                return links;
            }
        }
        tracing::info!(on_page, total = links.len(), "collected listing page");

        if !page.wait_for_presence(NEXT_BUTTON, waits.next).await {
            tracing::info!("no next-page control; collection finished");
            break;
        }
        match next_is_disabled(page).await {
            Ok(true) => {
                tracing::info!("reached last page");
                break;
            }
            Ok(false) => {}
            Err(err) => {
                tracing::info!(?err, "next-page control unreadable; collection finished");
                break;
            }
        }
        if let Err(err) = page.click_unchecked(NEXT_BUTTON).await {
            tracing::warn!(?err, "failed to advance pagination");
            break;
        }
        tokio::time::sleep(waits.page_delay).await;
    }

    links
}

/// The control counts as disabled with either the `disabled` attribute or
/// `aria-disabled="true"` set.
async fn next_is_disabled(page: &impl PageQuery) -> anyhow::Result<bool> {
    if page
        .read_attribute(NEXT_BUTTON, "disabled")
        .await?
        .is_some()
    {
        return Ok(true);
    }

    let aria = page.read_attribute(NEXT_BUTTON, "aria-disabled").await?;
    Ok(aria.as_deref() == Some("true"))
}

fn write_link_log(links: &[String], out: Option<&str>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            let file = OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(path)
                .with_context(|| format!("create link log: {path}"))?;
            let mut writer = BufWriter::new(file);
            write_link_records(&mut writer, links)?;
            writer.flush().context("flush link log")?;
            tracing::info!(links = links.len(), path, "saved link log");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            write_link_records(&mut stdout, links)?;
            stdout.flush().context("flush stdout")?;
        }
    }

    Ok(())
}

fn write_link_records<W: std::io::Write>(writer: &mut W, links: &[String]) -> anyhow::Result<()> {
    for (index, url) in links.iter().enumerate() {
        let record = LinkRecord {
            index,
            url: url.clone(),
            collected_at: chrono::Utc::now().to_rfc3339(),
        };
        serde_json::to_writer(&mut *writer, &record).context("write link record json")?;
        writer
            .write_all(b"\n")
            .context("write link record newline")?;
    }

    Ok(())
}
