use anyhow::Context as _;

use crate::formats::{BookRecord, FormatPrices, NOT_AVAILABLE};
use crate::page::{PageQuery, Waits};

/// The book title heading on a detail page.
pub const TITLE: &str = ".WorkMeta-title.Alternative.Alternative-title";

/// Metadata element carrying the aggregate rating in its `content`.
pub const RATING_META: &str = "meta[itemprop='ratingValue']";

/// One button per purchasable format/condition, text like "Paperback $9.99".
pub const PRICE_BUTTON: &str = ".NewButton.WorkSelector-button";

/// Visit each link in order and build one record per page that could be
/// read.
///
/// A failure on one page skips that page only; the loop always runs to the
/// end of the (possibly truncated) link list.
pub async fn extract_details(
    page: &impl PageQuery,
    links: &[String],
    waits: &Waits,
    max_links: Option<usize>,
) -> Vec<BookRecord> {
    let links = match max_links {
        Some(max) => &links[..links.len().min(max)],
        None => links,
    };

    let mut records = Vec::with_capacity(links.len());
    for (i, link) in links.iter().enumerate() {
        match extract_one(page, link, waits).await {
            Ok(record) => {
                tracing::info!(
                    n = i + 1,
                    of = links.len(),
                    title = %record.title,
                    "scraped detail page"
                );
                records.push(record);
            }
            Err(err) => {
                tracing::warn!(url = %link, ?err, "skipping detail page");
            }
        }
    }

    records
}

async fn extract_one(
    page: &impl PageQuery,
    link: &str,
    waits: &Waits,
) -> anyhow::Result<BookRecord> {
    page.navigate(link).await?;
    if !page.wait_for_presence(TITLE, waits.title).await {
        anyhow::bail!("title element never appeared");
    }
    tokio::time::sleep(waits.settle).await;

    let title = page.read_text(TITLE).await.context("read title")?;
    let title = title.trim().to_owned();

    // Rating failures stay local to the field.
    let rating = match page.read_attribute(RATING_META, "content").await {
        Ok(Some(value)) => value,
        Ok(None) | Err(_) => NOT_AVAILABLE.to_owned(),
    };

    let mut prices = FormatPrices::default();
    match page.read_texts(PRICE_BUTTON).await {
        Ok(texts) => {
            for text in &texts {
                prices.apply_button(text);
            }
        }
        Err(err) => {
            tracing::debug!(url = %link, ?err, "price buttons unreadable; slots keep the sentinel");
        }
    }

    Ok(BookRecord {
        title,
        rating,
        url: link.to_owned(),
        prices,
    })
}
