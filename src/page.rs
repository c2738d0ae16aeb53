use std::time::Duration;

use anyhow::Context as _;
use async_trait::async_trait;
use thirtyfour::prelude::*;

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Named pauses and bounded waits for the two scraping loops.
///
/// The settle and page delays are heuristics: a presence wait confirms that
/// a first element exists, not that the page finished rendering.
#[derive(Debug, Clone)]
pub struct Waits {
    /// Bounded wait for listing items on the current page.
    pub items: Duration,
    /// Bounded wait for the next-page control.
    pub next: Duration,
    /// Bounded wait for the title element on a detail page.
    pub title: Duration,
    /// Pause between a successful presence wait and reading the page.
    pub settle: Duration,
    /// Pause after triggering pagination.
    pub page_delay: Duration,
}

impl Default for Waits {
    fn default() -> Self {
        Self {
            items: Duration::from_secs(20),
            next: Duration::from_secs(10),
            title: Duration::from_secs(15),
            settle: Duration::from_secs(2),
            page_delay: Duration::from_secs(3),
        }
    }
}

impl Waits {
    /// Default timeouts with the two tunable pauses overridden.
    pub fn tuned(settle_ms: u64, page_delay_ms: u64) -> Self {
        Self {
            settle: Duration::from_millis(settle_ms),
            page_delay: Duration::from_millis(page_delay_ms),
            ..Self::default()
        }
    }

    /// Everything zeroed. Only sensible against a driver that answers
    /// queries synchronously, as the test doubles do.
    pub fn immediate() -> Self {
        Self {
            items: Duration::ZERO,
            next: Duration::ZERO,
            title: Duration::ZERO,
            settle: Duration::ZERO,
            page_delay: Duration::ZERO,
        }
    }
}

/// What the scraping loops need from a live page.
///
/// [`WebDriver`] is the production implementation; tests script their own.
#[async_trait]
pub trait PageQuery {
    /// Navigate to an absolute URL.
    async fn navigate(&self, url: &str) -> anyhow::Result<()>;

    /// Block until an element matches `selector` or `timeout` elapses.
    /// Returns false on timeout.
    async fn wait_for_presence(&self, selector: &str, timeout: Duration) -> bool;

    /// The given attribute of every element matching `selector`, in DOM
    /// order. `None` entries are elements without the attribute.
    async fn read_attributes(
        &self,
        selector: &str,
        attr: &str,
    ) -> anyhow::Result<Vec<Option<String>>>;

    /// Visible text of every element matching `selector`, in DOM order.
    async fn read_texts(&self, selector: &str) -> anyhow::Result<Vec<String>>;

    /// Visible text of the first element matching `selector`. Errors when
    /// nothing matches.
    async fn read_text(&self, selector: &str) -> anyhow::Result<String>;

    /// The given attribute of the first element matching `selector`.
    /// Errors when nothing matches; `Ok(None)` when the element lacks the
    /// attribute.
    async fn read_attribute(
        &self,
        selector: &str,
        attr: &str,
    ) -> anyhow::Result<Option<String>>;

    /// Click the first element matching `selector` from script. Pagination
    /// controls can sit under overlays, so a pointer click may not land; a
    /// DOM-level click always registers.
    async fn click_unchecked(&self, selector: &str) -> anyhow::Result<()>;
}

#[async_trait]
impl PageQuery for WebDriver {
    async fn navigate(&self, url: &str) -> anyhow::Result<()> {
        self.goto(url)
            .await
            .with_context(|| format!("navigate to {url}"))
    }

    async fn wait_for_presence(&self, selector: &str, timeout: Duration) -> bool {
        self.query(By::Css(selector))
            .wait(timeout, POLL_INTERVAL)
            .exists()
            .await
            .unwrap_or(false)
    }

    async fn read_attributes(
        &self,
        selector: &str,
        attr: &str,
    ) -> anyhow::Result<Vec<Option<String>>> {
        let elements = self.find_all(By::Css(selector)).await?;
        let mut values = Vec::with_capacity(elements.len());
        for element in &elements {
            values.push(element.attr(attr).await?);
        }
        Ok(values)
    }

    async fn read_texts(&self, selector: &str) -> anyhow::Result<Vec<String>> {
        let elements = self.find_all(By::Css(selector)).await?;
        let mut texts = Vec::with_capacity(elements.len());
        for element in &elements {
            texts.push(element.text().await?);
        }
        Ok(texts)
    }

    async fn read_text(&self, selector: &str) -> anyhow::Result<String> {
        let element = self.find(By::Css(selector)).await?;
        Ok(element.text().await?)
    }

    async fn read_attribute(
        &self,
        selector: &str,
        attr: &str,
    ) -> anyhow::Result<Option<String>> {
        let element = self.find(By::Css(selector)).await?;
        Ok(element.attr(attr).await?)
    }

    async fn click_unchecked(&self, selector: &str) -> anyhow::Result<()> {
        let element = self.find(By::Css(selector)).await?;
        self.execute("arguments[0].click();", vec![element.to_json()?])
            .await?;
        Ok(())
    }
}
