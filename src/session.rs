use anyhow::Context as _;
use thirtyfour::prelude::*;

/// Connect a Chrome session through the WebDriver endpoint.
///
/// The session exposes remote debugging on port 9222 so a devtools client
/// can watch the run. The caller owns teardown: quit the returned driver
/// once the run finishes, whatever the outcome.
pub async fn connect(webdriver_url: &str, headless: bool) -> anyhow::Result<WebDriver> {
    let mut caps = DesiredCapabilities::chrome();
    caps.add_arg("--remote-debugging-port=9222")
        .context("configure remote debugging port")?;
    if headless {
        caps.add_arg("--headless=new").context("configure headless mode")?;
    }

    let driver = WebDriver::new(webdriver_url, caps)
        .await
        .with_context(|| format!("start browser session via {webdriver_url}"))?;

    Ok(driver)
}
