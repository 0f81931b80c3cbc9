//! HTTP fetching of documentation pages.

use crate::post_gen::errors::Result;
use scraper::Html;
use std::time::Duration;

/// Fetches HTML content from a URL.
///
/// A single attempt is made per call; there are no retries. Non-2xx
/// responses are reported as errors.
///
/// # Errors
///
/// Returns an error if the HTTP request fails, times out, or the response
/// status is not successful.
///
/// # Examples
///
/// ```no_run
/// # use core_post::post_gen::fetch_html;
/// # use std::time::Duration;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let html = fetch_html("https://example.com", Duration::from_secs(30)).await?;
/// println!("Fetched {} bytes", html.len());
/// # Ok(())
/// # }
/// ```
pub async fn fetch_html(url: &str, timeout: Duration) -> Result<String> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let response = client.get(url).send().await?.error_for_status()?;
    let text = response.text().await?;
    tracing::debug!(url, bytes = text.len(), "fetched page");
    Ok(text)
}

/// Fetches a URL and parses the body into a traversable document tree.
///
/// # Errors
///
/// Returns an error if the HTTP request fails; HTML parsing itself is
/// lenient and never fails.
pub async fn fetch_document(url: &str, timeout: Duration) -> Result<Html> {
    let html = fetch_html(url, timeout).await?;
    Ok(Html::parse_document(&html))
}
