//! Feed document retrieval

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use std::time::Duration;

const FEED_ACCEPT: &str = "application/rss+xml, application/xml";
const FETCH_TIMEOUT: Duration = Duration::from_secs(25);

/// Fetch the raw RSS document from a feed URL
pub fn fetch_feed(url: &str) -> Result<String> {
    let client = Client::builder()
        .user_agent(concat!("stackread/", env!("CARGO_PKG_VERSION")))
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;

    let response = client
        .get(url)
        .header(ACCEPT, FEED_ACCEPT)
        .send()
        .with_context(|| format!("Failed to fetch feed from {url}"))?
        .error_for_status()
        .context("Feed request was rejected")?;

    response.text().context("Failed to read feed response")
}
