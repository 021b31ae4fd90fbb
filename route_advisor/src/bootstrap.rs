use std::time::Duration;

use ptfs_feed::Advisory;
use reqwest::Client;
use tracing::{error, warn};
use tracing_unwrap::ResultExt;

use crate::error::ApplicationResult;

const ATTEMPTS: usize = 3;

/// One-shot pull of every currently published ATIS.
///
/// Entries that fail to decode are logged and skipped, the rest are returned
/// in the order the server sent them.
pub(crate) async fn fetch_initial_atis(url: &str) -> ApplicationResult<Vec<Advisory>> {
    let body = get_text_from_url(url).await?;
    parse_atis_list(&body)
}

pub(crate) fn parse_atis_list(body: &str) -> ApplicationResult<Vec<Advisory>> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(body)?;
    Ok(entries
        .into_iter()
        .map(serde_json::from_value::<Advisory>)
        .filter_map(Result::ok_or_log)
        .collect())
}

#[tracing::instrument]
async fn get_text_from_url(url: &str) -> ApplicationResult<String> {
    let client = reqwest::ClientBuilder::new()
        .timeout(Duration::from_secs(5))
        .build()?;
    let mut attempt = 0;
    loop {
        attempt += 1;
        match get_text(&client, url).await {
            Ok(text) => return Ok(text),
            Err(e) if attempt < ATTEMPTS => {
                warn!(attempt, "Failed to get {}: {}", url, e);
            }
            Err(e) => {
                error!(attempt, "Failed to get {}: {}", url, e);
                return Err(e.into());
            }
        }
    }
}

async fn get_text(client: &Client, url: &str) -> reqwest::Result<String> {
    client.get(url).send().await?.error_for_status()?.text().await
}
