//! HTTP client wrapper for the Slov-Lex API and static host.

use std::time::Duration;

use regex::Regex;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::LazyLock;

use crate::error::{Result, RetrieverError};

/// User agent string identifying this retriever.
const USER_AGENT: &str = concat!("slovlex-retriever/", env!("CARGO_PKG_VERSION"));

/// How much of an error body is echoed back in [`RetrieverError::HttpStatus`].
const ERROR_SNIPPET_CHARS: usize = 500;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Create a configured HTTP client.
///
/// # Arguments
/// * `timeout` - Per-request timeout
pub fn create_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// GET a URL and return the body as text.
///
/// There is no retry: a non-success status becomes
/// [`RetrieverError::HttpStatus`] carrying a short excerpt of the body.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL to download from
/// * `query` - Query parameters, encoded by reqwest
/// * `accept` - Value of the `accept` header
pub async fn get_text(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
    accept: &str,
) -> Result<String> {
    let response = client
        .get(url)
        .query(query)
        .header(ACCEPT, accept)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::debug!(url, status = %status, "Upstream returned non-success status");
        return Err(RetrieverError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
            snippet: snippet(&body),
        });
    }

    Ok(body)
}

/// GET a URL and decode the body as JSON.
///
/// A body that does not decode into `T` is reported as
/// [`RetrieverError::InvalidJson`].
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T> {
    let body = get_text(client, url, query, "application/json").await?;
    serde_json::from_str(&body).map_err(|source| RetrieverError::InvalidJson {
        url: url.to_string(),
        source,
    })
}

/// Whitespace-collapsed prefix of an error body.
fn snippet(body: &str) -> String {
    let head: String = body.chars().take(ERROR_SNIPPET_CHARS).collect();
    WHITESPACE_RUN.replace_all(&head, " ").trim().to_string()
}
