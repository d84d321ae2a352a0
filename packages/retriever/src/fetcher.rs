//! Portal markup downloading with a browser fallback.
//!
//! The markup of a version lives at a static URL derived from its IRI.
//! A direct GET is tried first; any failure there (transport error or
//! non-success status) hands over to a one-shot browser session instead
//! of surfacing to the caller. Neither path is retried.

use std::sync::Arc;

use reqwest::Client;

use crate::browser::{fetch_via_browser, BrowserLauncher};
use crate::cache::TtlCache;
use crate::config::{RetrieverConfig, DOCUMENT_CACHE_CAPACITY, DOCUMENT_CACHE_TTL};
use crate::error::{Result, RetrieverError};
use crate::http::get_text;

/// Raw portal HTML of one version, shared between cache and callers.
pub type Markup = Arc<str>;

/// Downloads and caches portal markup keyed by version IRI.
///
/// Concurrent misses for the same IRI are not coalesced; each one goes
/// upstream.
pub struct DocumentFetcher {
    client: Client,
    config: Arc<RetrieverConfig>,
    browser: Arc<dyn BrowserLauncher>,
    cache: TtlCache<String, Markup>,
}

impl DocumentFetcher {
    pub fn new(
        client: Client,
        config: Arc<RetrieverConfig>,
        browser: Arc<dyn BrowserLauncher>,
    ) -> Self {
        Self {
            client,
            config,
            browser,
            cache: TtlCache::new(DOCUMENT_CACHE_CAPACITY, DOCUMENT_CACHE_TTL),
        }
    }

    /// Portal markup of `version_iri`.
    ///
    /// # Returns
    /// The markup from cache, the static host, or the browser fallback, in
    /// that order of preference.
    pub async fn fetch(&self, version_iri: &str) -> Result<Markup> {
        if let Some(cached) = self.cache.get(&version_iri.to_string()) {
            tracing::debug!(version_iri, "Markup cache hit");
            return Ok(cached);
        }

        let url = self.config.portal_url(version_iri);
        let html = match get_text(&self.client, &url, &[], "text/html").await {
            Ok(html) => html,
            Err(primary) => {
                tracing::warn!(
                    %url,
                    error = %primary,
                    "Direct download failed, falling back to browser"
                );
                let html = fetch_via_browser(
                    self.browser.as_ref(),
                    &url,
                    &self.config.portal_host_url,
                    self.config.fallback_timeout,
                )
                .await
                .map_err(|fallback| RetrieverError::DocumentFetch {
                    url: url.clone(),
                    primary: primary.to_string(),
                    fallback: Box::new(fallback),
                })?;
                tracing::debug!(%url, bytes = html.len(), "Browser fallback captured markup");
                html
            }
        };

        let markup: Markup = Arc::from(html);
        self.cache.insert(version_iri.to_string(), Arc::clone(&markup));
        Ok(markup)
    }
}
