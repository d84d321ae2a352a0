//! Law search in two modes, each with its own short-lived cache.

use std::sync::Arc;

use reqwest::Client;

use crate::cache::TtlCache;
use crate::config::{
    RetrieverConfig, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT, SEARCH_CACHE_CAPACITY,
    SEARCH_CACHE_TTL,
};
use crate::error::Result;
use crate::http::get_json;
use crate::types::{DocumentMetadata, SearchResponse, Suggestion};

/// How to search the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SearchMode {
    /// Fast prefix search over law names.
    #[default]
    Autocomplete,
    /// Search over names and section headings.
    Fulltext,
}

/// Clamp a requested result count to `1..=MAX_SEARCH_LIMIT`.
#[must_use]
pub fn effective_limit(limit: Option<usize>) -> usize {
    limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT)
}

/// Search client for the suggestion and full-text endpoints.
pub struct SearchIndex {
    client: Client,
    config: Arc<RetrieverConfig>,
    suggestions: TtlCache<String, Vec<Suggestion>>,
    fulltext: TtlCache<String, Vec<DocumentMetadata>>,
}

impl SearchIndex {
    pub fn new(client: Client, config: Arc<RetrieverConfig>) -> Self {
        Self {
            client,
            config,
            suggestions: TtlCache::new(SEARCH_CACHE_CAPACITY, SEARCH_CACHE_TTL),
            fulltext: TtlCache::new(SEARCH_CACHE_CAPACITY, SEARCH_CACHE_TTL),
        }
    }

    /// Autocomplete suggestions for `query`. A blank query yields nothing.
    pub async fn suggest(&self, query: &str, limit: usize) -> Result<Vec<Suggestion>> {
        let q = query.trim();
        if q.is_empty() {
            return Ok(Vec::new());
        }

        let key = format!("navrhy:{q}::{limit}");
        if let Some(cached) = self.suggestions.get(&key) {
            return Ok(cached);
        }

        let url = self.config.search_url("navrhy");
        let rows = limit.to_string();
        let items: Vec<Suggestion> = get_json(
            &self.client,
            &url,
            &[("dopyt", q), ("rows", rows.as_str()), ("typ", "predpisZbierky")],
        )
        .await?;

        tracing::debug!(query = q, hits = items.len(), "Autocomplete search");
        self.suggestions.insert(key, items.clone());
        Ok(items)
    }

    /// Full-text search over names and headings. A blank query yields
    /// nothing.
    pub async fn search_fulltext(&self, query: &str, limit: usize) -> Result<Vec<DocumentMetadata>> {
        let q = query.trim();
        if q.is_empty() {
            return Ok(Vec::new());
        }

        let key = format!("rozsirene:{q}::{limit}");
        if let Some(cached) = self.fulltext.get(&key) {
            return Ok(cached);
        }

        let url = self.config.search_url("rozsirene");
        let rows = limit.to_string();
        let response: SearchResponse<DocumentMetadata> =
            get_json(&self.client, &url, &[("text", q), ("rows", rows.as_str())]).await?;

        tracing::debug!(query = q, hits = response.docs.len(), "Full-text search");
        self.fulltext.insert(key, response.docs.clone());
        Ok(response.docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_limit() {
        assert_eq!(effective_limit(None), 10);
        assert_eq!(effective_limit(Some(0)), 1);
        assert_eq!(effective_limit(Some(7)), 7);
        assert_eq!(effective_limit(Some(100)), 25);
    }
}
