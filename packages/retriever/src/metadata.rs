//! Metadata lookup with a shared 24-hour cache.
//!
//! Lookups by citation number and by IRI share one cache but use distinct
//! key prefixes (`cislo:` / `iri:`), so the two entry points never collide.

use std::sync::Arc;

use reqwest::Client;

use crate::cache::TtlCache;
use crate::config::{RetrieverConfig, METADATA_CACHE_CAPACITY, METADATA_CACHE_TTL};
use crate::error::{Result, RetrieverError};
use crate::http::get_json;
use crate::types::{DocumentMetadata, SearchResponse};

/// Fetches and caches [`DocumentMetadata`] records.
pub struct MetadataStore {
    client: Client,
    config: Arc<RetrieverConfig>,
    cache: TtlCache<String, DocumentMetadata>,
}

impl MetadataStore {
    pub fn new(client: Client, config: Arc<RetrieverConfig>) -> Self {
        Self {
            client,
            config,
            cache: TtlCache::new(METADATA_CACHE_CAPACITY, METADATA_CACHE_TTL),
        }
    }

    /// Metadata of a law by citation number (e.g., "595/2003").
    pub async fn by_number(&self, number: &str) -> Result<DocumentMetadata> {
        self.lookup(format!("cislo:{number}"), "cislo", number)
            .await
    }

    /// Metadata of a specific version by its IRI.
    pub async fn by_iri(&self, iri: &str) -> Result<DocumentMetadata> {
        self.lookup(format!("iri:{iri}"), "iri", iri).await
    }

    /// Cached lookup; only successful results are stored.
    async fn lookup(&self, cache_key: String, param: &str, value: &str) -> Result<DocumentMetadata> {
        if let Some(cached) = self.cache.get(&cache_key) {
            tracing::debug!(key = %cache_key, "Metadata cache hit");
            return Ok(cached);
        }

        tracing::debug!(key = %cache_key, "Metadata cache miss, querying search API");
        let url = self.config.search_url("rozsirene");
        let response: SearchResponse<DocumentMetadata> =
            get_json(&self.client, &url, &[(param, value)]).await?;

        let doc = response
            .docs
            .into_iter()
            .next()
            .ok_or_else(|| RetrieverError::LawNotFound(value.to_string()))?;

        self.cache.insert(cache_key, doc.clone());
        Ok(doc)
    }
}
