//! Resolution of the version of a law effective on a given date.

use std::sync::Arc;

use reqwest::Client;

use crate::config::{today_utc, validate_date, RetrieverConfig};
use crate::error::{Result, RetrieverError};
use crate::http::get_json;
use crate::types::{SearchResponse, VersionDescriptor, VersionDoc};

/// Queries the effectiveness lookup. Results are not cached.
pub struct VersionResolver {
    client: Client,
    config: Arc<RetrieverConfig>,
}

impl VersionResolver {
    pub fn new(client: Client, config: Arc<RetrieverConfig>) -> Self {
        Self { client, config }
    }

    /// Find the version of `base_iri` whose validity interval contains `date`.
    ///
    /// # Arguments
    /// * `base_iri` - Version-independent law IRI (e.g., "/SK/ZZ/2003/595")
    /// * `date` - YYYY-MM-DD; missing or blank means today (UTC)
    ///
    /// # Returns
    /// The first matching version and the date actually used.
    pub async fn resolve(&self, base_iri: &str, date: Option<&str>) -> Result<VersionDescriptor> {
        let date = normalize_date(date)?;

        let url = self.config.search_url("znenie");
        let response: SearchResponse<VersionDoc> = get_json(
            &self.client,
            &url,
            &[("zodpovedajucaUcinnost", date.as_str()), ("predpis", base_iri)],
        )
        .await?;

        let version_iri = response
            .docs
            .into_iter()
            .next()
            .and_then(|doc| doc.iri)
            .filter(|iri| !iri.is_empty())
            .ok_or_else(|| RetrieverError::VersionNotFound {
                base_iri: base_iri.to_string(),
                date: date.clone(),
            })?;

        tracing::debug!(base_iri, %date, %version_iri, "Resolved version");
        Ok(VersionDescriptor { version_iri, date })
    }
}

/// Trim the requested date, default it to today, and check its format.
pub fn normalize_date(date: Option<&str>) -> Result<String> {
    let date = match date.map(str::trim) {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => today_utc(),
    };
    validate_date(&date)?;
    Ok(date)
}
