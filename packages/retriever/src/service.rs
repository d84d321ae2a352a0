//! Retriever service that ties all components together.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::browser::{BrowserLauncher, ChromiumLauncher};
use crate::config::RetrieverConfig;
use crate::error::Result;
use crate::fetcher::DocumentFetcher;
use crate::http::create_client;
use crate::identifier::parse_law_reference;
use crate::metadata::MetadataStore;
use crate::render::{render_document, render_section, LawDocument, RenderedDocument};
use crate::search::{effective_limit, SearchIndex, SearchMode};
use crate::types::{DocumentMetadata, Suggestion};
use crate::version::VersionResolver;

/// Number of matching headings listed per full-text hit.
const HIT_HEADING_LIMIT: usize = 5;

/// Whole text of a law version with its header fields.
#[derive(Debug, Clone, Serialize)]
pub struct LawText {
    /// The reference as the caller wrote it.
    pub law: String,
    /// Date the version was resolved for.
    pub date: String,
    pub version_iri: String,
    pub metadata: DocumentMetadata,
    pub rendered: RenderedDocument,
}

impl fmt::Display for LawText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} – version as of {}", self.law, self.date)?;
        if let Some(interval) = self.metadata.effective_interval() {
            writeln!(f, "Effective: {interval}")?;
        }
        writeln!(f, "IRI: {}", self.version_iri)?;
        write!(f, "\n{}", self.rendered.text)
    }
}

/// One section of a law version, or a record that it does not exist.
#[derive(Debug, Clone, Serialize)]
pub struct SectionText {
    pub law: String,
    pub section: String,
    pub date: String,
    pub version_iri: String,
    pub metadata: DocumentMetadata,
    /// Rendered section; `None` when the version has no such section.
    pub text: Option<String>,
}

impl SectionText {
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.text.is_some()
    }
}

impl fmt::Display for SectionText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(text) = &self.text else {
            return write!(
                f,
                "Section {} not found in {} (IRI: {}).",
                self.section, self.law, self.version_iri
            );
        };

        writeln!(f, "{} – {} (as of {})", self.law, self.section, self.date)?;
        if let Some(interval) = self.metadata.effective_interval() {
            writeln!(f, "Effective: {interval}")?;
        }
        write!(f, "\n{text}")
    }
}

/// Result of [`Retriever::search`].
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", content = "hits", rename_all = "lowercase")]
pub enum SearchHits {
    Autocomplete(Vec<Suggestion>),
    Fulltext {
        query: String,
        documents: Vec<DocumentMetadata>,
    },
}

impl SearchHits {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Autocomplete(items) => items.len(),
            Self::Fulltext { documents, .. } => documents.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for SearchHits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "No results.");
        }

        let entries: Vec<String> = match self {
            Self::Autocomplete(items) => items
                .iter()
                .map(|item| {
                    let desc = item
                        .description
                        .as_deref()
                        .map(|d| format!(" - {d}"))
                        .unwrap_or_default();
                    format!("{}{desc}\nIRI: {}", item.display_label(), item.iri)
                })
                .collect(),
            Self::Fulltext { query, documents } => documents
                .iter()
                .map(|doc| fulltext_entry(doc, query))
                .collect(),
        };

        write!(f, "{}", entries.join("\n\n"))
    }
}

fn fulltext_entry(doc: &DocumentMetadata, query: &str) -> String {
    let number = doc.number.as_deref().unwrap_or(&doc.iri);
    let name = doc.name.as_deref().unwrap_or_default();
    let mut entry = format!("{number} - {name}").trim().to_string();

    let matching = doc.matching_headings(query);
    if !matching.is_empty() {
        let shown: Vec<&str> = matching.iter().take(HIT_HEADING_LIMIT).copied().collect();
        let more = if matching.len() > HIT_HEADING_LIMIT { "..." } else { "" };
        entry.push_str(&format!("\nMatching headings: {}{more}", shown.join(", ")));
    }

    entry.push_str(&format!("\nIRI: {}", doc.iri));
    entry
}

/// Entry point for all retrieval operations.
///
/// Build one per process and share it; the caches it owns live as long as
/// it does.
pub struct Retriever {
    metadata: MetadataStore,
    versions: VersionResolver,
    documents: DocumentFetcher,
    search: SearchIndex,
}

impl Retriever {
    /// Create a retriever using `browser` for the download fallback.
    pub fn new(config: RetrieverConfig, browser: Arc<dyn BrowserLauncher>) -> Result<Self> {
        let client = create_client(config.http_timeout)?;
        let config = Arc::new(config);

        Ok(Self {
            metadata: MetadataStore::new(client.clone(), Arc::clone(&config)),
            versions: VersionResolver::new(client.clone(), Arc::clone(&config)),
            documents: DocumentFetcher::new(client.clone(), Arc::clone(&config), browser),
            search: SearchIndex::new(client, config),
        })
    }

    /// Create a retriever that falls back to a local headless Chromium.
    pub fn from_config(config: RetrieverConfig) -> Result<Self> {
        let launcher = ChromiumLauncher::new(config.chromium_path.clone());
        Self::new(config, Arc::new(launcher))
    }

    /// Basic information about a law by number and year.
    pub async fn law_info(&self, number: &str, year: &str) -> Result<DocumentMetadata> {
        let citation = format!("{}/{}", number.trim(), year.trim());
        self.metadata.by_number(&citation).await
    }

    /// Full text of a law as effective on `date` (default: today).
    ///
    /// # Arguments
    /// * `law` - Reference such as "595/2003" or "/SK/ZZ/2003/595"
    /// * `date` - Effective date in YYYY-MM-DD format
    /// * `max_chars` - Character cap for the rendered text
    pub async fn law_text(
        &self,
        law: &str,
        date: Option<&str>,
        max_chars: usize,
    ) -> Result<LawText> {
        let (version_iri, date, metadata, document) = self.load_version(law, date).await?;
        let rendered = render_document(&document, max_chars);

        tracing::debug!(
            %version_iri,
            paragraphs = document.paragraphs.len(),
            truncated = rendered.truncated,
            "Rendered law text"
        );

        Ok(LawText {
            law: law.to_string(),
            date,
            version_iri,
            metadata,
            rendered,
        })
    }

    /// One section (e.g., "§ 3") of a law as effective on `date`.
    ///
    /// A section missing from the version is not an error; the result then
    /// has no text.
    pub async fn law_section(
        &self,
        law: &str,
        section: &str,
        date: Option<&str>,
    ) -> Result<SectionText> {
        let (version_iri, date, metadata, document) = self.load_version(law, date).await?;
        let text = render_section(&document, section);
        if text.is_none() {
            tracing::debug!(%version_iri, section, "Section not present in version");
        }

        Ok(SectionText {
            law: law.to_string(),
            section: section.to_string(),
            date,
            version_iri,
            metadata,
            text,
        })
    }

    /// Search laws by keyword.
    ///
    /// `limit` defaults to 10 and is clamped to `1..=25` before it reaches
    /// the search service or the cache key.
    pub async fn search(
        &self,
        query: &str,
        mode: SearchMode,
        limit: Option<usize>,
    ) -> Result<SearchHits> {
        let limit = effective_limit(limit);
        match mode {
            SearchMode::Autocomplete => Ok(SearchHits::Autocomplete(
                self.search.suggest(query, limit).await?,
            )),
            SearchMode::Fulltext => Ok(SearchHits::Fulltext {
                query: query.trim().to_string(),
                documents: self.search.search_fulltext(query, limit).await?,
            }),
        }
    }

    /// Identifier, version, metadata and parsed markup of `law` on `date`.
    async fn load_version(
        &self,
        law: &str,
        date: Option<&str>,
    ) -> Result<(String, String, DocumentMetadata, LawDocument)> {
        let identifier = parse_law_reference(law)?;
        let version = self.versions.resolve(&identifier.base_iri, date).await?;
        let metadata = self.metadata.by_iri(&version.version_iri).await?;
        let markup = self.documents.fetch(&version.version_iri).await?;
        let document = LawDocument::parse(&markup);

        Ok((version.version_iri, version.date, metadata, document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn metadata() -> DocumentMetadata {
        DocumentMetadata {
            iri: "/SK/ZZ/2003/595/20250101".to_string(),
            number: Some("595/2003".to_string()),
            name: Some("Zákon o dani z príjmov".to_string()),
            law_type: None,
            promulgated: None,
            effective_from: Some("2025-01-01".to_string()),
            effective_to: None,
            matching_effect: None,
            headings: vec![
                "Predmet dane".to_string(),
                "Základ dane".to_string(),
                "Sadzba dane".to_string(),
            ],
        }
    }

    #[test]
    fn test_law_text_display() {
        let text = LawText {
            law: "595/2003".to_string(),
            date: "2025-06-30".to_string(),
            version_iri: "/SK/ZZ/2003/595/20250101".to_string(),
            metadata: metadata(),
            rendered: RenderedDocument {
                text: "§ 1 - Predmet úpravy".to_string(),
                truncated: false,
            },
        };
        assert_eq!(
            text.to_string(),
            "595/2003 – version as of 2025-06-30\n\
             Effective: 2025-01-01 - ?\n\
             IRI: /SK/ZZ/2003/595/20250101\n\
             \n\
             § 1 - Predmet úpravy"
        );
    }

    #[test]
    fn test_section_display_not_found() {
        let section = SectionText {
            law: "595/2003".to_string(),
            section: "999".to_string(),
            date: "2025-06-30".to_string(),
            version_iri: "/SK/ZZ/2003/595/20250101".to_string(),
            metadata: metadata(),
            text: None,
        };
        assert!(!section.is_found());
        assert_eq!(
            section.to_string(),
            "Section 999 not found in 595/2003 (IRI: /SK/ZZ/2003/595/20250101)."
        );
    }

    #[test]
    fn test_section_display_found() {
        let section = SectionText {
            law: "595/2003".to_string(),
            section: "§ 3".to_string(),
            date: "2025-06-30".to_string(),
            version_iri: "/SK/ZZ/2003/595/20250101".to_string(),
            metadata: metadata(),
            text: Some("§ 3 - Predmet dane".to_string()),
        };
        assert_eq!(
            section.to_string(),
            "595/2003 – § 3 (as of 2025-06-30)\nEffective: 2025-01-01 - ?\n\n§ 3 - Predmet dane"
        );
    }

    #[test]
    fn test_search_hits_empty() {
        assert_eq!(SearchHits::Autocomplete(Vec::new()).to_string(), "No results.");
    }

    #[test]
    fn test_fulltext_hit_lists_matching_headings() {
        let hits = SearchHits::Fulltext {
            query: "dane".to_string(),
            documents: vec![metadata()],
        };
        assert_eq!(
            hits.to_string(),
            "595/2003 - Zákon o dani z príjmov\n\
             Matching headings: Predmet dane, Základ dane, Sadzba dane\n\
             IRI: /SK/ZZ/2003/595/20250101"
        );
    }

    #[test]
    fn test_fulltext_hit_caps_headings() {
        let mut doc = metadata();
        doc.headings = (1..=7).map(|i| format!("Daň {i}")).collect();
        let entry = fulltext_entry(&doc, "daň");
        assert!(entry.contains("Daň 1, Daň 2, Daň 3, Daň 4, Daň 5..."));
        assert!(!entry.contains("Daň 6"));
    }

    #[test]
    fn test_autocomplete_hit_format() {
        let hits = SearchHits::Autocomplete(vec![Suggestion {
            iri: "/SK/ZZ/2003/595".to_string(),
            kind: "predpisZbierky".to_string(),
            field_name: None,
            field_value: None,
            label: Some("595/2003".to_string()),
            description: Some("Zákon o dani z príjmov".to_string()),
        }]);
        assert_eq!(
            hits.to_string(),
            "595/2003 - Zákon o dani z príjmov\nIRI: /SK/ZZ/2003/595"
        );
    }
}
