//! Core data types for the retriever.
//!
//! These mirror the JSON payloads of the Slov-Lex search API. Field names
//! on the wire are Slovak; the Rust names say what they hold.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of headings listed in a metadata summary.
const SUMMARY_HEADING_LIMIT: usize = 40;

/// Paginated envelope returned by the search endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse<T> {
    pub num_found: u64,
    pub start: u64,
    #[serde(default)]
    pub num_found_exact: Option<bool>,
    #[serde(default = "Vec::new")]
    pub docs: Vec<T>,
}

/// Descriptive record of a law or of one of its versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Law IRI, or version IRI when looked up by version.
    pub iri: String,

    /// Citation number (e.g., "595/2003").
    #[serde(rename = "cislo", default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    /// Official name.
    #[serde(rename = "nazov", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Kind of enactment (e.g., "Zákon").
    #[serde(
        rename = "typPredp_value",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub law_type: Option<String>,

    /// Promulgation date.
    #[serde(rename = "vyhlaseny", default, skip_serializing_if = "Option::is_none")]
    pub promulgated: Option<String>,

    /// Start of the effectiveness interval.
    #[serde(rename = "ucinnyOd", default, skip_serializing_if = "Option::is_none")]
    pub effective_from: Option<String>,

    /// End of the effectiveness interval.
    #[serde(rename = "ucinnyDo", default, skip_serializing_if = "Option::is_none")]
    pub effective_to: Option<String>,

    /// Effectiveness marker of the matched version.
    #[serde(
        rename = "zodpovedajucaUcinnost",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub matching_effect: Option<String>,

    /// Section headings of the law.
    #[serde(rename = "nadpisy", default, skip_serializing_if = "Vec::is_empty")]
    pub headings: Vec<String>,
}

impl DocumentMetadata {
    /// `Effective: <from> - <to>`, or `None` when neither bound is known.
    #[must_use]
    pub fn effective_interval(&self) -> Option<String> {
        if self.effective_from.is_none() && self.effective_to.is_none() {
            return None;
        }
        Some(format!(
            "{} - {}",
            self.effective_from.as_deref().unwrap_or("?"),
            self.effective_to.as_deref().unwrap_or("?")
        ))
    }

    /// Headings containing `query`, compared case-insensitively.
    #[must_use]
    pub fn matching_headings(&self, query: &str) -> Vec<&str> {
        let needle = query.to_lowercase();
        self.headings
            .iter()
            .filter(|h| h.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }
}

/// Multi-line summary of a law, one field per line. Absent fields are
/// left out.
impl fmt::Display for DocumentMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let number = self.number.as_deref().unwrap_or(&self.iri);
        let name = self.name.as_deref().unwrap_or_default();
        let mut lines = vec![format!("{number} - {name}").trim().to_string()];

        if let Some(t) = &self.law_type {
            lines.push(format!("Type: {t}"));
        }
        if let Some(p) = &self.promulgated {
            lines.push(format!("Promulgated: {p}"));
        }
        if let Some(interval) = self.effective_interval() {
            lines.push(format!("Effective: {interval}"));
        }
        lines.push(format!("IRI: {}", self.iri));
        if !self.headings.is_empty() {
            let shown: Vec<&str> = self
                .headings
                .iter()
                .take(SUMMARY_HEADING_LIMIT)
                .map(String::as_str)
                .collect();
            let more = if self.headings.len() > SUMMARY_HEADING_LIMIT {
                " | …"
            } else {
                ""
            };
            lines.push(format!("Headings: {}{more}", shown.join(" | ")));
        }

        write!(f, "{}", lines.join("\n"))
    }
}

/// Document returned by the effectiveness lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionDoc {
    #[serde(default)]
    pub iri: Option<String>,
}

/// The version of a law effective on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionDescriptor {
    /// Identifier of this temporal snapshot.
    pub version_iri: String,

    /// The date actually used for the lookup (YYYY-MM-DD).
    pub date: String,
}

/// Autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub iri: String,

    #[serde(rename = "typ", default)]
    pub kind: String,

    #[serde(rename = "nazovPola", default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,

    #[serde(
        rename = "hodnotaPola",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub field_value: Option<String>,

    #[serde(rename = "menovka", default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(rename = "popis", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Suggestion {
    /// Best human-facing name: label, then field value, then IRI.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label
            .as_deref()
            .or(self.field_value.as_deref())
            .unwrap_or(&self.iri)
    }
}
