//! Error types for the retriever.
//!
//! Every variant of [`RetrieverError`] belongs to exactly one [`ErrorKind`],
//! so callers can branch on the broad category without matching on every
//! variant.

use thiserror::Error;

/// Broad error categories surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The law reference could not be parsed.
    Parse,
    /// An input (date, configuration value) was malformed.
    Validation,
    /// No matching law or version exists upstream.
    NotFound,
    /// Retrieval failed on every available path.
    Fetch,
    /// An upstream response had an unexpected shape.
    UpstreamFormat,
}

/// Main error type for the retriever library.
#[derive(Debug, Error)]
pub enum RetrieverError {
    /// Law reference in neither `number/year` nor `/SK/ZZ/year/number` form.
    #[error("Cannot parse law reference: '{0}'. Expected e.g. \"595/2003\" or \"/SK/ZZ/2003/595\"")]
    InvalidLawReference(String),

    /// Invalid date format.
    #[error("Invalid date format: '{0}'. Expected YYYY-MM-DD (e.g., 2025-01-01)")]
    InvalidDate(String),

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// No law matched the lookup.
    #[error("Law not found: {0}")]
    LawNotFound(String),

    /// No version of the law is effective on the requested date.
    #[error("No version of {base_iri} is effective on {date}")]
    VersionNotFound { base_iri: String, date: String },

    /// HTTP transport failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("GET {url} failed: {status} :: {snippet}")]
    HttpStatus {
        url: String,
        status: u16,
        snippet: String,
    },

    /// Upstream body was not the JSON we expected.
    #[error("Invalid JSON from {url}: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The automated browser could not be driven.
    #[error("Browser fallback failed: {0}")]
    Browser(String),

    /// The browser never observed the target response.
    #[error("Browser fallback timed out after {timeout_secs}s waiting for {url}")]
    FallbackTimedOut { url: String, timeout_secs: u64 },

    /// Both the direct download and the browser fallback failed.
    #[error("Failed to fetch {url} (direct: {primary}; fallback: {fallback})")]
    DocumentFetch {
        url: String,
        primary: String,
        #[source]
        fallback: Box<RetrieverError>,
    },
}

impl RetrieverError {
    /// Classify this error into the caller-facing taxonomy.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidLawReference(_) => ErrorKind::Parse,
            Self::InvalidDate(_) | Self::Config(_) => ErrorKind::Validation,
            Self::LawNotFound(_) | Self::VersionNotFound { .. } => ErrorKind::NotFound,
            Self::Http(_)
            | Self::HttpStatus { .. }
            | Self::Browser(_)
            | Self::FallbackTimedOut { .. }
            | Self::DocumentFetch { .. } => ErrorKind::Fetch,
            Self::InvalidJson { .. } => ErrorKind::UpstreamFormat,
        }
    }
}

/// Result type alias for retriever operations.
pub type Result<T> = std::result::Result<T, RetrieverError>;
