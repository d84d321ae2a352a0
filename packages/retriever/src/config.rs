//! Configuration constants and validation functions for the retriever.

use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use crate::error::{Result, RetrieverError};

/// Base URL of the Slov-Lex search API gateway.
pub const API_BASE_URL: &str = "https://api-gateway.slov-lex.sk";

/// Base URL of the static host serving per-version portal markup.
pub const STATIC_BASE_URL: &str = "https://static.slov-lex.sk/static";

/// Page the browser fallback opens to pick up a valid session context.
pub const PORTAL_HOST_URL: &str = "https://www.slov-lex.sk/ezbierky/";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Deadline for the browser fallback, in seconds.
pub const FALLBACK_TIMEOUT_SECS: u64 = 30;

/// Metadata cache capacity (entries).
pub const METADATA_CACHE_CAPACITY: usize = 256;

/// Metadata cache time-to-live.
pub const METADATA_CACHE_TTL: Duration = Duration::from_secs(60 * 60 * 24);

/// Document markup cache capacity (entries).
pub const DOCUMENT_CACHE_CAPACITY: usize = 64;

/// Document markup cache time-to-live.
pub const DOCUMENT_CACHE_TTL: Duration = Duration::from_secs(60 * 60 * 6);

/// Search result cache capacity (entries, per search mode).
pub const SEARCH_CACHE_CAPACITY: usize = 256;

/// Search result cache time-to-live.
pub const SEARCH_CACHE_TTL: Duration = Duration::from_secs(60 * 10);

/// Default character cap for whole-document rendering.
pub const DEFAULT_MAX_CHARS: usize = 20_000;

/// Default number of search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Upper bound on the number of search results.
pub const MAX_SEARCH_LIMIT: usize = 25;

/// Deepest unit nesting the renderer descends into.
///
/// Units below this depth are silently dropped.
pub const MAX_UNIT_DEPTH: usize = 20;

/// Date pattern: YYYY-MM-DD.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Validate date format (YYYY-MM-DD).
///
/// Only the shape is checked. Whether a version exists on that day is for
/// the effectiveness lookup to decide, so future dates are accepted.
///
/// # Examples
/// ```
/// use slovlex_retriever::config::validate_date;
///
/// assert!(validate_date("2025-01-01").is_ok());
/// assert!(validate_date("2025-1-1").is_err());
/// assert!(validate_date("01.01.2025").is_err());
/// ```
pub fn validate_date(date_str: &str) -> Result<()> {
    if DATE_PATTERN.is_match(date_str) {
        Ok(())
    } else {
        Err(RetrieverError::InvalidDate(date_str.to_string()))
    }
}

/// Today's date in UTC, formatted as YYYY-MM-DD.
#[must_use]
pub fn today_utc() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// Runtime configuration for a [`crate::Retriever`].
///
/// Base URLs are overridable so tests can point the retriever at a mock
/// server.
#[derive(Debug, Clone)]
pub struct RetrieverConfig {
    pub api_base_url: String,
    pub static_base_url: String,
    pub portal_host_url: String,
    pub http_timeout: Duration,
    pub fallback_timeout: Duration,
    /// Explicit Chromium binary; `None` lets chromiumoxide auto-detect.
    pub chromium_path: Option<PathBuf>,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            api_base_url: API_BASE_URL.to_string(),
            static_base_url: STATIC_BASE_URL.to_string(),
            portal_host_url: PORTAL_HOST_URL.to_string(),
            http_timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            fallback_timeout: Duration::from_secs(FALLBACK_TIMEOUT_SECS),
            chromium_path: None,
        }
    }
}

impl RetrieverConfig {
    /// Build a configuration from `SLOVLEX_*` environment variables,
    /// falling back to the public Slov-Lex endpoints.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let api_base_url =
            std::env::var("SLOVLEX_API_BASE").unwrap_or(defaults.api_base_url);
        let static_base_url =
            std::env::var("SLOVLEX_STATIC_BASE").unwrap_or(defaults.static_base_url);
        let portal_host_url =
            std::env::var("SLOVLEX_PORTAL_HOST").unwrap_or(defaults.portal_host_url);

        let http_timeout = secs_from_env("SLOVLEX_HTTP_TIMEOUT_SECS")?
            .unwrap_or(defaults.http_timeout);
        let fallback_timeout = secs_from_env("SLOVLEX_FALLBACK_TIMEOUT_SECS")?
            .unwrap_or(defaults.fallback_timeout);

        let chromium_path = std::env::var("SLOVLEX_CHROMIUM_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            api_base_url: trim_base(api_base_url),
            static_base_url: trim_base(static_base_url),
            portal_host_url,
            http_timeout,
            fallback_timeout,
            chromium_path,
        })
    }

    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = trim_base(url.into());
        self
    }

    #[must_use]
    pub fn with_static_base_url(mut self, url: impl Into<String>) -> Self {
        self.static_base_url = trim_base(url.into());
        self
    }

    #[must_use]
    pub fn with_portal_host_url(mut self, url: impl Into<String>) -> Self {
        self.portal_host_url = url.into();
        self
    }

    #[must_use]
    pub fn with_fallback_timeout(mut self, timeout: Duration) -> Self {
        self.fallback_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// URL of the search endpoint family (`rozsirene`, `znenie`, `navrhy`).
    #[must_use]
    pub fn search_url(&self, endpoint: &str) -> String {
        format!(
            "{}/vyhladavanie/predpisZbierky/{endpoint}",
            self.api_base_url
        )
    }

    /// Static location of a version's portal markup.
    ///
    /// # Examples
    /// ```
    /// use slovlex_retriever::config::RetrieverConfig;
    ///
    /// let config = RetrieverConfig::default();
    /// assert_eq!(
    ///     config.portal_url("/SK/ZZ/2003/595/20250101"),
    ///     "https://static.slov-lex.sk/static/SK/ZZ/2003/595/20250101.portal"
    /// );
    /// ```
    #[must_use]
    pub fn portal_url(&self, version_iri: &str) -> String {
        format!("{}{version_iri}.portal", self.static_base_url)
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn secs_from_env(name: &str) -> Result<Option<Duration>> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|_| RetrieverError::Config(format!("{name} must be a number of seconds, got '{value}'"))),
        Err(_) => Ok(None),
    }
}
