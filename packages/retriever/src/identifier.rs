//! Parsing of free-form law references into canonical identifiers.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::error::{Result, RetrieverError};

/// Canonical path form: `/SK/ZZ/<year>/<number>`, leading slash optional.
/// The number must not run on into further digits.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static IRI_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/?SK/ZZ/(\d{4})/(\d{1,6})(?:\D|$)").expect("valid regex"));

/// Citation form: `<number>/<year>` with optional whitespace around the slash,
/// not embedded in a longer run of digits.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\D)(\d{1,6})\s*/\s*(\d{4})(?:\D|$)").expect("valid regex"));

/// Version-independent identifier of a law.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LawIdentifier {
    /// Number within the year's collection (e.g., "595").
    pub number: String,

    /// Year of promulgation (e.g., "2003").
    pub year: String,

    /// Stable key for the law across versions (e.g., "/SK/ZZ/2003/595").
    pub base_iri: String,
}

impl LawIdentifier {
    fn new(number: &str, year: &str) -> Self {
        Self {
            number: number.to_string(),
            year: year.to_string(),
            base_iri: format!("/SK/ZZ/{year}/{number}"),
        }
    }

    /// Citation string used by the metadata lookup (e.g., "595/2003").
    #[must_use]
    pub fn citation(&self) -> String {
        format!("{}/{}", self.number, self.year)
    }
}

/// Parse a law reference.
///
/// The canonical path form is tried first, then the `number/year` form.
///
/// # Examples
/// ```
/// use slovlex_retriever::identifier::parse_law_reference;
///
/// let a = parse_law_reference("595/2003").unwrap();
/// let b = parse_law_reference("/SK/ZZ/2003/595").unwrap();
/// assert_eq!(a.base_iri, b.base_iri);
/// assert!(parse_law_reference("zákon o dani").is_err());
/// ```
pub fn parse_law_reference(input: &str) -> Result<LawIdentifier> {
    let trimmed = input.trim();

    if let Some(caps) = IRI_PATTERN.captures(trimmed) {
        return Ok(LawIdentifier::new(&caps[2], &caps[1]));
    }

    if let Some(caps) = NUMBER_PATTERN.captures(trimmed) {
        return Ok(LawIdentifier::new(&caps[1], &caps[2]));
    }

    Err(RetrieverError::InvalidLawReference(input.to_string()))
}
