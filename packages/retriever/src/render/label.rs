//! Label derivation for units.
//!
//! Labels come from an ordered chain of sources; the first one that yields
//! a value wins:
//!
//! 1. [`explicit_label`]: the label printed on the page;
//! 2. [`label_from_id`]: the number in the unit's `id` attribute;
//! 3. [`placeholder_label`]: a fixed marker, so a label always exists.

use regex::Regex;
use std::sync::LazyLock;

use crate::render::markup::{Unit, UnitKind};
use crate::render::text::normalize_whitespace;

/// One step of the label chain.
pub type LabelSource = fn(&Unit) -> Option<String>;

/// Label sources in priority order.
pub const LABEL_CHAIN: [LabelSource; 3] = [explicit_label, label_from_id, placeholder_label];

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUBPARAGRAPH_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\.)odsek-(\d+)$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LETTER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\.)pismeno-(\d+)$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static POINT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\.)bod-(\d+)$").expect("valid regex"));

/// Resolve the label of a unit. Never empty.
#[must_use]
pub fn resolve_label(unit: &Unit) -> String {
    LABEL_CHAIN
        .iter()
        .find_map(|source| source(unit))
        .unwrap_or_else(|| "?".to_string())
}

/// Label text printed on the page, if any.
#[must_use]
pub fn explicit_label(unit: &Unit) -> Option<String> {
    unit.label
        .as_deref()
        .map(normalize_whitespace)
        .filter(|label| !label.is_empty())
}

/// Number parsed from the last segment of the `id` attribute, e.g.
/// `paragraf-3.odsek-2` gives "(2)" for a subparagraph. Ancestor segments
/// are ignored, so `odsek-1.bod-2.bod-1` gives "1".
#[must_use]
pub fn label_from_id(unit: &Unit) -> Option<String> {
    let id = unit.id.as_deref()?;
    let pattern = match unit.kind {
        UnitKind::Subparagraph => &SUBPARAGRAPH_ID,
        UnitKind::Letter => &LETTER_ID,
        UnitKind::Point => &POINT_ID,
    };
    let number = pattern.captures(id)?.get(1)?.as_str();

    Some(match unit.kind {
        UnitKind::Subparagraph => format!("({number})"),
        UnitKind::Letter | UnitKind::Point => number.to_string(),
    })
}

/// Marker used when nothing better is known.
#[must_use]
pub fn placeholder_label(unit: &Unit) -> Option<String> {
    let placeholder = match unit.kind {
        UnitKind::Subparagraph => "(?)",
        UnitKind::Letter | UnitKind::Point => "?",
    };
    Some(placeholder.to_string())
}
