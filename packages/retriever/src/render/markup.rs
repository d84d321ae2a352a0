//! Typed view of Slov-Lex portal markup.
//!
//! The portal HTML nests `div.paragraf` sections containing `div.odsek`
//! (subparagraph), `div.pismeno` (letter) and `div.bod` (point) units:
//!
//! ```text
//! div.paragraf#paragraf-3
//!   div.paragrafOznacenie   "§ 3"
//!   div.paragrafNadpis      heading
//!   div.odsek#paragraf-3.odsek-1
//!     div.odsekOznacenie    "(1)"
//!     div.text              main text
//!     div.pismeno ...       nested units
//!     div.pokracovanie      trailing text or table
//! ```
//!
//! The markup is external input, so unit nesting is only followed down to
//! [`MAX_UNIT_DEPTH`].

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::config::MAX_UNIT_DEPTH;
use crate::render::text::normalize_whitespace;

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static PARAGRAPH_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.paragraf").expect("valid selector"));

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static TABLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("valid selector"));

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("valid selector"));

/// Class of the trailing continuation region of a unit.
const CONTINUATION_CLASS: &str = "pokracovanie";

/// Class of a unit's primary text region.
const TEXT_CLASS: &str = "text";

/// Kind of a nested unit below a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// Numbered subparagraph (odsek), labelled "(1)".
    Subparagraph,
    /// Lettered item (písmeno), labelled "a)".
    Letter,
    /// Numbered point (bod), labelled "1.".
    Point,
}

impl UnitKind {
    /// CSS class of the unit element.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Subparagraph => "odsek",
            Self::Letter => "pismeno",
            Self::Point => "bod",
        }
    }

    /// CSS class of the unit's label element.
    #[must_use]
    pub fn label_class(self) -> &'static str {
        match self {
            Self::Subparagraph => "odsekOznacenie",
            Self::Letter => "pismenoOznacenie",
            Self::Point => "bodOznacenie",
        }
    }

    fn from_element(el: ElementRef<'_>) -> Option<Self> {
        [Self::Subparagraph, Self::Letter, Self::Point]
            .into_iter()
            .find(|kind| has_class(el, kind.class()))
    }
}

/// Table rows as sourced; rows may differ in length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

/// Material following a unit's children that still belongs to the unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    Text(String),
    Table(Table),
}

/// A subparagraph, letter or point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub kind: UnitKind,
    /// The element's `id` attribute.
    pub id: Option<String>,
    /// Label printed on the page, e.g. "(2)" or "b)".
    pub label: Option<String>,
    /// Whitespace-normalized primary text.
    pub text: String,
    pub children: Vec<Unit>,
    pub continuation: Option<Continuation>,
}

impl Unit {
    /// A bare unit with no label, id, children or continuation.
    #[must_use]
    pub fn new(kind: UnitKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            id: None,
            label: None,
            text: text.into(),
            children: Vec::new(),
            continuation: None,
        }
    }
}

/// A top-level section (paragraf).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paragraph {
    /// The element's `id` attribute, e.g. "paragraf-3".
    pub id: Option<String>,
    /// Label such as "§ 3".
    pub label: String,
    pub heading: String,
    pub units: Vec<Unit>,
}

/// All paragraphs of one version, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LawDocument {
    pub paragraphs: Vec<Paragraph>,
}

impl LawDocument {
    /// Build the typed tree from portal HTML.
    ///
    /// Parsing never fails; markup without recognizable paragraphs yields an
    /// empty document.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let paragraphs = document
            .select(&PARAGRAPH_SELECTOR)
            .map(parse_paragraph)
            .collect();
        Self { paragraphs }
    }
}

fn parse_paragraph(el: ElementRef<'_>) -> Paragraph {
    Paragraph {
        id: el.value().id().map(str::to_string),
        label: child_text(el, "paragrafOznacenie").unwrap_or_default(),
        heading: child_text(el, "paragrafNadpis").unwrap_or_default(),
        units: child_units(el, 0),
    }
}

fn parse_unit(el: ElementRef<'_>, kind: UnitKind, depth: usize) -> Unit {
    let children = if depth < MAX_UNIT_DEPTH {
        child_units(el, depth + 1)
    } else {
        Vec::new()
    };

    Unit {
        kind,
        id: el.value().id().map(str::to_string),
        label: child_text(el, kind.label_class()).filter(|l| !l.is_empty()),
        text: child_text(el, TEXT_CLASS).unwrap_or_default(),
        children,
        continuation: parse_continuation(el),
    }
}

fn child_units(el: ElementRef<'_>, depth: usize) -> Vec<Unit> {
    element_children(el)
        .filter_map(|child| UnitKind::from_element(child).map(|kind| (child, kind)))
        .map(|(child, kind)| parse_unit(child, kind, depth))
        .collect()
}

fn parse_continuation(el: ElementRef<'_>) -> Option<Continuation> {
    let region = element_children(el).find(|child| {
        has_class(*child, CONTINUATION_CLASS) || child.value().name() == "table"
    })?;

    let table = if region.value().name() == "table" {
        Some(region)
    } else {
        region.select(&TABLE_SELECTOR).next()
    };

    if let Some(table) = table {
        return Some(Continuation::Table(parse_table(table)));
    }

    let text = normalize_whitespace(&region.text().collect::<String>());
    if text.is_empty() {
        None
    } else {
        Some(Continuation::Text(text))
    }
}

fn parse_table(table: ElementRef<'_>) -> Table {
    let rows = table
        .select(&ROW_SELECTOR)
        .map(|row| {
            element_children(row)
                .filter(|cell| matches!(cell.value().name(), "td" | "th"))
                .map(|cell| normalize_whitespace(&cell.text().collect::<String>()))
                .collect::<Vec<_>>()
        })
        .filter(|cells| !cells.is_empty())
        .collect();
    Table { rows }
}

/// Normalized text of the first direct child carrying `class`.
fn child_text(el: ElementRef<'_>, class: &str) -> Option<String> {
    element_children(el)
        .find(|child| has_class(*child, class))
        .map(|child| normalize_whitespace(&child.text().collect::<String>()))
}

fn element_children<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}
