//! Section lookup and whole-document rendering.

use serde::Serialize;

use crate::render::markup::{LawDocument, Paragraph};
use crate::render::paragraph::render_paragraph;
use crate::render::text::truncate_chars;

/// Whole-document text, possibly cut at a character cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub text: String,
    pub truncated: bool,
}

/// Normalize a requested section identifier.
///
/// Strips a leading `§`, removes all whitespace and lowercases, so
/// `"§ 15a"`, `"15A"` and `" 15 a"` all become `"15a"`.
#[must_use]
pub fn normalize_section_id(section: &str) -> String {
    let trimmed = section.trim();
    let trimmed = trimmed.strip_prefix('§').unwrap_or(trimmed);
    trimmed
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

impl LawDocument {
    /// Find a paragraph by section identifier (e.g., "§ 3" or "52zzc").
    ///
    /// # Returns
    /// `None` when the version has no such section.
    #[must_use]
    pub fn find_paragraph(&self, section: &str) -> Option<&Paragraph> {
        let normalized = normalize_section_id(section);
        if normalized.is_empty() {
            return None;
        }
        let wanted = format!("paragraf-{normalized}");
        self.paragraphs.iter().find(|p| {
            p.id
                .as_deref()
                .is_some_and(|id| id.to_lowercase() == wanted)
        })
    }
}

/// Render one section, or `None` if the version has no such section.
#[must_use]
pub fn render_section(document: &LawDocument, section: &str) -> Option<String> {
    document.find_paragraph(section).map(render_paragraph)
}

/// Render every paragraph in document order, separated by blank lines.
///
/// Text longer than `max_chars` characters is cut at exactly that offset and
/// followed by a notice naming the cap.
#[must_use]
pub fn render_document(document: &LawDocument, max_chars: usize) -> RenderedDocument {
    let full = document
        .paragraphs
        .iter()
        .map(render_paragraph)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    truncate_document(&full, max_chars)
}

/// Apply the character cap to already rendered text.
#[must_use]
pub fn truncate_document(full: &str, max_chars: usize) -> RenderedDocument {
    match truncate_chars(full, max_chars) {
        (head, true) => RenderedDocument {
            text: format!("{head}{}", truncation_notice(max_chars)),
            truncated: true,
        },
        (_, false) => RenderedDocument {
            text: full.to_string(),
            truncated: false,
        },
    }
}

/// Notice appended after truncated text.
#[must_use]
pub fn truncation_notice(max_chars: usize) -> String {
    format!("\n\n…(truncated to {max_chars} chars)…")
}
