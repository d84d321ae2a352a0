//! Rendering of paragraphs and their nested units into indented lines.

use crate::config::MAX_UNIT_DEPTH;
use crate::render::label::resolve_label;
use crate::render::markup::{Continuation, Paragraph, Unit};
use crate::render::table::render_table;

/// Render a paragraph as text.
///
/// The header is the label plus the heading (`§ 3 - Heading`); the body is
/// its units in document order, separated from the header by a blank line.
#[must_use]
pub fn render_paragraph(paragraph: &Paragraph) -> String {
    let header = paragraph_header(paragraph);
    let body = paragraph
        .units
        .iter()
        .flat_map(|unit| render_unit(unit, 0, 0))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    match (header.is_empty(), body.is_empty()) {
        (false, false) => format!("{header}\n\n{body}"),
        (false, true) => header,
        (true, _) => body,
    }
}

fn paragraph_header(paragraph: &Paragraph) -> String {
    let label = paragraph.label.trim();
    let heading = paragraph.heading.trim();
    match (label.is_empty(), heading.is_empty()) {
        (_, true) => label.to_string(),
        (true, false) => format!("- {heading}"),
        (false, false) => format!("{label} - {heading}"),
    }
}

/// Render a unit and its descendants as lines.
///
/// # Arguments
/// * `unit` - Unit to render
/// * `indent` - Leading spaces for this unit's own lines
/// * `depth` - Nesting depth; nothing is rendered below [`MAX_UNIT_DEPTH`]
///
/// # Returns
/// The unit's line, its children's lines, then its continuation lines.
#[must_use]
pub fn render_unit(unit: &Unit, indent: usize, depth: usize) -> Vec<String> {
    if depth > MAX_UNIT_DEPTH {
        return Vec::new();
    }

    let pad = " ".repeat(indent);
    let label = resolve_label(unit);
    let mut lines = Vec::new();

    let head: Vec<&str> = [label.as_str(), unit.text.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
    if !head.is_empty() {
        lines.push(format!("{pad}{}", head.join(" ")).trim_end().to_string());
    }

    for child in &unit.children {
        lines.extend(render_unit(child, indent + 2, depth + 1));
    }

    match &unit.continuation {
        Some(Continuation::Table(table)) => lines.extend(render_table(table, indent)),
        Some(Continuation::Text(text)) if !text.is_empty() => lines.push(format!("{pad}{text}")),
        _ => {}
    }

    lines
}
