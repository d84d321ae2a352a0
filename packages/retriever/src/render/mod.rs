//! Rendering of portal markup into indented plain text.
//!
//! Everything here is pure: markup is parsed into a [`LawDocument`] once and
//! rendered without I/O. Malformed input degrades instead of failing
//! (placeholder labels, silent cut-off below [`crate::config::MAX_UNIT_DEPTH`]).

mod document;
mod label;
mod markup;
mod paragraph;
mod table;
mod text;

pub use document::{
    normalize_section_id, render_document, render_section, truncate_document,
    truncation_notice, RenderedDocument,
};
pub use label::{
    explicit_label, label_from_id, placeholder_label, resolve_label, LabelSource, LABEL_CHAIN,
};
pub use markup::{Continuation, LawDocument, Paragraph, Table, Unit, UnitKind};
pub use paragraph::{render_paragraph, render_unit};
pub use table::{column_widths, render_table};
pub use text::{normalize_whitespace, truncate_chars};
