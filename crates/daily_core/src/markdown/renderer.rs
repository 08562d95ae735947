//! Canonical Markdown rendering for daily documents.

use super::front_matter::{DATE_FORMAT, DOCUMENT_TYPE, FENCE};
use super::{section_header, NOTES_HEADER};
use crate::model::document::{DailyDocument, MetadataLine, SectionKind, SectionLine};
use crate::model::entry::{Entry, TAG_MARKER};

/// Renders a document into canonical Markdown.
///
/// Output depends only on the document value. Empty sections still render
/// their header, and the text always ends with a single newline.
pub fn render_document(document: &DailyDocument) -> String {
    let mut out = String::new();

    out.push_str(FENCE);
    out.push('\n');
    out.push_str(&format!("type: {DOCUMENT_TYPE}\n"));
    out.push_str(&format!("date: {}\n", document.date().format(DATE_FORMAT)));
    for line in document.metadata() {
        match line {
            MetadataLine::Field { key, value } if value.is_empty() => {
                out.push_str(&format!("{key}:\n"))
            }
            MetadataLine::Field { key, value } => out.push_str(&format!("{key}: {value}\n")),
            MetadataLine::Raw(raw) => {
                out.push_str(raw);
                out.push('\n');
            }
        }
    }
    out.push_str(FENCE);
    out.push_str("\n\n");

    for kind in SectionKind::ALL {
        let section = document.section(kind);
        out.push_str(section_header(kind));
        out.push_str("\n\n");
        for line in section.lines() {
            match line {
                SectionLine::Entry(entry) => out.push_str(&render_entry(entry)),
                SectionLine::Passthrough(raw) => out.push_str(raw),
            }
            out.push('\n');
        }
        if !section.is_empty() {
            out.push('\n');
        }
    }

    out.push_str(NOTES_HEADER);
    out.push('\n');
    if !document.notes.is_empty() {
        out.push('\n');
        out.push_str(document.notes.as_str());
        out.push('\n');
    }

    out
}

/// Renders one entry as a list item, e.g. `- Deploy #tags: cicd,aws`.
pub fn render_entry(entry: &Entry) -> String {
    if entry.tags().is_empty() {
        format!("- {}", entry.text())
    } else {
        format!("- {} {TAG_MARKER} {}", entry.text(), entry.tags().join(","))
    }
}
