//! Line-oriented parser for daily documents.

use super::front_matter::read_front_matter;
use super::{resolve_header, HeaderTarget, ParseError};
use crate::model::document::{DailyDocument, Notes, SectionKind};
use crate::model::entry::{Entry, TAG_MARKER};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static SECTION_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^##\s+(.*)$").expect("valid section header regex"));
static LIST_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*]\s+(.*)$").expect("valid list item regex"));

#[derive(Clone, Copy)]
enum Cursor {
    Section(SectionKind),
    Notes,
}

/// Parses file `text` into a document.
///
/// When `expected` is set, the front-matter date must equal it.
///
/// # Errors
/// - `MalformedFrontMatter` for a missing or invalid metadata block.
/// - `DateMismatch` when the front-matter date differs from `expected`.
pub fn parse_document(
    text: &str,
    expected: Option<NaiveDate>,
) -> Result<DailyDocument, ParseError> {
    let lines: Vec<&str> = text.lines().collect();
    let front = read_front_matter(&lines)?;
    if let Some(expected) = expected {
        if expected != front.date {
            return Err(ParseError::DateMismatch {
                expected,
                found: front.date,
            });
        }
    }

    let mut document = DailyDocument::new(front.date);
    document.set_metadata(front.metadata);

    // Preamble is the first notes fragment.
    let mut cursor = Cursor::Notes;
    let mut fragments: Vec<Vec<&str>> = vec![Vec::new()];

    for line in &lines[front.body_start..] {
        if let Some(caps) = SECTION_HEADER_RE.captures(line) {
            let title = caps.get(1).map_or("", |m| m.as_str());
            match resolve_header(title) {
                Some(HeaderTarget::Section(kind)) => cursor = Cursor::Section(kind),
                Some(HeaderTarget::Notes) => {
                    cursor = Cursor::Notes;
                    fragments.push(Vec::new());
                }
                None => {
                    cursor = Cursor::Notes;
                    fragments.push(vec![*line]);
                }
            }
            continue;
        }

        match cursor {
            Cursor::Notes => {
                if let Some(fragment) = fragments.last_mut() {
                    fragment.push(*line);
                }
            }
            Cursor::Section(kind) => {
                if line.trim().is_empty() {
                    continue;
                }
                let section = document.section_mut(kind);
                match parse_list_item(line) {
                    Some(entry) => section.push_entry(entry),
                    None => section.push_passthrough(*line),
                }
            }
        }
    }

    let notes = fragments
        .iter()
        .map(|fragment| Notes::new(fragment.join("\n")))
        .filter(|notes| !notes.is_empty())
        .map(|notes| notes.as_str().to_string())
        .collect::<Vec<_>>()
        .join("\n\n");
    document.notes = Notes::new(notes);

    Ok(document)
}

/// Returns whether `line` starts a new level-2 section when read back.
pub fn is_section_heading(line: &str) -> bool {
    SECTION_HEADER_RE.is_match(line)
}

/// Parses a top-level list item into an entry.
///
/// Returns `None` when the line is not a list item or does not hold a valid
/// entry; callers keep such lines as passthrough.
fn parse_list_item(line: &str) -> Option<Entry> {
    let body = LIST_ITEM_RE.captures(line)?.get(1)?.as_str();
    let (text, tags) = match body.rfind(TAG_MARKER) {
        Some(at) => (&body[..at], &body[at + TAG_MARKER.len()..]),
        None => (body, ""),
    };
    Entry::with_tag_list(text, tags).ok()
}
