//! Markdown codec for daily documents.
//!
//! # Responsibility
//! - Parse daily note files into `DailyDocument` values.
//! - Render documents back into canonical, diff-friendly Markdown.
//! - Own the fixed header canonicalization table.
//!
//! # Invariants
//! - Rendering is a pure function of the document value.
//! - Parsing never drops content: unknown content lands in notes or passthrough.
//! - `parse(render(d)) == d` for documents without passthrough lines.

use crate::model::document::SectionKind;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod front_matter;
mod parser;
mod renderer;

pub use parser::{is_section_heading, parse_document};
pub use renderer::{render_document, render_entry};

/// Header rendered above the free-form notes block.
pub const NOTES_HEADER: &str = "## 🧠 Quick Notes";

/// Returns the decorated header line for a section.
pub fn section_header(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Yesterday => "## ✅ Yesterday",
        SectionKind::Today => "## ▶️ Today",
        SectionKind::Blockers => "## 🚧 Blockers",
        SectionKind::Meetings => "## 🗓 Meetings",
    }
}

/// Destination of content following a recognized level-2 header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderTarget {
    Section(SectionKind),
    Notes,
}

/// Resolves level-2 header text (without `## `) to its target.
///
/// Leading/trailing decoration such as emoji or punctuation is stripped and
/// case is ignored before the lookup.
pub fn resolve_header(text: &str) -> Option<HeaderTarget> {
    let canonical = text
        .trim_matches(|c: char| !c.is_alphanumeric())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let target = match canonical.as_str() {
        "yesterday" | "done" | "did" => HeaderTarget::Section(SectionKind::Yesterday),
        "today" | "to do" | "todo" | "plan" | "plans" => HeaderTarget::Section(SectionKind::Today),
        "blockers" | "blocker" | "blocked" => HeaderTarget::Section(SectionKind::Blockers),
        "meetings" | "meeting" => HeaderTarget::Section(SectionKind::Meetings),
        "quick notes" | "notes" => HeaderTarget::Notes,
        _ => return None,
    };
    Some(target)
}

/// Parse failure for a daily document file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Leading metadata block is missing, unterminated or invalid.
    MalformedFrontMatter {
        /// 1-based line number of the offending line.
        line: usize,
        reason: String,
    },
    /// Front-matter date differs from the date the file was opened for.
    DateMismatch {
        expected: NaiveDate,
        found: NaiveDate,
    },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedFrontMatter { line, reason } => {
                write!(f, "malformed front matter at line {line}: {reason}")
            }
            Self::DateMismatch { expected, found } => write!(
                f,
                "front matter date {found} does not match file date {expected}"
            ),
        }
    }
}

impl Error for ParseError {}
