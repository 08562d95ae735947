//! Entry domain model.
//!
//! # Responsibility
//! - Define the smallest logged unit: one line of text plus optional tags.
//! - Normalize text and tags once, at construction time.
//!
//! # Invariants
//! - `text` is a non-empty single line and never contains `TAG_MARKER`.
//! - `tags` are trimmed single-line values, non-empty, comma-free, unique and
//!   free of `TAG_MARKER`, in supplied order.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Inline delimiter separating entry text from its tag list.
pub const TAG_MARKER: &str = "#tags:";

/// Validation failure raised while constructing an `Entry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    /// Text is empty after trimming.
    EmptyText,
    /// Text or a tag contains the reserved tag marker and could not be
    /// parsed back.
    ReservedMarker(String),
    /// Note text spans more than one line.
    MultiLine,
    /// Note text would be read back as a section heading.
    HeadingLine(String),
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "invalid entry: text cannot be empty"),
            Self::ReservedMarker(text) => write!(
                f,
                "invalid entry: `{text}` contains reserved marker `{TAG_MARKER}`"
            ),
            Self::MultiLine => write!(f, "invalid note: text must be a single line"),
            Self::HeadingLine(text) => {
                write!(f, "invalid note: `{text}` would be read as a section heading")
            }
        }
    }
}

impl Error for EntryValidationError {}

/// One logged line with optional tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    text: String,
    tags: Vec<String>,
}

impl Entry {
    /// Creates an entry from free text and a list of raw tag values.
    ///
    /// Each raw tag may itself hold a comma-separated list.
    ///
    /// # Errors
    /// - `EmptyText` when `text` is blank.
    /// - `ReservedMarker` when `text` or a tag contains `#tags:`.
    pub fn new<T: AsRef<str>>(
        text: impl AsRef<str>,
        tags: &[T],
    ) -> Result<Self, EntryValidationError> {
        let text = normalize_text(text.as_ref());
        if text.is_empty() {
            return Err(EntryValidationError::EmptyText);
        }
        if text.contains(TAG_MARKER) {
            return Err(EntryValidationError::ReservedMarker(text));
        }

        let tags = normalize_tags(tags);
        if let Some(tag) = tags.iter().find(|tag| tag.contains(TAG_MARKER)) {
            return Err(EntryValidationError::ReservedMarker(tag.clone()));
        }

        Ok(Self { text, tags })
    }

    /// Creates an entry from free text and a comma-separated tag list
    /// such as `"cicd, ,infra"`.
    pub fn with_tag_list(
        text: impl AsRef<str>,
        tag_list: &str,
    ) -> Result<Self, EntryValidationError> {
        Self::new(text, &[tag_list])
    }

    /// Creates an untagged entry.
    pub fn untagged(text: impl AsRef<str>) -> Result<Self, EntryValidationError> {
        let no_tags: [&str; 0] = [];
        Self::new(text, &no_tags)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns whether any tag matches one of `wanted`, ignoring case.
    pub fn has_any_tag(&self, wanted: &[String]) -> bool {
        self.tags
            .iter()
            .any(|tag| wanted.iter().any(|w| w.to_lowercase() == tag.to_lowercase()))
    }
}

/// Splits, trims and deduplicates raw tag input, keeping first occurrences.
///
/// Line breaks inside a tag collapse to single spaces.
pub fn normalize_tags<T: AsRef<str>>(raw: &[T]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for value in raw {
        for part in value.as_ref().split(',') {
            let tag = normalize_text(part);
            if tag.is_empty() || tags.contains(&tag) {
                continue;
            }
            tags.push(tag);
        }
    }
    tags
}

fn normalize_text(raw: &str) -> String {
    raw.split(['\n', '\r'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
