//! Daily document model.
//!
//! # Responsibility
//! - Define the in-memory shape of one day's note file.
//! - Keep recognized entries and manual passthrough lines apart.
//!
//! # Invariants
//! - All four `SectionKind` sections are always present, in storage order.
//! - `date` is the document identity; it is never changed after creation.
//! - `Notes` holds no leading blank lines and no trailing whitespace.
//! - Metadata fields written through `insert_metadata` always render to
//!   front matter that parses back to the same fields.

use super::entry::Entry;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Front-matter keys owned by the document itself.
pub const RESERVED_METADATA_KEYS: [&str; 2] = ["type", "date"];

/// Fixed section categories of a daily document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Work completed since the previous standup.
    Yesterday,
    /// Work planned for today.
    Today,
    /// Things preventing progress.
    Blockers,
    /// Meetings attended or scheduled.
    Meetings,
}

impl SectionKind {
    /// Storage (file) order.
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Yesterday,
        SectionKind::Today,
        SectionKind::Blockers,
        SectionKind::Meetings,
    ];

    /// Standup presentation order used by the cheat sheet.
    pub const CHEAT_ORDER: [SectionKind; 4] = [
        SectionKind::Yesterday,
        SectionKind::Meetings,
        SectionKind::Today,
        SectionKind::Blockers,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Yesterday => "Yesterday",
            Self::Today => "Today",
            Self::Blockers => "Blockers",
            Self::Meetings => "Meetings",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Yesterday => 0,
            Self::Today => 1,
            Self::Blockers => 2,
            Self::Meetings => 3,
        }
    }
}

/// One line inside a section, classified once at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLine {
    /// A list item recognized as an entry.
    Entry(Entry),
    /// Manual content kept verbatim.
    Passthrough(String),
}

/// Ordered content of one section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    lines: Vec<SectionLine>,
}

impl Section {
    pub fn lines(&self) -> &[SectionLine] {
        &self.lines
    }

    /// Iterates recognized entries in insertion order, skipping passthrough.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.lines.iter().filter_map(|line| match line {
            SectionLine::Entry(entry) => Some(entry),
            SectionLine::Passthrough(_) => None,
        })
    }

    pub fn entry_count(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn push_entry(&mut self, entry: Entry) {
        self.lines.push(SectionLine::Entry(entry));
    }

    pub fn push_passthrough(&mut self, line: impl Into<String>) {
        self.lines.push(SectionLine::Passthrough(line.into()));
    }
}

/// Free-form notes block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notes(String);

impl Notes {
    /// Normalizes away leading blank lines and trailing whitespace.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref();
        let mut start = 0;
        for line in raw.split_inclusive('\n') {
            if !line.trim().is_empty() {
                break;
            }
            start += line.len();
        }
        Self(raw[start..].trim_end().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends `text` as a new line at the end of the block.
    pub fn push_line(&mut self, text: &str) {
        let joined = if self.0.is_empty() {
            text.to_string()
        } else {
            format!("{}\n{text}", self.0)
        };
        *self = Self::new(joined);
    }
}

/// One front-matter line beyond `type` and `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataLine {
    /// Top-level `key: value` pair.
    Field { key: String, value: String },
    /// Comment, nested or otherwise unstructured line, kept verbatim.
    Raw(String),
}

/// Rejected `insert_metadata` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// `type` and `date` are written from the document itself.
    ReservedKey(String),
    /// Key is empty, starts with `#`, or contains `:` or a line break.
    InvalidKey(String),
    /// Value spans more than one line.
    MultiLineValue { key: String },
}

impl Display for MetadataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReservedKey(key) => write!(f, "metadata key `{key}` is reserved"),
            Self::InvalidKey(key) => write!(f, "invalid metadata key `{key}`"),
            Self::MultiLineValue { key } => {
                write!(f, "metadata value for `{key}` must be a single line")
            }
        }
    }
}

impl Error for MetadataError {}

/// Structured representation of one day's file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyDocument {
    date: NaiveDate,
    metadata: Vec<MetadataLine>,
    sections: [Section; 4],
    pub notes: Notes,
}

impl DailyDocument {
    /// Creates an empty document for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            metadata: Vec::new(),
            sections: Default::default(),
            notes: Notes::default(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Extra front-matter lines, in file order.
    pub fn metadata(&self) -> &[MetadataLine] {
        &self.metadata
    }

    /// Sets `key` to `value`, replacing the first existing field with that key
    /// or appending a new one. Both are trimmed.
    ///
    /// # Errors
    /// - `ReservedKey` for `type` and `date`.
    /// - `InvalidKey` for keys that would not read back as a field.
    /// - `MultiLineValue` when `value` contains a line break.
    pub fn insert_metadata(&mut self, key: &str, value: &str) -> Result<(), MetadataError> {
        let key = key.trim();
        let value = value.trim();
        if RESERVED_METADATA_KEYS.contains(&key) {
            return Err(MetadataError::ReservedKey(key.to_string()));
        }
        if key.is_empty() || key.starts_with('#') || key.contains([':', '\n', '\r']) {
            return Err(MetadataError::InvalidKey(key.to_string()));
        }
        if value.contains(['\n', '\r']) {
            return Err(MetadataError::MultiLineValue {
                key: key.to_string(),
            });
        }

        let field = MetadataLine::Field {
            key: key.to_string(),
            value: value.to_string(),
        };
        let existing = self
            .metadata
            .iter()
            .position(|line| matches!(line, MetadataLine::Field { key: k, .. } if k == key));
        match existing {
            Some(index) => self.metadata[index] = field,
            None => self.metadata.push(field),
        }
        Ok(())
    }

    pub(crate) fn set_metadata(&mut self, lines: Vec<MetadataLine>) {
        self.metadata = lines;
    }

    pub fn section(&self, kind: SectionKind) -> &Section {
        &self.sections[kind.index()]
    }

    pub fn section_mut(&mut self, kind: SectionKind) -> &mut Section {
        &mut self.sections[kind.index()]
    }

    /// Appends `entry` to the end of `kind`; other sections are untouched.
    pub fn append_entry(&mut self, kind: SectionKind, entry: Entry) {
        self.section_mut(kind).push_entry(entry);
    }
}
