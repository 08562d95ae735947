//! Standup cheat-sheet aggregation.
//!
//! # Responsibility
//! - Select entries by tag and group them in standup order.
//! - Render the grouped view as plain text (no Markdown, no tags).
//!
//! # Invariants
//! - Aggregation is pure: no I/O and no mutation of the input document.
//! - Groups follow `SectionKind::CHEAT_ORDER`; empty groups are omitted.
//! - Entries keep their insertion order inside a group.

use crate::model::document::{DailyDocument, SectionKind};
use crate::model::entry::{normalize_tags, Entry};
use chrono::NaiveDate;
use serde::Serialize;

/// Placeholder printed when no entry survives filtering.
pub const NO_ENTRIES: &str = "(no entries)";

/// Tag filter; an empty filter matches every entry.
///
/// Matching is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    tags: Vec<String>,
}

impl TagFilter {
    pub fn new<T: AsRef<str>>(tags: &[T]) -> Self {
        let tags = normalize_tags(tags)
            .into_iter()
            .map(|tag| tag.to_lowercase())
            .collect();
        Self { tags }
    }

    /// Builds a filter from a comma-separated list such as `"aws,infra"`.
    pub fn from_list(list: &str) -> Self {
        Self::new(&[list])
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        self.is_empty() || entry.has_any_tag(&self.tags)
    }
}

/// Entries of one section that passed the filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheatGroup {
    pub section: SectionKind,
    pub entries: Vec<Entry>,
}

/// Grouped, presentation-ordered summary of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheatSheet {
    pub date: NaiveDate,
    pub groups: Vec<CheatGroup>,
}

impl CheatSheet {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Builds the cheat sheet for `document` restricted by `filter`.
pub fn build_cheat_sheet(document: &DailyDocument, filter: &TagFilter) -> CheatSheet {
    let groups = SectionKind::CHEAT_ORDER
        .iter()
        .filter_map(|&section| {
            let entries: Vec<Entry> = document
                .section(section)
                .entries()
                .filter(|entry| filter.matches(entry))
                .cloned()
                .collect();
            (!entries.is_empty()).then_some(CheatGroup { section, entries })
        })
        .collect();

    CheatSheet {
        date: document.date(),
        groups,
    }
}

/// Plain-text group title, e.g. `MEETINGS`.
pub fn cheat_title(section: SectionKind) -> String {
    section.name().to_uppercase()
}

/// Renders `sheet` as plain text with one blank line between groups.
pub fn render_cheat_sheet(sheet: &CheatSheet) -> String {
    if sheet.is_empty() {
        return NO_ENTRIES.to_string();
    }

    sheet
        .groups
        .iter()
        .map(|group| {
            let mut block = cheat_title(group.section);
            for entry in &group.entries {
                block.push_str("\n- ");
                block.push_str(entry.text());
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::TagFilter;
    use crate::model::entry::Entry;

    #[test]
    fn filter_is_case_insensitive_and_ignores_blank_tags() {
        let filter = TagFilter::from_list(" AWS, ,");
        assert!(filter.matches(&Entry::with_tag_list("Deploy", "aws").unwrap()));
        assert!(!filter.matches(&Entry::untagged("Lunch").unwrap()));
        assert!(TagFilter::from_list(" , ").is_empty());
    }
}
