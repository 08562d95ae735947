//! Daily standup use-case service.
//!
//! # Responsibility
//! - Turn raw command input (text, tag lists) into validated entries.
//! - Provide cheat-sheet queries over one or more recent documents.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Read-only queries never create documents.

use crate::cheat::sheet::{build_cheat_sheet, CheatSheet, TagFilter};
use crate::model::document::{DailyDocument, SectionKind};
use crate::model::entry::Entry;
use crate::repo::daily_repo::{DailyRepository, RepoError, RepoResult};
use chrono::{Days, NaiveDate};
use log::info;

/// Use-case service wrapper over a daily repository.
pub struct DailyService<R: DailyRepository> {
    repo: R,
}

impl<R: DailyRepository> DailyService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Validates `text` and `tags` and appends the entry to `kind` for `date`.
    ///
    /// # Errors
    /// - `RepoError::InvalidEntry` for blank text.
    /// - Parse and I/O errors from the repository, unchanged.
    pub fn log_entry<T: AsRef<str>>(
        &self,
        date: NaiveDate,
        kind: SectionKind,
        text: &str,
        tags: &[T],
    ) -> RepoResult<DailyDocument> {
        let entry = Entry::new(text, tags)?;
        self.repo.append_entry(date, kind, entry)
    }

    /// Appends a free-form line to the notes block for `date`.
    pub fn add_note(&self, date: NaiveDate, text: &str) -> RepoResult<DailyDocument> {
        self.repo.append_note(date, text)
    }

    /// Builds the cheat sheet for an existing document.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when `date` has no file.
    pub fn cheat_sheet(&self, date: NaiveDate, filter: &TagFilter) -> RepoResult<CheatSheet> {
        let document = self
            .repo
            .load_existing(date)?
            .ok_or_else(|| RepoError::NotFound {
                date,
                path: self.repo.resolve_path(date),
            })?;
        let sheet = build_cheat_sheet(&document, filter);
        info!(
            "event=cheat_build module=service status=ok date={} groups={} filtered={}",
            date,
            sheet.groups.len(),
            !filter.is_empty()
        );
        Ok(sheet)
    }

    /// Builds cheat sheets for the `days` dates ending at `end`, oldest
    /// first, skipping dates without a file.
    ///
    /// Only dates listed by the repository are loaded, so a wide window
    /// costs no more than the files it covers.
    ///
    /// # Errors
    /// - `RepoError::NotFound` (for `end`) when none of the dates has a file.
    pub fn recent_cheat_sheets(
        &self,
        end: NaiveDate,
        days: u32,
        filter: &TagFilter,
    ) -> RepoResult<Vec<CheatSheet>> {
        let span = u64::from(days.max(1) - 1);
        let start = end.checked_sub_days(Days::new(span)).unwrap_or(NaiveDate::MIN);

        let mut sheets = Vec::new();
        for date in self.repo.list_dates()? {
            if date < start || date > end {
                continue;
            }
            if let Some(document) = self.repo.load_existing(date)? {
                sheets.push(build_cheat_sheet(&document, filter));
            }
        }

        if sheets.is_empty() {
            return Err(RepoError::NotFound {
                date: end,
                path: self.repo.resolve_path(end),
            });
        }
        info!(
            "event=cheat_build module=service status=ok end={} days={} documents={}",
            end,
            days,
            sheets.len()
        );
        Ok(sheets)
    }
}
