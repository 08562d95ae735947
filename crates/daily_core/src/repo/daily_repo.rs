//! Daily document repository contracts and filesystem implementation.
//!
//! # Responsibility
//! - Map calendar dates to files inside one storage root.
//! - Load-or-create, append and persist daily documents.
//!
//! # Invariants
//! - This is the only code that reads or writes the storage root.
//! - Loading an absent date never creates a file.
//! - Saves go through a temp file plus atomic rename; the target is either
//!   the old bytes or the new bytes, never a mix.
//! - Existing files that fail to parse are surfaced, never overwritten.

use crate::markdown::{is_section_heading, parse_document, render_document, ParseError};
use crate::model::document::{DailyDocument, SectionKind};
use crate::model::entry::{Entry, EntryValidationError};
use chrono::NaiveDate;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Suffix appended to the ISO date to form a document file name.
pub const DAILY_FILE_SUFFIX: &str = "-daily.md";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for daily document persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    /// Caller supplied an invalid entry.
    InvalidEntry(EntryValidationError),
    /// Existing file content could not be parsed.
    Parse { path: PathBuf, source: ParseError },
    /// Filesystem read/write failure.
    Io { path: PathBuf, source: io::Error },
    /// A read-only query targeted a date with no file.
    NotFound { date: NaiveDate, path: PathBuf },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEntry(err) => write!(f, "{err}"),
            Self::Parse { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::NotFound { date, path } => {
                write!(f, "no daily file exists for {date} ({})", path.display())
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEntry(err) => Some(err),
            Self::Parse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::InvalidEntry(value)
    }
}

/// Repository interface for per-date documents.
pub trait DailyRepository {
    /// Maps a date to its file path. Pure; never fails.
    fn resolve_path(&self, date: NaiveDate) -> PathBuf;
    /// Loads the document for `date`, or `None` when no file exists.
    fn load_existing(&self, date: NaiveDate) -> RepoResult<Option<DailyDocument>>;
    /// Writes the canonical rendering of `document` atomically.
    fn save(&self, document: &DailyDocument) -> RepoResult<PathBuf>;
    /// Lists dates that have a document file, ascending.
    fn list_dates(&self) -> RepoResult<Vec<NaiveDate>>;

    /// Loads the document for `date`, or an empty in-memory one when absent.
    fn load(&self, date: NaiveDate) -> RepoResult<DailyDocument> {
        Ok(self
            .load_existing(date)?
            .unwrap_or_else(|| DailyDocument::new(date)))
    }

    /// Appends `entry` to `kind` of the document for `date` and persists it.
    ///
    /// Repeated calls append repeatedly; there is no deduplication.
    fn append_entry(
        &self,
        date: NaiveDate,
        kind: SectionKind,
        entry: Entry,
    ) -> RepoResult<DailyDocument> {
        let mut document = self.load(date)?;
        document.append_entry(kind, entry);
        self.save(&document)?;
        info!(
            "event=entry_append module=repo status=ok date={} section={} count={}",
            date,
            kind.name(),
            document.section(kind).entry_count()
        );
        Ok(document)
    }

    /// Appends one line to the notes block of `date` and persists it.
    ///
    /// # Errors
    /// - `InvalidEntry` for blank or multi-line text, or text that would be
    ///   read back as a section heading.
    fn append_note(&self, date: NaiveDate, text: &str) -> RepoResult<DailyDocument> {
        let line = validate_note_line(text)?;
        let mut document = self.load(date)?;
        document.notes.push_line(line);
        self.save(&document)?;
        info!("event=note_append module=repo status=ok date={date}");
        Ok(document)
    }
}

fn validate_note_line(text: &str) -> Result<&str, EntryValidationError> {
    let line = text.trim();
    if line.is_empty() {
        return Err(EntryValidationError::EmptyText);
    }
    if line.contains(['\n', '\r']) {
        return Err(EntryValidationError::MultiLine);
    }
    if is_section_heading(line) {
        return Err(EntryValidationError::HeadingLine(line.to_string()));
    }
    Ok(line)
}

/// Filesystem-backed repository rooted at one directory.
#[derive(Debug, Clone)]
pub struct FsDailyRepository {
    root: PathBuf,
}

impl FsDailyRepository {
    /// Creates a repository over `root`. The directory is created lazily on
    /// first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DailyRepository for FsDailyRepository {
    fn resolve_path(&self, date: NaiveDate) -> PathBuf {
        self.root.join(daily_file_name(date))
    }

    fn load_existing(&self, date: NaiveDate) -> RepoResult<Option<DailyDocument>> {
        let path = self.resolve_path(date);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("event=document_load module=repo status=absent date={date}");
                return Ok(None);
            }
            Err(err) => {
                error!(
                    "event=document_load module=repo status=error date={} error_code=read_failed error={}",
                    date, err
                );
                return Err(RepoError::Io { path, source: err });
            }
        };

        match parse_document(&text, Some(date)) {
            Ok(document) => {
                info!("event=document_load module=repo status=ok date={date}");
                Ok(Some(document))
            }
            Err(err) => {
                error!(
                    "event=document_load module=repo status=error date={} error_code=parse_failed error={}",
                    date, err
                );
                Err(RepoError::Parse { path, source: err })
            }
        }
    }

    fn save(&self, document: &DailyDocument) -> RepoResult<PathBuf> {
        let started_at = Instant::now();
        let path = self.resolve_path(document.date());
        let rendered = render_document(document);

        if let Err(err) = write_atomically(&path, |file| file.write_all(rendered.as_bytes())) {
            error!(
                "event=document_save module=repo status=error date={} duration_ms={} error_code=write_failed error={}",
                document.date(),
                started_at.elapsed().as_millis(),
                err
            );
            return Err(RepoError::Io { path, source: err });
        }

        info!(
            "event=document_save module=repo status=ok date={} bytes={} duration_ms={}",
            document.date(),
            rendered.len(),
            started_at.elapsed().as_millis()
        );
        Ok(path)
    }

    fn list_dates(&self) -> RepoResult<Vec<NaiveDate>> {
        let reader = match fs::read_dir(&self.root) {
            Ok(reader) => reader,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(RepoError::Io {
                    path: self.root.clone(),
                    source: err,
                })
            }
        };

        let mut dates = Vec::new();
        for item in reader {
            let item = item.map_err(|err| RepoError::Io {
                path: self.root.clone(),
                source: err,
            })?;
            let name = item.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            match date_from_file_name(name) {
                Some(date) => dates.push(date),
                None if name.ends_with(DAILY_FILE_SUFFIX) => {
                    warn!("event=document_list module=repo status=skipped reason=bad_file_name");
                }
                None => {}
            }
        }
        dates.sort();
        Ok(dates)
    }
}

/// File name for the document of `date`, e.g. `2026-01-26-daily.md`.
pub fn daily_file_name(date: NaiveDate) -> String {
    format!("{}{DAILY_FILE_SUFFIX}", date.format("%Y-%m-%d"))
}

/// Inverse of `daily_file_name`; `None` for any other file name.
pub fn date_from_file_name(name: &str) -> Option<NaiveDate> {
    let stem = name.strip_suffix(DAILY_FILE_SUFFIX)?;
    let date = NaiveDate::parse_from_str(stem, "%Y-%m-%d").ok()?;
    (daily_file_name(date) == name).then_some(date)
}

/// Writes `target` through a sibling temp file and an atomic rename.
///
/// `fill` writes the new content. On any failure the temp file is removed
/// when it drops and `target` keeps its previous bytes.
fn write_atomically<F>(target: &Path, fill: F) -> io::Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = tempfile::Builder::new()
        .prefix(".daily-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    fill(temp.as_file_mut())?;
    temp.as_file_mut().flush()?;
    temp.as_file().sync_all()?;
    temp.persist(target).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{date_from_file_name, daily_file_name, write_atomically};
    use chrono::NaiveDate;
    use std::fs;
    use std::io::{self, Write};

    #[test]
    fn file_names_round_trip_through_dates() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 26).unwrap();
        assert_eq!(daily_file_name(date), "2026-01-26-daily.md");
        assert_eq!(date_from_file_name("2026-01-26-daily.md"), Some(date));
        assert_eq!(date_from_file_name("2026-1-26-daily.md"), None);
        assert_eq!(date_from_file_name("2026-01-26.md"), None);
        assert_eq!(date_from_file_name("notes.md"), None);
    }

    #[test]
    fn failed_write_keeps_target_and_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("2026-01-26-daily.md");
        fs::write(&target, "original content\n").unwrap();

        let result = write_atomically(&target, |file| {
            file.write_all(b"partial new con")?;
            Err(io::Error::new(io::ErrorKind::Other, "No space left on device"))
        });

        let err = result.expect_err("simulated disk full must fail");
        assert!(err.to_string().contains("No space left"));
        assert_eq!(fs::read(&target).unwrap(), b"original content\n");
        let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn successful_write_replaces_target_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("deeper").join("file.md");

        write_atomically(&target, |file| file.write_all(b"fresh")).unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"fresh");
        let entries: Vec<_> = fs::read_dir(target.parent().unwrap()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
