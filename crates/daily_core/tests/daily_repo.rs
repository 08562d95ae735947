use chrono::NaiveDate;
use daily_core::{
    render_document, DailyDocument, DailyRepository, Entry, FsDailyRepository, Notes, ParseError,
    EntryValidationError, RepoError, SectionKind,
};
use std::fs;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 26).unwrap()
}

#[test]
fn resolve_path_uses_root_and_iso_date() {
    let repo = FsDailyRepository::new("/var/dailies");
    let path = repo.resolve_path(date());
    assert_eq!(path, std::path::Path::new("/var/dailies/2026-01-26-daily.md"));
    assert_ne!(
        path,
        repo.resolve_path(NaiveDate::from_ymd_opt(2026, 1, 27).unwrap())
    );
}

#[test]
fn load_absent_date_returns_empty_document_without_creating_file() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("dailies");
    let repo = FsDailyRepository::new(&root);

    let document = repo.load(date()).unwrap();
    assert_eq!(document, DailyDocument::new(date()));
    assert!(repo.load_existing(date()).unwrap().is_none());
    assert!(!root.exists());

    let path = repo.save(&document).unwrap();
    assert_eq!(path, root.join("2026-01-26-daily.md"));
    let files: Vec<_> = fs::read_dir(&root).unwrap().collect();
    assert_eq!(files.len(), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), render_document(&document));
}

#[test]
fn append_entry_twice_appends_twice() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FsDailyRepository::new(dir.path());
    let entry = Entry::with_tag_list("Standup sync", "team").unwrap();

    repo.append_entry(date(), SectionKind::Meetings, entry.clone())
        .unwrap();
    let returned = repo
        .append_entry(date(), SectionKind::Meetings, entry.clone())
        .unwrap();

    assert_eq!(returned.section(SectionKind::Meetings).entry_count(), 2);
    let loaded = repo.load(date()).unwrap();
    assert_eq!(loaded, returned);
    let entries: Vec<&Entry> = loaded.section(SectionKind::Meetings).entries().collect();
    assert_eq!(entries, vec![&entry, &entry]);
}

#[test]
fn append_entry_leaves_other_sections_and_notes_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FsDailyRepository::new(dir.path());

    let mut document = DailyDocument::new(date());
    document.append_entry(SectionKind::Yesterday, Entry::untagged("Old work").unwrap());
    document
        .section_mut(SectionKind::Blockers)
        .push_passthrough("> quoted by hand");
    document.notes = Notes::new("Keep me");
    repo.save(&document).unwrap();

    let updated = repo
        .append_entry(date(), SectionKind::Today, Entry::untagged("New plan").unwrap())
        .unwrap();

    for kind in [SectionKind::Yesterday, SectionKind::Blockers, SectionKind::Meetings] {
        assert_eq!(updated.section(kind), document.section(kind));
    }
    assert_eq!(updated.notes, document.notes);
    assert_eq!(updated.section(SectionKind::Today).entry_count(), 1);
}

#[test]
fn manual_content_survives_an_append() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FsDailyRepository::new(dir.path());
    let path = repo.resolve_path(date());
    fs::write(
        &path,
        "---\ntype: daily\ndate: 2026-01-26\n---\n\n## ✅ Yesterday\n\n- Manually added task\nfree prose\n\n## 🧠 Quick Notes\n\nManual note here\n",
    )
    .unwrap();

    repo.append_entry(date(), SectionKind::Yesterday, Entry::untagged("CLI task").unwrap())
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("- Manually added task\nfree prose\n- CLI task\n"));
    assert!(content.contains("Manual note here"));
    assert!(content.contains("## 🚧 Blockers"));
}

#[test]
fn append_note_adds_lines_to_notes_block() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FsDailyRepository::new(dir.path());

    repo.append_note(date(), "Quick note").unwrap();
    let document = repo.append_note(date(), "  Second thought  ").unwrap();
    assert_eq!(document.notes.as_str(), "Quick note\nSecond thought");

    let err = repo.append_note(date(), "   ").unwrap_err();
    assert!(matches!(err, RepoError::InvalidEntry(_)));
}

#[test]
fn heading_like_or_multi_line_notes_are_rejected_and_nothing_is_lost() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FsDailyRepository::new(dir.path());

    let err = repo.append_note(date(), "## Today").unwrap_err();
    assert!(matches!(
        err,
        RepoError::InvalidEntry(EntryValidationError::HeadingLine(_))
    ));
    let err = repo.append_note(date(), "first\n## ✅ Yesterday\n- injected").unwrap_err();
    assert!(matches!(err, RepoError::InvalidEntry(EntryValidationError::MultiLine)));
    assert!(!repo.resolve_path(date()).exists());

    repo.append_note(date(), "# retro ideas").unwrap();
    repo.append_note(date(), "- buy milk").unwrap();
    let document = repo.load(date()).unwrap();
    assert_eq!(document.notes.as_str(), "# retro ideas\n- buy milk");
    for kind in SectionKind::ALL {
        assert!(document.section(kind).is_empty());
    }
}

#[test]
fn different_dates_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FsDailyRepository::new(dir.path());
    let yesterday = NaiveDate::from_ymd_opt(2026, 1, 25).unwrap();

    repo.append_entry(yesterday, SectionKind::Yesterday, Entry::untagged("Yesterday's work").unwrap())
        .unwrap();
    repo.append_entry(date(), SectionKind::Yesterday, Entry::untagged("Today's work").unwrap())
        .unwrap();

    let old = fs::read_to_string(repo.resolve_path(yesterday)).unwrap();
    let new = fs::read_to_string(repo.resolve_path(date())).unwrap();
    assert!(old.contains("Yesterday's work") && !old.contains("Today's work"));
    assert!(new.contains("Today's work") && !new.contains("Yesterday's work"));
    assert_eq!(repo.list_dates().unwrap(), vec![yesterday, date()]);
}

#[test]
fn mismatched_front_matter_date_fails_and_file_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FsDailyRepository::new(dir.path());
    let path = repo.resolve_path(date());
    let wrong = render_document(&DailyDocument::new(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()));
    fs::write(&path, &wrong).unwrap();

    let err = repo
        .append_entry(date(), SectionKind::Today, Entry::untagged("Plan").unwrap())
        .unwrap_err();
    match err {
        RepoError::Parse { path: err_path, source } => {
            assert_eq!(err_path, path);
            assert!(matches!(source, ParseError::DateMismatch { .. }));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), wrong);
}

#[test]
fn malformed_file_is_reported_with_path_and_line() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FsDailyRepository::new(dir.path());
    let path = repo.resolve_path(date());
    fs::write(&path, "---\ntype: daily\n---\n\nSome random content\n").unwrap();

    let err = repo.load(date()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("2026-01-26-daily.md"));
    assert!(message.contains("line 3"));
    assert!(matches!(
        err,
        RepoError::Parse {
            source: ParseError::MalformedFrontMatter { line: 3, .. },
            ..
        }
    ));
}

#[test]
fn list_dates_ignores_unrelated_files() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FsDailyRepository::new(dir.path());
    assert!(FsDailyRepository::new(dir.path().join("missing"))
        .list_dates()
        .unwrap()
        .is_empty());

    fs::write(dir.path().join("README.md"), "hello").unwrap();
    fs::write(dir.path().join("2026-13-01-daily.md"), "bad").unwrap();
    repo.save(&DailyDocument::new(date())).unwrap();

    assert_eq!(repo.list_dates().unwrap(), vec![date()]);
}
