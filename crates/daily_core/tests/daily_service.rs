use chrono::NaiveDate;
use daily_core::{
    DailyDocument, DailyRepository, DailyService, FsDailyRepository, RepoError, RepoResult,
    SectionKind, TagFilter,
};
use std::cell::Cell;
use std::path::PathBuf;

struct CountingRepository {
    inner: FsDailyRepository,
    loads: Cell<usize>,
}

impl DailyRepository for CountingRepository {
    fn resolve_path(&self, date: NaiveDate) -> PathBuf {
        self.inner.resolve_path(date)
    }

    fn load_existing(&self, date: NaiveDate) -> RepoResult<Option<DailyDocument>> {
        self.loads.set(self.loads.get() + 1);
        self.inner.load_existing(date)
    }

    fn save(&self, document: &DailyDocument) -> RepoResult<PathBuf> {
        self.inner.save(document)
    }

    fn list_dates(&self) -> RepoResult<Vec<NaiveDate>> {
        self.inner.list_dates()
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
}

#[test]
fn log_entry_validates_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let service = DailyService::new(FsDailyRepository::new(dir.path()));

    let document = service
        .log_entry(day(26), SectionKind::Yesterday, "Deploy", &["cicd, ,aws"])
        .unwrap();
    let entry = document.section(SectionKind::Yesterday).entries().next().unwrap();
    assert_eq!(entry.tags(), ["cicd", "aws"]);

    let content = std::fs::read_to_string(service.repo().resolve_path(day(26))).unwrap();
    assert!(content.contains("- Deploy #tags: cicd,aws"));
}

#[test]
fn blank_text_is_rejected_before_touching_disk() {
    let dir = tempfile::tempdir().unwrap();
    let service = DailyService::new(FsDailyRepository::new(dir.path()));

    let err = service
        .log_entry::<&str>(day(26), SectionKind::Today, "   ", &[])
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidEntry(_)));
    assert!(!service.repo().resolve_path(day(26)).exists());
}

#[test]
fn cheat_sheet_for_missing_date_is_not_found_and_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let service = DailyService::new(FsDailyRepository::new(dir.path()));

    let err = service.cheat_sheet(day(31), &TagFilter::default()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
    assert!(err.to_string().contains("2026-01-31"));
    assert!(service.repo().list_dates().unwrap().is_empty());
}

#[test]
fn cheat_sheet_reflects_logged_entries() {
    let dir = tempfile::tempdir().unwrap();
    let service = DailyService::new(FsDailyRepository::new(dir.path()));
    service
        .log_entry(day(26), SectionKind::Yesterday, "Task cicd", &["cicd"])
        .unwrap();
    service
        .log_entry(day(26), SectionKind::Yesterday, "Task infra", &["infra"])
        .unwrap();
    service
        .log_entry(day(26), SectionKind::Today, "Plan cicd", &["cicd"])
        .unwrap();

    let sheet = service
        .cheat_sheet(day(26), &TagFilter::from_list("cicd"))
        .unwrap();
    let texts: Vec<&str> = sheet
        .groups
        .iter()
        .flat_map(|group| group.entries.iter().map(|entry| entry.text()))
        .collect();
    assert_eq!(texts, vec!["Task cicd", "Plan cicd"]);
}

#[test]
fn recent_cheat_sheets_skip_missing_dates_oldest_first() {
    let dir = tempfile::tempdir().unwrap();
    let service = DailyService::new(FsDailyRepository::new(dir.path()));
    service
        .log_entry::<&str>(day(22), SectionKind::Yesterday, "Outside window", &[])
        .unwrap();
    service
        .log_entry::<&str>(day(23), SectionKind::Yesterday, "Friday work", &[])
        .unwrap();
    service
        .log_entry::<&str>(day(26), SectionKind::Yesterday, "Monday work", &[])
        .unwrap();

    let sheets = service
        .recent_cheat_sheets(day(26), 4, &TagFilter::default())
        .unwrap();
    let dates: Vec<NaiveDate> = sheets.iter().map(|sheet| sheet.date).collect();
    assert_eq!(dates, vec![day(23), day(26)]);

    let single = service
        .recent_cheat_sheets(day(26), 0, &TagFilter::default())
        .unwrap();
    assert_eq!(single.len(), 1);

    let err = service
        .recent_cheat_sheets(day(30), 3, &TagFilter::default())
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

#[test]
fn unbounded_window_loads_only_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    let service = DailyService::new(CountingRepository {
        inner: FsDailyRepository::new(dir.path()),
        loads: Cell::new(0),
    });
    service
        .log_entry::<&str>(day(5), SectionKind::Today, "Early", &[])
        .unwrap();
    service
        .log_entry::<&str>(day(26), SectionKind::Today, "Late", &[])
        .unwrap();
    service.repo().loads.set(0);

    let sheets = service
        .recent_cheat_sheets(day(26), u32::MAX, &TagFilter::default())
        .unwrap();
    assert_eq!(sheets.len(), 2);
    assert_eq!(service.repo().loads.get(), 2);
}
