//! Core domain logic for the daily standup notes tool.
//! This crate owns the note-file model, its Markdown codec and the only
//! code that touches the storage root.

pub mod cheat;
pub mod config;
pub mod logging;
pub mod markdown;
pub mod model;
pub mod repo;
pub mod service;

pub use cheat::sheet::{
    build_cheat_sheet, cheat_title, render_cheat_sheet, CheatGroup, CheatSheet, TagFilter,
};
pub use config::{
    load_config, resolve_storage_root, write_default_config, ConfigError, ConfigResult,
    DailyConfig, RootSource,
};
pub use logging::{default_log_level, init_logging, LogLevel};
pub use markdown::{parse_document, render_document, render_entry, ParseError};
pub use model::document::{
    DailyDocument, MetadataError, MetadataLine, Notes, Section, SectionKind, SectionLine,
};
pub use model::entry::{Entry, EntryValidationError, TAG_MARKER};
pub use repo::daily_repo::{DailyRepository, FsDailyRepository, RepoError, RepoResult};
pub use service::daily_service::DailyService;
