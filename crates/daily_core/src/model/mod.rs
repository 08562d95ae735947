//! Domain model for daily standup documents.
//!
//! # Responsibility
//! - Define entries, sections, notes and the per-date document.
//! - Keep the model free of I/O and Markdown syntax.
//!
//! # Invariants
//! - A document is identified by its calendar date alone.
//! - Entries are validated on construction, never afterwards.

pub mod document;
pub mod entry;
