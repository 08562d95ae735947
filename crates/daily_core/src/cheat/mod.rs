//! Standup summary views built from daily documents.

pub mod sheet;
