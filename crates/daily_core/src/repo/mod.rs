//! Repository layer for daily documents on local disk.
//!
//! # Responsibility
//! - Define the use-case oriented storage contract (`DailyRepository`).
//! - Keep file naming, parsing and atomic writes behind that contract.
//!
//! # Invariants
//! - Repository errors carry the offending date or path.
//! - Every mutating call persists before it returns.

pub mod daily_repo;
