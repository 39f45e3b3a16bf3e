// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite persistence for the Timecard system.
//!
//! This crate stores the three durable record kinds of the system: weekly
//! contract snapshots, raw daily log entries, and vacation day records.
//! Storage is a single-backend SQLite store (bundled rusqlite), fast and
//! deterministic enough to run every test against an in-memory database.
//!
//! Derived data is never stored as the source of truth: daily logs are
//! re-derived from the persisted snapshots on load, so the rows written by
//! [`Store::save_daily_log`] are the raw, user-authored fragments.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod schema;
mod store;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use schema::initialize_schema;
pub use store::Store;
