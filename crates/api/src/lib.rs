// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session-level API for the Timecard system.
//!
//! This crate is the surface consumed by the UI layer. A
//! [`WorkbookSession`] owns the store handle and the in-memory
//! [`timecard::MonthWorkbook`] for one user and one displayed month;
//! every mutation goes through the core transition function and the
//! resulting write set is persisted before the call returns.

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
mod session;

#[cfg(test)]
mod tests;

pub use error::ApiError;
pub use session::{BatchOutcome, WorkbookSession};
