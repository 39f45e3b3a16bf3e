// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use thiserror::Error;
use timecard::CoreError;
use timecard_domain::DomainError;
use timecard_persistence::PersistenceError;

/// API-level errors.
///
/// These wrap the inner layer errors so UI callers handle a single error
/// type at the session boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A domain rule was violated.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// A workbook transition was rejected.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// The store rejected or failed a read.
    #[error("{0}")]
    Persistence(#[from] PersistenceError),
}
