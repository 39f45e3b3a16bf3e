// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::Connection;
use tracing::info;

use crate::error::PersistenceError;

/// Initializes the database schema.
///
/// # Arguments
///
/// * `conn` - The database connection to initialize
///
/// # Errors
///
/// Returns an error if schema creation fails.
pub fn initialize_schema(conn: &Connection) -> Result<(), PersistenceError> {
    info!("Initializing database schema");

    conn.execute_batch(
        "
        -- One weekly contract snapshot per user and displayed month.
        CREATE TABLE IF NOT EXISTS contracts (
            user_id INTEGER NOT NULL,
            year INTEGER NOT NULL,
            month INTEGER NOT NULL CHECK(month BETWEEN 1 AND 12),
            contract_json TEXT NOT NULL,
            PRIMARY KEY (user_id, year, month)
        );

        -- Raw daily log fragments, keyed by ISO calendar date.
        CREATE TABLE IF NOT EXISTS daily_logs (
            user_id INTEGER NOT NULL,
            date_key TEXT NOT NULL,
            morning_json TEXT NOT NULL,
            afternoon_json TEXT NOT NULL,
            is_working_day INTEGER NOT NULL CHECK(is_working_day IN (0, 1)),
            PRIMARY KEY (user_id, date_key)
        );

        -- Vacation day records spanning the whole year.
        CREATE TABLE IF NOT EXISTS vacation_days (
            user_id INTEGER NOT NULL,
            date_key TEXT NOT NULL,
            status TEXT NOT NULL
                CHECK(status IN ('selected', 'pending_approval', 'approved', 'rejected')),
            admin_comment TEXT,
            PRIMARY KEY (user_id, date_key)
        );

        CREATE INDEX IF NOT EXISTS idx_daily_logs_user
            ON daily_logs(user_id, date_key);

        CREATE INDEX IF NOT EXISTS idx_vacation_days_user
            ON vacation_days(user_id, date_key);
        ",
    )
    .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;

    Ok(())
}
