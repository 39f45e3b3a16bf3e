// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::Path;

use rusqlite::{Connection, params};
use time::Date;
use tracing::{debug, info};

use timecard_domain::{
    DailyLogEntry, TimeSegment, VacationDay, VacationStatus, WeeklyContract, parse_date_key,
};

use crate::error::PersistenceError;
use crate::schema::initialize_schema;

/// SQLite-backed store for contracts, daily logs, and vacation records.
///
/// All rows are keyed by `user_id` plus either a `(year, month)` pair or a
/// `"YYYY-MM-DD"` date key, so a single database file serves every user and
/// every displayed month.
#[derive(Debug)]
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (or creates) a store at the given path and initializes the
    /// schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open(path)
            .map_err(|err| PersistenceError::DatabaseConnectionFailed(err.to_string()))?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Opens an in-memory store, used by tests and ephemeral sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema setup fails.
    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open_in_memory()
            .map_err(|err| PersistenceError::DatabaseConnectionFailed(err.to_string()))?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Loads the weekly contract stored for a user's displayed month.
    ///
    /// # Returns
    ///
    /// `None` when no contract row exists for that month.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or JSON decoding fails.
    pub fn load_weekly_contract(
        &self,
        user_id: i64,
        year: i32,
        month: u8,
    ) -> Result<Option<WeeklyContract>, PersistenceError> {
        let mut stmt = self.conn.prepare(
            "SELECT contract_json FROM contracts WHERE user_id = ?1 AND year = ?2 AND month = ?3",
        )?;
        let mut rows = stmt.query(params![user_id, year, month])?;

        match rows.next()? {
            Some(row) => {
                let json: String = row.get(0)?;
                let contract: WeeklyContract = serde_json::from_str(&json)?;
                Ok(Some(contract))
            }
            None => Ok(None),
        }
    }

    /// Saves (upserts) the weekly contract for a user's displayed month.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON encoding or the write fails.
    pub fn save_weekly_contract(
        &self,
        user_id: i64,
        year: i32,
        month: u8,
        contract: &WeeklyContract,
    ) -> Result<(), PersistenceError> {
        let json: String = serde_json::to_string(contract)?;
        self.conn.execute(
            "INSERT INTO contracts (user_id, year, month, contract_json)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id, year, month) DO UPDATE SET
                 contract_json = excluded.contract_json",
            params![user_id, year, month, json],
        )?;
        debug!(user_id, year, month, "Saved weekly contract");
        Ok(())
    }

    /// Loads every daily log row for a user's displayed month, ordered by
    /// date key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row cannot be
    /// decoded.
    pub fn load_daily_logs_for_month(
        &self,
        user_id: i64,
        year: i32,
        month: u8,
    ) -> Result<Vec<DailyLogEntry>, PersistenceError> {
        let pattern: String = month_pattern(year, month);
        let mut stmt = self.conn.prepare(
            "SELECT date_key, morning_json, afternoon_json, is_working_day
             FROM daily_logs
             WHERE user_id = ?1 AND date_key LIKE ?2
             ORDER BY date_key",
        )?;

        let rows = stmt.query_map(params![user_id, pattern], |row| {
            let date_key: String = row.get(0)?;
            let morning_json: String = row.get(1)?;
            let afternoon_json: String = row.get(2)?;
            let is_working_day: bool = row.get::<_, i32>(3)? != 0;
            Ok((date_key, morning_json, afternoon_json, is_working_day))
        })?;

        let mut entries: Vec<DailyLogEntry> = Vec::new();
        for row in rows {
            let (date_key, morning_json, afternoon_json, is_working_day) = row?;
            entries.push(decode_daily_log(
                &date_key,
                &morning_json,
                &afternoon_json,
                is_working_day,
            )?);
        }
        Ok(entries)
    }

    /// Saves (upserts) one daily log row for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON encoding or the write fails.
    pub fn save_daily_log(
        &self,
        user_id: i64,
        entry: &DailyLogEntry,
    ) -> Result<(), PersistenceError> {
        let morning_json: String = serde_json::to_string(&entry.morning)?;
        let afternoon_json: String = serde_json::to_string(&entry.afternoon)?;
        self.conn.execute(
            "INSERT INTO daily_logs
                (user_id, date_key, morning_json, afternoon_json, is_working_day)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(user_id, date_key) DO UPDATE SET
                 morning_json = excluded.morning_json,
                 afternoon_json = excluded.afternoon_json,
                 is_working_day = excluded.is_working_day",
            params![
                user_id,
                entry.date_key,
                morning_json,
                afternoon_json,
                i32::from(entry.is_working_day)
            ],
        )?;
        debug!(user_id, date_key = %entry.date_key, "Saved daily log entry");
        Ok(())
    }

    /// Loads the vacation records of one displayed month, ordered by date
    /// key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored status is not a
    /// known lifecycle value.
    pub fn load_vacations_for_month(
        &self,
        user_id: i64,
        year: i32,
        month: u8,
    ) -> Result<Vec<VacationDay>, PersistenceError> {
        self.load_vacations_matching(user_id, &month_pattern(year, month))
    }

    /// Loads the vacation records of the whole year, ordered by date key.
    /// Balance math needs the full year even when only one month is
    /// displayed.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored status is not a
    /// known lifecycle value.
    pub fn load_vacations_for_year(
        &self,
        user_id: i64,
        year: i32,
    ) -> Result<Vec<VacationDay>, PersistenceError> {
        self.load_vacations_matching(user_id, &format!("{year:04}-%"))
    }

    /// Replaces the vacation records of one displayed month with the given
    /// set, inside a single transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement in the transaction fails.
    pub fn save_vacations_for_month(
        &mut self,
        user_id: i64,
        year: i32,
        month: u8,
        vacations: &[VacationDay],
    ) -> Result<(), PersistenceError> {
        let pattern: String = month_pattern(year, month);
        let tx = self.conn.transaction()?;

        tx.execute(
            "DELETE FROM vacation_days WHERE user_id = ?1 AND date_key LIKE ?2",
            params![user_id, pattern],
        )?;
        for day in vacations {
            tx.execute(
                "INSERT INTO vacation_days (user_id, date_key, status, admin_comment)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    user_id,
                    day.date_key,
                    day.status.as_str(),
                    day.admin_comment
                ],
            )?;
        }
        tx.commit()?;

        info!(
            user_id,
            year,
            month,
            count = vacations.len(),
            "Replaced vacation records for month"
        );
        Ok(())
    }

    fn load_vacations_matching(
        &self,
        user_id: i64,
        pattern: &str,
    ) -> Result<Vec<VacationDay>, PersistenceError> {
        let mut stmt = self.conn.prepare(
            "SELECT date_key, status, admin_comment
             FROM vacation_days
             WHERE user_id = ?1 AND date_key LIKE ?2
             ORDER BY date_key",
        )?;

        let rows = stmt.query_map(params![user_id, pattern], |row| {
            let date_key: String = row.get(0)?;
            let status_text: String = row.get(1)?;
            let admin_comment: Option<String> = row.get(2)?;
            Ok((date_key, status_text, admin_comment))
        })?;

        let mut vacations: Vec<VacationDay> = Vec::new();
        for row in rows {
            let (date_key, status_text, admin_comment) = row?;
            let status: VacationStatus = VacationStatus::parse_str(&status_text).map_err(|_| {
                PersistenceError::InvalidStoredValue {
                    column: "status".to_string(),
                    value: status_text.clone(),
                }
            })?;
            vacations.push(VacationDay {
                date_key,
                status,
                admin_comment,
            });
        }
        Ok(vacations)
    }
}

/// The `LIKE` pattern matching every date key of a month.
fn month_pattern(year: i32, month: u8) -> String {
    format!("{year:04}-{month:02}-%")
}

fn decode_daily_log(
    date_key: &str,
    morning_json: &str,
    afternoon_json: &str,
    is_working_day: bool,
) -> Result<DailyLogEntry, PersistenceError> {
    let date: Date =
        parse_date_key(date_key).map_err(|_| PersistenceError::InvalidStoredValue {
            column: "date_key".to_string(),
            value: date_key.to_string(),
        })?;
    let morning: TimeSegment = serde_json::from_str(morning_json)?;
    let afternoon: TimeSegment = serde_json::from_str(afternoon_json)?;
    // `date_key` and `has_inputs` are recomputed by the constructor.
    Ok(DailyLogEntry::new(date, morning, afternoon, is_working_day))
}
