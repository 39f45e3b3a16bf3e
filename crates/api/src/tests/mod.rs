// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use std::path::PathBuf;

use time::macros::date;
use timecard_domain::{
    ContractDay, DailyLogEntry, EntryType, GlobalSettings, Holiday, HolidayCalendar, TimeSegment,
    VacationStatus, WeeklyContract,
};
use timecard_persistence::Store;

use crate::{BatchOutcome, WorkbookSession};

const USER: i64 = 1;

fn full_time_contract() -> WeeklyContract {
    let workday: ContractDay = ContractDay::new(4.0, 4.0);
    WeeklyContract {
        monday: workday,
        tuesday: workday,
        wednesday: workday,
        thursday: workday,
        friday: workday,
        saturday: ContractDay::default(),
        sunday: ContractDay::default(),
    }
}

fn settings() -> GlobalSettings {
    GlobalSettings::new(100.0, 20.0)
}

/// Opens a January 2026 session with a full-time contract already stored.
fn january_session(store: Store) -> WorkbookSession {
    store
        .save_weekly_contract(USER, 2026, 1, &full_time_contract())
        .unwrap();
    WorkbookSession::open(store, USER, 2026, 1, settings(), HolidayCalendar::new()).unwrap()
}

/// A file-backed store whose sessions can be reopened within a test.
fn temp_store(name: &str) -> (PathBuf, Store) {
    let path: PathBuf = std::env::temp_dir().join(format!(
        "timecard-api-{name}-{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    let store: Store = Store::open(&path).unwrap();
    (path, store)
}

#[test]
fn test_open_empty_store_derives_the_month() {
    let store: Store = Store::open_in_memory().unwrap();
    let session: WorkbookSession =
        WorkbookSession::open(store, USER, 2026, 1, settings(), HolidayCalendar::new()).unwrap();

    assert_eq!(session.daily_logs().len(), 31);
    // No stored contract: every day defaults to non-working.
    assert!(session.daily_logs().iter().all(|entry| !entry.is_working_day));
    assert_eq!(session.effective_annual_allowance(), 20.0);
}

#[test]
fn test_open_loads_stored_contract() {
    let store: Store = Store::open_in_memory().unwrap();
    let session: WorkbookSession = january_session(store);

    assert_eq!(session.weekly_contract().weekly_total(), 40.0);
    // 2026-01-05 is a Monday.
    let monday: &DailyLogEntry = session
        .daily_logs()
        .iter()
        .find(|entry| entry.date_key == "2026-01-05")
        .unwrap();
    assert!(monday.is_working_day);
}

#[test]
fn test_edit_log_entry_survives_reopen() {
    let (path, store) = temp_store("edit-reopen");
    let mut session: WorkbookSession = january_session(store);

    let entry: DailyLogEntry = DailyLogEntry::new(
        date!(2026 - 01 - 05),
        TimeSegment::regular(String::from("09:00"), String::from("12:00")),
        TimeSegment::regular(String::from("13:00"), String::from("17:30")),
        true,
    );
    session.edit_log_entry(entry).unwrap();
    drop(session);

    let store: Store = Store::open(&path).unwrap();
    let session: WorkbookSession =
        WorkbookSession::open(store, USER, 2026, 1, settings(), HolidayCalendar::new()).unwrap();

    let monday: &DailyLogEntry = session
        .daily_logs()
        .iter()
        .find(|entry| entry.date_key == "2026-01-05")
        .unwrap();
    assert_eq!(monday.morning.start, "09:00");
    assert_eq!(monday.afternoon.end, "17:30");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_select_vacation_survives_reopen() {
    let (path, store) = temp_store("vacation-reopen");
    let mut session: WorkbookSession = january_session(store);

    session.select_vacation_day("2026-01-05").unwrap();
    assert_eq!(session.remaining_annual_vacation_days().unwrap(), 19.0);
    drop(session);

    let store: Store = Store::open(&path).unwrap();
    let session: WorkbookSession =
        WorkbookSession::open(store, USER, 2026, 1, settings(), HolidayCalendar::new()).unwrap();

    let vacations = session.vacations();
    assert_eq!(vacations.len(), 1);
    assert_eq!(vacations[0].status, VacationStatus::Selected);
    assert_eq!(session.remaining_annual_vacation_days().unwrap(), 19.0);

    let monday: &DailyLogEntry = session
        .daily_logs()
        .iter()
        .find(|entry| entry.date_key == "2026-01-05")
        .unwrap();
    assert_eq!(monday.morning.entry_type, EntryType::Vacation);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_holiday_added_on_vacation_day_restores_balance() {
    let store: Store = Store::open_in_memory().unwrap();
    let mut session: WorkbookSession = january_session(store);

    session.select_vacation_day("2026-01-05").unwrap();
    assert_eq!(session.remaining_annual_vacation_days().unwrap(), 19.0);

    session
        .set_holiday_calendar(HolidayCalendar::from_holidays(vec![Holiday::new(
            "2026-01-05",
            "New Holiday",
            true,
        )]))
        .unwrap();

    let monday: &DailyLogEntry = session
        .daily_logs()
        .iter()
        .find(|entry| entry.date_key == "2026-01-05")
        .unwrap();
    assert_eq!(monday.morning.entry_type, EntryType::Holiday);
    assert_eq!(session.remaining_annual_vacation_days().unwrap(), 20.0);
}

#[test]
fn test_select_on_holiday_is_rejected() {
    let store: Store = Store::open_in_memory().unwrap();
    store
        .save_weekly_contract(USER, 2026, 1, &full_time_contract())
        .unwrap();
    let mut session: WorkbookSession = WorkbookSession::open(
        store,
        USER,
        2026,
        1,
        settings(),
        HolidayCalendar::from_holidays(vec![Holiday::new("2026-01-05", "Holiday", true)]),
    )
    .unwrap();

    assert!(session.select_vacation_day("2026-01-05").is_err());
    assert!(session.vacations().is_empty());
}

#[test]
fn test_submit_and_approve_all_lifecycle() {
    let store: Store = Store::open_in_memory().unwrap();
    let mut session: WorkbookSession = january_session(store);

    for date_key in ["2026-01-05", "2026-01-06", "2026-01-07"] {
        session.select_vacation_day(date_key).unwrap();
    }

    let submitted: BatchOutcome = session.submit_for_approval().unwrap();
    assert!(submitted.is_complete());
    assert_eq!(submitted.succeeded.len(), 3);
    assert!(
        session
            .vacations()
            .iter()
            .all(|day| day.status == VacationStatus::PendingApproval)
    );

    let approved: BatchOutcome = session.approve_all_pending(Some(String::from("ok")));
    assert!(approved.is_complete());
    assert_eq!(approved.succeeded.len(), 3);
    for day in session.vacations() {
        assert_eq!(day.status, VacationStatus::Approved);
        assert_eq!(day.admin_comment.as_deref(), Some("ok"));
    }

    // Approved records cannot be deleted by the user.
    assert!(session.delete_vacation_day("2026-01-05").is_err());
    assert_eq!(session.vacations().len(), 3);
}

#[test]
fn test_submit_reports_store_failure_for_every_day() {
    let (path, store) = temp_store("submit-store-failure");
    let mut session: WorkbookSession = january_session(store);
    session.select_vacation_day("2026-01-05").unwrap();
    session.select_vacation_day("2026-01-06").unwrap();

    // Corrupt the store underneath the live session.
    rusqlite::Connection::open(&path)
        .unwrap()
        .execute_batch("DROP TABLE vacation_days;")
        .unwrap();

    let outcome: BatchOutcome = session.submit_for_approval().unwrap();
    assert!(!outcome.is_complete());
    assert!(outcome.succeeded.is_empty());
    let failed_keys: Vec<&str> = outcome.failed.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(failed_keys, vec!["2026-01-05", "2026-01-06"]);
    assert!(outcome.failed.iter().all(|(_, message)| !message.is_empty()));

    // The in-memory transition stands; the store catches up later.
    assert!(
        session
            .vacations()
            .iter()
            .all(|day| day.status == VacationStatus::PendingApproval)
    );

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_approve_all_reports_store_failure_for_every_day() {
    let (path, store) = temp_store("approve-store-failure");
    let mut session: WorkbookSession = january_session(store);
    session.select_vacation_day("2026-01-05").unwrap();
    session.select_vacation_day("2026-01-06").unwrap();
    let submitted: BatchOutcome = session.submit_for_approval().unwrap();
    assert!(submitted.is_complete());

    rusqlite::Connection::open(&path)
        .unwrap()
        .execute_batch("DROP TABLE vacation_days;")
        .unwrap();

    let outcome: BatchOutcome = session.approve_all_pending(Some(String::from("ok")));
    assert!(!outcome.is_complete());
    assert!(outcome.succeeded.is_empty());
    assert_eq!(outcome.failed.len(), 2);

    assert!(
        session
            .vacations()
            .iter()
            .all(|day| day.status == VacationStatus::Approved)
    );

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_open_empty_store_writes_no_vacuous_rows() {
    let (path, store) = temp_store("open-no-rows");
    let session: WorkbookSession = january_session(store);
    drop(session);

    let store: Store = Store::open(&path).unwrap();
    assert!(
        store
            .load_daily_logs_for_month(USER, 2026, 1)
            .unwrap()
            .is_empty()
    );

    // Only an edited day earns a stored row.
    let mut session: WorkbookSession =
        WorkbookSession::open(store, USER, 2026, 1, settings(), HolidayCalendar::new()).unwrap();
    session
        .edit_log_entry(DailyLogEntry::new(
            date!(2026 - 01 - 05),
            TimeSegment::regular(String::from("09:00"), String::from("12:00")),
            TimeSegment::default(),
            true,
        ))
        .unwrap();
    drop(session);

    let store: Store = Store::open(&path).unwrap();
    let rows: Vec<DailyLogEntry> = store.load_daily_logs_for_month(USER, 2026, 1).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date_key, "2026-01-05");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_submit_with_nothing_selected_is_empty() {
    let store: Store = Store::open_in_memory().unwrap();
    let mut session: WorkbookSession = january_session(store);

    let outcome: BatchOutcome = session.submit_for_approval().unwrap();
    assert!(outcome.is_complete());
    assert!(outcome.succeeded.is_empty());
}

#[test]
fn test_reject_restores_log_and_balance() {
    let store: Store = Store::open_in_memory().unwrap();
    let mut session: WorkbookSession = january_session(store);

    session.select_vacation_day("2026-01-05").unwrap();
    session.submit_for_approval().unwrap();
    session
        .reject("2026-01-05", Some(String::from("short staffed")))
        .unwrap();

    let day = session.vacations();
    assert_eq!(day[0].status, VacationStatus::Rejected);
    assert_eq!(session.remaining_annual_vacation_days().unwrap(), 20.0);

    let monday: &DailyLogEntry = session
        .daily_logs()
        .iter()
        .find(|entry| entry.date_key == "2026-01-05")
        .unwrap();
    assert_eq!(monday.morning.entry_type, EntryType::Regular);
}

#[test]
fn test_monthly_summary_through_session() {
    let store: Store = Store::open_in_memory().unwrap();
    let mut session: WorkbookSession = january_session(store);

    // January 2026 has 22 weekdays at 8 contracted hours each.
    assert_eq!(session.summary_data().unwrap().planned_monthly_hours, 176.0);

    let entry: DailyLogEntry = DailyLogEntry::new(
        date!(2026 - 01 - 05),
        TimeSegment::regular(String::from("09:00"), String::from("12:00")),
        TimeSegment::regular(String::from("13:00"), String::from("17:30")),
        true,
    );
    session.edit_log_entry(entry).unwrap();

    // 09:00-12:00 plus 13:00-17:30 is 7.5 clocked hours.
    let summary = session.summary_data().unwrap();
    assert_eq!(summary.worked_plus_sick_hours, 7.5);
    assert_eq!(summary.overtime_or_missed_hours, 7.5 - 176.0);

    let breakdown = session.month_summary().unwrap();
    assert_eq!(breakdown.workable_days, 22);
}

#[test]
fn test_contract_change_persists() {
    let (path, store) = temp_store("contract-reopen");
    let mut session: WorkbookSession = january_session(store);

    // Mondays become non-working.
    let contract: WeeklyContract = WeeklyContract {
        monday: ContractDay::default(),
        ..full_time_contract()
    };
    session.set_weekly_contract(contract).unwrap();
    drop(session);

    let store: Store = Store::open(&path).unwrap();
    let session: WorkbookSession =
        WorkbookSession::open(store, USER, 2026, 1, settings(), HolidayCalendar::new()).unwrap();

    assert_eq!(session.weekly_contract().weekly_total(), 32.0);
    let monday: &DailyLogEntry = session
        .daily_logs()
        .iter()
        .find(|entry| entry.date_key == "2026-01-05")
        .unwrap();
    assert!(!monday.is_working_day);

    let _ = std::fs::remove_file(&path);
}
