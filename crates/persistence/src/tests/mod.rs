// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use time::macros::date;
use timecard_domain::{
    ContractDay, DailyLogEntry, EntryType, TimeSegment, VacationDay, VacationStatus,
    WeeklyContract,
};

use crate::Store;

const USER: i64 = 1;

fn part_time_contract() -> WeeklyContract {
    WeeklyContract {
        monday: ContractDay::new(4.0, 4.0),
        tuesday: ContractDay::new(4.0, 0.0),
        wednesday: ContractDay::new(4.0, 4.0),
        thursday: ContractDay::new(4.0, 0.0),
        friday: ContractDay::new(4.0, 4.0),
        saturday: ContractDay::default(),
        sunday: ContractDay::default(),
    }
}

#[test]
fn test_contract_round_trip() {
    let store: Store = Store::open_in_memory().unwrap();
    let contract: WeeklyContract = part_time_contract();

    store
        .save_weekly_contract(USER, 2026, 1, &contract)
        .unwrap();

    let loaded: WeeklyContract = store
        .load_weekly_contract(USER, 2026, 1)
        .unwrap()
        .unwrap();
    assert_eq!(loaded, contract);
}

#[test]
fn test_missing_contract_is_none() {
    let store: Store = Store::open_in_memory().unwrap();
    assert!(store.load_weekly_contract(USER, 2026, 1).unwrap().is_none());
}

#[test]
fn test_contract_save_is_an_upsert() {
    let store: Store = Store::open_in_memory().unwrap();
    store
        .save_weekly_contract(USER, 2026, 1, &part_time_contract())
        .unwrap();

    let full_time: WeeklyContract = WeeklyContract {
        tuesday: ContractDay::new(4.0, 4.0),
        thursday: ContractDay::new(4.0, 4.0),
        ..part_time_contract()
    };
    store
        .save_weekly_contract(USER, 2026, 1, &full_time)
        .unwrap();

    let loaded: WeeklyContract = store
        .load_weekly_contract(USER, 2026, 1)
        .unwrap()
        .unwrap();
    assert_eq!(loaded.weekly_total(), 40.0);
}

#[test]
fn test_contracts_are_scoped_per_month() {
    let store: Store = Store::open_in_memory().unwrap();
    store
        .save_weekly_contract(USER, 2026, 1, &part_time_contract())
        .unwrap();

    assert!(store.load_weekly_contract(USER, 2026, 2).unwrap().is_none());
    assert!(store.load_weekly_contract(USER, 2025, 1).unwrap().is_none());
}

#[test]
fn test_daily_log_round_trip_recomputes_flags() {
    let store: Store = Store::open_in_memory().unwrap();
    let entry: DailyLogEntry = DailyLogEntry::new(
        date!(2026 - 01 - 05),
        TimeSegment::regular(String::from("09:00"), String::from("12:00")),
        TimeSegment::regular(String::from("13:00"), String::from("17:30")),
        true,
    );

    store.save_daily_log(USER, &entry).unwrap();

    let loaded: Vec<DailyLogEntry> = store.load_daily_logs_for_month(USER, 2026, 1).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0], entry);
    assert!(loaded[0].has_inputs);
    assert_eq!(loaded[0].date, date!(2026 - 01 - 05));
}

#[test]
fn test_daily_log_save_is_an_upsert() {
    let store: Store = Store::open_in_memory().unwrap();
    let first: DailyLogEntry = DailyLogEntry::new(
        date!(2026 - 01 - 05),
        TimeSegment::regular(String::from("09:00"), String::from("12:00")),
        TimeSegment::default(),
        true,
    );
    store.save_daily_log(USER, &first).unwrap();

    let second: DailyLogEntry = DailyLogEntry::new(
        date!(2026 - 01 - 05),
        TimeSegment::regular(String::from("08:30"), String::from("12:00")),
        TimeSegment::absence(EntryType::Sick),
        true,
    );
    store.save_daily_log(USER, &second).unwrap();

    let loaded: Vec<DailyLogEntry> = store.load_daily_logs_for_month(USER, 2026, 1).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].morning.start, "08:30");
    assert_eq!(loaded[0].afternoon.entry_type, EntryType::Sick);
}

#[test]
fn test_daily_logs_filtered_by_month_and_ordered() {
    let store: Store = Store::open_in_memory().unwrap();
    for date in [
        date!(2026 - 01 - 09),
        date!(2026 - 01 - 05),
        date!(2026 - 02 - 02),
    ] {
        let entry: DailyLogEntry = DailyLogEntry::new(
            date,
            TimeSegment::regular(String::from("09:00"), String::from("12:00")),
            TimeSegment::default(),
            true,
        );
        store.save_daily_log(USER, &entry).unwrap();
    }

    let january: Vec<DailyLogEntry> = store.load_daily_logs_for_month(USER, 2026, 1).unwrap();
    assert_eq!(january.len(), 2);
    assert_eq!(january[0].date_key, "2026-01-05");
    assert_eq!(january[1].date_key, "2026-01-09");
}

#[test]
fn test_daily_logs_are_scoped_per_user() {
    let store: Store = Store::open_in_memory().unwrap();
    let entry: DailyLogEntry = DailyLogEntry::new(
        date!(2026 - 01 - 05),
        TimeSegment::regular(String::from("09:00"), String::from("12:00")),
        TimeSegment::default(),
        true,
    );
    store.save_daily_log(USER, &entry).unwrap();

    assert!(store.load_daily_logs_for_month(2, 2026, 1).unwrap().is_empty());
}

#[test]
fn test_vacation_round_trip_with_status_and_comment() {
    let mut store: Store = Store::open_in_memory().unwrap();
    let vacations: Vec<VacationDay> = vec![
        VacationDay::selected("2026-01-05"),
        VacationDay {
            date_key: String::from("2026-01-06"),
            status: VacationStatus::Approved,
            admin_comment: Some(String::from("enjoy")),
        },
    ];

    store
        .save_vacations_for_month(USER, 2026, 1, &vacations)
        .unwrap();

    let loaded: Vec<VacationDay> = store.load_vacations_for_month(USER, 2026, 1).unwrap();
    assert_eq!(loaded, vacations);
}

#[test]
fn test_save_vacations_replaces_the_month() {
    let mut store: Store = Store::open_in_memory().unwrap();
    store
        .save_vacations_for_month(
            USER,
            2026,
            1,
            &[
                VacationDay::selected("2026-01-05"),
                VacationDay::selected("2026-01-06"),
            ],
        )
        .unwrap();

    // Saving a smaller set deletes the rows no longer present.
    store
        .save_vacations_for_month(USER, 2026, 1, &[VacationDay::selected("2026-01-06")])
        .unwrap();

    let loaded: Vec<VacationDay> = store.load_vacations_for_month(USER, 2026, 1).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].date_key, "2026-01-06");
}

#[test]
fn test_save_vacations_leaves_other_months_alone() {
    let mut store: Store = Store::open_in_memory().unwrap();
    store
        .save_vacations_for_month(USER, 2026, 3, &[VacationDay::selected("2026-03-02")])
        .unwrap();

    store
        .save_vacations_for_month(USER, 2026, 1, &[VacationDay::selected("2026-01-05")])
        .unwrap();

    let march: Vec<VacationDay> = store.load_vacations_for_month(USER, 2026, 3).unwrap();
    assert_eq!(march.len(), 1);
    assert_eq!(march[0].date_key, "2026-03-02");
}

#[test]
fn test_load_vacations_for_year_spans_months() {
    let mut store: Store = Store::open_in_memory().unwrap();
    store
        .save_vacations_for_month(USER, 2026, 1, &[VacationDay::selected("2026-01-05")])
        .unwrap();
    store
        .save_vacations_for_month(USER, 2026, 3, &[VacationDay::selected("2026-03-02")])
        .unwrap();
    store
        .save_vacations_for_month(USER, 2025, 6, &[VacationDay::selected("2025-06-02")])
        .unwrap();

    let year: Vec<VacationDay> = store.load_vacations_for_year(USER, 2026).unwrap();
    assert_eq!(year.len(), 2);
    assert_eq!(year[0].date_key, "2026-01-05");
    assert_eq!(year[1].date_key, "2026-03-02");
}
