use chrono::NaiveDate;
use mindgarden_core::db::open_db_in_memory;
use mindgarden_core::{Mood, MoodLedgerService, MoodRepository, SqliteMoodLedger};

#[test]
fn record_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMoodLedger::try_new(&conn).unwrap();

    let date = day(2024, 1, 15);
    repo.record(date, Mood::Good).unwrap();

    assert_eq!(repo.get(date).unwrap(), Some(Mood::Good));
    assert_eq!(repo.get(day(2024, 1, 16)).unwrap(), None);
}

#[test]
fn recording_same_date_overwrites_previous_mood() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMoodLedger::try_new(&conn).unwrap();

    let date = day(2024, 1, 15);
    repo.record(date, Mood::Bad).unwrap();
    repo.record(date, Mood::Excellent).unwrap();

    assert_eq!(repo.get(date).unwrap(), Some(Mood::Excellent));
    assert_eq!(repo.history().unwrap().len(), 1);
}

#[test]
fn history_returns_all_recorded_dates() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMoodLedger::try_new(&conn).unwrap();

    repo.record(day(2024, 1, 15), Mood::Good).unwrap();
    repo.record(day(2024, 1, 16), Mood::Okay).unwrap();
    repo.record(day(2024, 2, 1), Mood::Terrible).unwrap();

    let history = repo.history().unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history.get(&day(2024, 1, 16)), Some(&Mood::Okay));
}

#[test]
fn stored_document_keys_dates_as_iso_strings() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMoodLedger::try_new(&conn).unwrap();
    repo.record(day(2024, 1, 15), Mood::Good).unwrap();

    let raw: String = conn
        .query_row(
            "SELECT value FROM app_state WHERE key = 'moodHistory';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(parsed["2024-01-15"], "good");
}

#[test]
fn previously_stored_document_decodes_as_is() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO app_state (key, value, version, updated_at)
         VALUES ('moodHistory', ?1, 2, 0);",
        [r#"{"2024-03-01":"terrible","2024-03-02":"excellent"}"#],
    )
    .unwrap();

    let repo = SqliteMoodLedger::try_new(&conn).unwrap();
    assert_eq!(repo.get(day(2024, 3, 1)).unwrap(), Some(Mood::Terrible));
    assert_eq!(repo.get(day(2024, 3, 2)).unwrap(), Some(Mood::Excellent));
}

#[test]
fn service_records_today_under_the_returned_date() {
    let conn = open_db_in_memory().unwrap();
    let service = MoodLedgerService::new(SqliteMoodLedger::try_new(&conn).unwrap());

    let today = service.record_today(Mood::Okay).unwrap();
    assert_eq!(service.mood_on(today).unwrap(), Some(Mood::Okay));
}

#[test]
fn month_view_pairs_days_with_recorded_moods() {
    let conn = open_db_in_memory().unwrap();
    let service = MoodLedgerService::new(SqliteMoodLedger::try_new(&conn).unwrap());

    service.record_on(day(2024, 2, 1), Mood::Good).unwrap();
    service.record_on(day(2024, 2, 29), Mood::Bad).unwrap();
    service.record_on(day(2024, 3, 1), Mood::Excellent).unwrap();

    let grid = service.month_view(2024, 2).unwrap().unwrap();
    assert_eq!(grid.days_in_month(), 29);
    // 2024-02-01 fell on a Thursday.
    assert_eq!(grid.leading_blanks(), 3);
    assert_eq!(grid.mood_on(1), Some(Mood::Good));
    assert_eq!(grid.mood_on(29), Some(Mood::Bad));
    assert_eq!(grid.mood_on(2), None);

    let marked = grid.days().filter(|(_, mood)| mood.is_some()).count();
    assert_eq!(marked, 2);
}

#[test]
fn month_view_rejects_out_of_range_month() {
    let conn = open_db_in_memory().unwrap();
    let service = MoodLedgerService::new(SqliteMoodLedger::try_new(&conn).unwrap());

    assert!(service.month_view(2024, 0).unwrap().is_none());
    assert!(service.month_view(2024, 13).unwrap().is_none());
}

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
