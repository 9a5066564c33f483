//! Tests for current-session and current-day classification.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use conftime::calendar::ConferenceCalendar;
use conftime::classifier::{DayStatus, Schedule, SessionStatus, FALLBACK_DAY};
use conftime::clock::{Clock, FixedClock};
use conftime::session::{Session, SessionKind};

fn calendar() -> ConferenceCalendar {
    let days = BTreeMap::from([
        (1, NaiveDate::from_ymd_opt(2025, 9, 5).unwrap()),
        (2, NaiveDate::from_ymd_opt(2025, 9, 6).unwrap()),
        (3, NaiveDate::from_ymd_opt(2025, 9, 7).unwrap()),
    ]);
    ConferenceCalendar::new(chrono_tz::UTC, days).unwrap()
}

fn schedule() -> Schedule {
    Schedule::new(
        calendar(),
        vec![
            Session::new(1, 1, "09:00"),
            Session::new(2, 1, "10:30"),
            Session::new(3, 1, "13:00"),
            Session::new(4, 2, "09:00"),
            Session::new(5, 2, "12:00").with_kind(SessionKind::Lunch),
        ],
    )
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

// ---------------------------------------------------------------------------
// Current session
// ---------------------------------------------------------------------------

#[test]
fn mid_session_is_current() {
    let schedule = schedule();
    let view = schedule.at(at(2025, 9, 5, 9, 45));

    let current = view.current_session().expect("09:00 session should be current");
    assert_eq!(current.id, 1);
    assert_eq!(
        schedule.window(current).unwrap().end,
        at(2025, 9, 5, 10, 30)
    );
}

#[test]
fn last_session_runs_one_hour() {
    let schedule = schedule();

    let view = schedule.at(at(2025, 9, 5, 13, 0));
    let current = view.current_session().unwrap();
    assert_eq!(current.id, 3);
    assert_eq!(schedule.window(current).unwrap().end, at(2025, 9, 5, 14, 0));

    assert!(schedule.at(at(2025, 9, 5, 14, 0)).current_session().is_none());
}

#[test]
fn boundary_belongs_to_next_session() {
    let schedule = schedule();
    let view = schedule.at(at(2025, 9, 5, 10, 30));

    assert_eq!(view.current_session().unwrap().id, 2);
    assert!(!view.is_session_current(&schedule.sessions()[0]));
}

#[test]
fn before_first_session_nothing_is_current() {
    let schedule = schedule();
    let view = schedule.at(at(2025, 9, 5, 8, 0));

    assert!(view.current_session().is_none());
    assert!(!view.is_session_past(&schedule.sessions()[0]));
}

#[test]
fn tied_start_times_resolve_to_one_session() {
    let schedule = Schedule::new(
        calendar(),
        vec![
            Session::new(7, 1, "09:30"),
            Session::new(8, 1, "09:00"),
            Session::new(9, 1, "09:00"),
        ],
    );
    // Ordered by start: 8 (09:00), 9 (09:00), 7 (09:30). Session 8 ends where
    // session 9 starts, so its window is empty.
    let view = schedule.at(at(2025, 9, 5, 9, 10));
    assert_eq!(view.current_session().unwrap().id, 9);
    assert!(!view.is_session_current(&schedule.sessions()[1]));
}

// ---------------------------------------------------------------------------
// Past vs current
// ---------------------------------------------------------------------------

#[test]
fn session_is_past_as_soon_as_it_starts() {
    let schedule = schedule();
    let first = &schedule.sessions()[0];

    let at_start = schedule.at(at(2025, 9, 5, 9, 0));
    assert!(!at_start.is_session_past(first), "past is strictly after start");
    assert!(at_start.is_session_current(first));

    let one_minute_in = schedule.at(at(2025, 9, 5, 9, 1));
    assert!(one_minute_in.is_session_past(first));
    assert!(one_minute_in.is_session_current(first));
}

#[test]
fn session_status_prefers_current() {
    let schedule = schedule();
    let view = schedule.at(at(2025, 9, 5, 11, 0));
    let sessions = schedule.sessions();

    assert_eq!(view.session_status(&sessions[0]), SessionStatus::Past);
    assert_eq!(view.session_status(&sessions[1]), SessionStatus::Current);
    assert_eq!(view.session_status(&sessions[2]), SessionStatus::Upcoming);
    assert_eq!(view.session_status(&sessions[3]), SessionStatus::Upcoming);
}

#[test]
fn malformed_session_is_neither_past_nor_current() {
    let schedule = Schedule::new(calendar(), vec![Session::new(1, 1, "25:99")]);
    let view = schedule.at(at(2025, 9, 6, 12, 0));
    let broken = &schedule.sessions()[0];

    assert!(!view.is_session_past(broken));
    assert!(!view.is_session_current(broken));
    assert!(view.current_session().is_none());
}

// ---------------------------------------------------------------------------
// Days
// ---------------------------------------------------------------------------

#[test]
fn current_day_follows_calendar() {
    let schedule = schedule();

    assert_eq!(schedule.at(at(2025, 9, 5, 0, 0)).current_day(), 1);
    assert_eq!(schedule.at(at(2025, 9, 6, 23, 59)).current_day(), 2);
    assert_eq!(schedule.at(at(2025, 9, 7, 12, 0)).current_day(), 3);
}

#[test]
fn outside_conference_day_falls_back_but_is_not_current() {
    let schedule = schedule();
    let view = schedule.at(at(2025, 9, 8, 10, 0));

    assert_eq!(view.current_day(), FALLBACK_DAY);
    for day in 1..=3 {
        assert!(!view.is_day_current(day), "day {day} must not be current");
    }
}

#[test]
fn before_conference_nothing_is_current_or_past() {
    let schedule = schedule();
    let view = schedule.at(at(2025, 9, 1, 10, 0));

    assert_eq!(view.current_day(), 1);
    for day in 1..=3 {
        assert!(!view.is_day_current(day));
        assert!(!view.is_day_past(day));
        assert_eq!(view.day_status(day), DayStatus::Upcoming);
    }
}

#[test]
fn day_status_during_conference() {
    let schedule = schedule();
    let view = schedule.at(at(2025, 9, 6, 15, 0));

    assert!(view.is_day_past(1));
    assert!(view.is_day_current(2));
    assert!(!view.is_day_past(2));
    assert_eq!(view.day_status(1), DayStatus::Past);
    assert_eq!(view.day_status(2), DayStatus::Current);
    assert_eq!(view.day_status(3), DayStatus::Upcoming);
}

#[test]
fn current_day_uses_conference_timezone() {
    let days = BTreeMap::from([
        (1, NaiveDate::from_ymd_opt(2025, 9, 5).unwrap()),
        (2, NaiveDate::from_ymd_opt(2025, 9, 6).unwrap()),
    ]);
    let tokyo = ConferenceCalendar::new(chrono_tz::Asia::Tokyo, days).unwrap();
    let schedule = Schedule::new(tokyo, vec![Session::new(1, 2, "09:00")]);

    // 2025-09-06 00:30 UTC is 09:30 on day 2 in Tokyo.
    let view = schedule.at(at(2025, 9, 6, 0, 30));
    assert_eq!(view.current_day(), 2);
    assert_eq!(view.current_session().unwrap().id, 1);
}

// ---------------------------------------------------------------------------
// Clock injection
// ---------------------------------------------------------------------------

#[test]
fn observe_reads_the_clock_once() {
    let schedule = schedule();
    let clock = FixedClock(at(2025, 9, 6, 9, 30));

    let view = schedule.observe(&clock);
    assert_eq!(view.now(), clock.now());
    assert_eq!(view.current_session().unwrap().id, 4);
    assert_eq!(view.current_day(), 2);
}

#[test]
fn boxed_clock_can_be_swapped() {
    let schedule = schedule();
    let clocks: Vec<Box<dyn Clock>> = vec![
        Box::new(FixedClock(at(2025, 9, 5, 9, 0))),
        Box::new(FixedClock(at(2025, 9, 6, 12, 30))),
    ];

    let ids: Vec<Option<i64>> = clocks
        .iter()
        .map(|c| schedule.observe(c).current_session().map(|s| s.id))
        .collect();
    assert_eq!(ids, vec![Some(1), Some(5)]);
}
