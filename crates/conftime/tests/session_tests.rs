//! Tests for session records: parsing, kinds, and grouping.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use conftime::calendar::ConferenceCalendar;
use conftime::classifier::Schedule;
use conftime::session::{parse_time_of_day, sessions_on_day, sub_sessions, top_level, Session, SessionKind};

#[test]
fn parses_minutes_and_seconds() {
    assert_eq!(parse_time_of_day("09:05"), NaiveTime::from_hms_opt(9, 5, 0));
    assert_eq!(parse_time_of_day(" 13:00:30 "), NaiveTime::from_hms_opt(13, 0, 30));
    assert_eq!(parse_time_of_day("24:00"), None);
    assert_eq!(parse_time_of_day(""), None);
}

#[test]
fn deserializes_database_rows() {
    let json = r#"[
        {"id": 1, "day": 1, "start_time": "09:00", "type": "talk", "topic": "Keynote",
         "speaker": "Mika", "room": "Hall A", "tags": ["opening"]},
        {"id": 2, "day": 1, "start_time": "12:00", "type": "lunch"},
        {"id": 3, "day": 1, "start_time": "15:00", "type": "workshop"},
        {"id": 4, "day": 1, "start_time": "16:00"}
    ]"#;
    let sessions: Vec<Session> = serde_json::from_str(json).unwrap();

    assert_eq!(sessions[0].kind, SessionKind::Talk);
    assert_eq!(sessions[0].tags, vec!["opening".to_string()]);
    assert_eq!(sessions[1].kind, SessionKind::Lunch);
    assert!(sessions[1].kind.is_marker());
    assert_eq!(sessions[2].kind, SessionKind::Talk, "unknown types are talks");
    assert_eq!(sessions[3].kind, SessionKind::Talk);
    assert!(!sessions[3].kind.is_marker());
    assert_eq!(serde_json::to_string(&SessionKind::Talk).unwrap(), r#""talk""#);
    assert_eq!(serde_json::to_string(&SessionKind::Dinner).unwrap(), r#""dinner""#);
}

#[test]
fn day_listing_is_sorted_and_skips_malformed() {
    let sessions = vec![
        Session::new(1, 1, "13:00"),
        Session::new(2, 2, "08:00"),
        Session::new(3, 1, "??"),
        Session::new(4, 1, "09:00"),
    ];

    let ids: Vec<i64> = sessions_on_day(&sessions, 1).iter().map(|(s, _)| s.id).collect();
    assert_eq!(ids, vec![4, 1]);
}

#[test]
fn groups_sub_sessions_under_parent() {
    let sessions = vec![
        Session::new(1, 1, "13:00").with_topic("Lightning talks"),
        Session::new(2, 1, "13:20").with_parent(1),
        Session::new(3, 1, "13:05").with_parent(1),
        Session::new(4, 1, "14:00").with_kind(SessionKind::Break),
    ];

    let parents: Vec<i64> = top_level(&sessions).iter().map(|s| s.id).collect();
    assert_eq!(parents, vec![1, 4]);

    let children: Vec<i64> = sub_sessions(&sessions, 1).iter().map(|s| s.id).collect();
    assert_eq!(children, vec![3, 2]);
    assert!(sub_sessions(&sessions, 4).is_empty());
}

#[test]
fn null_columns_read_as_defaults() {
    let json = r#"[
        {"id": 1, "day": 1, "start_time": "09:00", "type": null, "topic": null,
         "speaker": null, "room": null, "tags": null, "parent_id": null},
        {"id": 2, "day": 1, "start_time": null, "topic": "Time TBA"}
    ]"#;
    let sessions: Vec<Session> = serde_json::from_str(json).unwrap();

    assert_eq!(sessions[0].kind, SessionKind::Talk);
    assert_eq!(sessions[0].topic, "");
    assert!(sessions[0].tags.is_empty());
    assert!(sessions[0].speaker.is_none());
    assert!(sessions[0].start().is_some());

    assert_eq!(sessions[1].start_time, "");
    assert!(sessions[1].start().is_none());
}

#[test]
fn null_start_time_is_never_current_or_past() {
    let json = r#"[
        {"id": 1, "day": 1, "start_time": null},
        {"id": 2, "day": 1, "start_time": "09:00"}
    ]"#;
    let sessions: Vec<Session> = serde_json::from_str(json).unwrap();
    let days = BTreeMap::from([(1, NaiveDate::from_ymd_opt(2025, 9, 5).unwrap())]);
    let calendar = ConferenceCalendar::new(chrono_tz::UTC, days).unwrap();
    let schedule = Schedule::new(calendar, sessions);

    let view = schedule.at(Utc.with_ymd_and_hms(2025, 9, 5, 9, 30, 0).unwrap());
    let undated = &schedule.sessions()[0];

    assert!(schedule.window(undated).is_none());
    assert!(!view.is_session_current(undated));
    assert!(!view.is_session_past(undated));
    assert_eq!(view.current_session().map(|s| s.id), Some(2));
}
