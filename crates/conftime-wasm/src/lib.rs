//! WASM bindings for conftime.
//!
//! Exposes the schedule clock and booth-completion tracking to the web UI via
//! `wasm-bindgen`. Sessions and the calendar are passed as JSON strings; the
//! reference time is an ISO 8601 string chosen by the caller, so "time travel"
//! in the UI is just a different `now` argument.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p conftime-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/src/wasm/ \
//!   target/wasm32-unknown-unknown/release/conftime_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use conftime::calendar::{CalendarConfig, ConferenceCalendar};
use conftime::{AdminLevel, CompletionTracker, Progress, Schedule, Session, SessionStatus};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SessionStateDto {
    id: i64,
    status: SessionStatus,
    past: bool,
    current: bool,
    start: Option<String>,
    end: Option<String>,
}

#[derive(Serialize)]
struct DayStateDto {
    day: u8,
    date: String,
    past: bool,
    current: bool,
}

#[derive(Serialize)]
struct NowDto<'a> {
    current_day: u8,
    current_session: Option<&'a Session>,
    sessions: Vec<SessionStateDto>,
    days: Vec<DayStateDto>,
}

// ---------------------------------------------------------------------------
// Helpers: parse inputs
// ---------------------------------------------------------------------------

fn parse_calendar(json: &str) -> Result<ConferenceCalendar, String> {
    let config: CalendarConfig =
        serde_json::from_str(json).map_err(|e| format!("Invalid calendar JSON: {}", e))?;
    ConferenceCalendar::from_config(&config).map_err(|e| e.to_string())
}

fn parse_schedule(sessions_json: &str, calendar_json: &str) -> Result<Schedule, String> {
    let calendar = parse_calendar(calendar_json)?;
    let sessions: Vec<Session> = serde_json::from_str(sessions_json)
        .map_err(|e| format!("Invalid sessions JSON: {}", e))?;
    Ok(Schedule::new(calendar, sessions))
}

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts RFC 3339 (with offset, e.g. "2025-09-05T00:45:00Z") and naive local
/// time with or without seconds (e.g. "2025-09-05T09:45"), which is read in the
/// conference timezone.
fn parse_now(s: &str, calendar: &ConferenceCalendar) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|e| format!("Invalid datetime '{}': {}", s, e))?;
    calendar
        .localize(naive)
        .ok_or_else(|| format!("Datetime '{}' does not exist in the conference timezone", s))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// Plain-Rust implementations (testable off-wasm)
// ---------------------------------------------------------------------------

fn schedule_state_impl(
    sessions_json: &str,
    calendar_json: &str,
    now: &str,
) -> Result<String, String> {
    let schedule = parse_schedule(sessions_json, calendar_json)?;
    let view = schedule.at(parse_now(now, schedule.calendar())?);

    let sessions = schedule
        .sessions()
        .iter()
        .map(|s| {
            let window = schedule.window(s);
            SessionStateDto {
                id: s.id,
                status: view.session_status(s),
                past: view.is_session_past(s),
                current: view.is_session_current(s),
                start: window.map(|w| w.start.to_rfc3339()),
                end: window.map(|w| w.end.to_rfc3339()),
            }
        })
        .collect();

    let days = schedule
        .calendar()
        .days()
        .map(|(day, date)| DayStateDto {
            day,
            date: date.to_string(),
            past: view.is_day_past(day),
            current: view.is_day_current(day),
        })
        .collect();

    to_json(&NowDto {
        current_day: view.current_day(),
        current_session: view.current_session(),
        sessions,
        days,
    })
}

fn current_session_impl(
    sessions_json: &str,
    calendar_json: &str,
    now: &str,
) -> Result<String, String> {
    let schedule = parse_schedule(sessions_json, calendar_json)?;
    let view = schedule.at(parse_now(now, schedule.calendar())?);
    to_json(&view.current_session())
}

fn current_day_impl(calendar_json: &str, now: &str) -> Result<u8, String> {
    let schedule = Schedule::new(parse_calendar(calendar_json)?, Vec::new());
    let now = parse_now(now, schedule.calendar())?;
    Ok(schedule.at(now).current_day())
}

fn is_day_current_impl(calendar_json: &str, day: u8, now: &str) -> Result<bool, String> {
    let schedule = Schedule::new(parse_calendar(calendar_json)?, Vec::new());
    let now = parse_now(now, schedule.calendar())?;
    Ok(schedule.at(now).is_day_current(day))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Classify every session and day at `now` in one pass.
///
/// Returns a JSON object with `current_day`, `current_session` (or null),
/// `sessions` (`{id, status, past, current, start, end}`) and `days`
/// (`{day, date, past, current}`).
#[wasm_bindgen(js_name = "scheduleState")]
pub fn schedule_state(
    sessions_json: &str,
    calendar_json: &str,
    now: &str,
) -> Result<String, JsValue> {
    schedule_state_impl(sessions_json, calendar_json, now).map_err(|e| JsValue::from_str(&e))
}

/// The session running at `now` as JSON, or `"null"`.
#[wasm_bindgen(js_name = "currentSession")]
pub fn current_session(
    sessions_json: &str,
    calendar_json: &str,
    now: &str,
) -> Result<String, JsValue> {
    current_session_impl(sessions_json, calendar_json, now).map_err(|e| JsValue::from_str(&e))
}

/// The day tab to select at `now` (day 1 outside the conference).
#[wasm_bindgen(js_name = "currentDay")]
pub fn current_day(calendar_json: &str, now: &str) -> Result<u8, JsValue> {
    current_day_impl(calendar_json, now).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen(js_name = "isDayCurrent")]
pub fn is_day_current(calendar_json: &str, day: u8, now: &str) -> Result<bool, JsValue> {
    is_day_current_impl(calendar_json, day, now).map_err(|e| JsValue::from_str(&e))
}

/// Display label for a numeric admin level.
#[wasm_bindgen(js_name = "adminLabel")]
pub fn admin_label(level: i32) -> Result<String, JsValue> {
    AdminLevel::try_from(i64::from(level))
        .map(|l| l.label().to_string())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Completion tracker shared by every page that reports booth progress.
///
/// Create one per app session (or restore it with `fromJSON`) and route all
/// progress snapshots through it so each user is reported only once.
#[wasm_bindgen]
#[derive(Default)]
pub struct CompletionWatcher {
    tracker: CompletionTracker,
}

#[wasm_bindgen]
impl CompletionWatcher {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a snapshot; true means the completion webhook should be called now.
    pub fn record(&mut self, user: &str, visited: u32, total: u32) -> bool {
        self.tracker.record(user, Progress::new(visited, total))
    }

    #[wasm_bindgen(js_name = "isNotified")]
    pub fn is_notified(&self, user: &str) -> bool {
        self.tracker.is_notified(user)
    }

    #[wasm_bindgen(js_name = "toJSON")]
    pub fn to_json(&self) -> Result<String, JsValue> {
        to_json(&self.tracker).map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(js_name = "fromJSON")]
    pub fn from_json(json: &str) -> Result<CompletionWatcher, JsValue> {
        serde_json::from_str(json)
            .map(|tracker| CompletionWatcher { tracker })
            .map_err(|e| JsValue::from_str(&format!("Invalid tracker JSON: {}", e)))
    }
}
