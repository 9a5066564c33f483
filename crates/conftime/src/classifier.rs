//! Current-session and current-day classification.
//!
//! A [`Schedule`] pairs the calendar with the session list. Questions about
//! "now" are asked through a [`ScheduleView`], which is bound to a single
//! reference instant so that every answer in one evaluation agrees.
//!
//! Nothing here fails: malformed sessions are never current and never past,
//! and an instant outside the conference resolves to day 1.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::ConferenceCalendar;
use crate::clock::Clock;
use crate::session::Session;
use crate::window::{resolve_window, session_start, SessionWindow};

/// Day reported when the reference instant falls on no conference day.
pub const FALLBACK_DAY: u8 = 1;

/// Display classification of a session relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Upcoming,
    Current,
    /// Started and no longer current.
    Past,
}

/// Display classification of a conference day relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Upcoming,
    Current,
    Past,
}

/// The conference calendar together with its full session list.
#[derive(Debug, Clone)]
pub struct Schedule {
    calendar: ConferenceCalendar,
    sessions: Vec<Session>,
}

impl Schedule {
    /// Pair a calendar with the full, unfiltered session list.
    pub fn new(calendar: ConferenceCalendar, sessions: Vec<Session>) -> Self {
        Self { calendar, sessions }
    }

    /// The conference calendar.
    pub fn calendar(&self) -> &ConferenceCalendar {
        &self.calendar
    }

    /// All sessions, in input order.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Look up a session by id.
    pub fn session(&self, id: i64) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Window of `session` within this schedule.
    pub fn window(&self, session: &Session) -> Option<SessionWindow> {
        resolve_window(session, &self.sessions, &self.calendar)
    }

    /// View the schedule at a fixed reference instant.
    pub fn at(&self, now: DateTime<Utc>) -> ScheduleView<'_> {
        ScheduleView {
            schedule: self,
            now,
        }
    }

    /// View the schedule at the instant `clock` reports, read exactly once.
    pub fn observe<C: Clock>(&self, clock: &C) -> ScheduleView<'_> {
        self.at(clock.now())
    }
}

/// A [`Schedule`] evaluated at one reference instant.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleView<'a> {
    schedule: &'a Schedule,
    now: DateTime<Utc>,
}

impl<'a> ScheduleView<'a> {
    /// The reference instant this view answers for.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// The schedule being viewed.
    pub fn schedule(&self) -> &'a Schedule {
        self.schedule
    }

    /// The session whose window contains "now".
    ///
    /// If overlapping data puts several sessions in range, the earliest-starting
    /// one wins; ties go to the session listed first.
    pub fn current_session(&self) -> Option<&'a Session> {
        let schedule = self.schedule;
        schedule
            .sessions
            .iter()
            .filter_map(|s| schedule.window(s).map(|w| (s, w)))
            .filter(|(_, w)| w.contains(self.now))
            .min_by_key(|(_, w)| w.start)
            .map(|(s, _)| s)
    }

    /// The conference day "now" falls on, or [`FALLBACK_DAY`] outside the conference.
    pub fn current_day(&self) -> u8 {
        let calendar = &self.schedule.calendar;
        calendar
            .day_for_date(calendar.local_date(self.now))
            .unwrap_or(FALLBACK_DAY)
    }

    /// True once `session` has started.
    ///
    /// This compares against the start instant only: a session in progress is
    /// already "past" here while [`is_session_current`](Self::is_session_current)
    /// is also true.
    pub fn is_session_past(&self, session: &Session) -> bool {
        session_start(session, &self.schedule.calendar).is_some_and(|start| self.now > start)
    }

    /// True while "now" lies in the session's `[start, end)` window.
    pub fn is_session_current(&self, session: &Session) -> bool {
        self.schedule
            .window(session)
            .is_some_and(|w| w.contains(self.now))
    }

    /// True if the current day (with fallback) is later than `day`.
    pub fn is_day_past(&self, day: u8) -> bool {
        self.current_day() > day
    }

    /// True if `day` is today. Always false outside the conference's date span,
    /// whatever [`current_day`](Self::current_day) falls back to.
    pub fn is_day_current(&self, day: u8) -> bool {
        let calendar = &self.schedule.calendar;
        let today = calendar.local_date(self.now);
        let in_range = calendar.first_date() <= today && today <= calendar.last_date();
        in_range && self.current_day() == day
    }

    /// Three-way display status; a running session is `Current`, not `Past`.
    pub fn session_status(&self, session: &Session) -> SessionStatus {
        if self.is_session_current(session) {
            SessionStatus::Current
        } else if self.is_session_past(session) {
            SessionStatus::Past
        } else {
            SessionStatus::Upcoming
        }
    }

    /// Three-way display status for a day tab.
    pub fn day_status(&self, day: u8) -> DayStatus {
        if self.is_day_current(day) {
            DayStatus::Current
        } else if self.is_day_past(day) {
            DayStatus::Past
        } else {
            DayStatus::Upcoming
        }
    }
}
