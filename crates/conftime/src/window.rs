//! Session-window resolution.
//!
//! The schedule only records start times. A session runs until the next session
//! on the same day starts; the last session of a day runs for
//! [`DEFAULT_SESSION_LENGTH`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::ConferenceCalendar;
use crate::session::{sessions_on_day, Session};

/// Length assumed for the last session of a day, or for a session that cannot
/// be located in the schedule.
pub const DEFAULT_SESSION_LENGTH: Duration = Duration::hours(1);

/// The half-open interval `[start, end)` a session occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl SessionWindow {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// `start <= instant < end`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Effective duration of `target` within `sessions`.
///
/// `sessions` is the full, unfiltered schedule. Sessions on the target's day
/// are ordered by start time; the target lasts until the next one starts.
/// Falls back to [`DEFAULT_SESSION_LENGTH`] when the target is the day's last
/// session, is missing from `sessions`, or either instant cannot be formed.
pub fn session_duration(
    target: &Session,
    sessions: &[Session],
    calendar: &ConferenceCalendar,
) -> Duration {
    let day = sessions_on_day(sessions, target.day);

    let Some(index) = day.iter().position(|(s, _)| s.id == target.id) else {
        return DEFAULT_SESSION_LENGTH;
    };
    let Some(&(_, next_start)) = day.get(index + 1) else {
        return DEFAULT_SESSION_LENGTH;
    };

    match (
        session_start(target, calendar),
        calendar.instant(target.day, next_start),
    ) {
        (Some(start), Some(next)) => next - start,
        _ => DEFAULT_SESSION_LENGTH,
    }
}

/// The `[start, end)` window of `target`.
///
/// Returns `None` when the start instant cannot be formed: the start time is
/// malformed, or the session's day is not in the calendar.
pub fn resolve_window(
    target: &Session,
    sessions: &[Session],
    calendar: &ConferenceCalendar,
) -> Option<SessionWindow> {
    let start = session_start(target, calendar)?;
    Some(SessionWindow {
        start,
        end: start + session_duration(target, sessions, calendar),
    })
}

/// The UTC instant `session` starts at.
pub fn session_start(session: &Session, calendar: &ConferenceCalendar) -> Option<DateTime<Utc>> {
    calendar.instant(session.day, session.start()?)
}
