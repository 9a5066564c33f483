//! Session records as read from the schedule.
//!
//! The classifier only looks at `id`, `day`, `start_time` and `kind`; the other
//! fields ride along for display.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize};

/// What a schedule entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Break,
    Lunch,
    Dinner,
    /// An ordinary talk, workshop or panel. Unknown tags land here.
    #[default]
    #[serde(other)]
    Talk,
}

impl SessionKind {
    /// Breaks and meals are schedule markers, not sessions attendees pick.
    pub fn is_marker(self) -> bool {
        !matches!(self, SessionKind::Talk)
    }
}

/// One scheduled conference activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub day: u8,
    /// Wall-clock start, `HH:MM` or `HH:MM:SS`. A null column reads as empty,
    /// which never parses.
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_time: String,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub kind: SessionKind,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topic: String,
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

/// Nullable database columns: `null` reads as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Session {
    /// A bare talk with the given id, day and start time.
    pub fn new(id: i64, day: u8, start_time: impl Into<String>) -> Self {
        Self {
            id,
            day,
            start_time: start_time.into(),
            kind: SessionKind::Talk,
            parent_id: None,
            topic: String::new(),
            speaker: None,
            room: None,
            tags: Vec::new(),
        }
    }

    /// Set the entry's kind.
    pub fn with_kind(mut self, kind: SessionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Group this session under `parent_id`.
    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set the display topic.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    /// Parsed start time, or `None` if `start_time` is malformed.
    pub fn start(&self) -> Option<NaiveTime> {
        parse_time_of_day(&self.start_time)
    }
}

/// Parse `HH:MM` or `HH:MM:SS`. Surrounding whitespace is ignored.
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

/// Sessions on `day` with a parseable start time, sorted by start time.
///
/// The sort is stable, so sessions sharing a start time keep their input order.
pub fn sessions_on_day(sessions: &[Session], day: u8) -> Vec<(&Session, NaiveTime)> {
    let mut on_day: Vec<(&Session, NaiveTime)> = sessions
        .iter()
        .filter(|s| s.day == day)
        .filter_map(|s| s.start().map(|t| (s, t)))
        .collect();
    on_day.sort_by_key(|&(_, t)| t);
    on_day
}

/// Sessions without a parent, in input order.
pub fn top_level(sessions: &[Session]) -> Vec<&Session> {
    sessions.iter().filter(|s| s.parent_id.is_none()).collect()
}

/// Sessions grouped under `parent_id`, sorted by start time.
pub fn sub_sessions(sessions: &[Session], parent_id: i64) -> Vec<&Session> {
    let mut children: Vec<&Session> = sessions
        .iter()
        .filter(|s| s.parent_id == Some(parent_id))
        .collect();
    children.sort_by_key(|s| s.start());
    children
}
