//! Conference calendar -- maps conference day numbers to calendar dates.
//!
//! Session start times are wall-clock times in the conference's own timezone.
//! The calendar combines a day number and a time-of-day into a UTC instant,
//! and maps an instant back to the local date it falls on.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{ConfError, Result};

/// Serialized form of a conference calendar, as found in config files.
///
/// ```json
/// { "timezone": "Asia/Tokyo", "days": { "1": "2025-09-05", "2": "2025-09-06" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// IANA timezone the schedule's wall-clock times are expressed in.
    pub timezone: String,
    /// Day number → ISO date (`YYYY-MM-DD`).
    pub days: BTreeMap<u8, String>,
}

/// A validated day → date mapping in a fixed timezone.
///
/// Invariants (checked by [`ConferenceCalendar::new`]):
/// - at least one day is configured
/// - days are numbered 1, 2, 3, ... with no gaps
/// - dates are strictly ascending with the day number
#[derive(Debug, Clone, PartialEq)]
pub struct ConferenceCalendar {
    timezone: Tz,
    days: BTreeMap<u8, NaiveDate>,
}

impl ConferenceCalendar {
    /// Build a calendar from an already-parsed day → date mapping.
    ///
    /// # Errors
    /// Returns `ConfError::InvalidCalendar` if the mapping is empty, the day
    /// numbers are not contiguous from 1, or the dates do not ascend.
    pub fn new(timezone: Tz, days: BTreeMap<u8, NaiveDate>) -> Result<Self> {
        if days.is_empty() {
            return Err(ConfError::InvalidCalendar(
                "at least one conference day is required".to_string(),
            ));
        }

        let mut previous: Option<NaiveDate> = None;
        for (expected, (&day, &date)) in (1u8..).zip(days.iter()) {
            if day != expected {
                return Err(ConfError::InvalidCalendar(format!(
                    "days must be numbered contiguously from 1, found day {} where day {} was expected",
                    day, expected
                )));
            }
            if let Some(prev) = previous {
                if date <= prev {
                    return Err(ConfError::InvalidCalendar(format!(
                        "day {} ({}) does not come after the previous day ({})",
                        day, date, prev
                    )));
                }
            }
            previous = Some(date);
        }

        Ok(Self { timezone, days })
    }

    /// Parse and validate a [`CalendarConfig`].
    ///
    /// # Errors
    /// Returns `ConfError::InvalidTimezone` for an unknown IANA name,
    /// `ConfError::InvalidDate` for a date that is not `YYYY-MM-DD`, and any
    /// error [`ConferenceCalendar::new`] reports.
    pub fn from_config(config: &CalendarConfig) -> Result<Self> {
        let timezone: Tz = config
            .timezone
            .parse()
            .map_err(|_| ConfError::InvalidTimezone(config.timezone.clone()))?;

        let days = config
            .days
            .iter()
            .map(|(&day, value)| {
                NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .map(|date| (day, date))
                    .map_err(|_| ConfError::InvalidDate {
                        day,
                        value: value.clone(),
                    })
            })
            .collect::<Result<BTreeMap<u8, NaiveDate>>>()?;

        Self::new(timezone, days)
    }

    /// The timezone session start times are expressed in.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// The calendar date of a conference day, if that day is configured.
    pub fn date_for(&self, day: u8) -> Option<NaiveDate> {
        self.days.get(&day).copied()
    }

    /// The conference day falling on `date`, if any.
    pub fn day_for_date(&self, date: NaiveDate) -> Option<u8> {
        self.days
            .iter()
            .find(|(_, &d)| d == date)
            .map(|(&day, _)| day)
    }

    /// The lowest configured day number (always 1 for a validated calendar).
    pub fn first_day(&self) -> u8 {
        self.days.keys().next().copied().unwrap_or(1)
    }

    /// Date of the conference's opening day.
    pub fn first_date(&self) -> NaiveDate {
        self.days.values().next().copied().unwrap_or(NaiveDate::MIN)
    }

    /// Date of the conference's closing day.
    pub fn last_date(&self) -> NaiveDate {
        self.days.values().next_back().copied().unwrap_or(NaiveDate::MIN)
    }

    /// Iterate over `(day, date)` pairs in ascending order.
    pub fn days(&self) -> impl Iterator<Item = (u8, NaiveDate)> + '_ {
        self.days.iter().map(|(&day, &date)| (day, date))
    }

    /// The local calendar date `instant` falls on in the conference timezone.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.timezone).date_naive()
    }

    /// Combine a conference day and a wall-clock time into a UTC instant.
    ///
    /// Returns `None` when the day is not configured or the local time does not
    /// exist (falls into a DST gap). For ambiguous local times (DST fold) the
    /// earlier instant is used.
    pub fn instant(&self, day: u8, time: NaiveTime) -> Option<DateTime<Utc>> {
        let date = self.date_for(day)?;
        self.timezone
            .from_local_datetime(&date.and_time(time))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Convert a naive local datetime (conference timezone) into UTC.
    pub fn localize(&self, local: chrono::NaiveDateTime) -> Option<DateTime<Utc>> {
        self.timezone
            .from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }
}
