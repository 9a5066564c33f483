//! # conftime
//!
//! Schedule clock for a conference companion app.
//!
//! Sessions are stored with a day number and a wall-clock start time only.
//! This crate turns that into the answers the app's screens need: how long a
//! session runs, which session and day are current, what is already past, and
//! when an attendee has just finished visiting every exhibition booth.
//!
//! ## Modules
//!
//! - [`calendar`] -- day number → date in the conference timezone
//! - [`session`] -- session records and start-time parsing
//! - [`window`] -- session end derived from the next session's start
//! - [`clock`] -- injected time sources
//! - [`classifier`] -- current session/day and past/current checks at one instant
//! - [`booth`] -- booths, secret phrases and visit records
//! - [`completion`] -- edge-triggered booth-tour completion
//! - [`notify`] -- completion reports and their delivery
//! - [`admin`] -- admin seniority levels
//! - [`error`] -- Error types

pub mod admin;
pub mod booth;
pub mod calendar;
pub mod classifier;
pub mod clock;
pub mod completion;
pub mod error;
pub mod notify;
pub mod session;
pub mod window;

pub use admin::AdminLevel;
pub use booth::{Booth, BoothVisit, VisitLog};
pub use calendar::{CalendarConfig, ConferenceCalendar};
pub use classifier::{DayStatus, Schedule, ScheduleView, SessionStatus};
pub use clock::{Clock, FixedClock, SystemClock};
pub use completion::{CompletionDetector, CompletionTracker, Progress};
pub use error::ConfError;
pub use notify::{CompletionNotifier, CompletionReport};
pub use session::{Session, SessionKind};
pub use window::{resolve_window, session_duration, SessionWindow};
