//! `conftime` CLI -- query the conference schedule and track booth completion.
//!
//! ## Usage
//!
//! ```sh
//! # What is happening right now?
//! conftime now -c conference.json -s sessions.json
//!
//! # ...or at a chosen moment (conference-local time, or RFC 3339)
//! conftime now -c conference.json -s sessions.json --at 2025-09-05T09:45
//!
//! # Session list for one day with past/current/upcoming flags
//! conftime day 2 -c conference.json -s sessions.json
//!
//! # Effective window of a single session
//! conftime window 17 -c conference.json -s sessions.json
//!
//! # Record booth progress; notifies the webhook once on completion
//! CONFTIME_WEBHOOK_URL=https://... \
//!   conftime progress --user ana@example.com --visited 3 --total 3 --state tracker.json
//! ```

mod webhook;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Args, Parser, Subcommand};
use conftime::booth::BoothVisit;
use conftime::calendar::{CalendarConfig, ConferenceCalendar};
use conftime::clock::{Clock, FixedClock, SystemClock};
use conftime::notify::{CompletionNotifier, LogNotifier};
use conftime::{CompletionTracker, Progress, Schedule, ScheduleView, Session};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use crate::webhook::WebhookNotifier;

#[derive(Parser)]
#[command(
    name = "conftime",
    version,
    about = "Conference schedule clock and booth-completion tracker"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Reference time instead of the system clock (RFC 3339, or conference-local
    /// `YYYY-MM-DDTHH:MM[:SS]`)
    #[arg(long, global = true, env = "CONFTIME_NOW")]
    at: Option<String>,
}

#[derive(Args)]
struct ScheduleArgs {
    /// Conference config (timezone and day → date mapping)
    #[arg(short, long)]
    config: PathBuf,
    /// Session list (JSON array)
    #[arg(short, long)]
    sessions: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current day and session
    Now {
        #[command(flatten)]
        schedule: ScheduleArgs,
    },
    /// List one day's sessions with their status
    Day {
        /// Conference day number
        day: u8,
        #[command(flatten)]
        schedule: ScheduleArgs,
    },
    /// Show the effective window of a session
    Window {
        /// Session id
        id: i64,
        #[command(flatten)]
        schedule: ScheduleArgs,
    },
    /// Record a user's booth progress and notify on completion
    Progress {
        /// User email
        #[arg(long)]
        user: String,
        /// Booths visited so far
        #[arg(long)]
        visited: u32,
        /// Total number of booths
        #[arg(long)]
        total: u32,
        /// Tracker state file (created if missing)
        #[arg(long)]
        state: PathBuf,
        /// Visit history to include in the report (JSON array)
        #[arg(long)]
        visits: Option<PathBuf>,
        /// Completion webhook; reports are only logged when unset
        #[arg(long, env = "CONFTIME_WEBHOOK_URL", hide_env_values = true)]
        webhook_url: Option<String>,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Now { schedule } => {
            let schedule = load_schedule(&schedule)?;
            let clock = reference_clock(cli.at.as_deref(), Some(schedule.calendar()))?;
            now_report(&schedule.observe(&clock))
        }
        Commands::Day { day, schedule } => {
            let schedule = load_schedule(&schedule)?;
            let clock = reference_clock(cli.at.as_deref(), Some(schedule.calendar()))?;
            day_report(&schedule, &schedule.observe(&clock), day)?
        }
        Commands::Window { id, schedule } => {
            let schedule = load_schedule(&schedule)?;
            let session = schedule
                .session(id)
                .with_context(|| format!("No session with id {}", id))?;
            let window = schedule
                .window(session)
                .with_context(|| format!("Session {} has no resolvable start time", id))?;
            json!({
                "id": id,
                "start": window.start.to_rfc3339(),
                "end": window.end.to_rfc3339(),
                "duration_minutes": window.duration().num_minutes(),
            })
        }
        Commands::Progress {
            user,
            visited,
            total,
            state,
            visits,
            webhook_url,
        } => {
            let clock = reference_clock(cli.at.as_deref(), None)?;
            let visits: Vec<BoothVisit> = match visits {
                Some(path) => read_json(&path)?,
                None => Vec::new(),
            };
            let notifier: Box<dyn CompletionNotifier> = match webhook_url {
                Some(url) => Box::new(WebhookNotifier::new(url)?),
                None => Box::new(LogNotifier),
            };

            let mut tracker = load_tracker(&state)?;
            let progress = Progress::new(visited, total);
            let notified =
                tracker.record_and_notify(&user, progress, &visits, clock.now(), notifier.as_ref());
            save_tracker(&state, &tracker)?;

            json!({
                "user": user,
                "visited": visited,
                "total": total,
                "percentage": progress.percentage(),
                "complete": progress.is_complete(),
                "notified": notified,
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn now_report(view: &ScheduleView<'_>) -> Value {
    json!({
        "now": view.now().to_rfc3339(),
        "current_day": view.current_day(),
        "current_session": view.current_session().map(session_json),
        "days": view_days(view),
    })
}

fn view_days(view: &ScheduleView<'_>) -> Vec<Value> {
    view.schedule()
        .calendar()
        .days()
        .map(|(day, date)| {
            json!({
                "day": day,
                "date": date.to_string(),
                "status": view.day_status(day),
            })
        })
        .collect()
}

fn day_report(schedule: &Schedule, view: &ScheduleView<'_>, day: u8) -> Result<Value> {
    let date = schedule
        .calendar()
        .date_for(day)
        .with_context(|| format!("Day {} is not in the conference calendar", day))?;

    let mut on_day: Vec<&Session> = schedule.sessions().iter().filter(|s| s.day == day).collect();
    on_day.sort_by_key(|s| s.start());

    let sessions: Vec<Value> = on_day
        .into_iter()
        .map(|s| {
            let mut entry = session_json(s);
            entry["status"] = json!(view.session_status(s));
            entry["end"] = json!(schedule.window(s).map(|w| w.end.to_rfc3339()));
            entry
        })
        .collect();

    Ok(json!({
        "day": day,
        "date": date.to_string(),
        "status": view.day_status(day),
        "sessions": sessions,
    }))
}

fn session_json(session: &Session) -> Value {
    json!({
        "id": session.id,
        "day": session.day,
        "start_time": session.start_time,
        "type": session.kind,
        "topic": session.topic,
    })
}

/// Pick the clock for this invocation: a fixed instant from `--at`, or the
/// system clock.
fn reference_clock(
    at: Option<&str>,
    calendar: Option<&ConferenceCalendar>,
) -> Result<Box<dyn Clock>> {
    match at {
        Some(raw) => Ok(Box::new(FixedClock(parse_reference(raw, calendar)?))),
        None => Ok(Box::new(SystemClock)),
    }
}

/// RFC 3339 is taken as-is; a naive datetime is read in the conference
/// timezone, or as UTC when no calendar is loaded.
fn parse_reference(raw: &str, calendar: Option<&ConferenceCalendar>) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .with_context(|| format!("Invalid reference time: '{}'", raw))?;
    match calendar {
        Some(cal) => cal
            .localize(naive)
            .with_context(|| format!("Reference time '{}' does not exist locally", raw)),
        None => Ok(naive.and_utc()),
    }
}

fn load_schedule(args: &ScheduleArgs) -> Result<Schedule> {
    let config: CalendarConfig = read_json(&args.config)?;
    let calendar = ConferenceCalendar::from_config(&config)
        .with_context(|| format!("Invalid conference config: {}", args.config.display()))?;
    let sessions: Vec<Session> = read_json(&args.sessions)?;
    tracing::debug!(sessions = sessions.len(), "schedule loaded");
    Ok(Schedule::new(calendar, sessions))
}

fn load_tracker(path: &Path) -> Result<CompletionTracker> {
    if !path.exists() {
        return Ok(CompletionTracker::new());
    }
    read_json(path)
}

fn save_tracker(path: &Path, tracker: &CompletionTracker) -> Result<()> {
    let content = serde_json::to_string_pretty(tracker)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}
