//! Booth-completion detection.
//!
//! Completion is edge-triggered: a notification is due only on the transition
//! from "not complete" to "complete", never on later observations of an
//! already-complete state.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booth::BoothVisit;
use crate::notify::{self, CompletionNotifier, CompletionReport};

/// A user's booth progress at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    pub visited: u32,
    pub total: u32,
}

impl Progress {
    pub fn new(visited: u32, total: u32) -> Self {
        Self { visited, total }
    }

    /// Every booth visited. A conference with no booths is never complete.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.visited == self.total
    }

    /// Visited share as a whole percentage, rounded half up and capped at 100.
    pub fn percentage(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let visited = u64::from(self.visited.min(self.total));
        let total = u64::from(self.total);
        ((visited * 200 + total) / (total * 2)) as u8
    }
}

/// Edge detector over a stream of [`Progress`] snapshots for one user.
///
/// The detector owns the previous snapshot; feed every snapshot for the user
/// through the same instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionDetector {
    previous: Option<Progress>,
}

impl CompletionDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous(&self) -> Option<Progress> {
        self.previous
    }

    /// Record `next` and report whether it completes the user's progress.
    pub fn observe(&mut self, next: Progress) -> bool {
        let was_complete = self.previous.is_some_and(|p| p.is_complete());
        self.previous = Some(next);
        !was_complete && next.is_complete()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct UserCompletion {
    detector: CompletionDetector,
    notified: bool,
}

/// Per-user completion state shared by every surface that reports progress.
///
/// Each user is notified at most once: the `notified` flag is kept alongside
/// the detector and survives serialization, so a reloaded tracker does not
/// fire again for a user it already reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionTracker {
    users: BTreeMap<String, UserCompletion>,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a snapshot for `user`. Returns true when the caller should send
    /// the completion notification; the user is marked notified at that point.
    pub fn record(&mut self, user: &str, progress: Progress) -> bool {
        let entry = self.users.entry(user.to_string()).or_default();
        let edge = entry.detector.observe(progress);
        if edge && !entry.notified {
            entry.notified = true;
            tracing::info!(user, visited = progress.visited, total = progress.total, "booth tour completed");
            true
        } else {
            tracing::debug!(user, visited = progress.visited, total = progress.total, "progress recorded");
            false
        }
    }

    /// Record a snapshot and, on completion, hand a report to `notifier`.
    ///
    /// Delivery failures are logged and otherwise ignored; the user stays
    /// marked as notified. Returns whether a notification was attempted.
    pub fn record_and_notify<N: CompletionNotifier + ?Sized>(
        &mut self,
        user: &str,
        progress: Progress,
        visits: &[BoothVisit],
        now: DateTime<Utc>,
        notifier: &N,
    ) -> bool {
        if !self.record(user, progress) {
            return false;
        }
        let report = CompletionReport::new(now, user, visits, progress);
        notify::dispatch(notifier, &report);
        true
    }

    pub fn last_progress(&self, user: &str) -> Option<Progress> {
        self.users.get(user).and_then(|u| u.detector.previous())
    }

    pub fn is_notified(&self, user: &str) -> bool {
        self.users.get(user).is_some_and(|u| u.notified)
    }
}
