//! Exhibition booths and the visits attendees record at them.
//!
//! A visit is recorded by entering the booth's secret phrase. Each user can
//! visit each booth once.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::completion::Progress;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booth {
    pub id: i64,
    pub name: String,
    pub secret_phrase: String,
}

impl Booth {
    /// Phrases match ignoring surrounding whitespace and letter case.
    pub fn accepts(&self, phrase: &str) -> bool {
        normalize_phrase(&self.secret_phrase) == normalize_phrase(phrase)
    }
}

fn normalize_phrase(phrase: &str) -> String {
    phrase.trim().to_lowercase()
}

/// Find the booth whose secret phrase is `phrase`.
pub fn booth_for_phrase<'a>(booths: &'a [Booth], phrase: &str) -> Option<&'a Booth> {
    if phrase.trim().is_empty() {
        return None;
    }
    booths.iter().find(|b| b.accepts(phrase))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoothVisit {
    pub user_id: String,
    pub booth_id: i64,
    pub visited_at: DateTime<Utc>,
}

/// Visits keyed by user, at most one per (user, booth).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisitLog {
    visits: BTreeMap<String, Vec<BoothVisit>>,
}

impl VisitLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visit. Returns false if the user had already visited the booth,
    /// in which case the earlier visit is kept.
    pub fn record(&mut self, user_id: &str, booth_id: i64, visited_at: DateTime<Utc>) -> bool {
        let visits = self.visits.entry(user_id.to_string()).or_default();
        if visits.iter().any(|v| v.booth_id == booth_id) {
            return false;
        }
        visits.push(BoothVisit {
            user_id: user_id.to_string(),
            booth_id,
            visited_at,
        });
        true
    }

    pub fn has_visited(&self, user_id: &str, booth_id: i64) -> bool {
        self.history(user_id).iter().any(|v| v.booth_id == booth_id)
    }

    /// The user's visits in the order they were recorded.
    pub fn history(&self, user_id: &str) -> &[BoothVisit] {
        self.visits.get(user_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Progress against `booths`. Visits to booths no longer listed do not count.
    pub fn progress(&self, user_id: &str, booths: &[Booth]) -> Progress {
        let visited = booths
            .iter()
            .filter(|b| self.has_visited(user_id, b.id))
            .count();
        Progress::new(visited as u32, booths.len() as u32)
    }
}
