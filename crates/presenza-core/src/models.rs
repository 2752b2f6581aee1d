use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether a presence event records a worker entering or leaving the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// The worker joined the group through its invite link.
    Joined,
    /// The worker left the group.
    Left,
}

/// A single join/left occurrence for one named worker, derived from one
/// chat line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceEvent {
    /// Display name of the worker as it appears in the chat export.
    pub worker_name: String,
    /// Whether the worker joined or left.
    pub kind: EventKind,
}

impl PresenceEvent {
    /// A `Joined` event for `worker_name`.
    pub fn joined(worker_name: impl Into<String>) -> Self {
        Self {
            worker_name: worker_name.into(),
            kind: EventKind::Joined,
        }
    }

    /// A `Left` event for `worker_name`.
    pub fn left(worker_name: impl Into<String>) -> Self {
        Self {
            worker_name: worker_name.into(),
            kind: EventKind::Left,
        }
    }
}

/// Presence events grouped by calendar date.
///
/// Keys iterate in ascending date order; each value preserves the line
/// order of the source file. A date key is only present when at least one
/// event was extracted for it.
pub type DatedEvents = BTreeMap<NaiveDate, Vec<PresenceEvent>>;

/// Roster-snapshot names grouped by calendar date (the `Presenze:` lines).
///
/// Kept apart from [`DatedEvents`]: roster lines list everyone present at
/// once and never feed the monthly join/left aggregation.
pub type DatedRoster = BTreeMap<NaiveDate, Vec<String>>;

/// Summary presence statistics for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyStats {
    /// Number of join events recorded in the month.
    pub joined: u32,
    /// Number of leave events recorded in the month.
    pub left: u32,
    /// Net membership as of the last processed event in the month.
    pub workers_count: usize,
    /// Per-worker count of join events, in first-joined order.
    pub presence_days: IndexMap<String, u32>,
}

/// Monthly statistics keyed by `"YYYY-MM"`.
///
/// The zero-padded key makes lexicographic order equal chronological order,
/// so iteration walks the months oldest-first.
pub type MonthlyReport = BTreeMap<String, MonthlyStats>;

// ── Tests ─────────────────────────────────────────────────────────────────────
