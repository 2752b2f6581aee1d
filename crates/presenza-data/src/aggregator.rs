//! Monthly aggregation over dated presence events.
//!
//! A pure fold: every call starts from fresh accumulators and is total over
//! any well-formed [`DatedEvents`] input, however nonsensical the resulting
//! counts (a leave without a matching join is a no-op, not an error).

use std::collections::{BTreeMap, HashSet};

use chrono::Datelike;
use indexmap::IndexMap;
use presenza_core::models::{
    DatedEvents, DatedRoster, EventKind, MonthlyReport, MonthlyStats, PresenceEvent,
};

// ── MonthAccumulator ──────────────────────────────────────────────────────────

/// Running totals for one month while events are folded in.
///
/// Holds the live active-worker set; only its size survives finalization.
#[derive(Debug, Default)]
struct MonthAccumulator {
    joined: u32,
    left: u32,
    active_workers: HashSet<String>,
    presence_days: IndexMap<String, u32>,
}

impl MonthAccumulator {
    /// Fold a single event into the month's totals.
    fn add_event(&mut self, event: &PresenceEvent) {
        match event.kind {
            EventKind::Joined => {
                self.joined += 1;
                self.active_workers.insert(event.worker_name.clone());
                *self
                    .presence_days
                    .entry(event.worker_name.clone())
                    .or_insert(0) += 1;
            }
            EventKind::Left => {
                self.left += 1;
                self.active_workers.remove(&event.worker_name);
            }
        }
    }

    /// Reduce the accumulator to the externally visible record.
    fn finalize(self) -> MonthlyStats {
        MonthlyStats {
            joined: self.joined,
            left: self.left,
            workers_count: self.active_workers.len(),
            presence_days: self.presence_days,
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Fold dated presence events into per-month summary statistics.
///
/// Dates are processed in ascending calendar order and the events of each
/// date in their stored (line) order, so `presence_days` lists workers
/// first-joined-first. Keys have the zero-padded `"YYYY-MM"` shape. An
/// empty input yields an empty report.
pub fn generate_monthly_report(events: &DatedEvents) -> MonthlyReport {
    let mut months: BTreeMap<String, MonthAccumulator> = BTreeMap::new();

    for (date, day_events) in events {
        let key = format!("{:04}-{:02}", date.year(), date.month());
        let acc = months.entry(key).or_default();
        for event in day_events {
            acc.add_event(event);
        }
    }

    months
        .into_iter()
        .map(|(key, acc)| (key, acc.finalize()))
        .collect()
}

/// Collapse roster snapshots into one sorted, de-duplicated name list per
/// date.
pub fn generate_daily_roster(rosters: &DatedRoster) -> DatedRoster {
    rosters
        .iter()
        .map(|(date, names)| {
            let mut unique = names.clone();
            unique.sort();
            unique.dedup();
            (*date, unique)
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
