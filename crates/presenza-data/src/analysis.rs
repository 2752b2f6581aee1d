//! End-to-end reporting pipeline for presenza.
//!
//! Orchestrates parsing and aggregation for one chat export, returning the
//! monthly report, the daily roster, and run metadata ready for whichever
//! surface renders it.

use std::path::Path;

use chrono::Utc;
use presenza_core::error::Result;
use presenza_core::models::{DatedRoster, MonthlyReport};

use crate::aggregator::{generate_daily_roster, generate_monthly_report};
use crate::parser::scan_chat_file;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Total lines read from the chat export.
    pub lines_read: u64,
    /// Presence events extracted from those lines.
    pub events_extracted: u64,
    /// Distinct calendar dates carrying at least one event.
    pub dates_covered: usize,
    /// Distinct months appearing in the report.
    pub months_covered: usize,
    /// Wall-clock seconds spent parsing the file.
    pub parse_time_seconds: f64,
    /// Wall-clock seconds spent aggregating.
    pub aggregate_time_seconds: f64,
}

/// The complete output of [`analyze_chat`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Per-month presence statistics.
    pub report: MonthlyReport,
    /// Per-date roster snapshots (sorted, de-duplicated).
    pub roster: DatedRoster,
    /// Metadata about this analysis run.
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full parse-then-aggregate pipeline over one chat export.
///
/// Every invocation builds fresh accumulators; nothing is shared or cached
/// across calls. The only fatal condition is an unreadable file.
pub fn analyze_chat(path: &Path) -> Result<AnalysisResult> {
    // ── Step 1: Parse ─────────────────────────────────────────────────────────
    let parse_start = std::time::Instant::now();
    let scan = scan_chat_file(path)?;
    let parse_time = parse_start.elapsed().as_secs_f64();

    // ── Step 2: Aggregate ─────────────────────────────────────────────────────
    let aggregate_start = std::time::Instant::now();
    let report = generate_monthly_report(&scan.events);
    let roster = generate_daily_roster(&scan.rosters);
    let aggregate_time = aggregate_start.elapsed().as_secs_f64();

    // ── Step 3: Build result ──────────────────────────────────────────────────
    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        lines_read: scan.stats.lines_read,
        events_extracted: scan.stats.events_extracted,
        dates_covered: scan.events.len(),
        months_covered: report.len(),
        parse_time_seconds: parse_time,
        aggregate_time_seconds: aggregate_time,
    };

    Ok(AnalysisResult {
        report,
        roster,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
