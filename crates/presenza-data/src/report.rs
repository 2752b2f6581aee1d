//! Human-readable rendering of presence reports.
//!
//! Purely presentational: no counting happens here, so rendering the same
//! report twice yields byte-identical output.

use presenza_core::formatting::display_month;
use presenza_core::models::{DatedRoster, MonthlyReport};

const DIVIDER_WIDTH: usize = 25;

/// Render the monthly report as display text.
///
/// Months appear in ascending `"YYYY-MM"` order; within a month, workers
/// appear in first-joined order. An empty report renders only the header
/// lines.
pub fn format_monthly_report(report: &MonthlyReport) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("Monthly Presence Report".to_string());
    lines.push("=".repeat(DIVIDER_WIDTH));

    for (month_key, stats) in report {
        lines.push(display_month(month_key));
        lines.push(format!("  Joined: {}", stats.joined));
        lines.push(format!("  Left: {}", stats.left));
        lines.push(format!("  Active Workers: {}", stats.workers_count));
        lines.push("  Presence Days:".to_string());
        for (worker, days) in &stats.presence_days {
            lines.push(format!("    {}: {} days", worker, days));
        }
        lines.push("-".repeat(DIVIDER_WIDTH));
    }

    lines.join("\n")
}

/// Render the daily roster as display text.
pub fn format_daily_roster(roster: &DatedRoster) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("Daily Roster".to_string());
    lines.push("=".repeat(DIVIDER_WIDTH));

    for (date, names) in roster {
        lines.push(date.format("%d/%m/%Y").to_string());
        for name in names {
            lines.push(format!("  {}", name));
        }
        lines.push("-".repeat(DIVIDER_WIDTH));
    }

    lines.join("\n")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
