mod bootstrap;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use presenza_core::error::PresenzaError;
use presenza_core::models::{DatedEvents, PresenceEvent};
use presenza_core::settings::Settings;
use presenza_data::aggregator::{generate_daily_roster, generate_monthly_report};
use presenza_data::analysis::analyze_chat;
use presenza_data::parser::parse_roster_file;
use presenza_data::report::{format_daily_roster, format_monthly_report};
use presenza_server::routes::{app, AppState};
use presenza_server::upload::UploadConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("presenza v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("View: {}", settings.view);

    match settings.view.as_str() {
        "report" => {
            let file = require_file(&settings)?;
            let result = analyze_chat(&file)?;
            tracing::info!(
                "{} events across {} months",
                result.metadata.events_extracted,
                result.metadata.months_covered
            );
            println!("{}", format_monthly_report(&result.report));
        }

        "roster" => {
            let file = require_file(&settings)?;
            let snapshots = parse_roster_file(&file)?;
            let roster = generate_daily_roster(&snapshots);
            println!("{}", format_daily_roster(&roster));
        }

        "serve" => {
            let config = UploadConfig::new(settings.uploads_dir.clone());
            bootstrap::ensure_upload_dir(&config.upload_dir)?;

            let state = AppState::new(config);
            let listener = tokio::net::TcpListener::bind(&settings.bind).await?;
            tracing::info!("Listening on {}", settings.bind);

            // Serve until the process is interrupted; Ctrl+C shuts the
            // listener down cleanly.
            axum::serve(listener, app(state))
                .with_graceful_shutdown(async {
                    let _ = tokio::signal::ctrl_c().await;
                    tracing::info!("Ctrl+C received; shutting down");
                })
                .await?;
        }

        "demo" => {
            let report = generate_monthly_report(&demo_events());
            println!("{}", format_monthly_report(&report));
        }

        unknown => {
            eprintln!("Unknown view mode: {}", unknown);
        }
    }

    Ok(())
}

/// The report and roster views cannot run without an input file.
fn require_file(settings: &Settings) -> Result<PathBuf> {
    settings.file.clone().ok_or_else(|| {
        PresenzaError::Config(format!(
            "the {} view needs a chat export path",
            settings.view
        ))
        .into()
    })
}

/// Hard-coded example data documenting the shape the parser produces;
/// doubles as a smoke test for the aggregation pipeline.
fn demo_events() -> DatedEvents {
    let mut events = DatedEvents::new();
    events.insert(
        NaiveDate::from_ymd_opt(2023, 10, 1).expect("valid date"),
        vec![
            PresenceEvent::joined("Alice"),
            PresenceEvent::joined("Bob"),
        ],
    );
    events.insert(
        NaiveDate::from_ymd_opt(2023, 10, 2).expect("valid date"),
        vec![
            PresenceEvent::left("Alice"),
            PresenceEvent::joined("Charlie"),
        ],
    );
    events.insert(
        NaiveDate::from_ymd_opt(2023, 11, 1).expect("valid date"),
        vec![PresenceEvent::left("Bob")],
    );
    events
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_events_aggregate_as_documented() {
        let report = generate_monthly_report(&demo_events());
        assert_eq!(report.len(), 2);

        let october = &report["2023-10"];
        assert_eq!(october.joined, 3);
        assert_eq!(october.left, 1);
        // Bob and Charlie are still in at the end of October's events.
        assert_eq!(october.workers_count, 2);

        let november = &report["2023-11"];
        assert_eq!(november.left, 1);
        assert_eq!(november.workers_count, 0);
    }

    #[test]
    fn test_require_file_rejects_missing_path() {
        use clap::Parser;
        let settings = Settings::parse_from(["presenza", "--view", "report"]);
        assert!(require_file(&settings).is_err());
    }
}
