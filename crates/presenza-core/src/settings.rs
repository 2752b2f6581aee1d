use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Presence reporting for exported group-chat logs
#[derive(Parser, Debug, Clone)]
#[command(
    name = "presenza",
    about = "Monthly presence reports from exported group-chat logs",
    version
)]
pub struct Settings {
    /// Chat export to analyze (required by the report and roster views)
    pub file: Option<PathBuf>,

    /// View mode
    #[arg(long, default_value = "report", value_parser = ["report", "roster", "serve", "demo"])]
    pub view: String,

    /// Directory where uploaded chat exports are stored
    #[arg(long, default_value = "uploads")]
    pub uploads_dir: PathBuf,

    /// Address the HTTP surface binds to
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub bind: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Parse settings from the process arguments.
    pub fn load() -> Self {
        Self::parse()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
