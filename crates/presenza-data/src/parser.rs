//! Chat-export line parsing for presenza.
//!
//! Reads exported group-chat text files line by line and extracts typed
//! presence events plus roster-snapshot lines for downstream aggregation.
//! Anything that does not match the export grammar is presence-irrelevant
//! chatter and is skipped without raising.

use std::io::BufRead;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use presenza_core::error::{PresenzaError, Result};
use presenza_core::models::{DatedEvents, DatedRoster, PresenceEvent};
use regex::Regex;
use tracing::debug;

// ── Public API ────────────────────────────────────────────────────────────────

/// Extract the timestamp and message from one exported chat line.
///
/// The export grammar is `D/M/YYYY, H:MM - <message>` with day, month and
/// hour allowed one or two digits (24-hour clock, no seconds). Returns
/// `None` on a structural mismatch or when a numeric field is out of range
/// (month 13, hour 25, ...); the message is everything after `" - "`,
/// unmodified.
pub fn extract_timestamp_and_message(line: &str) -> Option<(NaiveDateTime, &str)> {
    let re = Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4}), (\d{1,2}):(\d{2}) - (.+)$")
        .expect("regex is valid");
    let caps = re.captures(line)?;

    // The capture groups are all-digit, so parse can only fail on overflow.
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    let hour: u32 = caps[4].parse().ok()?;
    let minute: u32 = caps[5].parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    let message = caps.get(6)?.as_str();

    Some((NaiveDateTime::new(date, time), message))
}

/// Extract a typed presence event from a message, if it is one.
///
/// Exactly two shapes are recognised, case-sensitively and anchored to the
/// whole message: `"<name> joined using this group's invite link"` and
/// `"<name> left"`. The name is trimmed but deliberately not checked for
/// emptiness; anything else yields `None`.
pub fn extract_presence_event(message: &str) -> Option<PresenceEvent> {
    if let Some(name) = message.strip_suffix(" joined using this group's invite link") {
        return Some(PresenceEvent::joined(name.trim()));
    }
    if let Some(name) = message.strip_suffix(" left") {
        return Some(PresenceEvent::left(name.trim()));
    }
    None
}

/// Extract a roster snapshot (`"Presenze: <names>"`) from a message.
///
/// Splits the listed names on commas and trims each one. Roster lines are a
/// different animal from join/left events: they enumerate everyone present
/// at once, so they are surfaced through their own pipeline and never fed
/// into the monthly aggregation.
pub fn extract_roster_snapshot(message: &str) -> Option<Vec<String>> {
    let names = message.strip_prefix("Presenze: ")?;
    if names.is_empty() {
        return None;
    }
    Some(names.split(',').map(|n| n.trim().to_string()).collect())
}

/// Parse a chat export into presence events grouped by calendar date.
///
/// Lines that fail either extraction step are skipped silently; an
/// unreadable file is fatal and propagates as
/// [`PresenzaError::FileRead`].
pub fn parse_chat_file(path: &Path) -> Result<DatedEvents> {
    Ok(scan_chat_file(path)?.events)
}

/// Parse a chat export into roster snapshots grouped by calendar date.
pub fn parse_roster_file(path: &Path) -> Result<DatedRoster> {
    Ok(scan_chat_file(path)?.rosters)
}

// ── Scan types ────────────────────────────────────────────────────────────────

/// Per-file counters tallied during a scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseStats {
    /// Total lines read from the file.
    pub lines_read: u64,
    /// Lines that matched the timestamp grammar.
    pub lines_timestamped: u64,
    /// Join/left events extracted.
    pub events_extracted: u64,
    /// Roster-snapshot lines extracted.
    pub rosters_extracted: u64,
}

/// Everything one streaming pass over a chat export produces.
#[derive(Debug, Default)]
pub struct ChatScan {
    /// Typed presence events, grouped by the timestamp's calendar date.
    pub events: DatedEvents,
    /// Roster-snapshot names, grouped by the timestamp's calendar date.
    pub rosters: DatedRoster,
    /// Scan counters.
    pub stats: ParseStats,
}

/// Run one streaming pass over the chat export at `path`.
pub fn scan_chat_file(path: &Path) -> Result<ChatScan> {
    let file = std::fs::File::open(path).map_err(|source| PresenzaError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let scan = scan_chat_reader(std::io::BufReader::new(file)).map_err(|source| {
        PresenzaError::FileRead {
            path: path.to_path_buf(),
            source,
        }
    })?;

    debug!(
        "File {}: {} lines read, {} timestamped, {} events, {} rosters",
        path.display(),
        scan.stats.lines_read,
        scan.stats.lines_timestamped,
        scan.stats.events_extracted,
        scan.stats.rosters_extracted,
    );

    Ok(scan)
}

/// Scan any buffered reader of chat-export text.
///
/// A read error (including invalid UTF-8) aborts the scan; there is no
/// partial recovery mid-file.
pub fn scan_chat_reader<R: BufRead>(reader: R) -> std::io::Result<ChatScan> {
    let mut scan = ChatScan::default();

    for line in reader.lines() {
        let line = line?;
        scan.stats.lines_read += 1;

        // Exports produced on Windows carry CRLF endings.
        let line = line.trim_end_matches('\r');

        let Some((timestamp, message)) = extract_timestamp_and_message(line) else {
            continue;
        };
        scan.stats.lines_timestamped += 1;

        let date = timestamp.date();
        if let Some(event) = extract_presence_event(message) {
            scan.stats.events_extracted += 1;
            scan.events.entry(date).or_default().push(event);
        } else if let Some(names) = extract_roster_snapshot(message) {
            scan.stats.rosters_extracted += 1;
            scan.rosters.entry(date).or_default().extend(names);
        }
    }

    Ok(scan)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use presenza_core::models::EventKind;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_chat(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── extract_timestamp_and_message ─────────────────────────────────────────

    #[test]
    fn test_timestamp_basic() {
        let (ts, msg) = extract_timestamp_and_message("15/3/2023, 9:05 - Hello").unwrap();
        assert_eq!(ts.date(), date(2023, 3, 15));
        assert_eq!(ts.format("%H:%M").to_string(), "09:05");
        assert_eq!(msg, "Hello");
    }

    #[test]
    fn test_timestamp_two_digit_fields() {
        let (ts, msg) =
            extract_timestamp_and_message("01/10/2023, 10:00 - Alice left").unwrap();
        assert_eq!(ts.date(), date(2023, 10, 1));
        assert_eq!(msg, "Alice left");
    }

    #[test]
    fn test_timestamp_message_kept_verbatim() {
        let (_, msg) =
            extract_timestamp_and_message("1/1/2024, 0:00 -   spaced - and dashed  ").unwrap();
        assert_eq!(msg, "  spaced - and dashed  ");
    }

    #[test]
    fn test_timestamp_structural_mismatches() {
        for line in [
            "",
            "not a chat line",
            "15/3/2023 9:05 - missing comma",
            "15/3/2023, 9:5 - one-digit minute",
            "15/3/23, 9:05 - two-digit year",
            "15/3/2023, 9:05 no separator",
            "15/3/2023, 9:05 - ",
        ] {
            assert!(
                extract_timestamp_and_message(line).is_none(),
                "line should not parse: {line:?}"
            );
        }
    }

    #[test]
    fn test_timestamp_out_of_range_fields() {
        assert!(extract_timestamp_and_message("32/1/2023, 9:05 - day 32").is_none());
        assert!(extract_timestamp_and_message("15/13/2023, 9:05 - month 13").is_none());
        assert!(extract_timestamp_and_message("15/3/2023, 25:05 - hour 25").is_none());
        assert!(extract_timestamp_and_message("15/3/2023, 9:61 - minute 61").is_none());
        assert!(extract_timestamp_and_message("29/2/2023, 9:05 - not a leap year").is_none());
    }

    #[test]
    fn test_timestamp_leap_day_accepted() {
        let (ts, _) = extract_timestamp_and_message("29/2/2024, 9:05 - leap day").unwrap();
        assert_eq!(ts.date(), date(2024, 2, 29));
    }

    // ── extract_presence_event ────────────────────────────────────────────────

    #[test]
    fn test_event_joined() {
        let event =
            extract_presence_event("Mario joined using this group's invite link").unwrap();
        assert_eq!(event.worker_name, "Mario");
        assert_eq!(event.kind, EventKind::Joined);
    }

    #[test]
    fn test_event_left() {
        let event = extract_presence_event("Mario left").unwrap();
        assert_eq!(event.worker_name, "Mario");
        assert_eq!(event.kind, EventKind::Left);
    }

    #[test]
    fn test_event_name_is_trimmed() {
        let event = extract_presence_event("  Maria Rossi  left").unwrap();
        assert_eq!(event.worker_name, "Maria Rossi");
    }

    #[test]
    fn test_event_empty_name_allowed() {
        // The grammar does not require a non-empty name.
        let event = extract_presence_event(" left").unwrap();
        assert_eq!(event.worker_name, "");
        assert_eq!(event.kind, EventKind::Left);
    }

    #[test]
    fn test_event_other_messages_ignored() {
        assert!(extract_presence_event("Mario changed the subject").is_none());
        assert!(extract_presence_event("Mario left the building").is_none());
        assert!(extract_presence_event("left").is_none());
        assert!(extract_presence_event("Mario LEFT").is_none());
        assert!(extract_presence_event("Presenze: Mario, Luigi").is_none());
    }

    // ── extract_roster_snapshot ───────────────────────────────────────────────

    #[test]
    fn test_roster_basic() {
        let names = extract_roster_snapshot("Presenze: Mario, Luigi,  Anna ").unwrap();
        assert_eq!(names, vec!["Mario", "Luigi", "Anna"]);
    }

    #[test]
    fn test_roster_single_name() {
        let names = extract_roster_snapshot("Presenze: Mario").unwrap();
        assert_eq!(names, vec!["Mario"]);
    }

    #[test]
    fn test_roster_requires_prefix_and_names() {
        assert!(extract_roster_snapshot("Presenze:").is_none());
        assert!(extract_roster_snapshot("Presenze: ").is_none());
        assert!(extract_roster_snapshot("presenze: Mario").is_none());
        assert!(extract_roster_snapshot("Mario left").is_none());
    }

    // ── parse_chat_file ───────────────────────────────────────────────────────

    #[test]
    fn test_parse_chat_file_groups_by_date() {
        let dir = TempDir::new().unwrap();
        let path = write_chat(
            dir.path(),
            "chat.txt",
            &[
                "01/10/2023, 10:00 - Alice joined using this group's invite link",
                "01/10/2023, 11:00 - Bob joined using this group's invite link",
                "02/10/2023, 09:00 - Alice left",
            ],
        );

        let events = parse_chat_file(&path).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[&date(2023, 10, 1)].len(), 2);
        assert_eq!(events[&date(2023, 10, 2)].len(), 1);
        assert_eq!(events[&date(2023, 10, 1)][0].worker_name, "Alice");
        assert_eq!(events[&date(2023, 10, 2)][0].kind, EventKind::Left);
    }

    #[test]
    fn test_parse_chat_file_preserves_line_order_within_date() {
        let dir = TempDir::new().unwrap();
        let path = write_chat(
            dir.path(),
            "chat.txt",
            &[
                "01/10/2023, 10:00 - Zoe joined using this group's invite link",
                "01/10/2023, 10:01 - Anna joined using this group's invite link",
                "01/10/2023, 10:02 - Zoe left",
            ],
        );

        let events = parse_chat_file(&path).unwrap();
        let day = &events[&date(2023, 10, 1)];
        let names: Vec<&str> = day.iter().map(|e| e.worker_name.as_str()).collect();
        assert_eq!(names, vec!["Zoe", "Anna", "Zoe"]);
    }

    #[test]
    fn test_parse_chat_file_skips_irrelevant_and_malformed_lines() {
        let dir = TempDir::new().unwrap();
        let path = write_chat(
            dir.path(),
            "chat.txt",
            &[
                "garbage with no timestamp",
                "01/10/2023, 10:00 - Just chatting about lunch",
                "32/10/2023, 10:00 - Ghost joined using this group's invite link",
                "01/10/2023, 10:05 - Alice joined using this group's invite link",
                "",
            ],
        );

        let events = parse_chat_file(&path).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[&date(2023, 10, 1)].len(), 1);
    }

    #[test]
    fn test_parse_chat_file_never_inserts_empty_dates() {
        let dir = TempDir::new().unwrap();
        let path = write_chat(
            dir.path(),
            "chat.txt",
            &["01/10/2023, 10:00 - No presence content here"],
        );

        let events = parse_chat_file(&path).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_parse_chat_file_missing_file_is_fatal() {
        let err = parse_chat_file(Path::new("/tmp/presenza-does-not-exist.txt")).unwrap_err();
        match err {
            PresenzaError::FileRead { path, .. } => {
                assert_eq!(path, PathBuf::from("/tmp/presenza-does-not-exist.txt"));
            }
            other => panic!("expected FileRead, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_chat_file_handles_crlf_endings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chat.txt");
        std::fs::write(
            &path,
            "01/10/2023, 10:00 - Alice joined using this group's invite link\r\n\
             02/10/2023, 09:00 - Alice left\r\n",
        )
        .unwrap();

        let events = parse_chat_file(&path).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[&date(2023, 10, 1)][0].worker_name, "Alice");
    }

    // ── parse_roster_file / scan ──────────────────────────────────────────────

    #[test]
    fn test_parse_roster_file_kept_separate_from_events() {
        let dir = TempDir::new().unwrap();
        let path = write_chat(
            dir.path(),
            "chat.txt",
            &[
                "01/10/2023, 08:00 - Presenze: Mario, Luigi",
                "01/10/2023, 10:00 - Alice joined using this group's invite link",
            ],
        );

        let rosters = parse_roster_file(&path).unwrap();
        assert_eq!(rosters.len(), 1);
        assert_eq!(rosters[&date(2023, 10, 1)], vec!["Mario", "Luigi"]);

        // The roster line must not leak into the typed-event stream.
        let events = parse_chat_file(&path).unwrap();
        assert_eq!(events[&date(2023, 10, 1)].len(), 1);
    }

    #[test]
    fn test_scan_counters() {
        let dir = TempDir::new().unwrap();
        let path = write_chat(
            dir.path(),
            "chat.txt",
            &[
                "chatter",
                "01/10/2023, 08:00 - Presenze: Mario",
                "01/10/2023, 10:00 - Alice joined using this group's invite link",
                "01/10/2023, 11:00 - lunch plans",
            ],
        );

        let scan = scan_chat_file(&path).unwrap();
        assert_eq!(scan.stats.lines_read, 4);
        assert_eq!(scan.stats.lines_timestamped, 3);
        assert_eq!(scan.stats.events_extracted, 1);
        assert_eq!(scan.stats.rosters_extracted, 1);
    }
}
