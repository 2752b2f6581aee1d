use chrono::NaiveDate;

/// Resolve a 1-based month number to its English name.
///
/// Returns `None` for anything outside `1..=12`.
///
/// # Examples
///
/// ```
/// use presenza_core::formatting::month_name;
///
/// assert_eq!(month_name(1).as_deref(), Some("January"));
/// assert_eq!(month_name(10).as_deref(), Some("October"));
/// assert_eq!(month_name(13), None);
/// ```
pub fn month_name(month: u32) -> Option<String> {
    // Any year works; only the month field feeds the %B formatter.
    NaiveDate::from_ymd_opt(2000, month, 1).map(|d| d.format("%B").to_string())
}

/// Split a `"YYYY-MM"` month key into its year string and month number.
///
/// Returns `None` when the key does not have that shape.
///
/// # Examples
///
/// ```
/// use presenza_core::formatting::parse_month_key;
///
/// assert_eq!(parse_month_key("2023-10"), Some(("2023".to_string(), 10)));
/// assert_eq!(parse_month_key("2023"), None);
/// assert_eq!(parse_month_key("2023-xx"), None);
/// ```
pub fn parse_month_key(key: &str) -> Option<(String, u32)> {
    let (year, month) = key.split_once('-')?;
    let month: u32 = month.parse().ok()?;
    Some((year.to_string(), month))
}

/// Display form of a `"YYYY-MM"` month key, e.g. `"October 2023"`.
///
/// Falls back to the raw key when it does not have that shape.
///
/// # Examples
///
/// ```
/// use presenza_core::formatting::display_month;
///
/// assert_eq!(display_month("2023-10"), "October 2023");
/// assert_eq!(display_month("garbage"), "garbage");
/// ```
pub fn display_month(key: &str) -> String {
    parse_month_key(key)
        .and_then(|(year, month)| month_name(month).map(|name| format!("{} {}", name, year)))
        .unwrap_or_else(|| key.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
