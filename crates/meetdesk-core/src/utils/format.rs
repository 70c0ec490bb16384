use chrono::NaiveDate;

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format an optional string, returning a default if None or blank
pub fn format_optional(value: Option<&str>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Format an optional date, e.g. "Apr 18, 2026"
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%b %d, %Y").to_string(),
        None => "TBD".to_string(),
    }
}

/// Single-character marker for boolean table cells
pub fn yes_no_mark(value: bool) -> &'static str {
    if value {
        "Y"
    } else {
        "N"
    }
}
