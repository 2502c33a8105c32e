//! Text formatting shared by the CLI output and the terminal UI.

use time::{OffsetDateTime, UtcOffset, macros::format_description};

/// Render `ts` as `dd/mm/yyyy` in UTC.
pub fn format_date(ts: OffsetDateTime) -> String {
    let ts = ts.to_offset(UtcOffset::UTC);
    ts.format(format_description!("[day]/[month]/[year]")).unwrap_or_else(|_| ts.date().to_string())
}

/// Counter label with a singular/plural noun, e.g. `1 task created`.
pub fn created_label(count: usize) -> String {
    if count == 1 {
        "1 task created".to_owned()
    } else {
        format!("{count} tasks created")
    }
}
