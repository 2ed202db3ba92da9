//! Markdown table rendering for the backing file.
//!
//! ```text
//! | CIMS ID | Start Time | End Time | Duration (secs) |
//! |---|---|---|---|
//! | ABC123 | 2025-08-15 09:00:00.000000 | 2025-08-15 09:00:02.010000 | 2.01 |
//! ```

use super::columns::{Column, LogSchema};
use crate::entry::LogRow;

/// Timestamp layout inside the file. Microseconds keep the round trip lossless.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Renders the whole table, header and separator included.
pub fn format_log_table(schema: LogSchema, rows: &[LogRow]) -> String {
    let mut out = format_header(schema);
    for row in rows {
        out.push_str(&format_row(schema, row));
    }
    out
}

/// `| CIMS ID | Start Time | ... |` followed by `|---|---|...|`
pub fn format_header(schema: LogSchema) -> String {
    let columns = schema.columns();
    let names: Vec<&str> = columns.iter().map(|c| c.as_ref()).collect();
    let separator = vec!["---"; columns.len()];
    format!("{}{}", format_line(&names[..]), format_line(&separator[..]))
}

pub fn format_row(schema: LogSchema, row: &LogRow) -> String {
    let cells: Vec<String> = schema
        .columns()
        .into_iter()
        .map(|column| match column {
            Column::User => escape_cell(row.user.as_deref().unwrap_or("")),
            Column::CimsId => escape_cell(&row.identifier),
            Column::StartTime => row.start_time.format(DATETIME_FORMAT).to_string(),
            Column::EndTime => row.end_time.format(DATETIME_FORMAT).to_string(),
            Column::DurationSecs => format!("{:.2}", row.duration_secs),
        })
        .collect();
    format_line(&cells[..])
}

fn format_line<S: AsRef<str>>(cells: &[S]) -> String {
    let inner: Vec<&str> = cells.iter().map(AsRef::as_ref).collect();
    format!("| {} |\n", inner.join(" | "))
}

/// Backslashes and pipes are escaped so cells can be split again; line breaks become spaces.
pub fn escape_cell(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '|' => out.push_str("\\|"),
            '\n' | '\r' => out.push(' '),
            other => out.push(other),
        }
    }
    out
}
