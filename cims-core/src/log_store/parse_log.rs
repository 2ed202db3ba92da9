use super::columns::{Column, LogSchema};
use super::format_utils::DATETIME_FORMAT;
use crate::entry::LogRow;
use chrono::NaiveDateTime;

#[derive(Debug)]
pub struct ParsedLog {
    /// `None` for a blank file.
    pub schema: Option<LogSchema>,
    pub rows: Vec<LogRow>,
    pub errors: Vec<String>,
}

/// Parses the content of a log file.
///
/// Expected layout:
/// - A header row naming one of the known column layouts.
/// - A separator row (`|---|---|...`).
/// - Zero or more data rows, one per completed entry.
///
/// Blank lines are skipped. A blank file is a valid empty log with no schema.
/// Every malformed line is reported in `errors`; callers decide whether that is fatal.
pub fn parse_log_content(content: &str) -> ParsedLog {
    let mut rows = Vec::new();
    let mut errors = Vec::new();
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty());

    let schema = match lines.next() {
        None => {
            return ParsedLog {
                schema: None,
                rows,
                errors,
            };
        }
        Some((n, header)) => {
            let cells = split_cells(header);
            match cells.as_deref().and_then(LogSchema::from_header) {
                Some(schema) => schema,
                None => {
                    errors.push(format!(
                        "Line {n}: expected a header like `| CIMS ID | Start Time | End Time | Duration (secs) |`, got `{header}`."
                    ));
                    return ParsedLog {
                        schema: None,
                        rows,
                        errors,
                    };
                }
            }
        }
    };

    match lines.next() {
        Some((_, sep)) if is_separator(sep, schema.columns().len()) => {}
        Some((n, other)) => errors.push(format!(
            "Line {n}: expected a separator row like `|---|---|`, got `{other}`."
        )),
        None => errors.push("Missing separator row after the header.".to_string()),
    }

    for (n, line) in lines {
        match parse_row(schema, line) {
            Ok(row) => rows.push(row),
            Err(e) => errors.push(format!("Line {n}: {e}")),
        }
    }

    ParsedLog {
        schema: Some(schema),
        rows,
        errors,
    }
}

fn parse_row(schema: LogSchema, line: &str) -> Result<LogRow, String> {
    let cells = split_cells(line).ok_or_else(|| format!("not a table row: `{line}`."))?;
    let columns = schema.columns();
    if cells.len() != columns.len() {
        return Err(format!(
            "expected {} cells, found {} in `{line}`.",
            columns.len(),
            cells.len()
        ));
    }

    let mut user = None;
    let mut identifier = None;
    let mut start_time = None;
    let mut end_time = None;
    let mut duration_secs = None;
    for (column, cell) in columns.into_iter().zip(cells) {
        match column {
            Column::User => user = Some(cell).filter(|u| !u.is_empty()),
            Column::CimsId => {
                if cell.is_empty() {
                    return Err("empty `CIMS ID`.".to_string());
                }
                identifier = Some(cell);
            }
            Column::StartTime => start_time = Some(parse_datetime(&cell)?),
            Column::EndTime => end_time = Some(parse_datetime(&cell)?),
            Column::DurationSecs => duration_secs = Some(parse_duration(&cell)?),
        }
    }

    match (identifier, start_time, end_time, duration_secs) {
        (Some(identifier), Some(start_time), Some(end_time), Some(duration_secs)) => Ok(LogRow {
            user,
            identifier,
            start_time,
            end_time,
            duration_secs,
        }),
        _ => Err(format!("incomplete row `{line}`.")),
    }
}

pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .map_err(|_| format!("Invalid datetime `{s}`. Expected `YYYY-MM-DD HH:MM:SS.ffffff`."))
}

fn parse_duration(s: &str) -> Result<f64, String> {
    let s = s.trim();
    match s.parse::<f64>() {
        Ok(d) if d.is_finite() && d >= 0.0 => Ok(d),
        _ => Err(format!(
            "Invalid duration `{s}`. Expected a non-negative number of seconds."
        )),
    }
}

fn is_separator(line: &str, width: usize) -> bool {
    match split_cells(line) {
        Some(cells) => {
            cells.len() == width
                && cells.iter().all(|c| {
                    let c = c.trim_matches(':');
                    !c.is_empty() && c.chars().all(|ch| ch == '-')
                })
        }
        None => false,
    }
}

/// Splits `| a | b\|c |` into `["a", "b|c"]`, undoing the cell escapes.
/// Returns `None` if the line is not wrapped in pipes.
pub fn split_cells(line: &str) -> Option<Vec<String>> {
    let line = line.trim();
    let inner = line.strip_prefix('|')?;

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = inner.chars();
    let mut closed = false;
    while let Some(c) = chars.next() {
        closed = false;
        match c {
            '\\' => match chars.next() {
                Some(next @ ('|' | '\\')) => current.push(next),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            '|' => {
                cells.push(current.trim().to_string());
                current.clear();
                closed = true;
            }
            other => current.push(other),
        }
    }

    if closed { Some(cells) } else { None }
}
