use crate::entry::LogRow;

/// Aggregate statistics over the durations in the log table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean_secs: f64,
    pub max_secs: f64,
    pub min_secs: f64,
    pub count: usize,
}

/// Mean, max, min and count of `duration_secs`. `None` means there is no data.
pub fn summarize(rows: &[LogRow]) -> Option<Summary> {
    let first = rows.first()?.duration_secs;
    let (sum, max, min) = rows.iter().fold((0.0, first, first), |(sum, max, min), row| {
        let d = row.duration_secs;
        (sum + d, f64::max(max, d), f64::min(min, d))
    });
    Some(Summary {
        mean_secs: sum / rows.len() as f64,
        max_secs: max,
        min_secs: min,
        count: rows.len(),
    })
}
