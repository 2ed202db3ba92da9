//! Plain-text line chart of durations.
//!
//! ```text
//!    12.40 ┤   ●
//!          ┤  ●│
//!          ┤ ● │ ●
//!     1.05 ┤●    │●
//! ```

const POINT: char = '●';
const LINK: char = '│';

/// Renders `values` as `height` text rows, at most `width` plot columns wide.
///
/// Longer series are sampled evenly so the first and last values are always drawn.
/// Each column is joined to the previous one by a vertical stroke.
/// Returns no rows for an empty series.
pub fn line_chart(values: &[f64], width: usize, height: usize) -> Vec<String> {
    if values.is_empty() || width == 0 || height == 0 {
        return Vec::new();
    }

    let samples = sample(values, width);
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    // Row 0 is the top of the chart.
    let row_of = |v: f64| -> usize {
        if span <= f64::EPSILON {
            height / 2
        } else {
            let level = ((v - min) / span * (height - 1) as f64).round() as usize;
            (height - 1) - level.min(height - 1)
        }
    };

    let mut grid = vec![vec![' '; samples.len()]; height];
    let mut previous: Option<usize> = None;
    for (x, v) in samples.iter().enumerate() {
        let row = row_of(*v);
        if let Some(prev) = previous {
            let (lo, hi) = if prev < row { (prev, row) } else { (row, prev) };
            for cell in grid.iter_mut().take(hi).skip(lo + 1) {
                cell[x] = LINK;
            }
        }
        grid[row][x] = POINT;
        previous = Some(row);
    }

    let top_label = format!("{max:.2}");
    let bottom_label = format!("{min:.2}");
    let label_width = top_label.len().max(bottom_label.len());
    grid.into_iter()
        .enumerate()
        .map(|(i, cells)| {
            let label = if i == 0 {
                top_label.as_str()
            } else if i == height - 1 {
                bottom_label.as_str()
            } else {
                ""
            };
            let line: String = cells.into_iter().collect();
            format!("{label:>label_width$} ┤{}", line.trim_end())
        })
        .collect()
}

fn sample(values: &[f64], width: usize) -> Vec<f64> {
    if values.len() <= width {
        return values.to_vec();
    }
    if width == 1 {
        return vec![values[values.len() - 1]];
    }
    let last = values.len() - 1;
    (0..width)
        .map(|x| values[x * last / (width - 1)])
        .collect()
}
