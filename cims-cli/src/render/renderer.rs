use super::chart::line_chart;
use super::color_mode::ColorMode;
use super::theme::Harbor;
use chrono::NaiveDateTime;
use cims_core::{Config, Entry, LogRow, LogSchema, Summary};
use termimad::{
    MadSkin,
    crossterm::{
        style::{Color, Stylize},
        terminal,
    },
};

const CHART_HEIGHT: usize = 10;
const CHART_MAX_WIDTH: usize = 72;

#[derive(Clone)]
pub struct RenderOptions {
    pub datetime_format: String,
    pub use_color: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: Harbor::default_harbor_skin(),
            opts: match config {
                Some(config) => config,
                None => RenderOptions {
                    datetime_format: "%Y-%m-%d %H:%M:%S".to_string(),
                    use_color: true,
                },
            },
        }
    }

    /// A renderer honouring the color flag and the configured timestamp format.
    pub fn for_config(color: ColorMode, config: &Config) -> Self {
        Self::new(Some(RenderOptions {
            datetime_format: config.display_datetime_format.clone(),
            use_color: color.use_color(),
        }))
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            print!("{md}");
            if !md.ends_with('\n') {
                println!();
            }
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    pub fn print_warning(&self, message: &str) {
        if self.opts.use_color {
            println!("{}", message.to_string().with(Color::Yellow));
        } else {
            println!("warning: {message}");
        }
    }

    pub fn print_error(&self, message: &str) {
        if self.opts.use_color {
            eprintln!("{}", message.to_string().with(Harbor::RED));
        } else {
            eprintln!("error: {message}");
        }
    }

    pub fn print_started(&self, entry: &Entry) {
        let mut identifier = entry.identifier.clone();
        let mut time = entry.start_time.format("%H:%M:%S").to_string();
        if self.opts.use_color {
            identifier = identifier.with(Color::Yellow).to_string();
            time = time.with(Color::Cyan).to_string();
        }
        println!("Start recorded for {identifier} at {time}");
    }

    pub fn print_submitted(&self, row: &LogRow) {
        let mut identifier = row.identifier.clone();
        let mut secs = format!("{:.2}s", row.duration_secs);
        if self.opts.use_color {
            identifier = identifier.with(Color::Yellow).to_string();
            secs = secs.with(Color::Green).to_string();
        }
        println!("ID {identifier} submitted. Time: {secs}");
    }

    pub fn print_pending<'a>(&self, entries: impl Iterator<Item = &'a Entry>) {
        let lines: Vec<String> = entries
            .map(|e| {
                format!(
                    "* **{}** | Start: `{}`",
                    md_cell(&e.identifier),
                    self.fmt_time(e.start_time)
                )
            })
            .collect();
        if lines.is_empty() {
            self.print_info("No pending entries.");
            return;
        }
        self.print_md(&format!("### Pending Entries\n{}\n", lines.join("\n")));
    }

    pub fn print_completed<'a>(&self, entries: impl Iterator<Item = &'a Entry>) {
        let lines: Vec<String> = entries
            .filter_map(|e| {
                let completion = e.completion()?;
                Some(format!(
                    "* **{}** | Start: `{}` | End: `{}` | {:.2} sec",
                    md_cell(&e.identifier),
                    self.fmt_time(e.start_time),
                    self.fmt_time(completion.end_time),
                    completion.duration_secs
                ))
            })
            .collect();
        if lines.is_empty() {
            self.print_info("No completed entries in this session.");
            return;
        }
        self.print_md(&format!("### Completed Entries\n{}\n", lines.join("\n")));
    }

    /// The log table with on-screen timestamp formatting.
    pub fn print_log_table(&self, schema: LogSchema, rows: &[LogRow]) {
        if rows.is_empty() {
            self.print_info("No logged entries yet.");
            return;
        }
        let columns = schema.columns();
        let headers: Vec<&str> = columns.iter().map(|c| c.as_ref()).collect();
        let mut md = format!("|{}|\n", headers.join("|"));
        md.push_str(&format!("|{}|\n", vec!["-"; headers.len()].join("|")));
        for row in rows {
            let mut cells = Vec::with_capacity(headers.len());
            if schema.has_user() {
                cells.push(md_cell(row.user.as_deref().unwrap_or("")));
            }
            cells.push(md_cell(&row.identifier));
            cells.push(self.fmt_time(row.start_time));
            cells.push(self.fmt_time(row.end_time));
            cells.push(format!("{:.2}", row.duration_secs));
            md.push_str(&format!("|{}|\n", cells.join("|")));
        }
        md.push_str("|-\n");
        self.print_md(&md);
    }

    pub fn print_summary(&self, summary: &Summary) {
        let md = format!(
            "|:-:|:-:|:-:|:-:|\n|**Average Time**|**Max Time**|**Min Time**|**Total Transactions**|\n|-\n|{:.2} sec|{:.2} sec|{:.2} sec|{}|\n|-\n",
            summary.mean_secs, summary.max_secs, summary.min_secs, summary.count
        );
        if self.opts.use_color {
            self.skin.print_text(&md);
        } else {
            println!("Average Time: {:.2} sec", summary.mean_secs);
            println!("Max Time: {:.2} sec", summary.max_secs);
            println!("Min Time: {:.2} sec", summary.min_secs);
            println!("Total Transactions: {}", summary.count);
        }
    }

    pub fn print_chart(&self, durations: &[f64]) {
        let width = terminal::size().map(|(w, _)| w as usize).unwrap_or(80);
        let width = width.saturating_sub(12).clamp(1, CHART_MAX_WIDTH);
        for line in line_chart(durations, width, CHART_HEIGHT) {
            if self.opts.use_color {
                println!("{}", line.with(Harbor::NAVY));
            } else {
                println!("{line}");
            }
        }
    }

    fn fmt_time(&self, t: NaiveDateTime) -> String {
        t.format(&self.opts.datetime_format).to_string()
    }
}

/// termimad has no cell escaping, so pipes in user text are swapped for a look-alike.
fn md_cell(value: &str) -> String {
    value.replace('|', "¦")
}
