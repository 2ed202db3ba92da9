use clap::{ArgGroup, Parser};

use crate::render::ColorMode;

/// cims — time CIMS transactions from the terminal.
///
/// Without flags an interactive session starts: paste an ID and press Enter to
/// start its timer, type `:done` to stop the oldest one.
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    group(ArgGroup::new("solo").args(["path", "stats", "log"]).multiple(false)),
)]
pub struct BaseCli {
    /// Your name. Selects your own log file and fills the `User` column.
    #[arg(long, short, env = "CIMS_USER")]
    pub user: Option<String>,
    /// Prints the log file path.
    #[arg(long, short)]
    pub path: bool,
    /// Shows the analytics view (average, max, min, count and a duration chart).
    #[arg(long, short)]
    pub stats: bool,
    /// Prints the logged entries.
    #[arg(long, short)]
    pub log: bool,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

impl BaseCli {
    pub fn new() -> Self {
        BaseCli::parse()
    }
}
