mod columns;
mod format_utils;
mod log_store;
mod parse_log;
mod summary;

pub use columns::{Column, LogSchema};
pub use format_utils::{DATETIME_FORMAT, format_log_table};
pub use log_store::LogStore;
pub use parse_log::{ParsedLog, parse_log_content};
pub use summary::{Summary, summarize};
