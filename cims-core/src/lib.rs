pub mod cims;
pub mod config;
pub mod entry;
pub mod log_store;
pub mod paths;
pub mod tracker;

pub use cims::{Cims, CompletionOutcome};
pub use config::Config;
pub use entry::{Entry, EntryStatus, LogRow};
pub use log_store::{LogSchema, LogStore, Summary};
pub use tracker::EntryTracker;
