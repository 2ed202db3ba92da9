use crate::{
    Config,
    entry::{Entry, LogRow},
    log_store::{LogSchema, LogStore},
    tracker::EntryTracker,
};
use anyhow::Result;
use chrono::{Local, NaiveDateTime};

/// What happened when the user asked to complete the oldest pending entry.
#[derive(Debug)]
pub enum CompletionOutcome {
    /// No entry was pending. Informational, not an error.
    NothingPending,
    /// The entry was completed and the log file rewritten.
    Saved(LogRow),
    /// The entry was completed and kept in memory, but the log file could not be written.
    SaveFailed { row: LogRow, error: anyhow::Error },
}

/// One timing session: the configuration, the pending/completed entries of this
/// run, and the persisted log table.
pub struct Cims {
    pub config: Config,
    pub tracker: EntryTracker,
    pub log: LogStore,
}

impl Cims {
    /// Creates a new `Cims` session, loading configuration from standard paths.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::with_config(config)
    }

    /// Creates a new `Cims` session with a specific `Config`.
    ///
    /// Loads the backing file once. A corrupt file stops here instead of being replaced.
    pub fn with_config(config: Config) -> Result<Self> {
        let path = config.log_path();
        let schema = LogSchema::for_user(config.user.as_deref());
        let log = LogStore::load(&path, schema)?;
        let tracker = EntryTracker::new(config.user.clone());
        Ok(Self {
            config,
            tracker,
            log,
        })
    }

    /// Starts timing `identifier`. Blank input is ignored and returns `None`.
    pub fn submit(&mut self, identifier: &str) -> Option<&Entry> {
        self.tracker.submit(identifier)
    }

    pub fn submit_at(&mut self, identifier: &str, start_time: NaiveDateTime) -> Option<&Entry> {
        self.tracker.submit_at(identifier, start_time)
    }

    /// Completes the oldest pending entry now and persists it.
    pub fn complete_oldest(&mut self) -> CompletionOutcome {
        self.complete_oldest_at(Local::now().naive_local())
    }

    pub fn complete_oldest_at(&mut self, end_time: NaiveDateTime) -> CompletionOutcome {
        let Some(row) = self.tracker.complete_oldest_at(end_time) else {
            return CompletionOutcome::NothingPending;
        };
        let row = self.log.fit(row);
        match self.log.append(row.clone()) {
            Ok(()) => CompletionOutcome::Saved(row),
            Err(error) => {
                tracing::error!(identifier = %row.identifier, "failed to save time log: {error:#}");
                CompletionOutcome::SaveFailed { row, error }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::mk_config;
    use chrono::{Duration, NaiveDate};
    use std::fs;
    use tempfile::tempdir;

    fn mk_cims(user: Option<&str>) -> (Cims, tempfile::TempDir) {
        let tmp = tempdir().unwrap();
        let config = mk_config(tmp.path().join("cims"), user);
        let cims = Cims::with_config(config).expect("cims with config");
        (cims, tmp)
    }

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn submit_then_complete_two_seconds_later() {
        let (mut cims, _tmp) = mk_cims(None);
        let entry = cims.submit_at("ABC123", t0()).unwrap();
        assert_eq!(entry.start_time, t0());
        assert_eq!(cims.tracker.pending_count(), 1);

        let outcome = cims.complete_oldest_at(t0() + Duration::milliseconds(2_000));
        let CompletionOutcome::Saved(row) = outcome else {
            panic!("expected the entry to be saved");
        };
        assert_eq!(row.identifier, "ABC123");
        assert!((row.duration_secs - 2.0).abs() < 0.01);
        assert_eq!(cims.log.rows(), &[row]);
        assert_eq!(cims.tracker.pending_count(), 0);
    }

    #[test]
    fn completing_with_nothing_pending_leaves_the_log_alone() {
        let (mut cims, _tmp) = mk_cims(None);
        assert!(matches!(
            cims.complete_oldest_at(t0()),
            CompletionOutcome::NothingPending
        ));
        assert!(cims.log.is_empty());
        assert!(!cims.config.log_path().exists());
    }

    #[test]
    fn a_then_b_completes_a() {
        let (mut cims, _tmp) = mk_cims(None);
        cims.submit_at("A", t0());
        cims.submit_at("B", t0() + Duration::seconds(1));
        let outcome = cims.complete_oldest_at(t0() + Duration::seconds(3));
        assert!(matches!(outcome, CompletionOutcome::Saved(ref r) if r.identifier == "A"));
        let pending: Vec<_> = cims.tracker.pending().map(|e| e.identifier.clone()).collect();
        assert_eq!(pending, vec!["B".to_string()]);
    }

    #[test]
    fn per_user_session_writes_user_column_to_own_file() {
        let (mut cims, _tmp) = mk_cims(Some("Jane Doe"));
        cims.submit_at("A1", t0());
        cims.complete_oldest_at(t0() + Duration::seconds(1));

        let path = cims.config.log_path();
        assert!(path.ends_with("cims_time_log_Jane_Doe.md"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("| User | CIMS ID |"));
        assert!(content.contains("| Jane Doe | A1 |"));
    }

    #[test]
    fn log_survives_sessions_but_pending_entries_do_not() {
        let tmp = tempdir().unwrap();
        let config = mk_config(tmp.path().join("cims"), None);

        let mut first = Cims::with_config(config.clone()).unwrap();
        first.submit_at("kept", t0());
        first.complete_oldest_at(t0() + Duration::seconds(4));
        first.submit_at("dropped", t0());
        drop(first);

        let second = Cims::with_config(config).unwrap();
        assert_eq!(second.tracker.pending_count(), 0);
        assert_eq!(second.log.rows().len(), 1);
        assert_eq!(second.log.rows()[0].identifier, "kept");
        assert_eq!(second.log.summarize().unwrap().mean_secs, 4.0);
    }

    #[test]
    fn save_failure_is_reported_and_row_retained() {
        let tmp = tempdir().unwrap();
        let mut config = mk_config(tmp.path().join("cims"), None);
        let blocked = tmp.path().join("blocked.md");
        config.log_file = Some(blocked.clone());
        let mut cims = Cims::with_config(config).unwrap();
        fs::create_dir(&blocked).unwrap();

        cims.submit_at("A", t0());
        let outcome = cims.complete_oldest_at(t0() + Duration::seconds(1));
        assert!(matches!(outcome, CompletionOutcome::SaveFailed { .. }));
        assert_eq!(cims.log.rows().len(), 1);
        assert_eq!(cims.tracker.completed().count(), 1);
    }

    #[test]
    fn named_user_on_shared_file_saves_what_reloads() {
        let tmp = tempdir().unwrap();
        let shared = tmp.path().join("cims_time_log.md");
        let mut anonymous = Cims::with_config(mk_config(tmp.path().to_path_buf(), None)).unwrap();
        anonymous.submit_at("A0", t0());
        anonymous.complete_oldest_at(t0() + Duration::seconds(1));

        let mut config = mk_config(tmp.path().to_path_buf(), Some("Ana"));
        config.log_file = Some(shared.clone());
        let mut cims = Cims::with_config(config.clone()).unwrap();
        cims.submit_at("A1", t0());
        let CompletionOutcome::Saved(row) = cims.complete_oldest_at(t0() + Duration::seconds(2))
        else {
            panic!("expected the entry to be saved");
        };
        assert!(row.user.is_none());

        let reloaded = Cims::with_config(config).unwrap();
        assert_eq!(reloaded.log.rows(), cims.log.rows());
    }

    #[test]
    fn corrupt_log_stops_the_session() {
        let tmp = tempdir().unwrap();
        let config = mk_config(tmp.path().to_path_buf(), None);
        fs::write(config.log_path(), "garbage").unwrap();
        assert!(Cims::with_config(config).is_err());
    }
}
