//! The `LogStore`: the persisted table of completed entries.

use super::columns::LogSchema;
use super::format_utils::format_log_table;
use super::parse_log::parse_log_content;
use super::summary::{Summary, summarize};
use crate::entry::LogRow;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

/// In-memory copy of the backing file.
///
/// Loaded once per session and rewritten in full after every append. The file is
/// assumed to have a single writer; changes made by anyone else between `load`
/// and `append` are overwritten.
#[derive(Debug)]
pub struct LogStore {
    path: PathBuf,
    schema: LogSchema,
    rows: Vec<LogRow>,
}

impl LogStore {
    /// Loads the table stored at `path`.
    ///
    /// - A missing or blank file gives an empty table using `schema`.
    /// - An existing file keeps the layout found in its header.
    /// - A file that cannot be read or parsed is an error; nothing is reinitialised.
    pub fn load(path: &Path, schema: LogSchema) -> Result<Self> {
        if !path
            .try_exists()
            .with_context(|| format!("checking {}", path.display()))?
        {
            tracing::info!(path = %path.display(), "no log file yet, starting empty");
            return Ok(Self {
                path: path.to_path_buf(),
                schema,
                rows: Vec::new(),
            });
        }

        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let parsed = parse_log_content(&content);
        if !parsed.errors.is_empty() {
            bail!(
                "{} is not a valid time log:\n{}",
                path.display(),
                parsed.errors.join("\n")
            );
        }

        tracing::info!(
            path = %path.display(),
            rows = parsed.rows.len(),
            "loaded time log"
        );
        Ok(Self {
            path: path.to_path_buf(),
            schema: parsed.schema.unwrap_or(schema),
            rows: parsed.rows,
        })
    }

    /// Adds `row` to the table and rewrites the whole file.
    ///
    /// The row stays in memory even when the write fails, so the next successful
    /// write persists it too.
    pub fn append(&mut self, row: LogRow) -> Result<()> {
        let row = self.fit(row);
        self.rows.push(row);
        self.save()
    }

    /// `row` as it reads back from this file: the user is trimmed, and dropped
    /// when the file has no `User` column.
    pub fn fit(&self, mut row: LogRow) -> LogRow {
        row.user = row
            .user
            .filter(|_| self.schema.has_user())
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());
        row
    }

    /// Overwrites the backing file with the current table.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating parent directory {}", parent.display()))?;
        }
        let content = format_log_table(self.schema, &self.rows);
        fs::write(&self.path, content)
            .with_context(|| format!("writing {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), rows = self.rows.len(), "time log written");
        Ok(())
    }

    pub fn summarize(&self) -> Option<Summary> {
        summarize(&self.rows)
    }

    /// Durations in log order, for charting.
    pub fn durations(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.duration_secs).collect()
    }

    pub fn rows(&self) -> &[LogRow] {
        &self.rows
    }

    pub fn schema(&self) -> LogSchema {
        self.schema
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use tempfile::tempdir;

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 15)
            .unwrap()
            .and_hms_micro_opt(9, 0, 0, 123_456)
            .unwrap()
    }

    fn row(user: Option<&str>, id: &str, secs: f64) -> LogRow {
        LogRow {
            user: user.map(str::to_string),
            identifier: id.to_string(),
            start_time: t0(),
            end_time: t0() + Duration::milliseconds((secs * 1000.0) as i64),
            duration_secs: secs,
        }
    }

    #[test]
    fn missing_file_starts_empty() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("cims_time_log.md");
        let store = LogStore::load(&path, LogSchema::Shared).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.schema(), LogSchema::Shared);
        assert!(store.summarize().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn append_then_reload_round_trips() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join("cims_time_log_Ana.md");
        let mut store = LogStore::load(&path, LogSchema::PerUser).unwrap();
        let first = row(Some("Ana"), "ABC|123", 2.01);
        let second = row(Some("Ana"), "XYZ", 65.13);
        store.append(first.clone()).unwrap();
        store.append(second.clone()).unwrap();

        let reloaded = LogStore::load(&path, LogSchema::Shared).unwrap();
        assert_eq!(reloaded.schema(), LogSchema::PerUser);
        assert_eq!(reloaded.rows(), &[first, second]);
    }

    #[test]
    fn padded_user_reads_back_as_stored() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("log.md");
        let mut store = LogStore::load(&path, LogSchema::PerUser).unwrap();
        store.append(row(Some(" Ana "), "A1", 1.5)).unwrap();
        assert_eq!(store.rows()[0].user.as_deref(), Some("Ana"));

        let reloaded = LogStore::load(&path, LogSchema::PerUser).unwrap();
        assert_eq!(reloaded.rows(), store.rows());
    }

    #[test]
    fn shared_file_drops_the_user_in_memory_too() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("log.md");
        let mut store = LogStore::load(&path, LogSchema::Shared).unwrap();
        store.append(row(Some("Ana"), "A1", 1.5)).unwrap();
        assert!(store.rows()[0].user.is_none());

        let reloaded = LogStore::load(&path, LogSchema::PerUser).unwrap();
        assert_eq!(reloaded.schema(), LogSchema::Shared);
        assert_eq!(reloaded.rows(), store.rows());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_is_not_treated_as_missing() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempdir().unwrap();
        let locked = tmp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        let path = locked.join("log.md");
        fs::write(&path, "").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores permission bits, so there is nothing to check there.
        let blocked = fs::read_dir(&locked).is_err();
        let result = LogStore::load(&path, LogSchema::Shared);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if blocked {
            assert!(result.is_err());
        }
    }

    #[test]
    fn append_rewrites_the_whole_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("log.md");
        let mut store = LogStore::load(&path, LogSchema::Shared).unwrap();
        store.append(row(None, "A", 1.0)).unwrap();
        fs::write(&path, "external edit\n").unwrap();
        store.append(row(None, "B", 2.0)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("external edit"));
        assert_eq!(content.lines().count(), 4);
    }

    #[test]
    fn corrupt_file_fails_loudly() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("log.md");
        fs::write(&path, "this is not a time log").unwrap();
        let err = LogStore::load(&path, LogSchema::Shared).unwrap_err();
        assert!(format!("{err:#}").contains("not a valid time log"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "this is not a time log");
    }

    #[test]
    fn blank_file_is_an_empty_log() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("log.md");
        fs::write(&path, "").unwrap();
        let store = LogStore::load(&path, LogSchema::PerUser).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.schema(), LogSchema::PerUser);
    }

    #[test]
    fn failed_write_keeps_the_row_in_memory() {
        let tmp = tempdir().unwrap();
        // A directory where the file should be makes every write fail.
        let path = tmp.path().join("log.md");
        fs::create_dir(&path).unwrap();
        let mut store = LogStore {
            path: path.clone(),
            schema: LogSchema::Shared,
            rows: Vec::new(),
        };

        assert!(store.append(row(None, "A", 1.0)).is_err());
        assert_eq!(store.rows().len(), 1);

        fs::remove_dir(&path).unwrap();
        store.append(row(None, "B", 2.0)).unwrap();
        let reloaded = LogStore::load(&path, LogSchema::Shared).unwrap();
        let ids: Vec<_> = reloaded.rows().iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn summary_and_durations_follow_log_order() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("log.md");
        let mut store = LogStore::load(&path, LogSchema::Shared).unwrap();
        for (id, secs) in [("A", 3.0), ("B", 1.0), ("C", 5.0)] {
            store.append(row(None, id, secs)).unwrap();
        }
        assert_eq!(store.durations(), vec![3.0, 1.0, 5.0]);
        let s = store.summarize().unwrap();
        assert_eq!(s.count, 3);
        assert_eq!(s.mean_secs, 3.0);
        assert_eq!(s.max_secs, 5.0);
        assert_eq!(s.min_secs, 1.0);
    }
}
