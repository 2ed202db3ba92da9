use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use directories::BaseDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf};

use crate::paths::log_file_path;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory where the time log files live.
    pub log_dir: PathBuf,
    /// Explicit backing file. When set, the per-user file name is not derived.
    pub log_file: Option<PathBuf>,
    /// Name of the person timing transactions. Adds a `User` column and selects
    /// a per-user log file (`cims_time_log_{user}.md`).
    pub user: Option<String>,
    /// The CLI asks for a name before starting when no user was supplied.
    pub require_user: bool,
    /// How timestamps are shown on screen. Default is "%Y-%m-%d %H:%M:%S".
    pub display_datetime_format: String,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    log_dir: Option<PathBuf>,
    log_file: Option<PathBuf>,
    user: Option<String>,
    require_user: Option<bool>,
    display_datetime_format: Option<String>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native) and apply defaults.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|error| {
            tracing::warn!("ignoring config file: {error:#}");
            FileConfig::default()
        });

        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        let log_dir = file_config.log_dir.unwrap_or_else(Self::default_log_dir);
        let display_datetime_format = file_config
            .display_datetime_format
            .filter(|f| {
                let valid = is_valid_datetime_format(f);
                if !valid {
                    tracing::warn!("ignoring invalid display_datetime_format `{f}`");
                }
                valid
            })
            .unwrap_or_else(|| "%Y-%m-%d %H:%M:%S".to_string());

        Self {
            log_dir,
            log_file: file_config.log_file,
            user: None,
            require_user: file_config.require_user.unwrap_or(false),
            display_datetime_format,
        }
        .with_user(file_config.user)
    }

    /// Returns a copy of this config identified as `user`. Blank names clear the identity.
    pub fn with_user(mut self, user: Option<String>) -> Self {
        self.user = user
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());
        self
    }

    /// The backing file this configuration points at.
    pub fn log_path(&self) -> PathBuf {
        match &self.log_file {
            Some(path) => path.clone(),
            None => log_file_path(&self.log_dir, self.user.as_deref()),
        }
    }

    /// Default log root: `{data_dir}/cims`
    /// - macOS:   `~/Library/Application Support/cims`
    /// - Linux:   `$XDG_DATA_HOME/cims` or `~/.local/share/cims`
    /// - Windows: `%APPDATA%\cims`
    fn default_log_dir() -> PathBuf {
        if let Some(base) = BaseDirs::new() {
            let mut p = base.data_dir().to_path_buf();
            p.push("cims");
            p
        } else {
            PathBuf::from("./cims")
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b.home_dir().join(".config").join("cims").join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("cims").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}

/// Formatting with a bad strftime pattern panics, so patterns are checked up front.
pub fn is_valid_datetime_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
#[cfg(test)]
pub(crate) fn mk_config(log_dir: PathBuf, user: Option<&str>) -> Config {
    Config {
        log_dir,
        log_file: None,
        user: user.map(str::to_string),
        require_user: false,
        display_datetime_format: "%Y-%m-%d %H:%M:%S".to_string(),
    }
}
