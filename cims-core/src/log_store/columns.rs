use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Columns of the log table, serialized with the exact header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr, EnumString)]
pub enum Column {
    #[strum(serialize = "User")]
    User,
    #[strum(serialize = "CIMS ID")]
    CimsId,
    #[strum(serialize = "Start Time")]
    StartTime,
    #[strum(serialize = "End Time")]
    EndTime,
    #[strum(serialize = "Duration (secs)")]
    DurationSecs,
}

/// Which fixed column layout a log file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSchema {
    /// `CIMS ID | Start Time | End Time | Duration (secs)`
    Shared,
    /// `User | CIMS ID | Start Time | End Time | Duration (secs)`
    PerUser,
}

impl LogSchema {
    pub fn for_user(user: Option<&str>) -> Self {
        match user {
            Some(_) => LogSchema::PerUser,
            None => LogSchema::Shared,
        }
    }

    pub fn columns(self) -> Vec<Column> {
        Column::iter()
            .filter(|c| self == LogSchema::PerUser || *c != Column::User)
            .collect()
    }

    pub fn has_user(self) -> bool {
        self == LogSchema::PerUser
    }

    /// Matches header cells against the known layouts. Cells are compared after trimming.
    pub fn from_header<S: AsRef<str>>(cells: &[S]) -> Option<Self> {
        let parsed: Option<Vec<Column>> = cells
            .iter()
            .map(|c| Column::from_str(c.as_ref().trim()).ok())
            .collect();
        let parsed = parsed?;
        [LogSchema::Shared, LogSchema::PerUser]
            .into_iter()
            .find(|schema| schema.columns() == parsed)
    }
}
