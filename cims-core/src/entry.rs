use chrono::NaiveDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryStatus {
    Pending,
    Completed,
}

/// End of a timing session. Both fields are set together, so an entry can
/// never have an end time without a duration or the other way round.
#[derive(Clone, Debug, PartialEq)]
pub struct Completion {
    pub end_time: NaiveDateTime,
    pub duration_secs: f64,
}

/// One identifier's timing session.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub identifier: String,
    pub user: Option<String>,
    pub start_time: NaiveDateTime,
    completion: Option<Completion>,
}

impl Entry {
    pub fn pending(identifier: String, user: Option<String>, start_time: NaiveDateTime) -> Self {
        Self {
            identifier,
            user,
            start_time,
            completion: None,
        }
    }

    pub fn status(&self) -> EntryStatus {
        match self.completion {
            Some(_) => EntryStatus::Completed,
            None => EntryStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.completion.is_none()
    }

    pub fn completion(&self) -> Option<&Completion> {
        self.completion.as_ref()
    }

    pub fn end_time(&self) -> Option<NaiveDateTime> {
        self.completion.as_ref().map(|c| c.end_time)
    }

    pub fn duration_secs(&self) -> Option<f64> {
        self.completion.as_ref().map(|c| c.duration_secs)
    }

    /// Stamps the end of the session and returns the row to persist.
    ///
    /// Returns `None` if the entry was already completed; transitions are one-way.
    /// An `end_time` earlier than `start_time` is clamped to `start_time`.
    pub fn complete(&mut self, end_time: NaiveDateTime) -> Option<LogRow> {
        if self.completion.is_some() {
            return None;
        }
        let end_time = end_time.max(self.start_time);
        let duration_secs = elapsed_secs(self.start_time, end_time);
        self.completion = Some(Completion {
            end_time,
            duration_secs,
        });
        Some(LogRow {
            user: self.user.clone(),
            identifier: self.identifier.clone(),
            start_time: self.start_time,
            end_time,
            duration_secs,
        })
    }
}

/// A completed entry as stored in the log table.
#[derive(Clone, Debug, PartialEq)]
pub struct LogRow {
    pub user: Option<String>,
    pub identifier: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration_secs: f64,
}

/// `end - start` in seconds, rounded to two decimals.
pub fn elapsed_secs(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    let delta = end - start;
    let secs = match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => delta.num_milliseconds() as f64 / 1_000.0,
    };
    round_2(secs)
}

/// Rounds half to even, so `0.125` becomes `0.12`.
pub fn round_2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
