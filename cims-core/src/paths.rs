use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

const LOG_FILE_STEM: &str = "cims_time_log";

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static PATH_HOSTILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[/\\:*?"<>|]"#).expect("valid regex"));

/// Turns a free-text user name into something safe to embed in a file name.
/// `" Jane  Doe "` becomes `Jane_Doe`.
pub fn sanitize_user(user: &str) -> String {
    let joined = WHITESPACE.replace_all(user.trim(), "_");
    PATH_HOSTILE.replace_all(&joined, "_").into_owned()
}

/// `cims_time_log.md` or `cims_time_log_{user}.md`
pub fn log_file_name(user: Option<&str>) -> String {
    match user.map(sanitize_user).filter(|u| !u.is_empty()) {
        Some(u) => format!("{LOG_FILE_STEM}_{u}.md"),
        None => format!("{LOG_FILE_STEM}.md"),
    }
}

pub fn log_file_path(root: &Path, user: Option<&str>) -> PathBuf {
    root.join(log_file_name(user))
}
