//! Scan options handed to every adapter

use std::path::PathBuf;

/// Knobs that narrow which updates a scan reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Substring or regular expression matched against package names
    pub filter: Option<String>,
    /// Widen visible categories to dev, indirect and transitive dependencies
    pub include_all: bool,
    /// Suppress updates published fewer than this many days ago; `<= 0` disables
    pub cooldown_days: i64,
    /// Root for manifest discovery and subprocess execution
    pub work_dir: PathBuf,
}

impl ScanOptions {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            filter: None,
            include_all: false,
            cooldown_days: 0,
            work_dir: work_dir.into(),
        }
    }

    /// Set the name filter; empty strings clear it
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        let filter = filter.into();
        self.filter = if filter.is_empty() { None } else { Some(filter) };
        self
    }

    pub fn with_include_all(mut self, include_all: bool) -> Self {
        self.include_all = include_all;
        self
    }

    pub fn with_cooldown_days(mut self, days: i64) -> Self {
        self.cooldown_days = days;
        self
    }

    /// Filter pattern, if one is set
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::new(".")
    }
}
