//! Package name matching
//!
//! A pattern matches a name if it is a substring of it, or, when the pattern
//! compiles as a regular expression, if the expression matches.

use crate::error::ScanError;
use regex::Regex;

/// Compiled name pattern
#[derive(Debug, Clone)]
pub struct NameFilter {
    pattern: String,
    regex: Option<Regex>,
}

impl NameFilter {
    /// Best-effort filter: an invalid regular expression falls back to substring matching
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let regex = Regex::new(&pattern).ok();
        Self {
            pattern,
            regex,
        }
    }

    /// Strict filter: the pattern must compile as a regular expression
    pub fn strict(pattern: impl Into<String>) -> Result<Self, ScanError> {
        let pattern = pattern.into();
        let regex =
            Regex::new(&pattern).map_err(|e| ScanError::invalid_filter(&pattern, e.to_string()))?;
        Ok(Self {
            pattern,
            regex: Some(regex),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns true if the name passes this filter
    pub fn matches(&self, name: &str) -> bool {
        if name.contains(&self.pattern) {
            return true;
        }
        self.regex.as_ref().is_some_and(|re| re.is_match(name))
    }
}
