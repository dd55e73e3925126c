//! Name filter and cooldown pipeline
//!
//! This module provides:
//! - `NameFilter`: substring-or-regex matching on package names
//! - Cooldown eligibility based on the candidate's publish time
//! - `ModuleFilter`, which applies both to a module list against an injected `now`

mod cooldown;
mod name;

pub use cooldown::{age_in_days, is_eligible, parse_time};
pub use name::NameFilter;

use crate::domain::{Module, ScanOptions};
use chrono::{DateTime, Utc};

/// Filter configuration applied after classification
#[derive(Debug, Clone)]
pub struct ModuleFilter {
    /// Optional name pattern
    name: Option<NameFilter>,
    /// Minimum candidate age in days
    cooldown_days: i64,
    /// Reference time for cooldown calculations
    now: DateTime<Utc>,
}

impl ModuleFilter {
    /// Create a filter that keeps everything
    pub fn new() -> Self {
        Self {
            name: None,
            cooldown_days: 0,
            now: Utc::now(),
        }
    }

    /// Build a filter from scan options
    pub fn from_options(options: &ScanOptions) -> Self {
        let filter = Self::new().with_cooldown_days(options.cooldown_days);
        match options.filter() {
            Some(pattern) => filter.with_name(pattern),
            None => filter,
        }
    }

    /// Set the best-effort name pattern
    pub fn with_name(mut self, pattern: &str) -> Self {
        self.name = if pattern.is_empty() {
            None
        } else {
            Some(NameFilter::new(pattern))
        };
        self
    }

    /// Set the cooldown threshold
    pub fn with_cooldown_days(mut self, days: i64) -> Self {
        self.cooldown_days = days;
        self
    }

    /// Set the reference time (for deterministic tests)
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Check a single module
    pub fn keep(&self, module: &Module) -> bool {
        if let Some(ref name) = self.name {
            if !name.matches(&module.name) {
                return false;
            }
        }
        is_eligible(module.update_time(), self.cooldown_days, self.now)
    }

    /// Return the modules that pass, preserving order
    pub fn apply(&self, modules: &[Module]) -> Vec<Module> {
        modules.iter().filter(|m| self.keep(m)).cloned().collect()
    }
}

impl Default for ModuleFilter {
    fn default() -> Self {
        Self::new()
    }
}
