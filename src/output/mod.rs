//! Output formatting for available updates
//!
//! This module provides:
//! - `DisplayFormat`, parsed from the `--format` list
//! - Row formatting shared by the text renderer and the interactive picker
//! - The non-interactive text and `lines` renderers

mod text;

pub use text::{
    format_row, format_update, format_vuln_counts, format_vuln_info, name_width, relative_age,
    render_lines, render_text,
};

use crate::error::ConfigError;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Display options selected with `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayFormat {
    /// Sub-group rows by version delta (Major/Minor/Patch/Other)
    pub group: bool,
    /// Print `name@version` per line with no headings or banners
    pub lines: bool,
    /// Append the relative publish age of the candidate
    pub time: bool,
}

impl DisplayFormat {
    /// Parse a comma-separated list such as `group,time`
    ///
    /// Tokens are trimmed and case-insensitive; empty tokens are ignored.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let mut format = Self::default();
        for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token.to_ascii_lowercase().as_str() {
                "group" => format.group = true,
                "lines" => format.lines = true,
                "time" => format.time = true,
                _ => {
                    return Err(ConfigError::InvalidFormat {
                        value: token.to_string(),
                    })
                }
            }
        }
        Ok(format)
    }
}

impl FromStr for DisplayFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DisplayFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<&str> = [
            (self.group, "group"),
            (self.lines, "lines"),
            (self.time, "time"),
        ]
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, name)| *name)
        .collect();
        write!(f, "{}", tokens.join(","))
    }
}

/// Per-row rendering switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowOptions {
    /// Show vulnerability counts when the current version has advisories
    pub show_vulns: bool,
    /// Show the relative publish age of the candidate
    pub show_time: bool,
    /// Style output with ANSI colors
    pub color: bool,
    /// Reference time for relative ages
    pub now: DateTime<Utc>,
}

impl RowOptions {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            show_vulns: false,
            show_time: false,
            color: false,
            now,
        }
    }

    pub fn with_vulns(mut self, show: bool) -> Self {
        self.show_vulns = show;
        self
    }

    pub fn with_time(mut self, show: bool) -> Self {
        self.show_time = show;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

impl Default for RowOptions {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}
