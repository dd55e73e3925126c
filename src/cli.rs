//! CLI argument parsing module for faro

use crate::domain::{PackageManager, ScanOptions};
use crate::output::DisplayFormat;
use clap::Parser;
use std::path::PathBuf;

/// Parse the `--format` list for clap
fn parse_format(s: &str) -> Result<DisplayFormat, String> {
    DisplayFormat::parse(s).map_err(|e| e.to_string())
}

/// Parse the `--manager` name for clap
fn parse_manager(s: &str) -> Result<PackageManager, String> {
    s.parse::<PackageManager>().map_err(|e| e.to_string())
}

/// Cross-ecosystem dependency update checker
#[derive(Parser, Debug, Clone)]
#[command(
    name = "faro",
    version,
    about = "Check and apply dependency updates for Go, npm, yarn, pnpm, pip, poetry and uv projects"
)]
pub struct CliArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Upgrade every listed package
    #[arg(short = 'u', long)]
    pub upgrade: bool,

    /// Choose packages to upgrade interactively
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Only show packages whose name contains PATTERN or matches it as a regex
    #[arg(short = 'f', long, value_name = "PATTERN")]
    pub filter: Option<String>,

    /// Include dev, indirect and transitive dependencies
    #[arg(long)]
    pub all: bool,

    /// Hide updates published fewer than DAYS days ago
    #[arg(short = 'c', long, value_name = "DAYS", default_value_t = 0)]
    pub cooldown: i64,

    /// Display options, comma separated: group, lines, time
    #[arg(long, value_name = "LIST", value_parser = parse_format, default_value = "")]
    pub format: DisplayFormat,

    /// Check current and candidate versions against the OSV database
    #[arg(short = 'v', long)]
    pub vulnerabilities: bool,

    /// Package manager to use instead of auto-detection
    #[arg(short = 'm', long, value_name = "NAME", value_parser = parse_manager)]
    pub manager: Option<PackageManager>,

    /// Enable debug logging on stderr
    #[arg(long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Scan options handed to the package manager adapter
    pub fn scan_options(&self) -> ScanOptions {
        let options = ScanOptions::new(&self.path)
            .with_include_all(self.all)
            .with_cooldown_days(self.cooldown);
        match &self.filter {
            Some(filter) => options.with_filter(filter.as_str()),
            None => options,
        }
    }

    /// Default log directive for the tracing subscriber
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}
