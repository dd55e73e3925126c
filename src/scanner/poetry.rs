//! Poetry scanner
//!
//! Parses the text table of `poetry show --outdated`. Poetry exits non-zero
//! in several harmless situations, so a failing command means "no updates".

use crate::command::SharedRunner;
use crate::domain::{DependencyIndex, DependencyInfo, Module, ScanOptions};
use crate::error::{ManifestError, ScanError};
use crate::manifest::{read_index, PyprojectTomlReader};
use crate::scanner::{run_tool, Scanner};
use std::path::PathBuf;
use tracing::debug;

const SHOW_ARGS: &[&str] = &["show", "--outdated"];

/// Marker poetry prints next to packages that are not installed
const NOT_INSTALLED: &str = "(!)";

/// Scanner for Poetry projects
pub struct PoetryScanner {
    work_dir: PathBuf,
    runner: SharedRunner,
}

impl PoetryScanner {
    pub fn new(work_dir: impl Into<PathBuf>, runner: SharedRunner) -> Self {
        Self {
            work_dir: work_dir.into(),
            runner,
        }
    }
}

/// Split one output row into (name, current, latest)
fn parse_row(line: &str) -> Option<(&str, &str, &str)> {
    let mut fields = line.split_whitespace().filter(|f| *f != NOT_INSTALLED);
    let name = fields.next()?;
    let current = fields.next()?;
    let latest = fields.next()?;
    Some((name, current, latest))
}

impl Scanner for PoetryScanner {
    fn get_updates(&self, options: &ScanOptions) -> Result<Vec<Module>, ScanError> {
        let index = self.dependency_index()?;

        let output = run_tool(self.runner.as_ref(), "poetry", SHOW_ARGS, &self.work_dir)?;
        if !output.success {
            debug!(output = %output.combined(), "poetry show --outdated failed, assuming no updates");
            return Ok(Vec::new());
        }

        let transitive = DependencyInfo::new(false, "transitive");
        let mut modules = Vec::new();
        for (name, current, latest) in output.stdout.lines().filter_map(parse_row) {
            let info = index.get(name).unwrap_or(&transitive);

            if !options.include_all && (info.dep_type == "dev" || !info.direct) {
                continue;
            }

            modules.push(
                Module::new(name, current, info.direct, info.dep_type.clone())
                    .with_update_version(latest),
            );
        }
        Ok(modules)
    }

    fn dependency_index(&self) -> Result<DependencyIndex, ManifestError> {
        read_index(&PyprojectTomlReader, &self.work_dir)
    }
}
