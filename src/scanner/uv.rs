//! uv scanner
//!
//! Runs `uv pip list --outdated --format json`. pyproject.toml classifies
//! packages when it declares any; without it every package is reported as a
//! direct main dependency.

use crate::command::SharedRunner;
use crate::domain::{DependencyIndex, Module, ScanOptions};
use crate::error::{ManifestError, ScanError};
use crate::manifest::{read_index, PyprojectTomlReader};
use crate::scanner::pip::parse_pip_list;
use crate::scanner::{require_success, run_tool, Scanner};
use std::path::PathBuf;

const LIST_ARGS: &[&str] = &["pip", "list", "--outdated", "--format", "json"];

/// Scanner for uv projects
pub struct UvScanner {
    work_dir: PathBuf,
    runner: SharedRunner,
}

impl UvScanner {
    pub fn new(work_dir: impl Into<PathBuf>, runner: SharedRunner) -> Self {
        Self {
            work_dir: work_dir.into(),
            runner,
        }
    }
}

impl Scanner for UvScanner {
    fn get_updates(&self, options: &ScanOptions) -> Result<Vec<Module>, ScanError> {
        let index = self.dependency_index()?;

        let output = run_tool(self.runner.as_ref(), "uv", LIST_ARGS, &self.work_dir)?;
        let output = require_success(output, "uv", LIST_ARGS)?;

        let mut modules = Vec::new();
        for pkg in parse_pip_list("uv pip list", &output.stdout)? {
            let (direct, dep_type) = if index.is_empty() {
                (true, "main".to_string())
            } else {
                match index.get(&pkg.name) {
                    Some(info) => (info.direct, info.dep_type.clone()),
                    None => (false, "transitive".to_string()),
                }
            };

            if !options.include_all && !direct {
                continue;
            }

            modules.push(
                Module::new(pkg.name, pkg.version, direct, dep_type)
                    .with_update_version(pkg.latest_version),
            );
        }
        Ok(modules)
    }

    fn dependency_index(&self) -> Result<DependencyIndex, ManifestError> {
        read_index(&PyprojectTomlReader, &self.work_dir)
    }
}
