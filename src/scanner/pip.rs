//! pip scanner
//!
//! Runs `pip list --outdated --format json`; requirements.txt decides which
//! packages are direct. Everything else is transitive and hidden by default.

use crate::command::SharedRunner;
use crate::domain::{DependencyIndex, Module, ScanOptions};
use crate::error::{ManifestError, ScanError};
use crate::manifest::{read_index, RequirementsTxtReader};
use crate::scanner::{require_success, run_tool, Scanner};
use serde::Deserialize;
use std::path::PathBuf;

const LIST_ARGS: &[&str] = &["list", "--outdated", "--format", "json"];

/// One entry of `pip list --outdated --format json`
#[derive(Debug, Deserialize)]
pub(crate) struct PipOutdated {
    pub name: String,
    pub version: String,
    pub latest_version: String,
}

/// Parse the JSON array printed by pip and uv
pub(crate) fn parse_pip_list(tool: &str, stdout: &str) -> Result<Vec<PipOutdated>, ScanError> {
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(stdout).map_err(|e| ScanError::invalid_output(tool, e.to_string()))
}

/// Scanner for pip projects
pub struct PipScanner {
    work_dir: PathBuf,
    runner: SharedRunner,
}

impl PipScanner {
    pub fn new(work_dir: impl Into<PathBuf>, runner: SharedRunner) -> Self {
        Self {
            work_dir: work_dir.into(),
            runner,
        }
    }
}

impl Scanner for PipScanner {
    fn get_updates(&self, options: &ScanOptions) -> Result<Vec<Module>, ScanError> {
        let index = self.dependency_index()?;

        let output = run_tool(self.runner.as_ref(), "pip", LIST_ARGS, &self.work_dir)?;
        let output = require_success(output, "pip", LIST_ARGS)?;

        let mut modules = Vec::new();
        for pkg in parse_pip_list("pip list", &output.stdout)? {
            let direct = index.contains(&pkg.name);
            if !options.include_all && !direct {
                continue;
            }
            let dep_type = if direct { "main" } else { "transitive" };
            modules.push(
                Module::new(pkg.name, pkg.version, direct, dep_type)
                    .with_update_version(pkg.latest_version),
            );
        }
        Ok(modules)
    }

    fn dependency_index(&self) -> Result<DependencyIndex, ManifestError> {
        read_index(&RequirementsTxtReader, &self.work_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::ScriptedRunner;
    use crate::command::CommandOutput;
    use tempfile::TempDir;

    const LIST: &str = r#"[
        {"name": "Django", "version": "4.2.0", "latest_version": "5.0.1", "latest_filetype": "wheel"},
        {"name": "sqlparse", "version": "0.4.3", "latest_version": "0.4.4", "latest_filetype": "wheel"}
    ]"#;

    #[test]
    fn test_direct_from_requirements() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("requirements.txt"), "django==4.2.0\n").unwrap();
        let runner = ScriptedRunner::new().respond(CommandOutput::ok(LIST)).shared();
        let scanner = PipScanner::new(dir.path(), runner.clone());

        let modules = scanner.get_updates(&ScanOptions::new(dir.path())).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "Django");
        assert_eq!(modules[0].dependency_type, "main");
        assert_eq!(runner.calls(), vec!["pip list --outdated --format json"]);
    }

    #[test]
    fn test_include_all_adds_transitive() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("requirements.txt"), "django==4.2.0\n").unwrap();
        let runner = ScriptedRunner::new().respond(CommandOutput::ok(LIST)).shared();
        let scanner = PipScanner::new(dir.path(), runner);

        let opts = ScanOptions::new(dir.path()).with_include_all(true);
        let modules = scanner.get_updates(&opts).unwrap();
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[1].dependency_type, "transitive");
        assert!(!modules[1].direct);
    }

    #[test]
    fn test_missing_requirements_is_empty_index() {
        let dir = TempDir::new().unwrap();
        let scanner = PipScanner::new(dir.path(), ScriptedRunner::new().shared());
        assert!(scanner.dependency_index().unwrap().is_empty());
    }

    #[test]
    fn test_pip_failure() {
        let dir = TempDir::new().unwrap();
        let runner = ScriptedRunner::new()
            .respond(CommandOutput::failed(1, "", "No module named pip"))
            .shared();
        let scanner = PipScanner::new(dir.path(), runner);
        let err = scanner.get_updates(&ScanOptions::new(dir.path())).unwrap_err();
        assert!(err.to_string().contains("No module named pip"));
    }
}
