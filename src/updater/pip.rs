//! pip updater
//!
//! Installs each package with `pip install name==version`, then pins the new
//! versions in requirements.txt so the manifest matches the environment.

use crate::command::SharedRunner;
use crate::domain::{normalize_python_name, Module};
use crate::error::UpdateError;
use crate::manifest::requirement_name;
use crate::updater::{pinned_spec, run_update, Updater};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::debug;

const REQUIREMENTS: &str = "requirements.txt";

/// Runs `pip install` per module and rewrites requirements.txt pins
pub struct PipUpdater {
    work_dir: PathBuf,
    runner: SharedRunner,
}

impl PipUpdater {
    pub fn new(work_dir: impl Into<PathBuf>, runner: SharedRunner) -> Self {
        Self {
            work_dir: work_dir.into(),
            runner,
        }
    }

    fn update_requirements(&self, modules: &[Module]) -> Result<(), UpdateError> {
        let path = self.work_dir.join(REQUIREMENTS);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(source) => return Err(UpdateError::ManifestWrite { path, source }),
        };

        let updated = rewrite_requirements(&content, modules);
        if updated != content {
            debug!(path = %path.display(), "pinning updated versions");
            fs::write(&path, updated).map_err(|source| UpdateError::ManifestWrite { path, source })?;
        }
        Ok(())
    }
}

/// Replace the lines naming updated modules with `name==version`
///
/// Names are matched case-insensitively with `-`, `_` and `.` equivalent; the
/// spelling used in the file is kept. Comments, options and blank lines are
/// left untouched.
pub fn rewrite_requirements(content: &str, modules: &[Module]) -> String {
    let versions: HashMap<String, &str> = modules
        .iter()
        .filter_map(|m| m.update_version().map(|v| (normalize_python_name(&m.name), v)))
        .collect();

    let mut out: Vec<String> = content
        .lines()
        .map(|line| {
            requirement_name(line)
                .and_then(|name| {
                    versions
                        .get(&normalize_python_name(name))
                        .map(|v| format!("{}=={}", name, v))
                })
                .unwrap_or_else(|| line.to_string())
        })
        .collect();

    if content.ends_with('\n') {
        out.push(String::new());
    }
    out.join("\n")
}

impl Updater for PipUpdater {
    fn update_packages(&self, modules: &[Module]) -> Result<(), UpdateError> {
        if modules.is_empty() {
            return Ok(());
        }
        for spec in modules.iter().filter_map(pinned_spec) {
            run_update(self.runner.as_ref(), "pip", &["install", spec.as_str()], &self.work_dir)?;
        }
        self.update_requirements(modules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::ScriptedRunner;
    use crate::command::CommandOutput;
    use tempfile::TempDir;

    fn module(name: &str, from: &str, to: &str) -> Module {
        Module::new(name, from, true, "main").with_update_version(to)
    }

    #[test]
    fn test_rewrite_requirements() {
        let content = "# web\nDjango>=4.2\nrequests==2.28.0  # http\n\n-r dev.txt\nflask\n";
        let updated = rewrite_requirements(
            content,
            &[module("django", "4.2.0", "5.0.1"), module("Requests", "2.28.0", "2.31.0")],
        );
        assert_eq!(
            updated,
            "# web\nDjango==5.0.1\nrequests==2.31.0\n\n-r dev.txt\nflask\n"
        );
    }

    #[test]
    fn test_rewrite_normalized_names() {
        let updated = rewrite_requirements("typing_extensions==4.7.0", &[module("typing-extensions", "4.7.0", "4.9.0")]);
        assert_eq!(updated, "typing_extensions==4.9.0");
    }

    #[test]
    fn test_update_packages_installs_and_pins() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("requirements.txt"), "django==4.2.0\nrequests\n").unwrap();
        let runner = ScriptedRunner::new().shared();
        let updater = PipUpdater::new(dir.path(), runner.clone());

        updater
            .update_packages(&[module("Django", "4.2.0", "5.0.1")])
            .unwrap();

        assert_eq!(runner.calls(), vec!["pip install Django==5.0.1"]);
        let content = std::fs::read_to_string(dir.path().join("requirements.txt")).unwrap();
        assert_eq!(content, "django==5.0.1\nrequests\n");
    }

    #[test]
    fn test_missing_requirements_is_fine() {
        let dir = TempDir::new().unwrap();
        let runner = ScriptedRunner::new().shared();
        PipUpdater::new(dir.path(), runner)
            .update_packages(&[module("rich", "13.0.0", "13.7.0")])
            .unwrap();
        assert!(!dir.path().join("requirements.txt").exists());
    }

    #[test]
    fn test_install_failure_leaves_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("requirements.txt"), "django==4.2.0\n").unwrap();
        let runner = ScriptedRunner::new()
            .respond(CommandOutput::failed(1, "", "ERROR: No matching distribution"))
            .shared();

        let err = PipUpdater::new(dir.path(), runner)
            .update_packages(&[module("django", "4.2.0", "9.9.9")])
            .unwrap_err();
        assert!(err.to_string().contains("No matching distribution"));
        let content = std::fs::read_to_string(dir.path().join("requirements.txt")).unwrap();
        assert_eq!(content, "django==4.2.0\n");
    }
}
