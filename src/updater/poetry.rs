use crate::command::SharedRunner;
use crate::domain::Module;
use crate::error::UpdateError;
use crate::updater::{at_spec, run_update, Updater};
use std::path::PathBuf;

/// Runs `poetry add` per module, using the dev group for dev dependencies
pub struct PoetryUpdater {
    work_dir: PathBuf,
    runner: SharedRunner,
}

impl PoetryUpdater {
    pub fn new(work_dir: impl Into<PathBuf>, runner: SharedRunner) -> Self {
        Self {
            work_dir: work_dir.into(),
            runner,
        }
    }
}

impl Updater for PoetryUpdater {
    fn update_packages(&self, modules: &[Module]) -> Result<(), UpdateError> {
        for module in modules {
            let Some(spec) = at_spec(module) else {
                continue;
            };
            let args: Vec<&str> = if module.dependency_type == "dev" {
                vec!["add", "--group", "dev", spec.as_str()]
            } else {
                vec!["add", spec.as_str()]
            };
            run_update(self.runner.as_ref(), "poetry", &args, &self.work_dir)?;
        }
        Ok(())
    }
}
