use crate::command::SharedRunner;
use crate::domain::Module;
use crate::error::UpdateError;
use crate::updater::{pinned_spec, run_update, Updater};
use std::path::PathBuf;

/// Runs `uv pip install name==version` per module
pub struct UvUpdater {
    work_dir: PathBuf,
    runner: SharedRunner,
}

impl UvUpdater {
    pub fn new(work_dir: impl Into<PathBuf>, runner: SharedRunner) -> Self {
        Self {
            work_dir: work_dir.into(),
            runner,
        }
    }
}

impl Updater for UvUpdater {
    fn update_packages(&self, modules: &[Module]) -> Result<(), UpdateError> {
        for spec in modules.iter().filter_map(pinned_spec) {
            run_update(self.runner.as_ref(), "uv", &["pip", "install", spec.as_str()], &self.work_dir)?;
        }
        Ok(())
    }
}
