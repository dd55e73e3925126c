use crate::command::SharedRunner;
use crate::domain::Module;
use crate::error::UpdateError;
use crate::updater::{at_spec, run_update, run_with_specs, Updater};
use std::path::PathBuf;

/// Runs `go get` for every module followed by `go mod tidy`
pub struct GoModUpdater {
    work_dir: PathBuf,
    runner: SharedRunner,
}

impl GoModUpdater {
    pub fn new(work_dir: impl Into<PathBuf>, runner: SharedRunner) -> Self {
        Self {
            work_dir: work_dir.into(),
            runner,
        }
    }
}

impl Updater for GoModUpdater {
    fn update_packages(&self, modules: &[Module]) -> Result<(), UpdateError> {
        let specs: Vec<String> = modules.iter().filter_map(at_spec).collect();
        if specs.is_empty() {
            return Ok(());
        }
        let runner = self.runner.as_ref();
        run_with_specs(runner, "go", &["get"], &specs, &self.work_dir)?;
        run_update(runner, "go", &["mod", "tidy"], &self.work_dir)
    }
}
