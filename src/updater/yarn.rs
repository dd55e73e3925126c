use crate::command::SharedRunner;
use crate::domain::Module;
use crate::error::UpdateError;
use crate::updater::npm::split_dev;
use crate::updater::{run_with_specs, Updater};
use std::path::PathBuf;

/// Runs `yarn add` and `yarn add --dev`
pub struct YarnUpdater {
    work_dir: PathBuf,
    runner: SharedRunner,
}

impl YarnUpdater {
    pub fn new(work_dir: impl Into<PathBuf>, runner: SharedRunner) -> Self {
        Self {
            work_dir: work_dir.into(),
            runner,
        }
    }
}

impl Updater for YarnUpdater {
    fn update_packages(&self, modules: &[Module]) -> Result<(), UpdateError> {
        let (deps, dev_deps) = split_dev(modules);
        let runner = self.runner.as_ref();
        run_with_specs(runner, "yarn", &["add"], &deps, &self.work_dir)?;
        run_with_specs(runner, "yarn", &["add", "--dev"], &dev_deps, &self.work_dir)
    }
}
