use crate::command::SharedRunner;
use crate::domain::Module;
use crate::error::UpdateError;
use crate::updater::npm::split_dev;
use crate::updater::{run_with_specs, Updater};
use std::path::PathBuf;

/// Runs `pnpm add` and `pnpm add --save-dev`
pub struct PnpmUpdater {
    work_dir: PathBuf,
    runner: SharedRunner,
}

impl PnpmUpdater {
    pub fn new(work_dir: impl Into<PathBuf>, runner: SharedRunner) -> Self {
        Self {
            work_dir: work_dir.into(),
            runner,
        }
    }
}

impl Updater for PnpmUpdater {
    fn update_packages(&self, modules: &[Module]) -> Result<(), UpdateError> {
        let (deps, dev_deps) = split_dev(modules);
        let runner = self.runner.as_ref();
        run_with_specs(runner, "pnpm", &["add"], &deps, &self.work_dir)?;
        run_with_specs(runner, "pnpm", &["add", "--save-dev"], &dev_deps, &self.work_dir)
    }
}
