use crate::command::SharedRunner;
use crate::domain::Module;
use crate::error::UpdateError;
use crate::updater::{at_spec, run_with_specs, Updater};
use std::path::PathBuf;

/// Split modules into (dependencies, devDependencies) install specs
pub(crate) fn split_dev(modules: &[Module]) -> (Vec<String>, Vec<String>) {
    let (dev, main): (Vec<&Module>, Vec<&Module>) = modules
        .iter()
        .partition(|m| m.dependency_type == "devDependencies");
    (
        main.into_iter().filter_map(at_spec).collect(),
        dev.into_iter().filter_map(at_spec).collect(),
    )
}

/// Runs `npm install --save` and `npm install --save-dev`
pub struct NpmUpdater {
    work_dir: PathBuf,
    runner: SharedRunner,
}

impl NpmUpdater {
    pub fn new(work_dir: impl Into<PathBuf>, runner: SharedRunner) -> Self {
        Self {
            work_dir: work_dir.into(),
            runner,
        }
    }
}

impl Updater for NpmUpdater {
    fn update_packages(&self, modules: &[Module]) -> Result<(), UpdateError> {
        let (deps, dev_deps) = split_dev(modules);
        let runner = self.runner.as_ref();
        run_with_specs(runner, "npm", &["install", "--save"], &deps, &self.work_dir)?;
        run_with_specs(runner, "npm", &["install", "--save-dev"], &dev_deps, &self.work_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::ScriptedRunner;

    #[test]
    fn test_deps_then_dev_deps() {
        let runner = ScriptedRunner::new().shared();
        let updater = NpmUpdater::new(".", runner.clone());

        updater
            .update_packages(&[
                Module::new("eslint", "8.0.0", true, "devDependencies").with_update_version("9.0.0"),
                Module::new("react", "18.2.0", true, "dependencies").with_update_version("18.3.1"),
            ])
            .unwrap();

        assert_eq!(
            runner.calls(),
            vec![
                "npm install --save react@18.3.1",
                "npm install --save-dev eslint@9.0.0",
            ]
        );
    }

    #[test]
    fn test_only_dev_deps() {
        let runner = ScriptedRunner::new().shared();
        NpmUpdater::new(".", runner.clone())
            .update_packages(&[
                Module::new("vitest", "1.0.0", true, "devDependencies").with_update_version("1.2.0"),
            ])
            .unwrap();
        assert_eq!(runner.calls(), vec!["npm install --save-dev vitest@1.2.0"]);
    }
}
