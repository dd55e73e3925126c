//! Updater adapters that apply selected updates
//!
//! This module provides:
//! - The `Updater` capability every package manager adapter implements
//! - One adapter per package manager, each issuing the tool's install command
//!
//! Updates run sequentially with no rollback; the first failing command stops
//! the operation and its output is returned in the error.

mod gomod;
mod npm;
mod pip;
mod pnpm;
mod poetry;
mod uv;
mod yarn;

pub use gomod::GoModUpdater;
pub use npm::NpmUpdater;
pub use pip::{rewrite_requirements, PipUpdater};
pub use pnpm::PnpmUpdater;
pub use poetry::PoetryUpdater;
pub use uv::UvUpdater;
pub use yarn::YarnUpdater;

use crate::command::{display_command, CommandRunner, SharedRunner};
use crate::domain::{Module, PackageManager};
use crate::error::UpdateError;
use std::path::{Path, PathBuf};
use tracing::info;

/// Trait for package manager updaters
pub trait Updater: Send + Sync {
    /// Apply updates for all modules as one logical operation; empty input is a no-op
    fn update_packages(&self, modules: &[Module]) -> Result<(), UpdateError>;

    /// Apply the update for a single module
    fn update_single_package(&self, module: &Module) -> Result<(), UpdateError> {
        self.update_packages(std::slice::from_ref(module))
    }
}

/// Create the updater for a package manager
pub fn create_updater(
    manager: PackageManager,
    work_dir: impl Into<PathBuf>,
    runner: SharedRunner,
) -> Box<dyn Updater> {
    let dir = work_dir.into();
    match manager {
        PackageManager::Go => Box::new(GoModUpdater::new(dir, runner)),
        PackageManager::Npm => Box::new(NpmUpdater::new(dir, runner)),
        PackageManager::Yarn => Box::new(YarnUpdater::new(dir, runner)),
        PackageManager::Pnpm => Box::new(PnpmUpdater::new(dir, runner)),
        PackageManager::Pip => Box::new(PipUpdater::new(dir, runner)),
        PackageManager::Poetry => Box::new(PoetryUpdater::new(dir, runner)),
        PackageManager::Uv => Box::new(UvUpdater::new(dir, runner)),
    }
}

/// Run one update command, failing with the combined tool output
pub(crate) fn run_update(
    runner: &dyn CommandRunner,
    program: &str,
    args: &[&str],
    dir: &Path,
) -> Result<(), UpdateError> {
    let command = display_command(program, args);
    info!(%command, "updating");

    let output = runner
        .run(program, args, dir)
        .map_err(|e| UpdateError::command_failed(&command, e.to_string()))?;
    if output.success {
        Ok(())
    } else {
        Err(UpdateError::command_failed(command, output.combined()))
    }
}

/// Run `program prefix... specs...` unless `specs` is empty
pub(crate) fn run_with_specs(
    runner: &dyn CommandRunner,
    program: &str,
    prefix: &[&str],
    specs: &[String],
    dir: &Path,
) -> Result<(), UpdateError> {
    if specs.is_empty() {
        return Ok(());
    }
    let mut args: Vec<&str> = prefix.to_vec();
    args.extend(specs.iter().map(String::as_str));
    run_update(runner, program, &args, dir)
}

/// `name@version` for the module's candidate update
pub(crate) fn at_spec(module: &Module) -> Option<String> {
    module
        .update_version()
        .map(|v| format!("{}@{}", module.name, v))
}

/// `name==version` for the module's candidate update
pub(crate) fn pinned_spec(module: &Module) -> Option<String> {
    module
        .update_version()
        .map(|v| format!("{}=={}", module.name, v))
}
