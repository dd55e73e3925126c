//! Scanner adapters that discover available updates
//!
//! This module provides:
//! - The `Scanner` capability every package manager adapter implements
//! - One adapter per package manager, each a subprocess call plus an output parser
//!
//! Adapters return only modules with a candidate update and apply their own
//! category knowledge (for example hiding devDependencies unless `include_all`).

mod gomod;
mod npm;
mod pip;
mod pnpm;
mod poetry;
mod uv;
mod yarn;

pub use gomod::GoModScanner;
pub use npm::NpmScanner;
pub use pip::PipScanner;
pub use pnpm::PnpmScanner;
pub use poetry::PoetryScanner;
pub use uv::UvScanner;
pub use yarn::YarnScanner;

use crate::command::{display_command, CommandOutput, CommandRunner, SharedRunner};
use crate::domain::{DependencyIndex, Module, PackageManager, ScanOptions};
use crate::error::{ManifestError, ScanError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Trait for package manager scanners
pub trait Scanner: Send + Sync {
    /// Modules that have a candidate update; must not mutate `options`
    fn get_updates(&self, options: &ScanOptions) -> Result<Vec<Module>, ScanError>;

    /// Manifest-derived classification; a missing manifest yields an empty index
    fn dependency_index(&self) -> Result<DependencyIndex, ManifestError>;
}

/// Create the scanner for a package manager
pub fn create_scanner(
    manager: PackageManager,
    work_dir: impl Into<PathBuf>,
    runner: SharedRunner,
) -> Box<dyn Scanner> {
    let dir = work_dir.into();
    match manager {
        PackageManager::Go => Box::new(GoModScanner::new(dir, runner)),
        PackageManager::Npm => Box::new(NpmScanner::new(dir, runner)),
        PackageManager::Yarn => Box::new(YarnScanner::new(dir, runner)),
        PackageManager::Pnpm => Box::new(PnpmScanner::new(dir, runner)),
        PackageManager::Pip => Box::new(PipScanner::new(dir, runner)),
        PackageManager::Poetry => Box::new(PoetryScanner::new(dir, runner)),
        PackageManager::Uv => Box::new(UvScanner::new(dir, runner)),
    }
}

/// Run a scan command, turning spawn failures into `ScanError`
pub(crate) fn run_tool(
    runner: &dyn CommandRunner,
    program: &str,
    args: &[&str],
    dir: &Path,
) -> Result<CommandOutput, ScanError> {
    let command = display_command(program, args);
    debug!(%command, "scanning");
    runner
        .run(program, args, dir)
        .map_err(|e| ScanError::command_failed(&command, e.to_string()))
}

/// Fail unless the command exited successfully
pub(crate) fn require_success(
    output: CommandOutput,
    program: &str,
    args: &[&str],
) -> Result<CommandOutput, ScanError> {
    if output.success {
        Ok(output)
    } else {
        Err(ScanError::command_failed(
            display_command(program, args),
            output.combined(),
        ))
    }
}

/// Returns true if the text starts like a JSON object or array
pub(crate) fn looks_like_json(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}
