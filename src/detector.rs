//! Package manager detection from marker files
//!
//! Lockfiles take precedence over bare manifests, so a project with both
//! `package.json` and `pnpm-lock.yaml` is treated as pnpm.

use crate::domain::PackageManager;
use crate::error::ConfigError;
use std::path::Path;
use tracing::debug;

/// Marker files in priority order; every file of an entry must exist
const MARKERS: &[(PackageManager, &[&str])] = &[
    (PackageManager::Go, &["go.mod"]),
    (PackageManager::Pnpm, &["pnpm-lock.yaml"]),
    (PackageManager::Yarn, &["yarn.lock"]),
    (PackageManager::Npm, &["package-lock.json"]),
    (PackageManager::Poetry, &["poetry.lock", "pyproject.toml"]),
    (PackageManager::Uv, &["uv.lock"]),
    (PackageManager::Pip, &["requirements.txt"]),
];

/// All package managers whose markers are present, highest priority first
pub fn detect(dir: &Path) -> Vec<PackageManager> {
    MARKERS
        .iter()
        .filter(|(_, files)| files.iter().all(|f| dir.join(f).is_file()))
        .map(|(pm, _)| *pm)
        .collect()
}

/// The highest-priority package manager in `dir`
pub fn detect_single(dir: &Path) -> Result<PackageManager, ConfigError> {
    let found = detect(dir);
    debug!(dir = %dir.display(), ?found, "detected package managers");
    found
        .first()
        .copied()
        .ok_or_else(|| ConfigError::NoPackageManager {
            dir: dir.to_path_buf(),
        })
}

/// Validate the working directory and pick the package manager
///
/// An explicit choice wins over detection.
pub fn resolve(dir: &Path, explicit: Option<PackageManager>) -> Result<PackageManager, ConfigError> {
    if !dir.is_dir() {
        return Err(ConfigError::InvalidPath {
            path: dir.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }
    match explicit {
        Some(pm) => Ok(pm),
        None => detect_single(dir),
    }
}
