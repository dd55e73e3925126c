//! Manifest readers producing the authoritative dependency index
//!
//! This module provides:
//! - go.mod require parsing (direct and `// indirect`)
//! - package.json dependencies and devDependencies
//! - requirements.txt package names
//! - pyproject.toml Poetry, PEP 621 and dependency-group tables
//!
//! A manifest that does not exist yields an empty index; one that exists but
//! cannot be read or parsed is an error.

mod go_mod;
mod package_json;
mod pyproject_toml;
mod requirements_txt;

pub use go_mod::GoModReader;
pub use package_json::PackageJsonReader;
pub use pyproject_toml::PyprojectTomlReader;
pub use requirements_txt::{requirement_name, RequirementsTxtReader};

use crate::domain::DependencyIndex;
use crate::error::ManifestError;
use std::io::ErrorKind;
use std::path::Path;

/// Trait for turning manifest content into a dependency index
pub trait ManifestReader {
    /// File name this reader understands, relative to the project root
    fn filename(&self) -> &'static str;

    /// Parse manifest content; `path` is only used for error messages
    fn parse(&self, content: &str, path: &Path) -> Result<DependencyIndex, ManifestError>;

    /// Index used when the manifest is absent
    fn empty_index(&self) -> DependencyIndex {
        DependencyIndex::new()
    }
}

/// Read a manifest file if it exists
pub fn read_optional(path: &Path) -> Result<Option<String>, ManifestError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ManifestError::read_error(path, e)),
    }
}

/// Build the index for `reader` from the manifest under `dir`
pub fn read_index(reader: &dyn ManifestReader, dir: &Path) -> Result<DependencyIndex, ManifestError> {
    let path = dir.join(reader.filename());
    match read_optional(&path)? {
        Some(content) => reader.parse(&content, &path),
        None => Ok(reader.empty_index()),
    }
}
