//! package.json reader for npm, yarn and pnpm projects
//!
//! Handles:
//! - dependencies
//! - devDependencies

use crate::domain::{DependencyIndex, DependencyInfo};
use crate::error::ManifestError;
use crate::manifest::ManifestReader;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Reader for package.json files
pub struct PackageJsonReader;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageJson {
    #[serde(default)]
    dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    dev_dependencies: BTreeMap<String, serde_json::Value>,
}

impl ManifestReader for PackageJsonReader {
    fn filename(&self) -> &'static str {
        "package.json"
    }

    fn parse(&self, content: &str, path: &Path) -> Result<DependencyIndex, ManifestError> {
        let pkg: PackageJson = serde_json::from_str(content)
            .map_err(|e| ManifestError::json_parse_error(path, e.to_string()))?;

        let mut index = DependencyIndex::new();
        for name in pkg.dependencies.keys() {
            index.insert(name, DependencyInfo::new(true, "dependencies"));
        }
        // A package listed in both tables is reported as a dev dependency
        for name in pkg.dev_dependencies.keys() {
            index.insert(name, DependencyInfo::new(true, "devDependencies"));
        }
        Ok(index)
    }
}
