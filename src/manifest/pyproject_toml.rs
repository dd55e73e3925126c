//! pyproject.toml reader for Poetry and uv projects
//!
//! Handles:
//! - tool.poetry.dependencies (main, `python` skipped)
//! - tool.poetry.dev-dependencies and tool.poetry.group.{dev,test}.dependencies (dev)
//! - project.dependencies (PEP 621, main)
//! - dependency-groups.dev and tool.uv.dev-dependencies (dev)

use crate::domain::{DependencyIndex, DependencyInfo, NameMatching};
use crate::error::ManifestError;
use crate::manifest::ManifestReader;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use toml::Value;

/// Reader for pyproject.toml files
pub struct PyprojectTomlReader;

// Leading distribution name of a PEP 508 requirement string
static PEP508_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z0-9][A-Za-z0-9._-]*)").unwrap());

const DEV_GROUPS: &[&str] = &["dev", "test"];

fn table_keys<'a>(value: Option<&'a Value>) -> impl Iterator<Item = &'a String> {
    value
        .and_then(|v| v.as_table())
        .into_iter()
        .flat_map(|t| t.keys())
}

fn pep508_names(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .filter_map(|s| PEP508_NAME_RE.captures(s))
                .map(|c| c[1].to_string())
                .collect()
        })
        .unwrap_or_default()
}

impl ManifestReader for PyprojectTomlReader {
    fn filename(&self) -> &'static str {
        "pyproject.toml"
    }

    fn parse(&self, content: &str, path: &Path) -> Result<DependencyIndex, ManifestError> {
        let toml: Value = toml::from_str(content)
            .map_err(|e: toml::de::Error| ManifestError::toml_parse_error(path, e.to_string()))?;

        let mut index = self.empty_index();
        let main = DependencyInfo::new(true, "main");
        let dev = DependencyInfo::new(true, "dev");

        // PEP 621
        for name in pep508_names(toml.get("project").and_then(|p| p.get("dependencies"))) {
            index.insert(&name, main.clone());
        }

        let poetry = toml.get("tool").and_then(|t| t.get("poetry"));

        for name in table_keys(poetry.and_then(|p| p.get("dependencies"))) {
            if name != "python" {
                index.insert(name, main.clone());
            }
        }

        // Dev entries are applied last so they win over main declarations
        for name in table_keys(poetry.and_then(|p| p.get("dev-dependencies"))) {
            index.insert(name, dev.clone());
        }

        if let Some(groups) = poetry.and_then(|p| p.get("group")).and_then(|g| g.as_table()) {
            for (group, body) in groups {
                if !DEV_GROUPS.contains(&group.as_str()) {
                    continue;
                }
                for name in table_keys(body.get("dependencies")) {
                    index.insert(name, dev.clone());
                }
            }
        }

        for name in pep508_names(toml.get("dependency-groups").and_then(|g| g.get("dev"))) {
            index.insert(&name, dev.clone());
        }

        let uv_dev = toml
            .get("tool")
            .and_then(|t| t.get("uv"))
            .and_then(|u| u.get("dev-dependencies"));
        for name in pep508_names(uv_dev) {
            index.insert(&name, dev.clone());
        }

        Ok(index)
    }

    fn empty_index(&self) -> DependencyIndex {
        DependencyIndex::with_matching(NameMatching::Normalized)
    }
}
