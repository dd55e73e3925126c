//! pnpm scanner
//!
//! `pnpm outdated --json` exits with status 1 when updates exist. Its output is
//! either an object keyed by package name or an array of entries, depending on
//! the pnpm version.

use crate::command::{display_command, SharedRunner};
use crate::domain::{DependencyIndex, Module, ScanOptions};
use crate::error::{ManifestError, ScanError};
use crate::manifest::{read_index, PackageJsonReader};
use crate::scanner::{looks_like_json, run_tool, Scanner};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

const OUTDATED_ARGS: &[&str] = &["outdated", "--json"];

/// Scanner for pnpm projects
pub struct PnpmScanner {
    work_dir: PathBuf,
    runner: SharedRunner,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OutdatedEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    current: Option<String>,
    #[serde(default)]
    latest: Option<String>,
    #[serde(default)]
    wanted: Option<String>,
    #[serde(default, alias = "packageType")]
    dependency_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OutdatedReport {
    Map(BTreeMap<String, OutdatedEntry>),
    List(Vec<OutdatedEntry>),
}

impl PnpmScanner {
    pub fn new(work_dir: impl Into<PathBuf>, runner: SharedRunner) -> Self {
        Self {
            work_dir: work_dir.into(),
            runner,
        }
    }
}

/// Normalise both report shapes into (name, entry) pairs, name-ordered for maps
fn entries(report: OutdatedReport) -> Vec<(String, OutdatedEntry)> {
    match report {
        OutdatedReport::Map(map) => map.into_iter().collect(),
        OutdatedReport::List(list) => list
            .into_iter()
            .filter_map(|e| e.name.clone().filter(|n| !n.is_empty()).map(|n| (n, e)))
            .collect(),
    }
}

impl Scanner for PnpmScanner {
    fn get_updates(&self, options: &ScanOptions) -> Result<Vec<Module>, ScanError> {
        let index = self.dependency_index()?;

        let output = run_tool(self.runner.as_ref(), "pnpm", OUTDATED_ARGS, &self.work_dir)?;
        let tolerated = output.code == Some(1) && looks_like_json(&output.stdout);
        if !output.success && !tolerated {
            return Err(ScanError::command_failed(
                display_command("pnpm", OUTDATED_ARGS),
                output.combined(),
            ));
        }
        if output.stdout.trim().is_empty() {
            return Ok(Vec::new());
        }

        let report: OutdatedReport = serde_json::from_str(&output.stdout)
            .map_err(|e| ScanError::invalid_output("pnpm outdated", e.to_string()))?;

        let mut modules = Vec::new();
        for (name, entry) in entries(report) {
            let Some(latest) = entry.latest else {
                continue;
            };

            let info = index.get(&name);
            let dep_type = entry
                .dependency_type
                .or_else(|| info.map(|i| i.dep_type.clone()))
                .unwrap_or_else(|| "transitive".to_string());

            if !options.include_all && dep_type == "transitive" {
                continue;
            }

            let current = entry.current.or(entry.wanted).unwrap_or_default();
            modules.push(
                Module::new(name, current, info.is_some(), dep_type).with_update_version(latest),
            );
        }
        Ok(modules)
    }

    fn dependency_index(&self) -> Result<DependencyIndex, ManifestError> {
        read_index(&PackageJsonReader, &self.work_dir)
    }
}
