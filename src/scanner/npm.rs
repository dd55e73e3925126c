//! npm scanner
//!
//! Runs `npm outdated --json`, which exits with status 1 whenever something is
//! outdated, so the exit code is ignored and the output is parsed instead.

use crate::command::SharedRunner;
use crate::domain::{DependencyIndex, Module, ScanOptions};
use crate::error::{ManifestError, ScanError};
use crate::manifest::{read_index, PackageJsonReader};
use crate::scanner::{run_tool, Scanner};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

const OUTDATED_ARGS: &[&str] = &["outdated", "--json"];

/// Scanner for npm projects
pub struct NpmScanner {
    work_dir: PathBuf,
    runner: SharedRunner,
}

#[derive(Debug, Deserialize)]
struct OutdatedEntry {
    #[serde(default)]
    current: Option<String>,
    #[serde(default)]
    wanted: Option<String>,
    #[serde(default)]
    latest: Option<String>,
    #[serde(default, rename = "type")]
    dep_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NpmErrorBody {
    #[serde(default)]
    summary: String,
}

impl NpmScanner {
    pub fn new(work_dir: impl Into<PathBuf>, runner: SharedRunner) -> Self {
        Self {
            work_dir: work_dir.into(),
            runner,
        }
    }
}

/// Parse `npm outdated --json` into name-ordered entries
fn parse_outdated(stdout: &str) -> Result<BTreeMap<String, OutdatedEntry>, ScanError> {
    let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(stdout)
        .map_err(|e| ScanError::invalid_output("npm outdated", e.to_string()))?;

    // npm reports its own failures as {"error": {"code": ..., "summary": ...}}
    if let Some(error) = raw.get("error").filter(|v| v.get("code").is_some()) {
        let body: NpmErrorBody = serde_json::from_value(error.clone()).unwrap_or(NpmErrorBody {
            summary: error.to_string(),
        });
        return Err(ScanError::command_failed("npm outdated", body.summary));
    }

    raw.into_iter()
        .map(|(name, value)| {
            serde_json::from_value::<OutdatedEntry>(value)
                .map(|entry| (name, entry))
                .map_err(|e| ScanError::invalid_output("npm outdated", e.to_string()))
        })
        .collect()
}

impl Scanner for NpmScanner {
    fn get_updates(&self, options: &ScanOptions) -> Result<Vec<Module>, ScanError> {
        let index = self.dependency_index()?;

        let output = run_tool(self.runner.as_ref(), "npm", OUTDATED_ARGS, &self.work_dir)?;
        if output.stdout.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut modules = Vec::new();
        for (name, entry) in parse_outdated(&output.stdout)? {
            let Some(latest) = entry.latest else {
                continue;
            };

            let info = index.get(&name);
            let dep_type = entry
                .dep_type
                .or_else(|| info.map(|i| i.dep_type.clone()))
                .unwrap_or_else(|| "transitive".to_string());

            if !options.include_all && dep_type == "devDependencies" {
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
