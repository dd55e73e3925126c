//! Go module scanner
//!
//! Runs `go list -m -u -json all` and classifies each module against go.mod.
//! Modules missing from go.mod are transitive and hidden unless `include_all`.
//! The filter pattern must compile as a regular expression here.

use crate::command::SharedRunner;
use crate::domain::{DependencyIndex, Module, ScanOptions, UpdateInfo};
use crate::error::{ManifestError, ScanError};
use crate::filter::NameFilter;
use crate::manifest::{read_index, GoModReader};
use crate::scanner::{require_success, run_tool, Scanner};
use serde::Deserialize;
use std::path::PathBuf;

const LIST_ARGS: &[&str] = &["list", "-m", "-u", "-json", "all"];

/// Scanner for Go modules
pub struct GoModScanner {
    work_dir: PathBuf,
    runner: SharedRunner,
}

/// One record of the `go list -m -json` stream
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GoListModule {
    path: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    update: Option<GoListUpdate>,
    #[serde(default)]
    indirect: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GoListUpdate {
    version: String,
    #[serde(default)]
    time: Option<String>,
}

impl GoModScanner {
    pub fn new(work_dir: impl Into<PathBuf>, runner: SharedRunner) -> Self {
        Self {
            work_dir: work_dir.into(),
            runner,
        }
    }
}

/// Decode the concatenated JSON objects printed by `go list -json`
fn decode_stream(output: &str) -> Result<Vec<GoListModule>, ScanError> {
    serde_json::Deserializer::from_str(output)
        .into_iter::<GoListModule>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ScanError::invalid_output("go list", e.to_string()))
}

fn annotate(
    modules: Vec<GoListModule>,
    index: &DependencyIndex,
    options: &ScanOptions,
    filter: Option<&NameFilter>,
) -> Vec<Module> {
    let mut out = Vec::new();
    for m in modules {
        let Some(update) = m.update else {
            continue;
        };

        let (direct, dep_type, from_manifest) = match index.get(&m.path) {
            Some(info) => (info.direct, info.dep_type.clone(), true),
            None => (false, "transitive".to_string(), false),
        };

        if !options.include_all && !from_manifest {
            continue;
        }

        if let Some(filter) = filter {
            if !filter.matches(&m.path) {
                continue;
            }
        }

        let mut candidate = UpdateInfo::new(update.version);
        candidate.time = update.time;

        let mut module = Module::new(m.path, m.version.unwrap_or_default(), direct, dep_type)
            .with_update(candidate);
        module.time = m.time;
        module.from_manifest = from_manifest;
        out.push(module);
    }
    out
}

impl Scanner for GoModScanner {
    fn get_updates(&self, options: &ScanOptions) -> Result<Vec<Module>, ScanError> {
        let index = self.dependency_index()?;

        let filter = options.filter().map(NameFilter::strict).transpose()?;

        let output = run_tool(self.runner.as_ref(), "go", LIST_ARGS, &self.work_dir)?;
        let output = require_success(output, "go", LIST_ARGS)?;
        let modules = decode_stream(&output.stdout)?;

        Ok(annotate(modules, &index, options, filter.as_ref()))
    }

    fn dependency_index(&self) -> Result<DependencyIndex, ManifestError> {
        read_index(&GoModReader, &self.work_dir)
    }
}
