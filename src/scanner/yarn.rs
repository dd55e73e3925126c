//! Yarn scanner
//!
//! `yarn outdated --json` prints newline-delimited JSON; the record with
//! `"type": "table"` carries rows of `[name, current, wanted, latest, ...]`.

use crate::command::SharedRunner;
use crate::domain::{DependencyIndex, Module, ScanOptions};
use crate::error::{ManifestError, ScanError};
use crate::manifest::{read_index, PackageJsonReader};
use crate::scanner::{run_tool, Scanner};
use serde::Deserialize;
use std::path::PathBuf;

const OUTDATED_ARGS: &[&str] = &["outdated", "--json"];

/// Scanner for Yarn projects
pub struct YarnScanner {
    work_dir: PathBuf,
    runner: SharedRunner,
}

#[derive(Debug, Deserialize)]
struct YarnRecord {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct YarnTable {
    #[serde(default)]
    body: Vec<Vec<String>>,
}

impl YarnScanner {
    pub fn new(work_dir: impl Into<PathBuf>, runner: SharedRunner) -> Self {
        Self {
            work_dir: work_dir.into(),
            runner,
        }
    }
}

/// Rows of every table record; other records and unparsable lines are skipped
fn table_rows(stdout: &str) -> Vec<Vec<String>> {
    stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| serde_json::from_str::<YarnRecord>(l).ok())
        .filter(|r| r.kind == "table")
        .filter_map(|r| serde_json::from_value::<YarnTable>(r.data).ok())
        .flat_map(|t| t.body)
        .collect()
}

impl Scanner for YarnScanner {
    fn get_updates(&self, options: &ScanOptions) -> Result<Vec<Module>, ScanError> {
        let index = self.dependency_index()?;

        let output = run_tool(self.runner.as_ref(), "yarn", OUTDATED_ARGS, &self.work_dir)?;

        let mut modules = Vec::new();
        for row in table_rows(&output.stdout) {
            let [name, current, _wanted, latest, ..] = row.as_slice() else {
                continue;
            };

            let info = index.get(name);
            let dep_type = info
                .map(|i| i.dep_type.clone())
                .unwrap_or_else(|| "transitive".to_string());

            if !options.include_all && (dep_type == "devDependencies" || info.is_none()) {
                continue;
            }

            modules.push(
                Module::new(name.as_str(), current.as_str(), info.is_some(), dep_type)
                    .with_update_version(latest.as_str()),
            );
        }
        Ok(modules)
    }

    fn dependency_index(&self) -> Result<DependencyIndex, ManifestError> {
        read_index(&PackageJsonReader, &self.work_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::ScriptedRunner;
    use crate::command::CommandOutput;
    use tempfile::TempDir;

    const OUTDATED: &str = concat!(
        r#"{"type":"info","data":"Color legend: ..."}"#,
        "\n",
        r#"{"type":"table","data":{"head":["Package","Current","Wanted","Latest","Package Type","URL"],"body":[["eslint","8.0.0","8.57.0","9.0.0","devDependencies","https://eslint.org"],["lodash","4.17.20","4.17.21","4.17.21","dependencies","https://lodash.com"],["ms","2.0.0","2.0.0","2.1.3","dependencies",""]]}}"#,
        "\n"
    );

    fn setup() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{"dependencies": {"lodash": "^4.17.0"}, "devDependencies": {"eslint": "^8.0.0"}}"#,
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_get_updates_default() {
        let dir = setup();
        let runner = ScriptedRunner::new()
            .respond(CommandOutput::failed(1, OUTDATED, ""))
            .shared();
        let scanner = YarnScanner::new(dir.path(), runner);

        let modules = scanner.get_updates(&ScanOptions::new(dir.path())).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "lodash");
        assert_eq!(modules[0].version, "4.17.20");
        assert_eq!(modules[0].update_version(), Some("4.17.21"));
    }

    #[test]
    fn test_get_updates_include_all() {
        let dir = setup();
        let runner = ScriptedRunner::new().respond(CommandOutput::ok(OUTDATED)).shared();
        let scanner = YarnScanner::new(dir.path(), runner);

        let opts = ScanOptions::new(dir.path()).with_include_all(true);
        let modules = scanner.get_updates(&opts).unwrap();
        let types: Vec<&str> = modules.iter().map(|m| m.dependency_type.as_str()).collect();
        assert_eq!(types, vec!["devDependencies", "dependencies", "transitive"]);
    }

    #[test]
    fn test_table_rows_skips_garbage() {
        let rows = table_rows("not json\n{\"type\":\"table\",\"data\":{\"body\":[[\"a\",\"1\",\"1\",\"2\"]]}}\n");
        assert_eq!(rows, vec![vec!["a", "1", "1", "2"]]);
    }

    #[test]
    fn test_short_rows_ignored() {
        let dir = setup();
        let out = r#"{"type":"table","data":{"body":[["lodash","4.17.20"]]}}"#;
        let runner = ScriptedRunner::new().respond(CommandOutput::ok(out)).shared();
        let scanner = YarnScanner::new(dir.path(), runner);
        assert!(scanner.get_updates(&ScanOptions::new(dir.path())).unwrap().is_empty());
    }
}
