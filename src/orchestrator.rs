//! Run orchestration
//!
//! This module provides:
//! - Workflow sequencing: scan → classify → filter → vulnerabilities → list or pick → update
//! - `RunConfig`, the resolved settings for one invocation
//! - `RunOutcome`, what the run ended with
//!
//! User-facing output goes to the injected writer; diagnostics go through tracing.

use crate::classify::{classify, Buckets};
use crate::cli::CliArgs;
use crate::command::SystemCommandRunner;
use crate::domain::{Module, PackageManager, ScanOptions};
use crate::error::AppError;
use crate::filter::ModuleFilter;
use crate::output::{render_lines, render_text, DisplayFormat, RowOptions};
use crate::picker::{Phase, Picker, Selection, TerminalPicker, ViewOptions};
use crate::progress::Progress;
use crate::scanner::{create_scanner, Scanner};
use crate::updater::{create_updater, Updater};
use crate::vuln::{self, VulnClient};
use chrono::{DateTime, Utc};
use std::io::Write;
use tracing::{debug, info};

/// Resolved settings for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Package manager being scanned
    pub manager: PackageManager,
    /// Options handed to the scanner and the core filter
    pub options: ScanOptions,
    /// Display options
    pub format: DisplayFormat,
    /// Apply every visible update after listing
    pub upgrade: bool,
    /// Let the user pick updates
    pub interactive: bool,
    /// Look up advisories for current and candidate versions
    pub vulnerabilities: bool,
    /// Style output with colors
    pub color: bool,
    /// Show spinners on stderr
    pub progress: bool,
}

impl RunConfig {
    pub fn new(manager: PackageManager, options: ScanOptions) -> Self {
        Self {
            manager,
            options,
            format: DisplayFormat::default(),
            upgrade: false,
            interactive: false,
            vulnerabilities: false,
            color: false,
            progress: false,
        }
    }

    /// Build from CLI arguments once the package manager is known
    pub fn from_args(args: &CliArgs, manager: PackageManager) -> Self {
        Self {
            manager,
            options: args.scan_options(),
            format: args.format,
            upgrade: args.upgrade,
            interactive: args.interactive,
            vulnerabilities: args.vulnerabilities,
            color: true,
            progress: !args.format.lines,
        }
    }

    pub fn with_format(mut self, format: DisplayFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_upgrade(mut self, upgrade: bool) -> Self {
        self.upgrade = upgrade;
        self
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn with_vulnerabilities(mut self, vulnerabilities: bool) -> Self {
        self.vulnerabilities = vulnerabilities;
        self
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing to update after filtering
    UpToDate,
    /// Updates were listed but not applied
    Listed,
    /// This many modules were handed to the updater
    Updated(usize),
    /// The picker was committed with an empty selection
    NothingSelected,
    /// The user quit the picker
    Aborted,
}

/// Orchestrator for one scan-and-update run
pub struct Orchestrator {
    config: RunConfig,
    scanner: Box<dyn Scanner>,
    updater: Box<dyn Updater>,
    vuln_client: Option<Box<dyn VulnClient>>,
    picker: Box<dyn Picker>,
    now: DateTime<Utc>,
}

impl Orchestrator {
    /// Create an orchestrator around explicit adapters
    pub fn new(config: RunConfig, scanner: Box<dyn Scanner>, updater: Box<dyn Updater>) -> Self {
        Self {
            config,
            scanner,
            updater,
            vuln_client: None,
            picker: Box::new(TerminalPicker::new()),
            now: Utc::now(),
        }
    }

    /// Create an orchestrator with the real adapters for `config.manager`
    pub fn from_config(config: RunConfig) -> Result<Self, AppError> {
        let runner = SystemCommandRunner::shared();
        let dir = config.options.work_dir.clone();
        let scanner = create_scanner(config.manager, &dir, runner.clone());
        let updater = create_updater(config.manager, &dir, runner);
        let vuln_client = if config.vulnerabilities {
            Some(vuln::create_client(config.manager)?)
        } else {
            None
        };
        let mut orchestrator = Self::new(config, scanner, updater);
        orchestrator.vuln_client = vuln_client;
        Ok(orchestrator)
    }

    /// Set the advisory client (builder pattern)
    pub fn with_vuln_client(mut self, client: Box<dyn VulnClient>) -> Self {
        self.vuln_client = Some(client);
        self
    }

    /// Set the picker used for interactive runs
    pub fn with_picker(mut self, picker: Box<dyn Picker>) -> Self {
        self.picker = picker;
        self
    }

    /// Set the reference time for cooldown and relative ages
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Scan, classify and filter into the buckets that will be shown
    pub fn collect(&self) -> Result<Buckets, AppError> {
        let options = &self.config.options;
        let modules = self.scanner.get_updates(options)?;
        let index = self.scanner.dependency_index()?;

        let filter = ModuleFilter::from_options(options).with_now(self.now);
        let mut buckets = classify(&modules, &index)
            .filtered(&filter)
            .visible(options.include_all);
        if self.config.format.group {
            buckets = buckets.sorted_grouped();
        }

        debug!(
            scanned = modules.len(),
            direct = buckets.direct.len(),
            indirect = buckets.indirect.len(),
            transitive = buckets.transitive.len(),
            "classified modules"
        );
        Ok(buckets)
    }

    fn row_options(&self) -> RowOptions {
        RowOptions::new(self.now)
            .with_vulns(self.config.vulnerabilities)
            .with_time(self.config.format.time)
            .with_color(self.config.color)
    }

    async fn check_vulnerabilities(&self, buckets: &mut Buckets) {
        let Some(client) = self.vuln_client.as_deref() else {
            return;
        };
        let mut progress = Progress::new(self.config.progress);
        progress.start(buckets.len() as u64, "Checking vulnerabilities...");
        for module in buckets.iter_mut() {
            vuln::enrich(std::iter::once(module), client).await;
            progress.inc();
        }
        progress.finish_and_clear();
    }

    fn apply(&self, modules: &[Module]) -> Result<usize, AppError> {
        info!(count = modules.len(), manager = %self.config.manager, "applying updates");
        self.updater.update_packages(modules)?;
        Ok(modules.len())
    }

    /// Run the workflow, writing user-facing output to `out`
    pub async fn run(&mut self, out: &mut dyn Write) -> Result<RunOutcome, AppError> {
        let lines = self.config.format.lines;

        if !lines {
            writeln!(out, "Using package manager: {}", self.config.manager)?;
            writeln!(out, "Checking for updates...")?;
        }

        let mut progress = Progress::new(self.config.progress);
        progress.spinner("Checking for updates...");
        let collected = self.collect();
        progress.finish_and_clear();
        let mut buckets = collected?;

        if buckets.is_empty() {
            if !lines {
                writeln!(out, "All dependencies match the latest package versions :)")?;
            }
            return Ok(RunOutcome::UpToDate);
        }

        if self.config.vulnerabilities && self.vuln_client.is_some() {
            if !lines {
                writeln!(out, "Checking vulnerabilities...")?;
            }
            self.check_vulnerabilities(&mut buckets).await;
        }

        if self.config.interactive {
            return self.run_interactive(buckets, out);
        }

        if lines {
            render_lines(&buckets, self.config.options.include_all, out)?;
            return Ok(RunOutcome::Listed);
        }

        render_text(
            &buckets,
            &self.config.manager.section_labels(),
            &self.config.format,
            self.config.options.include_all,
            &self.row_options(),
            out,
        )?;

        if self.config.upgrade {
            writeln!(out, "\nUpgrading...")?;
            let count = self.apply(&buckets.into_vec())?;
            writeln!(out, "Done.")?;
            return Ok(RunOutcome::Updated(count));
        }

        writeln!(out, "\nRun with -u to upgrade, or -i for interactive mode.")?;
        Ok(RunOutcome::Listed)
    }

    fn run_interactive(&mut self, buckets: Buckets, out: &mut dyn Write) -> Result<RunOutcome, AppError> {
        let view = ViewOptions::new(self.config.manager.section_labels(), self.row_options())
            .with_group(self.config.format.group);

        let state = self.picker.pick(Selection::new(buckets), &view)?;
        match state.phase() {
            Phase::Committed => {
                let selected = state.committed();
                if selected.is_empty() {
                    writeln!(out, "No packages selected.")?;
                    return Ok(RunOutcome::NothingSelected);
                }
                let count = self.apply(&selected)?;
                writeln!(out, "Updates complete!")?;
                Ok(RunOutcome::Updated(count))
            }
            Phase::Aborted | Phase::Browsing => Ok(RunOutcome::Aborted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DependencyIndex, DependencyInfo};
    use crate::error::{ManifestError, ScanError, UpdateError};
    use crate::picker::{Event, ScriptedPicker};
    use std::sync::{Arc, Mutex};

    struct FixedScanner {
        modules: Vec<Module>,
        index: DependencyIndex,
    }

    impl Scanner for FixedScanner {
        fn get_updates(&self, _options: &ScanOptions) -> Result<Vec<Module>, ScanError> {
            Ok(self.modules.clone())
        }

        fn dependency_index(&self) -> Result<DependencyIndex, ManifestError> {
            Ok(self.index.clone())
        }
    }

    #[derive(Default, Clone)]
    struct RecordingUpdater {
        calls: Arc<Mutex<Vec<Vec<String>>>>,
    }

    impl Updater for RecordingUpdater {
        fn update_packages(&self, modules: &[Module]) -> Result<(), UpdateError> {
            self.calls
                .lock()
                .unwrap()
                .push(modules.iter().map(|m| m.name.clone()).collect());
            Ok(())
        }
    }

    fn scanner() -> Box<dyn Scanner> {
        let mut index = DependencyIndex::new();
        index.insert("a", DependencyInfo::new(true, "direct"));
        index.insert("b", DependencyInfo::new(false, "indirect"));
        Box::new(FixedScanner {
            modules: vec![
                Module::new("b", "v1.0.0", true, "direct").with_update_version("v1.0.1"),
                Module::new("a", "v1.0.0", false, "transitive").with_update_version("v1.1.0"),
                Module::new("c", "v1.0.0", false, "transitive").with_update_version("v2.0.0"),
            ],
            index,
        })
    }

    fn orchestrator(config: RunConfig, updater: RecordingUpdater) -> Orchestrator {
        Orchestrator::new(config, scanner(), Box::new(updater))
    }

    fn config() -> RunConfig {
        RunConfig::new(PackageManager::Go, ScanOptions::new("."))
    }

    #[tokio::test]
    async fn test_collect_applies_index_and_hides_transitive() {
        let o = orchestrator(config(), RecordingUpdater::default());
        let buckets = o.collect().unwrap();
        assert_eq!(buckets.direct[0].name, "a");
        assert_eq!(buckets.indirect[0].name, "b");
        assert!(buckets.transitive.is_empty());
    }

    #[tokio::test]
    async fn test_listing_does_not_update() {
        let updater = RecordingUpdater::default();
        let mut o = orchestrator(config(), updater.clone());
        let mut out = Vec::new();
        let outcome = o.run(&mut out).await.unwrap();

        assert_eq!(outcome, RunOutcome::Listed);
        assert!(updater.calls.lock().unwrap().is_empty());
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Using package manager: go\nChecking for updates...\n"));
        assert!(text.ends_with("\nRun with -u to upgrade, or -i for interactive mode.\n"));
    }

    #[tokio::test]
    async fn test_upgrade_applies_visible_modules() {
        let updater = RecordingUpdater::default();
        let mut o = orchestrator(config().with_upgrade(true), updater.clone());
        let mut out = Vec::new();
        assert_eq!(o.run(&mut out).await.unwrap(), RunOutcome::Updated(2));
        assert_eq!(*updater.calls.lock().unwrap(), vec![vec!["a", "b"]]);
        assert!(String::from_utf8(out).unwrap().ends_with("\nUpgrading...\nDone.\n"));
    }

    #[tokio::test]
    async fn test_interactive_abort() {
        let updater = RecordingUpdater::default();
        let mut o = orchestrator(config().with_interactive(true), updater.clone())
            .with_picker(Box::new(ScriptedPicker::new([Event::Toggle, Event::Abort])));
        let mut out = Vec::new();
        assert_eq!(o.run(&mut out).await.unwrap(), RunOutcome::Aborted);
        assert!(updater.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_interactive_nothing_selected() {
        let mut o = orchestrator(config().with_interactive(true), RecordingUpdater::default())
            .with_picker(Box::new(ScriptedPicker::new([Event::Commit])));
        let mut out = Vec::new();
        assert_eq!(o.run(&mut out).await.unwrap(), RunOutcome::NothingSelected);
        assert!(String::from_utf8(out).unwrap().ends_with("No packages selected.\n"));
    }
}
