//! Dependency record shared by every package manager adapter

use serde::{Deserialize, Serialize};
use std::fmt;

/// A candidate update for a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInfo {
    /// Version the module can be updated to
    pub version: String,
    /// RFC 3339 publish time of the candidate, when the tool reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl UpdateInfo {
    /// Create an update without a publish time
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            time: None,
        }
    }

    /// Attach the candidate's publish time (builder pattern)
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }
}

/// Vulnerability counts for one version of a module
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnInfo {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
    pub critical: u32,
    /// All advisories, including ones without a recognised severity
    pub total: u32,
}

impl VulnInfo {
    /// Returns true if no advisories were recorded
    pub fn is_clean(&self) -> bool {
        self.total == 0
    }
}

/// One dependency as reported by a scanner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Package path or name, ecosystem specific
    pub name: String,
    /// Currently resolved version
    pub version: String,
    /// Publish time of the current version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Candidate update; `None` means up to date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<UpdateInfo>,
    /// Whether the adapter considers this a direct dependency
    pub direct: bool,
    /// Free-form category tag ("dependencies", "devDependencies", "indirect", "main", "dev", ...)
    pub dependency_type: String,
    /// Set by classification when the manifest index knew this name
    #[serde(default)]
    pub from_manifest: bool,
    #[serde(default)]
    pub vuln_current: VulnInfo,
    #[serde(default)]
    pub vuln_update: VulnInfo,
}

impl Module {
    /// Create a module with no candidate update
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        direct: bool,
        dependency_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            time: None,
            update: None,
            direct,
            dependency_type: dependency_type.into(),
            from_manifest: false,
            vuln_current: VulnInfo::default(),
            vuln_update: VulnInfo::default(),
        }
    }

    /// Set the candidate update (builder pattern)
    pub fn with_update(mut self, update: UpdateInfo) -> Self {
        self.update = Some(update);
        self
    }

    /// Shorthand for a candidate version without publish time
    pub fn with_update_version(self, version: impl Into<String>) -> Self {
        self.with_update(UpdateInfo::new(version))
    }

    /// Set the publish time of the current version
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Candidate version, if any
    pub fn update_version(&self) -> Option<&str> {
        self.update.as_ref().map(|u| u.version.as_str())
    }

    /// Publish time of the candidate version, if known
    pub fn update_time(&self) -> Option<&str> {
        self.update.as_ref().and_then(|u| u.time.as_deref())
    }

    /// Returns true if a candidate update exists
    pub fn has_update(&self) -> bool {
        self.update.is_some()
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.update_version() {
            Some(v) => write!(f, "{}@{} -> {}", self.name, self.version, v),
            None => write!(f, "{}@{}", self.name, self.version),
        }
    }
}
