//! Supported package managers

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Package managers faro can scan and update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    /// Go modules (go.mod)
    Go,
    /// npm (package-lock.json)
    Npm,
    /// Yarn (yarn.lock)
    Yarn,
    /// pnpm (pnpm-lock.yaml)
    Pnpm,
    /// pip (requirements.txt)
    Pip,
    /// Poetry (poetry.lock + pyproject.toml)
    Poetry,
    /// uv (uv.lock)
    Uv,
}

/// Headings used for the three classification buckets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLabels {
    pub direct: String,
    pub indirect: String,
    pub transitive: String,
}

impl SectionLabels {
    pub fn new(
        direct: impl Into<String>,
        indirect: impl Into<String>,
        transitive: impl Into<String>,
    ) -> Self {
        Self {
            direct: direct.into(),
            indirect: indirect.into(),
            transitive: transitive.into(),
        }
    }
}

impl Default for SectionLabels {
    fn default() -> Self {
        Self::new("Direct dependencies", "Indirect dependencies", "Transitive")
    }
}

impl PackageManager {
    /// Command-line name of this package manager
    pub fn name(&self) -> &'static str {
        match self {
            PackageManager::Go => "go",
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Pip => "pip",
            PackageManager::Poetry => "poetry",
            PackageManager::Uv => "uv",
        }
    }

    /// Ecosystem name understood by the OSV advisory database
    pub fn osv_ecosystem(&self) -> &'static str {
        match self {
            PackageManager::Go => "Go",
            PackageManager::Npm | PackageManager::Yarn | PackageManager::Pnpm => "npm",
            PackageManager::Pip | PackageManager::Poetry | PackageManager::Uv => "PyPI",
        }
    }

    /// Section headings for this package manager's buckets
    pub fn section_labels(&self) -> SectionLabels {
        match self {
            PackageManager::Go => SectionLabels::new(
                "Direct dependencies (go.mod)",
                "Indirect dependencies (go.mod // indirect)",
                "Transitive (not in go.mod)",
            ),
            PackageManager::Npm | PackageManager::Yarn | PackageManager::Pnpm => {
                SectionLabels::new(
                    "Dependencies (package.json)",
                    "DevDependencies (package.json)",
                    "Transitive",
                )
            }
            PackageManager::Pip => SectionLabels::new(
                "Main dependencies (requirements.txt)",
                "Transitive",
                "Transitive",
            ),
            PackageManager::Poetry | PackageManager::Uv => {
                SectionLabels::new("Main dependencies", "Dev dependencies", "Transitive")
            }
        }
    }

    /// Returns all supported package managers
    pub fn all() -> &'static [PackageManager] {
        &[
            PackageManager::Go,
            PackageManager::Npm,
            PackageManager::Yarn,
            PackageManager::Pnpm,
            PackageManager::Pip,
            PackageManager::Poetry,
            PackageManager::Uv,
        ]
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PackageManager {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        PackageManager::all()
            .iter()
            .copied()
            .find(|pm| pm.name() == wanted)
            .ok_or_else(|| ConfigError::UnsupportedManager {
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_valid() {
        assert_eq!("go".parse::<PackageManager>().unwrap(), PackageManager::Go);
        assert_eq!("NPM".parse::<PackageManager>().unwrap(), PackageManager::Npm);
        assert_eq!(
            " poetry ".parse::<PackageManager>().unwrap(),
            PackageManager::Poetry
        );
    }

    #[test]
    fn test_from_str_invalid() {
        let err = "cargo".parse::<PackageManager>().unwrap_err();
        assert!(err.to_string().contains("unsupported package manager: cargo"));
    }

    #[test]
    fn test_display_round_trips_name() {
        for pm in PackageManager::all() {
            assert_eq!(pm.to_string().parse::<PackageManager>().unwrap(), *pm);
        }
    }

    #[test]
    fn test_section_labels() {
        let go = PackageManager::Go.section_labels();
        assert_eq!(go.direct, "Direct dependencies (go.mod)");
        assert_eq!(go.transitive, "Transitive (not in go.mod)");

        let yarn = PackageManager::Yarn.section_labels();
        assert_eq!(yarn.indirect, "DevDependencies (package.json)");

        let uv = PackageManager::Uv.section_labels();
        assert_eq!(uv.indirect, "Dev dependencies");
    }

    #[test]
    fn test_osv_ecosystem() {
        assert_eq!(PackageManager::Go.osv_ecosystem(), "Go");
        assert_eq!(PackageManager::Pnpm.osv_ecosystem(), "npm");
        assert_eq!(PackageManager::Uv.osv_ecosystem(), "PyPI");
    }

    #[test]
    fn test_serde_serialization() {
        let json = serde_json::to_string(&PackageManager::Pnpm).unwrap();
        assert_eq!(json, "\"pnpm\"");
    }
}
