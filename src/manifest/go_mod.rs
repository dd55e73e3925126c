//! go.mod require index
//!
//! Handles:
//! - require statements (single and block)
//! - `// indirect` markers
//! - replace directives (ignored)

use crate::domain::{DependencyIndex, DependencyInfo};
use crate::error::ManifestError;
use crate::manifest::ManifestReader;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Reader for go.mod files
pub struct GoModReader;

// Regex for single require: require module/path v1.2.3 // indirect
static SINGLE_REQUIRE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^require\s+(\S+)\s+(v\S+)\s*(//.*)?$").unwrap());

// Regex for require block entry: module/path v1.2.3
static BLOCK_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+)\s+(v\S+)\s*(//.*)?$").unwrap());

static INDIRECT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//\s*indirect\b").unwrap());

impl GoModReader {
    fn entry(caps: &regex::Captures<'_>) -> (String, bool) {
        let module = caps[1].to_string();
        let indirect = caps
            .get(3)
            .map(|c| INDIRECT_RE.is_match(c.as_str()))
            .unwrap_or(false);
        (module, indirect)
    }
}

impl ManifestReader for GoModReader {
    fn filename(&self) -> &'static str {
        "go.mod"
    }

    fn parse(&self, content: &str, _path: &Path) -> Result<DependencyIndex, ManifestError> {
        let mut index = DependencyIndex::new();
        let mut in_require_block = false;
        let mut in_other_block = false;

        for line in content.lines() {
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with("//") {
                continue;
            }

            if trimmed.starts_with("require (") || trimmed == "require(" {
                in_require_block = true;
                continue;
            }

            // replace, exclude and retract blocks
            if trimmed.ends_with('(') {
                in_other_block = true;
                continue;
            }

            if trimmed == ")" {
                in_require_block = false;
                in_other_block = false;
                continue;
            }

            if in_other_block {
                continue;
            }

            let caps = if in_require_block {
                BLOCK_ENTRY_RE.captures(trimmed)
            } else {
                SINGLE_REQUIRE_RE.captures(trimmed)
            };

            if let Some(caps) = caps {
                let (module, indirect) = Self::entry(&caps);
                let info = if indirect {
                    DependencyInfo::new(false, "indirect")
                } else {
                    DependencyInfo::new(true, "direct")
                };
                index.insert(&module, info);
            }
        }

        Ok(index)
    }
}
