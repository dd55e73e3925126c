//! requirements.txt reader for pip projects

use crate::domain::{DependencyIndex, DependencyInfo, NameMatching};
use crate::error::ManifestError;
use crate::manifest::ManifestReader;
use std::path::Path;

/// Reader for requirements.txt files
pub struct RequirementsTxtReader;

/// Extract the distribution name from one requirements line
///
/// Returns `None` for blanks, comments and pip options such as `-r other.txt`.
pub fn requirement_name(line: &str) -> Option<&str> {
    let line = line.split('#').next().unwrap_or("").trim();
    if line.is_empty() || line.starts_with('-') {
        return None;
    }
    let end = line
        .find(|c: char| matches!(c, '=' | '>' | '<' | '~' | '!' | '[' | ';' | ' ' | '\t'))
        .unwrap_or(line.len());
    let name = line[..end].trim();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

impl ManifestReader for RequirementsTxtReader {
    fn filename(&self) -> &'static str {
        "requirements.txt"
    }

    fn parse(&self, content: &str, _path: &Path) -> Result<DependencyIndex, ManifestError> {
        let mut index = self.empty_index();
        for name in content.lines().filter_map(requirement_name) {
            index.insert(name, DependencyInfo::new(true, "main"));
        }
        Ok(index)
    }

    fn empty_index(&self) -> DependencyIndex {
        DependencyIndex::with_matching(NameMatching::Normalized)
    }
}
