//! Version delta categories used for grouped display

use colored::Colorize;
use semver::Version;

/// Type of version change between the current and candidate versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VersionDelta {
    /// Major version change (breaking)
    Major,
    /// Minor version change (features)
    Minor,
    /// Patch version change (fixes)
    Patch,
    /// Unknown or unparseable
    Unknown,
}

/// Parse `major.minor.patch`, tolerating a `v` prefix and missing components
fn parse_triple(v: &str) -> Option<(u64, u64, u64)> {
    let v = v.trim();
    let v = v.strip_prefix('v').unwrap_or(v);
    if let Ok(parsed) = Version::parse(v) {
        return Some((parsed.major, parsed.minor, parsed.patch));
    }
    // Split by . and - to handle prerelease suffixes on short versions
    let parts: Vec<&str> = v.split(['.', '-', '+']).collect();
    match parts.as_slice() {
        [major] => Some((major.parse().ok()?, 0, 0)),
        [major, minor] => Some((major.parse().ok()?, minor.parse().ok()?, 0)),
        [major, minor, patch, ..] => Some((
            major.parse().ok()?,
            minor.parse().ok()?,
            patch.parse().ok()?,
        )),
        [] => None,
    }
}

impl VersionDelta {
    /// Determine the change type between two versions
    pub fn from_versions(old: &str, new: &str) -> Self {
        match (parse_triple(old), parse_triple(new)) {
            (Some((old_major, old_minor, _)), Some((new_major, new_minor, _))) => {
                if new_major != old_major {
                    VersionDelta::Major
                } else if new_minor != old_minor {
                    VersionDelta::Minor
                } else {
                    VersionDelta::Patch
                }
            }
            _ => VersionDelta::Unknown,
        }
    }

    /// Sort key; lower keys sort first
    pub fn group_key(&self) -> u8 {
        match self {
            VersionDelta::Major => 0,
            VersionDelta::Minor => 1,
            VersionDelta::Patch => 2,
            VersionDelta::Unknown => 3,
        }
    }

    /// Heading shown above a group of rows
    pub fn label(&self) -> &'static str {
        match self {
            VersionDelta::Major => "Major",
            VersionDelta::Minor => "Minor",
            VersionDelta::Patch => "Patch",
            VersionDelta::Unknown => "Other",
        }
    }

    /// Get the display label with color
    pub fn colored_label(&self) -> String {
        match self {
            VersionDelta::Major => self.label().red().bold().to_string(),
            VersionDelta::Minor => self.label().yellow().to_string(),
            VersionDelta::Patch => self.label().green().to_string(),
            VersionDelta::Unknown => self.label().dimmed().to_string(),
        }
    }
}
