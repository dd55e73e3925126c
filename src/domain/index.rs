//! Manifest-derived dependency classification

use std::collections::BTreeMap;

/// Authoritative classification of one manifest entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyInfo {
    /// Declared as a direct requirement
    pub direct: bool,
    /// Category tag, e.g. "dependencies", "devDependencies", "indirect", "main", "dev"
    pub dep_type: String,
}

impl DependencyInfo {
    pub fn new(direct: bool, dep_type: impl Into<String>) -> Self {
        Self {
            direct,
            dep_type: dep_type.into(),
        }
    }
}

/// How names are compared when looking up the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameMatching {
    /// Byte-for-byte comparison (Go module paths, npm package names)
    #[default]
    Exact,
    /// PEP 503 normalisation: case-insensitive, runs of `-`, `_` and `.` are equivalent
    Normalized,
}

impl NameMatching {
    fn key(&self, name: &str) -> String {
        match self {
            NameMatching::Exact => name.to_string(),
            NameMatching::Normalized => normalize_python_name(name),
        }
    }
}

/// Normalise a Python distribution name the way PyPI does
pub fn normalize_python_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_sep = false;
    for c in name.trim().chars() {
        if matches!(c, '-' | '_' | '.') {
            if !last_sep {
                out.push('-');
            }
            last_sep = true;
        } else {
            out.extend(c.to_lowercase());
            last_sep = false;
        }
    }
    out
}

/// Mapping from package name to its manifest classification
///
/// Backed by a `BTreeMap` so iteration is always in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyIndex {
    entries: BTreeMap<String, DependencyInfo>,
    matching: NameMatching,
}

impl DependencyIndex {
    /// Create an empty index with exact name matching
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty index with the given matching policy
    pub fn with_matching(matching: NameMatching) -> Self {
        Self {
            entries: BTreeMap::new(),
            matching,
        }
    }

    /// Insert or replace an entry; later inserts win
    pub fn insert(&mut self, name: &str, info: DependencyInfo) {
        self.entries.insert(self.matching.key(name), info);
    }

    /// Look up a package name
    pub fn get(&self, name: &str) -> Option<&DependencyInfo> {
        self.entries.get(&self.matching.key(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DependencyInfo)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
